// Scene assembly: the fixed `scroll → load → { halo, eyes }` hierarchy and
// the steps that hang models and orbit bodies off it.

use glam::Vec3;

use crate::assets::{AssetQueue, ModelData};
use crate::config::SceneConfig;
use crate::constants::*;
use crate::geometry::MeshData;
use crate::scene::{Drawable, Material, NodeId, SceneGraph, TextureHandle, Transform};

/// A texture that has a handle but still needs fetching.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureRequest {
    pub handle: TextureHandle,
    pub url: String,
}

/// Named groups of the hierarchy, fixed at startup.
#[derive(Clone, Copy, Debug)]
pub struct SceneLayout {
    pub scroll: NodeId,
    pub load: NodeId,
    pub halo: NodeId,
    pub eyes: Option<EyePair>,
}

#[derive(Clone, Copy, Debug)]
pub struct EyePair {
    pub group: NodeId,
    pub left: NodeId,
    pub right: NodeId,
}

impl EyePair {
    pub fn nodes(&self) -> [NodeId; 2] {
        [self.left, self.right]
    }
}

/// Build the empty groups, plus the eyes when the variant tracks the pointer.
pub fn build_skeleton(
    graph: &mut SceneGraph,
    assets: &mut AssetQueue,
    config: &SceneConfig,
    requests: &mut Vec<TextureRequest>,
) -> SceneLayout {
    let scroll = graph.add_group(graph.root(), "scroll");
    let load = graph.add_group(scroll, "load");
    let halo = graph.add_group(load, "halo");

    let eyes = if config.eye_tracking {
        let group = graph.add_group(load, "eyes");
        let eye_mesh = assets.add_mesh(MeshData::sphere(EYE_RADIUS));
        let eye_tex = request_texture(assets, config, EYE_TEXTURE, requests);
        let material = Material::textured(eye_tex);

        let left = graph.add_mesh(
            group,
            "leftEye",
            Drawable {
                mesh: eye_mesh,
                material,
            },
        );
        graph.set_position(left, Vec3::from(LEFT_EYE_POSITION));

        let right = graph.add_mesh(
            group,
            "rightEye",
            Drawable {
                mesh: eye_mesh,
                material,
            },
        );
        graph.set_position(right, Vec3::from(RIGHT_EYE_POSITION));
        graph.rotate_y(right, RIGHT_EYE_YAW);

        Some(EyePair { group, left, right })
    } else {
        None
    };

    SceneLayout {
        scroll,
        load,
        halo,
        eyes,
    }
}

/// Insert the bust under the load group and assemble the orbit around it.
/// Returns the model root.
pub fn attach_primary_model(
    graph: &mut SceneGraph,
    assets: &mut AssetQueue,
    layout: &SceneLayout,
    config: &SceneConfig,
    mut model: ModelData,
    requests: &mut Vec<TextureRequest>,
) -> NodeId {
    model.center_parts();
    let root = insert_model(graph, assets, layout.load, "bust", model);
    graph.set_scale(root, BUST_SCALE);
    graph.rotate_y(root, BUST_YAW);
    assemble_orbit(graph, assets, layout, config, requests);
    root
}

/// Attach the secondary model so it rides the halo.
pub fn attach_secondary_model(
    graph: &mut SceneGraph,
    assets: &mut AssetQueue,
    layout: &SceneLayout,
    model: ModelData,
) -> NodeId {
    let root = insert_model(graph, assets, layout.halo, "duck", model);
    graph.set_scale(root, DUCK_SCALE);
    graph.translate_x(root, DUCK_OFFSET[0]);
    graph.translate_z(root, DUCK_OFFSET[1]);
    graph.rotate_y(root, DUCK_YAW);
    root
}

/// Halo ring plus the textured bodies, then lift the whole halo group.
pub fn assemble_orbit(
    graph: &mut SceneGraph,
    assets: &mut AssetQueue,
    layout: &SceneLayout,
    config: &SceneConfig,
    requests: &mut Vec<TextureRequest>,
) {
    let mut ring = MeshData::torus(
        HALO_RADIUS,
        HALO_TUBE,
        HALO_RADIAL_SEGMENTS,
        HALO_TUBULAR_SEGMENTS,
    );
    ring.rotate_x(HALO_TILT);
    let [r, g, b] = HALO_COLOR;
    graph.add_mesh(
        layout.halo,
        "haloRing",
        Drawable {
            mesh: assets.add_mesh(ring),
            material: Material::Unlit {
                color: [r, g, b, 1.0],
            },
        },
    );

    for body in &config.orbit {
        let tex = request_texture(assets, config, body.texture, requests);
        let id = graph.add_mesh(
            layout.halo,
            body.texture,
            Drawable {
                mesh: assets.add_mesh(MeshData::sphere(body.radius)),
                material: Material::textured(tex),
            },
        );
        graph.translate_x(id, body.offset.x);
        graph.translate_y(id, body.offset.y);
        graph.translate_z(id, body.offset.z);
        if body.yaw != 0.0 {
            graph.rotate_y(id, body.yaw);
        }
    }

    graph.translate_y(layout.halo, HALO_LIFT);
}

fn request_texture(
    assets: &mut AssetQueue,
    config: &SceneConfig,
    file: &str,
    requests: &mut Vec<TextureRequest>,
) -> TextureHandle {
    let url = config.asset_url(file);
    // Bodies may share an image; fetch it once.
    if let Some(existing) = requests.iter().find(|r| r.url == url) {
        return existing.handle;
    }
    let handle = assets.reserve_texture();
    requests.push(TextureRequest { handle, url });
    handle
}

fn insert_model(
    graph: &mut SceneGraph,
    assets: &mut AssetQueue,
    parent: NodeId,
    name: &str,
    model: ModelData,
) -> NodeId {
    let root = graph.add_group(parent, name);
    for part in model.parts {
        let texture = part.texture.map(|img| assets.add_texture(img));
        let drawable = Drawable {
            mesh: assets.add_mesh(part.mesh),
            material: Material::Lambert {
                color: part.base_color,
                texture,
            },
        };
        graph.add_node(
            root,
            &part.name,
            Transform::from_matrix(part.local),
            Some(drawable),
        );
    }
    root
}

/// Everything the loader, the event handlers and the render loop share.
#[derive(Debug)]
pub struct SceneState {
    pub graph: SceneGraph,
    pub assets: AssetQueue,
    pub layout: SceneLayout,
    pub config: SceneConfig,
    pub primary_loaded: bool,
}

impl SceneState {
    /// Build the skeleton; the returned requests are the textures to fetch.
    pub fn new(config: SceneConfig) -> (Self, Vec<TextureRequest>) {
        let mut graph = SceneGraph::new();
        let mut assets = AssetQueue::default();
        let mut requests = Vec::new();
        let layout = build_skeleton(&mut graph, &mut assets, &config, &mut requests);
        (
            Self {
                graph,
                assets,
                layout,
                config,
                primary_loaded: false,
            },
            requests,
        )
    }

    pub fn on_primary_loaded(&mut self, model: ModelData) -> Vec<TextureRequest> {
        let mut requests = Vec::new();
        attach_primary_model(
            &mut self.graph,
            &mut self.assets,
            &self.layout,
            &self.config,
            model,
            &mut requests,
        );
        self.primary_loaded = true;
        requests
    }

    pub fn on_secondary_loaded(&mut self, model: ModelData) -> NodeId {
        attach_secondary_model(&mut self.graph, &mut self.assets, &self.layout, model)
    }

    /// Per-frame animation: constant group spin, then eyes toward the
    /// pointer target (when the variant has eyes).
    pub fn advance(&mut self, eye_target: Option<Vec3>) {
        self.graph.rotate_y(self.layout.load, self.config.load_spin);
        self.graph.rotate_y(self.layout.halo, self.config.halo_spin);
        if let (Some(eyes), Some(target)) = (self.layout.eyes, eye_target) {
            for eye in eyes.nodes() {
                self.graph.look_at(eye, target);
            }
        }
    }
}
