// Transform hierarchy for the page scene.
//
// Nodes live in an arena and are addressed by `NodeId`. Each node owns its
// children; the root is owned by the graph. Local-space helpers follow the
// usual scene-graph conventions: `translate_*` moves along the node's own
// rotated axes and `rotate_y` post-multiplies the local rotation.

use glam::{Mat3, Mat4, Quat, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_matrix(m: Mat4) -> Self {
        let (scale, rotation, translation) = m.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
            scale,
        }
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Surface description. Colors are linear RGBA.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Material {
    /// Diffuse-lit, optionally textured.
    Lambert {
        color: [f32; 4],
        texture: Option<TextureHandle>,
    },
    /// Flat color, ignores lights.
    Unlit { color: [f32; 4] },
}

impl Material {
    pub fn textured(texture: TextureHandle) -> Self {
        Material::Lambert {
            color: [1.0; 4],
            texture: Some(texture),
        }
    }

    pub fn texture(&self) -> Option<TextureHandle> {
        match self {
            Material::Lambert { texture, .. } => *texture,
            Material::Unlit { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drawable {
    pub mesh: MeshHandle,
    pub material: Material,
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub drawable: Option<Drawable>,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 8]>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Clone, Debug)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        let root = Node {
            name: "scene".to_string(),
            transform: Transform::default(),
            drawable: None,
            parent: None,
            children: SmallVec::new(),
        };
        Self { nodes: vec![root] }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append an empty group under `parent`.
    pub fn add_group(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.add_node(parent, name, Transform::default(), None)
    }

    pub fn add_mesh(&mut self, parent: NodeId, name: &str, drawable: Drawable) -> NodeId {
        self.add_node(parent, name, Transform::default(), Some(drawable))
    }

    pub fn add_node(
        &mut self,
        parent: NodeId,
        name: &str,
        transform: Transform,
        drawable: Option<Drawable>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            transform,
            drawable,
            parent: Some(parent),
            children: SmallVec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn set_position(&mut self, id: NodeId, position: Vec3) {
        self.nodes[id.0].transform.translation = position;
    }

    pub fn set_scale(&mut self, id: NodeId, scale: f32) {
        self.nodes[id.0].transform.scale = Vec3::splat(scale);
    }

    /// Rotate about the node's own Y axis.
    pub fn rotate_y(&mut self, id: NodeId, angle: f32) {
        let t = &mut self.nodes[id.0].transform;
        t.rotation = (t.rotation * Quat::from_rotation_y(angle)).normalize();
    }

    /// Move along a local axis (the axis is rotated by the node's rotation).
    pub fn translate_on_axis(&mut self, id: NodeId, axis: Vec3, distance: f32) {
        let t = &mut self.nodes[id.0].transform;
        t.translation += t.rotation * axis * distance;
    }

    pub fn translate_x(&mut self, id: NodeId, distance: f32) {
        self.translate_on_axis(id, Vec3::X, distance);
    }

    pub fn translate_y(&mut self, id: NodeId, distance: f32) {
        self.translate_on_axis(id, Vec3::Y, distance);
    }

    pub fn translate_z(&mut self, id: NodeId, distance: f32) {
        self.translate_on_axis(id, Vec3::Z, distance);
    }

    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let node = self.node(id);
        let local = node.transform.matrix();
        match node.parent() {
            Some(p) => self.world_matrix(p) * local,
            None => local,
        }
    }

    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).w_axis.truncate()
    }

    /// Turn the node so its local +Z axis faces `target` (world space).
    /// Parent rotations are compensated, so the result holds in world space.
    pub fn look_at(&mut self, id: NodeId, target: Vec3) {
        let position = self.world_position(id);
        let Some(q_world) = look_rotation(position, target) else {
            return;
        };
        let parent_rotation = match self.node(id).parent() {
            Some(p) => {
                let (_, r, _) = self.world_matrix(p).to_scale_rotation_translation();
                r
            }
            None => Quat::IDENTITY,
        };
        self.nodes[id.0].transform.rotation = (parent_rotation.inverse() * q_world).normalize();
    }

    /// Every drawable node with its world matrix, parents before children.
    pub fn drawables(&self) -> Vec<(NodeId, Mat4, Drawable)> {
        let mut out = Vec::new();
        let root = self.root();
        let mut stack: Vec<(NodeId, Mat4)> = vec![(root, self.node(root).transform.matrix())];
        while let Some((id, world)) = stack.pop() {
            let node = self.node(id);
            if let Some(d) = node.drawable {
                out.push((id, world, d));
            }
            for child in node.children().iter().rev() {
                let local = self.nodes[child.0].transform.matrix();
                stack.push((*child, world * local));
            }
        }
        out
    }
}

/// Rotation whose +Z axis points from `from` toward `to`, with world +Y as
/// the up hint. `None` when the points coincide.
pub fn look_rotation(from: Vec3, to: Vec3) -> Option<Quat> {
    let z = (to - from).normalize_or_zero();
    if z == Vec3::ZERO {
        return None;
    }
    let mut x = Vec3::Y.cross(z);
    if x.length_squared() < 1e-12 {
        // Looking straight up or down; nudge the forward axis off the pole.
        let nudged = (z + Vec3::new(0.0, 0.0, 1e-4)).normalize();
        x = Vec3::Y.cross(nudged);
        if x.length_squared() < 1e-12 {
            x = Vec3::X;
        }
    }
    let x = x.normalize();
    let y = z.cross(x);
    Some(Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize())
}
