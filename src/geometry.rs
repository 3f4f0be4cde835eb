use glam::{Mat3, Vec3};
use std::f32::consts::{PI, TAU};

/// Interleaved vertex shared by procedural meshes and decoded models.
///
/// Texture coordinates use the top-left origin WebGPU samples with.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// CPU-side triangle list ready for upload.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// UV sphere whose radius doubles as its width and height segment count.
    pub fn sphere(radius: f32) -> Self {
        let (width, height) = sphere_segments(radius);
        Self::sphere_with_segments(radius, width, height)
    }

    pub fn sphere_with_segments(radius: f32, width: u32, height: u32) -> Self {
        let width = width.max(3);
        let height = height.max(2);
        let mut vertices = Vec::with_capacity(((width + 1) * (height + 1)) as usize);
        let mut grid = Vec::with_capacity((height + 1) as usize);

        for iy in 0..=height {
            let v = iy as f32 / height as f32;
            // Pole vertices sit halfway across their segment.
            let u_offset = if iy == 0 {
                0.5 / width as f32
            } else if iy == height {
                -0.5 / width as f32
            } else {
                0.0
            };
            let mut row = Vec::with_capacity((width + 1) as usize);
            for ix in 0..=width {
                let u = ix as f32 / width as f32;
                let phi = u * TAU;
                let theta = v * PI;
                let p = Vec3::new(
                    -radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                );
                row.push(vertices.len() as u32);
                vertices.push(Vertex {
                    position: p.to_array(),
                    normal: p.normalize_or_zero().to_array(),
                    uv: [u + u_offset, v],
                });
            }
            grid.push(row);
        }

        let mut indices = Vec::with_capacity((6 * width * (height - 1)) as usize);
        for iy in 0..height as usize {
            for ix in 0..width as usize {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height as usize - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self { vertices, indices }
    }

    /// Torus in the XY plane around the Z axis.
    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        let radial = radial_segments.max(3);
        let tubular = tubular_segments.max(3);
        let mut vertices = Vec::with_capacity(((radial + 1) * (tubular + 1)) as usize);

        for j in 0..=radial {
            for i in 0..=tubular {
                let u = i as f32 / tubular as f32 * TAU;
                let v = j as f32 / radial as f32 * TAU;
                let p = Vec3::new(
                    (radius + tube * v.cos()) * u.cos(),
                    (radius + tube * v.cos()) * u.sin(),
                    tube * v.sin(),
                );
                let ring_center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
                vertices.push(Vertex {
                    position: p.to_array(),
                    normal: (p - ring_center).normalize_or_zero().to_array(),
                    uv: [i as f32 / tubular as f32, 1.0 - j as f32 / radial as f32],
                });
            }
        }

        let stride = tubular + 1;
        let mut indices = Vec::with_capacity((6 * radial * tubular) as usize);
        for j in 1..=radial {
            for i in 1..=tubular {
                let a = stride * j + i - 1;
                let b = stride * (j - 1) + i - 1;
                let c = stride * (j - 1) + i;
                let d = stride * j + i;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self { vertices, indices }
    }

    /// Axis-aligned bounds as `(min, max)`; `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut it = self.vertices.iter().map(|v| Vec3::from(v.position));
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Move the geometry so its bounding-box center sits at the origin.
    pub fn center(&mut self) -> Vec3 {
        let Some((lo, hi)) = self.bounds() else {
            return Vec3::ZERO;
        };
        let c = (lo + hi) * 0.5;
        for v in &mut self.vertices {
            v.position = (Vec3::from(v.position) - c).to_array();
        }
        c
    }

    /// Bake a rotation about X into positions and normals.
    pub fn rotate_x(&mut self, angle: f32) {
        let m = Mat3::from_rotation_x(angle);
        for v in &mut self.vertices {
            v.position = (m * Vec3::from(v.position)).to_array();
            v.normal = (m * Vec3::from(v.normal)).to_array();
        }
    }

    /// Smooth normals from the triangle list (area weighted).
    pub fn compute_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.vertices.len()];
        for tri in self.indices.chunks_exact(3) {
            let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            if ia >= acc.len() || ib >= acc.len() || ic >= acc.len() {
                continue;
            }
            let a = Vec3::from(self.vertices[ia].position);
            let b = Vec3::from(self.vertices[ib].position);
            let c = Vec3::from(self.vertices[ic].position);
            let n = (b - a).cross(c - a);
            acc[ia] += n;
            acc[ib] += n;
            acc[ic] += n;
        }
        for (v, n) in self.vertices.iter_mut().zip(acc) {
            v.normal = n.normalize_or_zero().to_array();
        }
    }
}

#[inline]
pub fn sphere_segments(radius: f32) -> (u32, u32) {
    let r = radius.max(0.0).floor() as u32;
    (r.max(3), r.max(2))
}
