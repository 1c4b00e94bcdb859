//! Generic mesh-builder facade
//!
//! A host framework owns the mesh object and calls [`MeshBuilder::build`];
//! implementors override the geometry hooks. The default hooks describe a
//! unit quad on the XY plane.
//!
//! Adapters:
//! - [`RadialMeshBuilder`] - hosts a [`RadialMesh`] with slicing options
//! - [`CircleMeshBuilder`] - unit-radius triangle fan
//! - [`QuadMeshBuilder`] - the default hooks, unchanged

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use tracing::debug;

use crate::error::MeshError;
use crate::index_map::Winding;
use crate::params::RadialParams;
use crate::radial::RadialMesh;

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    /// Bounds of a point set (zero-sized at the origin when empty)
    pub fn from_points(points: &[Vec3]) -> Self {
        let Some((&first, rest)) = points.split_first() else {
            return Self::default();
        };
        rest.iter().fold(
            Self {
                min: first,
                max: first,
            },
            |bounds, &p| Self {
                min: bounds.min.min(p),
                max: bounds.max.max(p),
            },
        )
    }
}

/// Assembled mesh produced by [`MeshBuilder::build`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuiltMesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<u32>,
    /// `None` when the builder does not support texturing
    pub uvs: Option<Vec<Vec2>>,
    /// Builder-provided or recalculated from faces
    pub normals: Vec<Vec3>,
    pub bounds: Bounds,
}

impl BuiltMesh {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }
}

/// Overridable geometry hooks plus mesh assembly
pub trait MeshBuilder {
    /// Called before any geometry hook
    fn preprocess(&mut self) {}

    fn calculate_vertices(&mut self) -> Result<Vec<Vec3>, MeshError> {
        Ok(vec![
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        ])
    }

    /// Called after `calculate_vertices`
    fn calculate_triangles(&mut self) -> Result<Vec<u32>, MeshError> {
        Ok(vec![0, 3, 1, 1, 3, 2])
    }

    fn calculate_uvs(&self, vertices: &[Vec3]) -> Option<Vec<Vec2>> {
        Some(standard_uvs(vertices, true, true))
    }

    /// `None` recalculates smooth normals from the triangles
    fn calculate_normals(&self, _vertices: &[Vec3]) -> Option<Vec<Vec3>> {
        None
    }

    /// Run every hook and assemble the result
    fn build(&mut self) -> Result<BuiltMesh, MeshError> {
        self.preprocess();

        let vertices = self.calculate_vertices()?;
        let triangles = self.calculate_triangles()?;
        let uvs = self.calculate_uvs(&vertices);

        debug!("vertices: {}", vertices.len());
        debug!("triangles: {}", triangles.len());
        match &uvs {
            Some(uvs) => debug!("uvs: {}", uvs.len()),
            None => debug!("uvs: none"),
        }

        let normals = match self.calculate_normals(&vertices) {
            Some(normals) => {
                debug!("normals: {}", normals.len());
                normals
            }
            None => {
                debug!("normals: recalculated");
                recalculate_normals(&vertices, &triangles)
            }
        };

        let bounds = Bounds::from_points(&vertices);
        Ok(BuiltMesh {
            vertices,
            triangles,
            uvs,
            normals,
            bounds,
        })
    }
}

/// Map XY positions into [0, 1] UV space using their bounding box
///
/// With `map_origin_to_center` the box is grown to be symmetric about the
/// origin, so the origin lands on (0.5, 0.5). With `preserve_aspect_ratio`
/// both axes are scaled by the larger extent.
pub fn standard_uvs(
    vertices: &[Vec3],
    preserve_aspect_ratio: bool,
    map_origin_to_center: bool,
) -> Vec<Vec2> {
    let bounds = Bounds::from_points(vertices);
    let mut anchor = bounds.min.truncate();
    let mut extent = bounds.max.truncate();

    if map_origin_to_center {
        anchor = anchor.min(-extent);
        extent = extent.max(-anchor);
    }

    let mut size = extent - anchor;
    if preserve_aspect_ratio {
        size = Vec2::splat(size.max_element());
    }
    // Flat or empty input: avoid dividing by zero
    let size = Vec2::select(size.cmpgt(Vec2::ZERO), size, Vec2::ONE);

    vertices
        .iter()
        .map(|v| {
            let v = v.truncate();
            if map_origin_to_center {
                v / size + Vec2::splat(0.5)
            } else {
                (v - anchor) / size
            }
        })
        .collect()
}

/// Area-weighted smooth normals; unreferenced vertices face +Z
fn recalculate_normals(vertices: &[Vec3], triangles: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; vertices.len()];

    for tri in triangles.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let (Some(&va), Some(&vb), Some(&vc)) = (vertices.get(a), vertices.get(b), vertices.get(c))
        else {
            continue;
        };
        let face = (vb - va).cross(vc - va);
        for i in [a, b, c] {
            normals[i] += face;
        }
    }

    normals
        .into_iter()
        .map(|n| n.normalize_or(Vec3::Z))
        .collect()
}

// ============================================================================
// Adapters
// ============================================================================

/// Hosts a [`RadialMesh`] inside the builder framework
///
/// Vertices are the untranslated generated positions; triangles are the
/// `percent` slice of the index sequence.
#[derive(Clone, Debug)]
pub struct RadialMeshBuilder {
    pub flip_normals: bool,
    pub as_bar: bool,
    pub as_square: bool,
    /// Steps per quarter turn
    pub num_steps: u32,
    pub height: f32,
    pub width: f32,
    pub border_size: u32,
    /// Revealed share of the shape, 0..=100
    pub percent: u8,
    pub invert_percent: bool,
    mesh: Option<RadialMesh>,
}

impl Default for RadialMeshBuilder {
    fn default() -> Self {
        Self {
            flip_normals: false,
            as_bar: false,
            as_square: false,
            num_steps: 32,
            height: 20.0,
            width: 20.0,
            border_size: 5,
            percent: 0,
            invert_percent: false,
            mesh: None,
        }
    }
}

impl RadialMeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The hosted mesh, once the builder has run
    pub fn mesh(&self) -> Option<&RadialMesh> {
        self.mesh.as_ref()
    }

    fn params(&self) -> RadialParams {
        RadialParams {
            steps_per_quarter: self.num_steps,
            width: self.width,
            height: self.height,
            border_size: self.border_size as f32,
            as_bar: self.as_bar,
            as_square: self.as_square,
            ..RadialParams::default()
        }
    }
}

impl MeshBuilder for RadialMeshBuilder {
    fn calculate_vertices(&mut self) -> Result<Vec<Vec3>, MeshError> {
        let params = self.params();
        let winding = Winding::from_flip(self.flip_normals);

        // Winding is fixed per mesh, so a flip change needs a new one
        let mesh = match self.mesh.take() {
            Some(mesh) if mesh.winding() == winding => mesh,
            _ => RadialMesh::new(params.steps_per_quarter, self.flip_normals),
        };
        let mesh = self.mesh.insert(mesh);
        mesh.set_params(&params);
        mesh.update_mesh()?;

        Ok(mesh.vertices(self.invert_percent).to_vec())
    }

    fn calculate_triangles(&mut self) -> Result<Vec<u32>, MeshError> {
        let Some(mesh) = &self.mesh else {
            return Ok(Vec::new());
        };
        Ok(mesh
            .indices(self.percent as f32, self.invert_percent)
            .iter()
            .map(|&i| u32::from(i))
            .collect())
    }
}

/// Unit-radius triangle fan around a center vertex
#[derive(Clone, Copy, Debug)]
pub struct CircleMeshBuilder {
    pub triangles_per_rad: u32,
}

impl Default for CircleMeshBuilder {
    fn default() -> Self {
        Self {
            triangles_per_rad: 5,
        }
    }
}

impl CircleMeshBuilder {
    pub fn triangle_count(&self) -> u32 {
        (TAU * self.triangles_per_rad as f32).ceil() as u32
    }
}

impl MeshBuilder for CircleMeshBuilder {
    fn calculate_vertices(&mut self) -> Result<Vec<Vec3>, MeshError> {
        let count = self.triangle_count();
        let mut vertices = Vec::with_capacity(count as usize + 1);
        vertices.push(Vec3::ZERO);

        for i in 0..count {
            let theta = i as f32 / count as f32 * TAU;
            vertices.push(Vec3::new(theta.cos(), theta.sin(), 0.0));
        }

        Ok(vertices)
    }

    fn calculate_triangles(&mut self) -> Result<Vec<u32>, MeshError> {
        let count = self.triangle_count();
        let mut triangles = Vec::with_capacity(count as usize * 3);

        for i in 0..count {
            // Last triangle closes back onto the first rim vertex
            let next = if i == count - 1 { 1 } else { i + 2 };
            triangles.extend_from_slice(&[0, next, i + 1]);
        }

        Ok(triangles)
    }
}

/// The default quad hooks
#[derive(Clone, Copy, Debug, Default)]
pub struct QuadMeshBuilder;

impl MeshBuilder for QuadMeshBuilder {}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_quad_defaults() {
        let mesh = QuadMeshBuilder.build().unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangles, vec![0, 3, 1, 1, 3, 2]);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.bounds.min, Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(mesh.bounds.max, Vec3::new(1.0, 1.0, 0.0));

        let uvs = mesh.uvs.unwrap();
        assert_eq!(uvs[0], Vec2::new(0.0, 0.0));
        assert_eq!(uvs[2], Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_recalculated_normals_face_plane() {
        let mesh = QuadMeshBuilder.build().unwrap();
        // 0,3,1 winds clockwise seen from +Z
        for normal in &mesh.normals {
            assert!((*normal - Vec3::NEG_Z).length() < EPS, "{normal:?}");
        }
    }

    #[test]
    fn test_unreferenced_vertex_normal_fallback() {
        let normals = recalculate_normals(&[Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE], &[0, 1, 2]);
        assert!((normals[0] - Vec3::Z).length() < EPS);
        assert_eq!(normals[3], Vec3::Z);
    }

    #[test]
    fn test_standard_uvs_origin_centered() {
        let vertices = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 2.0, 0.0)];
        let uvs = standard_uvs(&vertices, true, true);
        // Box grows to x in [-4, 4], y in [-2, 2], scaled by 8 on both axes
        assert_eq!(uvs[0], Vec2::new(0.5, 0.5));
        assert_eq!(uvs[1], Vec2::new(1.0, 0.75));
    }

    #[test]
    fn test_standard_uvs_anchor_mapping() {
        let vertices = [Vec3::new(2.0, 1.0, 0.0), Vec3::new(6.0, 3.0, 0.0)];
        let uvs = standard_uvs(&vertices, false, false);
        assert_eq!(uvs[0], Vec2::new(0.0, 0.0));
        assert_eq!(uvs[1], Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_standard_uvs_degenerate_input() {
        assert!(standard_uvs(&[], true, true).is_empty());
        let uvs = standard_uvs(&[Vec3::ZERO], true, true);
        assert_eq!(uvs[0], Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_circle_builder() {
        let mut builder = CircleMeshBuilder::default();
        assert_eq!(builder.triangle_count(), 32);

        let mesh = builder.build().unwrap();
        assert_eq!(mesh.vertices.len(), 33);
        assert_eq!(mesh.triangles.len(), 96);
        assert_eq!(&mesh.triangles[0..3], &[0, 2, 1]);
        assert_eq!(&mesh.triangles[93..96], &[0, 1, 32]);
        assert!((mesh.vertices[1] - Vec3::X).length() < EPS);
    }

    #[test]
    fn test_circle_builder_zero_density() {
        let mut builder = CircleMeshBuilder {
            triangles_per_rad: 0,
        };
        let mesh = builder.build().unwrap();
        assert_eq!(mesh.vertices, vec![Vec3::ZERO]);
        assert!(mesh.triangles.is_empty());
    }

    #[test]
    fn test_radial_builder_defaults() {
        let mut builder = RadialMeshBuilder::new();
        let mesh = builder.build().unwrap();
        assert_eq!(mesh.vertices.len(), 32 * 4 + 1);
        // Percent defaults to zero: nothing revealed
        assert!(mesh.triangles.is_empty());
        assert!((mesh.vertices[1] - Vec3::new(0.0, 20.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_radial_builder_slices() {
        let mut builder = RadialMeshBuilder {
            num_steps: 2,
            as_bar: true,
            percent: 50,
            ..RadialMeshBuilder::default()
        };
        let mesh = builder.build().unwrap();
        assert_eq!(mesh.vertices.len(), 16);
        assert_eq!(mesh.triangles.len(), 4 * 6);
        assert!(mesh.uvs.is_some());
    }

    #[test]
    fn test_radial_builder_reuses_mesh() {
        let mut builder = RadialMeshBuilder {
            num_steps: 2,
            percent: 100,
            ..RadialMeshBuilder::default()
        };
        builder.build().unwrap();
        builder.build().unwrap();
        assert_eq!(builder.mesh().map(RadialMesh::generation), Some(1));

        builder.width = 30.0;
        builder.build().unwrap();
        assert_eq!(builder.mesh().map(RadialMesh::generation), Some(2));
    }

    #[test]
    fn test_radial_builder_flip_rebuilds_mesh() {
        let mut builder = RadialMeshBuilder {
            num_steps: 1,
            percent: 100,
            ..RadialMeshBuilder::default()
        };
        let normal = builder.build().unwrap();
        builder.flip_normals = true;
        let flipped = builder.build().unwrap();

        assert_eq!(&normal.triangles[0..3], &[0, 2, 1]);
        assert_eq!(&flipped.triangles[0..3], &[0, 1, 2]);
        assert_eq!(builder.mesh().map(RadialMesh::winding), Some(Winding::Reverse));
    }

    #[test]
    fn test_radial_builder_overflow_propagates() {
        let mut builder = RadialMeshBuilder {
            num_steps: 20_000,
            ..RadialMeshBuilder::default()
        };
        assert!(matches!(
            builder.build(),
            Err(MeshError::IndexOverflow { .. })
        ));
    }
}
