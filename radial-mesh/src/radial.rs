//! Radial mesh geometry engine
//!
//! A [`RadialMesh`] holds a pending [`RadialParams`] set and the geometry
//! last committed from it. Setters only compare and store; regeneration
//! happens in [`RadialMesh::update_mesh`], and only when something changed.
//!
//! # Topologies
//!
//! - Pie (`as_bar = false`): vertex 0 is the center, followed by one
//!   perimeter vertex per step. Each step is one triangle touching vertex 0.
//! - Bar (`as_bar = true`): an inner and an outer vertex per step, no
//!   center. Each step is a quad (two triangles) joining neighbouring pairs.
//!
//! # Preconditions
//!
//! Geometry accessors read the last committed cache. Before the first
//! successful `update_mesh` they return empty data.

use std::borrow::Cow;

use glam::Vec3;
use tracing::{debug, trace, warn};

use crate::error::MeshError;
use crate::index_map::{
    QUAD_INDICES_PER_STEP, TRI_INDICES_PER_STEP, Winding, fan_indices, strip_indices,
};
use crate::outline::{outline_point_count, push_outline};
use crate::params::RadialParams;
use crate::vertex::{Color, NEAR_Z, Vertex};

/// Largest vertex count addressable with u16 indices
pub const MAX_VERTEX_COUNT: usize = u16::MAX as usize + 1;

/// Geometry committed by the last successful recompute
#[derive(Clone, Debug, Default)]
struct RadialGeometry {
    /// Parameters the geometry was generated from
    params: RadialParams,
    /// Untranslated positions centered on the origin
    vertices: Vec<Vec3>,
    /// Full index sequence
    indices: Vec<u16>,
    /// Translated, tinted vertices for upload
    vertexes: Vec<Vertex>,
}

/// Dirty-tracked pie/ring mesh generator
#[derive(Clone, Debug)]
pub struct RadialMesh {
    params: RadialParams,
    winding: Winding,
    geometry: RadialGeometry,
    dirty: bool,
    generation: u64,
}

impl RadialMesh {
    /// Create a mesh with the given resolution
    ///
    /// `flip_normals` selects the winding order for the lifetime of the mesh.
    pub fn new(steps_per_quarter: u32, flip_normals: bool) -> Self {
        Self::from_params(RadialParams::with_steps(steps_per_quarter), flip_normals)
    }

    /// Create a mesh from a full parameter set
    pub fn from_params(params: RadialParams, flip_normals: bool) -> Self {
        Self {
            params,
            winding: Winding::from_flip(flip_normals),
            geometry: RadialGeometry::default(),
            dirty: true,
            generation: 0,
        }
    }

    // ------------------------------------------------------------------------
    // Parameters
    // ------------------------------------------------------------------------

    /// Pending parameters (not necessarily committed yet)
    pub fn params(&self) -> &RadialParams {
        &self.params
    }

    pub fn steps_per_quarter(&self) -> u32 {
        self.params.steps_per_quarter
    }

    pub fn total_steps(&self) -> usize {
        self.params.total_steps()
    }

    pub fn width(&self) -> f32 {
        self.params.width
    }

    pub fn height(&self) -> f32 {
        self.params.height
    }

    pub fn border_size(&self) -> f32 {
        self.params.border_size
    }

    pub fn as_bar(&self) -> bool {
        self.params.as_bar
    }

    pub fn as_square(&self) -> bool {
        self.params.as_square
    }

    pub fn color(&self) -> Color {
        self.params.color
    }

    pub fn winding(&self) -> Winding {
        self.winding
    }

    pub fn set_steps_per_quarter(&mut self, value: u32) {
        self.dirty |= self.params.set_steps_per_quarter(value);
    }

    pub fn set_width(&mut self, value: f32) {
        self.dirty |= self.params.set_width(value);
    }

    pub fn set_height(&mut self, value: f32) {
        self.dirty |= self.params.set_height(value);
    }

    pub fn set_border_size(&mut self, value: f32) {
        self.dirty |= self.params.set_border_size(value);
    }

    pub fn set_as_bar(&mut self, value: bool) {
        self.dirty |= self.params.set_as_bar(value);
    }

    pub fn set_as_square(&mut self, value: bool) {
        self.dirty |= self.params.set_as_square(value);
    }

    pub fn set_color(&mut self, value: Color) {
        self.dirty |= self.params.set_color(value);
    }

    /// Apply a whole parameter set; marks dirty only if a field changed
    pub fn set_params(&mut self, params: &RadialParams) {
        self.dirty |= self.params.apply(params);
    }

    // ------------------------------------------------------------------------
    // Recompute
    // ------------------------------------------------------------------------

    /// Whether the committed geometry is stale
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force regeneration on the next `update_mesh`
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Number of recomputes performed so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Regenerate vertices and indices if any parameter changed
    ///
    /// A clean mesh is left untouched. If the configured shape needs more
    /// vertices than u16 indices can address, nothing is committed, the mesh
    /// stays dirty and [`MeshError::IndexOverflow`] is returned.
    pub fn update_mesh(&mut self) -> Result<(), MeshError> {
        if !self.dirty {
            trace!("update_mesh: not dirty, skipping");
            return Ok(());
        }

        let params = self.params;
        let vertex_count = vertex_count(&params);
        if vertex_count > MAX_VERTEX_COUNT {
            warn!(
                "update_mesh: {} vertices exceed the u16 index range (steps_per_quarter={})",
                vertex_count, params.steps_per_quarter
            );
            return Err(MeshError::IndexOverflow {
                vertex_count,
                max: MAX_VERTEX_COUNT,
            });
        }

        let mut vertices = Vec::with_capacity(vertex_count);
        if !params.as_bar {
            vertices.push(Vec3::ZERO);
        }
        push_outline(&mut vertices, &params);

        let indices = build_indices(&params, self.winding);
        let vertexes = vertices
            .iter()
            .map(|&position| create_vertex(&params, position))
            .collect();

        self.geometry = RadialGeometry {
            params,
            vertices,
            indices,
            vertexes,
        };
        self.dirty = false;
        self.generation += 1;

        debug!(
            "update_mesh: {} vertices, {} indices (bar={}, square={}, steps={})",
            self.geometry.vertices.len(),
            self.geometry.indices.len(),
            params.as_bar,
            params.as_square,
            params.total_steps()
        );
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Geometry accessors
    // ------------------------------------------------------------------------

    /// Translated, tinted vertices ready to copy into a render buffer
    pub fn vertexes(&self) -> &[Vertex] {
        &self.geometry.vertexes
    }

    /// Untranslated positions centered on the origin
    ///
    /// `reverse` does not change the result: the forward order is always
    /// returned. [`reversed_vertices`](Self::reversed_vertices) computes the
    /// reversed ordering.
    pub fn vertices(&self, _reverse: bool) -> &[Vec3] {
        &self.geometry.vertices
    }

    /// Positions in reverse walk order, anchored at the start vertex
    ///
    /// The first two vertices stay in front so the shape starts at the same
    /// location; in bar mode that leading pair is swapped. The rest follow in
    /// reverse.
    pub fn reversed_vertices(&self) -> Vec<Vec3> {
        let vertices = &self.geometry.vertices;
        let anchor = vertices.len().min(2);

        let mut reversed = vertices[..anchor].to_vec();
        if self.geometry.params.as_bar {
            reversed.reverse();
        }
        reversed.extend(vertices[anchor..].iter().rev());
        reversed
    }

    /// The full committed index sequence
    pub fn all_indices(&self) -> &[u16] {
        &self.geometry.indices
    }

    /// Index prefix revealing `percent` (clamped to 0..=100) of the shape
    ///
    /// With `invert_percent` the revealed step count is the remaining
    /// `total * (1 - percent / 100)`. Inverted pie slices are cut from a fan
    /// regenerated with the opposite winding.
    pub fn indices(&self, percent: f32, invert_percent: bool) -> Cow<'_, [u16]> {
        let params = &self.geometry.params;
        let percent = percent.clamp(0.0, 100.0);
        let total_steps = params.total_steps() as f32;

        let steps = if invert_percent {
            total_steps * (1.0 - percent / 100.0)
        } else {
            total_steps * percent / 100.0
        }
        .floor() as usize;

        let per_step = if params.as_bar {
            QUAD_INDICES_PER_STEP
        } else {
            TRI_INDICES_PER_STEP
        };
        let count = steps * per_step;

        if invert_percent && !params.as_bar {
            let mut flipped = build_indices(params, self.winding.flipped());
            flipped.truncate(count);
            Cow::Owned(flipped)
        } else {
            let all = &self.geometry.indices;
            Cow::Borrowed(&all[..count.min(all.len())])
        }
    }
}

/// Vertex count `update_mesh` produces for `params`
fn vertex_count(params: &RadialParams) -> usize {
    let points = outline_point_count(params);
    if params.as_bar { points * 2 } else { points + 1 }
}

fn build_indices(params: &RadialParams, winding: Winding) -> Vec<u16> {
    let templates = winding.templates();
    let steps = params.total_steps();
    if params.as_bar {
        strip_indices(steps, templates.quad)
    } else {
        fan_indices(steps, templates.tri)
    }
}

/// Shift into the host's positive quadrant, push to the near plane, tint
fn create_vertex(params: &RadialParams, position: Vec3) -> Vertex {
    Vertex::new(
        Vec3::new(position.x + params.width, position.y + params.height, NEAR_Z),
        params.color,
    )
}
