//! Compact GPU vertex packing
//!
//! [`PackedVertex`] halves a [`Vertex`] to 12 bytes: the position goes to
//! `Float16x4` with `w = 1` and the tint to `Unorm8x4`.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use half::f16;

use crate::vertex::{Color, Vertex};

/// Size of one [`PackedVertex`] in bytes
pub const PACKED_STRIDE: usize = size_of::<PackedVertex>();

/// A [`Vertex`] in upload form
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct PackedVertex {
    pub position: [f16; 4],
    pub tint: [u8; 4],
}

impl From<&Vertex> for PackedVertex {
    fn from(vertex: &Vertex) -> Self {
        Self {
            position: half_position(vertex.position),
            tint: unorm_tint(vertex.tint),
        }
    }
}

fn half_position(p: Vec3) -> [f16; 4] {
    p.extend(1.0).to_array().map(f16::from_f32)
}

/// Channels outside 0..=1 saturate; the rest round to nearest
fn unorm_tint(color: Color) -> [u8; 4] {
    color
        .to_array()
        .map(|channel| (channel.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Pack `vertices` back to back and return the raw bytes
pub fn pack_vertices(vertices: &[Vertex]) -> Vec<u8> {
    let packed: Vec<PackedVertex> = vertices.iter().map(PackedVertex::from).collect();
    bytemuck::cast_slice(&packed).to_vec()
}
