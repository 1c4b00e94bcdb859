//! Procedural radial meshes for progress indicators
//!
//! Generates the vertex and index buffers for "pie" (filled fan sharing a
//! center vertex) and "bar" (hollow ring built from quads) shapes, with
//! circular or square outlines and percentage-based partial reveal.
//!
//! # Modules
//!
//! - [`radial`] - [`RadialMesh`], the dirty-tracked geometry engine
//! - [`index_map`] - Per-step winding templates and index generation
//! - [`outline`] - Circle and square perimeter walks
//! - [`params`] - Pending parameter set with change detection
//! - [`vertex`] - [`Vertex`] and [`Color`] records handed to the host
//! - [`builder`] - Generic mesh-builder facade and its adapters
//! - [`progress`] - Radial progress widget model (track + progress rings)
//! - [`packing`] - Compact GPU vertex packing (f16 positions, unorm8 tints)
//!
//! # Usage
//!
//! ```
//! use radial_mesh::RadialMesh;
//!
//! let mut mesh = RadialMesh::new(1, false);
//! mesh.set_width(10.0);
//! mesh.set_height(10.0);
//! mesh.update_mesh().unwrap();
//!
//! assert_eq!(mesh.vertexes().len(), 5);
//! assert_eq!(mesh.indices(50.0, false).len(), 6);
//! ```

pub mod builder;
pub mod error;
pub mod index_map;
pub mod outline;
pub mod packing;
pub mod params;
pub mod progress;
pub mod radial;
pub mod vertex;

pub use builder::{
    Bounds, BuiltMesh, CircleMeshBuilder, MeshBuilder, QuadMeshBuilder, RadialMeshBuilder, standard_uvs,
};
pub use error::MeshError;
pub use index_map::{IndexTemplates, Winding};
pub use params::RadialParams;
pub use packing::{PackedVertex, pack_vertices};
pub use progress::{
    DrawnMesh, MeshGenerationContext, MeshWriteData, RadialProgress, RadialProgressAttributes,
    RecordingContext,
};
pub use radial::{MAX_VERTEX_COUNT, RadialMesh};
pub use vertex::{Color, NEAR_Z, Vertex};
