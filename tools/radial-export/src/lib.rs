//! radial-export library
//!
//! Builds radial meshes and progress widget draws from an [`ExportConfig`]
//! and writes them to disk.

pub mod config;
pub mod export;

use std::fmt;

use anyhow::{Context, Result, bail};
use radial_mesh::{DrawnMesh, RadialMesh, RadialProgress, RecordingContext};

pub use config::{ExportConfig, MeshOverrides, OutputFormat, ProgressOverrides};
pub use export::{suffixed_path, write_mesh};

/// Generate the configured mesh and cut the configured slice
pub fn build_mesh(config: &ExportConfig) -> Result<DrawnMesh> {
    let mut mesh = RadialMesh::from_params(config.mesh.params(), config.mesh.flip_normals);
    mesh.update_mesh().context("Failed to generate radial mesh")?;

    Ok(DrawnMesh {
        vertices: mesh.vertexes().to_vec(),
        indices: mesh
            .indices(config.slice.percent, config.slice.invert)
            .into_owned(),
    })
}

/// Run the progress widget once and return its track and progress draws
pub fn build_progress(config: &ExportConfig) -> Result<(DrawnMesh, DrawnMesh)> {
    let settings = &config.progress;
    let mut widget = RadialProgress::from_attributes(&settings.attributes());
    widget.apply_custom_styles(Some(settings.track_color), Some(settings.progress_color));

    let mut ctx = RecordingContext::new();
    widget
        .draw(settings.content_width, settings.content_height, &mut ctx)
        .context("Failed to generate progress meshes")?;

    let mut draws = ctx.draws.into_iter();
    match (draws.next(), draws.next()) {
        (Some(track), Some(progress)) => Ok((track, progress)),
        _ => bail!(
            "Content rect {}x{} is too small to draw",
            settings.content_width,
            settings.content_height
        ),
    }
}

/// Summary of a generated mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshStats {
    pub total_steps: usize,
    pub vertex_count: usize,
    pub index_count: usize,
    pub sliced_index_count: usize,
}

impl MeshStats {
    pub fn triangle_count(&self) -> usize {
        self.sliced_index_count / 3
    }
}

impl fmt::Display for MeshStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "steps: {}, vertices: {}, indices: {} (sliced: {}), triangles: {}",
            self.total_steps,
            self.vertex_count,
            self.index_count,
            self.sliced_index_count,
            self.triangle_count()
        )
    }
}

/// Counts for the configured mesh without writing anything
pub fn inspect(config: &ExportConfig) -> Result<MeshStats> {
    let mut mesh = RadialMesh::from_params(config.mesh.params(), config.mesh.flip_normals);
    mesh.update_mesh().context("Failed to generate radial mesh")?;

    Ok(MeshStats {
        total_steps: mesh.total_steps(),
        vertex_count: mesh.vertexes().len(),
        index_count: mesh.all_indices().len(),
        sliced_index_count: mesh
            .indices(config.slice.percent, config.slice.invert)
            .len(),
    })
}
