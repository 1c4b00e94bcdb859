//! Radial progress widget model
//!
//! [`RadialProgress`] draws two concentric [`RadialMesh`] shapes into a host
//! rectangle: a full "track" and a "progress" shape revealed up to the
//! current percentage. The host supplies buffers through
//! [`MeshGenerationContext`]; [`RecordingContext`] keeps the draws in memory.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::MeshError;
use crate::radial::RadialMesh;
use crate::vertex::{Color, Vertex};

/// Steps per quarter for both meshes
pub const NUM_STEPS: u32 = 100;

/// Conventional track tint (grey)
pub const DEFAULT_TRACK_COLOR: Color = Color::new(0.5, 0.5, 0.5, 1.0);
/// Conventional progress tint (green)
pub const DEFAULT_PROGRESS_COLOR: Color = Color::new(0.0, 0.8, 0.2, 1.0);

/// Smallest half extent that is still drawn
const MIN_HALF_EXTENT: f32 = 2.0;

// ============================================================================
// Host contract
// ============================================================================

/// Writable vertex and index slices handed out by the host
#[derive(Debug)]
pub struct MeshWriteData<'a> {
    vertices: &'a mut [Vertex],
    indices: &'a mut [u16],
}

impl<'a> MeshWriteData<'a> {
    pub fn new(vertices: &'a mut [Vertex], indices: &'a mut [u16]) -> Self {
        Self { vertices, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Copy `vertices` verbatim
    ///
    /// # Panics
    ///
    /// Panics if the length differs from the allocated vertex count.
    pub fn set_all_vertices(&mut self, vertices: &[Vertex]) {
        self.vertices.copy_from_slice(vertices);
    }

    /// Copy `indices` verbatim
    ///
    /// # Panics
    ///
    /// Panics if the length differs from the allocated index count.
    pub fn set_all_indices(&mut self, indices: &[u16]) {
        self.indices.copy_from_slice(indices);
    }
}

/// Host-side mesh allocation
pub trait MeshGenerationContext {
    /// Reserve a draw with exactly `vertex_count` vertices and `index_count` indices
    fn allocate(&mut self, vertex_count: usize, index_count: usize) -> MeshWriteData<'_>;
}

/// One allocated draw
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DrawnMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

/// In-memory context recording every allocation in order
#[derive(Clone, Debug, Default)]
pub struct RecordingContext {
    pub draws: Vec<DrawnMesh>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MeshGenerationContext for RecordingContext {
    fn allocate(&mut self, vertex_count: usize, index_count: usize) -> MeshWriteData<'_> {
        let slot = self.draws.len();
        self.draws.push(DrawnMesh {
            vertices: vec![Vertex::default(); vertex_count],
            indices: vec![0; index_count],
        });
        let draw = &mut self.draws[slot];
        MeshWriteData::new(&mut draw.vertices, &mut draw.indices)
    }
}

// ============================================================================
// Widget
// ============================================================================

/// Declarative widget attributes
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RadialProgressAttributes {
    pub progress: f32,
    pub bar_size: u32,
    pub as_bar: bool,
    pub as_square: bool,
    pub invert_progress: bool,
}

impl Default for RadialProgressAttributes {
    fn default() -> Self {
        Self {
            progress: 0.0,
            bar_size: 10,
            as_bar: false,
            as_square: false,
            invert_progress: false,
        }
    }
}

/// Track and progress shapes drawn into a content rectangle
#[derive(Clone, Debug)]
pub struct RadialProgress {
    track_mesh: RadialMesh,
    progress_mesh: RadialMesh,
    progress: f32,
    bar_size: u32,
    as_bar: bool,
    as_square: bool,
    invert_progress: bool,
    needs_repaint: bool,
}

impl Default for RadialProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl RadialProgress {
    pub fn new() -> Self {
        Self {
            track_mesh: RadialMesh::new(NUM_STEPS, false),
            progress_mesh: RadialMesh::new(NUM_STEPS, false),
            progress: 0.0,
            bar_size: 10,
            as_bar: false,
            as_square: false,
            invert_progress: false,
            needs_repaint: true,
        }
    }

    pub fn from_attributes(attributes: &RadialProgressAttributes) -> Self {
        let mut widget = Self::new();
        widget.apply_attributes(attributes);
        widget
    }

    pub fn apply_attributes(&mut self, attributes: &RadialProgressAttributes) {
        self.set_progress(attributes.progress);
        self.set_bar_size(attributes.bar_size);
        self.set_invert_progress(attributes.invert_progress);
        self.set_as_bar(attributes.as_bar);
        self.set_as_square(attributes.as_square);
    }

    /// Revealed share, nominally 0..=100
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn bar_size(&self) -> u32 {
        self.bar_size
    }

    pub fn as_bar(&self) -> bool {
        self.as_bar
    }

    pub fn as_square(&self) -> bool {
        self.as_square
    }

    pub fn invert_progress(&self) -> bool {
        self.invert_progress
    }

    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    pub fn track_mesh(&self) -> &RadialMesh {
        &self.track_mesh
    }

    pub fn progress_mesh(&self) -> &RadialMesh {
        &self.progress_mesh
    }

    pub fn set_progress(&mut self, value: f32) {
        self.progress = value;
        self.needs_repaint = true;
    }

    pub fn set_bar_size(&mut self, value: u32) {
        self.bar_size = value;
        self.needs_repaint = true;
    }

    pub fn set_as_bar(&mut self, value: bool) {
        self.as_bar = value;
        self.needs_repaint = true;
    }

    pub fn set_as_square(&mut self, value: bool) {
        self.as_square = value;
        self.needs_repaint = true;
    }

    pub fn set_invert_progress(&mut self, value: bool) {
        self.invert_progress = value;
        self.needs_repaint = true;
    }

    /// Apply resolved style colors; `None` keeps the current tint
    pub fn apply_custom_styles(&mut self, track_color: Option<Color>, progress_color: Option<Color>) {
        if let Some(color) = progress_color {
            self.progress_mesh.set_color(color);
        }
        if let Some(color) = track_color {
            self.track_mesh.set_color(color);
        }

        if self.progress_mesh.is_dirty() || self.track_mesh.is_dirty() {
            self.needs_repaint = true;
        }
    }

    /// Generate both shapes for a `content_width` x `content_height` rectangle
    ///
    /// Rectangles with a half extent below 2 draw nothing. Otherwise the track
    /// is allocated first with its full index set, then the progress shape
    /// with the revealed slice.
    pub fn draw(
        &mut self,
        content_width: f32,
        content_height: f32,
        ctx: &mut impl MeshGenerationContext,
    ) -> Result<(), MeshError> {
        let half_width = content_width * 0.5;
        let half_height = content_height * 0.5;

        if half_width < MIN_HALF_EXTENT || half_height < MIN_HALF_EXTENT {
            trace!(
                "draw: content {}x{} too small, skipping",
                content_width, content_height
            );
            self.needs_repaint = false;
            return Ok(());
        }

        let border = (self.bar_size as f32).clamp(0.0, half_width.min(half_height));

        for mesh in [&mut self.progress_mesh, &mut self.track_mesh] {
            mesh.set_width(half_width);
            mesh.set_height(half_height);
            mesh.set_border_size(border);
            mesh.set_as_bar(self.as_bar);
            mesh.set_as_square(self.as_square);
            mesh.update_mesh()?;
        }

        let track_indices = self.track_mesh.all_indices();
        let track_vertexes = self.track_mesh.vertexes();
        let mut track = ctx.allocate(track_vertexes.len(), track_indices.len());
        track.set_all_vertices(track_vertexes);
        track.set_all_indices(track_indices);

        let progress_vertexes = self.progress_mesh.vertexes();
        let progress_indices = self
            .progress_mesh
            .indices(self.progress, self.invert_progress);
        let mut progress = ctx.allocate(progress_vertexes.len(), progress_indices.len());
        progress.set_all_vertices(progress_vertexes);
        progress.set_all_indices(&progress_indices);

        self.needs_repaint = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn draw(widget: &mut RadialProgress, width: f32, height: f32) -> RecordingContext {
        let mut ctx = RecordingContext::new();
        widget.draw(width, height, &mut ctx).unwrap();
        ctx
    }

    #[test]
    fn test_new_widget_defaults() {
        let widget = RadialProgress::new();
        assert_eq!(widget.progress(), 0.0);
        assert_eq!(widget.bar_size(), 10);
        assert!(widget.needs_repaint());
        assert_eq!(widget.track_mesh().steps_per_quarter(), NUM_STEPS);
        assert_eq!(widget.progress_mesh().steps_per_quarter(), NUM_STEPS);
    }

    #[test]
    fn test_pie_draw() {
        let mut widget = RadialProgress::new();
        widget.set_progress(50.0);
        let ctx = draw(&mut widget, 40.0, 40.0);

        assert_eq!(ctx.draws.len(), 2);
        let [track, progress] = [&ctx.draws[0], &ctx.draws[1]];
        assert_eq!(track.vertices.len(), 401);
        assert_eq!(track.indices.len(), 1200);
        assert_eq!(progress.vertices.len(), 401);
        assert_eq!(progress.indices.len(), 600);
        assert_eq!(progress.indices[..], track.indices[..600]);
        assert!(!widget.needs_repaint());

        // Center vertex sits in the middle of the content rect
        assert_eq!(track.vertices[0].position, Vec3::new(20.0, 20.0, -1.0));
    }

    #[test]
    fn test_bar_draw_clamps_border() {
        let mut widget = RadialProgress::new();
        widget.set_as_bar(true);
        widget.set_bar_size(30);
        widget.set_progress(25.0);
        let ctx = draw(&mut widget, 40.0, 60.0);

        assert_eq!(widget.track_mesh().border_size(), 20.0);
        assert_eq!(ctx.draws[0].vertices.len(), 800);
        assert_eq!(ctx.draws[0].indices.len(), 2400);
        assert_eq!(ctx.draws[1].indices.len(), 600);
    }

    #[test]
    fn test_inverted_progress() {
        let mut widget = RadialProgress::new();
        widget.set_progress(25.0);
        widget.set_invert_progress(true);
        let ctx = draw(&mut widget, 40.0, 40.0);
        assert_eq!(ctx.draws[1].indices.len(), 900);
        assert_eq!(&ctx.draws[1].indices[0..3], &[0, 1, 2]);
    }

    #[test]
    fn test_tiny_rect_draws_nothing() {
        let mut widget = RadialProgress::new();
        let ctx = draw(&mut widget, 3.9, 100.0);
        assert!(ctx.draws.is_empty());
        assert!(widget.track_mesh().is_dirty());
    }

    #[test]
    fn test_redraw_reuses_geometry() {
        let mut widget = RadialProgress::new();
        draw(&mut widget, 40.0, 40.0);
        widget.set_progress(75.0);
        let ctx = draw(&mut widget, 40.0, 40.0);

        assert_eq!(widget.track_mesh().generation(), 1);
        assert_eq!(widget.progress_mesh().generation(), 1);
        assert_eq!(ctx.draws[1].indices.len(), 900);
    }

    #[test]
    fn test_custom_styles() {
        let mut widget = RadialProgress::new();
        draw(&mut widget, 40.0, 40.0);
        assert!(!widget.needs_repaint());

        widget.apply_custom_styles(None, None);
        assert!(!widget.needs_repaint());

        widget.apply_custom_styles(Some(DEFAULT_TRACK_COLOR), Some(DEFAULT_PROGRESS_COLOR));
        assert!(widget.needs_repaint());

        let ctx = draw(&mut widget, 40.0, 40.0);
        assert_eq!(ctx.draws[0].vertices[0].tint, DEFAULT_TRACK_COLOR);
        assert_eq!(ctx.draws[1].vertices[0].tint, DEFAULT_PROGRESS_COLOR);

        widget.apply_custom_styles(Some(DEFAULT_TRACK_COLOR), None);
        assert!(!widget.needs_repaint());
    }

    #[test]
    fn test_attributes_from_toml() {
        let attributes: RadialProgressAttributes = toml::from_str(
            r#"
            progress = 40.0
            as-bar = true
            invert-progress = true
            "#,
        )
        .unwrap();
        assert_eq!(attributes.bar_size, 10);
        assert!(attributes.as_bar);

        let widget = RadialProgress::from_attributes(&attributes);
        assert_eq!(widget.progress(), 40.0);
        assert!(widget.invert_progress());
        assert!(!widget.as_square());
    }

    #[test]
    fn test_write_data_counts() {
        let mut ctx = RecordingContext::new();
        let data = ctx.allocate(3, 6);
        assert_eq!(data.vertex_count(), 3);
        assert_eq!(data.index_count(), 6);
        assert_eq!(ctx.draws.len(), 1);
    }
}
