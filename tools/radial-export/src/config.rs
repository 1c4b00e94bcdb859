//! Export configuration (radial.toml)
//!
//! Every section and field is optional. Command-line flags are layered on
//! top through [`MeshOverrides`] and [`ProgressOverrides`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use radial_mesh::progress::{DEFAULT_PROGRESS_COLOR, DEFAULT_TRACK_COLOR};
use radial_mesh::{Color, RadialParams, RadialProgressAttributes};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub mesh: MeshConfig,
    #[serde(default)]
    pub slice: SliceConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Shape of a standalone radial mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
    #[serde(default = "default_steps")]
    pub steps_per_quarter: u32,
    #[serde(default = "default_extent")]
    pub width: f32,
    #[serde(default = "default_extent")]
    pub height: f32,
    #[serde(default = "default_border")]
    pub border_size: f32,
    #[serde(default)]
    pub as_bar: bool,
    #[serde(default)]
    pub as_square: bool,
    #[serde(default)]
    pub flip_normals: bool,
    #[serde(default = "default_color")]
    pub color: Color,
}

/// Revealed share of the mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceConfig {
    #[serde(default = "default_percent")]
    pub percent: f32,
    #[serde(default)]
    pub invert: bool,
}

/// Progress widget content rect, attributes and style colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default = "default_content_size")]
    pub content_width: f32,
    #[serde(default = "default_content_size")]
    pub content_height: f32,
    #[serde(default)]
    pub progress: f32,
    #[serde(default = "default_bar_size")]
    pub bar_size: u32,
    #[serde(default)]
    pub as_bar: bool,
    #[serde(default)]
    pub as_square: bool,
    #[serde(default)]
    pub invert_progress: bool,
    #[serde(default = "default_track_color")]
    pub track_color: Color,
    #[serde(default = "default_progress_color")]
    pub progress_color: Color,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// File format written by the exporter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Wavefront OBJ (positions and faces)
    #[default]
    Obj,
    /// JSON `{ vertices, indices }`
    Json,
    /// Header + packed f16/unorm8 vertices + u16 indices
    Bin,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Obj => "obj",
            Self::Json => "json",
            Self::Bin => "radmesh",
        }
    }
}

fn default_steps() -> u32 { 32 }
fn default_extent() -> f32 { 20.0 }
fn default_border() -> f32 { 5.0 }
fn default_color() -> Color { Color::WHITE }
fn default_percent() -> f32 { 100.0 }
fn default_content_size() -> f32 { 100.0 }
fn default_bar_size() -> u32 { 10 }
fn default_track_color() -> Color { DEFAULT_TRACK_COLOR }
fn default_progress_color() -> Color { DEFAULT_PROGRESS_COLOR }

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            steps_per_quarter: default_steps(),
            width: default_extent(),
            height: default_extent(),
            border_size: default_border(),
            as_bar: false,
            as_square: false,
            flip_normals: false,
            color: default_color(),
        }
    }
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self {
            percent: default_percent(),
            invert: false,
        }
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            content_width: default_content_size(),
            content_height: default_content_size(),
            progress: 0.0,
            bar_size: default_bar_size(),
            as_bar: false,
            as_square: false,
            invert_progress: false,
            track_color: default_track_color(),
            progress_color: default_progress_color(),
        }
    }
}

impl MeshConfig {
    pub fn params(&self) -> RadialParams {
        RadialParams {
            steps_per_quarter: self.steps_per_quarter,
            width: self.width,
            height: self.height,
            border_size: self.border_size,
            as_bar: self.as_bar,
            as_square: self.as_square,
            color: self.color,
        }
    }
}

impl ProgressConfig {
    pub fn attributes(&self) -> RadialProgressAttributes {
        RadialProgressAttributes {
            progress: self.progress,
            bar_size: self.bar_size,
            as_bar: self.as_bar,
            as_square: self.as_square,
            invert_progress: self.invert_progress,
        }
    }
}

/// Command-line values for the mesh and slice sections
///
/// `None` and `false` leave the file value in place.
#[derive(Debug, Clone, Default)]
pub struct MeshOverrides {
    pub steps: Option<u32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub border: Option<f32>,
    pub bar: bool,
    pub square: bool,
    pub flip_normals: bool,
    pub percent: Option<f32>,
    pub invert: bool,
}

/// Command-line values for the progress section
#[derive(Debug, Clone, Default)]
pub struct ProgressOverrides {
    pub content_width: Option<f32>,
    pub content_height: Option<f32>,
    pub progress: Option<f32>,
    pub bar_size: Option<u32>,
    pub bar: bool,
    pub square: bool,
    pub invert: bool,
}

impl ExportConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config: {:?}", path))
    }

    /// Load `path` if given, otherwise start from defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn apply_mesh_overrides(&mut self, overrides: &MeshOverrides) {
        let mesh = &mut self.mesh;
        if let Some(steps) = overrides.steps {
            mesh.steps_per_quarter = steps;
        }
        if let Some(width) = overrides.width {
            mesh.width = width;
        }
        if let Some(height) = overrides.height {
            mesh.height = height;
        }
        if let Some(border) = overrides.border {
            mesh.border_size = border;
        }
        mesh.as_bar |= overrides.bar;
        mesh.as_square |= overrides.square;
        mesh.flip_normals |= overrides.flip_normals;

        if let Some(percent) = overrides.percent {
            self.slice.percent = percent;
        }
        self.slice.invert |= overrides.invert;
    }

    pub fn apply_progress_overrides(&mut self, overrides: &ProgressOverrides) {
        let progress = &mut self.progress;
        if let Some(width) = overrides.content_width {
            progress.content_width = width;
        }
        if let Some(height) = overrides.content_height {
            progress.content_height = height;
        }
        if let Some(value) = overrides.progress {
            progress.progress = value;
        }
        if let Some(bar_size) = overrides.bar_size {
            progress.bar_size = bar_size;
        }
        progress.as_bar |= overrides.bar;
        progress.as_square |= overrides.square;
        progress.invert_progress |= overrides.invert;
    }

    /// Output format: command line, then config file
    pub fn resolve_format(&self, cli: Option<OutputFormat>) -> OutputFormat {
        cli.unwrap_or(self.output.format)
    }

    /// Output path: command line, then config file, then `<stem>.<ext>`
    pub fn resolve_output(&self, cli: Option<PathBuf>, stem: &str, format: OutputFormat) -> PathBuf {
        cli.or_else(|| self.output.path.clone())
            .unwrap_or_else(|| PathBuf::from(format!("{}.{}", stem, format.extension())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================================
    // Default value tests
    // =============================================================

    #[test]
    fn test_config_default() {
        let config = ExportConfig::default();
        assert_eq!(config.mesh.steps_per_quarter, 32);
        assert_eq!(config.mesh.width, 20.0);
        assert_eq!(config.mesh.border_size, 5.0);
        assert_eq!(config.mesh.color, Color::WHITE);
        assert!((config.slice.percent - 100.0).abs() < f32::EPSILON);
        assert_eq!(config.progress.bar_size, 10);
        assert_eq!(config.output.format, OutputFormat::Obj);
        assert!(config.output.path.is_none());
    }

    #[test]
    fn test_empty_file_matches_default() {
        let config: ExportConfig = toml::from_str("").unwrap();
        assert_eq!(config, ExportConfig::default());
    }

    // =============================================================
    // Parsing tests
    // =============================================================

    #[test]
    fn test_partial_sections() {
        let config: ExportConfig = toml::from_str(
            r#"
            [mesh]
            steps_per_quarter = 4
            as_bar = true
            color = [1.0, 0.0, 0.0, 1.0]

            [slice]
            invert = true

            [output]
            format = "bin"
            path = "ring.radmesh"
            "#,
        )
        .unwrap();

        assert_eq!(config.mesh.steps_per_quarter, 4);
        assert!(config.mesh.as_bar);
        assert_eq!(config.mesh.height, 20.0);
        assert_eq!(config.mesh.color, Color::new(1.0, 0.0, 0.0, 1.0));
        assert!(config.slice.invert);
        assert_eq!(config.slice.percent, 100.0);
        assert_eq!(config.output.format, OutputFormat::Bin);
        assert_eq!(config.output.path, Some(PathBuf::from("ring.radmesh")));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result: Result<ExportConfig, _> = toml::from_str("[output]\nformat = \"fbx\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_mesh_params() {
        let mut config = ExportConfig::default();
        config.mesh.as_square = true;
        let params = config.mesh.params();
        assert_eq!(params.steps_per_quarter, 32);
        assert!(params.as_square);
        assert_eq!(params.color, Color::WHITE);
    }

    // =============================================================
    // Override tests
    // =============================================================

    #[test]
    fn test_mesh_overrides_layer_on_file() {
        let mut config: ExportConfig = toml::from_str(
            r#"
            [mesh]
            width = 50.0
            as_square = true
            "#,
        )
        .unwrap();

        config.apply_mesh_overrides(&MeshOverrides {
            steps: Some(2),
            height: Some(8.0),
            bar: true,
            percent: Some(25.0),
            ..MeshOverrides::default()
        });

        assert_eq!(config.mesh.steps_per_quarter, 2);
        assert_eq!(config.mesh.width, 50.0);
        assert_eq!(config.mesh.height, 8.0);
        assert!(config.mesh.as_bar);
        assert!(config.mesh.as_square);
        assert!(!config.mesh.flip_normals);
        assert_eq!(config.slice.percent, 25.0);
    }

    #[test]
    fn test_progress_overrides() {
        let mut config = ExportConfig::default();
        config.apply_progress_overrides(&ProgressOverrides {
            content_width: Some(64.0),
            progress: Some(30.0),
            invert: true,
            ..ProgressOverrides::default()
        });

        let attributes = config.progress.attributes();
        assert_eq!(config.progress.content_width, 64.0);
        assert_eq!(config.progress.content_height, 100.0);
        assert_eq!(attributes.progress, 30.0);
        assert!(attributes.invert_progress);
        assert_eq!(attributes.bar_size, 10);
    }

    #[test]
    fn test_resolve_output() {
        let mut config = ExportConfig::default();
        assert_eq!(
            config.resolve_output(None, "radial", OutputFormat::Json),
            PathBuf::from("radial.json")
        );

        config.output.path = Some(PathBuf::from("from_file.obj"));
        assert_eq!(
            config.resolve_output(None, "radial", OutputFormat::Obj),
            PathBuf::from("from_file.obj")
        );
        assert_eq!(
            config.resolve_output(Some(PathBuf::from("cli.obj")), "radial", OutputFormat::Obj),
            PathBuf::from("cli.obj")
        );
    }

    #[test]
    fn test_resolve_format() {
        let mut config = ExportConfig::default();
        config.output.format = OutputFormat::Json;
        assert_eq!(config.resolve_format(None), OutputFormat::Json);
        assert_eq!(config.resolve_format(Some(OutputFormat::Bin)), OutputFormat::Bin);
    }
}
