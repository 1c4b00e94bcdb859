//! radial-export - radial mesh export tool
//!
//! Generates pie and ring meshes (standalone or as a progress widget's
//! track/progress pair) and writes them as OBJ, JSON or packed binary.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use radial_export::{
    ExportConfig, MeshOverrides, OutputFormat, ProgressOverrides, build_mesh, build_progress,
    inspect, suffixed_path, write_mesh,
};

#[derive(Parser)]
#[command(name = "radial-export")]
#[command(about = "Radial mesh export tool")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a single radial mesh
    Mesh {
        #[command(flatten)]
        shape: ShapeArgs,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Draw a progress widget and export its track and progress meshes
    Progress {
        /// Path to a radial.toml config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Content rect width
        #[arg(long)]
        width: Option<f32>,

        /// Content rect height
        #[arg(long)]
        height: Option<f32>,

        /// Progress value (0-100)
        #[arg(short, long)]
        progress: Option<f32>,

        /// Ring thickness in bar mode
        #[arg(long)]
        bar_size: Option<u32>,

        /// Hollow ring instead of a filled pie
        #[arg(long)]
        bar: bool,

        /// Square outline instead of an ellipse
        #[arg(long)]
        square: bool,

        /// Reveal the remaining share instead of the progress
        #[arg(long)]
        invert: bool,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file; "-track" and "-progress" are appended to the name
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print vertex and index counts without writing anything
    Inspect {
        #[command(flatten)]
        shape: ShapeArgs,
    },
}

/// Mesh shape and slice flags shared by `mesh` and `inspect`
#[derive(Args)]
struct ShapeArgs {
    /// Path to a radial.toml config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Steps per quarter turn
    #[arg(long)]
    steps: Option<u32>,

    /// Outer half width
    #[arg(long)]
    width: Option<f32>,

    /// Outer half height
    #[arg(long)]
    height: Option<f32>,

    /// Ring thickness in bar mode
    #[arg(long)]
    border: Option<f32>,

    /// Hollow ring instead of a filled pie
    #[arg(long)]
    bar: bool,

    /// Square outline instead of an ellipse
    #[arg(long)]
    square: bool,

    /// Reverse triangle winding
    #[arg(long)]
    flip_normals: bool,

    /// Revealed share (0-100)
    #[arg(long)]
    percent: Option<f32>,

    /// Reveal the remaining share instead
    #[arg(long)]
    invert: bool,
}

impl ShapeArgs {
    fn load(&self) -> Result<ExportConfig> {
        let mut config = ExportConfig::load_or_default(self.config.as_deref())?;
        config.apply_mesh_overrides(&MeshOverrides {
            steps: self.steps,
            width: self.width,
            height: self.height,
            border: self.border,
            bar: self.bar,
            square: self.square,
            flip_normals: self.flip_normals,
            percent: self.percent,
            invert: self.invert,
        });
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match cli.command {
        Commands::Mesh {
            shape,
            format,
            output,
        } => {
            let config = shape.load()?;
            let format = config.resolve_format(format);
            let output = config.resolve_output(output, "radial", format);

            let mesh = build_mesh(&config)?;
            write_mesh(&output, format, &mesh)?;
            tracing::info!("Done!");
        }

        Commands::Progress {
            config,
            width,
            height,
            progress,
            bar_size,
            bar,
            square,
            invert,
            format,
            output,
        } => {
            let mut config = ExportConfig::load_or_default(config.as_deref())?;
            config.apply_progress_overrides(&ProgressOverrides {
                content_width: width,
                content_height: height,
                progress,
                bar_size,
                bar,
                square,
                invert,
            });
            let format = config.resolve_format(format);
            let output = config.resolve_output(output, "radial", format);

            let (track, progress) = build_progress(&config)?;
            write_mesh(&suffixed_path(&output, "track"), format, &track)?;
            write_mesh(&suffixed_path(&output, "progress"), format, &progress)?;
            tracing::info!("Done!");
        }

        Commands::Inspect { shape } => {
            let config = shape.load()?;
            let stats = inspect(&config)?;
            tracing::info!("{}", stats);
        }
    }

    Ok(())
}
