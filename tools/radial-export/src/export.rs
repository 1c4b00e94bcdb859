//! Mesh writers
//!
//! Each writer takes a [`DrawnMesh`] (translated, tinted vertices plus u16
//! indices) and serializes it in one of the [`OutputFormat`]s.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use radial_mesh::DrawnMesh;
use radial_mesh::packing::pack_vertices;

use crate::config::OutputFormat;

/// Write `mesh` to `path` in `format`
pub fn write_mesh(path: &Path, format: OutputFormat, mesh: &DrawnMesh) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create output: {:?}", path))?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Obj => write_obj(&mut writer, mesh)?,
        OutputFormat::Json => write_json(&mut writer, mesh)?,
        OutputFormat::Bin => write_bin(&mut writer, mesh)?,
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write output: {:?}", path))?;

    tracing::info!(
        "Wrote {:?}: {} vertices, {} indices, format={:?}",
        path,
        mesh.vertices.len(),
        mesh.indices.len(),
        format
    );
    Ok(())
}

/// Wavefront OBJ: `v` lines then 1-based `f` triangles
pub fn write_obj<W: Write>(w: &mut W, mesh: &DrawnMesh) -> Result<()> {
    writeln!(w, "# radial-export")?;
    for vertex in &mesh.vertices {
        let p = vertex.position;
        writeln!(w, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for tri in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| u32::from(i) + 1);
        writeln!(w, "f {} {} {}", a, b, c)?;
    }
    Ok(())
}

/// JSON `{ "vertices": [...], "indices": [...] }`
pub fn write_json<W: Write>(w: &mut W, mesh: &DrawnMesh) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, mesh)?;
    writeln!(w)?;
    Ok(())
}

/// Bytes before the vertex data in a `.radmesh` file
pub const BIN_HEADER_SIZE: usize = 12;

/// Header format byte: vertices carry a tint
pub const BIN_FORMAT_TINTED: u8 = 2;

/// Packed binary mesh
///
/// ```text
/// 0x00: vertex count, u32 LE
/// 0x04: index count, u32 LE
/// 0x08: format byte, then 3 zero bytes
/// 0x0C: packed vertices (12 bytes each)
/// then: u16 LE indices
/// ```
pub fn write_bin<W: Write>(w: &mut W, mesh: &DrawnMesh) -> Result<()> {
    let vertex_count =
        u32::try_from(mesh.vertices.len()).context("Too many vertices for a .radmesh file")?;
    let index_count =
        u32::try_from(mesh.indices.len()).context("Too many indices for a .radmesh file")?;

    w.write_all(&vertex_count.to_le_bytes())?;
    w.write_all(&index_count.to_le_bytes())?;
    w.write_all(&[BIN_FORMAT_TINTED, 0, 0, 0])?;
    w.write_all(&pack_vertices(&mesh.vertices))?;
    for i in &mesh.indices {
        w.write_all(&i.to_le_bytes())?;
    }
    Ok(())
}

/// `dir/name.ext` -> `dir/name-suffix.ext`
pub fn suffixed_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}-{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}-{}", stem, suffix),
    };
    path.with_file_name(name)
}
