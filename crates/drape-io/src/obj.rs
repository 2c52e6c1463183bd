//! Wavefront OBJ frame export.
//!
//! Each frame becomes `frame_XXXX.obj` holding `v x y z` lines for every
//! point in index order, then `f a b c` lines with 1-based indices.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use drape_math::Vec3;
use drape_types::DrapeResult;

/// `frame_0007.obj` for frame 7. Wider numbers are not truncated.
pub fn frame_file_name(frame: u32) -> String {
    format!("frame_{frame:04}.obj")
}

/// Write one mesh as OBJ text. A trailing partial triangle is ignored.
pub fn write_obj<W: Write>(out: &mut W, positions: &[Vec3], indices: &[u32]) -> std::io::Result<()> {
    for p in positions {
        writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for tri in indices.chunks_exact(3) {
        writeln!(out, "f {} {} {}", tri[0] + 1, tri[1] + 1, tri[2] + 1)?;
    }
    Ok(())
}

/// Write frame `frame` into `dir`, creating the directory if needed.
/// Returns the path written.
pub fn export_frame(
    dir: &Path,
    frame: u32,
    positions: &[Vec3],
    indices: &[u32],
) -> DrapeResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(frame_file_name(frame));
    let mut out = BufWriter::new(File::create(&path)?);
    write_obj(&mut out, positions, indices)?;
    out.flush()?;
    Ok(path)
}
