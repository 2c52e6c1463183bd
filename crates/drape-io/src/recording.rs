//! Frame recording.
//!
//! A [`FrameRecorder`] writes the cloth to OBJ each time it is asked to,
//! numbering frames from zero, while recording is switched on.

use std::fs;
use std::path::{Path, PathBuf};

use drape_cloth::ClothState;
use drape_types::DrapeResult;
use tracing::{debug, info};

use crate::obj::export_frame;

/// Records cloth frames into a folder.
#[derive(Debug)]
pub struct FrameRecorder {
    dir: PathBuf,
    next_frame: u32,
    enabled: bool,
}

impl FrameRecorder {
    /// A recorder writing into `dir`, initially stopped.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            next_frame: 0,
            enabled: false,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_recording(&self) -> bool {
        self.enabled
    }

    /// Frames written so far.
    pub fn frames_written(&self) -> u32 {
        self.next_frame
    }

    pub fn start(&mut self) {
        self.enabled = true;
        info!(dir = %self.dir.display(), "recording started");
    }

    pub fn stop(&mut self) {
        self.enabled = false;
        info!(frames = self.next_frame, "recording stopped");
    }

    /// Write the cloth's current positions if recording. Returns the file
    /// written, if any.
    pub fn record(&mut self, state: &ClothState) -> DrapeResult<Option<PathBuf>> {
        if !self.enabled {
            return Ok(None);
        }
        let path = export_frame(
            &self.dir,
            self.next_frame,
            state.positions(),
            &state.topology().triangles,
        )?;
        debug!(path = %path.display(), "frame exported");
        self.next_frame += 1;
        Ok(Some(path))
    }

    /// Delete every recorded file and restart numbering at zero.
    pub fn clear(&mut self) -> DrapeResult<usize> {
        self.next_frame = 0;
        clear_directory(&self.dir)
    }
}

/// Remove every file directly inside `dir`. Subdirectories are left alone.
/// A missing directory counts as already empty. Returns how many files were
/// removed.
pub fn clear_directory(dir: &Path) -> DrapeResult<usize> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };
    let mut removed = 0;
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    info!(dir = %dir.display(), removed, "recording folder cleared");
    Ok(removed)
}
