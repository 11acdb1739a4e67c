//! File-backed state listener.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tictactoe_core::{StateListener, SyncError, SyncSnapshot};
use tracing::{debug, instrument};

/// Appends each accepted state to a file as one JSON line.
#[derive(Debug)]
pub struct JsonLinesListener {
    path: PathBuf,
    file: File,
}

impl JsonLinesListener {
    /// Opens `path` for appending, creating it if needed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SyncError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        debug!("Sync file opened");
        Ok(Self { path, file })
    }

    /// Path being written.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateListener for JsonLinesListener {
    fn on_state(&mut self, snapshot: &SyncSnapshot) -> Result<(), SyncError> {
        let line = snapshot.to_json()?;
        writeln!(self.file, "{}", line)?;
        self.file.flush()?;
        debug!(step = snapshot.step_number, path = %self.path.display(), "State synced");
        Ok(())
    }
}
