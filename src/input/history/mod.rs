use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rustyline::history::History;
use tracing::{debug, info};

/// Whether a previous session's history was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    New,
}

/// Per-command history file backing the line editor's in-memory history.
///
/// The file is read once at session start and written once at the end.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HistoryStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ensure_dir(&self) -> io::Result<()> {
        match self.path.parent() {
            Some(dir) => fs::create_dir_all(dir),
            None => Ok(()),
        }
    }

    pub fn load<H: History>(&self, history: &mut H) -> LoadOutcome {
        match history.load(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), entries = history.len(), "loaded history");
                LoadOutcome::Loaded
            }
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "starting new history");
                LoadOutcome::New
            }
        }
    }

    /// Returns `false` when the editor drops the line, which it does for a
    /// repeat of the previous entry.
    pub fn append<H: History>(&self, history: &mut H, line: &str) -> rustyline::Result<bool> {
        history.add(line)
    }

    pub fn save<H: History>(&self, history: &mut H) -> rustyline::Result<()> {
        history.save(&self.path)
    }
}
