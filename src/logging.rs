//! Per-session log sink.
//!
//! Each session writes to its own file under the logs directory. The
//! subscriber is held as a [`Dispatch`] owned by the session rather than
//! installed process-wide.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{Local, SecondsFormat};
use tracing::Dispatch;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::core::config::file_key;

pub struct SessionLog {
    dispatch: Dispatch,
    path: Option<PathBuf>,
}

impl SessionLog {
    /// Opens `<logs_dir>/<command>-<start time>.log`, or logs to stderr when
    /// the directory or file cannot be created.
    pub fn create(logs_dir: &Path, command: &str, debug: bool) -> Self {
        if let Err(e) = fs::create_dir_all(logs_dir) {
            eprintln!("Unable to create logs directory {}: {}", logs_dir.display(), e);
        }

        let started = Local::now().to_rfc3339_opts(SecondsFormat::Secs, false);
        let path = logs_dir.join(format!("{}-{}.log", file_key(command), started));

        match File::create(&path) {
            Ok(file) => SessionLog {
                dispatch: build_dispatch(BoxMakeWriter::new(Mutex::new(file)), debug),
                path: Some(path),
            },
            Err(e) => {
                eprintln!("Unable to create log file: {}", e);
                Self::stderr(debug)
            }
        }
    }

    pub fn stderr(debug: bool) -> Self {
        SessionLog {
            dispatch: build_dispatch(BoxMakeWriter::new(std::io::stderr), debug),
            path: None,
        }
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn build_dispatch(writer: BoxMakeWriter, debug: bool) -> Dispatch {
    let level = if debug { "debug" } else { "info" };
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from(env_filter))
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .finish();

    Dispatch::new(subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_named_by_command() {
        let dir = tempfile::tempdir().unwrap();
        let logs_dir = dir.path().join("logs");
        let log = SessionLog::create(&logs_dir, "git", false);

        let path = log.path().unwrap();
        assert!(path.exists());
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("git-"));
        assert!(name.ends_with(".log"));
    }

    #[test]
    fn test_events_reach_the_session_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = SessionLog::create(dir.path(), "hg", false);

        tracing::dispatcher::with_default(log.dispatch(), || {
            tracing::error!("exit status 1 hg bogus");
        });

        let written = fs::read_to_string(log.path().unwrap()).unwrap();
        assert!(written.contains("exit status 1 hg bogus"));
    }

    #[test]
    fn test_unwritable_dir_falls_back_to_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let log = SessionLog::create(&blocker.join("logs"), "git", false);
        assert!(log.path().is_none());
    }
}
