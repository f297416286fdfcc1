use std::fmt;

mod loader;
mod paths;

pub use loader::{PromptMapping, DEFAULT_PROMPTS};
pub use paths::{file_key, SessionPaths};

#[derive(Debug)]
pub enum ConfigError {
    HomeDirNotFound,
    IoError(std::io::Error),
    Malformed(serde_json::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Malformed(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::HomeDirNotFound => write!(f, "Home directory not found"),
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::Malformed(e) => write!(f, "Malformed config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
