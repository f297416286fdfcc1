use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::ConfigError;

/// Entries injected when the loaded configuration does not define them.
pub const DEFAULT_PROMPTS: &[(&str, &str)] = &[("git", "__git_ps1")];

/// Command name to prompt-generator invocation string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PromptMapping {
    entries: HashMap<String, String>,
}

impl PromptMapping {
    /// Loads the mapping from `path`, falling back to an empty mapping when
    /// the file is missing or unusable, then adds the defaults.
    pub fn load(path: &Path) -> Self {
        let mut mapping = match Self::read(path) {
            Ok(mapping) => mapping,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "using empty prompt configuration");
                Self::default()
            }
        };
        mapping.with_defaults();
        mapping
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn with_defaults(&mut self) {
        for (command, invocation) in DEFAULT_PROMPTS {
            self.entries
                .entry((*command).to_string())
                .or_insert_with(|| (*invocation).to_string());
        }
    }

    pub fn get(&self, command: &str) -> Option<&str> {
        self.entries.get(command).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PromptMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        PromptMapping {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
