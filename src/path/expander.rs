use crate::error::ShellError;
use std::path::{Path, PathBuf};

/// Expands a leading `~` or `~/` to the user's home directory.
#[derive(Clone, Default)]
pub struct PathExpander;

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    pub fn expand(&self, path: &str) -> Result<PathBuf, ShellError> {
        match path.strip_prefix('~') {
            Some("") => dirs::home_dir().ok_or(ShellError::HomeDirNotFound),
            Some(rest) if rest.starts_with('/') => {
                let home = dirs::home_dir().ok_or(ShellError::HomeDirNotFound)?;
                Ok(home.join(rest.trim_start_matches('/')))
            }
            // "~user/..." is left alone
            _ => Ok(Path::new(path).to_path_buf()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path_unchanged() {
        let expander = PathExpander::new();
        assert_eq!(
            expander.expand("/etc/prompts.json").unwrap(),
            PathBuf::from("/etc/prompts.json")
        );
        assert_eq!(expander.expand("~bob/x").unwrap(), PathBuf::from("~bob/x"));
    }

    #[test]
    fn test_tilde_expansion() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let expander = PathExpander::new();
        assert_eq!(expander.expand("~").unwrap(), home);
        assert_eq!(
            expander.expand("~/.subsh/prompts.json").unwrap(),
            home.join(".subsh/prompts.json")
        );
    }
}
