use super::ConfigError;
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = ".subsh";
const HISTORY_DIR_NAME: &str = "history";
const LOGS_DIR_NAME: &str = "logs";
const PROMPTS_FILE_NAME: &str = "prompts.json";

/// Per-user locations used by a session.
#[derive(Debug, Clone)]
pub struct SessionPaths {
    pub root: PathBuf,
    pub prompts_path: PathBuf,
    pub history_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl SessionPaths {
    pub fn new() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(Self::rooted(home.join(CONFIG_DIR_NAME)))
    }

    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        SessionPaths {
            prompts_path: root.join(PROMPTS_FILE_NAME),
            history_dir: root.join(HISTORY_DIR_NAME),
            logs_dir: root.join(LOGS_DIR_NAME),
            root,
        }
    }

    pub fn with_prompts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.prompts_path = path.into();
        self
    }

    pub fn history_file(&self, command: &str) -> PathBuf {
        self.history_dir.join(file_key(command))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// File-name form of a command name; `./bin/tool` must not escape its directory.
pub fn file_key(command: &str) -> String {
    command.replace('/', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rooted_layout() {
        let paths = SessionPaths::rooted("/home/testuser/.subsh");

        assert_eq!(paths.prompts_path, PathBuf::from("/home/testuser/.subsh/prompts.json"));
        assert_eq!(paths.history_dir, PathBuf::from("/home/testuser/.subsh/history"));
        assert_eq!(paths.logs_dir, PathBuf::from("/home/testuser/.subsh/logs"));
        assert_eq!(paths.history_file("git"), PathBuf::from("/home/testuser/.subsh/history/git"));
    }

    #[test]
    fn test_prompts_override() {
        let paths = SessionPaths::rooted("/r").with_prompts_path("/etc/subsh.json");
        assert_eq!(paths.prompts_path, PathBuf::from("/etc/subsh.json"));
        assert_eq!(paths.root(), Path::new("/r"));
    }

    #[test]
    fn test_history_file_for_path_command() {
        let paths = SessionPaths::rooted("/r");
        assert_eq!(paths.history_file("./bin/tool"), PathBuf::from("/r/history/._bin_tool"));
    }
}
