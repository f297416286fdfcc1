use std::env;
use std::ffi::OsStr;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Resolves `name` the way a shell would before exec.
///
/// Names containing a `/` are checked as given; anything else is searched
/// for in each `PATH` entry in order.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    if name.contains('/') {
        let path = PathBuf::from(name);
        return is_executable(&path).then_some(path);
    }
    find_in(name, env::var_os("PATH")?.as_os_str())
}

fn find_in(name: &str, search_path: &OsStr) -> Option<PathBuf> {
    env::split_paths(search_path)
        .map(|dir| {
            if dir.as_os_str().is_empty() {
                PathBuf::from(".").join(name)
            } else {
                dir.join(name)
            }
        })
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_file(dir: &Path, name: &str, mode: u32) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[test]
    fn test_search_order_and_permissions() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        write_file(first.path(), "tool", 0o644);
        let expected = write_file(second.path(), "tool", 0o755);

        let search = env::join_paths([first.path(), second.path()]).unwrap();
        assert_eq!(find_in("tool", &search), Some(expected));
        assert_eq!(find_in("missing", &search), None);
    }

    #[test]
    fn test_directories_are_not_executables() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("tool")).unwrap();
        let search = env::join_paths([dir.path()]).unwrap();
        assert_eq!(find_in("tool", &search), None);
    }

    #[test]
    fn test_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let tool = write_file(dir.path(), "tool", 0o755);
        assert_eq!(find_executable(tool.to_str().unwrap()), Some(tool));
        assert_eq!(find_executable(""), None);
    }
}
