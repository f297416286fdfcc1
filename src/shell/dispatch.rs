use std::path::Path;

use crate::input::completer::ESCAPE_CHARACTER;
use crate::process::ChildInvocation;

const EXIT_COMMAND: &str = "exit";

/// What a line read at the prompt asks the session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// `!program args...`, run as-is and kept out of history.
    ShellEscape(ChildInvocation),
    Exit,
    Empty,
    /// Arguments for the wrapped command.
    Subcommand(ChildInvocation),
}

/// Classifies `line` for the wrapped command `command`, found at `program`.
pub fn classify(line: &str, command: &str, program: &Path) -> Dispatch {
    if let Some(escaped) = line.strip_prefix(ESCAPE_CHARACTER) {
        return match ChildInvocation::from_fields(escaped) {
            Some(invocation) => Dispatch::ShellEscape(invocation),
            None => Dispatch::Empty,
        };
    }

    let trimmed = line.trim();
    if trimmed == EXIT_COMMAND {
        return Dispatch::Exit;
    }
    if trimmed.is_empty() {
        return Dispatch::Empty;
    }

    let mut args: Vec<String> = trimmed.split_whitespace().map(String::from).collect();
    // Typing the wrapped command's own name first is a common slip.
    if args.first().is_some_and(|first| first == command) {
        args.remove(0);
    }
    Dispatch::Subcommand(ChildInvocation::new(program, args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn classify_git(line: &str) -> Dispatch {
        classify(line, "git", Path::new("/usr/bin/git"))
    }

    fn git(args: &[&str]) -> Dispatch {
        Dispatch::Subcommand(ChildInvocation::new(
            "/usr/bin/git",
            args.iter().map(|a| a.to_string()).collect(),
        ))
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            classify_git("!echo hi"),
            Dispatch::ShellEscape(ChildInvocation::new("echo", vec!["hi".to_string()]))
        );
        assert_eq!(
            classify_git("!  ls   -la "),
            Dispatch::ShellEscape(ChildInvocation::new("ls", vec!["-la".to_string()]))
        );
    }

    #[test]
    fn test_escape_without_program_is_empty() {
        assert_eq!(classify_git("!"), Dispatch::Empty);
        assert_eq!(classify_git("!   "), Dispatch::Empty);
    }

    #[test]
    fn test_escape_takes_priority_over_exit() {
        assert_eq!(
            classify_git("!exit"),
            Dispatch::ShellEscape(ChildInvocation::new("exit", Vec::new()))
        );
    }

    #[test]
    fn test_exit() {
        assert_eq!(classify_git("exit"), Dispatch::Exit);
        assert_eq!(classify_git("  exit \t"), Dispatch::Exit);
        assert_eq!(classify_git("exit now"), git(&["exit", "now"]));
    }

    #[test]
    fn test_empty() {
        assert_eq!(classify_git(""), Dispatch::Empty);
        assert_eq!(classify_git(" \t "), Dispatch::Empty);
    }

    #[test]
    fn test_subcommand() {
        assert_eq!(classify_git("log --oneline -3"), git(&["log", "--oneline", "-3"]));
        assert_eq!(classify_git(" status "), git(&["status"]));
    }

    #[test]
    fn test_redundant_command_name_dropped() {
        let dispatch = classify("mytool status", "mytool", Path::new("/opt/bin/mytool"));
        assert_eq!(
            dispatch,
            Dispatch::Subcommand(ChildInvocation {
                program: PathBuf::from("/opt/bin/mytool"),
                args: vec!["status".to_string()],
            })
        );
        assert_eq!(classify_git("git"), git(&[]));
        // Only the first token is considered.
        assert_eq!(classify_git("log git"), git(&["log", "git"]));
    }
}
