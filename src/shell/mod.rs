//! The interactive loop: read a line, classify it, run it, repeat.

use std::path::PathBuf;

use tracing::dispatcher::DefaultGuard;
use tracing::{debug, error, info, warn};

mod dispatch;
mod editor;

pub use dispatch::{classify, Dispatch};
pub use editor::{new_editor, LineEditor};

use crate::{
    core::config::{PromptMapping, SessionPaths},
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::{history::LoadOutcome, HistoryStore},
    logging::SessionLog,
    path::find_executable,
    process::{ChildInvocation, CommandExecutor},
    prompt::PromptResolver,
};

/// The command a session wraps, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedCommand {
    pub name: String,
    pub path: PathBuf,
}

impl WrappedCommand {
    pub fn resolve(name: &str) -> Result<Self, ShellError> {
        let path = find_executable(name).ok_or_else(|| ShellError::CommandNotFound(name.to_string()))?;
        Ok(WrappedCommand {
            name: name.to_string(),
            path,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Session<E: LineEditor> {
    command: WrappedCommand,
    editor: E,
    history: HistoryStore,
    prompts: PromptResolver,
    executor: CommandExecutor,
    quiet: bool,
    // Dropped before `log` so the dispatch outlives its scope.
    _log_scope: DefaultGuard,
    log: SessionLog,
}

impl<E: LineEditor> Session<E> {
    /// Opens the session log, loads prompt configuration and history.
    pub fn start(command: WrappedCommand, paths: SessionPaths, flags: &Flags, mut editor: E) -> Self {
        let quiet = flags.is_set("quiet");
        let log = SessionLog::create(&paths.logs_dir, &command.name, flags.is_set("debug"));
        let log_scope = tracing::dispatcher::set_default(log.dispatch());

        let prompts = PromptResolver::new(PromptMapping::load(&paths.prompts_path));

        if !quiet {
            println!("shell for {}", command.path.display());
        }

        let history = HistoryStore::new(paths.history_file(&command.name));
        if let Err(e) = history.ensure_dir() {
            warn!(error = %e, "could not create history directory");
            if !quiet {
                println!("{}", e);
            }
        }
        let outcome = history.load(editor.history_mut());
        if !quiet {
            match outcome {
                LoadOutcome::Loaded => println!("Using history file at: {}", history.path().display()),
                LoadOutcome::New => println!(
                    "No history file found: new history file created at {}",
                    history.path().display()
                ),
            }
        }

        info!(
            command = %command.name,
            path = %command.path.display(),
            history = %history.path().display(),
            "session started"
        );

        Session {
            command,
            editor,
            history,
            prompts,
            executor: CommandExecutor::new(),
            quiet,
            _log_scope: log_scope,
            log,
        }
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            let prompt = self.render_prompt();
            let line = match self.editor.readline(&prompt) {
                Ok(line) => line,
                Err(e) => {
                    error!(error = %e, "stopped reading input");
                    break;
                }
            };

            if self.handle_line(&line) == Flow::Exit {
                break;
            }
        }

        self.save_history();
        info!(command = %self.command.name, "session ended");
        Ok(())
    }

    fn render_prompt(&self) -> String {
        format!(
            "{}>{} ",
            self.prompts.prompt_string(&self.command.name),
            self.command.name
        )
    }

    /// Runs one line read at the prompt.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        match classify(line, &self.command.name, &self.command.path) {
            Dispatch::Exit => return Flow::Exit,
            Dispatch::Empty => {}
            Dispatch::ShellEscape(invocation) => self.execute(&invocation),
            Dispatch::Subcommand(invocation) => {
                if let Err(e) = self.history.append(self.editor.history_mut(), line) {
                    warn!(error = %e, "could not add line to history");
                }
                self.execute(&invocation);
            }
        }
        Flow::Continue
    }

    fn execute(&self, invocation: &ChildInvocation) {
        match self.executor.run(invocation) {
            Ok(()) => debug!(%invocation, "command finished"),
            Err(e) => error!(%invocation, error = %e, "command failed"),
        }
    }

    fn save_history(&mut self) {
        if let Err(e) = self.history.save(self.editor.history_mut()) {
            error!(path = %self.history.path().display(), error = %e, "could not save history");
            if !self.quiet {
                eprintln!("{}", SyntaxHighlighter::new().highlight_error(&e.to_string()));
            }
        }
    }

    pub fn command(&self) -> &WrappedCommand {
        &self.command
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }
}
