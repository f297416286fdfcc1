use rustyline::history::{FileHistory, History};
use rustyline::{CompletionType, Config, Editor, Helper};

use crate::error::ShellError;
use crate::input::ShellCompleter;

/// The parts of a line editor the session loop relies on.
pub trait LineEditor {
    type History: History;

    fn readline(&mut self, prompt: &str) -> rustyline::Result<String>;

    fn history_mut(&mut self) -> &mut Self::History;
}

impl<H: Helper, I: History> LineEditor for Editor<H, I> {
    type History = I;

    fn readline(&mut self, prompt: &str) -> rustyline::Result<String> {
        Editor::readline(self, prompt)
    }

    fn history_mut(&mut self) -> &mut I {
        Editor::history_mut(self)
    }
}

pub fn new_editor(command: &str) -> Result<Editor<ShellCompleter, FileHistory>, ShellError> {
    let config = Config::builder()
        .completion_type(CompletionType::List)
        .auto_add_history(false)
        .build();

    let mut editor = Editor::<ShellCompleter, FileHistory>::with_config(config)?;
    editor.set_helper(Some(ShellCompleter::new(command)));
    Ok(editor)
}
