use std::borrow::Cow;
use std::sync::Arc;

use super::{completions, BashCompletion, CommandFilter, CompletionEngine};
use crate::highlight::SyntaxHighlighter;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

/// Line-editor helper for one wrapped command: completion through a
/// [`CommandFilter`] plus input and prompt colouring.
#[derive(Clone)]
pub struct ShellCompleter {
    command: String,
    engine: Arc<dyn CompletionEngine>,
    highlighter: SyntaxHighlighter,
}

impl ShellCompleter {
    pub fn new(command: impl Into<String>) -> Self {
        Self::with_engine(command, Arc::new(BashCompletion::new()))
    }

    pub fn with_engine(command: impl Into<String>, engine: Arc<dyn CompletionEngine>) -> Self {
        ShellCompleter {
            command: command.into(),
            engine,
            highlighter: SyntaxHighlighter::new(),
        }
    }

    pub fn candidates(&self, partial: &str) -> Vec<Pair> {
        let filter = CommandFilter::for_input(partial, &self.command);
        completions(self.engine.as_ref(), partial, &filter)
            .into_iter()
            .map(|replacement| Pair {
                display: display_word(&replacement).to_string(),
                replacement,
            })
            .collect()
    }
}

fn display_word(candidate: &str) -> &str {
    candidate
        .trim_end()
        .rsplit(char::is_whitespace)
        .next()
        .filter(|word| !word.is_empty())
        .unwrap_or(candidate)
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlighter.highlight_line(line))
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(&'s self, prompt: &'p str, _default: bool) -> Cow<'b, str> {
        Cow::Owned(self.highlighter.highlight_prompt(prompt, &self.command))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    // Candidates are whole-line continuations, so they replace from column 0.
    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let partial = line.get(..pos).unwrap_or(line);
        Ok((0, self.candidates(partial)))
    }
}
