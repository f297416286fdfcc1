use std::fmt;

mod engine;
mod filter;
mod shell;

pub use engine::{BashCompletion, CompletionEngine};
pub use filter::{completions, CommandFilter, ESCAPE_CHARACTER};
pub use shell::ShellCompleter;

use crate::process::ProcessError;

#[derive(Debug)]
pub enum CompletionError {
    Process(ProcessError),
}

impl From<ProcessError> for CompletionError {
    fn from(e: ProcessError) -> Self {
        CompletionError::Process(e)
    }
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::Process(e) => write!(f, "completion engine failed: {}", e),
        }
    }
}

impl std::error::Error for CompletionError {}
