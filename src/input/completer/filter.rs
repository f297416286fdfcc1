use tracing::debug;

use super::CompletionEngine;

pub const ESCAPE_CHARACTER: char = '!';

/// Rewrites partial input into what the completion engine understands, and
/// its candidates back into continuations of that input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandFilter {
    /// Escape-mode input: the marker is dropped before completing and put
    /// back on every candidate.
    Escape,
    /// Arguments to the wrapped command: completed as `"<command> " + input`.
    Wrapped { prefix: String },
}

impl CommandFilter {
    pub fn for_input(input: &str, command: &str) -> Self {
        if input.chars().count() >= 2 && input.starts_with(ESCAPE_CHARACTER) {
            CommandFilter::Escape
        } else {
            CommandFilter::Wrapped {
                prefix: format!("{} ", command),
            }
        }
    }

    pub fn forward(&self, input: &str) -> String {
        match self {
            CommandFilter::Escape => input
                .strip_prefix(ESCAPE_CHARACTER)
                .unwrap_or(input)
                .to_string(),
            CommandFilter::Wrapped { prefix } => format!("{}{}", prefix, input),
        }
    }

    /// `None` when the candidate is not a continuation of forwarded input.
    pub fn inverse(&self, candidate: &str) -> Option<String> {
        match self {
            CommandFilter::Escape => Some(format!("{}{}", ESCAPE_CHARACTER, candidate)),
            CommandFilter::Wrapped { prefix } => candidate.strip_prefix(prefix.as_str()).map(String::from),
        }
    }
}

/// Completes `input` through `engine`; engine failures yield no candidates.
pub fn completions<E>(engine: &E, input: &str, filter: &CommandFilter) -> Vec<String>
where
    E: CompletionEngine + ?Sized,
{
    match engine.complete(&filter.forward(input)) {
        Ok(candidates) => candidates
            .iter()
            .filter_map(|candidate| filter.inverse(candidate))
            .collect(),
        Err(e) => {
            debug!(input, error = %e, "no completions");
            Vec::new()
        }
    }
}
