use inksac::prelude::*;

use crate::input::completer::ESCAPE_CHARACTER;

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Colours the line being edited without changing its spacing.
    ///
    /// In escape mode the marker and the program are coloured, otherwise the
    /// subcommand. Flags are coloured in both modes.
    pub fn highlight_line(&self, line: &str) -> String {
        if !self.enabled() {
            return line.to_string();
        }

        let (marker, body) = match line.strip_prefix(ESCAPE_CHARACTER) {
            Some(rest) => (Some(ESCAPE_CHARACTER), rest),
            None => (None, line),
        };

        let mut out = String::with_capacity(line.len() * 2);
        if let Some(marker) = marker {
            let escape_style = Style::builder().foreground(Color::Green).bold().build();
            out.push_str(&marker.to_string().style(escape_style).to_string());
        }

        let mut first = true;
        let mut rest = body;
        while !rest.is_empty() {
            let word_start = rest.find(|c: char| !c.is_whitespace()).unwrap_or(rest.len());
            out.push_str(&rest[..word_start]);
            rest = &rest[word_start..];
            if rest.is_empty() {
                break;
            }

            let word_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let word = &rest[..word_end];
            if first {
                let command_style = Style::builder().foreground(Color::Cyan).bold().build();
                out.push_str(&word.style(command_style).to_string());
            } else if word.starts_with('-') {
                let flag_style = Style::builder().foreground(Color::Yellow).build();
                out.push_str(&word.style(flag_style).to_string());
            } else {
                out.push_str(word);
            }
            first = false;
            rest = &rest[word_end..];
        }

        out
    }

    /// Colours the `><command> ` tail of a rendered prompt.
    pub fn highlight_prompt(&self, prompt: &str, command: &str) -> String {
        if !self.enabled() {
            return prompt.to_string();
        }

        let tail = format!(">{}", command);
        match prompt.trim_end().strip_suffix(tail.as_str()) {
            Some(generated) => {
                let command_style = Style::builder().foreground(Color::Cyan).bold().build();
                let trailing = &prompt[prompt.trim_end().len()..];
                format!("{}{}{}", generated, tail.style(command_style), trailing)
            }
            None => prompt.to_string(),
        }
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();

        error.style(error_style).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_highlighter_is_identity() {
        let highlighter = SyntaxHighlighter::plain();
        assert_eq!(highlighter.highlight_line("!ls  -la /tmp"), "!ls  -la /tmp");
        assert_eq!(highlighter.highlight_prompt("(main)>git ", "git"), "(main)>git ");
        assert_eq!(highlighter.highlight_error("boom"), "boom");
    }

    #[test]
    fn test_coloured_line_keeps_text() {
        let highlighter = SyntaxHighlighter::new();
        for line in ["  log  --oneline   -n 3 ", "!grep -r  todo .", "!", ""] {
            assert_eq!(strip_ansi(&highlighter.highlight_line(line)), line);
        }
        let prompt = "(main)>git ";
        assert_eq!(strip_ansi(&highlighter.highlight_prompt(prompt, "git")), prompt);
    }

    fn strip_ansi(text: &str) -> String {
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }
}
