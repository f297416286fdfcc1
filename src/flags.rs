use crate::error::ShellError;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: HashMap<String, Flag>,
    command: Option<String>,
    extra: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: String,
    pub long: String,
    pub description: String,
    pub takes_value: bool,
    pub value: Option<String>,
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = HashMap::new();

        let mut add = |name: &str, short: &str, long: &str, description: &str, takes_value: bool| {
            flags.insert(
                name.to_string(),
                Flag {
                    short: short.to_string(),
                    long: long.to_string(),
                    description: description.to_string(),
                    takes_value,
                    value: None,
                },
            );
        };

        add("help", "-h", "--help", "Print this help message", false);
        add("version", "-v", "--version", "Show version information", false);
        add("config", "-c", "--config", "Read prompt mappings from this JSON file", true);
        add("quiet", "-q", "--quiet", "Suppress startup and history notices", false);
        add("debug", "-d", "--debug", "Write debug output to the session log", false);

        Flags {
            flags,
            command: None,
            extra: Vec::new(),
        }
    }

    /// Parses options and the positional COMMAND. Positionals after the
    /// command are kept aside in [`Flags::extra`] rather than rejected.
    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut i = 0;
        while i < args.len() {
            let arg = &args[i];

            if !arg.starts_with('-') || arg == "-" {
                if self.command.is_some() {
                    self.extra.push(arg.clone());
                } else {
                    self.command = Some(arg.clone());
                }
                i += 1;
                continue;
            }

            let flag = self
                .flags
                .values_mut()
                .find(|flag| arg == &flag.short || arg == &flag.long)
                .ok_or_else(|| ShellError::FlagError(format!("unknown flag {}", arg)))?;

            if flag.takes_value {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| ShellError::FlagError(format!("Flag {} requires a value", arg)))?;
                flag.value = Some(value.clone());
                i += 1;
            } else {
                flag.value = Some("true".to_string());
            }
            i += 1;
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags
            .get(name)
            .and_then(|f| f.value.as_ref())
            .is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&String> {
        self.flags.get(name).and_then(|f| f.value.as_ref())
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn extra(&self) -> &[String] {
        &self.extra
    }

    pub fn print_help(&self) {
        println!("Usage: subsh [OPTIONS] COMMAND");
        println!("\nRepeatedly run COMMAND with the arguments typed at the prompt.");
        println!("Lines starting with ! run as shell commands; exit ends the session.");
        println!("\nOptions:");
        let mut flags: Vec<&Flag> = self.flags.values().collect();
        flags.sort_by(|a, b| a.long.cmp(&b.long));
        for flag in flags {
            let long = if flag.takes_value {
                format!("{} <path>", flag.long)
            } else {
                flag.long.clone()
            };
            println!("  {}, {:<18} {}", flag.short, long, flag.description);
        }
    }
}
