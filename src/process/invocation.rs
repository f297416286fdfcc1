use std::fmt;
use std::path::PathBuf;

/// A program plus the arguments it will be started with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildInvocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl ChildInvocation {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Splits `text` on whitespace; the first field is the program.
    /// Returns `None` when there is nothing to run.
    pub fn from_fields(text: &str) -> Option<Self> {
        let mut fields = text.split_whitespace().map(String::from);
        let program = fields.next()?;
        Some(Self::new(program, fields.collect()))
    }
}

impl fmt::Display for ChildInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
