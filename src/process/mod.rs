use std::fmt;
use std::process::ExitStatus;
use std::time::Duration;

pub mod capture;
pub mod executor;
pub mod invocation;
pub mod signal;

pub use executor::CommandExecutor;
pub use invocation::ChildInvocation;
pub use signal::{ForwardOutcome, Registration, SignalForwarder, SignalTarget};

#[derive(Debug)]
pub enum ProcessError {
    Spawn {
        invocation: String,
        source: std::io::Error,
    },
    Wait(std::io::Error),
    Exited {
        invocation: String,
        status: ExitStatus,
    },
    TimedOut {
        invocation: String,
        after: Duration,
    },
    SignalError(String),
    Other(String),
}

impl From<std::io::Error> for ProcessError {
    fn from(e: std::io::Error) -> Self {
        ProcessError::Other(e.to_string())
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Spawn { invocation, source } => {
                write!(f, "failed to start {}: {}", invocation, source)
            }
            ProcessError::Wait(e) => write!(f, "failed to wait for child: {}", e),
            ProcessError::Exited { invocation, status } => write!(f, "{} {}", status, invocation),
            ProcessError::TimedOut { invocation, after } => {
                write!(f, "{} did not finish within {:?}", invocation, after)
            }
            ProcessError::SignalError(msg) => write!(f, "Signal error: {}", msg),
            ProcessError::Other(msg) => write!(f, "Other error: {}", msg),
        }
    }
}

impl std::error::Error for ProcessError {}
