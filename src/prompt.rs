use std::env;
use std::process::Command;
use std::time::Duration;

use tracing::{debug, warn};

use crate::core::config::PromptMapping;
use crate::process::capture::run_captured;

const DEFAULT_SHELL: &str = "bash";
const SHELL_OVERRIDE_VAR: &str = "SUBSH_PROMPT_SHELL";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Produces the dynamic part of the prompt for a wrapped command by running
/// its configured generator in a login shell.
#[derive(Debug, Clone)]
pub struct PromptResolver {
    mapping: PromptMapping,
    shell: String,
    login: bool,
    timeout: Duration,
}

impl PromptResolver {
    pub fn new(mapping: PromptMapping) -> Self {
        PromptResolver {
            mapping,
            shell: env::var(SHELL_OVERRIDE_VAR).unwrap_or_else(|_| DEFAULT_SHELL.to_string()),
            login: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_shell(mut self, shell: impl Into<String>, login: bool) -> Self {
        self.shell = shell.into();
        self.login = login;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the generator's trimmed output, or an empty string when no
    /// generator is configured or it fails.
    pub fn prompt_string(&self, command: &str) -> String {
        let Some(invocation) = self.mapping.get(command) else {
            return String::new();
        };

        let mut generator = Command::new(&self.shell);
        if self.login {
            generator.arg("-l");
        }
        generator.arg("-c").arg(invocation);

        match run_captured(&mut generator, self.timeout) {
            Ok(captured) => {
                if !captured.status.success() {
                    debug!(command, invocation, status = %captured.status, "prompt generator exited unsuccessfully");
                }
                captured.stdout.trim().to_string()
            }
            Err(e) => {
                warn!(command, invocation, error = %e, "prompt generator failed");
                String::new()
            }
        }
    }
}
