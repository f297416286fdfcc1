use std::io;
use std::os::raw::c_int;
use std::process::{Command, Stdio};

use tracing::debug;

use super::signal::{ProcessHandle, Registration, INTERRUPT_SIGNALS};
use super::{ChildInvocation, ProcessError};

/// Runs invocations attached to the controlling terminal, forwarding
/// interrupts to the child for as long as it runs.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    forwarded: Vec<c_int>,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    pub fn new() -> Self {
        CommandExecutor {
            forwarded: INTERRUPT_SIGNALS.to_vec(),
        }
    }

    pub fn run(&self, invocation: &ChildInvocation) -> Result<(), ProcessError> {
        debug!(%invocation, "starting child");

        // Listen before the child exists so an early interrupt is not lost.
        let registration = Registration::new(&self.forwarded)?;

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                invocation: invocation.to_string(),
                source,
            })?;

        let handle = ProcessHandle::of(&child);
        let forwarder = registration.bind(handle);

        // The child stays a zombie until reaped below, so its pid cannot be
        // recycled while the forwarder might still signal it.
        let exited = wait_without_reaping(handle.pid());
        let outcome = forwarder.stop();
        debug!(%invocation, ?outcome, "signal forwarding stopped");

        exited.map_err(ProcessError::Wait)?;
        let status = child.wait().map_err(ProcessError::Wait)?;

        if status.success() {
            Ok(())
        } else {
            Err(ProcessError::Exited {
                invocation: invocation.to_string(),
                status,
            })
        }
    }
}

fn wait_without_reaping(pid: libc::pid_t) -> io::Result<()> {
    loop {
        // SAFETY: siginfo_t is plain data and is only written by waitid.
        let mut info: libc::siginfo_t = unsafe { std::mem::zeroed() };
        let rc = unsafe {
            libc::waitid(
                libc::P_PID,
                pid as libc::id_t,
                &mut info,
                libc::WEXITED | libc::WNOWAIT,
            )
        };
        if rc == 0 {
            return Ok(());
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}
