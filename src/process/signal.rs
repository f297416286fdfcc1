//! Forwarding of interrupt signals from the session to a running child.
//!
//! A [`Registration`] starts listening before the child exists, so nothing
//! delivered between spawn and wait is lost. Binding it to a child yields a
//! [`SignalForwarder`] that forwards at most one signal and then stops, or
//! stops without forwarding once cancelled.

use std::io;
use std::os::raw::c_int;
use std::process::Child;
use std::thread::{self, JoinHandle};

use signal_hook::consts::SIGINT;
use signal_hook::iterator::{Handle, Signals};
use tracing::{debug, warn};

use super::ProcessError;

pub const INTERRUPT_SIGNALS: &[c_int] = &[SIGINT];

pub trait SignalTarget: Send + 'static {
    fn deliver(&self, signal: c_int) -> io::Result<()>;
}

/// Handle to a live OS process; only ever used to request signal delivery.
#[derive(Debug, Clone, Copy)]
pub struct ProcessHandle {
    pid: libc::pid_t,
}

impl ProcessHandle {
    pub fn of(child: &Child) -> Self {
        Self {
            pid: child.id() as libc::pid_t,
        }
    }

    pub fn pid(&self) -> libc::pid_t {
        self.pid
    }
}

impl SignalTarget for ProcessHandle {
    fn deliver(&self, signal: c_int) -> io::Result<()> {
        // SAFETY: kill has no memory-safety preconditions.
        if unsafe { libc::kill(self.pid, signal) } == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardOutcome {
    Forwarded(c_int),
    Cancelled,
}

pub struct Registration {
    signals: Signals,
}

impl Registration {
    pub fn new(signals: &[c_int]) -> Result<Self, ProcessError> {
        let signals = Signals::new(signals).map_err(|e| ProcessError::SignalError(e.to_string()))?;
        Ok(Self { signals })
    }

    pub fn bind<T: SignalTarget>(self, target: T) -> SignalForwarder {
        let mut signals = self.signals;
        let handle = signals.handle();
        let dispatch = tracing::dispatcher::get_default(|current| current.clone());

        let worker = thread::spawn(move || {
            tracing::dispatcher::with_default(&dispatch, || forward_once(&mut signals, &target))
        });

        SignalForwarder {
            handle,
            worker: Some(worker),
        }
    }
}

fn forward_once<T: SignalTarget>(signals: &mut Signals, target: &T) -> ForwardOutcome {
    match signals.forever().next() {
        Some(signal) => {
            match target.deliver(signal) {
                Ok(()) => debug!(signal, "forwarded signal to child"),
                Err(e) => warn!(signal, error = %e, "could not forward signal to child"),
            }
            ForwardOutcome::Forwarded(signal)
        }
        None => ForwardOutcome::Cancelled,
    }
}

pub struct SignalForwarder {
    handle: Handle,
    worker: Option<JoinHandle<ForwardOutcome>>,
}

impl SignalForwarder {
    pub fn is_active(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.is_finished())
    }

    /// Cancels the forwarder and waits for its thread to finish.
    pub fn stop(mut self) -> ForwardOutcome {
        self.shutdown()
    }

    fn shutdown(&mut self) -> ForwardOutcome {
        self.handle.close();
        match self.worker.take() {
            Some(worker) => worker.join().unwrap_or_else(|_| {
                warn!("signal forwarder thread panicked");
                ForwardOutcome::Cancelled
            }),
            None => ForwardOutcome::Cancelled,
        }
    }
}

impl Drop for SignalForwarder {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.shutdown();
        }
    }
}
