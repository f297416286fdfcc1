//! Interrupt forwarding through a real child.
//!
//! Kept in its own test binary: it sends SIGINT to the whole test process.

use std::fs;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use subsh::process::{ChildInvocation, CommandExecutor};

fn wait_for(path: &Path, limit: Duration) -> bool {
    let deadline = Instant::now() + limit;
    while Instant::now() < deadline {
        if path.exists() {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    false
}

fn trapping_child(ready: &Path, marker: &Path) -> ChildInvocation {
    // `sleep & wait` so the trap runs as soon as the signal lands.
    let script = format!(
        "trap 'echo int >> \"{marker}\"; exit 0' INT; touch \"{ready}\"; sleep 10 & wait",
        marker = marker.display(),
        ready = ready.display(),
    );
    ChildInvocation::new("sh", vec!["-c".to_string(), script])
}

#[test]
fn one_interrupt_reaches_the_child_once() {
    let dir = tempfile::tempdir().unwrap();
    let ready = dir.path().join("ready");
    let marker = dir.path().join("interrupted");
    let executor = CommandExecutor::new();

    let sender = {
        let ready = ready.clone();
        thread::spawn(move || {
            assert!(wait_for(&ready, Duration::from_secs(10)));
            // SAFETY: kill has no memory-safety preconditions.
            unsafe { libc::kill(libc::getpid(), libc::SIGINT) };
        })
    };

    let started = Instant::now();
    let result = executor.run(&trapping_child(&ready, &marker));
    sender.join().unwrap();

    assert!(result.is_ok(), "child should exit 0 from its trap: {:?}", result);
    assert!(started.elapsed() < Duration::from_secs(8));
    assert_eq!(fs::read_to_string(&marker).unwrap(), "int\n");

    // The next child runs to completion with nothing forwarded to it.
    let second_ready = dir.path().join("second-ready");
    let second_marker = dir.path().join("second-interrupted");
    let script = format!(
        "trap 'echo int >> \"{marker}\"' INT; touch \"{ready}\"; sleep 0.2",
        marker = second_marker.display(),
        ready = second_ready.display(),
    );
    let second = ChildInvocation::new("sh", vec!["-c".to_string(), script]);

    assert!(executor.run(&second).is_ok());
    assert!(second_ready.exists());
    assert!(!second_marker.exists());
    assert_eq!(fs::read_to_string(&marker).unwrap(), "int\n");
}
