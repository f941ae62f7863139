use thiserror::Error;

/// Per-script process failures.
///
/// These never leave the runner: each one is folded into the script's measurement.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("spawn failed: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("wait failed: {0}")]
    Wait(#[source] std::io::Error),
    #[error("kill failed: {0}")]
    Kill(#[source] std::io::Error),
    #[error("task panicked or was aborted: {0}")]
    Join(String),
}
