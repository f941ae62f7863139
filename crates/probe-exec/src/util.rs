use std::process::Stdio;

use tokio::process::{Child, Command};

use crate::config::Shell;

/// Build the interpreter invocation for a script command line.
///
/// The child gets no stdio and, on Unix, its own process group so a timeout can take
/// down everything the script forked.
pub(crate) fn shell_command(shell: &Shell, script: &str) -> Command {
    let mut cmd = Command::new(&shell.program);
    cmd.arg(&shell.flag).arg(script);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    #[cfg(target_family = "unix")]
    cmd.process_group(0);

    cmd
}

/// Forcibly terminate the child and its process group, then reap it.
#[cfg(target_family = "unix")]
pub(crate) async fn kill_tree(child: &mut Child) -> std::io::Result<()> {
    if let Some(id) = child.id() {
        // Negative pid targets the group created in `shell_command`.
        // SAFETY: kill(2) takes plain integers; no pointers are passed or dereferenced.
        let rc = unsafe { libc::kill(-(id as libc::pid_t), libc::SIGKILL) };
        if rc != 0 {
            let err = std::io::Error::last_os_error();
            if err.raw_os_error() != Some(libc::ESRCH) {
                tracing::trace!(target: "probe.exec", pid = id, error = %err, "group kill failed");
            }
        }
    }
    child.kill().await
}

#[cfg(target_family = "windows")]
pub(crate) async fn kill_tree(child: &mut Child) -> std::io::Result<()> {
    child.kill().await
}
