use crate::shell::ShellProfile;
use crate::{Error, Result};
use std::process::Stdio;
use tokio::process::{Child, Command};
use tracing::info;

/// Start the traced shell.
///
/// The inherited PATH is replaced by `baseline` and PS4 is set for the
/// shell family; every other variable is passed through. The trace arrives
/// on the child's piped stderr. Dropping the child kills it.
pub fn spawn_traced_shell(profile: &ShellProfile, baseline: &str) -> Result<Child> {
    info!(
        program = %profile.program,
        shell = %profile.family,
        baseline,
        "starting traced shell"
    );

    Command::new(&profile.program)
        .args(&profile.args)
        .env_remove("PATH")
        .env("PATH", baseline)
        .env("PS4", profile.ps4())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| Error::Launch {
            program: profile.program.clone(),
            source,
        })
}
