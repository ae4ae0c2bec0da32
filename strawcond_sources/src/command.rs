use anyhow::Context;
use std::process::Stdio;

pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

/// `ssh <host> "cat <path>"`: stream one remote file to stdout.
#[must_use]
pub fn remote_cat(host: &str, path: &str) -> CommandSpec {
    CommandSpec {
        program: "ssh".to_string(),
        args: vec![host.to_string(), format!("cat {path}")],
    }
}

#[must_use]
pub fn build_command(spec: &CommandSpec) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new(&spec.program);
    cmd.args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

/// Runs the command to completion and returns its stdout; a nonzero exit is
/// an error carrying the exit code and stderr.
pub async fn capture_stdout(spec: &CommandSpec) -> anyhow::Result<Vec<u8>> {
    let output = build_command(spec)
        .output()
        .await
        .with_context(|| format!("Failed to execute {}", spec.program))?;

    if !output.status.success() {
        let exit_code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!(
            "{} exited with code {exit_code}: {}",
            spec.program,
            stderr.trim()
        );
    }
    Ok(output.stdout)
}
