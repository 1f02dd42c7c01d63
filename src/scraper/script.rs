//! External script execution for definition-file scrapers.
//!
//! A script receives its input as a JSON document on stdin and must print a
//! JSON document on stdout. Empty output is read as `null`.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// A command line run once per scrape.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptAction {
    command: Vec<String>,
    working_dir: Option<PathBuf>,
    timeout: Duration,
}

impl ScriptAction {
    /// Create an action from an argv-style command. The caller guarantees
    /// `command` is non-empty.
    pub fn new(command: Vec<String>, working_dir: Option<PathBuf>, timeout: Duration) -> Self {
        Self {
            command,
            working_dir,
            timeout,
        }
    }

    pub fn command(&self) -> &[String] {
        &self.command
    }

    /// Run the script with `input` on stdin and decode its stdout.
    pub async fn run<I, O>(&self, input: &I) -> Result<O>
    where
        I: Serialize + ?Sized + Sync,
        O: DeserializeOwned,
    {
        let (program, args) = self
            .command
            .split_first()
            .context("Script command is empty")?;

        let payload = serde_json::to_vec(input).context("Failed to encode script input")?;

        tracing::debug!("Executing scraper script: {} {:?}", program, args);

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd
            .spawn()
            .with_context(|| format!("Failed to execute: {}", program))?;

        let stdin = child.stdin.take();
        let write_input = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            // Scripts that ignore their input may exit before reading it.
            match stdin.write_all(&payload).await {
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    tracing::debug!("{} closed stdin before reading input", program);
                    Ok(())
                }
                result => result,
            }
            // Dropping stdin closes the pipe so the script sees EOF.
        };

        // Input is written while output is drained, all under one deadline.
        // On timeout the child is dropped and killed.
        let (written, output) = tokio::time::timeout(self.timeout, async {
            tokio::join!(write_input, child.wait_with_output())
        })
        .await
        .map_err(|_| anyhow::anyhow!("{} timed out after {:?}", program, self.timeout))?;

        written.with_context(|| format!("Failed to write input to {}", program))?;
        let output = output.with_context(|| format!("Failed to wait for {}", program))?;

        if !output.status.success() {
            anyhow::bail!(
                "{} failed with exit code {:?}\nStderr: {}",
                program,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stdout = stdout.trim();
        tracing::trace!("Script output: {}", stdout);

        let document = if stdout.is_empty() { "null" } else { stdout };
        serde_json::from_str(document)
            .with_context(|| format!("{} produced invalid JSON output", program))
    }
}
