//! Formatting step applied to each artifact before it is written.
use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::PostProcessError;

pub trait PostProcessor: Send + Sync {
    fn process(&self, name: &str, content: String) -> Result<String, PostProcessError>;
}

/// Leaves the artifact as emitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl PostProcessor for Passthrough {
    fn process(&self, _name: &str, content: String) -> Result<String, PostProcessError> {
        Ok(content)
    }
}

/// Pipes the artifact through `rustfmt`.
#[derive(Debug, Clone)]
pub struct Rustfmt {
    pub program: String,
    pub edition: String,
}

impl Default for Rustfmt {
    fn default() -> Self {
        Self { program: "rustfmt".to_string(), edition: "2021".to_string() }
    }
}

impl PostProcessor for Rustfmt {
    fn process(&self, name: &str, content: String) -> Result<String, PostProcessError> {
        let spawn_error = |source| PostProcessError::Spawn { program: self.program.clone(), source };
        let mut child = Command::new(&self.program)
            .args(["--edition", &self.edition, "--emit", "stdout"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // Write from a separate thread so a full stdout pipe cannot block us.
        let mut stdin = child.stdin.take().ok_or_else(|| {
            spawn_error(std::io::Error::other("stdin was not captured"))
        })?;
        let writer = std::thread::spawn(move || stdin.write_all(content.as_bytes()));
        let output = child.wait_with_output().map_err(spawn_error)?;
        match writer.join() {
            Ok(result) => result.map_err(spawn_error)?,
            Err(_) => return Err(spawn_error(std::io::Error::other("stdin writer panicked"))),
        }

        if !output.status.success() {
            return Err(PostProcessError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        tracing::debug!(artifact = name, "formatted with {}", self.program);
        String::from_utf8(output.stdout).map_err(|_| PostProcessError::Utf8 { program: self.program.clone() })
    }
}
