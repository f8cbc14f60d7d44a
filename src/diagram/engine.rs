//! Graphviz subprocess invocation.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use log::{debug, info};

use super::config::{DiagramConfig, OutputFormat};
use super::error::{DiagramError, Result};

/// An external layout engine that rasterizes DOT source into an image file.
#[derive(Clone, Debug)]
pub struct LayoutEngine {
	binary: PathBuf,
	format: OutputFormat,
}

impl LayoutEngine {
	/// Engine running `binary` to produce `format`.
	pub fn new(binary: impl Into<PathBuf>, format: OutputFormat) -> Self {
		Self {
			binary: binary.into(),
			format,
		}
	}

	/// Engine binary and format taken from `config`.
	pub fn from_config(config: &DiagramConfig) -> Self {
		Self::new(config.engine.clone(), config.format)
	}

	/// Lay out `dot` and write the image to `output`, replacing any existing file.
	pub fn render(&self, dot: &str, output: &Path) -> Result<()> {
		debug!(
			"engine: {} -T{} -o {}",
			self.binary.display(),
			self.format.as_str(),
			output.display()
		);

		let mut child = Command::new(&self.binary)
			.arg(format!("-T{}", self.format.as_str()))
			.arg("-o")
			.arg(output)
			.stdin(Stdio::piped())
			.stdout(Stdio::null())
			.stderr(Stdio::piped())
			.spawn()
			.map_err(|e| match e.kind() {
				io::ErrorKind::NotFound => DiagramError::EngineNotFound(self.binary.clone()),
				_ => DiagramError::Io(e),
			})?;

		// stdin is fed from its own thread while stderr drains here, so a
		// chatty engine cannot fill one pipe while we block on the other.
		let stdin = child.stdin.take();
		let (written, result) = thread::scope(|s| {
			let writer = s.spawn(move || match stdin {
				Some(mut stdin) => stdin.write_all(dot.as_bytes()),
				None => Ok(()),
			});
			let result = child.wait_with_output();
			let written = writer
				.join()
				.unwrap_or_else(|_| Err(io::Error::other("engine stdin writer panicked")));
			(written, result)
		});

		// A failing engine may close stdin early; its exit status explains why.
		let result = result?;
		if !result.status.success() {
			return Err(DiagramError::EngineFailed {
				status: result.status,
				stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
			});
		}
		written?;

		info!("engine: wrote {}", output.display());
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_binary_is_engine_not_found() {
		let dir = tempfile::tempdir().unwrap();
		let engine = LayoutEngine::new(dir.path().join("no-such-dot"), OutputFormat::Png);
		let err = engine
			.render("digraph {}", &dir.path().join("out.png"))
			.unwrap_err();
		assert!(matches!(err, DiagramError::EngineNotFound(_)));
		assert!(!dir.path().join("out.png").exists());
	}

	#[cfg(unix)]
	#[test]
	fn nonzero_exit_is_engine_failed() {
		let dir = tempfile::tempdir().unwrap();
		let engine = LayoutEngine::new("false", OutputFormat::Png);
		let err = engine
			.render("digraph {}", &dir.path().join("out.png"))
			.unwrap_err();
		assert!(matches!(err, DiagramError::EngineFailed { .. }));
	}

	#[cfg(unix)]
	#[test]
	fn engine_flooding_stderr_before_reading_stdin_completes() {
		use std::os::unix::fs::PermissionsExt;

		let dir = tempfile::tempdir().unwrap();
		let script = dir.path().join("noisy-dot");
		// Far more than a pipe buffer on both stderr and stdin
		std::fs::write(
			&script,
			"#!/bin/sh\nyes 'warning: layout' | head -c 262144 >&2\ncat > /dev/null\nexit 3\n",
		)
		.unwrap();
		std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

		let dot = format!("digraph {{\n{}}}\n", "\ta -> b;\n".repeat(65536));
		let err = LayoutEngine::new(&script, OutputFormat::Png)
			.render(&dot, &dir.path().join("out.png"))
			.unwrap_err();
		match err {
			DiagramError::EngineFailed { status, stderr } => {
				assert_eq!(status.code(), Some(3));
				assert!(stderr.len() > 200_000);
				assert!(stderr.starts_with("warning: layout"));
			}
			other => panic!("unexpected error: {other}"),
		}
	}
}
