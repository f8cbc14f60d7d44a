//! Errors raised while building or rendering a diagram.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Everything that can go wrong between declaring a node and writing the image.
#[derive(Debug, Error)]
pub enum DiagramError {
	/// A node with this label was already declared.
	#[error("duplicate node label {0:?}")]
	DuplicateNode(String),

	/// The node id was issued by another diagram or is out of range.
	#[error("node id {0} does not belong to this diagram")]
	UnknownNode(usize),

	/// The cluster id was issued by another diagram or is out of range.
	#[error("cluster id {0} does not belong to this diagram")]
	UnknownCluster(usize),

	/// The layout engine binary could not be spawned.
	#[error("layout engine {0:?} not found, is Graphviz installed?")]
	EngineNotFound(PathBuf),

	/// The layout engine ran but exited unsuccessfully.
	#[error("layout engine exited with {status}: {stderr}")]
	EngineFailed {
		/// Exit status reported by the engine.
		status: ExitStatus,
		/// Trimmed stderr output.
		stderr: String,
	},

	/// Config or description JSON could not be (de)serialized.
	#[error("diagram JSON: {0}")]
	Json(#[from] serde_json::Error),

	/// Any other I/O failure around the engine process.
	#[error(transparent)]
	Io(#[from] io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DiagramError>;
