//! Global layout and output configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::Result;

/// Environment variable naming the layout engine binary.
pub const ENGINE_ENV: &str = "GRAPHVIZ_DOT";

/// Image formats the layout engine is asked to produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
	/// Raster image, the default.
	#[default]
	Png,
	/// Lossy raster image.
	Jpg,
	/// Vector image.
	Svg,
	/// Printable document.
	Pdf,
	/// Laid-out DOT, useful when debugging attribute overrides.
	Dot,
}

impl OutputFormat {
	/// Name passed to `-T` and used as file extension.
	pub fn as_str(self) -> &'static str {
		match self {
			OutputFormat::Png => "png",
			OutputFormat::Jpg => "jpg",
			OutputFormat::Svg => "svg",
			OutputFormat::Pdf => "pdf",
			OutputFormat::Dot => "dot",
		}
	}
}

/// Layout attributes, output file, and engine binary for one render.
///
/// Attribute maps are overrides applied after the theme defaults, so any
/// Graphviz attribute can be set here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
	/// Output file stem, without extension.
	pub filename: String,
	/// Image format, also the file extension.
	pub format: OutputFormat,
	/// Graph-level attribute overrides.
	pub graph_attr: BTreeMap<String, String>,
	/// Node default overrides.
	pub node_attr: BTreeMap<String, String>,
	/// Edge default overrides.
	pub edge_attr: BTreeMap<String, String>,
	/// Layout engine binary, looked up on `PATH` when not absolute.
	pub engine: PathBuf,
}

impl Default for DiagramConfig {
	fn default() -> Self {
		Self {
			filename: "diagram".to_string(),
			format: OutputFormat::Png,
			graph_attr: BTreeMap::new(),
			node_attr: BTreeMap::new(),
			edge_attr: BTreeMap::new(),
			engine: PathBuf::from("dot"),
		}
	}
}

fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
	pairs
		.iter()
		.map(|(k, v)| (k.to_string(), v.to_string()))
		.collect()
}

impl DiagramConfig {
	/// Settings for the application metrics diagram.
	pub fn app_metrics() -> Self {
		Self {
			filename: "app_metrics".to_string(),
			format: OutputFormat::Png,
			graph_attr: attrs(&[
				("label", ""),
				("labelloc", "ttc"),
				("nodesep", "0.2"),
				("pad", "0.2"),
				("ranksep", "0.75"),
				("splines", "spline"),
			]),
			node_attr: attrs(&[("fontsize", "12.0")]),
			..Self::default()
		}
	}

	/// Parse a config from JSON. Missing fields take their defaults.
	pub fn from_json(text: &str) -> Result<Self> {
		Ok(serde_json::from_str(text)?)
	}

	/// Apply overrides from the environment.
	pub fn with_env(mut self) -> Self {
		if let Some(engine) = std::env::var_os(ENGINE_ENV).filter(|v| !v.is_empty()) {
			self.engine = PathBuf::from(engine);
		}
		self
	}

	/// Path of the rendered image inside `dir`.
	pub fn output_path(&self, dir: &Path) -> PathBuf {
		dir.join(format!("{}.{}", self.filename, self.format.as_str()))
	}
}
