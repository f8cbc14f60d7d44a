//! app-metrics-diagram: architecture diagram of the application metrics pipeline.
//!
//! This crate declares the diagram as a graph of typed nodes in nested
//! clusters, emits it as Graphviz DOT, and runs `dot` to write a PNG.

use std::path::{Path, PathBuf};

use log::{debug, info};

pub mod app_metrics;
pub mod diagram;

pub use app_metrics::app_metrics_diagram;
pub use diagram::{Diagram, DiagramConfig, DiagramError, GraphData, NodeKind};

/// Initialize logging for the binary. `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
	let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
		.try_init();
	debug!("app-metrics-diagram: logging initialized");
}

/// Build the app metrics diagram and render it into `dir`.
pub fn generate(dir: &Path) -> diagram::Result<PathBuf> {
	let diagram = app_metrics_diagram()?;
	let config = DiagramConfig::app_metrics().with_env();

	let description = diagram.description();
	info!(
		"app-metrics-diagram: {} nodes, {} links",
		description.nodes.len(),
		description.links.len()
	);
	debug!("app-metrics-diagram: description {}", description.to_json()?);

	diagram::render_to(&diagram, &config, dir)
}
