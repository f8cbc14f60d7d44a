//! Declarative architecture diagrams rendered through Graphviz.
//!
//! A [`Diagram`] is built once from nodes, nested clusters and directed edges,
//! turned into DOT by [`to_dot`], and handed to a [`LayoutEngine`] which
//! writes the image file.
//!
//! # Example
//!
//! ```no_run
//! use app_metrics_diagram::diagram::{render_to, Diagram, DiagramConfig, NodeKind};
//!
//! # fn main() -> app_metrics_diagram::diagram::Result<()> {
//! let mut diagram = Diagram::new("Pipeline");
//! let cluster = diagram.cluster("Backend", None)?;
//! let app = diagram.node("App", NodeKind::Python, Some(cluster))?;
//! let queue = diagram.node("Queue", NodeKind::Kafka, Some(cluster))?;
//! diagram.edge(app, queue)?;
//!
//! let path = render_to(&diagram, &DiagramConfig::default(), std::path::Path::new("."))?;
//! println!("wrote {}", path.display());
//! # Ok(())
//! # }
//! ```

mod builder;
mod config;
mod engine;
mod error;
mod render;
pub mod theme;
mod types;

use std::path::{Path, PathBuf};

use log::info;

pub use builder::Diagram;
pub use config::{DiagramConfig, ENGINE_ENV, OutputFormat};
pub use engine::LayoutEngine;
pub use error::{DiagramError, Result};
pub use render::{to_dot, to_dot_with_theme};
pub use theme::Theme;
pub use types::{
	Cluster, ClusterId, Direction, Edge, GraphCluster, GraphData, GraphLink, GraphNode, Node,
	NodeId, NodeKind,
};

/// Render `diagram` into `dir` and return the path of the written image.
pub fn render_to(diagram: &Diagram, config: &DiagramConfig, dir: &Path) -> Result<PathBuf> {
	let output = config.output_path(dir);
	let dot = to_dot(diagram, config);
	info!(
		"diagram: rendering {:?} ({} nodes, {} edges)",
		diagram.name(),
		diagram.nodes().len(),
		diagram.edges().len()
	);
	LayoutEngine::from_config(config).render(&dot, &output)?;
	Ok(output)
}
