//! Graph data structures for the diagram description.

use serde::{Deserialize, Serialize};

/// Handle to a node, valid only for the [`Diagram`](super::Diagram) that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
	pub(crate) diagram: u64,
	pub(crate) index: usize,
}

/// Handle to a cluster, valid only for the [`Diagram`](super::Diagram) that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClusterId {
	pub(crate) diagram: u64,
	pub(crate) index: usize,
}

impl NodeId {
	/// Position of the node in declaration order.
	pub fn index(self) -> usize {
		self.index
	}
}

impl ClusterId {
	/// Position of the cluster in declaration order.
	pub fn index(self) -> usize {
		self.index
	}
}

/// Visual category of a node. Stands in for the icon a diagram library would draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
	/// An application written in Python.
	Python,
	/// Kafka message broker.
	Kafka,
	/// A stack of documents, used for registries.
	MultipleDocuments,
	/// Network backbone, used for pipelines like Telegraf.
	Backbone,
	/// InfluxDB time-series database.
	InfluxDB,
	/// A monitoring dashboard.
	Monitoring,
	/// Slack chat channel.
	Slack,
}

/// Arrow placement of an edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	/// Arrow head at the target.
	#[default]
	Forward,
	/// Arrow head at the source. Layout still ranks source before target.
	Back,
}

/// A node in the diagram.
#[derive(Clone, Debug)]
pub struct Node {
	/// Display label. Unique within a diagram.
	pub label: String,
	/// Visual category.
	pub kind: NodeKind,
	/// Enclosing cluster, `None` for top-level nodes.
	pub cluster: Option<ClusterId>,
}

/// A presentational grouping of nodes and sub-clusters.
#[derive(Clone, Debug)]
pub struct Cluster {
	/// Title drawn in the cluster's corner.
	pub label: String,
	/// Enclosing cluster, `None` at top level.
	pub parent: Option<ClusterId>,
}

/// A directed edge between two nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
	/// Node ranked first by the layout.
	pub source: NodeId,
	/// Node ranked second by the layout.
	pub target: NodeId,
	/// Which end carries the arrow head.
	pub direction: Direction,
}

/// A node as it appears in [`GraphData`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
	/// Display label.
	pub label: String,
	/// Visual category.
	pub kind: NodeKind,
	/// Label of the enclosing cluster.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cluster: Option<String>,
}

/// A cluster as it appears in [`GraphData`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphCluster {
	/// Cluster title.
	pub label: String,
	/// Label of the enclosing cluster.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent: Option<String>,
}

/// An edge as it appears in [`GraphData`], endpoints referenced by label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
	/// Source node label.
	pub source: String,
	/// Target node label.
	pub target: String,
	/// Which end carries the arrow head.
	#[serde(default)]
	pub direction: Direction,
}

/// Complete graph description: clusters, nodes and links, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
	/// Diagram title.
	pub name: String,
	/// All clusters, parents before children.
	pub clusters: Vec<GraphCluster>,
	/// All nodes.
	pub nodes: Vec<GraphNode>,
	/// All edges.
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Pretty-printed JSON form of the description.
	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string_pretty(self)
	}
}
