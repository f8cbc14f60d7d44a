//! Declarative diagram builder.
//!
//! Nodes, clusters and edges are appended in declaration order and never
//! removed. Every id carries the tag of the [`Diagram`] that issued it, and
//! the builder rejects ids issued by any other diagram.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

use super::error::{DiagramError, Result};
use super::types::{
	Cluster, ClusterId, Direction, Edge, GraphCluster, GraphData, GraphLink, GraphNode, Node,
	NodeId, NodeKind,
};

/// Source of per-diagram tags stamped into issued ids.
static NEXT_DIAGRAM: AtomicU64 = AtomicU64::new(1);

/// A directed graph of labeled nodes grouped into nested clusters.
#[derive(Clone, Debug)]
pub struct Diagram {
	tag: u64,
	name: String,
	clusters: Vec<Cluster>,
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	label_to_idx: HashMap<String, NodeId>,
}

impl Default for Diagram {
	fn default() -> Self {
		Self::new("")
	}
}

impl Diagram {
	/// Empty diagram with the given title.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			tag: NEXT_DIAGRAM.fetch_add(1, Ordering::Relaxed),
			name: name.into(),
			clusters: Vec::new(),
			nodes: Vec::new(),
			edges: Vec::new(),
			label_to_idx: HashMap::new(),
		}
	}

	/// Diagram title.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Declare a cluster, nested under `parent` when given.
	pub fn cluster(
		&mut self,
		label: impl Into<String>,
		parent: Option<ClusterId>,
	) -> Result<ClusterId> {
		if let Some(p) = parent {
			self.check_cluster(p)?;
		}
		let id = ClusterId {
			diagram: self.tag,
			index: self.clusters.len(),
		};
		self.clusters.push(Cluster {
			label: label.into(),
			parent,
		});
		Ok(id)
	}

	/// Declare a node. Labels must be unique within the diagram.
	pub fn node(
		&mut self,
		label: impl Into<String>,
		kind: NodeKind,
		cluster: Option<ClusterId>,
	) -> Result<NodeId> {
		let label = label.into();
		if self.label_to_idx.contains_key(&label) {
			return Err(DiagramError::DuplicateNode(label));
		}
		if let Some(c) = cluster {
			self.check_cluster(c)?;
		}
		let id = NodeId {
			diagram: self.tag,
			index: self.nodes.len(),
		};
		debug!("diagram: node {label:?} ({kind:?})");
		self.label_to_idx.insert(label.clone(), id);
		self.nodes.push(Node {
			label,
			kind,
			cluster,
		});
		Ok(id)
	}

	/// Add a forward edge `source -> target`.
	pub fn edge(&mut self, source: NodeId, target: NodeId) -> Result<()> {
		self.push_edge(source, target, Direction::Forward)
	}

	/// Add an edge `source -> target` whose arrow head is drawn at `source`.
	pub fn edge_back(&mut self, source: NodeId, target: NodeId) -> Result<()> {
		self.push_edge(source, target, Direction::Back)
	}

	/// Add forward edges between each consecutive pair in `path`.
	pub fn chain(&mut self, path: &[NodeId]) -> Result<()> {
		for pair in path.windows(2) {
			self.edge(pair[0], pair[1])?;
		}
		Ok(())
	}

	/// All nodes, in declaration order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// All clusters, in declaration order.
	pub fn clusters(&self) -> &[Cluster] {
		&self.clusters
	}

	/// All edges, in declaration order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Look up a node by its label.
	pub fn node_by_label(&self, label: &str) -> Option<NodeId> {
		self.label_to_idx.get(label).copied()
	}

	/// The node behind `id`, or `None` if this diagram did not issue it.
	pub fn node_at(&self, id: NodeId) -> Option<&Node> {
		self.check_node(id).ok()?;
		self.nodes.get(id.index)
	}

	/// The cluster behind `id`, or `None` if this diagram did not issue it.
	pub fn cluster_at(&self, id: ClusterId) -> Option<&Cluster> {
		self.check_cluster(id).ok()?;
		self.clusters.get(id.index)
	}

	/// Nesting depth of one of this diagram's clusters, 0 for top-level clusters.
	pub(crate) fn cluster_depth(&self, id: ClusterId) -> usize {
		let mut depth = 0;
		let mut current = self.cluster_at(id).and_then(|c| c.parent);
		while let Some(p) = current {
			depth += 1;
			current = self.cluster_at(p).and_then(|c| c.parent);
		}
		depth
	}

	/// Direct sub-clusters of `parent` (`None` = top level), in declaration order.
	pub fn child_clusters(&self, parent: Option<ClusterId>) -> impl Iterator<Item = ClusterId> + '_ {
		let tag = self.tag;
		self.clusters
			.iter()
			.enumerate()
			.filter(move |(_, c)| c.parent == parent)
			.map(move |(index, _)| ClusterId { diagram: tag, index })
	}

	/// Nodes directly inside `cluster` (`None` = top level), in declaration order.
	pub fn member_nodes(&self, cluster: Option<ClusterId>) -> impl Iterator<Item = NodeId> + '_ {
		let tag = self.tag;
		self.nodes
			.iter()
			.enumerate()
			.filter(move |(_, n)| n.cluster == cluster)
			.map(move |(index, _)| NodeId { diagram: tag, index })
	}

	/// Serializable snapshot of the graph, endpoints referenced by label.
	pub fn description(&self) -> GraphData {
		GraphData {
			name: self.name.clone(),
			clusters: self
				.clusters
				.iter()
				.map(|c| GraphCluster {
					label: c.label.clone(),
					parent: c.parent.map(|p| self.clusters[p.index].label.clone()),
				})
				.collect(),
			nodes: self
				.nodes
				.iter()
				.map(|n| GraphNode {
					label: n.label.clone(),
					kind: n.kind,
					cluster: n.cluster.map(|c| self.clusters[c.index].label.clone()),
				})
				.collect(),
			links: self
				.edges
				.iter()
				.map(|e| GraphLink {
					source: self.nodes[e.source.index].label.clone(),
					target: self.nodes[e.target.index].label.clone(),
					direction: e.direction,
				})
				.collect(),
		}
	}

	fn push_edge(&mut self, source: NodeId, target: NodeId, direction: Direction) -> Result<()> {
		self.check_node(source)?;
		self.check_node(target)?;
		self.edges.push(Edge {
			source,
			target,
			direction,
		});
		Ok(())
	}

	fn check_node(&self, id: NodeId) -> Result<()> {
		if id.diagram == self.tag && id.index < self.nodes.len() {
			Ok(())
		} else {
			Err(DiagramError::UnknownNode(id.index))
		}
	}

	fn check_cluster(&self, id: ClusterId) -> Result<()> {
		if id.diagram == self.tag && id.index < self.clusters.len() {
			Ok(())
		} else {
			Err(DiagramError::UnknownCluster(id.index))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn labels(desc: &GraphData) -> Vec<(&str, &str)> {
		desc.links
			.iter()
			.map(|l| (l.source.as_str(), l.target.as_str()))
			.collect()
	}

	#[test]
	fn duplicate_label_is_rejected() {
		let mut d = Diagram::new("dup");
		let a = d.node("a", NodeKind::Kafka, None).unwrap();
		let err = d.node("a", NodeKind::Slack, None).unwrap_err();
		assert!(matches!(err, DiagramError::DuplicateNode(l) if l == "a"));
		assert_eq!(d.nodes().len(), 1);
		assert_eq!(d.node_by_label("a"), Some(a));
		assert_eq!(d.node_by_label("b"), None);
	}

	#[test]
	fn out_of_range_ids_are_rejected() {
		let mut big = Diagram::new("big");
		let c0 = big.cluster("c0", None).unwrap();
		let c1 = big.cluster("c1", None).unwrap();
		big.node("x", NodeKind::Python, None).unwrap();
		let y = big.node("y", NodeKind::Python, None).unwrap();

		let mut small = Diagram::new("small");
		small.cluster("only cluster", None).unwrap();
		let only = small.node("only", NodeKind::Python, None).unwrap();
		assert!(matches!(
			small.edge(only, y),
			Err(DiagramError::UnknownNode(1))
		));
		assert!(matches!(
			small.node("z", NodeKind::Python, Some(c1)),
			Err(DiagramError::UnknownCluster(1))
		));
		assert!(small.cluster_at(c0).is_none());
		assert!(small.edges().is_empty());
	}

	#[test]
	fn foreign_ids_in_range_are_rejected() {
		let mut other = Diagram::new("other");
		let foreign_cluster = other.cluster("theirs", None).unwrap();
		let foreign = other.node("foreign", NodeKind::Kafka, Some(foreign_cluster)).unwrap();

		let mut d = Diagram::new("mine");
		d.cluster("ours", None).unwrap();
		let mine = d.node("mine", NodeKind::Python, None).unwrap();

		assert!(matches!(
			d.edge(mine, foreign),
			Err(DiagramError::UnknownNode(0))
		));
		assert!(matches!(
			d.edge_back(foreign, mine),
			Err(DiagramError::UnknownNode(0))
		));
		assert!(matches!(
			d.node("stray", NodeKind::Slack, Some(foreign_cluster)),
			Err(DiagramError::UnknownCluster(0))
		));
		assert!(matches!(
			d.cluster("stray", Some(foreign_cluster)),
			Err(DiagramError::UnknownCluster(0))
		));

		assert!(d.edges().is_empty());
		assert_eq!(d.nodes().len(), 1);
		assert_eq!(d.clusters().len(), 1);
		assert!(d.node_at(foreign).is_none());
		assert!(d.cluster_at(foreign_cluster).is_none());
		assert_eq!(d.node_at(mine).map(|n| n.label.as_str()), Some("mine"));
	}

	#[test]
	fn lookups_with_foreign_ids_do_not_panic() {
		let mut other = Diagram::new("other");
		other.node("a", NodeKind::Python, None).unwrap();
		let b = other.node("b", NodeKind::Python, None).unwrap();
		let c = other.cluster("c", None).unwrap();

		let empty = Diagram::new("empty");
		assert!(empty.node_at(b).is_none());
		assert!(empty.cluster_at(c).is_none());
		assert_eq!(empty.cluster_depth(c), 0);
	}

	#[test]
	fn chain_links_consecutive_pairs() {
		let mut d = Diagram::new("chain");
		let a = d.node("a", NodeKind::Python, None).unwrap();
		let b = d.node("b", NodeKind::Kafka, None).unwrap();
		let c = d.node("c", NodeKind::Backbone, None).unwrap();
		d.chain(&[a, b, c]).unwrap();

		assert_eq!(labels(&d.description()), vec![("a", "b"), ("b", "c")]);
	}

	#[test]
	fn parallel_edges_are_kept() {
		let mut d = Diagram::new("multi");
		let a = d.node("a", NodeKind::Python, None).unwrap();
		let b = d.node("b", NodeKind::Kafka, None).unwrap();
		d.edge(a, b).unwrap();
		d.edge(a, b).unwrap();
		assert_eq!(d.edges().len(), 2);
	}

	#[test]
	fn cluster_depth_follows_parents() {
		let mut d = Diagram::new("nest");
		let outer = d.cluster("outer", None).unwrap();
		let inner = d.cluster("inner", Some(outer)).unwrap();
		let deepest = d.cluster("deepest", Some(inner)).unwrap();
		assert_eq!(d.cluster_depth(outer), 0);
		assert_eq!(d.cluster_depth(inner), 1);
		assert_eq!(d.cluster_depth(deepest), 2);
		assert_eq!(d.child_clusters(None).collect::<Vec<_>>(), vec![outer]);
		assert_eq!(d.child_clusters(Some(outer)).collect::<Vec<_>>(), vec![inner]);
	}

	#[test]
	fn description_references_labels() {
		let mut d = Diagram::new("desc");
		let c = d.cluster("box", None).unwrap();
		let a = d.node("a", NodeKind::Slack, None).unwrap();
		let b = d.node("b", NodeKind::Monitoring, Some(c)).unwrap();
		d.edge_back(a, b).unwrap();

		let desc = d.description();
		assert_eq!(desc.nodes[1].cluster.as_deref(), Some("box"));
		assert_eq!(desc.links[0].direction, Direction::Back);

		let json = desc.to_json().unwrap();
		let parsed: GraphData = serde_json::from_str(&json).unwrap();
		assert_eq!(parsed, desc);
	}
}
