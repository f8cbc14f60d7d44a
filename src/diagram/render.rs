//! DOT rendering for diagrams.
//!
//! Emits a Graphviz `digraph` in declaration order:
//! 1. Graph, node and edge defaults (theme first, then config overrides)
//! 2. Clusters as nested `subgraph "cluster_<n>"` blocks with their nodes
//! 3. Top-level nodes
//! 4. Edges

use std::collections::BTreeMap;

use log::debug;

use super::builder::Diagram;
use super::config::DiagramConfig;
use super::theme::Theme;
use super::types::{ClusterId, Direction, NodeId};

type Attrs = Vec<(String, String)>;

/// Renders the diagram to DOT using the default theme.
pub fn to_dot(diagram: &Diagram, config: &DiagramConfig) -> String {
	to_dot_with_theme(diagram, config, &Theme::default())
}

/// Renders the diagram to DOT.
pub fn to_dot_with_theme(diagram: &Diagram, config: &DiagramConfig, theme: &Theme) -> String {
	debug!("render: {:?} with theme {}", diagram.name(), theme.name);
	let mut out = String::new();
	out.push_str(&format!("digraph {} {{\n", quote(diagram.name())));

	let graph_defaults = attrs(&[
		("fontname", theme.font_name.to_string()),
		("fontsize", "15".to_string()),
		("fontcolor", theme.font_color.to_hex()),
		("bgcolor", theme.background.to_hex()),
		("rankdir", "LR".to_string()),
		("label", diagram.name().to_string()),
	]);
	let node_defaults = attrs(&[
		("shape", "box".to_string()),
		("style", "rounded,filled".to_string()),
		("fontname", theme.font_name.to_string()),
		("fontsize", "13".to_string()),
		("fontcolor", theme.font_color.to_hex()),
		("margin", "0.2,0.1".to_string()),
	]);
	let edge_defaults = attrs(&[("color", theme.edge_color.to_hex())]);

	statement(&mut out, 1, "graph", &merge(graph_defaults, &config.graph_attr));
	statement(&mut out, 1, "node", &merge(node_defaults, &config.node_attr));
	statement(&mut out, 1, "edge", &merge(edge_defaults, &config.edge_attr));

	for cluster in diagram.child_clusters(None) {
		write_cluster(&mut out, diagram, theme, cluster, 1);
	}
	for node in diagram.member_nodes(None) {
		write_node(&mut out, diagram, theme, node, 1);
	}

	for edge in diagram.edges() {
		let head = format!(
			"{} -> {}",
			quote(&node_key(edge.source)),
			quote(&node_key(edge.target))
		);
		let extra = match edge.direction {
			Direction::Forward => Vec::new(),
			Direction::Back => attrs(&[("dir", "back".to_string())]),
		};
		statement(&mut out, 1, &head, &extra);
	}

	out.push_str("}\n");
	out
}

fn write_cluster(out: &mut String, diagram: &Diagram, theme: &Theme, id: ClusterId, depth: usize) {
	let Some(cluster) = diagram.cluster_at(id) else {
		return;
	};
	indent(out, depth);
	out.push_str(&format!(
		"subgraph {} {{\n",
		quote(&format!("cluster_{}", id.index()))
	));

	let style = attrs(&[
		("label", cluster.label.clone()),
		("style", "rounded,filled".to_string()),
		(
			"fillcolor",
			theme.cluster_background(diagram.cluster_depth(id)).to_hex(),
		),
		("pencolor", theme.cluster_border.to_hex()),
		("labeljust", "l".to_string()),
		("fontname", theme.font_name.to_string()),
		("fontsize", "12".to_string()),
	]);
	statement(out, depth + 1, "graph", &style);

	for child in diagram.child_clusters(Some(id)) {
		write_cluster(out, diagram, theme, child, depth + 1);
	}
	for node in diagram.member_nodes(Some(id)) {
		write_node(out, diagram, theme, node, depth + 1);
	}

	indent(out, depth);
	out.push_str("}\n");
}

fn write_node(out: &mut String, diagram: &Diagram, theme: &Theme, id: NodeId, depth: usize) {
	let Some(node) = diagram.node_at(id) else {
		return;
	};
	let style = theme.node_style(node.kind);
	let node_attrs = attrs(&[
		("label", node.label.clone()),
		("shape", style.shape.to_string()),
		("fillcolor", style.fill.to_hex()),
		("fontcolor", style.font_color.to_hex()),
		("color", style.border.to_hex()),
	]);
	statement(out, depth, &quote(&node_key(id)), &node_attrs);
}

/// Stable DOT identifier for a node. Labels are free text, so they go in `label=`.
fn node_key(id: NodeId) -> String {
	format!("n{}", id.index())
}

fn attrs(pairs: &[(&str, String)]) -> Attrs {
	pairs
		.iter()
		.map(|(k, v)| (k.to_string(), v.clone()))
		.collect()
}

/// Overrides replace matching defaults in place; new keys are appended.
fn merge(mut defaults: Attrs, overrides: &BTreeMap<String, String>) -> Attrs {
	for (key, value) in overrides {
		match defaults.iter_mut().find(|(k, _)| k == key) {
			Some(slot) => slot.1 = value.clone(),
			None => defaults.push((key.clone(), value.clone())),
		}
	}
	defaults
}

fn statement(out: &mut String, depth: usize, head: &str, attrs: &Attrs) {
	indent(out, depth);
	out.push_str(head);
	if !attrs.is_empty() {
		let list: Vec<String> = attrs
			.iter()
			.map(|(k, v)| format!("{k}={}", quote(v)))
			.collect();
		out.push_str(&format!(" [{}]", list.join(", ")));
	}
	out.push_str(";\n");
}

fn indent(out: &mut String, depth: usize) {
	for _ in 0..depth {
		out.push('\t');
	}
}

/// Double-quote a DOT id, escaping `"` and `\`.
fn quote(s: &str) -> String {
	let mut q = String::with_capacity(s.len() + 2);
	q.push('"');
	for c in s.chars() {
		match c {
			'"' | '\\' => {
				q.push('\\');
				q.push(c);
			}
			'\n' => q.push_str("\\n"),
			_ => q.push(c),
		}
	}
	q.push('"');
	q
}
