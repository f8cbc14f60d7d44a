//! Visual theming for rendered diagrams.
//!
//! Maps each [`NodeKind`] to a shape and fill color, and picks cluster
//! backgrounds by nesting depth.

use super::types::NodeKind;

/// RGB color representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
}

impl Color {
	/// Color from its channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
		}
	}

	/// Perceived brightness, 0.0 to 1.0.
	pub fn luminance(self) -> f64 {
		(0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
	}

	/// `#rrggbb`, the form Graphviz accepts.
	pub fn to_hex(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// How a single node kind is drawn.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Graphviz shape name.
	pub shape: &'static str,
	/// Fill color.
	pub fill: Color,
	/// Label color, contrasting with `fill`.
	pub font_color: Color,
	/// Outline color, a darker `fill`.
	pub border: Color,
}

impl NodeStyle {
	fn filled(shape: &'static str, fill: Color) -> Self {
		// Light fills get dark text and vice versa
		let font_color = if fill.luminance() > 0.6 {
			Color::rgb(45, 52, 54)
		} else {
			Color::rgb(255, 255, 255)
		};
		Self {
			shape,
			fill,
			font_color,
			border: fill.darken(0.25),
		}
	}
}

/// Complete visual theme for a diagram.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Theme name, for logs.
	pub name: &'static str,
	/// Font family for every label.
	pub font_name: &'static str,
	/// Default label color.
	pub font_color: Color,
	/// Canvas color.
	pub background: Color,
	/// Line color of every edge.
	pub edge_color: Color,
	/// Outline color of every cluster.
	pub cluster_border: Color,
	/// Cluster backgrounds, indexed by nesting depth and cycled when exhausted.
	pub cluster_backgrounds: Vec<Color>,
}

impl Theme {
	/// Light theme with pastel cluster backgrounds.
	pub fn light() -> Self {
		Self {
			name: "light",
			font_name: "Sans-Serif",
			font_color: Color::rgb(45, 52, 54),
			background: Color::rgb(255, 255, 255),
			edge_color: Color::rgb(123, 136, 148),
			cluster_border: Color::rgb(174, 182, 190),
			cluster_backgrounds: vec![
				Color::rgb(229, 245, 253),
				Color::rgb(235, 243, 231),
				Color::rgb(236, 232, 246),
				Color::rgb(253, 247, 227),
			],
		}
	}

	/// Style for a node kind.
	pub fn node_style(&self, kind: NodeKind) -> NodeStyle {
		match kind {
			NodeKind::Python => NodeStyle::filled("box", Color::rgb(55, 118, 171)),
			NodeKind::Kafka => NodeStyle::filled("box", Color::rgb(35, 31, 32)),
			NodeKind::MultipleDocuments => NodeStyle::filled("note", Color::rgb(242, 193, 78)),
			NodeKind::Backbone => NodeStyle::filled("hexagon", Color::rgb(199, 70, 52)),
			NodeKind::InfluxDB => NodeStyle::filled("cylinder", Color::rgb(34, 173, 246)),
			NodeKind::Monitoring => NodeStyle::filled("component", Color::rgb(66, 133, 244)),
			NodeKind::Slack => NodeStyle::filled("box", Color::rgb(74, 21, 75)),
		}
	}

	/// Background for a cluster at the given nesting depth (0 = top level).
	pub fn cluster_background(&self, depth: usize) -> Color {
		if self.cluster_backgrounds.is_empty() {
			return self.background;
		}
		self.cluster_backgrounds[depth % self.cluster_backgrounds.len()]
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}
