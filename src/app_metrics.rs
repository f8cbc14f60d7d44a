//! The application metrics architecture diagram.
//!
//! An app publishes metrics to Kafka inside the Sasquatch deployment; Telegraf
//! consumes them into InfluxDB, with Avro schemas held by the schema manager.
//! Chronograf reads InfluxDB and sends alerts to Slack.

use crate::diagram::{Diagram, NodeKind, Result};

/// Diagram title.
pub const TITLE: &str = "Starting point";

/// Build the fixed topology.
pub fn app_metrics_diagram() -> Result<Diagram> {
	let mut d = Diagram::new(TITLE);

	let phalanx = d.cluster("Phalanx Kubernetes cluster", None)?;
	let your_app = d.cluster("Your app", Some(phalanx))?;
	let sasquatch = d.cluster("Sasquatch", Some(phalanx))?;

	let application = d.node("Metrics", NodeKind::Python, Some(your_app))?;

	let topic = d.node("Kafka", NodeKind::Kafka, Some(sasquatch))?;
	let schema_manager = d.node("Schema Manager", NodeKind::MultipleDocuments, Some(sasquatch))?;
	let telegraf = d.node("Telegraf", NodeKind::Backbone, Some(sasquatch))?;
	let influxdb = d.node("InfluxDB v1", NodeKind::InfluxDB, Some(sasquatch))?;
	let chronograf = d.node("Chronograf", NodeKind::Monitoring, Some(sasquatch))?;

	let slack = d.node("Slack alerts", NodeKind::Slack, None)?;

	d.chain(&[application, topic, telegraf, influxdb])?;
	// Alerts flow from Chronograf into Slack
	d.edge_back(slack, chronograf)?;
	d.edge(chronograf, influxdb)?;
	d.edge(application, schema_manager)?;
	d.edge(telegraf, schema_manager)?;

	Ok(d)
}
