//! Renders `app_metrics.png` into the current directory.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use std::path::Path;
use std::process::ExitCode;

use app_metrics_diagram::{generate, init_logging};
use log::error;

fn main() -> ExitCode {
	init_logging();

	match generate(Path::new(".")) {
		Ok(_) => ExitCode::SUCCESS,
		Err(e) => {
			error!("app-metrics-diagram: {e}");
			ExitCode::FAILURE
		}
	}
}
