//! Runs the `app-metrics-diagram` binary the way a user would.

use std::path::Path;
use std::process::{Command, Output, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_app-metrics-diagram");

fn dot_available() -> bool {
	Command::new("dot")
		.arg("-V")
		.stdout(Stdio::null())
		.stderr(Stdio::null())
		.status()
		.map(|s| s.success())
		.unwrap_or(false)
}

fn run_in(dir: &Path, engine: Option<&str>) -> Output {
	let mut cmd = Command::new(BIN);
	cmd.current_dir(dir).env_remove("RUST_LOG");
	match engine {
		Some(engine) => cmd.env("GRAPHVIZ_DOT", engine),
		None => cmd.env_remove("GRAPHVIZ_DOT"),
	};
	cmd.output().unwrap()
}

fn file_names(dir: &Path) -> Vec<String> {
	let mut names: Vec<String> = std::fs::read_dir(dir)
		.unwrap()
		.map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
		.collect();
	names.sort();
	names
}

#[test]
fn missing_engine_exits_with_status_one_and_writes_nothing() {
	let dir = tempfile::tempdir().unwrap();
	let out = run_in(dir.path(), Some("/nonexistent/dot"));

	assert_eq!(out.status.code(), Some(1));
	let stderr = String::from_utf8_lossy(&out.stderr);
	assert!(stderr.contains("/nonexistent/dot"), "stderr: {stderr}");
	assert!(stderr.contains("not found"), "stderr: {stderr}");
	assert!(file_names(dir.path()).is_empty());
}

#[test]
fn flagless_run_writes_app_metrics_png_in_cwd() {
	if !dot_available() {
		eprintln!("skipping: Graphviz dot not installed");
		return;
	}
	let dir = tempfile::tempdir().unwrap();

	let first = run_in(dir.path(), None);
	assert!(first.status.success(), "{}", String::from_utf8_lossy(&first.stderr));
	assert_eq!(file_names(dir.path()), vec!["app_metrics.png".to_string()]);
	let bytes = std::fs::read(dir.path().join("app_metrics.png")).unwrap();
	assert!(bytes.starts_with(b"\x89PNG"));

	let second = run_in(dir.path(), None);
	assert!(second.status.success());
	assert_eq!(file_names(dir.path()), vec!["app_metrics.png".to_string()]);
}
