//! Cirrus model binary.
//!
//! Loads a namelist, reports every resolved parameter and runs the model with
//! periodic lateral boundaries, logging each output cycle.

use std::path::PathBuf;

use anyhow::Context;
use cirrus_model::Model;
use cirrus_output::{PeriodicHalo, TracingSink};
use clap::Parser;
use tracing::info;

/// Model command line arguments.
#[derive(Parser, Debug)]
#[command(name = "cirrus")]
#[command(about = "Cirrus atmospheric model driver")]
struct Args {
	/// Namelist file
	#[arg(value_name = "NAMELIST")]
	namelist: PathBuf,

	/// Number of long timesteps (default: TIMMAX / DTLONG)
	#[arg(short = 'n', long, value_name = "N")]
	steps: Option<usize>,

	/// Validate the namelist and exit
	#[arg(long)]
	check: bool,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	setup_tracing(args.verbose);

	let loaded = cirrus_model::load_file(&args.namelist).with_context(|| format!("invalid namelist {}", args.namelist.display()))?;
	loaded.namelist.log_resolved();

	if args.check {
		info!(path = %args.namelist.display(), "namelist is valid");
		return Ok(());
	}

	let mut model = Model::new(loaded.config).context("model setup failed")?;
	let mut halo = PeriodicHalo::new(model.grid_dims());
	let mut sink = TracingSink;
	let summary = model.run(args.steps, &mut halo, &mut sink).context("model run failed")?;

	info!(
		steps = summary.steps,
		time = model.time(),
		history = summary.history,
		lite = summary.lite,
		mean = summary.mean,
		"run complete"
	);
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use std::fs::OpenOptions;

	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::fmt::format::FmtSpan;
	use tracing_subscriber::prelude::*;

	let filter = || {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("cirrus=debug,info")
			} else {
				EnvFilter::new("cirrus=info,warn")
			}
		})
	};

	if let Some(log_dir) = std::env::var("CIRRUS_LOG_DIR").ok().map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("cirrus.{}.log", std::process::id()));

		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer()
				.with_writer(file)
				.with_ansi(false)
				.with_span_events(FmtSpan::CLOSE)
				.with_target(true);

			tracing_subscriber::registry().with(filter()).with(file_layer).init();

			tracing::info!(path = ?log_path, "tracing initialized");
			return;
		}
	}

	tracing_subscriber::fmt().with_env_filter(filter()).with_writer(std::io::stderr).init();
}
