//! Pipewright binary.
//!
//! Loads a host file, runs one logging pipeline composition against an
//! in-memory container and prints the resulting plan.

mod host;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use pipewright_compose::{CompositionPlan, ContainerBuilder, LoggingExtension};
use tracing::info;

use crate::host::HostFile;

/// Pipewright command line arguments.
#[derive(Parser, Debug)]
#[command(name = "pipewright")]
#[command(about = "Compose a logging pipeline and print the wiring plan")]
struct Args {
	/// Host file with `[logging]`, `[parameters]`, `[services]` and `[debugger]` tables
	#[arg(short, long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Container parameter, may be repeated
	#[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
	params: Vec<(String, String)>,

	/// Application directory, exposed as the `appDir` parameter [default: current dir]
	#[arg(long, value_name = "DIR")]
	app_dir: Option<PathBuf>,

	/// Log directory already configured on the debugger
	#[arg(long, value_name = "DIR")]
	debug_log_dir: Option<PathBuf>,

	/// Notification address configured on the debugger
	#[arg(long, value_name = "ADDRESS")]
	debug_email: Option<String>,

	/// Output format
	#[arg(long, value_enum, default_value_t = Format::Text)]
	format: Format,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
	Text,
	Json,
}

fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	setup_tracing(args.verbose);

	let host = match &args.config {
		Some(path) => HostFile::load(path)?,
		None => HostFile::default(),
	};

	let mut parameters = host.parameters();
	match args.app_dir {
		Some(dir) => {
			parameters.insert("appDir", dir.to_string_lossy());
		}
		None if !parameters.contains("appDir") => {
			let cwd = std::env::current_dir().context("reading current directory")?;
			parameters.insert("appDir", cwd.to_string_lossy());
		}
		None => {}
	}
	for (key, value) in args.params {
		parameters.insert(key, value);
	}

	let facility = Arc::new(host.facility(args.debug_log_dir, args.debug_email));
	let mut container = ContainerBuilder::new(parameters);
	host.register_services(&mut container)?;
	info!(definitions = container.registry().len(), "host container ready");

	let composition = LoggingExtension::new(host.logging, Arc::clone(&facility))
		.compose(&mut container)
		.context("composing logging pipeline")?;

	let plan = CompositionPlan::new(&composition, &container);
	match args.format {
		Format::Text => print!("{plan}"),
		Format::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
	}
	Ok(())
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
	match raw.split_once('=') {
		Some((key, value)) if !key.is_empty() => Ok((key.to_owned(), value.to_owned())),
		_ => Err(format!("expected KEY=VALUE, got `{raw}`")),
	}
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("PIPEWRIGHT_LOG")
		.unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.init();
}
