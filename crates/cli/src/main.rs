//! scout binary.
//!
//! Reads search input line by line from stdin and drives a live search over
//! the built-in mock project endpoints:
//! - plain lines feed the debounced search
//! - `:`-prefixed lines are commands (see `:help`)

mod config;
mod repl;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use scout_mock::MockServer;
use scout_project::{ApiError, ProjectClient, ProjectItem, ProjectKind, ProjectSearch};
use scout_search::{SearchController, SearchOptions};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::info;

use crate::config::Config;
use crate::repl::Command;

/// Scout command line arguments.
#[derive(Parser, Debug)]
#[command(name = "scout")]
#[command(about = "Live project search against the built-in mock endpoints")]
struct Args {
	/// Config file (defaults to the platform config dir)
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Listing to search: current or shared
	#[arg(short, long)]
	kind: Option<ProjectKind>,

	/// Debounce quiet period in milliseconds
	#[arg(long, value_name = "MS")]
	delay_ms: Option<u64>,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

type Controller = SearchController<ProjectItem, ProjectSearch<MockServer>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	// Logs go to stderr; stdout carries results.
	let subscriber = tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_max_level(if args.verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::INFO
		})
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;

	let mut config = Config::resolve(args.config.as_deref()).context("loading configuration")?;
	config.apply_overrides(args.kind, args.delay_ms);
	info!(
		kind = %config.listing.kind,
		delay_ms = config.search.delay_ms,
		page_size = config.listing.page_size,
		"starting scout"
	);

	let client = ProjectClient::new(MockServer::new(config.mock_config()));
	let controller = SearchController::new(
		client.search_fetcher(config.listing.kind, config.listing.page_size),
		search_options(&config),
	);

	let stdin = BufReader::new(tokio::io::stdin());
	session(stdin, &controller, &client, config.settle_time()).await
}

fn search_options(config: &Config) -> SearchOptions<ProjectItem, ApiError> {
	SearchOptions::new()
		.delay(config.search_delay())
		.on_success(|rows: Vec<ProjectItem>, keyword| print!("{}", repl::render_results(keyword, &rows)))
		.on_error(|error: ApiError| eprintln!("search failed: {error}"))
		.on_clear(|| println!("(cleared)"))
}

/// Runs the input loop, then tears the controller down.
async fn session(
	input: impl AsyncBufRead + Unpin,
	controller: &Controller,
	client: &ProjectClient<MockServer>,
	settle: Duration,
) -> anyhow::Result<()> {
	let result = run(input, controller, client, settle).await;
	controller.cleanup();
	result
}

/// Dispatches input lines until `:quit` or end of input.
///
/// At end of input waits `settle` so the last search can land.
async fn run(
	input: impl AsyncBufRead + Unpin,
	controller: &Controller,
	client: &ProjectClient<MockServer>,
	settle: Duration,
) -> anyhow::Result<()> {
	let mut lines = input.lines();

	while let Some(line) = lines.next_line().await.context("reading input")? {
		match Command::parse(&line) {
			Command::Search(keyword) => controller.search(keyword),
			Command::Now(keyword) => controller.search_now(keyword),
			Command::Cancel => controller.cancel(),
			Command::Detail(id) => {
				let client = client.clone();
				tokio::spawn(async move {
					match client.project_detail(id).await {
						Ok(item) => print!("{}", repl::render_detail(&item)),
						Err(error) => eprintln!("detail {id} failed: {error}"),
					}
				});
			}
			Command::Help => print!("{}", repl::HELP),
			Command::Invalid(message) => eprintln!("{message}"),
			Command::Quit => return Ok(()),
		}
	}

	// Input closed: give the last search time to land before teardown.
	tracing::debug!(?settle, "input closed");
	tokio::time::sleep(settle).await;
	Ok(())
}
