// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Meridian locale server binary.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use meridian_server::{create_router, logging, ServerConfig};
use tower_http::trace::TraceLayer;

/// Meridian server - attaches per-domain locale and currency to HTTP requests.
#[derive(Parser, Debug)]
#[command(
	name = "meridian-server",
	about = "Per-domain locale and currency resolution server",
	version
)]
struct Args {
	/// TOML configuration file (domains, locale conventions, http, logging)
	#[arg(short, long, env = "MERIDIAN_SERVER_CONFIG_FILE")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Run the HTTP server (default)
	Serve,
	/// Validate the configuration and list configured domains
	Check,
	/// Show version information
	Version,
}

fn load(args: &Args) -> anyhow::Result<ServerConfig> {
	let config = match &args.config {
		Some(path) => meridian_server_config::load_config_with_file(path),
		None => meridian_server_config::load_config(),
	};
	config.context("failed to load configuration")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	match args.command {
		Some(Command::Version) => {
			println!("meridian-server {}", env!("CARGO_PKG_VERSION"));
			Ok(())
		}
		Some(Command::Check) => check(&args),
		Some(Command::Serve) | None => serve(&args).await,
	}
}

fn check(args: &Args) -> anyhow::Result<()> {
	dotenvy::dotenv().ok();

	let config = load(args)?;
	create_router(&config).context("invalid locale header configuration")?;

	println!("configuration OK: {}", config.registry);
	for (domain, options) in config.registry.domains() {
		println!(
			"  {domain}: locales={:?} currencies={:?}",
			options.locales, options.currencies
		);
	}
	Ok(())
}

async fn serve(args: &Args) -> anyhow::Result<()> {
	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = load(args)?;
	logging::init_tracing(&config.logging);

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		registry = %config.registry,
		"starting meridian-server"
	);

	let app = create_router(&config)
		.context("invalid locale header configuration")?
		.layer(TraceLayer::new_for_http());

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr)
		.await
		.with_context(|| format!("failed to bind {addr}"))?;

	axum::serve(listener, app)
		.with_graceful_shutdown(async {
			if let Err(e) = tokio::signal::ctrl_c().await {
				tracing::error!(error = %e, "failed to listen for shutdown signal");
			}
			tracing::info!("Received shutdown signal");
		})
		.await
		.context("server error")?;

	tracing::info!("Server shutdown complete");
	Ok(())
}
