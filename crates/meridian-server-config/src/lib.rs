// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for Meridian server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Validation of the domain table into a [`DomainRegistry`] before serving
//! - Consistent environment variable naming (`MERIDIAN_SERVER_*`)
//!
//! # Usage
//!
//! ```ignore
//! use meridian_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Serving {} on {}", config.registry, config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{
	ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource, CONFIG_FILE_ENV,
	DEFAULT_CONFIG_PATH,
};

use std::sync::Arc;

use meridian_common_locale::{Conventions, DomainRegistry, Resolver};
use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub logging: LoggingConfig,
	pub locale: LocaleConfig,
	pub registry: Arc<DomainRegistry>,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}

	/// A resolver sharing this configuration's registry.
	pub fn resolver(&self) -> Resolver {
		Resolver::new(Arc::clone(&self.registry))
			.with_conventions(self.locale.conventions.clone())
			.with_fallback(self.locale.fallback)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`MERIDIAN_SERVER_*`)
/// 2. Config file (`MERIDIAN_SERVER_CONFIG_FILE`, else `/etc/meridian/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Merge `sources` in precedence order and finalize.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
pub fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();
	let locale = layer.locale.unwrap_or_default().finalize();

	validate_conventions(&locale.conventions)?;

	// A missing domain table is the same as an empty one.
	let registry = DomainRegistry::new(layer.domains.unwrap_or_default())?;

	info!(
		host = %http.host,
		port = http.port,
		domains = registry.len(),
		attach = %locale.attach,
		fallback = %locale.fallback,
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		http,
		logging,
		locale,
		registry: Arc::new(registry),
	})
}

/// Validate cross-field rules on parameter and header names.
fn validate_conventions(conventions: &Conventions) -> Result<(), ConfigError> {
	let names = [
		("locale_param", &conventions.locale_param),
		("currency_param", &conventions.currency_param),
		("locale_header", &conventions.locale_header),
		("currency_header", &conventions.currency_header),
	];
	if let Some((field, _)) = names.iter().find(|(_, v)| v.trim().is_empty()) {
		return Err(ConfigError::Validation(format!("locale.{field} must not be empty")));
	}

	if conventions.locale_param == conventions.currency_param {
		return Err(ConfigError::Validation(format!(
			"locale.locale_param and locale.currency_param are both '{}'",
			conventions.locale_param
		)));
	}

	if conventions
		.locale_header
		.eq_ignore_ascii_case(&conventions.currency_header)
	{
		return Err(ConfigError::Validation(format!(
			"locale.locale_header and locale.currency_header are both '{}'",
			conventions.locale_header
		)));
	}

	Ok(())
}
