// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: built-in defaults, TOML files and environment variables.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{HttpConfigLayer, LocaleConfigLayer, LoggingConfigLayer};

/// Config file used when neither `--config` nor `MERIDIAN_SERVER_CONFIG_FILE` is given.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/meridian/server.toml";

pub const CONFIG_FILE_ENV: &str = "MERIDIAN_SERVER_CONFIG_FILE";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source.
///
/// Domains are declared as tables keyed by host:
///
/// ```toml
/// [domains."shop.example.com"]
/// locales = ["en_GB", "fr_FR"]
/// currencies = ["gbp", "eur"]
/// ```
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// The file named by `MERIDIAN_SERVER_CONFIG_FILE`, else [`DEFAULT_CONFIG_PATH`].
	pub fn system() -> Self {
		Self::new(env_var(CONFIG_FILE_ENV).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string()))
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!(
			domains = layer.domains.as_ref().map_or(0, |d| d.len()),
			"parsed config layer from TOML"
		);
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: MERIDIAN_SERVER_<SECTION>_<FIELD>. Domains are file-only.
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		layer_from_vars(env_var)
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn layer_from_vars<F>(var: F) -> Result<ServerConfigLayer, ConfigError>
where
	F: Fn(&str) -> Option<String>,
{
	Ok(ServerConfigLayer {
		http: Some(HttpConfigLayer {
			host: var("MERIDIAN_SERVER_HOST"),
			port: parsed(&var, "MERIDIAN_SERVER_PORT")?,
		}),
		logging: Some(LoggingConfigLayer {
			level: var("MERIDIAN_SERVER_LOG_LEVEL"),
			format: parsed(&var, "MERIDIAN_SERVER_LOG_FORMAT")?,
		}),
		locale: Some(LocaleConfigLayer {
			locale_param: var("MERIDIAN_SERVER_LOCALE_PARAM"),
			currency_param: var("MERIDIAN_SERVER_CURRENCY_PARAM"),
			locale_header: var("MERIDIAN_SERVER_LOCALE_HEADER"),
			currency_header: var("MERIDIAN_SERVER_CURRENCY_HEADER"),
			attach: parsed(&var, "MERIDIAN_SERVER_LOCALE_ATTACH")?,
			fallback: parsed(&var, "MERIDIAN_SERVER_LOCALE_FALLBACK")?,
		}),
		domains: None,
	})
}

fn parsed<F, T>(var: &F, name: &str) -> Result<Option<T>, ConfigError>
where
	F: Fn(&str) -> Option<String>,
	T: FromStr,
	T::Err: Display,
{
	match var(name) {
		Some(v) => v.parse().map(Some).map_err(|e| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid value '{v}': {e}"),
		}),
		None => Ok(None),
	}
}
