// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Tracing subscriber setup.

use meridian_server_config::{LogFormat, LoggingConfig};
use tracing_subscriber::{
	filter::ParseError, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const FALLBACK_LEVEL: &str = "info";

/// Parse a configured `logging.level` directive string.
pub fn level_filter(level: &str) -> Result<EnvFilter, ParseError> {
	EnvFilter::try_new(level)
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
///
/// A malformed `logging.level` falls back to `info` and is reported once the
/// subscriber is installed.
pub fn init_tracing(config: &LoggingConfig) {
	let mut invalid = None;
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		level_filter(&config.level).unwrap_or_else(|e| {
			invalid = Some(e);
			EnvFilter::new(FALLBACK_LEVEL)
		})
	});

	let registry = tracing_subscriber::registry().with(filter);

	match config.format {
		LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
		LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
	}

	if let Some(error) = invalid {
		tracing::warn!(
			level = %config.level,
			%error,
			fallback = FALLBACK_LEVEL,
			"invalid logging.level, using fallback"
		);
	}
}
