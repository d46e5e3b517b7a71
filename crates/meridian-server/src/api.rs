// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Router and shared application state.

use std::sync::Arc;

use axum::{routing::get, Router};
use meridian_common_locale::DomainRegistry;
use meridian_server_config::ServerConfig;
use meridian_server_locale::{LayerError, LocaleLayer};

use crate::routes;

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
	pub registry: Arc<DomainRegistry>,
}

pub fn create_app_state(config: &ServerConfig) -> AppState {
	AppState {
		registry: Arc::clone(&config.registry),
	}
}

/// Build the router wrapped in the locale layer.
///
/// Fails if a configured locale or currency header name is not a valid
/// HTTP header name.
pub fn create_router(config: &ServerConfig) -> Result<Router, LayerError> {
	let locale_layer = LocaleLayer::new(config.resolver(), config.locale.attach)?;

	Ok(Router::new()
		.route("/health", get(routes::health::health_check))
		.route("/v1/locale", get(routes::locale::current_locale))
		.layer(locale_layer)
		.with_state(create_app_state(config)))
}
