// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Health HTTP handler.

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::api::AppState;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
	pub status: String,
	pub version: String,
	pub domains: usize,
}

/// GET /health - Liveness plus a count of configured domains.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	Json(HealthResponse {
		status: "healthy".to_string(),
		version: env!("CARGO_PKG_VERSION").to_string(),
		domains: state.registry.len(),
	})
}
