// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Locale inspection handler.

use axum::{response::IntoResponse, Json};
use meridian_common_locale::ResolvedLocale;
use meridian_server_locale::CurrentLocale;
use serde::{Deserialize, Serialize};

/// Body of `GET /v1/locale`.
///
/// Serializes as `{"resolved": true, "domain": .., "locale": .., "currency": ..}`
/// or `{"resolved": false}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleResponse {
	pub resolved: bool,
	#[serde(flatten)]
	pub locale: Option<ResolvedLocale>,
}

/// GET /v1/locale - Report the locale and currency resolved for this request.
pub async fn current_locale(CurrentLocale(locale): CurrentLocale) -> impl IntoResponse {
	Json(LocaleResponse {
		resolved: locale.is_some(),
		locale,
	})
}
