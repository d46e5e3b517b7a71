// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Handler-side access to the resolution attached by [`LocaleLayer`](crate::LocaleLayer).

use axum::{extract::FromRequestParts, http::request::Parts};
use meridian_common_locale::ResolvedLocale;

/// The locale resolved for this request, if any.
///
/// `None` means no domain matched and the fallback policy attached nothing,
/// or the route is not wrapped in a [`LocaleLayer`](crate::LocaleLayer).
#[derive(Debug, Clone)]
pub struct CurrentLocale(pub Option<ResolvedLocale>);

impl<S> FromRequestParts<S> for CurrentLocale
where
	S: Send + Sync,
{
	type Rejection = std::convert::Infallible;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		Ok(CurrentLocale(parts.extensions.get::<ResolvedLocale>().cloned()))
	}
}
