// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Tower layer that resolves locale and currency for every request.

use std::{
	future::Future,
	pin::Pin,
	sync::Arc,
	task::{ready, Context, Poll},
};

use http::{
	header::{HeaderName, HeaderValue, InvalidHeaderName, HOST, ORIGIN},
	HeaderMap, Request, Response,
};
use meridian_common_locale::{AttachTarget, ResolvedLocale, Resolver};
use pin_project_lite::pin_project;
use tower::{Layer, Service};

#[derive(Debug, thiserror::Error)]
pub enum LayerError {
	#[error("invalid header name {name:?}: {source}")]
	InvalidHeaderName {
		name: String,
		#[source]
		source: InvalidHeaderName,
	},
}

#[derive(Debug)]
struct LocaleState {
	resolver: Resolver,
	attach: AttachTarget,
	locale_header: HeaderName,
	currency_header: HeaderName,
}

impl LocaleState {
	fn resolve<B>(&self, req: &Request<B>) -> Option<ResolvedLocale> {
		let host = request_host(req).unwrap_or_default();
		self.resolver.resolve_or_fallback(host, req.uri().query())
	}

	fn encode(&self, resolved: &ResolvedLocale) -> Vec<(HeaderName, HeaderValue)> {
		[
			(&self.locale_header, resolved.locale.as_str()),
			(&self.currency_header, resolved.currency.as_str()),
		]
		.into_iter()
		.filter_map(|(name, value)| match HeaderValue::from_str(value) {
			Ok(encoded) => Some((name.clone(), encoded)),
			Err(_) => {
				tracing::warn!(
					header = %name,
					value,
					"resolved value is not a valid header value, skipping"
				);
				None
			}
		})
		.collect()
	}
}

/// Host used for domain matching: `Origin`, then `Host`, then the URI authority.
///
/// Browsers send `Origin: null` for opaque origins; that is treated as absent.
pub fn request_host<B>(req: &Request<B>) -> Option<&str> {
	header_str(req.headers(), ORIGIN)
		.or_else(|| header_str(req.headers(), HOST))
		.or_else(|| req.uri().authority().map(|a| a.as_str()))
}

fn header_str(headers: &HeaderMap, name: HeaderName) -> Option<&str> {
	headers
		.get(name)?
		.to_str()
		.ok()
		.filter(|v| !v.is_empty() && *v != "null")
}

fn apply(headers: Vec<(HeaderName, HeaderValue)>, target: &mut HeaderMap) {
	for (name, value) in headers {
		// Replaces any client-supplied value.
		target.insert(name, value);
	}
}

/// Layer that resolves the request's locale and currency and attaches them.
///
/// The resolved [`ResolvedLocale`] is always inserted into the request
/// extensions. Depending on the [`AttachTarget`], the configured headers
/// (`Accept-Language` / `Accept-Currency` by default) are set on the request
/// passed to the inner service, on the response, or both.
///
/// # Example
///
/// ```ignore
/// let layer = LocaleLayer::new(config.resolver(), config.locale.attach)?;
///
/// Router::new()
///     .route("/v1/locale", get(current_locale))
///     .layer(layer);
/// ```
#[derive(Debug, Clone)]
pub struct LocaleLayer {
	state: Arc<LocaleState>,
}

impl LocaleLayer {
	/// Create a layer, parsing the resolver's header names once.
	pub fn new(resolver: Resolver, attach: AttachTarget) -> Result<Self, LayerError> {
		let conventions = resolver.conventions();
		let locale_header = parse_header_name(&conventions.locale_header)?;
		let currency_header = parse_header_name(&conventions.currency_header)?;

		Ok(Self {
			state: Arc::new(LocaleState {
				resolver,
				attach,
				locale_header,
				currency_header,
			}),
		})
	}

	pub fn resolver(&self) -> &Resolver {
		&self.state.resolver
	}

	pub fn attach(&self) -> AttachTarget {
		self.state.attach
	}
}

fn parse_header_name(name: &str) -> Result<HeaderName, LayerError> {
	HeaderName::from_bytes(name.as_bytes()).map_err(|source| LayerError::InvalidHeaderName {
		name: name.to_string(),
		source,
	})
}

impl<S> Layer<S> for LocaleLayer {
	type Service = LocaleService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		LocaleService {
			inner,
			state: Arc::clone(&self.state),
		}
	}
}

/// Service wrapper for [`LocaleLayer`].
#[derive(Debug, Clone)]
pub struct LocaleService<S> {
	inner: S,
	state: Arc<LocaleState>,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for LocaleService<S>
where
	S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
	type Response = Response<ResBody>;
	type Error = S::Error;
	type Future = LocaleFuture<S::Future>;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
		let mut response_headers = None;

		match self.state.resolve(&req) {
			Some(resolved) => {
				let headers = self.state.encode(&resolved);
				if self.state.attach.response() {
					response_headers = Some(headers.clone());
				}
				if self.state.attach.request() {
					apply(headers, req.headers_mut());
				}
				req.extensions_mut().insert(resolved);
			}
			None => {
				tracing::trace!(uri = %req.uri(), "no locale resolved, leaving headers untouched");
			}
		}

		LocaleFuture {
			fut: self.inner.call(req),
			headers: response_headers,
		}
	}
}

pin_project! {
	/// Future for [`LocaleService`].
	pub struct LocaleFuture<F> {
		#[pin]
		fut: F,
		headers: Option<Vec<(HeaderName, HeaderValue)>>,
	}
}

impl<F, B, E> Future for LocaleFuture<F>
where
	F: Future<Output = Result<Response<B>, E>>,
{
	type Output = Result<Response<B>, E>;

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		let this = self.project();
		let mut response = ready!(this.fut.poll(cx))?;

		if let Some(headers) = this.headers.take() {
			apply(headers, response.headers_mut());
		}

		Poll::Ready(Ok(response))
	}
}
