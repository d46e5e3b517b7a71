// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-request locale and currency resolution.

use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::host::extract_domain_key;
use crate::policy::{Conventions, FallbackPolicy};
use crate::registry::DomainRegistry;

/// The inputs of one resolution: a raw host plus optional overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveRequest<'a> {
	pub host: &'a str,
	pub locale_override: Option<Cow<'a, str>>,
	pub currency_override: Option<Cow<'a, str>>,
}

impl<'a> ResolveRequest<'a> {
	pub fn new(host: &'a str) -> Self {
		Self {
			host,
			..Default::default()
		}
	}

	pub fn with_locale(mut self, locale: impl Into<Cow<'a, str>>) -> Self {
		self.locale_override = Some(locale.into());
		self
	}

	pub fn with_currency(mut self, currency: impl Into<Cow<'a, str>>) -> Self {
		self.currency_override = Some(currency.into());
		self
	}

	/// Build a request from a raw URL query string (without the leading `?`).
	///
	/// Parameter names come from `conventions`; values are percent-decoded and
	/// the first occurrence of each parameter wins.
	pub fn from_query(host: &'a str, query: Option<&'a str>, conventions: &Conventions) -> Self {
		let mut request = Self::new(host);

		for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
			if request.locale_override.is_none() && key == conventions.locale_param {
				request.locale_override = Some(value);
			} else if request.currency_override.is_none() && key == conventions.currency_param {
				request.currency_override = Some(value);
			}
		}

		request
	}
}

/// A resolved (locale, currency) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLocale {
	/// The matched registry key; `None` when the pair came from a fallback.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub domain: Option<String>,
	pub locale: String,
	pub currency: String,
}

/// Outcome of resolving one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
	Matched(ResolvedLocale),
	/// The host matched no configured domain. Not an error.
	NoMatch,
}

impl Resolution {
	pub fn is_match(&self) -> bool {
		matches!(self, Self::Matched(_))
	}

	pub fn matched(&self) -> Option<&ResolvedLocale> {
		match self {
			Self::Matched(resolved) => Some(resolved),
			Self::NoMatch => None,
		}
	}

	/// Apply the caller's no-match policy.
	pub fn or_fallback(self, policy: &FallbackPolicy) -> Option<ResolvedLocale> {
		match self {
			Self::Matched(resolved) => Some(resolved),
			Self::NoMatch => policy.resolved(),
		}
	}
}

/// Resolve `request` against `registry`.
///
/// Resolution order for each of locale and currency, independently:
/// 1. The request override, if non-empty and listed for the matched domain
/// 2. The domain's first configured value
///
/// Overrides that are not listed are ignored. A host matching no domain
/// yields [`Resolution::NoMatch`].
///
/// # Example
///
/// ```
/// use meridian_common_locale::{resolve, DomainOptions, DomainRegistry, ResolveRequest};
///
/// let registry = DomainRegistry::from_domains([(
/// 	"127.0.0.1",
/// 	DomainOptions::new(["en_GB", "fr_FR"], ["eur", "franc"]),
/// )])
/// .unwrap();
///
/// let request = ResolveRequest::new("127.0.0.1").with_locale("fr_FR");
/// let resolved = resolve(&registry, &request).matched().cloned().unwrap();
/// assert_eq!(resolved.locale, "fr_FR");
/// assert_eq!(resolved.currency, "eur");
/// ```
#[tracing::instrument(level = "trace", skip_all, fields(host = %request.host))]
pub fn resolve(registry: &DomainRegistry, request: &ResolveRequest<'_>) -> Resolution {
	let domain = extract_domain_key(request.host);

	let Some(options) = registry.lookup(domain) else {
		tracing::trace!(domain, "no domain matched");
		return Resolution::NoMatch;
	};

	// Both lists are non-empty for any validated registry.
	let (Some(locale), Some(currency)) = (
		select(&options.locales, request.locale_override.as_deref(), "locale"),
		select(&options.currencies, request.currency_override.as_deref(), "currency"),
	) else {
		return Resolution::NoMatch;
	};

	tracing::debug!(domain, locale, currency, "resolved locale");

	Resolution::Matched(ResolvedLocale {
		domain: Some(domain.to_string()),
		locale: locale.to_string(),
		currency: currency.to_string(),
	})
}

fn select<'o>(
	allowed: &'o [String],
	requested: Option<&str>,
	kind: &'static str,
) -> Option<&'o str> {
	let default = allowed.first()?;

	match requested.filter(|r| !r.is_empty()) {
		Some(requested) => match allowed.iter().find(|a| *a == requested) {
			Some(matched) => Some(matched.as_str()),
			None => {
				tracing::trace!(kind, requested, "override not configured for domain, ignoring");
				Some(default.as_str())
			}
		},
		None => Some(default.as_str()),
	}
}

/// A [`DomainRegistry`] bundled with the conventions and fallback policy
/// used at the HTTP edge.
///
/// Cheap to clone; the registry is shared.
#[derive(Debug, Clone)]
pub struct Resolver {
	registry: Arc<DomainRegistry>,
	conventions: Conventions,
	fallback: FallbackPolicy,
}

impl Resolver {
	pub fn new(registry: impl Into<Arc<DomainRegistry>>) -> Self {
		Self {
			registry: registry.into(),
			conventions: Conventions::default(),
			fallback: FallbackPolicy::default(),
		}
	}

	pub fn with_conventions(mut self, conventions: Conventions) -> Self {
		self.conventions = conventions;
		self
	}

	pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
		self.fallback = fallback;
		self
	}

	pub fn registry(&self) -> &DomainRegistry {
		&self.registry
	}

	pub fn conventions(&self) -> &Conventions {
		&self.conventions
	}

	pub fn fallback(&self) -> FallbackPolicy {
		self.fallback
	}

	pub fn resolve(&self, request: &ResolveRequest<'_>) -> Resolution {
		resolve(&self.registry, request)
	}

	/// Resolve a host plus raw query string using this resolver's parameter names.
	pub fn resolve_query(&self, host: &str, query: Option<&str>) -> Resolution {
		self.resolve(&ResolveRequest::from_query(host, query, &self.conventions))
	}

	/// Resolve and apply the fallback policy in one step.
	pub fn resolve_or_fallback(&self, host: &str, query: Option<&str>) -> Option<ResolvedLocale> {
		self.resolve_query(host, query).or_fallback(&self.fallback)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::registry::DomainOptions;
	use proptest::prelude::*;

	fn single(host: &str, locales: &[&str], currencies: &[&str]) -> DomainRegistry {
		DomainRegistry::from_domains([(
			host,
			DomainOptions::new(locales.iter().copied(), currencies.iter().copied()),
		)])
		.unwrap()
	}

	fn multiple() -> DomainRegistry {
		single("127.0.0.1", &["en_GB", "fr_FR"], &["eur", "franc"])
	}

	fn pair(resolution: Resolution) -> (String, String) {
		let resolved = resolution.matched().cloned().expect("expected a match");
		(resolved.locale, resolved.currency)
	}

	#[test]
	fn test_single_locale_and_currency() {
		let registry = single("127.0.0.1", &["en_US"], &["usd"]);
		let resolution = resolve(&registry, &ResolveRequest::new("127.0.0.1"));
		assert_eq!(pair(resolution), ("en_US".to_string(), "usd".to_string()));
	}

	#[test]
	fn test_defaults_with_multiple_options() {
		let resolution = resolve(&multiple(), &ResolveRequest::new("127.0.0.1"));
		assert_eq!(pair(resolution), ("en_GB".to_string(), "eur".to_string()));
	}

	#[test]
	fn test_locale_override_applies() {
		let request = ResolveRequest::new("127.0.0.1").with_locale("fr_FR");
		assert_eq!(
			pair(resolve(&multiple(), &request)),
			("fr_FR".to_string(), "eur".to_string())
		);
	}

	#[test]
	fn test_currency_override_applies() {
		let request = ResolveRequest::new("127.0.0.1").with_currency("franc");
		assert_eq!(
			pair(resolve(&multiple(), &request)),
			("en_GB".to_string(), "franc".to_string())
		);
	}

	#[test]
	fn test_unknown_locale_override_is_ignored() {
		let request = ResolveRequest::new("127.0.0.1").with_locale("es_SP");
		assert_eq!(
			pair(resolve(&multiple(), &request)),
			("en_GB".to_string(), "eur".to_string())
		);
	}

	#[test]
	fn test_unknown_currency_override_is_ignored() {
		let request = ResolveRequest::new("127.0.0.1").with_currency("yen");
		assert_eq!(
			pair(resolve(&multiple(), &request)),
			("en_GB".to_string(), "eur".to_string())
		);
	}

	#[test]
	fn test_overrides_are_independent() {
		let request = ResolveRequest::new("127.0.0.1")
			.with_locale("xx_XX")
			.with_currency("franc");
		assert_eq!(
			pair(resolve(&multiple(), &request)),
			("en_GB".to_string(), "franc".to_string())
		);
	}

	#[test]
	fn test_override_is_case_sensitive() {
		let request = ResolveRequest::new("127.0.0.1").with_locale("fr_fr");
		assert_eq!(pair(resolve(&multiple(), &request)).0, "en_GB");
	}

	#[test]
	fn test_empty_override_uses_default() {
		let request = ResolveRequest::new("127.0.0.1").with_locale("").with_currency("");
		assert_eq!(
			pair(resolve(&multiple(), &request)),
			("en_GB".to_string(), "eur".to_string())
		);
	}

	#[test]
	fn test_unknown_host_is_no_match() {
		let resolution = resolve(&multiple(), &ResolveRequest::new("example.com"));
		assert_eq!(resolution, Resolution::NoMatch);
		assert!(!resolution.is_match());
	}

	#[test]
	fn test_no_match_falls_back_to_system_default() {
		let resolver = Resolver::new(multiple());
		let resolved = resolver.resolve_or_fallback("example.com", None).unwrap();
		assert_eq!(resolved.locale, "en_US");
		assert_eq!(resolved.currency, "usd");
		assert!(resolved.domain.is_none());
	}

	#[test]
	fn test_no_match_with_unset_policy() {
		let resolver = Resolver::new(multiple()).with_fallback(FallbackPolicy::Unset);
		assert!(resolver.resolve_or_fallback("example.com", None).is_none());
	}

	#[test]
	fn test_decorated_host_matches() {
		let resolver = Resolver::new(multiple());
		let resolution = resolver.resolve_query("http://127.0.0.1:8080", Some("_l=fr_FR"));
		let resolved = resolution.matched().unwrap();
		assert_eq!(resolved.domain.as_deref(), Some("127.0.0.1"));
		assert_eq!(resolved.locale, "fr_FR");
	}

	#[test]
	fn test_from_query_reads_configured_params() {
		let conventions = Conventions {
			locale_param: "lang".to_string(),
			currency_param: "cur".to_string(),
			..Default::default()
		};
		let request = ResolveRequest::from_query(
			"example.com",
			Some("lang=fr_FR&cur=eur&_l=de_DE"),
			&conventions,
		);
		assert_eq!(request.locale_override.as_deref(), Some("fr_FR"));
		assert_eq!(request.currency_override.as_deref(), Some("eur"));
	}

	#[test]
	fn test_from_query_first_occurrence_wins_and_decodes() {
		let request = ResolveRequest::from_query(
			"example.com",
			Some("_l=pt%5FBR&_l=en_US&_c=brl"),
			&Conventions::default(),
		);
		assert_eq!(request.locale_override.as_deref(), Some("pt_BR"));
		assert_eq!(request.currency_override.as_deref(), Some("brl"));
	}

	#[test]
	fn test_from_query_without_query() {
		let request = ResolveRequest::from_query("example.com", None, &Conventions::default());
		assert!(request.locale_override.is_none());
		assert!(request.currency_override.is_none());
	}

	#[test]
	fn test_resolved_locale_serialization_skips_missing_domain() {
		let resolved = FallbackPolicy::SystemDefault.resolved().unwrap();
		let json = serde_json::to_value(&resolved).unwrap();
		assert_eq!(json, serde_json::json!({"locale": "en_US", "currency": "usd"}));
	}

	fn distinct_triple(pattern: &'static str) -> impl Strategy<Value = Vec<String>> {
		prop::collection::btree_set(pattern, 3).prop_map(|set| set.into_iter().collect())
	}

	proptest! {
		/// Default is the first entry; a listed override wins; an unlisted one is ignored.
		#[test]
		fn locale_selection_properties(
			locales in distinct_triple("[a-z]{2}_[A-Z]{2}"),
			currencies in distinct_triple("[a-z]{3}"),
		) {
			let registry = DomainRegistry::from_domains([(
				"example.com",
				DomainOptions::new(locales.clone(), currencies.clone()),
			)])
			.unwrap();

			let none = resolve(&registry, &ResolveRequest::new("example.com"));
			prop_assert_eq!(&none.matched().unwrap().locale, &locales[0]);
			prop_assert_eq!(&none.matched().unwrap().currency, &currencies[0]);

			let second = ResolveRequest::new("example.com")
				.with_locale(locales[1].as_str())
				.with_currency(currencies[2].as_str());
			let second = resolve(&registry, &second);
			prop_assert_eq!(&second.matched().unwrap().locale, &locales[1]);
			prop_assert_eq!(&second.matched().unwrap().currency, &currencies[2]);

			let bogus = ResolveRequest::new("example.com").with_locale("zz").with_currency("zz");
			let bogus = resolve(&registry, &bogus);
			prop_assert_eq!(&bogus.matched().unwrap().locale, &locales[0]);
			prop_assert_eq!(&bogus.matched().unwrap().currency, &currencies[0]);
		}

		/// A valid currency override never disturbs an invalid locale override.
		#[test]
		fn overrides_do_not_interact(
			locales in distinct_triple("[a-z]{2}_[A-Z]{2}"),
			currencies in distinct_triple("[a-z]{3}"),
			pick in 0usize..3,
		) {
			let registry = DomainRegistry::from_domains([(
				"example.com",
				DomainOptions::new(locales.clone(), currencies.clone()),
			)])
			.unwrap();

			let request = ResolveRequest::new("example.com")
				.with_locale("not-a-locale")
				.with_currency(currencies[pick].as_str());
			let resolution = resolve(&registry, &request);
			prop_assert_eq!(&resolution.matched().unwrap().locale, &locales[0]);
			prop_assert_eq!(&resolution.matched().unwrap().currency, &currencies[pick]);
		}
	}
}
