// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The domain registry: which locales and currencies each host supports.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};
use crate::host::extract_domain_key;

/// Supported locales and currencies for a single domain.
///
/// The first entry of each list is the domain's default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainOptions {
	#[serde(default)]
	pub locales: Vec<String>,
	#[serde(default)]
	pub currencies: Vec<String>,
}

impl DomainOptions {
	pub fn new<L, C>(locales: L, currencies: C) -> Self
	where
		L: IntoIterator,
		L::Item: Into<String>,
		C: IntoIterator,
		C::Item: Into<String>,
	{
		Self {
			locales: locales.into_iter().map(Into::into).collect(),
			currencies: currencies.into_iter().map(Into::into).collect(),
		}
	}

	/// The default locale, `None` only for an unvalidated entry.
	pub fn default_locale(&self) -> Option<&str> {
		self.locales.first().map(String::as_str)
	}

	/// The default currency, `None` only for an unvalidated entry.
	pub fn default_currency(&self) -> Option<&str> {
		self.currencies.first().map(String::as_str)
	}

	/// Exact, case-sensitive membership.
	pub fn supports_locale(&self, locale: &str) -> bool {
		self.locales.iter().any(|l| l == locale)
	}

	/// Exact, case-sensitive membership.
	pub fn supports_currency(&self, currency: &str) -> bool {
		self.currencies.iter().any(|c| c == currency)
	}
}

/// Domain mapping as supplied by configuration, before validation.
///
/// A `None` value stands for a domain key declared without any options.
pub type RawDomains = BTreeMap<String, Option<DomainOptions>>;

/// Check a candidate mapping, reporting the first invalid entry in key order.
///
/// Keys must already be in the form [`extract_domain_key`] produces (no
/// scheme, port, brackets or surrounding whitespace); any other key could
/// never be matched by a request.
pub fn validate(domains: &RawDomains) -> Result<()> {
	if domains.is_empty() {
		return Err(RegistryError::EmptyRegistry);
	}

	for (domain, options) in domains {
		let options = match options {
			Some(options) if is_lookup_key(domain) => options,
			_ => {
				return Err(RegistryError::InvalidDomainEntry {
					domain: domain.clone(),
				})
			}
		};

		if options.locales.is_empty() {
			return Err(RegistryError::MissingLocales {
				domain: domain.clone(),
			});
		}

		if options.currencies.is_empty() {
			return Err(RegistryError::MissingCurrencies {
				domain: domain.clone(),
			});
		}
	}

	Ok(())
}

fn is_lookup_key(domain: &str) -> bool {
	!domain.trim().is_empty() && extract_domain_key(domain) == domain
}

/// Immutable, validated mapping from domain key to [`DomainOptions`].
///
/// Built once at startup and shared read-only (typically behind an `Arc`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRegistry {
	domains: BTreeMap<String, DomainOptions>,
}

impl DomainRegistry {
	/// Validate `domains` and build the registry.
	#[tracing::instrument(level = "debug", skip(domains), fields(count = domains.len()))]
	pub fn new(domains: RawDomains) -> Result<Self> {
		validate(&domains)?;

		let domains: BTreeMap<String, DomainOptions> = domains
			.into_iter()
			.filter_map(|(domain, options)| options.map(|o| (domain, o)))
			.collect();

		tracing::debug!("domain registry built");
		Ok(Self { domains })
	}

	/// Convenience constructor for mappings where every entry has options.
	pub fn from_domains<I, K>(domains: I) -> Result<Self>
	where
		I: IntoIterator<Item = (K, DomainOptions)>,
		K: Into<String>,
	{
		Self::new(
			domains
				.into_iter()
				.map(|(domain, options)| (domain.into(), Some(options)))
				.collect(),
		)
	}

	/// Exact-key lookup. No prefix, suffix or case folding.
	pub fn lookup(&self, domain: &str) -> Option<&DomainOptions> {
		self.domains.get(domain)
	}

	pub fn len(&self) -> usize {
		self.domains.len()
	}

	pub fn is_empty(&self) -> bool {
		self.domains.is_empty()
	}

	/// Registered domains in key order.
	pub fn domains(&self) -> impl Iterator<Item = (&str, &DomainOptions)> {
		self.domains.iter().map(|(k, v)| (k.as_str(), v))
	}
}

impl TryFrom<RawDomains> for DomainRegistry {
	type Error = RegistryError;

	fn try_from(domains: RawDomains) -> Result<Self> {
		Self::new(domains)
	}
}

impl fmt::Display for DomainRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "domains=[")?;
		for (i, domain) in self.domains.keys().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "{domain}")?;
		}
		write!(f, "]")
	}
}
