// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The mergeable top-level configuration layer.

use meridian_common_locale::RawDomains;
use serde::{Deserialize, Serialize};

use crate::sections::{HttpConfigLayer, LocaleConfigLayer, LoggingConfigLayer};

/// One source's view of the configuration. Unset sections leave lower
/// precedence sources untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServerConfigLayer {
	pub http: Option<HttpConfigLayer>,
	pub logging: Option<LoggingConfigLayer>,
	pub locale: Option<LocaleConfigLayer>,
	/// Replaced wholesale by a higher precedence source, never merged per key.
	pub domains: Option<RawDomains>,
}

impl ServerConfigLayer {
	pub fn merge(&mut self, other: Self) {
		merge_section(&mut self.http, other.http, HttpConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
		merge_section(&mut self.locale, other.locale, LocaleConfigLayer::merge);
		if other.domains.is_some() {
			self.domains = other.domains;
		}
	}
}

fn merge_section<T>(base: &mut Option<T>, other: Option<T>, merge: fn(&mut T, T)) {
	match (base.as_mut(), other) {
		(Some(base), Some(other)) => merge(base, other),
		(None, Some(other)) => *base = Some(other),
		(_, None) => {}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use meridian_common_locale::DomainOptions;

	#[test]
	fn test_merge_fills_missing_sections() {
		let mut base = ServerConfigLayer::default();
		base.merge(ServerConfigLayer {
			http: Some(HttpConfigLayer {
				host: None,
				port: Some(9000),
			}),
			..Default::default()
		});
		assert_eq!(base.http.unwrap().port, Some(9000));
	}

	#[test]
	fn test_merge_keeps_fields_within_section() {
		let mut base = ServerConfigLayer {
			http: Some(HttpConfigLayer {
				host: Some("127.0.0.1".to_string()),
				port: Some(3000),
			}),
			..Default::default()
		};
		base.merge(ServerConfigLayer {
			http: Some(HttpConfigLayer {
				host: None,
				port: Some(4000),
			}),
			..Default::default()
		});
		let http = base.http.unwrap();
		assert_eq!(http.host.as_deref(), Some("127.0.0.1"));
		assert_eq!(http.port, Some(4000));
	}

	#[test]
	fn test_domains_replaced_wholesale() {
		let mut first = RawDomains::new();
		first.insert(
			"a.example".to_string(),
			Some(DomainOptions::new(["en_US"], ["usd"])),
		);
		let mut second = RawDomains::new();
		second.insert(
			"b.example".to_string(),
			Some(DomainOptions::new(["fr_FR"], ["eur"])),
		);

		let mut base = ServerConfigLayer {
			domains: Some(first),
			..Default::default()
		};
		base.merge(ServerConfigLayer {
			domains: Some(second),
			..Default::default()
		});

		let domains = base.domains.unwrap();
		assert_eq!(domains.len(), 1);
		assert!(domains.contains_key("b.example"));
	}

	#[test]
	fn test_merge_none_domains_preserves_base() {
		let mut domains = RawDomains::new();
		domains.insert(
			"a.example".to_string(),
			Some(DomainOptions::new(["en_US"], ["usd"])),
		);
		let mut base = ServerConfigLayer {
			domains: Some(domains),
			..Default::default()
		};
		base.merge(ServerConfigLayer::default());
		assert!(base.domains.is_some());
	}
}
