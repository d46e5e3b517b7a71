// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale resolution configuration section.

use meridian_common_locale::{AttachTarget, Conventions, FallbackPolicy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LocaleConfigLayer {
	pub locale_param: Option<String>,
	pub currency_param: Option<String>,
	pub locale_header: Option<String>,
	pub currency_header: Option<String>,
	pub attach: Option<AttachTarget>,
	pub fallback: Option<FallbackPolicy>,
}

impl LocaleConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.locale_param.is_some() {
			self.locale_param = other.locale_param;
		}
		if other.currency_param.is_some() {
			self.currency_param = other.currency_param;
		}
		if other.locale_header.is_some() {
			self.locale_header = other.locale_header;
		}
		if other.currency_header.is_some() {
			self.currency_header = other.currency_header;
		}
		if other.attach.is_some() {
			self.attach = other.attach;
		}
		if other.fallback.is_some() {
			self.fallback = other.fallback;
		}
	}

	pub fn finalize(self) -> LocaleConfig {
		let defaults = Conventions::default();
		LocaleConfig {
			conventions: Conventions {
				locale_param: self.locale_param.unwrap_or(defaults.locale_param),
				currency_param: self.currency_param.unwrap_or(defaults.currency_param),
				locale_header: self.locale_header.unwrap_or(defaults.locale_header),
				currency_header: self.currency_header.unwrap_or(defaults.currency_header),
			},
			attach: self.attach.unwrap_or_default(),
			fallback: self.fallback.unwrap_or_default(),
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LocaleConfig {
	pub conventions: Conventions,
	pub attach: AttachTarget,
	pub fallback: FallbackPolicy,
}
