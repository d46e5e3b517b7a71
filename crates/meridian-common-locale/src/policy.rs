// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Edge conventions and the no-match fallback policy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::resolve::ResolvedLocale;

/// Locale substituted when a request matches no configured domain.
pub const SYSTEM_DEFAULT_LOCALE: &str = "en_US";

/// Currency substituted when a request matches no configured domain.
pub const SYSTEM_DEFAULT_CURRENCY: &str = "usd";

pub const DEFAULT_LOCALE_PARAM: &str = "_l";
pub const DEFAULT_CURRENCY_PARAM: &str = "_c";
pub const DEFAULT_LOCALE_HEADER: &str = "Accept-Language";
pub const DEFAULT_CURRENCY_HEADER: &str = "Accept-Currency";

/// Query parameter and header names used at the HTTP edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conventions {
	pub locale_param: String,
	pub currency_param: String,
	pub locale_header: String,
	pub currency_header: String,
}

impl Default for Conventions {
	fn default() -> Self {
		Self {
			locale_param: DEFAULT_LOCALE_PARAM.to_string(),
			currency_param: DEFAULT_CURRENCY_PARAM.to_string(),
			locale_header: DEFAULT_LOCALE_HEADER.to_string(),
			currency_header: DEFAULT_CURRENCY_HEADER.to_string(),
		}
	}
}

/// What the caller attaches when no domain matched.
///
/// This is the only place the no-match behavior is decided; the resolver
/// itself always reports [`Resolution::NoMatch`](crate::Resolution::NoMatch).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
	/// Attach [`SYSTEM_DEFAULT_LOCALE`] and [`SYSTEM_DEFAULT_CURRENCY`].
	#[default]
	SystemDefault,
	/// Attach nothing.
	Unset,
}

impl FallbackPolicy {
	/// The pair this policy substitutes, if any.
	pub fn resolved(&self) -> Option<ResolvedLocale> {
		match self {
			Self::SystemDefault => Some(ResolvedLocale {
				domain: None,
				locale: SYSTEM_DEFAULT_LOCALE.to_string(),
				currency: SYSTEM_DEFAULT_CURRENCY.to_string(),
			}),
			Self::Unset => None,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::SystemDefault => "system_default",
			Self::Unset => "unset",
		}
	}
}

impl fmt::Display for FallbackPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for FallbackPolicy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"system_default" | "default" => Ok(Self::SystemDefault),
			"unset" | "none" => Ok(Self::Unset),
			other => Err(format!("unknown fallback policy '{other}'")),
		}
	}
}

/// Where resolved values are attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachTarget {
	/// The request forwarded to the inner service.
	#[default]
	Request,
	/// The response returned to the client.
	Response,
	Both,
}

impl AttachTarget {
	pub fn request(&self) -> bool {
		matches!(self, Self::Request | Self::Both)
	}

	pub fn response(&self) -> bool {
		matches!(self, Self::Response | Self::Both)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Request => "request",
			Self::Response => "response",
			Self::Both => "both",
		}
	}
}

impl fmt::Display for AttachTarget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for AttachTarget {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"request" => Ok(Self::Request),
			"response" => Ok(Self::Response),
			"both" => Ok(Self::Both),
			other => Err(format!("unknown attach target '{other}'")),
		}
	}
}
