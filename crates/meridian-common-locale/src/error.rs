// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Registry validation errors.

/// Reasons a domain mapping is rejected at startup.
///
/// Every variant is fatal: a registry is either fully valid or never built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	#[error("no domains supplied in config")]
	EmptyRegistry,

	#[error("invalid domain supplied in config: {domain:?}")]
	InvalidDomainEntry { domain: String },

	#[error("no locales for domain {domain}")]
	MissingLocales { domain: String },

	#[error("no currencies for domain {domain}")]
	MissingCurrencies { domain: String },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
