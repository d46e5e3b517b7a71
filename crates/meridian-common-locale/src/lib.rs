// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale and currency resolution for Meridian.
//!
//! A [`DomainRegistry`] maps each configured host to the locales and
//! currencies it supports. Per request, [`resolve`] matches the host against
//! the registry and picks the domain defaults, replaced by request overrides
//! (`_l` / `_c` by convention) when those are listed for the domain.
//!
//! Resolution is a pure in-memory function. A host that matches no domain is
//! reported as [`Resolution::NoMatch`]; callers decide what to attach using
//! the single [`FallbackPolicy`].
//!
//! # Example
//!
//! ```
//! use meridian_common_locale::{DomainOptions, DomainRegistry, Resolver};
//!
//! let registry = DomainRegistry::from_domains([(
//! 	"shop.example.com",
//! 	DomainOptions::new(["en_GB", "fr_FR"], ["gbp", "eur"]),
//! )])?;
//! let resolver = Resolver::new(registry);
//!
//! let resolved = resolver
//! 	.resolve_or_fallback("https://shop.example.com", Some("_c=eur"))
//! 	.unwrap();
//! assert_eq!(resolved.locale, "en_GB");
//! assert_eq!(resolved.currency, "eur");
//! # Ok::<(), meridian_common_locale::RegistryError>(())
//! ```

mod error;
mod host;
mod policy;
mod registry;
mod resolve;

pub use error::{RegistryError, Result};
pub use host::extract_domain_key;
pub use policy::{
	AttachTarget, Conventions, FallbackPolicy, DEFAULT_CURRENCY_HEADER, DEFAULT_CURRENCY_PARAM,
	DEFAULT_LOCALE_HEADER, DEFAULT_LOCALE_PARAM, SYSTEM_DEFAULT_CURRENCY, SYSTEM_DEFAULT_LOCALE,
};
pub use registry::{validate, DomainOptions, DomainRegistry, RawDomains};
pub use resolve::{resolve, ResolveRequest, Resolution, ResolvedLocale, Resolver};
