// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP integration for Meridian locale resolution.
//!
//! [`LocaleLayer`] runs the resolver for each request and attaches the
//! resolved locale and currency as headers on the forwarded request and/or
//! the response. Handlers read the same value through [`CurrentLocale`].

mod extract;
mod layer;

pub use extract::CurrentLocale;
pub use layer::{request_host, LayerError, LocaleFuture, LocaleLayer, LocaleService};
