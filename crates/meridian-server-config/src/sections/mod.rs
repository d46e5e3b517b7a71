// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections. Each section has a `*ConfigLayer` of optional
//! fields that merges across sources and finalizes into a resolved config.

mod http;
mod locale;
mod logging;

pub use http::{HttpConfig, HttpConfigLayer};
pub use locale::{LocaleConfig, LocaleConfigLayer};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
