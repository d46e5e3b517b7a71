// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Meridian locale server.
//!
//! This crate serves HTTP with every request passed through the
//! [`LocaleLayer`](meridian_server_locale::LocaleLayer), so downstream
//! handlers and clients see the locale and currency resolved for the
//! request's domain.

pub mod api;
pub mod logging;
pub mod routes;

pub use api::{create_app_state, create_router, AppState};
pub use meridian_server_config::ServerConfig;
