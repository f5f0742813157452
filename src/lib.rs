//! # appmeta
//!
//! Fetches mobile application metadata from the Play Store and the App Store
//! and normalizes it into one [`AppInfo`](domain::AppInfo) record.
//!
//! ## Architecture
//!
//! ```text
//! identifier → Resolver → RedirectFetcher (Timer + Transport) → PlayStore | AppStore → AppInfo
//! ```
//!
//! - [`fetcher`]: bounded redirect following under one overall timeout
//! - [`provider`]: per-catalog extraction (HTML selectors, JSON pointers)
//! - [`app`]: the [`Resolver`](app::Resolver) facade and error types
//!
//! ## Quick Start
//!
//! ```bash
//! # Dotted ids go to the Play Store, numeric ids to the App Store
//! appmeta --timeout-ms 2000 resolve com.example.app
//! appmeta --timeout-ms 2000 --token "$TOKEN" resolve 359917414
//! ```
//!
//! ```rust,ignore
//! use appmeta::{Resolver, Settings};
//!
//! let settings = Settings::default().with_timeout(Duration::from_secs(2));
//! let info = Resolver::new(settings)?.resolve("com.example.app").await?;
//! ```

/// Resolver facade and error handling.
///
/// [`Resolver`](app::Resolver) classifies an identifier and routes it to
/// the matching provider.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Caller configuration: timeout, App Store token, provider endpoints.
///
/// Built from [`Settings::default`](config::Settings::default) with
/// `with_*` overrides, or loaded from `~/.config/appmeta/config.toml`.
pub mod config;

/// Canonical [`AppInfo`](domain::AppInfo) record.
pub mod domain;

/// HTTP fetching.
///
/// - [`Transport`](fetcher::Transport): one request, one response
/// - [`HttpTransport`](fetcher::HttpTransport): reqwest-based implementation
/// - [`RedirectFetcher`](fetcher::RedirectFetcher): manual redirects with an overall deadline
pub mod fetcher;

/// Play Store and App Store extraction.
pub mod provider;

/// Pooled countdown timers used for fetch deadlines.
pub mod timer;

pub use app::{AppMetaError, Resolver, Result};
pub use config::Settings;
pub use domain::{AppInfo, Platform};
pub use provider::{fetch_app_store, fetch_play_store};
