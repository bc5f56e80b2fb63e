//! Polls site library.
//!
//! Route table, pattern engine and HTTP dispatch for the polls app.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod polls;
pub mod routing;

pub use config::schema::SiteConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
