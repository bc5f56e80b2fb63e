//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → urlconf.rs (strip leading '/', strip mount prefix)
//!     → router.rs (ordered scan of the route table)
//!     → matcher.rs (match pattern components, run converters)
//!     → Return: ResolverMatch (route + typed params) or None
//!
//! Route compilation (at startup):
//!     (pattern, handler, name) declarations
//!     → pattern.rs (parse placeholders, pick converters)
//!     → reject duplicate names
//!     → freeze as immutable RouteTable
//!
//! Reversal:
//!     "namespace:name" + params → pattern.rs (fill placeholders) → path
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex (character-class converters with backtracking)
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)

pub mod converter;
pub mod matcher;
pub mod params;
pub mod pattern;
pub mod router;
pub mod urlconf;

pub use converter::{Converter, ParamValue};
pub use params::PathParams;
pub use pattern::{PatternError, ReverseMismatch, RoutePattern};
pub use router::{ResolverMatch, ReverseError, Route, RouteError, RouteTable};
pub use urlconf::UrlConf;
