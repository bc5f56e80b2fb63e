//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (attach request ID)
//!     → [routing: UrlConf resolves path to view + params]
//!     → polls views (typed parameters)
//!     → response.rs (404 / error bodies)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestId, RequestIdExt, X_REQUEST_ID};
pub use response::AppError;
pub use server::{AppState, HttpServer};
