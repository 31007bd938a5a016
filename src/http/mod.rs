//! HTTP surface of the gateway.
//!
//! # Data Flow
//! ```text
//! POST /api/contact | /api/newsletter
//!     → server.rs (middleware: timeout, body limit, request ID, trace)
//!     → identity.rs (derive throttling identity from headers)
//!     → handlers.rs (admission pipeline, see module docs)
//!     → response.rs (JSON success/error shapes)
//! ```

pub mod handlers;
pub mod identity;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer};
