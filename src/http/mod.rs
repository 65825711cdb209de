//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all route)
//!     → handler.rs (state machine per request)
//!     → request.rs (clone inbound request for the upstream)
//!     → [transport: request inspection, forward]
//!     → [response inspection]
//!     → response.rs (rejection, gateway error or delivered response)
//!     → Send to client
//! ```

pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use server::{AppState, FirewallServer};
