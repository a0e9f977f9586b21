//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign request ID, open span)
//!     → handlers.rs (hello GET/POST)
//!     → describe (build the RequestDescription)
//!     → response.rs (map body read failures to status codes)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id_middleware, RequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
