//! HTTP request-introspection service.

pub mod config;
pub mod describe;
pub mod docs;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::EchoConfig;
pub use describe::{RequestDescriber, RequestDescription};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
