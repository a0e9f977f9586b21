//! Request description subsystem.
//!
//! # Data Flow
//! ```text
//! Request<Body> (from the HTTP layer)
//!     → describer.rs (InboundRequest: method, path, url, client)
//!     → params.rs (header and query snapshots)
//!     → body.rs (POST only: read once, JSON or raw fallback)
//!     → RequestDescription (serialized as the JSON response)
//! ```
//!
//! # Design Decisions
//! - One pure-ish transformation per request; nothing is shared across requests
//! - JSON parse failure selects the fallback branch instead of erroring
//! - `body` is an `Option` skipped during serialization, so "not requested"
//!   and "null" stay distinguishable

pub mod body;
pub mod describer;
pub mod params;

pub use body::{BodyContent, BodyError};
pub use describer::{
    ClientInfo, ConnectionAddrs, InboundRequest, RequestDescriber, RequestDescription, MESSAGE,
};
pub use params::ParamMap;
