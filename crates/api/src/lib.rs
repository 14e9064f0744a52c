//! Remote side of the Scola list screens.
//!
//! Every paginated admin screen talks to an endpoint that accepts
//! `pageNumber`, `pageSize` and an optional `search` parameter and answers
//! with a JSON envelope. This crate owns that boundary:
//!
//! * [`ListParams`]: the request parameters.
//! * [`ListEndpoint`]: async trait implemented by transports and test doubles.
//! * [`HttpEndpoint`]: reqwest-backed transport.
//! * [`EnvelopeFields`]: names of the envelope fields an endpoint uses.
//! * [`screens`]: presets for the document list, student list and class picker.

mod endpoint;
mod envelope;
mod error;
mod http;
mod params;
pub mod screens;

pub use endpoint::ListEndpoint;
pub use envelope::EnvelopeFields;
pub use error::TransportError;
pub use http::HttpEndpoint;
pub use params::ListParams;
pub use serde_json::Value as JsonValue;
