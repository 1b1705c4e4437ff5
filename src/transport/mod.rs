//! HTTP client wrapper: fixed timeout, interceptor hooks, uniform verbs.

pub mod http;
pub mod types;

pub use http::{HttpClient, TransportError};
pub use types::{Method, Payload, RequestConfig, RequestDescriptor, ResponseEnvelope, ResponseType};
