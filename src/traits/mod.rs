//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, streaming GET)
//! - [`RenderSurface`] - Destination for prepared chart series

pub mod http;
pub mod render;

pub use http::{ByteStream, Headers, HttpClient, HttpError, Response, StreamResponse};
pub use render::{ChartContent, RenderSurface};
