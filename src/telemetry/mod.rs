//! Typed access to the dashboard backend.
//!
//! [`TelemetryClient`] wraps an [`HttpClient`](crate::traits::HttpClient)
//! and turns every failure into a classified
//! [`FetchFailure`](crate::error::FetchFailure).

pub mod client;
pub mod endpoints;
pub mod payloads;

pub use client::TelemetryClient;
pub use payloads::{
    CaptureHistory, CommandReply, CommandRequest, ConfigFile, LatestCounters, RuleUpdateReply, TopN,
};
