//! surimon - a terminal dashboard for a Suricata sensor
//!
//! This library exposes modules for use in integration tests and benches.

pub mod adapters;
pub mod app;
pub mod charts;
pub mod cli;
pub mod config;
pub mod control;
pub mod error;
pub mod logging;
pub mod logstream;
pub mod sse;
pub mod telemetry;
pub mod traits;
pub mod ui;
