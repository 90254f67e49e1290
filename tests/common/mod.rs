//! Common test utilities for integration tests.
//!
//! Provides telemetry clients pointed at a wiremock server and a fake
//! stream connector that records what the controller asked for.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use surimon::adapters::ReqwestHttpClient;
use surimon::logstream::{LogSource, StreamConnection, StreamConnector};
use surimon::telemetry::TelemetryClient;
use wiremock::MockServer;

/// A client talking to `server` over real HTTP.
pub fn telemetry_for(server: &MockServer) -> TelemetryClient {
    TelemetryClient::new(server.uri(), Arc::new(ReqwestHttpClient::new()))
}

/// Lifecycle events seen by the fake connector, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectorEvent {
    Opened(LogSource, u64),
    Closed(LogSource, u64),
}

pub type ConnectorLog = Arc<Mutex<Vec<ConnectorEvent>>>;

/// Connector that opens nothing and records every open and close.
pub struct RecordingConnector {
    log: ConnectorLog,
}

impl RecordingConnector {
    pub fn new() -> (Self, ConnectorLog) {
        let log = ConnectorLog::default();
        (Self { log: log.clone() }, log)
    }
}

struct RecordingConnection {
    source: LogSource,
    generation: u64,
    open: bool,
    log: ConnectorLog,
}

impl StreamConnection for RecordingConnection {
    fn close(&mut self) {
        if self.open {
            self.open = false;
            self.log
                .lock()
                .unwrap()
                .push(ConnectorEvent::Closed(self.source, self.generation));
        }
    }
}

impl StreamConnector for RecordingConnector {
    fn open(&mut self, source: LogSource, generation: u64) -> Box<dyn StreamConnection> {
        self.log
            .lock()
            .unwrap()
            .push(ConnectorEvent::Opened(source, generation));
        Box::new(RecordingConnection {
            source,
            generation,
            open: true,
            log: self.log.clone(),
        })
    }
}
