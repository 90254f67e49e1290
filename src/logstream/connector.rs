//! Opening live log subscriptions.

use futures::StreamExt;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::app::AppMessage;
use crate::logstream::source::LogSource;
use crate::sse::message_stream;
use crate::telemetry::TelemetryClient;

/// What the transport reports about a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// The server accepted the subscription.
    Opened,
    /// One message payload, in arrival order.
    Message(String),
    /// The subscription is over: could not open, dropped, or ended.
    Failed(String),
}

/// Reason reported when the server ends the body cleanly.
pub const CLOSED_BY_SERVER: &str = "stream closed by server";

/// A live subscription. Dropping it does not close it; call `close`.
pub trait StreamConnection: Send {
    fn close(&mut self);
}

/// Opens subscriptions. Events for the subscription must be delivered
/// tagged with `generation`.
pub trait StreamConnector {
    fn open(&mut self, source: LogSource, generation: u64) -> Box<dyn StreamConnection>;
}

/// Production connector: one tokio task per subscription, forwarding SSE
/// data payloads as [`AppMessage::Stream`].
pub struct SseConnector {
    client: TelemetryClient,
    tx: UnboundedSender<AppMessage>,
}

impl SseConnector {
    pub fn new(client: TelemetryClient, tx: UnboundedSender<AppMessage>) -> Self {
        Self { client, tx }
    }
}

impl StreamConnector for SseConnector {
    fn open(&mut self, source: LogSource, generation: u64) -> Box<dyn StreamConnection> {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let handle = tokio::spawn(run_subscription(client, source, generation, tx));
        Box::new(TaskConnection {
            handle: Some(handle),
        })
    }
}

struct TaskConnection {
    handle: Option<JoinHandle<()>>,
}

impl StreamConnection for TaskConnection {
    fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Drive one subscription to completion.
///
/// Always ends with exactly one `Failed` event unless the receiver goes
/// away or the task is aborted first.
pub async fn run_subscription(
    client: TelemetryClient,
    source: LogSource,
    generation: u64,
    tx: UnboundedSender<AppMessage>,
) {
    let send = |event: StreamEvent| tx.send(AppMessage::Stream { generation, event }).is_ok();

    let response = match client.open_log_stream(source.query_name()).await {
        Ok(response) => response,
        Err(failure) => {
            warn!("could not open {} stream: {}", source, failure.describe());
            send(StreamEvent::Failed(failure.reason));
            return;
        }
    };

    info!("{} stream open (generation {})", source, generation);
    if !send(StreamEvent::Opened) {
        return;
    }

    let mut messages = Box::pin(message_stream(response.body));
    while let Some(item) = messages.next().await {
        match item {
            Ok(message) => {
                if !send(StreamEvent::Message(message.data)) {
                    debug!("app gone, dropping {} stream", source);
                    return;
                }
            }
            Err(e) => {
                warn!("{} stream failed: {}", source, e);
                send(StreamEvent::Failed(e.to_string()));
                return;
            }
        }
    }

    info!("{} stream ended by server", source);
    send(StreamEvent::Failed(CLOSED_BY_SERVER.to_string()));
}
