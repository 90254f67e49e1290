//! Wire shapes of the backend's JSON bodies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Ranked `{labels, values}` body of the top-N endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopN {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Decoder counters. Missing counters read as zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DecoderCounters {
    pub pkts: u64,
    pub tcp: u64,
    pub udp: u64,
    pub icmpv4: u64,
    pub icmpv6: u64,
    pub ipv4: u64,
    pub ipv6: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppLayerCounters {
    /// Flow count per application protocol. Non-numeric entries are skipped
    /// by the series builder.
    pub flow: BTreeMap<String, serde_json::Value>,
}

/// Body of `/api/stats/latest_counters`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LatestCounters {
    pub decoder: DecoderCounters,
    pub app_layer: AppLayerCounters,
}

/// Body of `/api/stats/capture_history`. Arrays are index-aligned.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CaptureHistory {
    pub timestamps: Vec<String>,
    pub packets: Vec<f64>,
    pub drops: Vec<f64>,
}

/// `GET /api/config/{filename}` reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub filename: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ConfigWrite<'a> {
    pub content: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandRequest<'a> {
    pub command: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<&'a serde_json::Value>,
}

/// Sensor reply relayed by `POST /api/command`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommandReply {
    #[serde(rename = "return", default)]
    pub return_code: Option<String>,
    /// A string for most commands, a structured object for `iface-list`.
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl CommandReply {
    pub fn is_failed(&self) -> bool {
        self.return_code.as_deref() == Some("FAILED")
    }

    /// The message as display text: strings verbatim, anything else as
    /// compact JSON.
    pub fn message_text(&self) -> Option<String> {
        self.message.as_ref().map(value_text)
    }

    /// Text for the status line after a successful command: the message,
    /// or the whole reply when there is none.
    pub fn summary(&self) -> String {
        self.message_text().unwrap_or_else(|| match &self.return_code {
            Some(code) => code.clone(),
            None => "OK".to_string(),
        })
    }
}

/// `POST /api/run-suricata-update` reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RuleUpdateReply {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub output_summary: Option<String>,
}

impl RuleUpdateReply {
    pub fn succeeded(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

pub(crate) fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
