//! Tailable log sources.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogSource {
    /// Structured `eve.json` event log
    Eve,
    /// Plain-text `suricata.log`
    SuricataText,
}

impl LogSource {
    pub const ALL: [LogSource; 2] = [LogSource::Eve, LogSource::SuricataText];

    /// Value of the `logfile` query parameter.
    pub fn query_name(&self) -> &'static str {
        match self {
            LogSource::Eve => "eve",
            LogSource::SuricataText => "suricata",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            LogSource::Eve => "eve.json",
            LogSource::SuricataText => "suricata.log",
        }
    }
}

impl fmt::Display for LogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

impl FromStr for LogSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eve" | "eve.json" => Ok(LogSource::Eve),
            "suricata" | "suricata-text" | "suricata.log" => Ok(LogSource::SuricataText),
            other => Err(format!(
                "unknown log source '{}' (expected 'eve' or 'suricata')",
                other
            )),
        }
    }
}
