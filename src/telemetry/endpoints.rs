//! Backend paths, relative to the base URL.

pub const TOP_SIGNATURES: &str = "/api/stats/top_signatures";
pub const TOP_DNS: &str = "/api/stats/top_dns";
pub const TOP_TLS_SNI: &str = "/api/stats/top_tls_sni";
pub const LATEST_COUNTERS: &str = "/api/stats/latest_counters";
pub const CAPTURE_HISTORY: &str = "/api/stats/capture_history";

pub const COMMAND: &str = "/api/command";
pub const RULE_UPDATE: &str = "/api/run-suricata-update";

pub const EVE_JSON_LOG: &str = "/logs/eve.json";
pub const SURICATA_LOG: &str = "/logs/suricata.log";

pub const ENABLE_CONF: &str = "enable.conf";
pub const DISABLE_CONF: &str = "disable.conf";
pub const MAIN_CONFIG: &str = "suricata.yaml";

/// `GET`/`POST` path for a config file.
pub fn config(filename: &str) -> String {
    format!("/api/config/{}", urlencoding::encode(filename))
}

/// Live log subscription path for a log name.
pub fn log_stream(logfile: &str) -> String {
    format!("/api/logs/stream?logfile={}", urlencoding::encode(logfile))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path() {
        assert_eq!(config(ENABLE_CONF), "/api/config/enable.conf");
        assert_eq!(config("a b"), "/api/config/a%20b");
    }

    #[test]
    fn test_log_stream_path() {
        assert_eq!(log_stream("eve"), "/api/logs/stream?logfile=eve");
        assert_eq!(log_stream("suricata"), "/api/logs/stream?logfile=suricata");
    }
}
