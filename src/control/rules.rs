//! Saving configuration and the follow-up chain (update, then reload).

use tracing::{info, warn};

use crate::error::{ChainStep, ConfigSaveError, FetchFailure};
use crate::telemetry::endpoints::{DISABLE_CONF, ENABLE_CONF, MAIN_CONFIG};
use crate::telemetry::TelemetryClient;

use super::commands::SensorCommand;

/// Contents of the rule enable / disable lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleLists {
    pub enable: String,
    pub disable: String,
}

impl RuleLists {
    pub async fn fetch(client: &TelemetryClient) -> Result<Self, FetchFailure> {
        let (enable, disable) =
            tokio::join!(client.get_config(ENABLE_CONF), client.get_config(DISABLE_CONF));
        Ok(Self {
            enable: enable?,
            disable: disable?,
        })
    }
}

/// Result of a completed chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainOutcome {
    /// `output_summary` of the rule update, if the backend sent one.
    pub update_summary: Option<String>,
    /// Message returned by the reload command.
    pub reload_message: String,
}

impl ChainOutcome {
    pub fn status_line(&self) -> String {
        match &self.update_summary {
            Some(summary) => format!(
                "Rules saved, updated ({}) and reloaded: {}",
                summary, self.reload_message
            ),
            None => format!("Rules saved, updated and reloaded: {}", self.reload_message),
        }
    }
}

/// Save both lists, then update, then reload.
///
/// The two saves run concurrently and must both succeed. Each later step
/// runs only if the one before it succeeded; the first failing step is
/// reported alone. When both saves fail, `enable.conf` is reported.
pub async fn save_rules_and_apply(
    client: &TelemetryClient,
    lists: &RuleLists,
) -> Result<ChainOutcome, ConfigSaveError> {
    let (enable, disable) = tokio::join!(
        client.save_config(ENABLE_CONF, &lists.enable),
        client.save_config(DISABLE_CONF, &lists.disable),
    );
    enable.map_err(|f| step_failed(ChainStep::SaveEnable, f))?;
    disable.map_err(|f| step_failed(ChainStep::SaveDisable, f))?;
    info!("rule lists saved");

    let update = client
        .run_rule_update()
        .await
        .map_err(|f| step_failed(ChainStep::Update, f))?;
    info!("rule update finished");

    let reload = client
        .send_command(SensorCommand::ReloadRules.name(), None)
        .await
        .map_err(|f| step_failed(ChainStep::Reload, f))?;
    info!("rules reloaded");

    Ok(ChainOutcome {
        update_summary: update.output_summary.filter(|s| !s.is_empty()),
        reload_message: reload.summary(),
    })
}

/// Save `suricata.yaml`. No follow-up steps.
pub async fn save_main_config(client: &TelemetryClient, content: &str) -> Result<(), ConfigSaveError> {
    client
        .save_config(MAIN_CONFIG, content)
        .await
        .map_err(|f| step_failed(ChainStep::SaveMainConfig, f))?;
    info!("{} saved", MAIN_CONFIG);
    Ok(())
}

fn step_failed(step: ChainStep, failure: FetchFailure) -> ConfigSaveError {
    warn!("{} failed: {}", step, failure.describe());
    ConfigSaveError::new(step, failure.reason)
}
