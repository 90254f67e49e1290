//! Errors of the config save / rule update / reload chain.

use std::fmt;

use thiserror::Error;

/// One step of the follow-up chain run after saving configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStep {
    SaveEnable,
    SaveDisable,
    SaveMainConfig,
    Update,
    Reload,
}

impl ChainStep {
    pub fn label(&self) -> &'static str {
        match self {
            ChainStep::SaveEnable => "saving enable.conf",
            ChainStep::SaveDisable => "saving disable.conf",
            ChainStep::SaveMainConfig => "saving suricata.yaml",
            ChainStep::Update => "rule update",
            ChainStep::Reload => "rule reload",
        }
    }
}

impl fmt::Display for ChainStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The first chain step that failed, with the backend's reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{step} failed: {reason}")]
pub struct ConfigSaveError {
    pub step: ChainStep,
    pub reason: String,
}

impl ConfigSaveError {
    pub fn new(step: ChainStep, reason: impl Into<String>) -> Self {
        Self {
            step,
            reason: reason.into(),
        }
    }
}
