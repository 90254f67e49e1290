//! Handing config files to the operator's editor.
//!
//! The caller suspends the terminal UI around [`edit_in_editor`]; this
//! module only deals with scratch files and the editor process.

use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::telemetry::endpoints::{DISABLE_CONF, ENABLE_CONF, MAIN_CONFIG};

use super::rules::RuleLists;

/// What is being edited, with its current content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    RuleLists(RuleLists),
    MainConfig(String),
}

impl EditTarget {
    pub fn describe(&self) -> &'static str {
        match self {
            EditTarget::RuleLists(_) => "rule lists",
            EditTarget::MainConfig(_) => MAIN_CONFIG,
        }
    }
}

/// `$VISUAL`, then `$EDITOR`, then `vi`.
pub fn editor_command() -> String {
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string())
}

/// Open `target` in the editor and wait for it.
///
/// Returns the edited target, or `None` when the editor exited with an
/// error status or nothing changed.
pub fn edit_in_editor(target: &EditTarget) -> io::Result<Option<EditTarget>> {
    let dir = tempfile::Builder::new().prefix("surimon-edit").tempdir()?;

    let files: Vec<(&str, &str)> = match target {
        EditTarget::RuleLists(lists) => vec![
            (ENABLE_CONF, lists.enable.as_str()),
            (DISABLE_CONF, lists.disable.as_str()),
        ],
        EditTarget::MainConfig(content) => vec![(MAIN_CONFIG, content.as_str())],
    };
    let paths: Vec<_> = files.iter().map(|(name, _)| dir.path().join(name)).collect();
    for ((_, content), path) in files.iter().zip(&paths) {
        fs::write(path, content)?;
    }

    if !run_editor(&editor_command(), &paths)? {
        info!("editor exited with an error, discarding edits");
        return Ok(None);
    }

    let edited = match target {
        EditTarget::RuleLists(_) => EditTarget::RuleLists(RuleLists {
            enable: fs::read_to_string(&paths[0])?,
            disable: fs::read_to_string(&paths[1])?,
        }),
        EditTarget::MainConfig(_) => EditTarget::MainConfig(fs::read_to_string(&paths[0])?),
    };

    if &edited == target {
        debug!("{} unchanged", target.describe());
        return Ok(None);
    }
    Ok(Some(edited))
}

/// Run the editor command (which may carry its own arguments, e.g.
/// `code -w`) on `paths`. Returns whether it exited successfully.
fn run_editor(command: &str, paths: &[impl AsRef<Path>]) -> io::Result<bool> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty editor command"))?;

    debug!("launching editor {}", command);
    let status = Command::new(program)
        .args(parts)
        .args(paths.iter().map(AsRef::as_ref))
        .status()?;
    Ok(status.success())
}
