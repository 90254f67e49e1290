//! Operator control actions: sensor commands, the config save chain, the
//! non-streaming log snapshot and `$EDITOR` hand-off.

pub mod commands;
pub mod editor;
pub mod rules;
pub mod snapshot;

pub use commands::{command_status, run_command, SensorCommand};
pub use editor::{edit_in_editor, EditTarget};
pub use rules::{save_main_config, save_rules_and_apply, ChainOutcome, RuleLists};
pub use snapshot::{fetch_log_snapshot, LogSnapshot, SnapshotError};
