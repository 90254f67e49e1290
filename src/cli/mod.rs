//! Command-line interface: flag parsing and the commands that exit before
//! the dashboard starts.

pub mod args;

pub use args::{parse_args, CliCommand, CliOverrides, USAGE};

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }
}
