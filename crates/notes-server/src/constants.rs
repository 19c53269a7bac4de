//! Constants used throughout the server.

/// Built-in defaults, used when neither the CLI nor the config file sets a value.
pub mod defaults {
    /// Listen address for the HTTP API.
    pub const LISTEN_ADDR: &str = "0.0.0.0:3000";

    /// Log level when `RUST_LOG` is unset.
    pub const LOG_LEVEL: &str = "info";

    /// Maximum accepted request body (64 KiB).
    pub const MAX_BODY_BYTES: usize = 64 * 1024;

    /// Database filename inside the data directory.
    pub const DATABASE_FILENAME: &str = "notes.sqlite3";
}

/// Exit codes for the server binary.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Config file or database could not be used.
    pub const CONFIG_FAILED: i32 = 6;
}
