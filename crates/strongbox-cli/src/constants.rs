//! Constants used throughout the CLI.

/// Environment variable holding the master password for non-interactive use.
pub const PASSWORD_ENV: &str = "STRONGBOX_PASSWORD";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "STRONGBOX_CONFIG";

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "STRONGBOX_LOG";

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const FAILURE: i32 = 1;

    /// Resource not found (config, vault, record).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong master password).
    pub const AUTH_FAILED: i32 = 5;

    /// Vault file is corrupt or from an unsupported format.
    pub const INTEGRITY_FAILED: i32 = 6;
}
