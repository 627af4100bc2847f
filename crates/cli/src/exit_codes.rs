//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain     | Description                                |
//! |---------|------------|--------------------------------------------|
//! | 0       | Universal  | Success                                    |
//! | 1       | Universal  | General error (unspecified)                |
//! | 2       | Universal  | CLI usage error (bad args, missing file)   |
//! | 3-9     | analyze    | Input, config, output and result codes     |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Analyze (3-9)
// =============================================================================

/// Stock or threshold file could not be read or parsed.
pub const EXIT_INPUT: u8 = 3;

/// Config file invalid (TOML syntax or validation failure).
pub const EXIT_INVALID_CONFIG: u8 = 4;

/// Export or report file could not be written.
pub const EXIT_OUTPUT: u8 = 5;

/// One of the two datasets has no rows; nothing to reconcile.
pub const EXIT_EMPTY_INPUT: u8 = 6;

/// `--strict` and at least one item is below its threshold.
pub const EXIT_ALERTS: u8 = 7;
