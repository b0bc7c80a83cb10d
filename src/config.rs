//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.

// =============================================================================
// Session Messages
// =============================================================================

/// Username shown in banners when `--username` is not given.
pub const DEFAULT_USERNAME: &str = "Anonymous";

/// Printed for unknown commands and malformed arguments.
pub const INVALID_INPUT_MSG: &str = "Invalid input";

/// Printed for every other failure.
pub const OPERATION_FAILED_MSG: &str = "Operation failed";

/// `add` on a path that already exists.
pub const FILE_EXISTS_MSG: &str = "File already exists in the working directory";

/// `cp`/`mv`/`compress`/`decompress` whose target already exists.
pub const TARGET_EXISTS_MSG: &str = "File already exists in the new directory";

/// `mv` that kept its source because the destination was occupied.
pub const MOVE_ABORTED_MSG: &str = "Source file was kept because nothing was moved";

pub fn welcome_message(username: &str) -> String {
    format!("Welcome to the File Manager, {}!", username)
}

pub fn farewell_message(username: &str) -> String {
    format!("Thank you for using File Manager, {}, goodbye!", username)
}

pub fn cwd_message(cwd: &std::path::Path) -> String {
    format!("You are currently in {}", cwd.display())
}

// =============================================================================
// Streaming
// =============================================================================

/// Upper bound on the bytes pulled from a source per pipeline step.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Number of input lines buffered while a command is still running.
pub const INPUT_QUEUE_DEPTH: usize = 64;

// =============================================================================
// Compression
// =============================================================================

/// Extension appended by `compress` and required by `decompress`.
pub const COMPRESSED_EXTENSION: &str = "br";

/// Brotli quality level (0-11).
pub const BROTLI_QUALITY: u32 = 11;

/// Brotli sliding window size as log2 (10-24).
pub const BROTLI_LG_WINDOW: u32 = 22;

/// Internal buffer size of the Brotli encoder/decoder.
pub const BROTLI_BUFFER_SIZE: usize = 4096;

// =============================================================================
// Hashing
// =============================================================================

/// Key for the `hash` command's HMAC-SHA256.
///
/// This is a checksum key shipped in the binary. Do not reuse it for anything
/// that needs secrecy.
pub const HASH_KEY: &[u8] = b"I love cupcakes";

// =============================================================================
// Logging
// =============================================================================

/// Filter used when neither `--log-level` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";
