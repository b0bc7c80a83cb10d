//! Utility modules for console formatting and host queries.
//!
//! Provides:
//! - [`format`] - table rendering and value formatting
//! - [`sysinfo`] - CPU, account and platform details

pub mod format;
pub mod sysinfo;
