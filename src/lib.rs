//! Interactive file-manager shell.
//!
//! Commands typed one per line are dispatched against a [`core::Session`];
//! copies and (de)compression stream through [`core::StreamPipeline`].

pub mod config;
pub mod core;
pub mod models;
pub mod utils;
