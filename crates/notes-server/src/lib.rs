//! Secret Notes server: HTTP surface, CLI, and configuration over `notes-core`.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod http;
