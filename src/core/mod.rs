//! Workflows behind the CLI commands. Each works on a `&dyn Store`, so the
//! same logic runs against the local database and the remote project.

pub mod achievements;
pub mod alerts;
pub mod backup;
pub mod calculator;
pub mod employer;
pub mod entry;
pub mod import;
pub mod log;
pub mod profile;
pub mod security;
pub mod shift;
pub mod stats;
pub mod subscription;
