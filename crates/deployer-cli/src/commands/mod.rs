//! CLI commands

pub mod cluster;
pub mod deploy;
pub mod destroy;
pub mod setup;
pub mod status;
