//! Adapters over the external transaction and profile sources.

pub mod config_profile;
pub mod file;
pub mod http;
