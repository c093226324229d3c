//! # peopledir common library
//!
//! Shared code for the peopledir service crates:
//! - Error type and result alias
//! - Settings loading (TOML file + compiled defaults)
//! - SQLite initialisation and the `users` schema
//! - Person record models

pub mod config;
pub mod db;
pub mod error;

pub use config::Settings;
pub use error::{Error, Result};
