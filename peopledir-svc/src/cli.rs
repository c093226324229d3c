//! Command-line arguments
//!
//! Each flag can also come from its environment variable. Flags left unset
//! fall through to the config file and then to compiled defaults.

use clap::Parser;
use peopledir_common::{Result, Settings};
use std::path::PathBuf;

/// Command-line arguments for peopledir-svc
#[derive(Parser, Debug)]
#[command(name = "peopledir-svc")]
#[command(about = "Person directory with name-based demographic enrichment")]
#[command(version)]
pub struct Args {
    /// TOML config file
    #[arg(short, long, env = "PEOPLEDIR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, env = "PEOPLEDIR_BIND")]
    pub bind: Option<String>,

    /// SQLite database file
    #[arg(long, env = "PEOPLEDIR_DB")]
    pub database: Option<PathBuf>,

    /// Maximum pooled database connections
    #[arg(long, env = "PEOPLEDIR_DB_MAX_CONN")]
    pub db_max_connections: Option<u32>,

    /// tracing filter used when RUST_LOG is unset
    #[arg(long, env = "PEOPLEDIR_LOG")]
    pub log_level: Option<String>,
}

impl Args {
    /// Layer these arguments over the config file and defaults
    pub fn into_settings(self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;

        if let Some(bind) = self.bind {
            settings.bind_addr = bind;
        }
        if let Some(database) = self.database {
            settings.database_path = database;
        }
        if let Some(max) = self.db_max_connections {
            settings.db_max_connections = max;
        }
        if let Some(level) = self.log_level {
            settings.log_level = level;
        }

        settings.validate()?;
        Ok(settings)
    }
}
