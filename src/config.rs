//! Generator configuration.
//!
//! Every option can be given as a flag or through the environment. A flag wins
//! over its variable.
//!
//! | Flag | Environment | Required |
//! |------|-------------|----------|
//! | `--dbuser` | `DB_USER` | yes |
//! | `--dbpass` | `DB_PASSWORD` | no |
//! | `--dbhost` | `DB_HOST` | yes |
//! | `--dbport` | `DB_PORT` | yes |
//! | `--dbname` | `DB_NAME` | yes |
//! | `--output` | `OUTPUT_DIR` | yes |
//!
//! Empty values count as missing. Validation happens in
//! [`Cli::into_config`], before any I/O.

use clap::Parser;
use sqlx::mysql::MySqlConnectOptions;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Raw command-line / environment input, before validation.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "novel-gen")]
#[command(version)]
#[command(about = "Publish novel chapters from MySQL as a static HTML site")]
#[command(long_about = "\
Publish novel chapters from MySQL as a static HTML site

Reads every chapter joined with its novel and volume, then writes:

  <output>/
  ├── index.html                  # All novels and their chapters
  ├── style.css                   # Copied from ./static
  └── <novel-slug>/
      ├── v1-c1.html              # Plain variant
      ├── v1-c1-styled.html       # Bulma-styled variant
      └── ...

The output directory is never cleared; files from earlier runs remain.
Log verbosity follows RUST_LOG (default: info).")]
pub struct Cli {
    /// Database username
    #[arg(long = "dbuser", env = "DB_USER")]
    pub db_user: Option<String>,

    /// Database password (may be empty)
    #[arg(long = "dbpass", env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Database host
    #[arg(long = "dbhost", env = "DB_HOST")]
    pub db_host: Option<String>,

    /// Database port
    #[arg(long = "dbport", env = "DB_PORT")]
    pub db_port: Option<String>,

    /// Database name
    #[arg(long = "dbname", env = "DB_NAME")]
    pub db_name: Option<String>,

    /// Output directory for the static site
    #[arg(long = "output", env = "OUTPUT_DIR")]
    pub output: Option<PathBuf>,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub db_user: String,
    pub db_password: String,
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub output_dir: PathBuf,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl Cli {
    /// Check required fields and convert to a [`GeneratorConfig`].
    pub fn into_config(self) -> Result<GeneratorConfig, ConfigError> {
        let user = non_empty(self.db_user);
        let host = non_empty(self.db_host);
        let port = non_empty(self.db_port);
        let name = non_empty(self.db_name);

        let (Some(db_user), Some(db_host), Some(port), Some(db_name)) = (user, host, port, name)
        else {
            return Err(ConfigError::Validation(
                "database credentials (user, host, port, name) are required".into(),
            ));
        };

        let output_dir = self
            .output
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| ConfigError::Validation("output directory is required".into()))?;

        let db_port = port.parse::<u16>().map_err(|_| {
            ConfigError::Validation(format!("database port must be a number, got '{port}'"))
        })?;

        Ok(GeneratorConfig {
            db_user,
            db_password: self.db_password.unwrap_or_default(),
            db_host,
            db_port,
            db_name,
            output_dir,
        })
    }
}

impl GeneratorConfig {
    /// Connection options for the MySQL chapter source.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .database(&self.db_name);
        if self.db_password.is_empty() {
            options
        } else {
            options.password(&self.db_password)
        }
    }

    /// `user@host:port/name`, safe to log.
    pub fn display_target(&self) -> String {
        format!(
            "{}@{}:{}/{}",
            self.db_user, self.db_host, self.db_port, self.db_name
        )
    }
}
