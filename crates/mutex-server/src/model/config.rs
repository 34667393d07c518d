//! Configuration management for the mutex server
//!
//! Sources are layered lowest to highest precedence: built-in defaults, the
//! YAML config file (optional), `MUTEX_*` environment variables, command line.

use clap::Parser;
use config::{Config, Environment, File};

use mutex_common::{
    MutexError,
    constants::{
        DEFAULT_SERVER_ADDRESS, DEFAULT_SERVER_PORT, DEFAULT_SHUTDOWN_TIMEOUT_SECS, ENV_PREFIX,
        LOG_CONSOLE_PROPERTY, LOG_DIR_PROPERTY, LOG_FILE_PROPERTY, LOG_LEVEL_PROPERTY,
        SERVER_ADDRESS_PROPERTY, SERVER_PORT_PROPERTY, SERVER_WORKERS_PROPERTY,
        SHUTDOWN_TIMEOUT_PROPERTY,
    },
};

use crate::startup::LoggingConfig;

pub const DEFAULT_CONFIG_FILE: &str = "conf/application.yml";

/// Command line arguments for the server
#[derive(Debug, Clone, Parser)]
#[command(name = "mutex-server", version, about = "Advisory read/write locks over HTTP")]
pub struct ServerArgs {
    /// Path to the YAML configuration file
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: String,
    /// Address to listen on
    #[arg(short = 'a', long = "address")]
    pub address: Option<String>,
    /// Port to listen on
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,
    /// Log level (trace, debug, info, warn, error)
    #[arg(long = "log-level")]
    pub log_level: Option<String>,
}

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

fn config_error(e: config::ConfigError) -> MutexError {
    MutexError::Config(e.to_string())
}

impl Configuration {
    /// Parse the process arguments and load configuration
    pub fn new() -> Result<Self, MutexError> {
        Self::load(&ServerArgs::parse())
    }

    pub fn load(args: &ServerArgs) -> Result<Self, MutexError> {
        let mut builder = Config::builder()
            .set_default(SERVER_ADDRESS_PROPERTY, DEFAULT_SERVER_ADDRESS)
            .map_err(config_error)?
            .set_default(SERVER_PORT_PROPERTY, i64::from(DEFAULT_SERVER_PORT))
            .map_err(config_error)?
            .add_source(File::with_name(&args.config_file).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Some(ref v) = args.address {
            builder = builder
                .set_override(SERVER_ADDRESS_PROPERTY, v.as_str())
                .map_err(config_error)?;
        }
        if let Some(v) = args.port {
            builder = builder
                .set_override(SERVER_PORT_PROPERTY, i64::from(v))
                .map_err(config_error)?;
        }
        if let Some(ref v) = args.log_level {
            builder = builder
                .set_override(LOG_LEVEL_PROPERTY, v.as_str())
                .map_err(config_error)?;
        }

        let config = builder.build().map_err(config_error)?;
        let configuration = Configuration { config };
        configuration.validate()?;
        Ok(configuration)
    }

    fn validate(&self) -> Result<(), MutexError> {
        self.config
            .get::<u16>(SERVER_PORT_PROPERTY)
            .map_err(|e| MutexError::Config(format!("invalid {}: {}", SERVER_PORT_PROPERTY, e)))?;

        let level = self.log_level();
        level.parse::<tracing::Level>().map_err(|_| {
            MutexError::Config(format!("invalid {}: '{}'", LOG_LEVEL_PROPERTY, level))
        })?;
        Ok(())
    }

    // ========================================================================
    // Server Configuration
    // ========================================================================

    pub fn server_address(&self) -> String {
        self.config
            .get_string(SERVER_ADDRESS_PROPERTY)
            .unwrap_or(DEFAULT_SERVER_ADDRESS.to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.config
            .get::<u16>(SERVER_PORT_PROPERTY)
            .unwrap_or(DEFAULT_SERVER_PORT)
    }

    /// Worker thread count, `None` for the actix default (one per core)
    pub fn workers(&self) -> Option<usize> {
        self.config
            .get::<usize>(SERVER_WORKERS_PROPERTY)
            .ok()
            .filter(|n| *n > 0)
    }

    pub fn shutdown_timeout_secs(&self) -> u64 {
        self.config
            .get::<u64>(SHUTDOWN_TIMEOUT_PROPERTY)
            .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS)
    }

    // ========================================================================
    // Logging Configuration
    // ========================================================================

    pub fn log_dir(&self) -> Option<String> {
        self.config.get_string(LOG_DIR_PROPERTY).ok()
    }

    pub fn log_level(&self) -> String {
        self.config
            .get_string(LOG_LEVEL_PROPERTY)
            .unwrap_or("info".to_string())
    }

    pub fn log_console_enabled(&self) -> bool {
        self.config.get_bool(LOG_CONSOLE_PROPERTY).unwrap_or(true)
    }

    pub fn log_file_enabled(&self) -> bool {
        self.config.get_bool(LOG_FILE_PROPERTY).unwrap_or(false)
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::from_config(
            self.log_dir(),
            self.log_console_enabled(),
            self.log_file_enabled(),
            self.log_level(),
        )
    }
}
