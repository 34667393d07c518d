// Shared constants for the mutex service

/// Route answering liveness checks
pub const HEALTH_ROUTE: &str = "/health";

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8080;
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

// Configuration property names
pub const SERVER_ADDRESS_PROPERTY: &str = "server.address";
pub const SERVER_PORT_PROPERTY: &str = "server.port";
pub const SERVER_WORKERS_PROPERTY: &str = "server.workers";
pub const SHUTDOWN_TIMEOUT_PROPERTY: &str = "server.shutdown_timeout_secs";
pub const LOG_DIR_PROPERTY: &str = "logging.dir";
pub const LOG_LEVEL_PROPERTY: &str = "logging.level";
pub const LOG_CONSOLE_PROPERTY: &str = "logging.console";
pub const LOG_FILE_PROPERTY: &str = "logging.file";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "mutex";
