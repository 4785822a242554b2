// Daemon constants (ADR: No magic values)

/// Config file used when `CONVEYOR_CONFIG` is not set
pub const DEFAULT_CONFIG_PATH: &str = "conveyor.toml";

/// Environment variable overriding the config file path
pub const CONFIG_PATH_ENV: &str = "CONVEYOR_CONFIG";

/// Prefix of environment overrides (`CONVEYOR__HANDLERS=orders,emails`)
pub const ENV_PREFIX: &str = "CONVEYOR";

/// Separator between prefix and nested keys in environment overrides
pub const ENV_SEPARATOR: &str = "__";

/// Separator for list values in environment overrides
pub const ENV_LIST_SEPARATOR: &str = ",";

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "conveyor=info";

/// Environment variable selecting `pretty` or `json` stdout logs
pub const LOG_FORMAT_ENV: &str = "CONVEYOR_LOG_FORMAT";

/// Environment variable enabling daily-rotated file logs
pub const LOG_DIR_ENV: &str = "CONVEYOR_LOG_DIR";

/// File name prefix of rotated log files
pub const LOG_FILE_PREFIX: &str = "conveyor.log";
