//! Constants and configuration that are relevant throughout the crate.

mod config;

pub use config::*;

pub const CONFIG_FILENAME: &str = "moji.toml";

/// Environment variable read by the binary to configure log filtering.
pub const LOG_ENV_VAR: &str = "MOJI_LOG";

/// Point size assumed for a match that carries no font.
pub const DEFAULT_POINT_SIZE: f64 = 22.0;

/// Cap height assumed for a match that carries no font.
pub const DEFAULT_CAP_HEIGHT: f64 = 22.0;
