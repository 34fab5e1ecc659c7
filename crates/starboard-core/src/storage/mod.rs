mod config;
pub mod store;

pub use config::{CompletionStyle, Config, LabelsConfig, ProfileConfig};
pub use store::{FileStore, KeyValueStore, MemoryStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/starboard[-dev]/` based on STARBOARD_ENV.
///
/// Set STARBOARD_ENV=dev to use development data directory.
/// STARBOARD_DATA_DIR overrides both and is used as-is.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("STARBOARD_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("STARBOARD_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("starboard-dev")
            } else {
                base_dir.join("starboard")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
