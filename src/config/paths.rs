use std::path::PathBuf;

use crate::error::{PulseError, Result};

const APP_DIR: &str = "pulselog";
const USER_FILE: &str = "config.toml";
const BOARDS_FILE: &str = "boards.toml";

/// Overrides the user document location (used by tests and scripted setups)
pub const USER_FILE_ENV: &str = "PULSELOG_CONFIG_FILE";
/// Overrides the boards document location
pub const BOARDS_FILE_ENV: &str = "PULSELOG_BOARDS_FILE";

/// Locations of the two configuration documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub user: PathBuf,
    pub boards: PathBuf,
}

impl ConfigPaths {
    /// Resolve the user document under the OS config directory and the
    /// boards document under the OS data directory, honouring overrides.
    pub fn resolve() -> Result<Self> {
        let user = match env_path(USER_FILE_ENV) {
            Some(path) => path,
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR).join(USER_FILE))
                .ok_or_else(|| {
                    PulseError::config(
                        "Unable to locate user configuration file. Please send a bug report to the developer.",
                    )
                })?,
        };

        let boards = match env_path(BOARDS_FILE_ENV) {
            Some(path) => path,
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR).join(BOARDS_FILE))
                .ok_or_else(|| {
                    PulseError::config(
                        "Unable to locate boards configuration file. Please send a bug report to the developer.",
                    )
                })?,
        };

        Ok(Self { user, boards })
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
