//! Configuration module
//!
//! Loads the user document (`config.toml`) and the boards document
//! (`boards.toml`), resolves their locations and maps dates to board and
//! group ids.

mod check;
mod paths;
mod resolve;
mod types;

pub use check::{check_boards, check_user, DocumentReport};
pub use paths::ConfigPaths;
pub use resolve::{parse_month, DayRef};
pub use types::{BoardsConfig, MonthEntry, UserConfig};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::{PulseError, Result};

const MSG_USER_UNPARSABLE: &str =
    "Unable to parse user configuration file.\nRun `pulselog setup` for error details.";
const MSG_BOARDS_UNPARSABLE: &str =
    "Unable to parse boards configuration file.\nRun `pulselog setup` for error details.";

/// Read and deserialize a TOML document
pub fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    let value = toml::from_str(&content)?;
    Ok(value)
}

/// Load and validate the user document
pub fn load_user(path: &Path) -> Result<UserConfig> {
    let user: UserConfig =
        read_toml(path).map_err(|e| PulseError::config(MSG_USER_UNPARSABLE).with_source(e))?;

    let missing = user.missing_fields();
    if !missing.is_empty() {
        return Err(PulseError::config(MSG_USER_UNPARSABLE)
            .with_source(format!("missing {}", missing.join(", "))));
    }
    Ok(user)
}

/// Load and validate the boards document. `months` may be empty.
pub fn load_boards(path: &Path) -> Result<BoardsConfig> {
    let boards: BoardsConfig =
        read_toml(path).map_err(|e| PulseError::config(MSG_BOARDS_UNPARSABLE).with_source(e))?;

    let missing = boards.missing_fields();
    if !missing.is_empty() {
        return Err(PulseError::config(MSG_BOARDS_UNPARSABLE)
            .with_source(format!("missing {}", missing.join(", "))));
    }
    Ok(boards)
}

/// Load both documents from their resolved locations
pub fn load(paths: &ConfigPaths) -> Result<(UserConfig, BoardsConfig)> {
    let user = load_user(&paths.user)?;
    let boards = load_boards(&paths.boards)?;
    Ok((user, boards))
}

/// Save a document as TOML, creating parent directories if needed
pub fn save<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let toml = toml::to_string_pretty(value)
        .map_err(|e| PulseError::config(format!("Failed to serialize config: {}", e)))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, toml)?;
    Ok(())
}
