//! Command-line interface module
//!
//! One module per command. Each exposes a `run` entry point used by `main`
//! and a handler that takes its configuration, board service and output
//! explicitly:
//! - setup: Check configuration files, writing a user template if missing
//! - update: Download the latest boards configuration
//! - create-one: Log hours for a day
//! - get-board-items / get-board-item-summary: List or total a month's pulses
//! - pulse-link: Print the link of a pulse
//! - admin-get-board-by-id: Print a boards.toml stub for a board

pub mod admin;
pub mod create;
pub mod items;
pub mod pulse;
pub mod setup;
pub mod update;

use crate::api::MondayClient;
use crate::config::{self, BoardsConfig, ConfigPaths};
use crate::error::Result;

/// Load both configuration documents and build an API client from them
fn connect() -> Result<(BoardsConfig, MondayClient)> {
    let paths = ConfigPaths::resolve()?;
    let (user, boards) = config::load(&paths)?;
    let client = MondayClient::new(&user, &boards)?;
    Ok((boards, client))
}

#[cfg(test)]
pub(crate) fn sample_boards() -> BoardsConfig {
    toml::from_str(
        r#"
person_column_id = "person"
hours_column_id = "numbers"

[months.2023-09]
board_id = "5064273451"

[months.2023-09.days]
01 = "fri_sep_01"
04 = "mon_sep_04"
05 = "tue_sep_05"
"#,
    )
    .unwrap()
}
