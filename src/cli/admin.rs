use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::api::{BoardService, MondayClient};
use crate::config::{self, parse_month, BoardsConfig, ConfigPaths, MonthEntry};
use crate::error::{PulseError, Result};

/// Month key used when none is given on the command line
const PLACEHOLDER_MONTH: &str = "yyyy-mm";

#[derive(Serialize)]
struct MonthStub<'a> {
    months: BTreeMap<&'a str, MonthEntry>,
}

/// Print a `boards.toml` fragment for a board.
///
/// Only the user document is required: this is how a boards document gets
/// written in the first place.
pub fn run(board_id: u64, month: Option<&str>) -> Result<()> {
    let paths = ConfigPaths::resolve()?;
    let user = config::load_user(&paths.user)?;
    let client = MondayClient::new(&user, &BoardsConfig::default())?;
    let stdout = io::stdout();
    get_board_by_id(&client, board_id, month, &mut stdout.lock())
}

/// Fetch a board, invert its groups into title -> group id and emit a
/// month-shaped stub for manual copy into `boards.toml`. Columns are listed
/// as comments to help fill in `person_column_id` and `hours_column_id`.
pub fn get_board_by_id(
    service: &dyn BoardService,
    board_id: u64,
    month: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    let month = match month {
        Some(month) => parse_month(month)?,
        None => PLACEHOLDER_MONTH.to_string(),
    };
    tracing::debug!(board_id, month = %month, "get_board_by_id");

    let board = service.fetch_board(board_id)?;

    let days: BTreeMap<String, String> = board
        .groups
        .iter()
        .map(|group| (group.title.clone(), group.id.clone()))
        .collect();

    let stub = MonthStub {
        months: BTreeMap::from([(
            month.as_str(),
            MonthEntry {
                board_id: board.id.clone(),
                name: Some(board.name.clone()),
                days,
            },
        )]),
    };
    let toml = toml::to_string_pretty(&stub)
        .map_err(|e| PulseError::config(format!("Failed to serialize board stub: {}", e)))?;

    for column in &board.columns {
        writeln!(out, "# column {} = {:?}", column.id, column.title)?;
    }
    if !board.columns.is_empty() {
        writeln!(out)?;
    }
    out.write_all(toml.as_bytes())?;
    Ok(())
}
