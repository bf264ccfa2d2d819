use chrono::Local;
use std::io::{self, Write};

use crate::api::BoardService;
use crate::config::{parse_month, BoardsConfig};
use crate::display;
use crate::error::Result;
use crate::models::{attach_days, sort_items, summarize, BoardItem};

/// List the logging user's pulses for a month
pub fn run_list(month: Option<&str>, json: bool) -> Result<()> {
    let month = resolve_month(month)?;
    let (boards, client) = super::connect()?;
    let stdout = io::stdout();
    list_items(&client, &boards, &month, json, &mut stdout.lock())
}

/// Total the logging user's hours per group for a month
pub fn run_summary(month: Option<&str>, json: bool) -> Result<()> {
    let month = resolve_month(month)?;
    let (boards, client) = super::connect()?;
    let stdout = io::stdout();
    summarize_items(&client, &boards, &month, json, &mut stdout.lock())
}

/// Validate an explicit `yyyy-mm`, or default to the current local month
fn resolve_month(month: Option<&str>) -> Result<String> {
    match month {
        Some(month) => parse_month(month),
        None => Ok(Local::now().format("%Y-%m").to_string()),
    }
}

/// Fetch the month's pulses, carry each group's day over from the
/// mapping and sort them by day
fn fetch_month_items(
    service: &dyn BoardService,
    boards: &BoardsConfig,
    month: &str,
) -> Result<Vec<BoardItem>> {
    let board_id = boards.resolve_board_id(month)?;
    tracing::debug!(month, board_id, "get_board_items");

    let mut items = service.fetch_board_items(board_id)?;
    attach_days(&mut items, boards.month(month));
    sort_items(&mut items);
    Ok(items)
}

pub fn list_items(
    service: &dyn BoardService,
    boards: &BoardsConfig,
    month: &str,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let items = fetch_month_items(service, boards, month)?;
    let rendered = if json {
        display::to_json(&items)?
    } else {
        display::items_table(&items)
    };
    out.write_all(rendered.as_bytes())?;
    Ok(())
}

pub fn summarize_items(
    service: &dyn BoardService,
    boards: &BoardsConfig,
    month: &str,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let items = fetch_month_items(service, boards, month)?;
    let groups = summarize(&items)?;
    let rendered = if json {
        display::to_json(&groups)?
    } else {
        display::summary_table(&groups)
    };
    out.write_all(rendered.as_bytes())?;
    Ok(())
}
