//! Report output
//!
//! Renders pulses and group summaries as aligned text tables or JSON.

mod table;

use table::Table;

use serde::Serialize;

use crate::error::Result;
use crate::models::{BoardItem, GroupSummary};

/// Four-column listing of pulses
pub fn items_table(items: &[BoardItem]) -> String {
    let mut table = Table::new(["GROUP", "HOURS", "DESCRIPTION", "PULSE ID"]);
    for item in items {
        table.add_row([
            item.group.title.as_str(),
            item.hours.as_str(),
            item.name.as_str(),
            item.id.as_str(),
        ]);
    }
    table.render()
}

/// Three-column per-group totals
pub fn summary_table(groups: &[GroupSummary]) -> String {
    let mut table = Table::new(["GROUP", "TOTAL HOURS", "PULSE COUNT"]);
    for group in groups {
        table.add_row([
            group.group.clone(),
            group.total_hours.to_string(),
            group.pulse_count.to_string(),
        ]);
    }
    table.render()
}

/// Pretty JSON with a trailing newline
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
