use serde::Serialize;
use std::collections::BTreeMap;

use super::item::{compare_groups, BoardItem};
use crate::error::{PulseError, Result};

/// Hours logged in one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub group: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    pub total_hours: f64,
    pub pulse_count: usize,
}

/// Total hours and pulse count per group title, sorted like item listings.
///
/// Fails on the first item whose hours text is not a number.
pub fn summarize(items: &[BoardItem]) -> Result<Vec<GroupSummary>> {
    let mut groups: BTreeMap<&str, GroupSummary> = BTreeMap::new();

    for item in items {
        let hours = item.hours.trim().parse::<f64>().map_err(|e| {
            PulseError::validation(format!(
                "hours = {} (pulse_id = {}): not a number.",
                item.hours, item.id
            ))
            .with_source(e)
        })?;

        let entry = groups
            .entry(item.group.title.as_str())
            .or_insert_with(|| GroupSummary {
                group: item.group.title.clone(),
                day: item.day,
                total_hours: 0.0,
                pulse_count: 0,
            });
        entry.total_hours += hours;
        entry.pulse_count += 1;
        if entry.day.is_none() {
            entry.day = item.day;
        }
    }

    let mut summaries: Vec<GroupSummary> = groups.into_values().collect();
    summaries.sort_by(|a, b| compare_groups(a.day, &a.group, b.day, &b.group));
    Ok(summaries)
}
