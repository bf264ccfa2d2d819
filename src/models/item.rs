use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::config::MonthEntry;

/// Group (day) a pulse belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    pub id: String,
    pub title: String,
}

/// One logged pulse on a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardItem {
    /// Pulse id
    pub id: String,
    /// Pulse name (the work description)
    pub name: String,
    pub group: GroupRef,
    /// Raw text of the hours column
    pub hours: String,
    /// Day of month taken from the boards mapping for this item's group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
}

/// Compare group titles shaped like `"Fri Sep 01"`.
///
/// When both titles are exactly 10 bytes the two trailing bytes (the day)
/// are compared first. Otherwise, or when those bytes are equal, the whole
/// strings are compared.
pub fn compare_group_titles(a: &str, b: &str) -> Ordering {
    let (a_bytes, b_bytes) = (a.as_bytes(), b.as_bytes());
    if a_bytes.len() == 10 && b_bytes.len() == 10 {
        let by_day = a_bytes[8]
            .cmp(&b_bytes[8])
            .then(a_bytes[9].cmp(&b_bytes[9]));
        if by_day != Ordering::Equal {
            return by_day;
        }
    }
    a.cmp(b)
}

/// Day a group sorts under: the carried day, or the two trailing digits of
/// a `"Fri Sep 01"` shaped title
fn day_key(day: Option<u32>, title: &str) -> Option<u32> {
    day.or_else(|| {
        let bytes = title.as_bytes();
        match bytes {
            [.., tens, ones] if bytes.len() == 10 && tens.is_ascii_digit() && ones.is_ascii_digit() => {
                Some(u32::from(tens - b'0') * 10 + u32::from(ones - b'0'))
            }
            _ => None,
        }
    })
}

/// Ordering shared by item listings and summaries.
///
/// Groups with a day (carried from the mapping or read from the title) are
/// ordered by day, then title. The rest follow, ordered by
/// `compare_group_titles` with 10-byte titles ahead of the others so the
/// result stays a total order.
pub fn compare_groups(a_day: Option<u32>, a_title: &str, b_day: Option<u32>, b_title: &str) -> Ordering {
    fn rank(key: Option<u32>, title: &str) -> u8 {
        match key {
            Some(_) => 0,
            None if title.len() == 10 => 1,
            None => 2,
        }
    }

    let (a_key, b_key) = (day_key(a_day, a_title), day_key(b_day, b_title));
    rank(a_key, a_title)
        .cmp(&rank(b_key, b_title))
        .then_with(|| match (a_key, b_key) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| a_title.cmp(b_title)),
            _ => compare_group_titles(a_title, b_title),
        })
}

fn compare_pulse_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

/// Copy each item's day of month from the month's mapping (group id -> day)
pub fn attach_days(items: &mut [BoardItem], month: Option<&MonthEntry>) {
    let Some(month) = month else {
        return;
    };
    for item in items.iter_mut() {
        item.day = month.day_for_group(&item.group.id);
    }
}

/// Sort items by group, then by pulse id
pub fn sort_items(items: &mut [BoardItem]) {
    items.sort_by(|a, b| {
        compare_groups(a.day, &a.group.title, b.day, &b.group.title)
            .then_with(|| compare_pulse_ids(&a.id, &b.id))
    });
}
