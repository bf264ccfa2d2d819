//! Date to board/group resolution against a loaded boards document

use chrono::{Datelike, NaiveDate};

use super::types::{BoardsConfig, MonthEntry};
use crate::error::{PulseError, Result};

/// A validated `yyyy-mm-dd` day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRef {
    /// `yyyy-mm` key into `months`
    pub month: String,
    /// `dd` key into `months.<month>.days`
    pub day: String,
    pub day_of_month: u32,
}

impl DayRef {
    /// Parse a `yyyy-mm-dd` date. The length is checked before anything
    /// else so that no lookup ever happens on a malformed date.
    pub fn parse(date: &str) -> Result<Self> {
        if date.len() != 10 {
            return Err(not_a_day(date));
        }

        let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| not_a_day(date).with_source(e))?;

        Ok(Self {
            month: date[0..7].to_string(),
            day: date[8..10].to_string(),
            day_of_month: parsed.day(),
        })
    }
}

fn not_a_day(date: &str) -> PulseError {
    PulseError::validation(format!(
        "day = {} (first arg): provided day is not in format yyyy-mm-dd.",
        date
    ))
}

/// Validate a `yyyy-mm` month argument
pub fn parse_month(month: &str) -> Result<String> {
    let invalid = || {
        PulseError::validation(format!(
            "month = {}: provided month is not in format yyyy-mm.",
            month
        ))
    };

    if month.len() != 7 {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
        .map_err(|e| invalid().with_source(e))?;

    Ok(month.to_string())
}

impl BoardsConfig {
    fn month_entry(&self, month: &str) -> Result<&MonthEntry> {
        self.months
            .get(month)
            .filter(|entry| !entry.board_id.trim().is_empty())
            .ok_or_else(|| {
                PulseError::validation(format!(
                    "\"months.{}.board_id\": not found in boards configuration.",
                    month
                ))
            })
    }

    /// Board id configured for `month`
    pub fn resolve_board_id(&self, month: &str) -> Result<u64> {
        let entry = self.month_entry(month)?;
        entry.board_id.trim().parse::<u64>().map_err(|e| {
            PulseError::validation(format!(
                "\"months.{}.board_id\": not a number.",
                month
            ))
            .with_source(e)
        })
    }

    /// Group id configured for `day` within `month`
    pub fn resolve_group_id(&self, month: &str, day: &str) -> Result<&str> {
        self.month_entry(month)?
            .days
            .get(day)
            .map(String::as_str)
            .filter(|group| !group.trim().is_empty())
            .ok_or_else(|| {
                PulseError::validation(format!(
                    "\"months.{}.days.{}\": not found in boards configuration.",
                    month, day
                ))
            })
    }

    /// Month entry for `month`, if one is configured
    pub fn month(&self, month: &str) -> Option<&MonthEntry> {
        self.months.get(month)
    }
}

impl MonthEntry {
    /// Day of month whose mapping points at `group_id`
    pub fn day_for_group(&self, group_id: &str) -> Option<u32> {
        self.days
            .iter()
            .find(|(_, group)| group.as_str() == group_id)
            .and_then(|(day, _)| day.parse::<u32>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn boards() -> BoardsConfig {
        toml::from_str(
            r#"
person_column_id = "person"
hours_column_id = "numbers"

[months.2023-09]
board_id = "5064273451"

[months.2023-09.days]
01 = "fri_sep_01"
04 = "mon_sep_04"

[months.2023-10]
board_id = "not-a-board"

[months.2023-11]
board_id = ""
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_day_ref_parse() {
        let day = DayRef::parse("2023-09-04").unwrap();
        assert_eq!(day.month, "2023-09");
        assert_eq!(day.day, "04");
        assert_eq!(day.day_of_month, 4);
    }

    #[test]
    fn test_day_ref_rejects_wrong_length() {
        for bad in ["2023-9-4", "2023-09-041", "", "20230904"] {
            let err = DayRef::parse(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
            assert!(err.message().contains("not in format yyyy-mm-dd"));
        }
    }

    #[test]
    fn test_day_ref_rejects_non_date() {
        let err = DayRef::parse("2023/09/04").unwrap_err();
        assert!(err.message().contains("day = 2023/09/04"));
        assert!(DayRef::parse("2023-02-30").is_err());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2023-09").unwrap(), "2023-09");
        assert!(parse_month("2023-13").is_err());
        assert!(parse_month("2023-9").is_err());
        assert!(parse_month("september").is_err());
    }

    #[test]
    fn test_resolve_mapped_day() {
        let boards = boards();
        assert_eq!(boards.resolve_board_id("2023-09").unwrap(), 5064273451);
        assert_eq!(
            boards.resolve_group_id("2023-09", "04").unwrap(),
            "mon_sep_04"
        );
    }

    #[test]
    fn test_resolve_unmapped_month() {
        let boards = boards();
        let err = boards.resolve_board_id("2024-01").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            err.message(),
            "\"months.2024-01.board_id\": not found in boards configuration."
        );

        let err = boards.resolve_group_id("2024-01", "01").unwrap_err();
        assert!(err.message().contains("months.2024-01.board_id"));
    }

    #[test]
    fn test_resolve_empty_board_id_is_not_found() {
        let err = boards().resolve_board_id("2023-11").unwrap_err();
        assert!(err.message().contains("not found in boards configuration"));
    }

    #[test]
    fn test_resolve_unmapped_day() {
        let err = boards().resolve_group_id("2023-09", "02").unwrap_err();
        assert_eq!(
            err.message(),
            "\"months.2023-09.days.02\": not found in boards configuration."
        );
    }

    #[test]
    fn test_resolve_non_numeric_board_id() {
        let err = boards().resolve_board_id("2023-10").unwrap_err();
        assert_eq!(
            err.message(),
            "\"months.2023-10.board_id\": not a number."
        );
    }

    #[test]
    fn test_day_for_group() {
        let boards = boards();
        let september = boards.month("2023-09").unwrap();
        assert_eq!(september.day_for_group("mon_sep_04"), Some(4));
        assert_eq!(september.day_for_group("tue_sep_05"), None);
    }
}
