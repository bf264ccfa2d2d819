//! Field-by-field diagnostics behind `pulselog setup`

use std::path::Path;

use super::types::{BoardsConfig, UserConfig};
use super::read_toml;

/// One ✅/❌ line of a setup report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckLine {
    pub ok: bool,
    pub text: String,
}

impl CheckLine {
    fn pass(text: impl Into<String>) -> Self {
        Self {
            ok: true,
            text: text.into(),
        }
    }

    fn fail(text: impl Into<String>) -> Self {
        Self {
            ok: false,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for CheckLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mark = if self.ok { "✅" } else { "❌" };
        write!(f, "{} {}", mark, self.text)
    }
}

/// Outcome of checking one configuration document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentReport {
    pub lines: Vec<CheckLine>,
}

impl DocumentReport {
    pub fn is_valid(&self) -> bool {
        self.lines.iter().all(|line| line.ok)
    }

    /// Line for a named field, if the report has one
    #[cfg(test)]
    pub fn field(&self, name: &str) -> Option<&CheckLine> {
        self.lines.iter().find(|line| {
            line.text == name || line.text == format!("Missing {}", name)
        })
    }
}

fn field_lines(fields: &[&'static str], missing: &[&'static str]) -> Vec<CheckLine> {
    fields
        .iter()
        .map(|field| {
            if missing.contains(field) {
                CheckLine::fail(format!("Missing {}", field))
            } else {
                CheckLine::pass(*field)
            }
        })
        .collect()
}

const USER_FIELDS: [&str; 2] = ["api_access_token", "logging_user_id"];
const BOARDS_FIELDS: [&str; 2] = ["person_column_id", "hours_column_id"];

/// Check the user document. Never fails: problems become ❌ lines.
pub fn check_user(path: &Path) -> DocumentReport {
    let mut report = DocumentReport::default();
    match read_toml::<UserConfig>(path) {
        Ok(user) => {
            let missing = user.missing_fields();
            report.lines = field_lines(&USER_FIELDS, &missing);
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "user configuration unreadable");
            report.lines.push(CheckLine::fail(
                "Unable to parse file (missing or incorrectly formatted)",
            ));
            report.lines.extend(field_lines(&USER_FIELDS, &USER_FIELDS));
        }
    }
    report
}

/// Check the boards document. Besides the required fields this lists the
/// description and each configured month as informational ✅ lines.
pub fn check_boards(path: &Path) -> DocumentReport {
    let mut report = DocumentReport::default();
    let boards = match read_toml::<BoardsConfig>(path) {
        Ok(boards) => boards,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "boards configuration unreadable");
            report.lines.push(CheckLine::fail(
                "Unable to parse file (missing or incorrectly formatted)",
            ));
            report.lines.extend(field_lines(&BOARDS_FIELDS, &BOARDS_FIELDS));
            return report;
        }
    };

    let missing = boards.missing_fields();
    report.lines = field_lines(&BOARDS_FIELDS, &missing);

    if let Some(description) = boards.description() {
        report
            .lines
            .push(CheckLine::pass(format!("Description: {}", description)));
    }

    for (month, entry) in &boards.months {
        if entry.board_id.trim().parse::<u64>().is_ok() {
            report.lines.push(CheckLine::pass(format!(
                "{}: board {} with {} day(s) mapped",
                month,
                entry.board_id.trim(),
                entry.days.len()
            )));
        } else {
            report.lines.push(CheckLine::fail(format!(
                "{}: board_id {:?} is not a number",
                month, entry.board_id
            )));
        }
    }

    report
}
