use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Base URL prepended to relative pulse links when the boards document
/// does not set `account_url`
pub const DEFAULT_ACCOUNT_URL: &str = "https://magicboard.monday.com";

/// User identity (`config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    /// monday.com personal API token
    #[serde(default)]
    pub api_access_token: String,

    /// monday.com user id that pulses are attributed to
    #[serde(default)]
    pub logging_user_id: String,
}

impl UserConfig {
    /// Names of required fields that are missing or empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_access_token.trim().is_empty() {
            missing.push("api_access_token");
        }
        if self.logging_user_id.trim().is_empty() {
            missing.push("logging_user_id");
        }
        missing
    }
}

/// Board, column and day mappings (`boards.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardsConfig {
    /// Column holding the person a pulse belongs to
    #[serde(default)]
    pub person_column_id: String,

    /// Column holding the logged hours
    #[serde(default)]
    pub hours_column_id: String,

    /// Free text shown by `setup` and `update`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Account base URL used for absolute pulse links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_url: Option<String>,

    /// Month (`yyyy-mm`) to board mapping
    #[serde(default)]
    pub months: BTreeMap<String, MonthEntry>,
}

impl BoardsConfig {
    /// Names of required fields that are missing or empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.person_column_id.trim().is_empty() {
            missing.push("person_column_id");
        }
        if self.hours_column_id.trim().is_empty() {
            missing.push("hours_column_id");
        }
        missing
    }

    pub fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Account URL without a trailing slash
    pub fn account_url(&self) -> &str {
        self.account_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_ACCOUNT_URL)
    }

    /// Absolute link for a relative pulse link returned by the API
    pub fn pulse_url(&self, relative_link: &str) -> String {
        if relative_link.starts_with("http://") || relative_link.starts_with("https://") {
            return relative_link.to_string();
        }
        format!("{}{}", self.account_url(), relative_link)
    }
}

/// One month's board and its day (`dd`) to group id mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthEntry {
    /// Numeric board id, accepted as a TOML string or integer
    #[serde(default, deserialize_with = "string_or_integer")]
    pub board_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub days: BTreeMap<String, String>,
}

fn string_or_integer<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Integer(number) => number.to_string(),
    })
}
