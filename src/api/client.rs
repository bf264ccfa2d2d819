use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Number, Value};

use super::queries::{
    CREATE_LOG_ITEM, GET_BOARD, GET_BOARD_ITEMS, GET_PULSE_RELATIVE_LINK, ITEMS_PAGE_LIMIT,
};
use super::{Board, BoardService};
use crate::config::{BoardsConfig, UserConfig};
use crate::error::{PulseError, Result};
use crate::models::{BoardItem, GroupRef};

pub const MONDAY_API_URL: &str = "https://api.monday.com/v2/";
/// Overrides the GraphQL endpoint
pub const API_URL_ENV: &str = "PULSELOG_API_URL";
/// Pins server behaviour to a known API version
const API_VERSION: &str = "2023-10";

const MSG_CONTACT_FAILED: &str = "A problem occurred when contacting monday.com.";
const MSG_CREATE_FAILED: &str = "A problem occurred when contacting monday.com.\nPlease verify on monday.com whether a log entry was created or not.";

/// monday.com GraphQL client carrying the identity and column ids every
/// call needs
pub struct MondayClient {
    http: Client,
    endpoint: String,
    access_token: String,
    logging_user_id: String,
    person_column_id: String,
    hours_column_id: String,
}

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Deserialize)]
struct BoardsData<T> {
    boards: Vec<T>,
}

#[derive(Deserialize)]
struct BoardWithItems {
    items_page: ItemsPage,
}

#[derive(Deserialize)]
struct ItemsPage {
    cursor: Option<String>,
    #[serde(default)]
    items: Vec<WireItem>,
}

#[derive(Deserialize)]
struct WireItem {
    id: String,
    name: String,
    group: Option<GroupRef>,
    #[serde(default)]
    column_values: Vec<ColumnText>,
}

#[derive(Deserialize)]
struct ColumnText {
    text: Option<String>,
}

#[derive(Deserialize)]
struct CreateItemData {
    create_item: CreatedItem,
}

#[derive(Deserialize)]
struct CreatedItem {
    id: String,
    relative_link: Option<String>,
}

#[derive(Deserialize)]
struct ItemsData {
    items: Vec<ItemLink>,
}

#[derive(Deserialize)]
struct ItemLink {
    relative_link: Option<String>,
}

impl From<WireItem> for BoardItem {
    fn from(item: WireItem) -> Self {
        let hours = item
            .column_values
            .into_iter()
            .next()
            .and_then(|column| column.text)
            .unwrap_or_default();
        BoardItem {
            id: item.id,
            name: item.name,
            group: item.group.unwrap_or(GroupRef {
                id: String::new(),
                title: String::new(),
            }),
            hours,
            day: None,
        }
    }
}

/// Validate an hours argument before anything is sent
pub fn parse_hours(hours: &str) -> Result<f64> {
    let invalid = || {
        PulseError::validation(format!(
            "hours = {} (third arg): unable to parse hours as a number.",
            hours
        ))
    };

    let value = hours
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid().with_source(e))?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(value)
}

/// JSON-encoded `column_values` for a new pulse: the person column set to
/// the logging user and the hours column as an unquoted number
pub fn column_values(
    person_column_id: &str,
    logging_user_id: &str,
    hours_column_id: &str,
    hours: f64,
) -> Result<String> {
    let number = Number::from_f64(hours).ok_or_else(|| {
        PulseError::validation(format!("hours = {}: not a finite number.", hours))
    })?;

    let mut values = Map::new();
    values.insert(
        person_column_id.to_string(),
        Value::String(logging_user_id.to_string()),
    );
    values.insert(hours_column_id.to_string(), Value::Number(number));
    Ok(serde_json::to_string(&Value::Object(values))?)
}

impl MondayClient {
    /// Build a client for the configured identity. The endpoint defaults to
    /// the public API unless `PULSELOG_API_URL` is set.
    pub fn new(user: &UserConfig, boards: &BoardsConfig) -> Result<Self> {
        let endpoint = std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| MONDAY_API_URL.to_string());

        let http = Client::builder()
            .user_agent(concat!("pulselog/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PulseError::remote(MSG_CONTACT_FAILED).with_source(e))?;

        Ok(Self {
            http,
            endpoint,
            access_token: user.api_access_token.clone(),
            logging_user_id: user.logging_user_id.clone(),
            person_column_id: boards.person_column_id.clone(),
            hours_column_id: boards.hours_column_id.clone(),
        })
    }

    /// Send to a different GraphQL endpoint
    #[cfg(test)]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn execute<T: DeserializeOwned>(&self, query: &str, variables: Value, failure: &str) -> Result<T> {
        let fail = |source: crate::error::BoxError| PulseError::remote(failure).with_source(source);

        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, &self.access_token)
            .header("API-Version", API_VERSION)
            .json(&GraphqlRequest { query, variables })
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| fail(e.into()))?;

        let body: GraphqlResponse<T> = response.json().map_err(|e| fail(e.into()))?;

        if !body.errors.is_empty() {
            let messages: Vec<String> = body.errors.into_iter().map(|e| e.message).collect();
            return Err(fail(messages.join("; ").into()));
        }
        if let Some(message) = body.error_message {
            return Err(fail(message.into()));
        }
        body.data
            .ok_or_else(|| fail("response carried no data".into()))
    }
}

impl BoardService for MondayClient {
    fn fetch_board(&self, board_id: u64) -> Result<Board> {
        tracing::debug!(board_id, "fetch_board");
        let variables = json!({ "board_ids": [board_id.to_string()] });
        let data: BoardsData<Board> = self.execute(GET_BOARD, variables, MSG_CONTACT_FAILED)?;

        data.boards.into_iter().next().ok_or_else(|| {
            PulseError::remote(format!("Board {} was not found on monday.com.", board_id))
        })
    }

    fn fetch_board_items(&self, board_id: u64) -> Result<Vec<BoardItem>> {
        tracing::debug!(board_id, "fetch_board_items");
        let variables = json!({
            "board_ids": [board_id.to_string()],
            "person_column_id": self.person_column_id,
            "logging_user_id": format!("person-{}", self.logging_user_id),
            "hours_column_id": [self.hours_column_id],
        });
        let data: BoardsData<BoardWithItems> =
            self.execute(GET_BOARD_ITEMS, variables, MSG_CONTACT_FAILED)?;

        let board = data.boards.into_iter().next().ok_or_else(|| {
            PulseError::remote(format!("Board {} was not found on monday.com.", board_id))
        })?;

        let page = board.items_page;
        if let Some(cursor) = page.cursor.as_deref().filter(|c| !c.is_empty()) {
            tracing::warn!(
                board_id,
                cursor,
                limit = ITEMS_PAGE_LIMIT,
                "more items exist than fit in the first page; results are truncated"
            );
        }

        Ok(page.items.into_iter().map(BoardItem::from).collect())
    }

    fn create_log_item(
        &self,
        board_id: u64,
        group_id: &str,
        item_name: &str,
        hours: &str,
    ) -> Result<String> {
        let hours = parse_hours(hours)?;
        let values = column_values(
            &self.person_column_id,
            &self.logging_user_id,
            &self.hours_column_id,
            hours,
        )?;
        tracing::debug!(board_id, group_id, item_name, hours, "create_log_item");

        let variables = json!({
            "board_id": board_id.to_string(),
            "group_id": group_id,
            "item_name": item_name,
            "column_values": values,
        });
        let data: CreateItemData = self.execute(CREATE_LOG_ITEM, variables, MSG_CREATE_FAILED)?;

        let created = data.create_item;
        tracing::debug!(pulse_id = %created.id, "created pulse");
        created.relative_link.ok_or_else(|| {
            PulseError::remote(MSG_CREATE_FAILED).with_source("create_item returned no relative_link")
        })
    }

    fn fetch_pulse_relative_link(&self, pulse_id: u64) -> Result<String> {
        tracing::debug!(pulse_id, "fetch_pulse_relative_link");
        let variables = json!({ "pulse_ids": [pulse_id.to_string()] });
        let data: ItemsData = self.execute(GET_PULSE_RELATIVE_LINK, variables, MSG_CONTACT_FAILED)?;

        data.items
            .into_iter()
            .next()
            .and_then(|item| item.relative_link)
            .ok_or_else(|| {
                PulseError::remote(format!("Pulse {} was not found on monday.com.", pulse_id))
            })
    }
}
