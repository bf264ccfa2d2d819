//! Remote board service
//!
//! `BoardService` is what command handlers talk to; `MondayClient` is the
//! monday.com GraphQL implementation.

mod client;
mod queries;

pub use client::{parse_hours, MondayClient};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{BoardItem, GroupRef};

/// Column definition on a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
}

/// Board definition as returned by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub groups: Vec<GroupRef>,
}

/// Operations the commands need from the board service
pub trait BoardService {
    /// Look up a single board with its columns and groups
    fn fetch_board(&self, board_id: u64) -> Result<Board>;

    /// The logging user's pulses on a board (first page only)
    fn fetch_board_items(&self, board_id: u64) -> Result<Vec<BoardItem>>;

    /// Create a pulse and return its relative link
    fn create_log_item(
        &self,
        board_id: u64,
        group_id: &str,
        item_name: &str,
        hours: &str,
    ) -> Result<String>;

    /// Relative link of an existing pulse
    fn fetch_pulse_relative_link(&self, pulse_id: u64) -> Result<String>;
}
