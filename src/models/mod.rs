//! Data models module
//!
//! Pulses returned by the board service, their ordering by day and the
//! per-group summary.

pub mod item;
pub mod summary;

pub use item::{attach_days, sort_items, BoardItem, GroupRef};
pub use summary::{summarize, GroupSummary};
