//! GraphQL documents sent to the monday.com API

/// Page size requested from `items_page`. Only the first page is read.
pub const ITEMS_PAGE_LIMIT: usize = 100;

pub const GET_BOARD: &str = r#"
query ($board_ids: [ID!]) {
  boards(ids: $board_ids) {
    id
    name
    columns { id title }
    groups { id title }
  }
}
"#;

pub const GET_BOARD_ITEMS: &str = r#"
query ($board_ids: [ID!], $person_column_id: ID!, $logging_user_id: CompareValue!, $hours_column_id: [String!]) {
  boards(ids: $board_ids) {
    id
    name
    items_page(limit: 100, query_params: { rules: [{ column_id: $person_column_id, compare_value: $logging_user_id }] }) {
      cursor
      items {
        id
        name
        group { id title }
        column_values(ids: $hours_column_id) { text }
      }
    }
  }
}
"#;

pub const CREATE_LOG_ITEM: &str = r#"
mutation ($board_id: ID!, $group_id: String!, $item_name: String!, $column_values: JSON!) {
  create_item(board_id: $board_id, group_id: $group_id, item_name: $item_name, column_values: $column_values) {
    id
    relative_link
  }
}
"#;

pub const GET_PULSE_RELATIVE_LINK: &str = r#"
query ($pulse_ids: [ID!]) {
  items(ids: $pulse_ids) {
    id
    relative_link
  }
}
"#;
