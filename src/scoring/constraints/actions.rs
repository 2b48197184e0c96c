use serde::{Deserialize, Serialize};

use crate::scoring::domain::ScoringItem;

/// Row-level actions offered by list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowAction {
    Edit,
    ViewItems,
    Values,
    Delete,
}

impl RowAction {
    pub const fn label(self) -> &'static str {
        match self {
            RowAction::Edit => "Edit",
            RowAction::ViewItems => "View Fields",
            RowAction::Values => "Values",
            RowAction::Delete => "Delete",
        }
    }

    pub const fn destructive(self) -> bool {
        matches!(self, RowAction::Delete)
    }
}

/// Actions for an item row; `Values` only appears for value-eligible data types.
pub fn row_actions(item: &ScoringItem) -> Vec<RowAction> {
    if item.data_type.scores_on_presence() {
        vec![RowAction::Edit, RowAction::Delete]
    } else {
        vec![RowAction::Edit, RowAction::Values, RowAction::Delete]
    }
}

pub fn configuration_row_actions() -> Vec<RowAction> {
    vec![RowAction::Edit, RowAction::ViewItems, RowAction::Delete]
}

pub fn value_row_actions() -> Vec<RowAction> {
    vec![RowAction::Edit, RowAction::Delete]
}
