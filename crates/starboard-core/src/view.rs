//! View models handed to the presentation collaborator.
//!
//! Nothing here renders; these are the fixed strings and two-state row
//! descriptions a list view needs.

use serde::{Deserialize, Serialize};

use crate::storage::CompletionStyle;
use crate::token::TokenId;

/// Star icon for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowIcon {
    Filled,
    Empty,
}

/// One list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRow {
    pub index: usize,
    pub id: TokenId,
    pub earned: bool,
    pub icon: RowIcon,
    pub label: String,
    pub checkmark: bool,
}

/// Action offered by a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalAction {
    Clear,
    Cancel,
    Ok,
}

impl ModalAction {
    pub fn label(self) -> &'static str {
        match self {
            ModalAction::Clear => "Clear",
            ModalAction::Cancel => "Cancel",
            ModalAction::Ok => "OK",
        }
    }
}

/// Shown when the last token is earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionNotice {
    pub goal: String,
    pub actions: Vec<ModalAction>,
}

impl CompletionNotice {
    pub fn new(goal: &str, style: CompletionStyle) -> Self {
        let actions = match style {
            CompletionStyle::OfferClear => vec![ModalAction::Clear, ModalAction::Cancel],
            CompletionStyle::Acknowledge => vec![ModalAction::Ok],
        };
        Self {
            goal: goal.to_string(),
            actions,
        }
    }

    pub fn headline(&self) -> String {
        format!("You earned: {}", self.goal)
    }

    /// Whether choosing `action` should clear the board.
    pub fn clears(&self, action: ModalAction) -> bool {
        action == ModalAction::Clear && self.actions.contains(&ModalAction::Clear)
    }
}

/// Confirmation asked before an explicit clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearConfirmation {
    pub title: String,
    pub message: String,
    pub actions: Vec<ModalAction>,
}

impl Default for ClearConfirmation {
    fn default() -> Self {
        Self {
            title: "Clear Board".to_string(),
            message: "Are you sure?".to_string(),
            actions: vec![ModalAction::Clear, ModalAction::Cancel],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offer_clear_notice_has_clear_and_cancel() {
        let notice = CompletionNotice::new("Zoo", CompletionStyle::OfferClear);
        assert_eq!(
            notice.actions,
            vec![ModalAction::Clear, ModalAction::Cancel]
        );
        assert!(notice.clears(ModalAction::Clear));
        assert!(!notice.clears(ModalAction::Cancel));
    }

    #[test]
    fn acknowledge_notice_never_clears() {
        let notice = CompletionNotice::new("Zoo", CompletionStyle::Acknowledge);
        assert_eq!(notice.actions, vec![ModalAction::Ok]);
        assert!(!notice.clears(ModalAction::Clear));
        assert!(!notice.clears(ModalAction::Ok));
    }

    #[test]
    fn headline_names_goal() {
        let notice = CompletionNotice::new("Park trip", CompletionStyle::Acknowledge);
        assert_eq!(notice.headline(), "You earned: Park trip");
    }

    #[test]
    fn row_icon_serializes_snake_case() {
        let json = serde_json::to_string(&RowIcon::Filled).unwrap();
        assert_eq!(json, r#""filled""#);
    }
}
