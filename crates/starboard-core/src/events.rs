use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::token::TokenId;

/// Every board mutation produces an Event.
/// The list view applies them one at a time, so a bulk setup shows up as
/// a run of individual `TokenAdded` events rather than a single reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BoardEvent {
    TokenAdded {
        index: usize,
        id: TokenId,
        at: DateTime<Utc>,
    },
    TokenToggled {
        index: usize,
        id: TokenId,
        earned: bool,
        earned_count: usize,
        at: DateTime<Utc>,
    },
    TokenRemoved {
        index: usize,
        id: TokenId,
        was_earned: bool,
        at: DateTime<Utc>,
    },
    GoalChanged {
        goal: String,
        at: DateTime<Utc>,
    },
    SkillChanged {
        skill: String,
        at: DateTime<Utc>,
    },
    /// Board reset to defaults; the setup wizard runs next.
    BoardCleared {
        at: DateTime<Utc>,
    },
    /// Last unearned token was just earned.
    GoalCompleted {
        goal: String,
        token_count: usize,
        at: DateTime<Utc>,
    },
}
