//! Board state: goal, skill label, and the ordered token list.
//!
//! Collaborators address tokens by their current position. Every token
//! also carries a stable [`TokenId`]; positions are resolved to ids before
//! mutating, and id-based variants are offered for callers that keep
//! references across other mutations.
//!
//! When a store is attached, the full board is written to it at the end of
//! every mutating operation. Write failures are logged and ignored: the
//! in-memory board stays authoritative for the rest of the session.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::events::BoardEvent;
use crate::storage::KeyValueStore;
use crate::token::{Token, TokenId};
use crate::view::{RowIcon, TokenRow};

pub const DEFAULT_GOAL: &str = "(Goal)";
pub const DEFAULT_SKILL: &str = "Star to earn";

/// Keys of the persisted record.
pub mod keys {
    pub const TOKEN_ARRAY: &str = "TokenArray";
    pub const NUMBER_TOKENS_EARNED: &str = "NumberTokensEarned";
    pub const GOAL: &str = "Goal";
    pub const SKILL: &str = "Skill";
}

/// Whether [`BoardState::open`] found a saved board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// A saved board was restored.
    Restored,
    /// Nothing saved yet; the setup wizard should run.
    FirstRun,
}

/// Result of toggling a token.
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    /// New `earned` flag of the toggled token.
    pub earned: bool,
    /// This toggle earned the last outstanding token.
    pub completed: bool,
    /// `TokenToggled`, followed by `GoalCompleted` when `completed`.
    pub events: Vec<BoardEvent>,
}

/// Value snapshot of a board, without ids or storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub goal: String,
    pub skill_label: String,
    pub earned: Vec<bool>,
    pub earned_count: usize,
}

pub struct BoardState {
    goal: String,
    skill_label: String,
    tokens: Vec<Token>,
    earned_count: usize,
    store: Option<Box<dyn KeyValueStore>>,
}

impl fmt::Debug for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardState")
            .field("goal", &self.goal)
            .field("skill_label", &self.skill_label)
            .field("tokens", &self.tokens)
            .field("earned_count", &self.earned_count)
            .field("persistent", &self.store.is_some())
            .finish()
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// Empty board that is never saved.
    pub fn new() -> Self {
        Self {
            goal: DEFAULT_GOAL.to_string(),
            skill_label: DEFAULT_SKILL.to_string(),
            tokens: Vec::new(),
            earned_count: 0,
            store: None,
        }
    }

    /// Open the board saved in `store`, keeping the store attached for
    /// subsequent saves.
    ///
    /// A missing `TokenArray` key means nothing was ever saved: the board
    /// starts empty with defaults and [`LoadState::FirstRun`] is returned.
    /// An undecodable token array restores as an empty list. The earned
    /// counter is recomputed when it disagrees with the tokens.
    pub fn open(store: Box<dyn KeyValueStore>) -> (Self, LoadState) {
        let mut board = Self::new();

        let Some(encoded) = store.get_object(keys::TOKEN_ARRAY) else {
            tracing::debug!("no saved board found");
            board.store = Some(store);
            return (board, LoadState::FirstRun);
        };

        match serde_json::from_value::<Vec<Token>>(encoded) {
            Ok(tokens) => board.tokens = tokens,
            Err(e) => tracing::warn!("saved token array is unreadable, starting empty: {e}"),
        }

        let actual = board.count_earned();
        let saved = store.get_integer(keys::NUMBER_TOKENS_EARNED).unwrap_or(0);
        if saved != actual as i64 {
            tracing::warn!(
                "saved earned count {} disagrees with tokens ({}), using tokens",
                saved,
                actual
            );
        }
        board.earned_count = actual;

        board.goal = store
            .get_string(keys::GOAL)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GOAL.to_string());
        board.skill_label = store
            .get_string(keys::SKILL)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SKILL.to_string());

        tracing::debug!(
            "restored board '{}' with {} tokens ({} earned)",
            board.goal,
            board.tokens.len(),
            board.earned_count
        );
        board.store = Some(store);
        (board, LoadState::Restored)
    }

    /// Detach and return the store, if any.
    pub fn into_store(self) -> Option<Box<dyn KeyValueStore>> {
        self.store
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn skill_label(&self) -> &str {
        &self.skill_label
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn earned_count(&self) -> usize {
        self.earned_count
    }

    /// Navigation title shown above the list.
    pub fn title(&self) -> String {
        format!("I am working for: {}", self.goal)
    }

    pub fn id_at(&self, index: usize) -> Option<TokenId> {
        self.tokens.get(index).map(|t| t.id)
    }

    pub fn index_of(&self, id: TokenId) -> Option<usize> {
        self.tokens.iter().position(|t| t.id == id)
    }

    /// True iff every token is earned and there is at least one token.
    pub fn check_completion(&self) -> bool {
        !self.tokens.is_empty() && self.earned_count == self.tokens.len()
    }

    /// Row view models in display order.
    pub fn rows(&self, earned_label: &str) -> Vec<TokenRow> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(index, token)| TokenRow {
                index,
                id: token.id,
                earned: token.earned,
                icon: if token.earned {
                    RowIcon::Filled
                } else {
                    RowIcon::Empty
                },
                label: if token.earned {
                    earned_label.to_string()
                } else {
                    self.skill_label.clone()
                },
                checkmark: token.earned,
            })
            .collect()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            goal: self.goal.clone(),
            skill_label: self.skill_label.clone(),
            earned: self.tokens.iter().map(|t| t.earned).collect(),
            earned_count: self.earned_count,
        }
    }

    /// Append one unearned token.
    pub fn add_token(&mut self) -> BoardEvent {
        let token = Token::new();
        let id = token.id;
        self.tokens.push(token);
        let index = self.tokens.len() - 1;
        tracing::debug!("added token {} at index {}", id, index);
        self.save();
        BoardEvent::TokenAdded {
            index,
            id,
            at: Utc::now(),
        }
    }

    /// Flip the token at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfBounds`] if `index` is not a current
    /// position. The board is left untouched.
    pub fn toggle_earned(&mut self, index: usize) -> Result<ToggleOutcome, ValidationError> {
        let id = self
            .id_at(index)
            .ok_or_else(|| ValidationError::token_index(index, self.tokens.len()))?;
        self.toggle_token(id)
    }

    /// Flip the token with stable id `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownToken`] if no token has this id.
    pub fn toggle_token(&mut self, id: TokenId) -> Result<ToggleOutcome, ValidationError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| ValidationError::UnknownToken(id.to_string()))?;

        let token = &mut self.tokens[index];
        token.earned = !token.earned;
        let earned = token.earned;
        if earned {
            self.earned_count += 1;
        } else {
            self.earned_count -= 1;
        }
        tracing::debug!(
            "toggled token {} at index {} to earned={} ({}/{})",
            id,
            index,
            earned,
            self.earned_count,
            self.tokens.len()
        );

        let at = Utc::now();
        let mut events = vec![BoardEvent::TokenToggled {
            index,
            id,
            earned,
            earned_count: self.earned_count,
            at,
        }];

        let completed = earned && self.check_completion();
        if completed {
            tracing::info!(
                "all {} tokens earned for '{}'",
                self.tokens.len(),
                self.goal
            );
            events.push(BoardEvent::GoalCompleted {
                goal: self.goal.clone(),
                token_count: self.tokens.len(),
                at,
            });
        }

        self.save();
        Ok(ToggleOutcome {
            earned,
            completed,
            events,
        })
    }

    /// Remove the token at `index`; later tokens shift down by one.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfBounds`] if `index` is not a current
    /// position.
    pub fn remove_token(&mut self, index: usize) -> Result<BoardEvent, ValidationError> {
        let id = self
            .id_at(index)
            .ok_or_else(|| ValidationError::token_index(index, self.tokens.len()))?;
        self.remove_token_by_id(id)
    }

    /// Remove the token with stable id `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownToken`] if no token has this id.
    pub fn remove_token_by_id(&mut self, id: TokenId) -> Result<BoardEvent, ValidationError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| ValidationError::UnknownToken(id.to_string()))?;

        let was_earned = self.tokens[index].earned;
        if was_earned {
            self.earned_count -= 1;
        }
        self.tokens.remove(index);
        tracing::debug!("removed token {} from index {}", id, index);

        self.save();
        Ok(BoardEvent::TokenRemoved {
            index,
            id,
            was_earned,
            at: Utc::now(),
        })
    }

    /// Set the goal. Blank input keeps the current goal.
    pub fn set_goal(&mut self, input: &str) -> BoardEvent {
        let trimmed = input.trim();
        if !trimmed.is_empty() {
            self.goal = trimmed.to_string();
        }
        tracing::debug!("goal is '{}'", self.goal);
        self.save();
        BoardEvent::GoalChanged {
            goal: self.goal.clone(),
            at: Utc::now(),
        }
    }

    /// Set the skill label. Blank input keeps the current label.
    pub fn set_skill(&mut self, input: &str) -> BoardEvent {
        let trimmed = input.trim();
        if !trimmed.is_empty() {
            self.skill_label = trimmed.to_string();
        }
        tracing::debug!("skill label is '{}'", self.skill_label);
        self.save();
        BoardEvent::SkillChanged {
            skill: self.skill_label.clone(),
            at: Utc::now(),
        }
    }

    /// Reset to an empty board with default goal and skill label.
    ///
    /// The caller is expected to run the setup wizard next; see
    /// [`SetupWizard::restart`](crate::wizard::SetupWizard::restart).
    pub fn clear(&mut self) -> BoardEvent {
        self.tokens.clear();
        self.earned_count = 0;
        self.goal = DEFAULT_GOAL.to_string();
        self.skill_label = DEFAULT_SKILL.to_string();
        tracing::info!("board cleared");
        self.save();
        BoardEvent::BoardCleared { at: Utc::now() }
    }

    /// Write the full board to the attached store.
    ///
    /// Failures are logged and swallowed; the next mutation tries again
    /// with the then-current state.
    pub fn save(&mut self) {
        let Some(store) = self.store.as_mut() else {
            return;
        };

        match serde_json::to_value(&self.tokens) {
            Ok(encoded) => store.set_object(keys::TOKEN_ARRAY, encoded),
            Err(e) => tracing::warn!("failed to encode tokens, not saved: {e}"),
        }
        store.set_integer(keys::NUMBER_TOKENS_EARNED, self.earned_count as i64);
        store.set_string(keys::GOAL, &self.goal);
        store.set_string(keys::SKILL, &self.skill_label);

        if let Err(e) = store.flush() {
            tracing::warn!("failed to save board: {e}");
        }
    }

    fn count_earned(&self) -> usize {
        self.tokens.iter().filter(|t| t.earned).count()
    }
}
