//! Reward tokens and their stable identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable opaque identifier for a token.
///
/// Collaborators address tokens by list position; the board resolves
/// positions to ids so a held id keeps pointing at the same token after
/// other tokens are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenId(Uuid);

impl TokenId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One discrete reward unit.
///
/// Only `earned` is persisted (`{"earned": true}`); ids are regenerated
/// when a board is loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    #[serde(skip)]
    pub id: TokenId,
    #[serde(default)]
    pub earned: bool,
}

impl Token {
    /// A fresh, unearned token.
    pub fn new() -> Self {
        Self {
            id: TokenId::new(),
            earned: false,
        }
    }
}

impl Default for Token {
    fn default() -> Self {
        Self::new()
    }
}
