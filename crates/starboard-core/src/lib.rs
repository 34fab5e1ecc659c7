//! # Star Board Core Library
//!
//! This library provides the core logic for Star Board, a reward token
//! board: a caregiver sets a goal and a number of stars, the child earns
//! them one by one, and the board congratulates them when every star is
//! earned. The `starboard` CLI is a thin presentation layer over this crate.
//!
//! ## Architecture
//!
//! - **Board**: goal, skill label, and the ordered token list with a cached
//!   earned counter, saved after every mutation when a store is attached
//! - **Setup wizard**: goal → skill → token count state machine that
//!   initializes a board
//! - **Storage**: flat key-value store (in memory or a JSON file) and
//!   TOML-based configuration
//!
//! ## Key Components
//!
//! - [`BoardState`]: Board and token operations
//! - [`SetupWizard`]: Onboarding state machine
//! - [`KeyValueStore`]: Persistence seam
//! - [`Config`]: Application configuration management

pub mod board;
pub mod error;
pub mod events;
pub mod storage;
pub mod token;
pub mod view;
pub mod wizard;

pub use board::{BoardSnapshot, BoardState, LoadState, ToggleOutcome, DEFAULT_GOAL, DEFAULT_SKILL};
pub use error::{ConfigError, CoreError, StoreError, ValidationError, WizardError};
pub use events::BoardEvent;
pub use storage::{CompletionStyle, Config, FileStore, KeyValueStore, MemoryStore};
pub use token::{Token, TokenId};
pub use view::{ClearConfirmation, CompletionNotice, ModalAction, RowIcon, TokenRow};
pub use wizard::{
    Prompt, PromptAction, Prompter, SetupWizard, TokenCount, WizardInput, WizardProfile, WizardStep,
};
