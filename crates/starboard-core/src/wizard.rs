//! Setup wizard that initializes a board.
//!
//! This module provides:
//! - A linear prompt flow: goal, optional skill label, token count
//! - Per-step fallbacks for blank or skipped answers
//! - Restart from the first step when the board is cleared
//!
//! The flow is an explicit state machine advanced by [`SetupWizard::dispatch`].
//! Presentation layers either call `dispatch` themselves as answers arrive, or
//! hand a [`Prompter`] to [`SetupWizard::drive`] which blocks on each prompt
//! in turn.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::board::BoardState;
use crate::error::WizardError;
use crate::events::BoardEvent;

/// Wizard position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Idle,
    AwaitingGoal,
    AwaitingSkill,
    AwaitingTokenCount,
    Done,
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WizardStep::Idle => "idle",
            WizardStep::AwaitingGoal => "goal",
            WizardStep::AwaitingSkill => "skill",
            WizardStep::AwaitingTokenCount => "token count",
            WizardStep::Done => "done",
        };
        f.write_str(name)
    }
}

/// The fixed token count choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TokenCount {
    Five,
    Six,
    Ten,
    Twelve,
}

impl TokenCount {
    pub const ALL: [TokenCount; 4] = [
        TokenCount::Five,
        TokenCount::Six,
        TokenCount::Ten,
        TokenCount::Twelve,
    ];

    pub fn value(self) -> u32 {
        match self {
            TokenCount::Five => 5,
            TokenCount::Six => 6,
            TokenCount::Ten => 10,
            TokenCount::Twelve => 12,
        }
    }
}

impl TryFrom<u32> for TokenCount {
    type Error = WizardError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        TokenCount::ALL
            .into_iter()
            .find(|c| c.value() == n)
            .ok_or(WizardError::InvalidTokenCount(n))
    }
}

impl From<TokenCount> for u32 {
    fn from(count: TokenCount) -> Self {
        count.value()
    }
}

impl fmt::Display for TokenCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// An answer to the current prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardInput {
    /// Submit typed text (may be blank).
    Submit(String),
    /// Dismiss a skippable prompt.
    Skip,
    /// Pick a token count.
    Select(TokenCount),
}

impl WizardInput {
    fn kind(&self) -> &'static str {
        match self {
            WizardInput::Submit(_) => "text",
            WizardInput::Skip => "skip",
            WizardInput::Select(_) => "a token count",
        }
    }
}

/// Buttons on a text prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptAction {
    Submit,
    Skip,
}

/// Description of the prompt for the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub step: WizardStep,
    pub title: String,
    /// Whether a text field is shown.
    pub text_entry: bool,
    /// Buttons under the text field. Empty for the count prompt.
    pub actions: Vec<PromptAction>,
    /// Closed choices. Empty for text prompts.
    pub choices: Vec<TokenCount>,
}

impl Prompt {
    pub fn can_skip(&self) -> bool {
        self.actions.contains(&PromptAction::Skip)
    }
}

/// Which steps the wizard runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardProfile {
    /// Ask for a skill label between goal and count.
    pub skill_step_enabled: bool,
}

impl Default for WizardProfile {
    fn default() -> Self {
        Self {
            skill_step_enabled: true,
        }
    }
}

/// Source of answers for [`SetupWizard::drive`].
///
/// Each call is a suspension point: it returns once the user has answered.
pub trait Prompter {
    /// Answer `prompt`.
    ///
    /// # Errors
    ///
    /// Returns an error if no answer can be obtained (e.g. input closed).
    fn ask(&mut self, prompt: &Prompt) -> Result<WizardInput, WizardError>;
}

impl<F> Prompter for F
where
    F: FnMut(&Prompt) -> Result<WizardInput, WizardError>,
{
    fn ask(&mut self, prompt: &Prompt) -> Result<WizardInput, WizardError> {
        self(prompt)
    }
}

#[derive(Debug, Clone)]
pub struct SetupWizard {
    profile: WizardProfile,
    step: WizardStep,
}

impl Default for SetupWizard {
    fn default() -> Self {
        Self::new(WizardProfile::default())
    }
}

impl SetupWizard {
    pub fn new(profile: WizardProfile) -> Self {
        Self {
            profile,
            step: WizardStep::Idle,
        }
    }

    pub fn profile(&self) -> WizardProfile {
        self.profile
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn is_done(&self) -> bool {
        self.step == WizardStep::Done
    }

    /// Leave `Idle` and wait for the goal.
    ///
    /// # Errors
    ///
    /// Fails if the wizard already started; use [`SetupWizard::restart`]
    /// to run it again.
    pub fn start(&mut self) -> Result<(), WizardError> {
        match self.step {
            WizardStep::Idle => {
                self.step = WizardStep::AwaitingGoal;
                tracing::debug!("setup wizard started");
                Ok(())
            }
            WizardStep::Done => Err(WizardError::AlreadyComplete),
            step => Err(WizardError::UnexpectedInput {
                step: step.to_string(),
                input: "start".to_string(),
            }),
        }
    }

    /// Clear `board` and go back to the goal prompt, from any step.
    pub fn restart(&mut self, board: &mut BoardState) -> BoardEvent {
        let event = board.clear();
        self.step = WizardStep::AwaitingGoal;
        tracing::debug!("setup wizard restarted");
        event
    }

    /// Prompt for the current step, or `None` when idle or done.
    pub fn prompt(&self) -> Option<Prompt> {
        let prompt = match self.step {
            WizardStep::Idle | WizardStep::Done => return None,
            WizardStep::AwaitingGoal => Prompt {
                step: self.step,
                title: "I am working for:".to_string(),
                text_entry: true,
                actions: vec![PromptAction::Submit],
                choices: Vec::new(),
            },
            WizardStep::AwaitingSkill => Prompt {
                step: self.step,
                title: "Skill to earn star:".to_string(),
                text_entry: true,
                actions: vec![PromptAction::Submit, PromptAction::Skip],
                choices: Vec::new(),
            },
            WizardStep::AwaitingTokenCount => Prompt {
                step: self.step,
                title: "Number of stars to earn:".to_string(),
                text_entry: false,
                actions: Vec::new(),
                choices: TokenCount::ALL.to_vec(),
            },
        };
        Some(prompt)
    }

    /// Apply one answer to the current step and advance.
    ///
    /// Returns the board events produced, in order. Choosing a count of N
    /// yields N separate `TokenAdded` events.
    ///
    /// # Errors
    ///
    /// Rejects input the current step does not offer; state is unchanged.
    pub fn dispatch(
        &mut self,
        board: &mut BoardState,
        input: WizardInput,
    ) -> Result<Vec<BoardEvent>, WizardError> {
        let (events, next) = match (self.step, input) {
            (WizardStep::Idle, _) => return Err(WizardError::NotStarted),
            (WizardStep::Done, _) => return Err(WizardError::AlreadyComplete),

            (WizardStep::AwaitingGoal, WizardInput::Submit(text)) => {
                let next = if self.profile.skill_step_enabled {
                    WizardStep::AwaitingSkill
                } else {
                    WizardStep::AwaitingTokenCount
                };
                (vec![board.set_goal(&text)], next)
            }

            (WizardStep::AwaitingSkill, WizardInput::Submit(text)) => {
                (vec![board.set_skill(&text)], WizardStep::AwaitingTokenCount)
            }
            (WizardStep::AwaitingSkill, WizardInput::Skip) => {
                (Vec::new(), WizardStep::AwaitingTokenCount)
            }

            (WizardStep::AwaitingTokenCount, WizardInput::Select(count)) => {
                let events: Vec<BoardEvent> =
                    (0..count.value()).map(|_| board.add_token()).collect();
                tracing::info!(
                    "board set up: '{}' with {} tokens",
                    board.goal(),
                    count.value()
                );
                (events, WizardStep::Done)
            }

            (step, input) => {
                return Err(WizardError::UnexpectedInput {
                    step: step.to_string(),
                    input: input.kind().to_string(),
                })
            }
        };

        tracing::debug!("setup wizard: {} -> {}", self.step, next);
        self.step = next;
        Ok(events)
    }

    /// Run the remaining steps, asking `prompter` for each answer.
    ///
    /// Starts the wizard if it is idle.
    ///
    /// # Errors
    ///
    /// Propagates prompter failures and rejected answers. Steps already
    /// answered stay applied.
    pub fn drive<P: Prompter + ?Sized>(
        &mut self,
        board: &mut BoardState,
        prompter: &mut P,
    ) -> Result<Vec<BoardEvent>, WizardError> {
        if self.step == WizardStep::Idle {
            self.start()?;
        }

        let mut events = Vec::new();
        while let Some(prompt) = self.prompt() {
            let input = prompter.ask(&prompt)?;
            events.extend(self.dispatch(board, input)?);
        }
        Ok(events)
    }
}
