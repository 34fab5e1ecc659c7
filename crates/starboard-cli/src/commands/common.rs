//! Shared helpers for board commands: opening the board and rendering it.

use serde::Serialize;
use std::io::Write;

use starboard_core::{BoardEvent, BoardState, Config, FileStore, LoadState, TokenRow};

const PERSISTENCE_DISABLED: &str =
    "persistence is disabled (profile.persistence_enabled = false); use `starboard session`";

/// JSON shape printed by `show --json`.
#[derive(Serialize)]
pub struct BoardView {
    pub title: String,
    pub goal: String,
    pub skill_label: String,
    pub token_count: usize,
    pub earned_count: usize,
    pub complete: bool,
    pub rows: Vec<TokenRow>,
}

impl BoardView {
    pub fn new(board: &BoardState, config: &Config) -> Self {
        Self {
            title: board.title(),
            goal: board.goal().to_string(),
            skill_label: board.skill_label().to_string(),
            token_count: board.len(),
            earned_count: board.earned_count(),
            complete: board.check_completion(),
            rows: board.rows(&config.labels.earned),
        }
    }
}

/// Open the saved board for one-shot commands.
///
/// One-shot commands only make sense when the board survives the process;
/// with persistence disabled they point at `starboard session`.
pub fn open_saved_board(
    config: &Config,
) -> Result<(BoardState, LoadState), Box<dyn std::error::Error>> {
    if !config.profile.persistence_enabled {
        return Err(PERSISTENCE_DISABLED.into());
    }
    let store = FileStore::open_default()?;
    tracing::debug!("opened board store at {}", store.path().display());
    Ok(BoardState::open(Box::new(store)))
}

/// Open a board for an interactive session, honouring the persistence flag.
pub fn open_session_board(
    config: &Config,
) -> Result<(BoardState, LoadState), Box<dyn std::error::Error>> {
    if config.profile.persistence_enabled {
        open_saved_board(config)
    } else {
        Ok((BoardState::new(), LoadState::FirstRun))
    }
}

/// Parse a user-facing row number. Rows are addressed from 1 on the
/// command line and from 0 in the core.
pub fn row_index(row: usize, board: &BoardState) -> Result<usize, String> {
    match board.len() {
        0 => Err(format!("no star {row} (the board is empty)")),
        len if row == 0 || row > len => {
            Err(format!("no star {row} (stars are numbered 1..={len})"))
        }
        _ => Ok(row - 1),
    }
}

pub fn render_row(row: &TokenRow) -> String {
    let star = if row.earned { "★" } else { "☆" };
    let check = if row.checkmark { " ✓" } else { "" };
    format!("{:>3}. {} {}{}", row.index + 1, star, row.label, check)
}

pub fn print_board<W: Write>(
    out: &mut W,
    board: &BoardState,
    config: &Config,
) -> std::io::Result<()> {
    writeln!(out, "{}", board.title())?;
    for row in board.rows(&config.labels.earned) {
        writeln!(out, "{}", render_row(&row))?;
    }
    writeln!(out, "{}/{} earned", board.earned_count(), board.len())?;
    Ok(())
}

/// One line per event, for the live list.
pub fn describe_event(event: &BoardEvent) -> String {
    match event {
        BoardEvent::TokenAdded { index, .. } => format!("+ star {}", index + 1),
        BoardEvent::TokenToggled { index, earned, .. } => {
            if *earned {
                format!("★ star {} earned", index + 1)
            } else {
                format!("☆ star {} unearned", index + 1)
            }
        }
        BoardEvent::TokenRemoved { index, .. } => format!("- star {}", index + 1),
        BoardEvent::GoalChanged { goal, .. } => format!("goal: {goal}"),
        BoardEvent::SkillChanged { skill, .. } => format!("skill: {skill}"),
        BoardEvent::BoardCleared { .. } => "board cleared".to_string(),
        BoardEvent::GoalCompleted { goal, .. } => format!("all stars earned for {goal}"),
    }
}
