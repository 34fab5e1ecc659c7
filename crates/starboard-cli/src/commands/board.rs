//! One-shot board commands against the saved board.

use std::io::{self, BufRead, Write};

use starboard_core::{
    BoardState, ClearConfirmation, CompletionNotice, Config, LoadState, ModalAction,
};

use super::common::{describe_event, open_saved_board, print_board, row_index, BoardView};
use super::prompt::TerminalPrompter;
use super::setup::{drive_wizard, run_wizard, SetupArgs};

/// Open the saved board, running the wizard first if nothing was saved.
fn open_or_setup(config: &Config) -> Result<BoardState, Box<dyn std::error::Error>> {
    let (mut board, state) = open_saved_board(config)?;
    if state == LoadState::FirstRun {
        tracing::info!("no saved board, starting setup");
        run_wizard(&mut board, config, Default::default(), false)?;
    }
    Ok(board)
}

pub fn show(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let board = open_or_setup(&config)?;
    if json {
        let view = BoardView::new(&board, &config);
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_board(&mut io::stdout().lock(), &board, &config)?;
    }
    Ok(())
}

pub fn add() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut board = open_or_setup(&config)?;
    let event = board.add_token();
    println!("{}", describe_event(&event));
    Ok(())
}

pub fn toggle(row: usize) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut board = open_or_setup(&config)?;
    let index = row_index(row, &board)?;
    let outcome = board.toggle_earned(index)?;
    for event in &outcome.events {
        println!("{}", describe_event(event));
    }
    if outcome.completed {
        let stdin = io::stdin();
        let mut prompter = TerminalPrompter::new(stdin.lock(), io::stdout().lock());
        acknowledge_completion(&mut board, &config, &mut prompter)?;
    }
    Ok(())
}

pub fn remove(row: usize) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut board = open_or_setup(&config)?;
    let index = row_index(row, &board)?;
    let event = board.remove_token(index)?;
    println!("{}", describe_event(&event));
    Ok(())
}

pub fn clear(yes: bool, setup: SetupArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let (mut board, _) = open_saved_board(&config)?;

    let stdin = io::stdin();
    let mut prompter =
        TerminalPrompter::with_preset(stdin.lock(), io::stdout().lock(), setup.into());
    if !yes && config.profile.confirm_clear && !confirm_clear(&mut prompter)? {
        writeln!(prompter.output(), "cancelled")?;
        return Ok(());
    }
    drive_wizard(&mut board, &config, &mut prompter, true)
}

/// Ask "Are you sure?" before clearing.
pub fn confirm_clear<R: BufRead, W: Write>(
    prompter: &mut TerminalPrompter<R, W>,
) -> io::Result<bool> {
    let confirmation = ClearConfirmation::default();
    let action = prompter.choose(
        &confirmation.title,
        &confirmation.message,
        &confirmation.actions,
    )?;
    writeln!(prompter.output())?;
    Ok(action == ModalAction::Clear)
}

/// Show the completion notice and act on the chosen action.
pub fn acknowledge_completion<R: BufRead, W: Write>(
    board: &mut BoardState,
    config: &Config,
    prompter: &mut TerminalPrompter<R, W>,
) -> Result<(), Box<dyn std::error::Error>> {
    let notice = CompletionNotice::new(board.goal(), config.profile.completion);
    let action = prompter.choose("Congratulations!", &notice.headline(), &notice.actions)?;
    writeln!(prompter.output())?;

    if notice.clears(action) {
        drive_wizard(board, config, prompter, true)?;
    }
    Ok(())
}
