//! Setup wizard command.

use clap::Args;
use std::io::{self, BufRead, Write};

use starboard_core::{BoardState, Config, SetupWizard, TokenCount};

use super::common::{describe_event, open_saved_board, print_board};
use super::prompt::{Preset, TerminalPrompter};

/// Answers for the wizard; anything omitted is asked on the terminal.
#[derive(Args, Debug, Clone, Default)]
pub struct SetupArgs {
    /// Goal to work for
    #[arg(long)]
    pub goal: Option<String>,
    /// Skill that earns a star
    #[arg(long, conflicts_with = "skip_skill")]
    pub skill: Option<String>,
    /// Skip the skill prompt
    #[arg(long)]
    pub skip_skill: bool,
    /// Number of stars to earn (5, 6, 10 or 12)
    #[arg(long, value_parser = parse_count)]
    pub count: Option<TokenCount>,
}

impl From<SetupArgs> for Preset {
    fn from(args: SetupArgs) -> Self {
        Preset {
            goal: args.goal,
            skill: args.skill,
            skip_skill: args.skip_skill,
            count: args.count,
        }
    }
}

fn parse_count(s: &str) -> Result<TokenCount, String> {
    let n: u32 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    TokenCount::try_from(n).map_err(|e| e.to_string())
}

/// Run the wizard on `board` from its first step, printing each change
/// and then the resulting board.
///
/// The board is cleared first when `restart` is set.
pub fn drive_wizard<R: BufRead, W: Write>(
    board: &mut BoardState,
    config: &Config,
    prompter: &mut TerminalPrompter<R, W>,
    restart: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wizard = SetupWizard::new(config.wizard_profile());
    if restart {
        wizard.restart(board);
    }

    let events = wizard.drive(board, prompter)?;
    for event in &events {
        writeln!(prompter.output(), "{}", describe_event(event))?;
    }
    print_board(prompter.output(), board, config)?;
    Ok(())
}

/// [`drive_wizard`] on the process terminal.
pub fn run_wizard(
    board: &mut BoardState,
    config: &Config,
    preset: Preset,
    restart: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut prompter = TerminalPrompter::with_preset(stdin.lock(), io::stdout().lock(), preset);
    drive_wizard(board, config, &mut prompter, restart)
}

pub fn run(args: SetupArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let (mut board, _) = open_saved_board(&config)?;
    run_wizard(&mut board, &config, args.into(), true)
}
