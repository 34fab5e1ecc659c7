//! Interactive live-list session.
//!
//! Keeps one board open and applies commands as they are typed, printing
//! each change as it happens. This is the only way to use the board with
//! persistence disabled.

use std::io::{self, BufRead, Write};

use starboard_core::{BoardState, Config, LoadState};

use super::board::{acknowledge_completion, confirm_clear};
use super::common::{describe_event, open_session_board, print_board, row_index};
use super::prompt::TerminalPrompter;
use super::setup::drive_wizard;

const HELP: &str = "\
commands:
  add          add a star
  toggle <n>   mark star n earned / not earned
  remove <n>   delete star n
  clear        start a new board
  show         print the board
  help         this text
  quit         leave";

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionCommand {
    Add,
    Toggle(usize),
    Remove(usize),
    Clear,
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<SessionCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let row = |arg: Option<&str>| -> Result<usize, String> {
        let arg = arg.ok_or_else(|| format!("usage: {verb} <n>"))?;
        arg.parse::<usize>()
            .map_err(|_| format!("'{arg}' is not a star number"))
    };

    let command = match verb.to_lowercase().as_str() {
        "add" | "+" => SessionCommand::Add,
        "toggle" | "t" => SessionCommand::Toggle(row(words.next())?),
        "remove" | "rm" => SessionCommand::Remove(row(words.next())?),
        "clear" => SessionCommand::Clear,
        "show" | "ls" => SessionCommand::Show,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let (mut board, state) = open_session_board(&config)?;
    tracing::debug!("session started (persistent: {})", board.is_persistent());

    let stdin = io::stdin();
    let mut prompter = TerminalPrompter::new(stdin.lock(), io::stdout().lock());
    run_loop(&mut board, &config, state, &mut prompter)
}

/// Drive the session until `quit` or end of input.
fn run_loop<R: BufRead, W: Write>(
    board: &mut BoardState,
    config: &Config,
    state: LoadState,
    prompter: &mut TerminalPrompter<R, W>,
) -> Result<(), Box<dyn std::error::Error>> {
    if state == LoadState::FirstRun {
        drive_wizard(board, config, prompter, false)?;
    } else {
        print_board(prompter.output(), board, config)?;
    }

    loop {
        write!(prompter.output(), "starboard> ")?;
        prompter.output().flush()?;
        let Some(line) = prompter.read_line()? else {
            writeln!(prompter.output())?;
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(prompter.output(), "{message}")?;
                continue;
            }
        };

        match command {
            SessionCommand::Add => {
                let event = board.add_token();
                writeln!(prompter.output(), "{}", describe_event(&event))?;
            }
            SessionCommand::Toggle(row) => {
                let toggled = row_index(row, board)
                    .and_then(|i| board.toggle_earned(i).map_err(|e| e.to_string()));
                let outcome = match toggled {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        writeln!(prompter.output(), "error: {e}")?;
                        continue;
                    }
                };
                for event in &outcome.events {
                    writeln!(prompter.output(), "{}", describe_event(event))?;
                }
                if outcome.completed {
                    acknowledge_completion(board, config, prompter)?;
                }
            }
            SessionCommand::Remove(row) => {
                let removed = row_index(row, board)
                    .and_then(|i| board.remove_token(i).map_err(|e| e.to_string()));
                match removed {
                    Ok(event) => writeln!(prompter.output(), "{}", describe_event(&event))?,
                    Err(e) => writeln!(prompter.output(), "error: {e}")?,
                }
            }
            SessionCommand::Clear => {
                if config.profile.confirm_clear && !confirm_clear(prompter)? {
                    writeln!(prompter.output(), "cancelled")?;
                    continue;
                }
                drive_wizard(board, config, prompter, true)?;
            }
            SessionCommand::Show => print_board(prompter.output(), board, config)?,
            SessionCommand::Help => writeln!(prompter.output(), "{HELP}")?,
            SessionCommand::Quit => break,
        }
    }
    Ok(())
}
