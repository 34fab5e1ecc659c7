//! Line-based prompts on a reader/writer pair.
//!
//! Answers given as command-line flags are used first; anything missing is
//! asked on the terminal. A closed input stream fails text and count
//! prompts and answers yes/no questions with "no".

use std::io::{BufRead, Write};

use starboard_core::{
    ModalAction, Prompt, Prompter, TokenCount, WizardError, WizardInput, WizardStep,
};

/// Wizard answers supplied up front.
#[derive(Debug, Clone, Default)]
pub struct Preset {
    pub goal: Option<String>,
    pub skill: Option<String>,
    pub skip_skill: bool,
    pub count: Option<TokenCount>,
}

impl Preset {
    fn take(&mut self, step: WizardStep) -> Option<WizardInput> {
        match step {
            WizardStep::AwaitingGoal => self.goal.take().map(WizardInput::Submit),
            WizardStep::AwaitingSkill => {
                if self.skip_skill {
                    self.skip_skill = false;
                    Some(WizardInput::Skip)
                } else {
                    self.skill.take().map(WizardInput::Submit)
                }
            }
            WizardStep::AwaitingTokenCount => self.count.take().map(WizardInput::Select),
            WizardStep::Idle | WizardStep::Done => None,
        }
    }
}

pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
    preset: Preset,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self::with_preset(input, output, Preset::default())
    }

    pub fn with_preset(input: R, output: W, preset: Preset) -> Self {
        Self {
            input,
            output,
            preset,
        }
    }

    /// Read one line without its terminator; `None` on end of input.
    pub fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Ask a modal question and return the chosen action.
    ///
    /// The first action is the default for "y"; the last one is chosen on
    /// anything else, including end of input.
    pub fn choose(
        &mut self,
        title: &str,
        message: &str,
        actions: &[ModalAction],
    ) -> std::io::Result<ModalAction> {
        let (first, last) = match (actions.first(), actions.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Ok(ModalAction::Cancel),
        };
        if actions.len() == 1 {
            writeln!(self.output, "{title}\n{message}")?;
            write!(self.output, "[{}] ", first.label())?;
            self.output.flush()?;
            self.read_line()?;
            return Ok(first);
        }

        writeln!(self.output, "{title}\n{message}")?;
        write!(self.output, "{}? [y/N] ", first.label())?;
        self.output.flush()?;
        let answer = self.read_line()?.unwrap_or_default();
        if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            Ok(first)
        } else {
            Ok(last)
        }
    }

    fn ask_text(&mut self, prompt: &Prompt) -> Result<WizardInput, WizardError> {
        let io = |e: std::io::Error| WizardError::PromptFailed(e.to_string());
        if prompt.can_skip() {
            writeln!(self.output, "{} (leave blank to skip)", prompt.title).map_err(io)?;
        } else {
            writeln!(self.output, "{}", prompt.title).map_err(io)?;
        }
        write!(self.output, "> ").map_err(io)?;
        self.output.flush().map_err(io)?;

        let line = self
            .read_line()
            .map_err(io)?
            .ok_or_else(|| WizardError::PromptFailed("input closed".to_string()))?;
        if line.trim().is_empty() && prompt.can_skip() {
            Ok(WizardInput::Skip)
        } else {
            Ok(WizardInput::Submit(line))
        }
    }

    fn ask_count(&mut self, prompt: &Prompt) -> Result<WizardInput, WizardError> {
        let io = |e: std::io::Error| WizardError::PromptFailed(e.to_string());
        let choices = prompt
            .choices
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        loop {
            writeln!(self.output, "{} [{}]", prompt.title, choices).map_err(io)?;
            write!(self.output, "> ").map_err(io)?;
            self.output.flush().map_err(io)?;

            let line = self
                .read_line()
                .map_err(io)?
                .ok_or_else(|| WizardError::PromptFailed("input closed".to_string()))?;
            let picked = line
                .trim()
                .parse::<u32>()
                .ok()
                .and_then(|n| TokenCount::try_from(n).ok())
                .filter(|c| prompt.choices.contains(c));
            match picked {
                Some(count) => return Ok(WizardInput::Select(count)),
                None => writeln!(self.output, "Please choose one of {choices}.").map_err(io)?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn ask(&mut self, prompt: &Prompt) -> Result<WizardInput, WizardError> {
        if let Some(answer) = self.preset.take(prompt.step) {
            return Ok(answer);
        }
        if prompt.text_entry {
            self.ask_text(prompt)
        } else {
            self.ask_count(prompt)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starboard_core::{BoardState, SetupWizard, WizardProfile};
    use std::io::Cursor;

    const CLEAR_ACTIONS: [ModalAction; 2] = [ModalAction::Clear, ModalAction::Cancel];

    fn run(input: &str, preset: Preset) -> (BoardState, String, Result<(), WizardError>) {
        let mut board = BoardState::new();
        let mut wizard = SetupWizard::new(WizardProfile::default());
        let mut out = Vec::new();
        let result = {
            let mut prompter =
                TerminalPrompter::with_preset(Cursor::new(input.to_string()), &mut out, preset);
            wizard.drive(&mut board, &mut prompter).map(|_| ())
        };
        (board, String::from_utf8(out).unwrap(), result)
    }

    #[test]
    fn reads_all_answers_from_input() {
        let (board, out, result) = run("Zoo trip\nShare toys\n6\n", Preset::default());
        result.unwrap();
        assert_eq!(board.goal(), "Zoo trip");
        assert_eq!(board.skill_label(), "Share toys");
        assert_eq!(board.len(), 6);
        assert!(out.contains("I am working for:"));
        assert!(out.contains("Skill to earn star: (leave blank to skip)"));
        assert!(out.contains("Number of stars to earn: [5, 6, 10, 12]"));
    }

    #[test]
    fn blank_skill_line_skips() {
        let (board, _, result) = run("Zoo\n\n5\n", Preset::default());
        result.unwrap();
        assert_eq!(board.skill_label(), starboard_core::DEFAULT_SKILL);
    }

    #[test]
    fn invalid_count_is_asked_again() {
        let (board, out, result) = run("Zoo\n\n7\nten\n10\n", Preset::default());
        result.unwrap();
        assert_eq!(board.len(), 10);
        assert_eq!(out.matches("Please choose one of").count(), 2);
    }

    #[test]
    fn preset_answers_skip_terminal() {
        let preset = Preset {
            goal: Some("Clean Room".into()),
            skill: None,
            skip_skill: true,
            count: Some(TokenCount::Six),
        };
        let (board, out, result) = run("", preset);
        result.unwrap();
        assert_eq!(board.goal(), "Clean Room");
        assert_eq!(board.len(), 6);
        assert!(out.is_empty());
    }

    #[test]
    fn closed_input_fails_prompt() {
        let (_, _, result) = run("Zoo\n", Preset::default());
        assert!(matches!(result, Err(WizardError::PromptFailed(_))));
    }

    #[test]
    fn choose_defaults_to_last_action() {
        let mut out = Vec::new();
        let mut prompter = TerminalPrompter::new(Cursor::new(String::new()), &mut out);
        let action = prompter
            .choose("Clear Board", "Are you sure?", &CLEAR_ACTIONS)
            .unwrap();
        assert_eq!(action, ModalAction::Cancel);
    }

    #[test]
    fn choose_yes_picks_first_action() {
        let mut out = Vec::new();
        let mut prompter = TerminalPrompter::new(Cursor::new("y\n".to_string()), &mut out);
        let action = prompter
            .choose("Clear Board", "Are you sure?", &CLEAR_ACTIONS)
            .unwrap();
        assert_eq!(action, ModalAction::Clear);
    }
}
