use std::collections::BTreeSet;
use std::str::FromStr;

use quiz_core::Clock;
use quiz_core::model::{
    Correctness, DisplayState, OptionLabel, OptionMark, ParseIdError, QuestionId, QuizStats,
};
use services::{QuizSession, SessionError};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  select <q> <option>   pick an option for question <q>
  reveal <q>            show or hide the answer of question <q>
  state [q]             state of one question, or all as JSON
  stats                 aggregate stats
  export                stats and every question as JSON
  show-all | hide-all   show or hide every answer
  reset                 clear every question
  help                  this list
  quit | exit           leave";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}, type `help` for the list")]
    Unknown(String),
    #[error("`{command}` needs a {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("`{0}` takes fewer arguments")]
    TooManyArguments(&'static str),
    #[error(transparent)]
    Question(#[from] ParseIdError),
}

/// One line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Select(QuestionId, OptionLabel),
    Reveal(QuestionId),
    State(Option<QuestionId>),
    Stats,
    Export,
    ShowAll,
    HideAll,
    Reset,
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "select" => {
                let question = question_arg(&mut words, "select")?;
                let option = words.next().ok_or(CommandError::MissingArgument {
                    command: "select",
                    argument: "option",
                })?;
                no_more(&mut words, "select")?;
                return Ok(Self::Select(question, OptionLabel::from(option)));
            }
            "reveal" => {
                let question = question_arg(&mut words, "reveal")?;
                no_more(&mut words, "reveal")?;
                return Ok(Self::Reveal(question));
            }
            "state" => {
                let question = words.next().map(str::parse::<QuestionId>).transpose()?;
                no_more(&mut words, "state")?;
                return Ok(Self::State(question));
            }
            "stats" => ("stats", Self::Stats),
            "export" => ("export", Self::Export),
            "show-all" => ("show-all", Self::ShowAll),
            "hide-all" => ("hide-all", Self::HideAll),
            "reset" => ("reset", Self::Reset),
            "help" => ("help", Self::Help),
            "quit" | "exit" => ("quit", Self::Quit),
            _ => return Err(CommandError::Unknown(name.to_string())),
        };

        no_more(&mut words, command.0)?;
        Ok(command.1)
    }
}

fn question_arg<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<QuestionId, CommandError> {
    let raw = words.next().ok_or(CommandError::MissingArgument {
        command,
        argument: "question number",
    })?;
    Ok(raw.parse()?)
}

fn no_more<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<(), CommandError> {
    match words.next() {
        Some(_) => Err(CommandError::TooManyArguments(command)),
        None => Ok(()),
    }
}

/// What the console loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Print(String),
    Quit,
}

/// Drives a `QuizSession` from console commands.
pub struct Console {
    session: QuizSession,
    clock: Clock,
}

impl Console {
    #[must_use]
    pub fn new(session: QuizSession, clock: Clock) -> Self {
        Self { session, clock }
    }

    /// Apply `command` to the session and render the result.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownQuestion` for ids outside the answer key
    /// and `SessionError::Export` if JSON rendering fails.
    pub fn execute(&mut self, command: ConsoleCommand) -> Result<Reply, SessionError> {
        let text = match command {
            ConsoleCommand::Select(question, option) => {
                self.session.record_selection(question, option.clone())?;
                format!("question {question}: selected {option}")
            }
            ConsoleCommand::Reveal(question) => {
                let shown = self.session.toggle_reveal(question)?;
                if shown {
                    self.render_reveal(question)?
                } else {
                    format!("question {question}: answer hidden")
                }
            }
            ConsoleCommand::State(Some(question)) => {
                render_state(question, &self.session.display_state(question)?)
            }
            ConsoleCommand::State(None) => serde_json::to_string_pretty(&self.session.snapshot())?,
            ConsoleCommand::Stats => render_stats(&self.session.stats()),
            ConsoleCommand::Export => self.session.export(&self.clock).to_json_pretty()?,
            ConsoleCommand::ShowAll => {
                let changed = self.session.set_all_revealed(true);
                format!("{changed} answer(s) shown")
            }
            ConsoleCommand::HideAll => {
                let changed = self.session.set_all_revealed(false);
                format!("{changed} answer(s) hidden")
            }
            ConsoleCommand::Reset => {
                self.session.reset_all();
                "all questions reset".to_string()
            }
            ConsoleCommand::Help => HELP.to_string(),
            ConsoleCommand::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Print(text))
    }

    fn render_reveal(&self, question: QuestionId) -> Result<String, SessionError> {
        let state = self.session.display_state(question)?;
        let mut line = format!("question {question}: {}", correctness_word(state.correct));
        line.push_str(" |");

        // Every label used by the key, plus an off-key selection.
        let mut options: BTreeSet<&OptionLabel> = self
            .session
            .answer_key()
            .iter()
            .map(|(_, label)| label)
            .collect();
        options.extend(state.selected_option.as_ref());

        for option in options {
            let suffix = match self.session.option_feedback(question, option)? {
                OptionMark::Correct => ":correct",
                OptionMark::Incorrect => ":incorrect",
                OptionMark::Selected | OptionMark::Neutral => "",
            };
            line.push(' ');
            line.push_str(option.as_str());
            line.push_str(suffix);
        }
        Ok(line)
    }
}

fn correctness_word(correct: Correctness) -> &'static str {
    match correct {
        Correctness::Correct => "correct",
        Correctness::Incorrect => "incorrect",
        Correctness::Unknown => "not answered",
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn render_state(question: QuestionId, state: &DisplayState) -> String {
    let selected = state
        .selected_option
        .as_ref()
        .map_or("-", OptionLabel::as_str);
    let answer = state.answer.as_ref().map_or("hidden", OptionLabel::as_str);
    format!(
        "question {question}: selected={selected} answered={} revealed={} viewed={} correct={:?} answer={answer}",
        yes_no(state.answered),
        yes_no(state.revealed),
        yes_no(state.viewed),
        state.correct,
    )
}

fn render_stats(stats: &QuizStats) -> String {
    format!(
        "total {} | answered {} | correct {} | viewed {} | accuracy {:.1}%",
        stats.total,
        stats.answered_count,
        stats.correct_count,
        stats.viewed_count,
        stats.accuracy_percent,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::AnswerKey;
    use quiz_core::time::fixed_clock;

    fn qid(id: u64) -> QuestionId {
        QuestionId::new(id).unwrap()
    }

    fn console() -> Console {
        Console::new(QuizSession::new("1=B,2=D".parse::<AnswerKey>().unwrap()), fixed_clock())
    }

    fn run(console: &mut Console, line: &str) -> String {
        match console.execute(line.parse().unwrap()).unwrap() {
            Reply::Print(text) => text,
            Reply::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn parses_commands() {
        assert_eq!(
            "select 2 C".parse::<ConsoleCommand>(),
            Ok(ConsoleCommand::Select(qid(2), OptionLabel::from("C")))
        );
        assert_eq!("  REVEAL 1 ".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Reveal(qid(1))));
        assert_eq!("state".parse::<ConsoleCommand>(), Ok(ConsoleCommand::State(None)));
        assert_eq!("state 3".parse::<ConsoleCommand>(), Ok(ConsoleCommand::State(Some(qid(3)))));
        assert_eq!("exit".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Quit));
        assert_eq!("show-all".parse::<ConsoleCommand>(), Ok(ConsoleCommand::ShowAll));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!("".parse::<ConsoleCommand>(), Err(CommandError::Empty));
        assert_eq!(
            "select 1".parse::<ConsoleCommand>(),
            Err(CommandError::MissingArgument {
                command: "select",
                argument: "option"
            })
        );
        assert_eq!(
            "reveal x".parse::<ConsoleCommand>(),
            Err(CommandError::Question(ParseIdError::NotANumber {
                raw: "x".to_string()
            }))
        );
        assert_eq!(
            "stats now".parse::<ConsoleCommand>(),
            Err(CommandError::TooManyArguments("stats"))
        );
        assert!(matches!(
            "dance".parse::<ConsoleCommand>(),
            Err(CommandError::Unknown(_))
        ));
    }

    #[test]
    fn reveal_prints_feedback_per_alternative() {
        let mut console = console();
        run(&mut console, "select 2 A");
        let text = run(&mut console, "reveal 2");
        assert_eq!(text, "question 2: incorrect | A:incorrect B D:correct");
        assert_eq!(run(&mut console, "reveal 2"), "question 2: answer hidden");
    }

    #[test]
    fn reveal_lists_labels_outside_a_to_e() {
        let session = QuizSession::new("1=F,2=B".parse::<AnswerKey>().unwrap());
        let mut console = Console::new(session, fixed_clock());
        run(&mut console, "select 1 Z");
        assert_eq!(
            run(&mut console, "reveal 1"),
            "question 1: incorrect | B F:correct Z:incorrect"
        );
    }

    #[test]
    fn reveal_without_selection_marks_only_the_answer() {
        let session = QuizSession::new("1=F".parse::<AnswerKey>().unwrap());
        let mut console = Console::new(session, fixed_clock());
        assert_eq!(
            run(&mut console, "reveal 1"),
            "question 1: not answered | F:correct"
        );
    }

    #[test]
    fn state_and_stats_lines() {
        let mut console = console();
        run(&mut console, "select 1 B");
        run(&mut console, "reveal 1");
        run(&mut console, "select 2 A");

        assert_eq!(
            run(&mut console, "state 1"),
            "question 1: selected=B answered=yes revealed=yes viewed=yes correct=Correct answer=B"
        );
        assert_eq!(
            run(&mut console, "stats"),
            "total 2 | answered 2 | correct 1 | viewed 1 | accuracy 50.0%"
        );
    }

    #[test]
    fn bulk_and_reset_commands() {
        let mut console = console();
        assert_eq!(run(&mut console, "show-all"), "2 answer(s) shown");
        assert_eq!(run(&mut console, "show-all"), "0 answer(s) shown");
        assert_eq!(run(&mut console, "hide-all"), "2 answer(s) hidden");
        assert_eq!(run(&mut console, "reset"), "all questions reset");
        assert_eq!(
            run(&mut console, "stats"),
            "total 2 | answered 0 | correct 0 | viewed 0 | accuracy 0.0%"
        );
    }

    #[test]
    fn export_is_json() {
        let mut console = console();
        let text = run(&mut console, "export");
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["total"], 2);
        assert_eq!(value["exported_at"], "2023-11-14T22:13:20Z");
    }

    #[test]
    fn unknown_question_is_an_error() {
        let mut console = console();
        let err = console
            .execute(ConsoleCommand::Reveal(qid(5)))
            .unwrap_err();
        assert!(matches!(err, SessionError::UnknownQuestion(_)));
    }

    #[test]
    fn quit_ends_the_loop() {
        let mut console = console();
        assert_eq!(console.execute(ConsoleCommand::Quit).unwrap(), Reply::Quit);
    }
}
