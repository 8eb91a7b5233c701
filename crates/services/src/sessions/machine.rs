//! Navigation state machine for a running quiz.
//!
//! One [`AnswerState`] slot per question plus a cursor. Raw console input is
//! parsed into a [`Command`]; what a command does depends only on whether the
//! slot under the cursor is still open or already resolved, and is looked up
//! in [`TRANSITIONS`].

use quiz_core::model::AnswerState;
use thiserror::Error;

//
// ─── COMMANDS ─────────────────────────────────────────────────────────────────
//

/// A user command against the question under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Finish,
    /// Empty input: skip the question.
    Skip,
    /// 0-based choice index.
    Choose(usize),
    /// Reopen a resolved question.
    Change,
}

/// Input that could not be turned into a command. State is never touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputRejection {
    #[error("unrecognized input {0:?}")]
    Unrecognized(String),

    #[error("choice {value} is out of range (1-{max})")]
    OutOfRange { value: i64, max: usize },
}

/// Parse one line of input for a question with `choice_count` choices.
///
/// Letters are case-insensitive: `n` next, `p` previous, `f` finish, `c` change.
/// An empty line skips; a number picks a 1-based choice.
///
/// # Errors
///
/// Returns `InputRejection` for unknown text or an out-of-range number.
pub fn parse_command(raw: &str, choice_count: usize) -> Result<Command, InputRejection> {
    let input = raw.trim();
    if input.is_empty() {
        return Ok(Command::Skip);
    }

    match input.to_ascii_lowercase().as_str() {
        "n" | "next" => return Ok(Command::Next),
        "p" | "prev" | "previous" => return Ok(Command::Prev),
        "f" | "finish" => return Ok(Command::Finish),
        "c" | "change" => return Ok(Command::Change),
        _ => {}
    }

    let value: i64 = input
        .parse()
        .map_err(|_| InputRejection::Unrecognized(input.to_owned()))?;
    match usize::try_from(value) {
        Ok(choice) if (1..=choice_count).contains(&choice) => Ok(Command::Choose(choice - 1)),
        _ => Err(InputRejection::OutOfRange {
            value,
            max: choice_count,
        }),
    }
}

//
// ─── DISPATCH TABLE ───────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotKind {
    Open,
    Resolved,
}

impl From<AnswerState> for SlotKind {
    fn from(state: AnswerState) -> Self {
        if state.is_resolved() {
            SlotKind::Resolved
        } else {
            SlotKind::Open
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Next,
    Prev,
    Finish,
    Skip,
    Choose,
    Change,
}

impl From<Command> for CommandKind {
    fn from(command: Command) -> Self {
        match command {
            Command::Next => CommandKind::Next,
            Command::Prev => CommandKind::Prev,
            Command::Finish => CommandKind::Finish,
            Command::Skip => CommandKind::Skip,
            Command::Choose(_) => CommandKind::Choose,
            Command::Change => CommandKind::Change,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Forward,
    Back,
    Finish,
    MarkSkipped,
    Record,
    Reopen,
}

/// Accepted (slot, command) pairs. Anything missing is rejected without effect.
const TRANSITIONS: &[(SlotKind, CommandKind, Action)] = &[
    (SlotKind::Open, CommandKind::Next, Action::Forward),
    (SlotKind::Open, CommandKind::Prev, Action::Back),
    (SlotKind::Open, CommandKind::Finish, Action::Finish),
    (SlotKind::Open, CommandKind::Skip, Action::MarkSkipped),
    (SlotKind::Open, CommandKind::Choose, Action::Record),
    (SlotKind::Resolved, CommandKind::Next, Action::Forward),
    (SlotKind::Resolved, CommandKind::Prev, Action::Back),
    (SlotKind::Resolved, CommandKind::Finish, Action::Finish),
    (SlotKind::Resolved, CommandKind::Change, Action::Reopen),
];

fn lookup(slot: SlotKind, command: CommandKind) -> Option<Action> {
    TRANSITIONS
        .iter()
        .find(|(s, c, _)| *s == slot && *c == command)
        .map(|(_, _, action)| *action)
}

//
// ─── MACHINE ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MachineError {
    #[error("a session needs at least one question")]
    Empty,

    #[error("session already finished")]
    Finished,

    #[error("{command:?} is not accepted while the question is {state:?}")]
    NotAccepted { command: Command, state: AnswerState },
}

/// Effect of an accepted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved { cursor: usize },
    Resolved { index: usize, state: AnswerState },
    Reopened { index: usize },
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMachine {
    slots: Vec<AnswerState>,
    cursor: usize,
    finished: bool,
}

impl SessionMachine {
    /// All slots `Unanswered`, cursor on the first question.
    ///
    /// # Errors
    ///
    /// Returns `MachineError::Empty` when `len` is zero.
    pub fn new(len: usize) -> Result<Self, MachineError> {
        if len == 0 {
            return Err(MachineError::Empty);
        }
        Ok(Self {
            slots: vec![AnswerState::Unanswered; len],
            cursor: 0,
            finished: false,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn current(&self) -> AnswerState {
        self.slots[self.cursor]
    }

    #[must_use]
    pub fn slots(&self) -> &[AnswerState] {
        &self.slots
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Apply a command to the slot under the cursor.
    ///
    /// # Errors
    ///
    /// Returns `MachineError::Finished` after `Finish`, or
    /// `MachineError::NotAccepted` when the table has no entry for the pair.
    pub fn apply(&mut self, command: Command) -> Result<Step, MachineError> {
        if self.finished {
            return Err(MachineError::Finished);
        }
        let state = self.current();
        let action =
            lookup(state.into(), command.into()).ok_or(MachineError::NotAccepted { command, state })?;

        let len = self.slots.len();
        let step = match action {
            Action::Forward => {
                self.cursor = (self.cursor + 1) % len;
                Step::Moved {
                    cursor: self.cursor,
                }
            }
            Action::Back => {
                self.cursor = (self.cursor + len - 1) % len;
                Step::Moved {
                    cursor: self.cursor,
                }
            }
            Action::Finish => {
                self.finished = true;
                Step::Finished
            }
            Action::MarkSkipped => self.set_current(AnswerState::Skipped),
            Action::Record => {
                let Command::Choose(choice) = command else {
                    return Err(MachineError::NotAccepted { command, state });
                };
                self.set_current(AnswerState::Answered(choice))
            }
            Action::Reopen => {
                self.slots[self.cursor] = AnswerState::Unanswered;
                Step::Reopened { index: self.cursor }
            }
        };
        Ok(step)
    }

    fn set_current(&mut self, state: AnswerState) -> Step {
        self.slots[self.cursor] = state;
        Step::Resolved {
            index: self.cursor,
            state,
        }
    }

    /// Slots at finish time; leftover `Unanswered` slots are classified as skipped later.
    #[must_use]
    pub fn into_slots(self) -> Vec<AnswerState> {
        self.slots
    }
}
