use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Instant;

use quiz_core::model::{AnswerState, Question, SessionReport};

use super::machine::{Command, SessionMachine, Step, parse_command};
use super::progress::SessionProgress;
use crate::error::{InputError, SessionError};

/// How the question set of a session was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMode {
    Full,
    Category(String),
    Recovery,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One in-progress quiz: the selected questions, their navigation machine and
/// when the run started.
pub struct SessionService {
    mode: SessionMode,
    questions: Vec<Question>,
    machine: SessionMachine,
    started_at: DateTime<Utc>,
    started: Instant,
}

impl SessionService {
    /// Start a session over `questions` in the given order.
    ///
    /// `started_at` should come from the services layer clock to keep outcome
    /// timestamps deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no questions are provided.
    pub fn new(
        mode: SessionMode,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        let machine = SessionMachine::new(questions.len())?;
        Ok(Self {
            mode,
            questions,
            machine,
            started_at,
            started: Instant::now(),
        })
    }

    #[must_use]
    pub fn mode(&self) -> &SessionMode {
        &self.mode
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.machine.cursor()
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.machine.cursor()]
    }

    #[must_use]
    pub fn current_state(&self) -> AnswerState {
        self.machine.current()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.machine.is_finished()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let slots = self.machine.slots();
        let count = |wanted: AnswerState| slots.iter().filter(|s| **s == wanted).count();
        let skipped = count(AnswerState::Skipped);
        let unanswered = count(AnswerState::Unanswered);
        SessionProgress {
            position: self.machine.cursor() + 1,
            total: slots.len(),
            answered: slots.len() - skipped - unanswered,
            skipped,
            unanswered,
        }
    }

    /// Parse one line of input against the current question and apply it.
    ///
    /// # Errors
    ///
    /// Returns `InputError` if the line is not a command or the command is not
    /// accepted in the current state; nothing changes in that case.
    pub fn handle_input(&mut self, raw: &str) -> Result<Step, InputError> {
        let command = parse_command(raw, self.current_question().choices().len())?;
        Ok(self.apply(command)?)
    }

    /// Apply an already parsed command.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Machine` if the command is not accepted.
    pub fn apply(&mut self, command: Command) -> Result<Step, InputError> {
        Ok(self.machine.apply(command)?)
    }

    /// End the session and classify every slot.
    ///
    /// Works whether or not `Finish` was already applied; leftover unanswered
    /// questions count as skipped.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Report` if the report cannot be built.
    pub fn finish(self) -> Result<SessionReport, SessionError> {
        let elapsed = self.started.elapsed();
        let slots = self.machine.into_slots();
        Ok(SessionReport::from_answers(self.questions, &slots, elapsed)?)
    }
}

impl fmt::Debug for SessionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionService")
            .field("mode", &self.mode)
            .field("questions_len", &self.questions.len())
            .field("cursor", &self.machine.cursor())
            .field("finished", &self.machine.is_finished())
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::machine::MachineError;
    use quiz_core::model::QuestionId;
    use quiz_core::time::fixed_now;

    fn question(id: u64, correct_index: usize) -> Question {
        Question::from_persisted(
            QuestionId::new(id),
            format!("Q{id}"),
            vec!["a".into(), "b".into(), "c".into()],
            correct_index,
            "A".into(),
        )
        .unwrap()
    }

    fn session(questions: Vec<Question>) -> SessionService {
        SessionService::new(SessionMode::Full, questions, fixed_now()).unwrap()
    }

    #[test]
    fn empty_session_returns_error() {
        let err = SessionService::new(SessionMode::Recovery, Vec::new(), fixed_now()).unwrap_err();
        assert!(matches!(err, SessionError::Empty));
    }

    #[test]
    fn all_correct_scores_full_marks() {
        let mut s = session(vec![question(1, 0), question(2, 1), question(3, 2)]);
        s.handle_input("1").unwrap();
        s.handle_input("n").unwrap();
        s.handle_input("2").unwrap();
        s.handle_input("n").unwrap();
        s.handle_input("3").unwrap();
        s.handle_input("f").unwrap();

        let report = s.finish().unwrap();
        assert_eq!(report.score().to_string(), "3.00/3");
        assert!(report.wrong_ids().is_empty());
        assert!(report.skipped_ids().is_empty());
    }

    #[test]
    fn single_wrong_answer_is_penalized() {
        let mut s = session(vec![question(5, 0)]);
        s.handle_input("2").unwrap();
        s.handle_input("F").unwrap();

        let report = s.finish().unwrap();
        assert_eq!(report.score().to_string(), "-0.33/1");
        assert_eq!(
            report.wrong_ids().iter().copied().collect::<Vec<_>>(),
            vec![QuestionId::new(5)]
        );
    }

    #[test]
    fn change_then_reanswer_scores_like_answering_once() {
        let mut s = session(vec![question(1, 0)]);
        s.handle_input("2").unwrap();
        s.handle_input("c").unwrap();
        assert_eq!(s.current_state(), AnswerState::Unanswered);
        s.handle_input("1").unwrap();

        let report = s.finish().unwrap();
        assert_eq!(report.score().to_string(), "1.00/1");
        assert!(report.wrong_ids().is_empty());
    }

    #[test]
    fn rejected_input_leaves_state_untouched() {
        let mut s = session(vec![question(1, 0), question(2, 0)]);
        assert!(matches!(
            s.handle_input("9"),
            Err(InputError::Rejected(_))
        ));
        assert!(matches!(
            s.handle_input("c"),
            Err(InputError::Machine(MachineError::NotAccepted { .. }))
        ));
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.current_state(), AnswerState::Unanswered);
    }

    #[test]
    fn unvisited_questions_count_as_skipped() {
        let mut s = session(vec![question(1, 0), question(2, 0), question(3, 0)]);
        s.handle_input("").unwrap();
        s.handle_input("n").unwrap();
        s.handle_input("1").unwrap();

        let progress = s.progress();
        assert_eq!(progress.position, 2);
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.skipped, 1);
        assert_eq!(progress.unanswered, 1);

        let report = s.finish().unwrap();
        assert_eq!(report.tally().correct, 1);
        assert_eq!(
            report.skipped_ids().iter().copied().collect::<Vec<_>>(),
            vec![QuestionId::new(1), QuestionId::new(3)]
        );
    }
}
