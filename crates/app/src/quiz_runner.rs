use std::io::{self, BufRead, Write};

use services::{Command, SessionService};
use tracing::debug;

use crate::console::Console;
use crate::view::{COMMAND_HINT, render_question};

/// Run the navigation loop until the session is finished.
///
/// Rejected lines are reported and the same question is shown again. End of
/// input finishes the session.
///
/// # Errors
///
/// Propagates console I/O failures.
pub fn drive_session<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &mut SessionService,
) -> io::Result<()> {
    writeln!(console.out(), "{COMMAND_HINT}")?;
    while !session.is_finished() {
        write!(console.out(), "{}", render_question(session))?;
        let result = match console.prompt("> ")? {
            Some(line) => session.handle_input(&line),
            None => {
                debug!("end of input, finishing session");
                session.apply(Command::Finish)
            }
        };
        if let Err(err) = result {
            writeln!(console.out(), "! {err}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AnswerState, Question, QuestionId};
    use quiz_core::time::fixed_now;
    use services::SessionMode;
    use std::io::Cursor;

    fn session() -> SessionService {
        let questions = (1..=2)
            .map(|id| {
                Question::from_persisted(
                    QuestionId::new(id),
                    format!("Q{id}"),
                    vec!["a".into(), "b".into()],
                    0,
                    "A".into(),
                )
                .unwrap()
            })
            .collect();
        SessionService::new(SessionMode::Full, questions, fixed_now()).unwrap()
    }

    fn drive(input: &str) -> (SessionService, String) {
        let mut s = session();
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        drive_session(&mut console, &mut s).unwrap();
        (s, String::from_utf8(console.into_output()).unwrap())
    }

    #[test]
    fn finish_command_ends_the_loop() {
        let (s, _) = drive("1\nn\n2\nf\nthis line is never read\n");
        assert!(s.is_finished());
        let report = s.finish().unwrap();
        assert_eq!(report.score().to_string(), "0.67/2");
    }

    #[test]
    fn end_of_input_finishes() {
        let (s, _) = drive("1\n");
        assert!(s.is_finished());
        assert_eq!(s.current_state(), AnswerState::Answered(0));
    }

    #[test]
    fn rejected_input_is_reported_and_question_repeats() {
        let (_, out) = drive("7\nc\nf\n");
        assert!(out.contains("! choice 7 is out of range (1-2)"));
        assert!(out.contains("! Change is not accepted"));
        assert_eq!(out.matches("Question 1/2").count(), 3);
    }
}
