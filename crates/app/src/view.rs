//! Plain-text rendering of questions, session reports and statistics.

use std::fmt::Write as _;
use std::time::Duration;

use chrono::{DateTime, Utc};
use quiz_core::model::{AnswerClass, AnswerState, CumulativeStats, SessionReport};
use services::SessionService;

pub const COMMAND_HINT: &str =
    "[number] answer | Enter skip | n next | p previous | c change | f finish";

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M UTC").to_string()
}

#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}m {:02}s", secs / 60, secs % 60)
}

fn state_label(state: AnswerState) -> String {
    match state {
        AnswerState::Unanswered => "unanswered".to_owned(),
        AnswerState::Skipped => "skipped".to_owned(),
        AnswerState::Answered(i) => format!("answered {}", i + 1),
    }
}

/// The question under the cursor with its choices and current answer state.
#[must_use]
pub fn render_question(session: &SessionService) -> String {
    let progress = session.progress();
    let question = session.current_question();
    let state = session.current_state();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "\nQuestion {}/{} [{}] ({})",
        progress.position,
        progress.total,
        question.category(),
        state_label(state)
    );
    let _ = writeln!(out, "{}", question.text());
    for (i, choice) in question.choices().iter().enumerate() {
        let marker = if state == AnswerState::Answered(i) { '*' } else { ' ' };
        let _ = writeln!(out, " {marker}{}. {choice}", i + 1);
    }
    let _ = writeln!(
        out,
        "answered {} | skipped {} | open {}",
        progress.answered, progress.skipped, progress.unanswered
    );
    out
}

/// Final score plus the correct answer of every missed question.
#[must_use]
pub fn render_report(report: &SessionReport) -> String {
    let tally = report.tally();
    let mut out = String::new();
    let _ = writeln!(out, "\nScore: {}", report.score());
    let _ = writeln!(
        out,
        "Correct {} | Wrong {} | Skipped {} | Time {}",
        tally.correct,
        tally.wrong,
        tally.skipped,
        format_elapsed(report.elapsed())
    );

    let missed: Vec<_> = report
        .classified()
        .filter(|(_, class)| *class != AnswerClass::Correct)
        .collect();
    if !missed.is_empty() {
        let _ = writeln!(out, "\nReview:");
        for (question, class) in missed {
            let tag = if class == AnswerClass::Wrong { "wrong" } else { "skipped" };
            let _ = writeln!(
                out,
                "  #{} ({tag}) {}\n      -> {}",
                question.id(),
                question.text(),
                question.correct_choice()
            );
        }
    }
    out
}

#[must_use]
pub fn render_stats(stats: &CumulativeStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Sessions completed: {}", stats.sessions_completed);
    let _ = writeln!(
        out,
        "Correct {} | Wrong {} | Skipped {}",
        stats.total_correct, stats.total_wrong, stats.total_skipped
    );
    if stats.per_category.is_empty() {
        let _ = writeln!(out, "No category data yet.");
        return out;
    }
    let _ = writeln!(out, "\nPer category:");
    for (name, tally) in &stats.per_category {
        let accuracy = tally
            .accuracy()
            .map_or_else(|| "-".to_owned(), |a| format!("{:.0}%", a * 100.0));
        let _ = writeln!(
            out,
            "  {name}: {} correct, {} wrong ({accuracy})",
            tally.correct, tally.wrong
        );
    }
    out
}
