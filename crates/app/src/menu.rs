use std::io::{BufRead, Write};
use std::sync::Arc;

use rand::rngs::StdRng;
use services::{
    Clock, QuestionService, QuestionServiceError, SessionError, SessionLoopService, SessionService,
    StatsService, TheoryService,
};
use storage::Storage;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::console::Console;
use crate::editor::prompt_draft;
use crate::quiz_runner::drive_session;
use crate::theory::browse;
use crate::view::{format_datetime, render_report, render_stats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuEntry {
    Run,
    Category,
    Recovery,
    Add,
    Theory,
    Stats,
    Exit,
}

const MENU: &[(&str, MenuEntry)] = &[
    ("Run quiz", MenuEntry::Run),
    ("Quiz by category", MenuEntry::Category),
    ("Recovery quiz", MenuEntry::Recovery),
    ("Add question", MenuEntry::Add),
    ("Theory", MenuEntry::Theory),
    ("Statistics", MenuEntry::Stats),
    ("Exit", MenuEntry::Exit),
];

/// Services plus the RNG shared by every interactive flow.
pub struct QuizApp {
    sessions: SessionLoopService,
    questions: QuestionService,
    theory: TheoryService,
    stats: StatsService,
    rng: StdRng,
}

/// Print errors the user can act on and keep going; everything else propagates.
fn report_session_error<W: Write>(out: &mut W, err: SessionError) -> anyhow::Result<()> {
    match err {
        SessionError::Empty
        | SessionError::EmptyCategory(_)
        | SessionError::NothingToRecover
        | SessionError::NoRecoveryMatches
        | SessionError::InvalidCount { .. } => {
            writeln!(out, "{err}")?;
            Ok(())
        }
        other => Err(other.into()),
    }
}

impl QuizApp {
    #[must_use]
    pub fn new(config: &AppConfig, storage: &Storage, clock: Clock) -> Self {
        Self {
            sessions: SessionLoopService::from_storage(clock, config.settings, storage),
            questions: QuestionService::new(Arc::clone(&storage.questions)),
            theory: TheoryService::new(Arc::clone(&storage.topics)),
            stats: StatsService::new(Arc::clone(&storage.stats)),
            rng: config.rng(),
        }
    }

    /// Run one CLI command against the console.
    ///
    /// # Errors
    ///
    /// Returns storage and console failures; user-facing session errors are printed instead.
    pub fn dispatch<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        command: Command,
    ) -> anyhow::Result<()> {
        match command {
            Command::Menu => self.run_menu(console),
            Command::Run { count } => self.run_full(console, count),
            Command::Category { name, count } => self.run_category(console, name, count),
            Command::Recovery => self.run_recovery(console),
            Command::Add => self.add_question(console),
            Command::Theory => self.browse_theory(console),
            Command::Stats => self.show_stats(console),
            Command::Init => Ok(()),
        }
    }

    /// Main menu loop; exits on the exit entry or end of input.
    ///
    /// # Errors
    ///
    /// Returns storage and console failures.
    pub fn run_menu<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> anyhow::Result<()> {
        let labels: Vec<String> = MENU.iter().map(|(label, _)| (*label).to_owned()).collect();
        loop {
            let Some(picked) = console.choose("\n== Quiz trainer ==", &labels)? else {
                return Ok(());
            };
            match MENU[picked].1 {
                MenuEntry::Run => self.run_full(console, None)?,
                MenuEntry::Category => self.run_category(console, None, None)?,
                MenuEntry::Recovery => self.run_recovery(console)?,
                MenuEntry::Add => self.add_question(console)?,
                MenuEntry::Theory => self.browse_theory(console)?,
                MenuEntry::Stats => self.show_stats(console)?,
                MenuEntry::Exit => return Ok(()),
            }
        }
    }

    /// # Errors
    ///
    /// Returns storage and console failures.
    pub fn run_full<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        count: Option<usize>,
    ) -> anyhow::Result<()> {
        let bounds = match self.sessions.count_bounds_full() {
            Ok(bounds) => bounds,
            Err(err) => return report_session_error(console.out(), err),
        };
        let count = match count {
            Some(count) => count,
            None => {
                let message = format!("How many questions? ({}-{}): ", bounds.start(), bounds.end());
                let Some(count) = console.prompt_in_range(&message, &bounds)? else {
                    return Ok(());
                };
                count
            }
        };
        match self.sessions.start_full(count, &mut self.rng) {
            Ok(session) => self.play(console, session),
            Err(err) => report_session_error(console.out(), err),
        }
    }

    /// # Errors
    ///
    /// Returns storage and console failures.
    pub fn run_category<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        name: Option<String>,
        count: Option<usize>,
    ) -> anyhow::Result<()> {
        let category = match name {
            Some(name) => name,
            None => {
                let categories = self.sessions.categories()?;
                if categories.is_empty() {
                    return report_session_error(console.out(), SessionError::Empty);
                }
                let Some(index) = console.choose("Categories:", &categories)? else {
                    return Ok(());
                };
                categories[index].clone()
            }
        };

        let bounds = match self.sessions.count_bounds_category(&category) {
            Ok(bounds) => bounds,
            Err(err) => return report_session_error(console.out(), err),
        };
        let count = match count {
            Some(count) => count,
            None => {
                let message = format!("How many questions? ({}-{}): ", bounds.start(), bounds.end());
                let Some(count) = console.prompt_in_range(&message, &bounds)? else {
                    return Ok(());
                };
                count
            }
        };
        match self.sessions.start_category(&category, count, &mut self.rng) {
            Ok(session) => self.play(console, session),
            Err(err) => report_session_error(console.out(), err),
        }
    }

    /// # Errors
    ///
    /// Returns storage and console failures.
    pub fn run_recovery<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> anyhow::Result<()> {
        match self.sessions.start_recovery(&mut self.rng) {
            Ok(session) => self.play(console, session),
            Err(err) => report_session_error(console.out(), err),
        }
    }

    fn play<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        mut session: SessionService,
    ) -> anyhow::Result<()> {
        writeln!(
            console.out(),
            "\nStarting a {}-question quiz ({}).",
            session.total_questions(),
            format_datetime(session.started_at())
        )?;
        drive_session(console, &mut session)?;
        let done = self.sessions.finish(session)?;
        write!(console.out(), "{}", render_report(&done.report))?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns storage and console failures; invalid drafts are printed.
    pub fn add_question<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> anyhow::Result<()> {
        let Some(draft) = prompt_draft(console)? else {
            writeln!(console.out(), "\nCancelled.")?;
            return Ok(());
        };
        match self.questions.add_question(draft) {
            Ok(id) => writeln!(console.out(), "Added question #{id}.")?,
            Err(QuestionServiceError::Question(err)) => {
                writeln!(console.out(), "Question rejected: {err}")?;
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns storage and console failures.
    pub fn browse_theory<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> anyhow::Result<()> {
        let categories = self.theory.categories()?;
        if categories.is_empty() {
            writeln!(console.out(), "No theory notes available.")?;
            return Ok(());
        }
        let Some(index) = console.choose("Theory categories:", &categories)? else {
            return Ok(());
        };
        let topics = self.theory.topics_in(&categories[index])?;
        browse(console, &topics)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns storage and console failures.
    pub fn show_stats<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> anyhow::Result<()> {
        let stats = self.stats.load()?;
        write!(console.out(), "{}", render_stats(&stats))?;
        Ok(())
    }
}
