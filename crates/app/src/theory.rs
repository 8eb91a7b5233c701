use std::io::{self, BufRead, Write};

use quiz_core::model::Topic;

use crate::console::Console;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewerCommand {
    Next,
    Prev,
    Exit,
}

fn parse_viewer_command(raw: &str) -> Option<ViewerCommand> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "n" | "next" => Some(ViewerCommand::Next),
        "p" | "prev" | "previous" => Some(ViewerCommand::Prev),
        "e" | "exit" => Some(ViewerCommand::Exit),
        _ => None,
    }
}

/// Page through `topics` with circular next / previous navigation until exit or end of input.
///
/// # Errors
///
/// Propagates console I/O failures.
pub fn browse<R: BufRead, W: Write>(console: &mut Console<R, W>, topics: &[Topic]) -> io::Result<()> {
    if topics.is_empty() {
        writeln!(console.out(), "No notes in this category.")?;
        return Ok(());
    }

    let len = topics.len();
    let mut index = 0;
    loop {
        let topic = &topics[index];
        writeln!(
            console.out(),
            "\n[{}/{len}] {}\n\n{}\n",
            index + 1,
            topic.title,
            topic.content
        )?;
        let Some(line) = console.prompt("n next | p previous | e exit > ")? else {
            return Ok(());
        };
        match parse_viewer_command(&line) {
            Some(ViewerCommand::Next) => index = (index + 1) % len,
            Some(ViewerCommand::Prev) => index = (index + len - 1) % len,
            Some(ViewerCommand::Exit) => return Ok(()),
            None => writeln!(console.out(), "Unknown command {:?}", line.trim())?,
        }
    }
}
