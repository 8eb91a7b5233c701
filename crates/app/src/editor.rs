use std::io::{self, BufRead, Write};

use quiz_core::model::QuestionDraft;

use crate::console::Console;

/// Ask for a non-blank line; `None` at end of input.
fn prompt_non_empty<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    message: &str,
) -> io::Result<Option<String>> {
    loop {
        match console.prompt(message)? {
            None => return Ok(None),
            Some(line) if line.trim().is_empty() => writeln!(console.out(), "A value is required.")?,
            Some(line) => return Ok(Some(line)),
        }
    }
}

/// Collect a new question interactively. `None` when input ends first.
///
/// Choices are read one per line until an empty line; the correct index is 0-based.
///
/// # Errors
///
/// Propagates console I/O failures.
pub fn prompt_draft<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> io::Result<Option<QuestionDraft>> {
    let Some(text) = prompt_non_empty(console, "Question text: ")? else {
        return Ok(None);
    };
    let Some(category) = prompt_non_empty(console, "Category: ")? else {
        return Ok(None);
    };

    writeln!(console.out(), "Enter the choices, one per line. Empty line to finish.")?;
    let mut choices: Vec<String> = Vec::new();
    loop {
        let Some(line) = console.prompt(&format!("Choice {}: ", choices.len()))? else {
            return Ok(None);
        };
        if !line.trim().is_empty() {
            choices.push(line);
        } else if choices.is_empty() {
            writeln!(console.out(), "At least one choice is required.")?;
        } else {
            break;
        }
    }

    for (i, choice) in choices.iter().enumerate() {
        writeln!(console.out(), "  {i}. {choice}")?;
    }
    let bounds = 0..=choices.len() - 1;
    let Some(correct_index) = console.prompt_in_range("Index of the correct choice: ", &bounds)?
    else {
        return Ok(None);
    };

    Ok(Some(QuestionDraft {
        text,
        choices,
        correct_index,
        category,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str) -> (Option<QuestionDraft>, String) {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let draft = prompt_draft(&mut console).unwrap();
        (draft, String::from_utf8(console.into_output()).unwrap())
    }

    #[test]
    fn collects_a_full_draft() {
        let (draft, _) = run("What is 2+2?\nMath\n3\n4\n\n1\n");
        let draft = draft.unwrap();
        assert_eq!(draft.text, "What is 2+2?");
        assert_eq!(draft.category, "Math");
        assert_eq!(draft.choices, vec!["3".to_string(), "4".to_string()]);
        assert_eq!(draft.correct_index, 1);
    }

    #[test]
    fn reprompts_for_blank_fields_and_bad_index() {
        let (draft, out) = run("\nQ\n \nCat\n\nonly\n\n5\nx\n0\n");
        let draft = draft.unwrap();
        assert_eq!(draft.text, "Q");
        assert_eq!(draft.category, "Cat");
        assert_eq!(draft.choices, vec!["only".to_string()]);
        assert_eq!(draft.correct_index, 0);
        assert_eq!(out.matches("A value is required.").count(), 2);
        assert!(out.contains("At least one choice is required."));
        assert!(out.contains("5 is out of range, enter 0-0"));
    }

    #[test]
    fn end_of_input_cancels() {
        assert!(run("Q\nCat\na\n").0.is_none());
        assert!(run("").0.is_none());
    }
}
