use std::fmt;
use std::path::PathBuf;

use quiz_core::model::{QuestionDraft, Topic};
use storage::{FileRepository, QuestionRepository, StorePaths};

#[derive(Debug, Clone)]
struct Args {
    data_dir: PathBuf,
    categories: u32,
    per_category: u32,
    force: bool,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidCategories { raw: String },
    InvalidPerCategory { raw: String },
    InvalidDataDir { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidCategories { raw } => write!(f, "invalid --categories value: {raw}"),
            ArgsError::InvalidPerCategory { raw } => {
                write!(f, "invalid --per-category value: {raw}")
            }
            ArgsError::InvalidDataDir { raw } => write!(f, "invalid --data-dir value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_count(value: &str) -> Option<u32> {
    value.parse::<u32>().ok().filter(|n| *n > 0)
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut data_dir = std::env::var("QUIZ_DATA_DIR")
            .map_or_else(|_| PathBuf::from("quiz-data"), PathBuf::from);
        let mut categories = 6;
        let mut per_category = 4;
        let mut force = false;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data-dir" => {
                    let value = require_value(&mut args, "--data-dir")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDataDir { raw: value });
                    }
                    data_dir = PathBuf::from(value);
                }
                "--categories" => {
                    let value = require_value(&mut args, "--categories")?;
                    categories = parse_count(&value)
                        .ok_or_else(|| ArgsError::InvalidCategories { raw: value.clone() })?;
                }
                "--per-category" => {
                    let value = require_value(&mut args, "--per-category")?;
                    per_category = parse_count(&value)
                        .ok_or_else(|| ArgsError::InvalidPerCategory { raw: value.clone() })?;
                }
                "--force" => force = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            data_dir,
            categories,
            per_category,
            force,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --data-dir <dir>          Data directory (default: quiz-data)");
    eprintln!("  --categories <n>          Number of demo categories (default: 6)");
    eprintln!("  --per-category <n>        Questions per category (default: 4)");
    eprintln!("  --force                   Seed even if the bank already has questions");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DATA_DIR");
}

const CATEGORY_NAMES: [&str; 8] = [
    "Networking",
    "Operating Systems",
    "Databases",
    "Security",
    "Algorithms",
    "Compilers",
    "Distributed Systems",
    "Cryptography",
];

fn category_name(index: u32) -> String {
    let names = CATEGORY_NAMES.len();
    let i = index as usize;
    if i < names {
        CATEGORY_NAMES[i].to_string()
    } else {
        format!("{} {}", CATEGORY_NAMES[i % names], i / names + 1)
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let paths = StorePaths::in_dir(&args.data_dir);
    let repo = FileRepository::new(paths.clone());
    repo.init()?;

    let existing = repo.list_questions()?.len();
    if existing > 0 && !args.force {
        println!(
            "Bank at {} already holds {existing} questions; pass --force to add more",
            paths.questions.display()
        );
        return Ok(());
    }

    let mut topics = Vec::new();
    for c in 0..args.categories {
        let category = category_name(c);
        for q in 0..args.per_category {
            let correct_index = (q % 3) as usize;
            let choices = (0..3)
                .map(|i| {
                    if i == correct_index {
                        format!("Correct fact #{} about {category}", q + 1)
                    } else {
                        format!("Distractor {}.{} for {category}", q + 1, i + 1)
                    }
                })
                .collect();
            let draft = QuestionDraft {
                text: format!("{category}: sample question #{}", q + 1),
                choices,
                correct_index,
                category: category.clone(),
            };
            repo.append_question(draft.validate()?)?;
        }
        topics.push(Topic {
            title: format!("{category} basics"),
            content: format!("Key ideas to review before a {category} quiz."),
            category,
        });
    }

    let raw = serde_json::to_string_pretty(&topics)?;
    std::fs::write(&paths.topics, raw)?;

    println!(
        "Seeded {} categories x {} questions into {}",
        args.categories,
        args.per_category,
        args.data_dir.display()
    );

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
