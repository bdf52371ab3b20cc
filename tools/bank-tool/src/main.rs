use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use exam_common::cursor::{decode_cursor, encode_cursor};
use exam_common::normalization::preview;
use exam_common::pagination::PageRequest;
use exam_common::similarity::DuplicateScan;
use exam_common::types::QuestionStatus;
use question_bank::{Decision, NewQuestion, QuestionBank, QuestionFilter};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const PREVIEW_CHARS: usize = 70;

/// Optional settings read from the tool's TOML config file.
#[derive(Debug, Default, Deserialize)]
struct ToolConfig {
    snapshot: Option<PathBuf>,
    #[serde(default)]
    duplicates: DuplicateSettings,
}

#[derive(Debug, Default, Deserialize)]
struct DuplicateSettings {
    threshold: Option<u8>,
    max_questions: Option<usize>,
}

/// One entry of an import file: a submission, optionally approved on import.
#[derive(Deserialize)]
struct ImportEntry {
    #[serde(flatten)]
    question: NewQuestion,
    #[serde(default)]
    approve: bool,
}

#[derive(Parser)]
#[command(name = "bank-tool")]
#[command(about = "Admin tool for the exam question bank snapshot")]
struct Cli {
    /// Config file (default: ~/.config/exam-prep/bank-tool.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Snapshot file (overrides the config file)
    #[arg(long, short, global = true)]
    snapshot: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit questions from a JSON array
    Import {
        #[arg(long, short)]
        input: PathBuf,
    },
    /// Approve or reject a question
    Moderate {
        #[arg(long)]
        id: Uuid,
        #[command(flatten)]
        decision: DecisionArgs,
    },
    /// List candidate duplicate pairs, most similar first
    Duplicates {
        #[arg(long)]
        threshold: Option<u8>,
        #[arg(long)]
        max: Option<usize>,
    },
    /// Merge a duplicate into the question that should survive
    Merge {
        #[arg(long)]
        source: Uuid,
        #[arg(long)]
        target: Uuid,
    },
    /// Print one page of questions
    List {
        #[arg(long, default_value_t = 20)]
        limit: usize,
        #[arg(long)]
        cursor: Option<String>,
        #[arg(long, default_value = "approved")]
        status: QuestionStatus,
    },
    /// Encode or decode pagination cursors
    Cursor {
        #[command(subcommand)]
        command: CursorCommands,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct DecisionArgs {
    #[arg(long)]
    approve: bool,
    #[arg(long)]
    reject: bool,
}

#[derive(Subcommand)]
enum CursorCommands {
    Encode {
        /// RFC 3339 timestamp of the row
        #[arg(long)]
        timestamp: DateTime<Utc>,
        #[arg(long)]
        id: Uuid,
    },
    Decode { token: String },
}

fn default_config_path() -> Option<PathBuf> {
    let mut p = dirs::config_dir()?;
    p.push("exam-prep");
    p.push("bank-tool.toml");
    Some(p)
}

fn read_config(path: Option<&Path>) -> Result<ToolConfig, Box<dyn std::error::Error>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(ToolConfig::default()),
        },
    };
    Ok(toml::from_str(&fs::read_to_string(&path)?)?)
}

fn import(bank: &mut QuestionBank, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let entries: Vec<ImportEntry> = serde_json::from_str(&fs::read_to_string(input)?)?;
    let now = Utc::now();
    let (mut imported, mut skipped) = (0, 0);
    for entry in entries {
        match bank.submit(entry.question, now) {
            Ok(id) => {
                if entry.approve {
                    bank.moderate(id, Decision::Approve, now)?;
                }
                imported += 1;
            }
            Err(e) => {
                eprintln!("Skipped: {e}");
                skipped += 1;
            }
        }
    }
    println!("Imported {imported} questions ({skipped} skipped)");
    Ok(())
}

fn print_duplicates(bank: &QuestionBank, scan: DuplicateScan) {
    let pairs = scan.run(&bank.duplicate_candidates(scan.max_questions));
    if pairs.is_empty() {
        println!("No candidate duplicates at {}%", scan.threshold);
        return;
    }
    for pair in &pairs {
        println!("{:>3}%  {}  {}", pair.similarity, pair.question1.id, pair.question2.id);
        println!("      {}", preview(&pair.question1.question_text, PREVIEW_CHARS));
        println!("      {}", preview(&pair.question2.question_text, PREVIEW_CHARS));
    }
    println!("{} candidate pairs", pairs.len());
}

fn print_page(
    bank: &QuestionBank,
    limit: usize,
    cursor: Option<&str>,
    status: QuestionStatus,
) -> Result<(), Box<dyn std::error::Error>> {
    let limit = limit.to_string();
    let request = PageRequest::from_params(cursor, Some(&limit))?;
    let filter = QuestionFilter {
        status,
        ..QuestionFilter::default()
    };
    let page = bank.list(&filter, &request);
    for q in &page.data {
        println!(
            "{}  {}  {:<6} {:>3}/{:<3} {}",
            q.id,
            q.created_at.to_rfc3339(),
            q.difficulty,
            q.upvotes,
            q.downvotes,
            preview(&q.text, PREVIEW_CHARS)
        );
    }
    if let Some(total) = page.total {
        println!("{total} matching questions");
    }
    if let Some(next) = page.next_cursor {
        println!("Next cursor: {next}");
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Commands::Cursor { command } = &cli.command {
        match command {
            CursorCommands::Encode { timestamp, id } => println!("{}", encode_cursor(*timestamp, *id)),
            CursorCommands::Decode { token } => {
                let cursor = decode_cursor(token).ok_or("Invalid cursor")?;
                println!("timestamp: {}", cursor.timestamp.to_rfc3339());
                println!("id: {}", cursor.id);
            }
        }
        return Ok(());
    }

    let config = read_config(cli.config.as_deref())?;
    let snapshot = cli
        .snapshot
        .or(config.snapshot)
        .unwrap_or_else(|| PathBuf::from("data/questions.cbor"));
    let mut bank = QuestionBank::load_or_default(&snapshot)?;

    match cli.command {
        Commands::Import { input } => {
            import(&mut bank, &input)?;
            bank.save(&snapshot)?;
        }
        Commands::Moderate { id, decision } => {
            let decision = if decision.approve {
                Decision::Approve
            } else {
                Decision::Reject
            };
            let status = bank.moderate(id, decision, Utc::now())?;
            bank.save(&snapshot)?;
            println!("Question {id} is now {status}");
        }
        Commands::Duplicates { threshold, max } => {
            let defaults = DuplicateScan::default();
            let scan = DuplicateScan {
                threshold: threshold
                    .or(config.duplicates.threshold)
                    .unwrap_or(defaults.threshold),
                max_questions: max
                    .or(config.duplicates.max_questions)
                    .unwrap_or(defaults.max_questions),
            };
            print_duplicates(&bank, scan);
        }
        Commands::Merge { source, target } => {
            bank.merge(source, target, Utc::now())?;
            bank.save(&snapshot)?;
            println!("Merged {source} into {target}");
        }
        Commands::List {
            limit,
            cursor,
            status,
        } => print_page(&bank, limit, cursor.as_deref(), status)?,
        Commands::Cursor { .. } => {}
    }
    Ok(())
}
