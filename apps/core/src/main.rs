// Summarist command-line entry point
// Summarize, analyze and quiz yourself on text from the terminal.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

use summarist_core::config::parse_length;
use summarist_core::engine::{AnalysisResult, FlashCard, SummaryLength, SummaryResult};
use summarist_core::history::SummaryRecord;
use summarist_core::telemetry::{get_subscriber, init_subscriber, LogFormat};
use summarist_core::{EngineConfig, SummaryService};

#[derive(Debug, Parser)]
#[command(name = "summarist", version, about = "Summarize and study any text")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Text to process
    #[arg(long, conflicts_with_all = ["file", "source"])]
    text: Option<String>,

    /// Local file (txt, md, csv, json, pdf, docx)
    #[arg(long, conflicts_with = "source")]
    file: Option<PathBuf>,

    /// Web page, Google Docs or Notion URL
    #[arg(long)]
    source: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Summarize text and store it in history
    Summarize {
        #[command(flatten)]
        input: InputArgs,
        /// short, medium, long or a percentage such as 40
        #[arg(long, short)]
        length: Option<String>,
    },
    /// Readability, keywords and sentiment
    Analyze {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Flashcards for new input, or a stored summary (latest by default)
    Flashcards {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, conflicts_with_all = ["text", "file", "source"])]
        id: Option<Uuid>,
    },
    /// Ask a question about new input, or a stored summary (latest by default)
    Ask {
        question: String,
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, conflicts_with_all = ["text", "file", "source"])]
        id: Option<Uuid>,
    },
    /// Manage stored summaries
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
}

#[derive(Debug, Subcommand)]
enum HistoryAction {
    /// List stored summaries
    List,
    /// Show one summary
    Show { id: Uuid },
    /// Delete one summary
    Remove { id: Uuid },
    /// Delete all summaries
    Clear,
    /// Store an API key for the external provider (omit to forget it)
    SetKey { key: Option<String> },
}

enum Input {
    Text(String),
    Source(String),
}

impl InputArgs {
    fn is_empty(&self) -> bool {
        self.text.is_none() && self.file.is_none() && self.source.is_none()
    }

    fn resolve(self) -> anyhow::Result<Input> {
        if let Some(text) = self.text {
            return Ok(Input::Text(text));
        }
        if let Some(file) = self.file {
            return Ok(Input::Source(file.display().to_string()));
        }
        if let Some(source) = self.source {
            return Ok(Input::Source(source));
        }
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read text from stdin")?;
        Ok(Input::Text(buffer))
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_summary(summary: &SummaryResult) {
    println!("{}", summary.summary_text);
    if let Some(label) = &summary.source_label {
        println!("\nSource: {}", label);
    }
}

fn print_analysis(analysis: &AnalysisResult) {
    println!(
        "Readability: {} ({})",
        analysis.readability_score, analysis.reading_level
    );
    println!("Reading time: {} min", analysis.reading_time_minutes);
    println!(
        "Sentiment: {} ({}/10)",
        analysis.sentiment.label, analysis.sentiment.score
    );
    let keywords: Vec<&str> = analysis.keywords.iter().map(|k| k.keyword.as_str()).collect();
    println!("Keywords: {}", keywords.join(", "));
}

fn print_cards(cards: &[FlashCard]) {
    if cards.is_empty() {
        println!("Not enough content to generate flashcards.");
        return;
    }
    for (i, card) in cards.iter().enumerate() {
        println!("{}. Q: {}\n   A: {}", i + 1, card.question, card.answer);
    }
}

fn print_records(records: &[SummaryRecord]) {
    if records.is_empty() {
        println!("No stored summaries.");
        return;
    }
    for record in records {
        println!(
            "{}  {}  {}",
            record.id,
            record.created_at.format("%Y-%m-%d %H:%M"),
            record.title
        );
    }
}

/// Summarize explicit input, otherwise load a stored summary.
async fn summary_for(
    service: &SummaryService,
    input: InputArgs,
    id: Option<Uuid>,
) -> anyhow::Result<SummaryResult> {
    if input.is_empty() {
        return Ok(find_record(service, id)?.result);
    }
    let summary = match input.resolve()? {
        Input::Text(text) => service.summarize_text(&text, None).await?,
        Input::Source(source) => service.summarize_source(&source, None).await?,
    };
    Ok(summary)
}

fn find_record(service: &SummaryService, id: Option<Uuid>) -> anyhow::Result<SummaryRecord> {
    let record = match id {
        Some(id) => service.history().get(id),
        None => service.latest(),
    };
    match record {
        Some(record) => Ok(record),
        None => bail!("No stored summary found; run `summarist summarize` first"),
    }
}

async fn run(cli: Cli, service: SummaryService) -> anyhow::Result<()> {
    match cli.command {
        Command::Summarize { input, length } => {
            let length: Option<SummaryLength> = length.as_deref().map(parse_length).transpose()?;
            let summary = match input.resolve()? {
                Input::Text(text) => service.summarize_text(&text, length).await?,
                Input::Source(source) => service.summarize_source(&source, length).await?,
            };
            if cli.json {
                print_json(&summary)?;
            } else {
                print_summary(&summary);
            }
        }
        Command::Analyze { input } => {
            let text = match input.resolve()? {
                Input::Text(text) => text,
                Input::Source(source) => service.fetch(&source).await?,
            };
            let analysis = service.analyze(&text)?;
            if cli.json {
                print_json(&analysis)?;
            } else {
                print_analysis(&analysis);
            }
        }
        Command::Flashcards { input, id } => {
            let summary = summary_for(&service, input, id).await?;
            let cards = service.flashcards(&summary);
            if cli.json {
                print_json(&cards)?;
            } else {
                print_cards(&cards);
            }
        }
        Command::Ask { question, input, id } => {
            let summary = summary_for(&service, input, id).await?;
            let reply = service.ask(&question, &summary);
            if cli.json {
                print_json(&serde_json::json!({ "question": question, "answer": reply }))?;
            } else {
                println!("{}", reply);
            }
        }
        Command::History { action } => match action.unwrap_or(HistoryAction::List) {
            HistoryAction::List => {
                let records = service.history().list();
                if cli.json {
                    print_json(&records)?;
                } else {
                    print_records(&records);
                }
            }
            HistoryAction::Show { id } => {
                let record = find_record(&service, Some(id))?;
                if cli.json {
                    print_json(&record)?;
                } else {
                    print_summary(&record.result);
                }
            }
            HistoryAction::Remove { id } => {
                if !service.history().remove(id)? {
                    bail!("No stored summary with id {}", id);
                }
                println!("Removed {}", id);
            }
            HistoryAction::Clear => {
                service.history().clear()?;
                println!("History cleared");
            }
            HistoryAction::SetKey { key } => {
                let stored = key.is_some();
                service.history().set_api_key(key)?;
                println!("{}", if stored { "API key stored" } else { "API key removed" });
            }
        },
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("summarist", "info", LogFormat::from_env(), std::io::stderr);
    init_subscriber(subscriber)?;

    let cli = Cli::parse();
    let config = EngineConfig::from_env()?;
    info!("History at {:?}", config.history_path);

    let service = SummaryService::new(config)?;
    run(cli, service).await
}
