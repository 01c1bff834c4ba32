//! answerlens CLI — structured feedback on spoken interview answers.

mod commands;

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "answerlens",
    version,
    about = "Score interview answers for clarity, confidence and technical correctness"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one answer against a question.
    #[command(group(
        ArgGroup::new("answer")
            .required(true)
            .args(["transcript", "text", "audio"])
    ))]
    Evaluate {
        /// Question bank TOML file. Falls back to `default_question_bank` in the config.
        #[arg(long)]
        question_bank: Option<PathBuf>,

        /// Question ID (default: first question in the bank).
        #[arg(long)]
        question_id: Option<String>,

        /// File containing the answer transcript.
        #[arg(long)]
        transcript: Option<PathBuf>,

        /// Answer transcript given inline.
        #[arg(long)]
        text: Option<String>,

        /// Recorded answer, transcribed with the configured backend.
        #[arg(long)]
        audio: Option<PathBuf>,

        /// Output format: text, json, markdown, html.
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the report here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Path to config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank files without scoring anything.
    Validate {
        /// Path to a question bank file or directory.
        #[arg(long)]
        question_bank: PathBuf,
    },

    /// List the questions in a bank.
    ListQuestions {
        /// Question bank TOML file.
        #[arg(long)]
        question_bank: PathBuf,

        /// Only show this category (case-insensitive).
        #[arg(long)]
        category: Option<String>,

        /// Only show this difficulty: easy, medium, hard.
        #[arg(long)]
        difficulty: Option<String>,
    },

    /// Create a starter answerlens.toml and example question bank.
    Init,
}

#[tokio::main]
async fn main() {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "answerlens=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evaluate {
            question_bank,
            question_id,
            transcript,
            text,
            audio,
            format,
            output,
            config,
        } => {
            commands::evaluate::execute(commands::evaluate::EvaluateArgs {
                question_bank,
                question_id,
                transcript,
                text,
                audio,
                format,
                output,
                config,
            })
            .await
        }
        Commands::Validate { question_bank } => commands::validate::execute(question_bank),
        Commands::ListQuestions {
            question_bank,
            category,
            difficulty,
        } => commands::list_questions::execute(question_bank, category, difficulty),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
