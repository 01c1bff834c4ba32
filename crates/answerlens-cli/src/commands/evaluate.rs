//! The `answerlens evaluate` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use answerlens_core::parser::parse_question_bank;
use answerlens_core::{FeedbackEngine, FeedbackReport, QuestionContext, QuestionStore};
use answerlens_providers::{create_transcriber, load_config_from};

pub struct EvaluateArgs {
    pub question_bank: Option<PathBuf>,
    pub question_id: Option<String>,
    pub transcript: Option<PathBuf>,
    pub text: Option<String>,
    pub audio: Option<PathBuf>,
    pub format: String,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
    Html,
}

impl OutputFormat {
    fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            other => anyhow::bail!("unknown format: {other} (expected text, json, markdown or html)"),
        }
    }
}

pub async fn execute(args: EvaluateArgs) -> Result<()> {
    let format = OutputFormat::parse(&args.format)?;
    let config = load_config_from(args.config.as_deref())?;

    let bank_path = args
        .question_bank
        .or_else(|| config.default_question_bank.clone())
        .context("no question bank given: pass --question-bank or set default_question_bank")?;
    let bank = parse_question_bank(&bank_path)?;
    let question = bank.get_question(args.question_id.as_deref())?;

    let transcript = if let Some(text) = args.text {
        text
    } else if let Some(path) = args.transcript {
        std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read transcript: {}", path.display()))?
    } else if let Some(path) = args.audio {
        let transcription = config
            .transcription
            .as_ref()
            .context("--audio needs a [transcription] section in answerlens.toml")?;
        transcribe_file(&path, transcription).await?
    } else {
        anyhow::bail!("no answer given: pass --transcript, --text or --audio");
    };

    let engine = FeedbackEngine::new(config.engine)?;
    let report = engine.evaluate(&transcript, &question)?;
    tracing::info!(
        question = %question.id,
        overall = report.overall_score,
        "evaluated answer"
    );

    let rendered = render(&report, &question, format)?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            eprintln!("Report written to: {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

async fn transcribe_file(
    path: &Path,
    config: &answerlens_providers::TranscriberConfig,
) -> Result<String> {
    let audio = std::fs::read(path)
        .with_context(|| format!("failed to read audio: {}", path.display()))?;
    let transcriber = create_transcriber(config)?;
    eprintln!("Transcribing {} with {}...", path.display(), transcriber.name());

    match transcriber.transcribe(&audio).await {
        Ok(text) => Ok(text),
        Err(e) => {
            tracing::warn!(backend = transcriber.name(), error = %e, "transcription failed");
            anyhow::bail!("{} ({e})", e.user_message())
        }
    }
}

fn render(report: &FeedbackReport, question: &QuestionContext, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => answerlens_report::render_text(report, question),
        OutputFormat::Json => answerlens_report::to_json(report)?,
        OutputFormat::Markdown => answerlens_report::to_markdown(report, question),
        OutputFormat::Html => answerlens_report::generate_html(report, question),
    })
}
