//! The `answerlens init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("answerlens.toml").exists() {
        println!("answerlens.toml already exists, skipping.");
    } else {
        std::fs::write("answerlens.toml", SAMPLE_CONFIG)?;
        println!("Created answerlens.toml");
    }

    std::fs::create_dir_all("question-banks")?;
    let example_path = Path::new("question-banks/example.toml");
    if example_path.exists() {
        println!("question-banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUESTION_BANK)?;
        println!("Created question-banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit answerlens.toml to pick a transcription backend (only needed for --audio)");
    println!("  2. Run: answerlens validate --question-bank question-banks/example.toml");
    println!("  3. Run: answerlens evaluate --text \"A stack is a LIFO structure...\"");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# answerlens configuration

default_question_bank = "question-banks/example.toml"

[transcription]
type = "openai"
api_key = "${OPENAI_API_KEY}"
# model = "whisper-1"
# language = "en"

# [transcription]
# type = "deepgram"
# api_key = "${DEEPGRAM_API_KEY}"
# model = "nova-2"

# Every [engine] key is optional; omitted keys keep their defaults.
[engine.vocabulary]
# fillers = ["um", "uh", "like", "you know", "basically"]

[engine.scoring.aggregate]
clarity_weight = 0.3333333333333333
confidence_weight = 0.3333333333333333
technical_weight = 0.3333333333333334
suggestion_threshold = 6
max_suggestions = 5
"#;

const EXAMPLE_QUESTION_BANK: &str = r#"[question_bank]
id = "example"
name = "Example Questions"
description = "A small question bank to get started"

[categories."Data Structures"]
keywords = ["stack", "queue", "push", "pop", "lifo", "fifo", "array", "linked list"]

[[questions]]
id = "stack"
text = "What is a stack and where would you use one?"
category = "Data Structures"
difficulty = "easy"
expected_concepts = ["lifo", "push", "pop", "call stack"]
red_flags = ["first in first out"]

[questions.aliases]
"lifo" = ["last in first out", "last-in first-out"]
"call stack" = ["function calls", "recursion"]

[[questions]]
id = "queue"
text = "How does a queue differ from a stack?"
category = "Data Structures"
difficulty = "easy"
expected_concepts = ["fifo", "enqueue", "dequeue"]

[questions.aliases]
"fifo" = ["first in first out", "first-in first-out"]
"enqueue" = ["add to the back"]
"dequeue" = ["remove from the front"]
"#;
