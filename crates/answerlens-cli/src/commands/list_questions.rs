//! The `answerlens list-questions` command.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use comfy_table::{Cell, Table};

use answerlens_core::parser::parse_question_bank;
use answerlens_core::traits::QuestionFilter;
use answerlens_core::{Difficulty, QuestionStore};

pub fn execute(path: PathBuf, category: Option<String>, difficulty: Option<String>) -> Result<()> {
    let bank = parse_question_bank(&path)?;
    let difficulty = difficulty
        .map(|d| d.parse::<Difficulty>().map_err(|e| anyhow!(e)))
        .transpose()?;
    let filter = QuestionFilter {
        category,
        difficulty,
    };

    let questions = bank.filter(&filter);
    if questions.is_empty() {
        println!("No questions match. Categories in this bank: {}", bank.categories().join(", "));
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Category", "Difficulty", "Concepts", "Question"]);
    for q in &questions {
        table.add_row(vec![
            Cell::new(&q.id),
            Cell::new(&q.category),
            Cell::new(q.difficulty),
            Cell::new(q.expected_concepts.len()),
            Cell::new(&q.text),
        ]);
    }

    println!("{} ({} of {} questions)", bank.name, questions.len(), bank.questions.len());
    println!("{table}");
    Ok(())
}
