//! The `answerlens validate` command.

use std::path::PathBuf;

use anyhow::Result;

use answerlens_core::parser::{load_question_directory, parse_question_bank, validate_question_bank};

pub fn execute(path: PathBuf) -> Result<()> {
    let banks = if path.is_dir() {
        load_question_directory(&path)?
    } else {
        vec![parse_question_bank(&path)?]
    };

    if banks.is_empty() {
        anyhow::bail!("no question banks found in {}", path.display());
    }

    let mut total_warnings = 0;

    for bank in &banks {
        println!("Question bank: {} ({} questions)", bank.name, bank.questions.len());

        let warnings = validate_question_bank(bank);
        for w in &warnings {
            match &w.question_id {
                Some(id) => println!("  [{id}] WARNING: {}", w.message),
                None => println!("  WARNING: {}", w.message),
            }
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("\nAll question banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
