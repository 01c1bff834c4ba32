//! JSON output.

use anyhow::{Context, Result};
use std::path::Path;

use answerlens_core::FeedbackReport;

/// Pretty-printed report JSON.
pub fn to_json(report: &FeedbackReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize report")
}

/// Write report JSON to a file, creating parent directories.
pub fn write_json_report(report: &FeedbackReport, path: &Path) -> Result<()> {
    let json = to_json(report)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn json_round_trips() {
        let report = fixtures::report();
        let json = to_json(&report).unwrap();
        let parsed: FeedbackReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.overall_score, report.overall_score);
        assert_eq!(parsed.coverage_analysis, report.coverage_analysis);
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_json_report(&fixtures::report(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["coverage_analysis"]["missing_concepts"][0], "streaming");
        assert!(value["structure_analysis"]["structure_detected"]["example"]
            .as_bool()
            .unwrap());
    }
}
