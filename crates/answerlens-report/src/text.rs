//! Plain-text and Markdown renderers.

use answerlens_core::structure::StructureComponent;
use answerlens_core::{FeedbackReport, QuestionContext};

use crate::dimensions;

const COMPONENTS: [StructureComponent; 5] = [
    StructureComponent::Definition,
    StructureComponent::Mechanism,
    StructureComponent::Example,
    StructureComponent::TradeOff,
    StructureComponent::Conclusion,
];

fn component_label(component: StructureComponent) -> &'static str {
    match component {
        StructureComponent::Definition => "Definition",
        StructureComponent::Mechanism => "Mechanism",
        StructureComponent::Example => "Example",
        StructureComponent::TradeOff => "Trade-offs",
        StructureComponent::Conclusion => "Conclusion",
    }
}

/// Render a report for a terminal.
pub fn render_text(report: &FeedbackReport, question: &QuestionContext) -> String {
    let mut out = String::new();
    out.push_str(&format!("Question: {}\n", question.text));
    out.push_str(&format!(
        "Category: {} ({})\n\n",
        question.category, question.difficulty
    ));
    out.push_str(&format!("Overall score: {}/10\n", report.overall_score));

    for (label, result) in dimensions(report) {
        out.push_str(&format!("\n{label}: {}/10\n", result.score));
        for strength in &result.strengths {
            out.push_str(&format!("  + {strength}\n"));
        }
        for issue in &result.issues {
            out.push_str(&format!("  - {issue}\n"));
        }
    }

    let structure = &report.structure_analysis;
    out.push_str(&format!(
        "\nStructure: {}/10, logical flow {}\n",
        structure.structure_score, structure.logical_flow
    ));
    for component in COMPONENTS {
        let mark = if structure.has(component) { "x" } else { " " };
        out.push_str(&format!("  [{mark}] {}\n", component_label(component)));
    }

    let coverage = &report.coverage_analysis;
    out.push_str(&format!(
        "\nCoverage: {}/{} concepts ({}%)\n",
        coverage.total_covered, coverage.total_expected, coverage.coverage_percentage
    ));
    if !coverage.missing_concepts.is_empty() {
        out.push_str(&format!("  missing: {}\n", coverage.missing_concepts.join(", ")));
    }
    if let Some(cmp) = &coverage.ideal_comparison {
        out.push_str(&format!(
            "\nReference answer: {}% term overlap ({}), length {}% of reference\n",
            cmp.similarity_percentage, cmp.similarity, cmp.length_percentage
        ));
        if !cmp.missed_terms.is_empty() {
            out.push_str(&format!("  terms to consider: {}\n", cmp.missed_terms.join(", ")));
        }
    }

    if !report.suggestions.is_empty() {
        out.push_str("\nSuggestions:\n");
        for (i, suggestion) in report.suggestions.iter().enumerate() {
            out.push_str(&format!("  {}. {suggestion}\n", i + 1));
        }
    }
    out
}

/// Format a report as Markdown.
pub fn to_markdown(report: &FeedbackReport, question: &QuestionContext) -> String {
    let mut md = String::new();

    md.push_str(&format!("## {}\n\n", question.text));
    md.push_str(&format!(
        "**Overall:** {}/10 | **Category:** {} | **Difficulty:** {}\n\n",
        report.overall_score, question.category, question.difficulty
    ));

    md.push_str("| Dimension | Score | Strengths | Issues |\n");
    md.push_str("|-----------|-------|-----------|--------|\n");
    for (label, result) in dimensions(report) {
        md.push_str(&format!(
            "| {} | {}/10 | {} | {} |\n",
            label,
            result.score,
            cell(&result.strengths),
            cell(&result.issues)
        ));
    }
    md.push('\n');

    let structure = &report.structure_analysis;
    md.push_str(&format!(
        "### Structure\n\nScore {}/10, logical flow **{}**.\n\n",
        structure.structure_score, structure.logical_flow
    ));
    for component in COMPONENTS {
        let mark = if structure.has(component) { "x" } else { " " };
        md.push_str(&format!("- [{mark}] {}\n", component_label(component)));
    }
    md.push('\n');

    let coverage = &report.coverage_analysis;
    md.push_str(&format!(
        "### Concept coverage\n\n{}% ({}/{})\n\n",
        coverage.coverage_percentage, coverage.total_covered, coverage.total_expected
    ));
    if !coverage.covered_concepts.is_empty() {
        md.push_str(&format!("- Covered: {}\n", coverage.covered_concepts.join(", ")));
    }
    if !coverage.missing_concepts.is_empty() {
        md.push_str(&format!("- Missing: {}\n", coverage.missing_concepts.join(", ")));
    }
    if let Some(cmp) = &coverage.ideal_comparison {
        md.push_str(&format!(
            "\n### Reference answer\n\n{}% term overlap (**{}**), length {}% of the reference.\n\n",
            cmp.similarity_percentage, cmp.similarity, cmp.length_percentage
        ));
        if !cmp.shared_terms.is_empty() {
            md.push_str(&format!("- Shared: {}\n", cmp.shared_terms.join(", ")));
        }
        if !cmp.missed_terms.is_empty() {
            md.push_str(&format!("- Not used: {}\n", cmp.missed_terms.join(", ")));
        }
    }

    if !report.suggestions.is_empty() {
        md.push_str("\n### Suggestions\n\n");
        for (i, suggestion) in report.suggestions.iter().enumerate() {
            md.push_str(&format!("{}. {}\n", i + 1, suggestion));
        }
    }

    md
}

/// Table cell: entries joined with line breaks, pipes escaped.
fn cell(items: &[String]) -> String {
    if items.is_empty() {
        return "-".to_string();
    }
    items
        .iter()
        .map(|s| s.replace('|', "\\|"))
        .collect::<Vec<_>>()
        .join("<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn text_lists_scores_and_suggestions() {
        let report = fixtures::report();
        let text = render_text(&report, &fixtures::question());
        assert!(text.starts_with("Question: Compare REST and gRPC."));
        assert!(text.contains(&format!("Overall score: {}/10", report.overall_score)));
        assert!(text.contains("Technical correctness:"));
        assert!(text.contains("[x] Example"));
        assert!(text.contains("missing: streaming"));
    }

    #[test]
    fn markdown_has_dimension_table() {
        let md = to_markdown(&fixtures::report(), &fixtures::question());
        assert!(md.starts_with("## Compare REST and gRPC."));
        assert!(md.contains("| Dimension | Score | Strengths | Issues |"));
        assert!(md.contains("| Clarity |"));
        assert!(md.contains("- Missing: streaming"));
    }

    #[test]
    fn reference_comparison_rendered_when_present() {
        let plain = render_text(&fixtures::report(), &fixtures::question());
        assert!(!plain.contains("Reference answer"));

        let report = fixtures::report_with_reference();
        let question = fixtures::question_with_reference();
        let text = render_text(&report, &question);
        assert!(text.contains("term overlap"));
        assert!(text.contains("terms to consider: runs, encodes, supports, streaming"));

        let md = to_markdown(&report, &question);
        assert!(md.contains("### Reference answer"));
        assert!(md.contains("- Shared: grpc, http, messages, protobuf"));
    }

    #[test]
    fn empty_cells_render_a_dash() {
        assert_eq!(cell(&[]), "-");
        assert_eq!(cell(&["a|b".into(), "c".into()]), "a\\|b<br>c");
    }
}
