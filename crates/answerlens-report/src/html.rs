//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use answerlens_core::structure::StructureComponent;
use answerlens_core::{FeedbackReport, QuestionContext};

use crate::dimensions;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn score_class(score: u8) -> &'static str {
    if score >= 8 {
        "good"
    } else if score >= 6 {
        "fair"
    } else {
        "poor"
    }
}

/// Generate an HTML page for one evaluation.
pub fn generate_html(report: &FeedbackReport, question: &QuestionContext) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>answerlens feedback: {}</title>\n",
        html_escape(&question.id)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&question.text)));
    html.push_str(&format!(
        "<p class=\"meta\">{} | {} | overall <strong class=\"{}\">{}/10</strong></p>\n",
        html_escape(&question.category),
        question.difficulty,
        score_class(report.overall_score),
        report.overall_score
    ));
    html.push_str("</header>\n");

    // Dimension cards
    html.push_str("<section class=\"dimensions\">\n");
    for (label, result) in dimensions(report) {
        html.push_str("<div class=\"card\">\n");
        html.push_str(&format!(
            "<h2>{label} <span class=\"{}\">{}/10</span></h2>\n",
            score_class(result.score),
            result.score
        ));
        push_list(&mut html, "strengths", &result.strengths);
        push_list(&mut html, "issues", &result.issues);
        if !result.evidence.is_empty() {
            html.push_str("<details>\n<summary>Evidence</summary>\n");
            push_list(&mut html, "evidence", &result.evidence);
            html.push_str("</details>\n");
        }
        html.push_str("</div>\n");
    }
    html.push_str("</section>\n");

    // Structure
    let structure = &report.structure_analysis;
    html.push_str("<section class=\"structure\">\n");
    html.push_str(&format!(
        "<h2>Structure {}/10, flow {}</h2>\n",
        structure.structure_score, structure.logical_flow
    ));
    html.push_str("<table>\n<tbody>\n");
    for (component, detected) in &structure.structure_detected {
        let (class, text) = if *detected { ("pass", "yes") } else { ("fail", "no") };
        html.push_str(&format!(
            "<tr><td>{}</td><td class=\"{class}\">{text}</td></tr>\n",
            component_name(*component)
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Coverage
    let coverage = &report.coverage_analysis;
    html.push_str("<section class=\"coverage\">\n");
    html.push_str(&format!(
        "<h2>Concept coverage {}%</h2>\n",
        coverage.coverage_percentage
    ));
    html.push_str(&format!(
        "<div class=\"bar\"><div class=\"fill\" style=\"width: {}%\"></div></div>\n",
        coverage.coverage_percentage
    ));
    push_list(&mut html, "covered", &coverage.covered_concepts);
    push_list(&mut html, "missing", &coverage.missing_concepts);
    if let Some(cmp) = &coverage.ideal_comparison {
        html.push_str(&format!(
            "<h3>Reference answer</h3>\n<p>{}% term overlap ({}), length {}% of the reference.</p>\n",
            cmp.similarity_percentage, cmp.similarity, cmp.length_percentage
        ));
        push_list(&mut html, "shared", &cmp.shared_terms);
        push_list(&mut html, "not-used", &cmp.missed_terms);
    }
    html.push_str("</section>\n");

    // Suggestions
    if !report.suggestions.is_empty() {
        html.push_str("<section class=\"suggestions\">\n<h2>Suggestions</h2>\n<ol>\n");
        for suggestion in &report.suggestions {
            html.push_str(&format!("<li>{}</li>\n", html_escape(suggestion)));
        }
        html.push_str("</ol>\n</section>\n");
    }

    // Transcript
    html.push_str("<section class=\"transcript\">\n");
    html.push_str("<details>\n<summary>Transcript</summary>\n");
    html.push_str(&format!(
        "<blockquote>{}</blockquote>\n",
        html_escape(&report.transcript)
    ));
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

fn component_name(component: StructureComponent) -> &'static str {
    match component {
        StructureComponent::Definition => "Definition",
        StructureComponent::Mechanism => "Mechanism",
        StructureComponent::Example => "Example",
        StructureComponent::TradeOff => "Trade-offs",
        StructureComponent::Conclusion => "Conclusion",
    }
}

fn push_list(html: &mut String, class: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    html.push_str(&format!("<ul class=\"{class}\">\n"));
    for item in items {
        html.push_str(&format!("<li>{}</li>\n", html_escape(item)));
    }
    html.push_str("</ul>\n");
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &FeedbackReport, question: &QuestionContext, path: &Path) -> Result<()> {
    let html = generate_html(report, question);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; --accent: #2563eb; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; --accent: #60a5fa; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0 auto; max-width: 60rem; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.dimensions { display: grid; grid-template-columns: repeat(auto-fit, minmax(16rem, 1fr)); gap: 1rem; }
.card { border: 1px solid var(--border); border-radius: 8px; padding: 0 1rem 1rem; }
.good { color: #16a34a; }
.fair { color: #ca8a04; }
.poor { color: #dc2626; }
.strengths li::marker { content: "+ "; }
.issues li::marker { content: "- "; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
.bar { background: var(--border); border-radius: 4px; height: 1rem; }
.fill { background: var(--accent); border-radius: 4px; height: 100%; }
blockquote { border-left: 4px solid var(--border); margin: 1rem 0; padding-left: 1rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn html_report_contains_required_elements() {
        let html = generate_html(&fixtures::report(), &fixtures::question());

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Compare REST and gRPC."));
        assert!(html.contains("Technical correctness"));
        assert!(html.contains("<li>streaming</li>"));
    }

    #[test]
    fn html_shows_reference_comparison() {
        let html = generate_html(&fixtures::report(), &fixtures::question());
        assert!(!html.contains("Reference answer"));

        let html = generate_html(
            &fixtures::report_with_reference(),
            &fixtures::question_with_reference(),
        );
        assert!(html.contains("<h3>Reference answer</h3>"));
        assert!(html.contains("<ul class=\"not-used\">\n<li>runs</li>"));
    }

    #[test]
    fn html_escapes_transcript() {
        let html = generate_html(&fixtures::report(), &fixtures::question());
        assert!(html.contains("protobuf &lt;messages&gt;"));
        assert!(html.contains("simpler &amp; more"));
        assert!(!html.contains("<messages>"));
    }

    #[test]
    fn html_report_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.html");

        write_html_report(&fixtures::report(), &fixtures::question(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
