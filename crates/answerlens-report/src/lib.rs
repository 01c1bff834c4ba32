//! answerlens-report — Rendering of feedback reports.
//!
//! Plain text for terminals, Markdown for sharing, a self-contained HTML
//! page, and pretty-printed JSON for machines.

pub mod html;
pub mod json;
pub mod text;

use answerlens_core::{DimensionResult, FeedbackReport};

pub use html::{generate_html, write_html_report};
pub use json::{to_json, write_json_report};
pub use text::{render_text, to_markdown};

/// The three dimensions with display labels, in report order.
pub(crate) fn dimensions(report: &FeedbackReport) -> [(&'static str, &DimensionResult); 3] {
    [
        ("Clarity", &report.clarity_score),
        ("Confidence", &report.confidence_score),
        ("Technical correctness", &report.technical_score),
    ]
}

#[cfg(test)]
pub(crate) mod fixtures {
    use answerlens_core::{Difficulty, FeedbackEngine, FeedbackReport, QuestionContext};

    pub fn question() -> QuestionContext {
        QuestionContext::new(
            "rest-grpc",
            "Compare REST and gRPC.",
            "Networking",
            Difficulty::Medium,
            vec!["http/2".into(), "protobuf".into(), "streaming".into()],
        )
    }

    pub fn question_with_reference() -> QuestionContext {
        let mut q = question();
        q.ideal_answer =
            Some("gRPC runs over HTTP/2 and encodes messages with protobuf. It supports streaming.".into());
        q
    }

    const TRANSCRIPT: &str = "gRPC is a framework that uses HTTP/2 and protobuf <messages>. \
        However, REST is simpler & more widely supported. For example, browsers speak REST.";

    pub fn report() -> FeedbackReport {
        evaluate(&question())
    }

    /// Report whose coverage carries a reference-answer comparison.
    pub fn report_with_reference() -> FeedbackReport {
        evaluate(&question_with_reference())
    }

    fn evaluate(question: &QuestionContext) -> FeedbackReport {
        FeedbackEngine::with_defaults()
            .unwrap()
            .evaluate(TRANSCRIPT, question)
            .unwrap()
    }
}
