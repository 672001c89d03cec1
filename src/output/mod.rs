//! Helpers for rendering command results as text or JSON

use crate::batch::BatchReport;
use crate::qr::BuildOutcome;
use crate::request::GenerationRequest;
use serde_json::{Value, json};

/// Combined structured and human-readable representation of a result
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Structured JSON representation suitable for scripts
    pub json: Value,
    /// Human-readable lines for terminal presentation
    pub human: Vec<String>,
}

/// Render a single saved generation.
pub fn render_generation(request: &GenerationRequest, outcome: &BuildOutcome) -> Rendered {
    let warnings: Vec<String> = outcome.warnings.iter().map(ToString::to_string).collect();

    let json = json!({
        "payload": request.payload,
        "destination": request.destination.display().to_string(),
        "fill": request.fill.to_hex(),
        "background": request.background.to_hex(),
        "logo": request.logo.as_ref().map(|p| p.display().to_string()),
        "width": outcome.image.width(),
        "height": outcome.image.height(),
        "warnings": warnings,
    });

    let mut human = vec![
        format!("QR code saved to {}", request.destination.display()),
        format!("  Content: {}", format_text_snippet(&request.payload)),
        format!(
            "  Size: {}x{} px, {} on {}",
            outcome.image.width(),
            outcome.image.height(),
            request.fill,
            request.background
        ),
    ];
    if let Some(logo) = &request.logo {
        human.push(format!("  Logo: {}", logo.display()));
    }
    human.extend(warnings.iter().map(|w| format!("  Warning: {w}")));

    Rendered { json, human }
}

/// Render the summary of a batch run.
pub fn render_batch_report(report: &BatchReport) -> Rendered {
    let json = json!({
        "output_dir": report.output_dir.display().to_string(),
        "written": report
            .written
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>(),
        "failures": report.failures,
    });

    let mut human = vec![format!(
        "Batch QR codes saved in {}",
        report.output_dir.display()
    )];
    human.push(format!("  Written: {}", report.written.len()));
    if !report.is_complete() {
        human.push(format!("  Skipped: {}", report.failures.len()));
        for failure in &report.failures {
            human.push(format!(
                "    row {} ({}): {}",
                failure.row,
                format_text_snippet(&failure.payload),
                failure.reason
            ));
        }
    }

    Rendered { json, human }
}

fn format_text_snippet(text: &str) -> String {
    const MAX: usize = 60;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        let snippet: String = text.chars().take(MAX).collect();
        let total = text.chars().count();
        format!("{}... ({} chars)", snippet, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::BatchFailure;
    use std::path::PathBuf;

    #[test]
    fn renders_batch_failures() {
        let report = BatchReport {
            output_dir: PathBuf::from("out"),
            written: vec![PathBuf::from("out/a.png")],
            failures: vec![BatchFailure {
                row: 2,
                payload: String::new(),
                reason: "Missing input: enter text or a link to encode".to_string(),
            }],
        };
        let rendered = render_batch_report(&report);

        assert_eq!(rendered.json["failures"][0]["row"], 2);
        assert_eq!(rendered.json["written"][0], "out/a.png");
        assert!(rendered.human.iter().any(|line| line.contains("Skipped: 1")));
    }

    #[test]
    fn truncates_long_payloads() {
        let long = "x".repeat(200);
        assert!(format_text_snippet(&long).ends_with("(200 chars)"));
        assert_eq!(format_text_snippet("short"), "short");
    }
}
