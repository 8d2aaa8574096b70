use crate::core::controller::{ControllerState, UnconfiguredView};
use crate::domain::model::AnalysisResult;
use crate::presentation::Messages;
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

fn heading(out: &mut String, title: &str) {
    let fill = RULE_WIDTH.saturating_sub(title.chars().count() + 4);
    let _ = writeln!(out, "\n── {} {}", title, "─".repeat(fill));
}

fn signed_marker(value: Option<f64>) -> &'static str {
    match value {
        Some(v) if v > 0.0 => "▲",
        Some(v) if v < 0.0 => "▼",
        Some(_) => "•",
        None => " ",
    }
}

/// Configuration-error screen shown instead of the form.
pub fn render_unconfigured(view: &UnconfiguredView) -> String {
    let messages = view.messages();
    let mut out = String::new();

    let _ = writeln!(out, "{}", messages.config_title);
    let _ = writeln!(out, "{}", "=".repeat(messages.config_title.chars().count()));
    let _ = writeln!(out, "{}\n", messages.config_body);
    let _ = writeln!(out, "{}", messages.config_action);
    for (i, step) in messages.config_steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, step);
    }

    out
}

/// Render the full form snapshot: loading label, error banner, or result.
pub fn render_state(state: &ControllerState, messages: &Messages) -> String {
    if state.loading {
        return format!("{}\n", messages.analyzing);
    }

    let mut out = String::new();
    if let Some(error) = &state.error {
        let _ = writeln!(out, "{} {}", messages.error_prefix, error);
    }
    if let Some(result) = &state.result {
        out.push_str(&render_result(result, messages));
    }
    out
}

pub fn render_result(result: &AnalysisResult, messages: &Messages) -> String {
    let mut out = String::new();
    let main = &result.main_result;

    let _ = writeln!(out, "{}: {:.0}%", messages.probability, main.probability);
    let _ = writeln!(out, "{}: {}", messages.verdict, main.verdict);
    let _ = writeln!(out, "{}: {}", messages.confidence, main.confidence);

    heading(&mut out, messages.justification);
    let _ = writeln!(out, "{}", result.justification);

    if !result.module_table.is_empty() {
        heading(&mut out, messages.module_table);
        let width = result
            .module_table
            .iter()
            .map(|row| row.module.chars().count())
            .max()
            .unwrap_or(0);
        for row in &result.module_table {
            let _ = writeln!(
                out,
                "{} {:<width$}  {:>5.1}  {:>6}  {}",
                signed_marker(row.contribution_value()),
                row.module,
                row.score,
                row.contribution,
                row.finding,
                width = width
            );
        }
    }

    if !result.module_details.is_empty() {
        heading(&mut out, messages.module_details);
        for detail in &result.module_details {
            let _ = writeln!(
                out,
                "* {} ({:.1}, {})",
                detail.module, detail.score, detail.contribution
            );
            let _ = writeln!(out, "  {}", detail.analysis);
        }
    }

    if !result.top_evidences.is_empty() {
        heading(&mut out, messages.top_evidences);
        for evidence in &result.top_evidences {
            let _ = writeln!(
                out,
                "{} \"{}\"",
                signed_marker(evidence.impact_value()),
                evidence.quote
            );
            let _ = writeln!(out, "  {} [{}]", evidence.indicator, evidence.impact);
        }
    }

    if !result.false_positives.is_empty() {
        heading(&mut out, messages.false_positives);
        for fp in &result.false_positives {
            let applied = if fp.applied {
                messages.applied_yes
            } else {
                messages.applied_no
            };
            let _ = writeln!(out, "- {}: {} ({})", fp.factor, applied, fp.correction);
        }
    }

    heading(&mut out, messages.final_calculation);
    let _ = writeln!(out, "{}", result.final_calculation);

    heading(&mut out, messages.recommendation);
    let _ = writeln!(out, "{}", result.recommendation);

    out
}
