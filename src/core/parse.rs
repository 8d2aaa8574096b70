use crate::domain::model::AnalysisResult;
use crate::utils::error::{DetectorError, Result};
use crate::utils::validation::validate_range;

/// Parse raw model output into a validated `AnalysisResult`.
///
/// The model is asked for bare JSON but sometimes wraps it in a Markdown
/// fence or adds a sentence around it, so the outermost object is extracted
/// first. Anything that still fails to match the shape is an error; there is
/// no partial result.
pub fn parse_analysis(raw: &str) -> Result<AnalysisResult> {
    let json_str = extract_json_object(raw)
        .ok_or_else(|| DetectorError::malformed("no JSON object found in model output"))?;

    let result: AnalysisResult = serde_json::from_str(json_str)?;
    check_result(&result)?;

    let unmatched = result.unmatched_details();
    if !unmatched.is_empty() {
        tracing::debug!(
            "Module details without a table row: {}",
            unmatched.join(", ")
        );
    }

    Ok(result)
}

/// Extract the outermost `{ ... }` substring from raw output.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&raw[start..=end])
}

fn check_result(result: &AnalysisResult) -> Result<()> {
    let probability = result.main_result.probability;
    if !probability.is_finite() {
        return Err(DetectorError::malformed("probability is not a finite number"));
    }

    validate_range("mainResult.probability", probability, 0.0, 100.0)
        .map_err(|e| DetectorError::malformed(e.to_string()))
}
