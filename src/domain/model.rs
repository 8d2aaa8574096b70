use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Structured verdict returned by the remote model. Field names follow the
/// camelCase contract of the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub main_result: MainResult,
    pub justification: String,
    pub module_table: Vec<ModuleResult>,
    pub module_details: Vec<ModuleDetail>,
    pub top_evidences: Vec<Evidence>,
    pub false_positives: Vec<FalsePositive>,
    pub final_calculation: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainResult {
    pub probability: f64,
    pub verdict: String,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleResult {
    pub module: String,
    pub score: f64,
    pub contribution: String,
    pub finding: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDetail {
    pub module: String,
    pub score: f64,
    pub contribution: String,
    pub analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub quote: String,
    pub indicator: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FalsePositive {
    pub factor: String,
    #[serde(deserialize_with = "deserialize_flag")]
    pub applied: bool,
    pub correction: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "LOW",
            Confidence::Medium => "MEDIUM",
            Confidence::High => "HIGH",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // 模型可能以西班牙文回答 (BAJA/MEDIA/ALTA)
        match s.trim().to_uppercase().as_str() {
            "LOW" | "BAJA" => Ok(Confidence::Low),
            "MEDIUM" | "MEDIA" => Ok(Confidence::Medium),
            "HIGH" | "ALTA" => Ok(Confidence::High),
            other => Err(format!("unknown confidence level: {}", other)),
        }
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Text(s) => parse_flag(&s)
            .ok_or_else(|| de::Error::custom(format!("expected a yes/no flag, got {:?}", s))),
    }
}

/// Interprets the yes/no labels the model uses for applied corrections.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "sí" | "si" | "yes" | "y" | "true" => Some(true),
        "no" | "n" | "false" => Some(false),
        _ => None,
    }
}

/// Parses a signed percentage label such as `+25%` or `-5 %`.
/// Labels the model formats differently yield `None`.
pub fn parse_signed_percent(raw: &str) -> Option<f64> {
    static PERCENT: OnceLock<Regex> = OnceLock::new();
    let re = PERCENT.get_or_init(|| {
        Regex::new(r"^\s*([+\-−]?)\s*(\d+(?:[.,]\d+)?)\s*%?\s*$").expect("valid percent regex")
    });

    let caps = re.captures(raw)?;
    let magnitude: f64 = caps[2].replace(',', ".").parse().ok()?;
    match &caps[1] {
        "-" | "−" => Some(-magnitude),
        _ => Some(magnitude),
    }
}

impl ModuleResult {
    pub fn contribution_value(&self) -> Option<f64> {
        parse_signed_percent(&self.contribution)
    }
}

impl Evidence {
    pub fn impact_value(&self) -> Option<f64> {
        parse_signed_percent(&self.impact)
    }
}

impl FalsePositive {
    pub fn correction_value(&self) -> Option<f64> {
        parse_signed_percent(&self.correction)
    }
}

impl AnalysisResult {
    /// Detail modules that have no row of the same name in the module table.
    /// The two lists are produced independently by the model, so a mismatch is
    /// informational only.
    pub fn unmatched_details(&self) -> Vec<&str> {
        self.module_details
            .iter()
            .filter(|d| !self.module_table.iter().any(|row| row.module == d.module))
            .map(|d| d.module.as_str())
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::sample_json;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_result() {
        let result: AnalysisResult = serde_json::from_value(sample_json()).unwrap();

        assert_eq!(result.main_result.probability, 82.0);
        assert_eq!(result.main_result.confidence, Confidence::High);
        assert_eq!(result.module_table.len(), 1);
        assert!(!result.false_positives[0].applied);
        assert!(result.unmatched_details().is_empty());
    }

    #[test]
    fn test_confidence_accepts_spanish_and_mixed_case() {
        assert_eq!("alta".parse::<Confidence>().unwrap(), Confidence::High);
        assert_eq!("Media".parse::<Confidence>().unwrap(), Confidence::Medium);
        assert_eq!(" BAJA ".parse::<Confidence>().unwrap(), Confidence::Low);
        assert!("certain".parse::<Confidence>().is_err());
    }

    #[test]
    fn test_confidence_serializes_english_label() {
        let value = serde_json::to_value(Confidence::Medium).unwrap();
        assert_eq!(value, json!("MEDIUM"));
    }

    #[test]
    fn test_applied_flag_variants() {
        let mut value = sample_json();
        value["falsePositives"][0]["applied"] = json!("Sí");
        let result: AnalysisResult = serde_json::from_value(value.clone()).unwrap();
        assert!(result.false_positives[0].applied);

        value["falsePositives"][0]["applied"] = json!(true);
        let result: AnalysisResult = serde_json::from_value(value.clone()).unwrap();
        assert!(result.false_positives[0].applied);

        value["falsePositives"][0]["applied"] = json!("maybe");
        assert!(serde_json::from_value::<AnalysisResult>(value).is_err());
    }

    #[test]
    fn test_parse_signed_percent() {
        assert_eq!(parse_signed_percent("+25%"), Some(25.0));
        assert_eq!(parse_signed_percent("-5%"), Some(-5.0));
        assert_eq!(parse_signed_percent(" -7,5 % "), Some(-7.5));
        assert_eq!(parse_signed_percent("12"), Some(12.0));
        assert_eq!(parse_signed_percent("n/a"), None);
    }

    #[test]
    fn test_unmatched_details_reported() {
        let mut value = sample_json();
        value["moduleDetails"][0]["module"] = json!("Syntax");
        let result: AnalysisResult = serde_json::from_value(value).unwrap();
        assert_eq!(result.unmatched_details(), vec!["Syntax"]);
    }
}
