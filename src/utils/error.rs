use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    ApiStatusError { status: u16, body: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Malformed model response: {message}")]
    MalformedResponse { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

impl DetectorError {
    pub fn malformed(message: impl Into<String>) -> Self {
        DetectorError::MalformedResponse {
            message: message.into(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DetectorError::ApiError(_) => "Could not reach the analysis service".to_string(),
            DetectorError::ApiStatusError { status, .. } => {
                format!("The analysis service rejected the request (HTTP {})", status)
            }
            DetectorError::IoError(e) => format!("Could not read input: {}", e),
            DetectorError::SerializationError(_) | DetectorError::MalformedResponse { .. } => {
                "The analysis service returned an unexpected answer".to_string()
            }
            DetectorError::ConfigError { message } => format!("Configuration problem: {}", message),
            DetectorError::MissingConfigError { field } => {
                format!("Missing required setting: {}", field)
            }
            DetectorError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting {}: {}", field, reason)
            }
            DetectorError::ConfigValidationError { field, message } => {
                format!("Invalid configuration ({}): {}", field, message)
            }
            DetectorError::ValidationError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DetectorError::ApiError(_) => "Check your network connection and try again",
            DetectorError::ApiStatusError { status, .. } if *status == 401 || *status == 403 => {
                "Check that API_KEY holds a valid Gemini API key"
            }
            DetectorError::ApiStatusError { .. } => "Wait a moment and submit the text again",
            DetectorError::IoError(_) => "Check the input file path and its permissions",
            DetectorError::SerializationError(_) | DetectorError::MalformedResponse { .. } => {
                "Submit the text again; the model output varies between calls"
            }
            DetectorError::ValidationError { .. } => "Provide some text to analyze",
            _ => "Review the configuration file and command-line flags",
        }
    }
}

/// 分析失敗：呼叫端只看到一種錯誤，細節保留在 source 供日誌使用
#[derive(Error, Debug)]
#[error("analysis failed")]
pub struct AnalysisFailure {
    #[source]
    source: DetectorError,
}

impl AnalysisFailure {
    pub fn detail(&self) -> &DetectorError {
        &self.source
    }
}

impl From<DetectorError> for AnalysisFailure {
    fn from(source: DetectorError) -> Self {
        Self { source }
    }
}

/// Joins an error and all of its sources, outermost first, with `: `.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut current = err.source();
    while let Some(cause) = current {
        let message = cause.to_string();
        // 部分錯誤的 Display 已含下一層訊息，避免重複
        if parts.last().map_or(true, |last| !last.ends_with(&message)) {
            parts.push(message);
        }
        current = cause.source();
    }
    parts.join(": ")
}

pub type Result<T> = std::result::Result<T, DetectorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_analysis_failure_hides_detail_in_display() {
        let failure = AnalysisFailure::from(DetectorError::malformed("missing field `mainResult`"));
        assert_eq!(failure.to_string(), "analysis failed");

        let source = failure.source().expect("source should be kept");
        assert!(source.to_string().contains("mainResult"));
    }

    #[test]
    fn test_error_chain_reaches_root_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let failure = AnalysisFailure::from(DetectorError::from(io));

        assert_eq!(
            error_chain(&failure),
            "analysis failed: IO error: connection refused"
        );
    }

    #[test]
    fn test_missing_config_message() {
        let missing = DetectorError::MissingConfigError {
            field: "service.api_key".to_string(),
        };
        assert_eq!(
            missing.user_friendly_message(),
            "Missing required setting: service.api_key"
        );
    }

    #[test]
    fn test_auth_status_suggestion() {
        let err = DetectorError::ApiStatusError {
            status: 403,
            body: "denied".to_string(),
        };
        assert!(err.recovery_suggestion().contains("API_KEY"));
    }
}
