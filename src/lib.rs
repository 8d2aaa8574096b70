pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod presentation;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::GeminiClient;
pub use crate::config::{DetectorSettings, SettingsOverrides, TomlConfig};
pub use crate::core::controller::{
    mount, ControllerState, InteractionController, Mount, SubmitOutcome, UnconfiguredView,
};
pub use crate::domain::locale::Locale;
pub use crate::domain::model::{AnalysisResult, Confidence};
pub use crate::domain::ports::{AnalysisClient, ConfigProvider};
pub use crate::presentation::Messages;
pub use crate::utils::error::{error_chain, AnalysisFailure, DetectorError, Result};
