pub mod controller;
pub mod parse;
pub mod prompt;

pub use crate::domain::model::AnalysisResult;
pub use crate::domain::ports::{AnalysisClient, ConfigProvider};
pub use crate::utils::error::Result;
