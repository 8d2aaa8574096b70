use crate::domain::model::AnalysisResult;
use crate::domain::locale::Locale;
use crate::utils::error::AnalysisFailure;
use async_trait::async_trait;

/// Remote scoring service. One `analyze` call performs exactly one outbound
/// request; every failure collapses into [`AnalysisFailure`].
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    fn is_configured(&self) -> bool;
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisFailure>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> Option<&str>;
    fn api_base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn locale(&self) -> Locale;
}
