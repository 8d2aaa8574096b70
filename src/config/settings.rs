use crate::adapters::gemini::{is_usable_key, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::config::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::presentation::Locale;
use crate::utils::error::Result;
use crate::utils::validation::{validate_model_name, validate_url, Validate};
use std::fmt;

/// Values given explicitly on the command line (or through `API_KEY`).
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub model: Option<String>,
    pub locale: Option<Locale>,
    pub json_output: bool,
}

/// Fully resolved settings: overrides, then the TOML file, then defaults.
#[derive(Clone)]
pub struct DetectorSettings {
    api_key: Option<String>,
    api_base_url: String,
    model: String,
    locale: Locale,
    json_output: bool,
}

impl DetectorSettings {
    pub fn resolve(overrides: SettingsOverrides, file: Option<&TomlConfig>) -> Self {
        let service = file.map(|f| &f.service);

        let api_key = overrides
            .api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| service.and_then(|s| s.api_key.clone()));

        let api_base_url = overrides
            .api_base_url
            .or_else(|| service.and_then(|s| s.base_url.clone()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let model = overrides
            .model
            .or_else(|| service.and_then(|s| s.model.clone()))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let locale = overrides
            .locale
            .or_else(|| file.and_then(|f| f.locale()))
            .unwrap_or_default();

        let json_output =
            overrides.json_output || file.and_then(|f| f.json_output()).unwrap_or(false);

        Self {
            api_key,
            api_base_url,
            model,
            locale,
            json_output,
        }
    }

    pub fn json_output(&self) -> bool {
        self.json_output
    }
}

impl ConfigProvider for DetectorSettings {
    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn locale(&self) -> Locale {
        self.locale
    }
}

impl Validate for DetectorSettings {
    fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)?;
        validate_model_name("model", &self.model)?;
        Ok(())
    }
}

// 金鑰不可出現在日誌中
impl fmt::Debug for DetectorSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key_state = match self.api_key.as_deref() {
            Some(key) if is_usable_key(key) => "<set>",
            Some(_) => "<unresolved>",
            None => "<missing>",
        };

        f.debug_struct("DetectorSettings")
            .field("api_key", &key_state)
            .field("api_base_url", &self.api_base_url)
            .field("model", &self.model)
            .field("locale", &self.locale)
            .field("json_output", &self.json_output)
            .finish()
    }
}
