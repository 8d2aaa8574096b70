use crate::config::settings::SettingsOverrides;
use crate::presentation::Locale;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "ai-detector")]
#[command(about = "Estimate how likely a text was written by a generative AI model")]
pub struct CliConfig {
    /// Text to analyze. Without --text or --file the text is read from stdin.
    #[arg(long, conflicts_with_all = ["file", "interactive"])]
    pub text: Option<String>,

    /// Read the text to analyze from a file.
    #[arg(long, conflicts_with = "interactive")]
    pub file: Option<PathBuf>,

    /// Line-based session: `:analyze`, `:clear`, `:quit`.
    #[arg(long, short)]
    pub interactive: bool,

    /// Optional TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long)]
    pub api_base_url: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long, value_enum)]
    pub lang: Option<Locale>,

    /// Print the result as JSON instead of a text report.
    #[arg(long)]
    pub json: bool,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr.
    #[arg(long)]
    pub log_json: bool,
}

impl CliConfig {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            api_key: self.api_key.clone(),
            api_base_url: self.api_base_url.clone(),
            model: self.model.clone(),
            locale: self.lang,
            json_output: self.json,
        }
    }
}
