use ai_detector::app::session::{format_state, run_interactive, spawn_loading_indicator};
use ai_detector::presentation::render_unconfigured;
use ai_detector::utils::{logger, validation::Validate};
use ai_detector::{
    mount, CliConfig, ConfigProvider, DetectorError, DetectorSettings, GeminiClient, Messages,
    Mount, SubmitOutcome, TomlConfig,
};
use clap::Parser;
use tokio::io::{AsyncReadExt, BufReader};

const EXIT_FAILED: i32 = 1;
const EXIT_UNCONFIGURED: i32 = 2;
const EXIT_CONFIG: i32 = 3;

fn fail_with(e: &DetectorError, exit_code: i32) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code);
}

async fn read_input_text(config: &CliConfig) -> Result<String, DetectorError> {
    if let Some(text) = &config.text {
        if text != "-" {
            return Ok(text.clone());
        }
    }

    if let Some(path) = &config.file {
        tracing::debug!("Reading input from {}", path.display());
        return Ok(tokio::fs::read_to_string(path).await?);
    }

    let mut buffer = String::new();
    tokio::io::stdin().read_to_string(&mut buffer).await?;
    Ok(buffer)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::info!("Starting ai-detector");

    // 載入配置檔
    let file_config = match &config.config {
        Some(path) => {
            let loaded = TomlConfig::from_file(path).and_then(|c| c.validate().map(|_| c));
            match loaded {
                Ok(c) => Some(c),
                Err(e) => fail_with(&e, EXIT_CONFIG),
            }
        }
        None => None,
    };

    let settings = DetectorSettings::resolve(config.overrides(), file_config.as_ref());
    tracing::debug!("Resolved settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        fail_with(&e, EXIT_CONFIG);
    }

    let messages = Messages::for_locale(settings.locale());
    let json = settings.json_output();
    let client = GeminiClient::new(settings);

    let mut controller = match mount(client, messages) {
        Mount::Ready(controller) => controller,
        Mount::Unconfigured(view) => {
            eprint!("{}", render_unconfigured(&view));
            std::process::exit(EXIT_UNCONFIGURED);
        }
    };

    let indicator = spawn_loading_indicator(controller.subscribe(), messages);

    let outcome = if config.interactive {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        run_interactive(&mut controller, stdin, &mut stdout, json).await?
    } else {
        let text = match read_input_text(&config).await {
            Ok(text) => text,
            Err(e) => fail_with(&e, EXIT_CONFIG),
        };
        controller.set_input(text);
        let outcome = controller.submit().await;

        let rendered = format_state(controller.state(), messages, json)?;
        match outcome {
            SubmitOutcome::Succeeded => print!("{}", rendered),
            _ => eprint!("{}", rendered),
        }
        Some(outcome)
    };

    indicator.abort();

    match outcome {
        Some(SubmitOutcome::Rejected) | Some(SubmitOutcome::Failed) => {
            std::process::exit(EXIT_FAILED)
        }
        _ => Ok(()),
    }
}
