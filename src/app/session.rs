use crate::core::controller::{ControllerState, InteractionController, SubmitOutcome};
use crate::core::AnalysisClient;
use crate::presentation::{render_state, Messages};
use crate::utils::error::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// One line of an interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Analyze,
    Clear,
    Quit,
    Text(String),
}

pub fn parse_command(line: &str) -> Command {
    match line.trim() {
        ":analyze" | ":a" => Command::Analyze,
        ":clear" | ":c" => Command::Clear,
        ":quit" | ":q" => Command::Quit,
        _ => Command::Text(line.to_string()),
    }
}

/// Format the snapshot for output. In JSON mode a present result is printed
/// as JSON; errors stay plain text.
pub fn format_state(state: &ControllerState, messages: &Messages, json: bool) -> Result<String> {
    match (&state.result, json) {
        (Some(result), true) => Ok(format!("{}\n", serde_json::to_string_pretty(result)?)),
        _ => Ok(render_state(state, messages)),
    }
}

/// Writes the loading label to stderr whenever the controller enters the
/// loading state. Abort the handle once the session ends.
pub fn spawn_loading_indicator(
    mut rx: watch::Receiver<ControllerState>,
    messages: &'static Messages,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut was_loading = false;
        while rx.changed().await.is_ok() {
            let loading = rx.borrow_and_update().loading;
            if loading && !was_loading {
                eprintln!("⏳ {}", messages.analyzing);
            }
            was_loading = loading;
        }
    })
}

/// Run a line-based session until `:quit` or end of input.
///
/// Returns the outcome of the last submit, if any.
pub async fn run_interactive<C, R, W>(
    controller: &mut InteractionController<C>,
    input: R,
    out: &mut W,
    json: bool,
) -> Result<Option<SubmitOutcome>>
where
    C: AnalysisClient,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let messages = controller.messages();
    let mut lines = input.lines();
    let mut last_outcome = None;

    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Command::Analyze => {
                let outcome = controller.submit().await;
                tracing::debug!("Submit outcome: {:?}", outcome);
                last_outcome = Some(outcome);

                let rendered = format_state(controller.state(), messages, json)?;
                out.write_all(rendered.as_bytes()).await?;
            }
            Command::Clear => {
                if controller.state().can_clear() {
                    controller.clear();
                }
            }
            Command::Quit => break,
            Command::Text(text) => controller.append_input(&text),
        }
        out.flush().await?;
    }

    Ok(last_outcome)
}
