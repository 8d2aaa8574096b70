use crate::domain::model::AnalysisResult;
use crate::domain::ports::AnalysisClient;
use crate::presentation::Messages;
use crate::utils::error::error_chain;
use tokio::sync::watch;

/// Everything a renderer needs to draw the form. There is no other hidden
/// state: two equal snapshots always render the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState {
    pub configured: bool,
    pub input: String,
    pub loading: bool,
    pub result: Option<AnalysisResult>,
    pub error: Option<String>,
}

impl ControllerState {
    fn idle() -> Self {
        Self {
            configured: true,
            input: String::new(),
            loading: false,
            result: None,
            error: None,
        }
    }

    fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::idle()
        }
    }

    /// The submit trigger is disabled while loading or when there is nothing to send.
    pub fn can_submit(&self) -> bool {
        self.configured && !self.loading && !self.input.trim().is_empty()
    }

    /// The clear trigger only shows when there is something to clear.
    pub fn can_clear(&self) -> bool {
        self.configured
            && !self.loading
            && (!self.input.is_empty() || self.result.is_some() || self.error.is_some())
    }
}

/// What happened to one submit trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was blank; the client was not called.
    Rejected,
    Succeeded,
    Failed,
}

/// Outcome of the startup configuration check, consumed once.
pub enum Mount<C: AnalysisClient> {
    Ready(InteractionController<C>),
    Unconfigured(UnconfiguredView),
}

impl<C: AnalysisClient> Mount<C> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Mount::Ready(_))
    }
}

/// Terminal view for a session without credentials. It exposes no form
/// operations at all.
#[derive(Debug, Clone)]
pub struct UnconfiguredView {
    messages: &'static Messages,
    state: ControllerState,
}

impl UnconfiguredView {
    pub fn messages(&self) -> &'static Messages {
        self.messages
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }
}

/// Check the client once and hand back either a usable controller or the
/// configuration-error view.
pub fn mount<C: AnalysisClient>(client: C, messages: &'static Messages) -> Mount<C> {
    if client.is_configured() {
        tracing::debug!("Analysis client configured, form ready");
        Mount::Ready(InteractionController::new(client, messages))
    } else {
        tracing::warn!("Analysis client is not configured; form disabled for this session");
        Mount::Unconfigured(UnconfiguredView {
            messages,
            state: ControllerState::unconfigured(),
        })
    }
}

pub struct InteractionController<C: AnalysisClient> {
    client: C,
    messages: &'static Messages,
    state: ControllerState,
    tx: watch::Sender<ControllerState>,
}

impl<C: AnalysisClient> InteractionController<C> {
    fn new(client: C, messages: &'static Messages) -> Self {
        let state = ControllerState::idle();
        let (tx, _rx) = watch::channel(state.clone());
        Self {
            client,
            messages,
            state,
            tx,
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn messages(&self) -> &'static Messages {
        self.messages
    }

    /// Receives a snapshot after every transition, including the loading one.
    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.tx.subscribe()
    }

    fn publish(&self) {
        self.tx.send_replace(self.state.clone());
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.input = text.into();
        self.publish();
    }

    pub fn append_input(&mut self, text: &str) {
        if !self.state.input.is_empty() {
            self.state.input.push('\n');
        }
        self.state.input.push_str(text);
        self.publish();
    }

    /// Runs one analysis for the current input.
    ///
    /// Taking `&mut self` keeps a second submit or a clear from running while
    /// the request is in flight. The call always leaves `loading` false.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.state.input.trim().is_empty() {
            tracing::debug!("Submit ignored: empty input");
            self.state.result = None;
            self.state.error = Some(self.messages.empty_input.to_string());
            self.publish();
            return SubmitOutcome::Rejected;
        }

        self.state.result = None;
        self.state.error = None;
        self.state.loading = true;
        self.publish();

        tracing::info!(
            "Submitting {} characters for analysis",
            self.state.input.chars().count()
        );
        let started = std::time::Instant::now();
        let outcome = self.client.analyze(&self.state.input).await;

        let submit_outcome = match outcome {
            Ok(result) => {
                tracing::info!(
                    "✅ Analysis completed in {:?}: {} ({}%, confidence {})",
                    started.elapsed(),
                    result.main_result.verdict,
                    result.main_result.probability,
                    result.main_result.confidence
                );
                self.state.result = Some(result);
                self.state.error = None;
                SubmitOutcome::Succeeded
            }
            Err(failure) => {
                tracing::error!("❌ Analysis failed: {}", error_chain(&failure));
                self.state.result = None;
                self.state.error = Some(self.messages.analysis_failed.to_string());
                SubmitOutcome::Failed
            }
        };

        self.state.loading = false;
        self.publish();
        submit_outcome
    }

    pub fn clear(&mut self) {
        self.state.input.clear();
        self.state.result = None;
        self.state.error = None;
        self.publish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::fixtures::sample_result;
    use crate::presentation::Locale;
    use crate::utils::error::{AnalysisFailure, DetectorError};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::oneshot;

    type Reply = Result<AnalysisResult, AnalysisFailure>;

    #[derive(Clone)]
    struct ScriptedClient {
        configured: bool,
        replies: Arc<Mutex<VecDeque<Reply>>>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedClient {
        fn new(replies: Vec<Reply>) -> Self {
            Self {
                configured: true,
                replies: Arc::new(Mutex::new(replies.into())),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn unconfigured() -> Self {
            Self {
                configured: false,
                ..Self::new(vec![])
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AnalysisClient for ScriptedClient {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn analyze(&self, _text: &str) -> Reply {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected analyze call")
        }
    }

    /// Holds the reply until the test releases it.
    struct GatedClient {
        gate: tokio::sync::Mutex<Option<oneshot::Receiver<Reply>>>,
    }

    #[async_trait]
    impl AnalysisClient for GatedClient {
        fn is_configured(&self) -> bool {
            true
        }

        async fn analyze(&self, _text: &str) -> Reply {
            let rx = self.gate.lock().await.take().expect("single call");
            rx.await.expect("gate dropped")
        }
    }

    fn transport_failure() -> AnalysisFailure {
        DetectorError::ApiStatusError {
            status: 503,
            body: "unavailable".to_string(),
        }
        .into()
    }

    fn messages() -> &'static Messages {
        Messages::for_locale(Locale::En)
    }

    fn ready(client: ScriptedClient) -> InteractionController<ScriptedClient> {
        match mount(client, messages()) {
            Mount::Ready(controller) => controller,
            Mount::Unconfigured(_) => panic!("expected a configured controller"),
        }
    }

    #[test]
    fn test_unconfigured_mount_has_no_form() {
        let mounted = mount(ScriptedClient::unconfigured(), messages());
        assert!(!mounted.is_ready());

        match mounted {
            Mount::Unconfigured(view) => {
                assert!(!view.state().configured);
                assert!(!view.state().can_submit());
                assert!(!view.state().can_clear());
                assert_eq!(view.messages().config_title, "Configuration Error");
            }
            Mount::Ready(_) => panic!("expected unconfigured view"),
        }
    }

    #[tokio::test]
    async fn test_blank_input_never_calls_client() {
        let client = ScriptedClient::new(vec![]);
        let mut controller = ready(client.clone());

        for input in ["", "   ", "\n\t  \n"] {
            controller.set_input(input);
            let outcome = controller.submit().await;

            assert_eq!(outcome, SubmitOutcome::Rejected);
            assert_eq!(
                controller.state().error.as_deref(),
                Some("Please enter text to analyze.")
            );
            assert!(!controller.state().loading);
        }
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_successful_analysis_stores_result() {
        let client = ScriptedClient::new(vec![Ok(sample_result())]);
        let mut controller = ready(client.clone());

        controller.set_input("Sample academic paragraph.");
        let outcome = controller.submit().await;

        assert_eq!(outcome, SubmitOutcome::Succeeded);
        let state = controller.state();
        assert_eq!(state.result, Some(sample_result()));
        assert_eq!(state.error, None);
        assert!(!state.loading);
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_analysis_shows_generic_message() {
        let client = ScriptedClient::new(vec![Err(transport_failure())]);
        let mut controller = ready(client.clone());

        controller.set_input("Sample academic paragraph.");
        let outcome = controller.submit().await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        let state = controller.state();
        assert_eq!(state.result, None);
        assert_eq!(
            state.error.as_deref(),
            Some("An error occurred while analyzing the text. Please try again.")
        );
        assert!(!state.error.as_deref().unwrap().contains("503"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_new_attempt_replaces_previous_outcome() {
        let client = ScriptedClient::new(vec![
            Ok(sample_result()),
            Err(transport_failure()),
            Ok(sample_result()),
        ]);
        let mut controller = ready(client.clone());
        controller.set_input("Sample academic paragraph.");

        controller.submit().await;
        assert!(controller.state().result.is_some() && controller.state().error.is_none());

        controller.submit().await;
        assert!(controller.state().result.is_none() && controller.state().error.is_some());

        controller.submit().await;
        assert!(controller.state().result.is_some() && controller.state().error.is_none());
        assert_eq!(client.calls(), 3);
    }

    #[tokio::test]
    async fn test_blank_submit_drops_previous_result() {
        let client = ScriptedClient::new(vec![Ok(sample_result())]);
        let mut controller = ready(client.clone());

        controller.set_input("Sample academic paragraph.");
        controller.submit().await;
        assert!(controller.state().result.is_some());

        controller.set_input("   ");
        let outcome = controller.submit().await;

        // 結果與錯誤互斥
        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert!(controller.state().result.is_none());
        assert_eq!(
            controller.state().error.as_deref(),
            Some("Please enter text to analyze.")
        );
        assert!(!controller.state().loading);
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_clear_after_failure() {
        let client = ScriptedClient::new(vec![Err(transport_failure())]);
        let mut controller = ready(client);

        controller.set_input("Sample academic paragraph.");
        assert_eq!(controller.submit().await, SubmitOutcome::Failed);
        assert!(controller.state().can_clear());

        controller.clear();
        let state = controller.state();
        assert_eq!(state.input, "");
        assert_eq!(state.result, None);
        assert_eq!(state.error, None);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_clear_after_validation_error() {
        let client = ScriptedClient::new(vec![]);
        let mut controller = ready(client.clone());

        controller.set_input("  \t ");
        assert_eq!(controller.submit().await, SubmitOutcome::Rejected);
        assert!(controller.state().error.is_some());

        controller.clear();
        let state = controller.state();
        assert_eq!(state.input, "");
        assert_eq!(state.result, None);
        assert_eq!(state.error, None);
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_loading_is_visible_while_request_in_flight() {
        let (release, gate) = oneshot::channel();
        let client = GatedClient {
            gate: tokio::sync::Mutex::new(Some(gate)),
        };
        let mut controller = match mount(client, messages()) {
            Mount::Ready(controller) => controller,
            Mount::Unconfigured(_) => panic!("expected a configured controller"),
        };
        controller.set_input("Sample academic paragraph.");
        let mut rx = controller.subscribe();

        let task = tokio::spawn(async move {
            let outcome = controller.submit().await;
            (controller, outcome)
        });

        rx.changed().await.unwrap();
        {
            let snapshot = rx.borrow_and_update();
            assert!(snapshot.loading);
            assert!(snapshot.result.is_none());
            assert!(snapshot.error.is_none());
            assert!(!snapshot.can_submit());
            assert!(!snapshot.can_clear());
        }

        release.send(Ok(sample_result())).unwrap();
        let (controller, outcome) = task.await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Succeeded);
        assert!(!controller.state().loading);
        assert!(!rx.borrow().loading);
        assert!(rx.borrow().result.is_some());
    }

    #[tokio::test]
    async fn test_clear_resets_everything() {
        let client = ScriptedClient::new(vec![Ok(sample_result())]);
        let mut controller = ready(client);

        controller.set_input("Sample academic paragraph.");
        controller.submit().await;
        assert!(controller.state().can_clear());

        controller.clear();
        let state = controller.state();
        assert_eq!(state.input, "");
        assert_eq!(state.result, None);
        assert_eq!(state.error, None);
        assert!(!state.can_clear());
    }

    #[test]
    fn test_append_input_joins_lines() {
        let mut controller = ready(ScriptedClient::new(vec![]));
        controller.append_input("first line");
        controller.append_input("second line");
        assert_eq!(controller.state().input, "first line\nsecond line");
        assert!(controller.state().can_submit());
    }
}
