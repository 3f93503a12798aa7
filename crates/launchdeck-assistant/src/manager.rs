//! Assistant session lifecycle and reply streaming

use futures::StreamExt;
use launchdeck_ai::{ChatSession, ErrorKind, GenerationService};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::{
    aggregator::FragmentAccumulator,
    config::AssistantConfig,
    context::ContextSource,
    conversation::ConversationTurn,
    error::{Error, Result},
    events::AssistantEvent,
    state::SessionState,
};

/// What a call to [`SessionManager::open`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The session was created and primed
    Ready,
    /// Priming failed and the session was discarded
    Failed(ErrorKind),
    /// A session lifecycle already began; nothing was sent
    AlreadyStarted(SessionState),
}

/// What a call to [`SessionManager::submit`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The reply streamed to completion
    Completed,
    /// The reply failed; an apology turn was appended
    Failed(ErrorKind),
    /// The submission was dropped without touching the conversation
    Ignored(Rejection),
}

/// Why a submission was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Nothing but whitespace
    EmptyInput,
    /// Another reply is still streaming
    ReplyInFlight,
    /// The session is not ready
    NotReady(SessionState),
}

#[derive(Debug, Default)]
struct PanelState {
    state: SessionState,
    turns: Arc<Vec<ConversationTurn>>,
    pending_input: String,
    visible: bool,
    revision: u64,
}

struct Inner {
    service: Arc<dyn GenerationService>,
    context: Arc<dyn ContextSource>,
    config: AssistantConfig,
    session: Mutex<Option<Arc<dyn ChatSession>>>,
    panel: Mutex<PanelState>,
    event_tx: broadcast::Sender<AssistantEvent>,
}

/// Owns the assistant session for one panel instance.
///
/// The session is created lazily on first open, primed once with the context
/// payload, then reused for every submission. Clones share the same panel.
/// Service failures never escape: they become apology turns and state changes.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Inner>,
}

impl SessionManager {
    /// Create a manager; no session exists until [`open`](Self::open)
    pub fn new(
        service: Arc<dyn GenerationService>,
        context: Arc<dyn ContextSource>,
        config: AssistantConfig,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(256);
        Self {
            inner: Arc::new(Inner {
                service,
                context,
                config,
                session: Mutex::new(None),
                panel: Mutex::new(PanelState::default()),
                event_tx,
            }),
        }
    }

    /// Subscribe to panel events
    pub fn subscribe(&self) -> broadcast::Receiver<AssistantEvent> {
        self.inner.event_tx.subscribe()
    }

    /// The active configuration
    pub fn config(&self) -> &AssistantConfig {
        &self.inner.config
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.inner.panel.lock().state
    }

    /// Snapshot of the visible turns
    pub fn turns(&self) -> Arc<Vec<ConversationTurn>> {
        Arc::clone(&self.inner.panel.lock().turns)
    }

    /// Text staged in the input control
    pub fn pending_input(&self) -> String {
        self.inner.panel.lock().pending_input.clone()
    }

    /// Replace the staged input text
    pub fn set_pending_input(&self, text: impl Into<String>) {
        let mut panel = self.inner.panel.lock();
        let text = text.into();
        if panel.pending_input != text {
            panel.pending_input = text.clone();
            self.touch(&mut panel, AssistantEvent::PendingInputChanged { text });
        }
    }

    /// Whether the panel is shown
    pub fn is_visible(&self) -> bool {
        self.inner.panel.lock().visible
    }

    /// Counter bumped on every observable change
    pub fn revision(&self) -> u64 {
        self.inner.panel.lock().revision
    }

    /// Flip panel visibility, opening the session the first time it is shown.
    ///
    /// Returns the new visibility.
    pub async fn toggle(&self) -> bool {
        let visible = {
            let mut panel = self.inner.panel.lock();
            let visible = !panel.visible;
            self.set_visible(&mut panel, visible);
            visible
        };
        if visible {
            self.open().await;
        }
        visible
    }

    /// Hide the panel.
    ///
    /// An in-flight reply keeps streaming into the hidden turn list.
    pub fn close(&self) {
        let mut panel = self.inner.panel.lock();
        self.set_visible(&mut panel, false);
    }

    /// Create and prime the session.
    ///
    /// Only the first call does anything. A failed priming leaves the manager
    /// in [`SessionState::Failed`] for the rest of its life.
    pub async fn open(&self) -> OpenOutcome {
        {
            let mut panel = self.inner.panel.lock();
            if panel.state != SessionState::Uninitialized {
                return OpenOutcome::AlreadyStarted(panel.state);
            }
            self.transition(&mut panel, SessionState::Priming);
        }

        match self.prime().await {
            Ok(session) => {
                *self.inner.session.lock() = Some(session);
                let mut panel = self.inner.panel.lock();
                self.append_turn(&mut panel, ConversationTurn::model(&self.inner.config.greeting));
                self.transition(&mut panel, SessionState::Ready);
                OpenOutcome::Ready
            }
            Err(e) => {
                tracing::error!("Assistant priming failed: {}", e);
                let mut panel = self.inner.panel.lock();
                self.report(&e);
                self.append_turn(
                    &mut panel,
                    ConversationTurn::model(&self.inner.config.priming_apology),
                );
                self.transition(&mut panel, SessionState::Failed);
                OpenOutcome::Failed(e.kind())
            }
        }
    }

    async fn prime(&self) -> Result<Arc<dyn ChatSession>> {
        let session: Arc<dyn ChatSession> = Arc::from(
            self.inner
                .service
                .create_session(&self.inner.config.system_instruction)
                .await?,
        );
        let message = self.inner.context.priming_message()?;
        tracing::debug!(bytes = message.len(), "Sending priming context");
        // The acknowledgment is never shown
        session.send(&message).await?;
        Ok(session)
    }

    /// Submit the staged input
    pub async fn submit_pending(&self) -> SubmitOutcome {
        let text = self.pending_input();
        self.submit(&text).await
    }

    /// Send one user turn and stream the reply into a placeholder turn.
    ///
    /// Empty input, a reply already in flight, or a session that is not ready
    /// drop the submission without touching the conversation.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::Ignored(Rejection::EmptyInput);
        }

        let (session, index) = {
            let mut panel = self.inner.panel.lock();
            match panel.state {
                SessionState::Ready => {}
                SessionState::AwaitingReply => {
                    tracing::debug!("Dropping submission while a reply is in flight");
                    return SubmitOutcome::Ignored(Rejection::ReplyInFlight);
                }
                other => return SubmitOutcome::Ignored(Rejection::NotReady(other)),
            }
            let Some(session) = self.inner.session.lock().clone() else {
                return SubmitOutcome::Ignored(Rejection::NotReady(panel.state));
            };

            self.append_turn(&mut panel, ConversationTurn::user(text));
            if !panel.pending_input.is_empty() {
                panel.pending_input.clear();
                self.touch(
                    &mut panel,
                    AssistantEvent::PendingInputChanged {
                        text: String::new(),
                    },
                );
            }
            self.transition(&mut panel, SessionState::AwaitingReply);
            let index = self.append_turn(&mut panel, ConversationTurn::model(""));
            (session, index)
        };

        let result = self.stream_reply(session.as_ref(), text, index).await;

        let mut panel = self.inner.panel.lock();
        match result {
            Ok(fragments) => {
                tracing::debug!(fragments, "Reply complete");
                self.transition(&mut panel, SessionState::Ready);
                SubmitOutcome::Completed
            }
            Err(e) => {
                tracing::error!("Assistant reply failed: {}", e);
                self.report(&e);
                self.append_turn(
                    &mut panel,
                    ConversationTurn::model(&self.inner.config.reply_apology),
                );
                self.transition(&mut panel, SessionState::Ready);
                SubmitOutcome::Failed(e.kind())
            }
        }
    }

    /// Drive the reply stream, returning the number of fragments applied
    async fn stream_reply(&self, session: &dyn ChatSession, text: &str, index: usize) -> Result<usize> {
        let reply = async {
            let mut stream = session.send_streaming(text).await?;
            let mut accumulator = FragmentAccumulator::new();
            while let Some(fragment) = stream.next().await {
                let so_far = accumulator.push(&fragment?);
                self.update_turn(index, so_far);
            }
            Ok::<_, Error>(accumulator.fragment_count())
        };

        match self.inner.config.reply_timeout {
            Some(limit) => tokio::time::timeout(limit, reply)
                .await
                .map_err(|_| Error::from(launchdeck_ai::Error::TimedOut(limit)))?,
            None => reply.await,
        }
    }

    fn set_visible(&self, panel: &mut PanelState, visible: bool) {
        if panel.visible != visible {
            panel.visible = visible;
            self.touch(panel, AssistantEvent::VisibilityChanged { visible });
        }
    }

    fn transition(&self, panel: &mut PanelState, to: SessionState) {
        let from = panel.state;
        if from == to {
            return;
        }
        tracing::debug!(%from, %to, "Assistant state change");
        panel.state = to;
        self.touch(panel, AssistantEvent::StateChanged { from, to });
    }

    fn append_turn(&self, panel: &mut PanelState, turn: ConversationTurn) -> usize {
        let turns = Arc::make_mut(&mut panel.turns);
        let index = turns.len();
        turns.push(turn.clone());
        self.touch(panel, AssistantEvent::TurnAppended { index, turn });
        index
    }

    /// Replace the turn at `index` with a copy carrying `text`
    fn update_turn(&self, index: usize, text: &str) {
        let mut panel = self.inner.panel.lock();
        let turns = Arc::make_mut(&mut panel.turns);
        let Some(updated) = turns.get(index).map(|turn| turn.with_text(text)) else {
            return;
        };
        turns[index] = updated;
        self.touch(
            &mut panel,
            AssistantEvent::TurnUpdated {
                index,
                text: text.to_string(),
            },
        );
    }

    fn report(&self, error: &Error) {
        let _ = self.inner.event_tx.send(AssistantEvent::Error {
            kind: error.kind(),
            message: error.to_string(),
        });
    }

    fn touch(&self, panel: &mut PanelState, event: AssistantEvent) {
        panel.revision += 1;
        // No subscribers is fine
        let _ = self.inner.event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use launchdeck_ai::{FragmentStream, Role, stream::from_fragments};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio_stream::wrappers::UnboundedReceiverStream;

    #[derive(Default)]
    struct MockState {
        creates: AtomicUsize,
        primes: AtomicUsize,
        fail_create: bool,
        fail_prime: bool,
        primed: Mutex<Vec<String>>,
        sent: Mutex<Vec<String>>,
        replies: Mutex<VecDeque<launchdeck_ai::Result<FragmentStream>>>,
    }

    struct MockService {
        state: Arc<MockState>,
    }

    struct MockSession {
        instruction: String,
        state: Arc<MockState>,
    }

    #[async_trait]
    impl GenerationService for MockService {
        async fn create_session(
            &self,
            system_instruction: &str,
        ) -> launchdeck_ai::Result<Box<dyn ChatSession>> {
            self.state.creates.fetch_add(1, Ordering::SeqCst);
            if self.state.fail_create {
                return Err(launchdeck_ai::Error::ServiceUnavailable("refused".into()));
            }
            Ok(Box::new(MockSession {
                instruction: system_instruction.to_string(),
                state: Arc::clone(&self.state),
            }))
        }
    }

    #[async_trait]
    impl ChatSession for MockSession {
        fn system_instruction(&self) -> &str {
            &self.instruction
        }

        async fn send(&self, text: &str) -> launchdeck_ai::Result<String> {
            self.state.primes.fetch_add(1, Ordering::SeqCst);
            self.state.primed.lock().push(text.to_string());
            if self.state.fail_prime {
                return Err(launchdeck_ai::Error::api("http_500", "boom"));
            }
            Ok("Understood.".to_string())
        }

        async fn send_streaming(&self, text: &str) -> launchdeck_ai::Result<FragmentStream> {
            self.state.sent.lock().push(text.to_string());
            self.state
                .replies
                .lock()
                .pop_front()
                .unwrap_or_else(|| Ok(from_fragments(Vec::new())))
        }
    }

    fn manager_with(state: MockState, config: AssistantConfig) -> (SessionManager, Arc<MockState>) {
        manager_with_context(state, Arc::new("plan".to_string()), config)
    }

    fn manager_with_context(
        state: MockState,
        context: Arc<dyn ContextSource>,
        config: AssistantConfig,
    ) -> (SessionManager, Arc<MockState>) {
        let state = Arc::new(state);
        let service = Arc::new(MockService {
            state: Arc::clone(&state),
        });
        (SessionManager::new(service, context, config), state)
    }

    struct BrokenContext;

    impl ContextSource for BrokenContext {
        fn priming_message(&self) -> Result<String> {
            let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
            Err(err.into())
        }
    }

    fn manager(state: MockState) -> (SessionManager, Arc<MockState>) {
        manager_with(state, AssistantConfig::default())
    }

    fn ok(items: &[&str]) -> FragmentStream {
        from_fragments(
            items
                .iter()
                .map(|s| Ok(s.to_string()))
                .collect::<Vec<_>>(),
        )
    }

    fn gated() -> (
        mpsc::UnboundedSender<launchdeck_ai::Result<String>>,
        FragmentStream,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Box::pin(UnboundedReceiverStream::new(rx)))
    }

    fn texts(turns: &[ConversationTurn]) -> Vec<&str> {
        turns.iter().map(|t| t.text.as_str()).collect()
    }

    #[tokio::test]
    async fn test_open_primes_once() {
        let (manager, mock) = manager(MockState::default());

        assert_eq!(manager.open().await, OpenOutcome::Ready);
        assert_eq!(
            manager.open().await,
            OpenOutcome::AlreadyStarted(SessionState::Ready)
        );

        assert_eq!(mock.creates.load(Ordering::SeqCst), 1);
        assert_eq!(mock.primes.load(Ordering::SeqCst), 1);
        assert_eq!(*mock.primed.lock(), vec!["plan".to_string()]);
        assert!(mock.sent.lock().is_empty());
        assert_eq!(manager.state(), SessionState::Ready);

        let turns = manager.turns();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, Role::Model);
        assert_eq!(turns[0].text, manager.config().greeting);
    }

    #[tokio::test]
    async fn test_toggle_opens_on_first_show_only() {
        let (manager, mock) = manager(MockState::default());

        assert!(manager.toggle().await);
        assert!(manager.is_visible());
        assert!(!manager.toggle().await);
        assert!(!manager.is_visible());
        assert!(manager.toggle().await);

        assert_eq!(mock.creates.load(Ordering::SeqCst), 1);
        assert_eq!(manager.turns().len(), 1);
    }

    #[tokio::test]
    async fn test_priming_failure_shows_single_apology() {
        let (manager, _mock) = manager(MockState {
            fail_prime: true,
            ..Default::default()
        });

        assert_eq!(
            manager.open().await,
            OpenOutcome::Failed(ErrorKind::ServiceError)
        );
        assert_eq!(manager.state(), SessionState::Failed);

        let turns = manager.turns();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, Role::Model);
        assert_eq!(turns[0].text, manager.config().priming_apology);
        assert!(!turns.iter().any(|t| t.text == manager.config().greeting));
    }

    #[tokio::test]
    async fn test_unserializable_context_fails_priming() {
        let (manager, mock) = manager_with_context(
            MockState::default(),
            Arc::new(BrokenContext),
            AssistantConfig::default(),
        );

        assert_eq!(
            manager.open().await,
            OpenOutcome::Failed(ErrorKind::ServiceError)
        );
        assert_eq!(manager.state(), SessionState::Failed);
        assert_eq!(mock.primes.load(Ordering::SeqCst), 0);
        assert_eq!(texts(&manager.turns()), vec![manager.config().priming_apology.as_str()]);
    }

    #[tokio::test]
    async fn test_unreachable_service_fails_and_stays_failed() {
        let (manager, mock) = manager(MockState {
            fail_create: true,
            ..Default::default()
        });

        assert_eq!(
            manager.open().await,
            OpenOutcome::Failed(ErrorKind::ServiceUnavailable)
        );
        assert_eq!(
            manager.open().await,
            OpenOutcome::AlreadyStarted(SessionState::Failed)
        );
        assert_eq!(mock.creates.load(Ordering::SeqCst), 1);
        assert_eq!(mock.primes.load(Ordering::SeqCst), 0);

        assert_eq!(
            manager.submit("hello").await,
            SubmitOutcome::Ignored(Rejection::NotReady(SessionState::Failed))
        );
        assert_eq!(manager.turns().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_before_open_is_ignored() {
        let (manager, mock) = manager(MockState::default());
        assert_eq!(
            manager.submit("hello").await,
            SubmitOutcome::Ignored(Rejection::NotReady(SessionState::Uninitialized))
        );
        assert!(manager.turns().is_empty());
        assert!(mock.sent.lock().is_empty());
    }

    #[tokio::test]
    async fn test_fragments_grow_placeholder_in_order() {
        let (manager, mock) = manager(MockState::default());
        mock.replies.lock().push_back(Ok(ok(&["Hel", "lo, ", "world"])));
        manager.open().await;
        let mut events = manager.subscribe();

        assert_eq!(manager.submit("Say hello").await, SubmitOutcome::Completed);

        let mut updates = Vec::new();
        while let Ok(event) = events.try_recv() {
            if let AssistantEvent::TurnUpdated { index, text } = event {
                assert_eq!(index, 2);
                updates.push(text);
            }
        }
        assert_eq!(updates, vec!["Hel", "Hello, ", "Hello, world"]);

        let turns = manager.turns();
        assert_eq!(
            texts(&turns),
            vec![manager.config().greeting.as_str(), "Say hello", "Hello, world"]
        );
        assert!(turns[1].is_user());
        assert_eq!(manager.state(), SessionState::Ready);
        assert_eq!(*mock.sent.lock(), vec!["Say hello".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_input_never_grows_turns() {
        let (manager, mock) = manager(MockState::default());
        manager.open().await;
        let before = manager.turns().len();
        let revision = manager.revision();

        for input in ["", "   ", "\n\t", " "] {
            assert_eq!(
                manager.submit(input).await,
                SubmitOutcome::Ignored(Rejection::EmptyInput)
            );
        }

        assert_eq!(manager.turns().len(), before);
        assert_eq!(manager.state(), SessionState::Ready);
        assert_eq!(manager.revision(), revision);
        assert!(mock.sent.lock().is_empty());
    }

    #[tokio::test]
    async fn test_submit_while_awaiting_is_dropped() {
        let (manager, mock) = manager(MockState::default());
        let (tx, stream) = gated();
        mock.replies.lock().push_back(Ok(stream));
        manager.open().await;

        let mut events = manager.subscribe();
        let first = tokio::spawn({
            let manager = manager.clone();
            async move { manager.submit("first").await }
        });

        loop {
            match events.recv().await {
                Ok(AssistantEvent::StateChanged {
                    to: SessionState::AwaitingReply,
                    ..
                }) => break,
                Ok(_) => continue,
                Err(e) => panic!("event stream closed: {e}"),
            }
        }

        let during = manager.turns().len();
        assert_eq!(
            manager.submit("second").await,
            SubmitOutcome::Ignored(Rejection::ReplyInFlight)
        );
        assert_eq!(manager.turns().len(), during);

        tx.send(Ok("done".to_string())).unwrap();
        drop(tx);
        assert_eq!(first.await.unwrap(), SubmitOutcome::Completed);

        assert_eq!(*mock.sent.lock(), vec!["first".to_string()]);
        assert_eq!(manager.turns().last().unwrap().text, "done");
    }

    #[tokio::test]
    async fn test_stream_error_keeps_partial_text() {
        let (manager, mock) = manager(MockState::default());
        mock.replies.lock().push_back(Ok(from_fragments(vec![
            Ok("Par".to_string()),
            Ok("tial".to_string()),
            Err(launchdeck_ai::Error::Sse("connection reset".into())),
        ])));
        manager.open().await;

        assert_eq!(
            manager.submit("question").await,
            SubmitOutcome::Failed(ErrorKind::ServiceError)
        );

        let turns = manager.turns();
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[2].text, "Partial");
        assert_eq!(turns[3].text, manager.config().reply_apology);
        assert_eq!(turns[3].role, Role::Model);
        assert_eq!(manager.state(), SessionState::Ready);
    }

    #[tokio::test]
    async fn test_stream_open_failure_recovers() {
        let (manager, mock) = manager(MockState::default());
        mock.replies
            .lock()
            .push_back(Err(launchdeck_ai::Error::api("http_503", "overloaded")));
        mock.replies.lock().push_back(Ok(ok(&["fine"])));
        manager.open().await;

        assert_eq!(
            manager.submit("one").await,
            SubmitOutcome::Failed(ErrorKind::ServiceUnavailable)
        );
        assert_eq!(manager.state(), SessionState::Ready);
        assert_eq!(manager.submit("two").await, SubmitOutcome::Completed);

        let turns = manager.turns();
        assert_eq!(turns.last().unwrap().text, "fine");
        assert_eq!(mock.creates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_pending_input_cleared_on_submit() {
        let (manager, mock) = manager(MockState::default());
        mock.replies.lock().push_back(Err(launchdeck_ai::Error::Sse("x".into())));
        manager.open().await;

        manager.set_pending_input("What is P1.1?");
        assert_eq!(
            manager.submit_pending().await,
            SubmitOutcome::Failed(ErrorKind::ServiceError)
        );
        assert!(manager.pending_input().is_empty());
        assert_eq!(manager.turns()[1].text, "What is P1.1?");
    }

    #[tokio::test]
    async fn test_snapshots_are_copy_on_write() {
        let (manager, mock) = manager(MockState::default());
        mock.replies.lock().push_back(Ok(ok(&["a", "b"])));
        manager.open().await;

        let before = manager.turns();
        manager.submit("go").await;
        assert_eq!(before.len(), 1);
        assert_eq!(manager.turns().len(), 3);
    }

    #[tokio::test]
    async fn test_close_does_not_abort_reply() {
        let (manager, mock) = manager(MockState::default());
        let (tx, stream) = gated();
        mock.replies.lock().push_back(Ok(stream));
        manager.toggle().await;

        let reply = tokio::spawn({
            let manager = manager.clone();
            async move { manager.submit("long question").await }
        });
        tokio::task::yield_now().await;
        manager.close();

        tx.send(Ok("still ".to_string())).unwrap();
        tx.send(Ok("here".to_string())).unwrap();
        drop(tx);
        assert_eq!(reply.await.unwrap(), SubmitOutcome::Completed);

        assert!(!manager.is_visible());
        assert_eq!(manager.turns().last().unwrap().text, "still here");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_timeout_counts_as_stream_failure() {
        let config = AssistantConfig::default().with_reply_timeout(Some(Duration::from_secs(30)));
        let (manager, mock) = manager_with(MockState::default(), config);
        let (tx, stream) = gated();
        mock.replies.lock().push_back(Ok(stream));
        manager.open().await;

        tx.send(Ok("slow".to_string())).unwrap();
        assert_eq!(
            manager.submit("hang").await,
            SubmitOutcome::Failed(ErrorKind::ServiceError)
        );

        let turns = manager.turns();
        assert_eq!(turns[2].text, "slow");
        assert_eq!(turns[3].text, manager.config().reply_apology);
        assert_eq!(manager.state(), SessionState::Ready);
        drop(tx);
    }

    #[tokio::test]
    async fn test_events_report_lifecycle() {
        let (manager, _mock) = manager(MockState::default());
        let mut events = manager.subscribe();
        manager.open().await;

        let mut states = Vec::new();
        while let Ok(event) = events.try_recv() {
            if let AssistantEvent::StateChanged { from, to } = event {
                states.push((from, to));
            }
        }
        assert_eq!(
            states,
            vec![
                (SessionState::Uninitialized, SessionState::Priming),
                (SessionState::Priming, SessionState::Ready),
            ]
        );
    }
}
