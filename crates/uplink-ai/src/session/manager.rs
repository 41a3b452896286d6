//! ChatSession struct and history management.

use std::sync::Arc;

use tracing::debug;
use uplink_common::SessionId;

use crate::token_tracker::TokenTracker;
use crate::{AiError, ChatBackend, FragmentStream, Message, TokenUsage};

/// A conversation session with message history and usage tracking.
pub struct ChatSession {
    id: SessionId,
    backend: Arc<dyn ChatBackend>,
    /// Completed exchanges, oldest first.
    history: Vec<Message>,
    tracker: TokenTracker,
}

impl ChatSession {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            id: SessionId::new(),
            backend,
            history: Vec::new(),
            tracker: TokenTracker::new(),
        }
    }

    /// Open a streamed reply to `message`, sending the history as context.
    ///
    /// The history is not touched; call [`commit`](Self::commit) once the
    /// stream has completed.
    pub async fn open_stream(&self, message: &str) -> Result<FragmentStream, AiError> {
        debug!(
            session = %self.id,
            model = self.backend.model(),
            turns = self.history.len(),
            "Opening chat stream"
        );
        self.backend.open_stream(&self.history, message).await
    }

    /// Record a completed exchange.
    pub fn commit(
        &mut self,
        message: impl Into<String>,
        reply: impl Into<String>,
        usage: Option<TokenUsage>,
    ) {
        self.history.push(Message::user(message));
        self.history.push(Message::assistant(reply));
        let usage = usage.unwrap_or_default();
        let model = self.backend.model().to_string();
        self.tracker.record(&model, &usage);
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn model(&self) -> &str {
        self.backend.model()
    }

    /// Get the full conversation history.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Number of completed exchanges.
    pub fn exchange_count(&self) -> usize {
        self.history.len() / 2
    }

    pub fn tracker(&self) -> &TokenTracker {
        &self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Fragment;
    use async_trait::async_trait;
    use futures_util::StreamExt;
    use std::sync::Mutex;
    use uplink_common::ChatRole;

    /// Echoes the history length back as a single fragment.
    #[derive(Default)]
    struct EchoBackend {
        seen: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl ChatBackend for EchoBackend {
        async fn open_stream(
            &self,
            history: &[Message],
            message: &str,
        ) -> Result<FragmentStream, AiError> {
            self.seen.lock().unwrap().push(history.len());
            let text = format!("{}:{message}", history.len());
            Ok(Box::pin(futures_util::stream::iter(vec![Ok(Fragment::text(text))])))
        }

        fn model(&self) -> &str {
            "echo"
        }
    }

    #[tokio::test]
    async fn open_stream_sends_history() {
        let backend = Arc::new(EchoBackend::default());
        let mut session = ChatSession::new(backend.clone());

        let first: Vec<_> = session.open_stream("a").await.unwrap().collect().await;
        assert_eq!(first[0].as_ref().unwrap().text, "0:a");
        session.commit("a", "reply", None);

        let second: Vec<_> = session.open_stream("b").await.unwrap().collect().await;
        assert_eq!(second[0].as_ref().unwrap().text, "2:b");
        assert_eq!(*backend.seen.lock().unwrap(), vec![0, 2]);
    }

    #[test]
    fn commit_appends_exchange_and_usage() {
        let mut session = ChatSession::new(Arc::new(EchoBackend::default()));
        session.commit(
            "status?",
            "System online.",
            Some(TokenUsage {
                input_tokens: 10,
                output_tokens: 3,
            }),
        );

        assert_eq!(session.exchange_count(), 1);
        assert_eq!(session.history()[0].role, ChatRole::User);
        assert_eq!(session.history()[1].content, "System online.");
        assert_eq!(session.tracker().total_tokens(), 13);
        assert_eq!(session.tracker().call_count(), 1);
        assert_eq!(session.model(), "echo");
    }
}
