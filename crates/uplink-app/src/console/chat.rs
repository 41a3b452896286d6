//! Streaming chat handler.
//!
//! Turns one operator submission into a requester turn, a live responder
//! turn rewritten as fragments arrive, and a citation block once the
//! stream ends.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures_util::StreamExt;
use tracing::{debug, info, warn};
use uplink_ai::ChatSession;
use uplink_common::{new_correlation_id, ChatRole, Citation};
use uplink_renderer::RenderSurface;

use super::control::{Control, ControlGuard};
use super::{with_locked, IgnoreReason, Shared, CHAT_FAILURE_NOTICE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    Ignored(IgnoreReason),
    Completed {
        text: String,
        citations: Vec<Citation>,
    },
    /// The request failed; `partial` is the text that stays on screen.
    Failed { partial: String },
}

pub struct ChatHandler<S> {
    /// `None` when session initialization failed; chat stays unavailable.
    session: Option<tokio::sync::Mutex<ChatSession>>,
    control: Arc<Control>,
    surface: Shared<S>,
    tokens: Arc<AtomicU64>,
}

impl<S: RenderSurface> ChatHandler<S> {
    pub fn new(session: Option<ChatSession>, surface: Shared<S>) -> Self {
        Self {
            session: session.map(tokio::sync::Mutex::new),
            control: Arc::new(Control::new("chat")),
            surface,
            tokens: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn control(&self) -> &Arc<Control> {
        &self.control
    }

    pub fn is_available(&self) -> bool {
        self.session.is_some()
    }

    /// Running token total, updated after each completed exchange.
    pub fn tokens(&self) -> &Arc<AtomicU64> {
        &self.tokens
    }

    /// Completed exchanges in the session, or `None` while a request holds it.
    pub fn exchange_count(&self) -> Option<usize> {
        let session = self.session.as_ref()?;
        session.try_lock().ok().map(|s| s.exchange_count())
    }

    fn render<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        with_locked(&self.surface, f)
    }

    /// Trim the input and check that there is a session to send it to.
    fn admit<'a>(&self, input: &'a str) -> Result<&'a str, IgnoreReason> {
        let message = input.trim();
        if message.is_empty() {
            return Err(IgnoreReason::Empty);
        }
        if self.session.is_none() {
            warn!("Chat unavailable: session was not initialized");
            return Err(IgnoreReason::Unavailable);
        }
        Ok(message)
    }

    pub async fn submit(&self, input: &str) -> ChatOutcome {
        let message = match self.admit(input) {
            Ok(message) => message,
            Err(reason) => return ChatOutcome::Ignored(reason),
        };
        let Some(guard) = self.control.engage() else {
            debug!("Chat input disabled; submission dropped");
            return ChatOutcome::Ignored(IgnoreReason::Busy);
        };
        self.transmit(guard, message).await
    }

    /// Submit with the control already engaged by the caller, as the
    /// input loop does before it hands the request to a task.
    pub async fn submit_engaged(&self, guard: ControlGuard, input: &str) -> ChatOutcome {
        if !guard.holds(&self.control) {
            warn!("Chat submission carried a foreign control guard");
            return ChatOutcome::Ignored(IgnoreReason::Busy);
        }
        match self.admit(input) {
            Ok(message) => self.transmit(guard, message).await,
            Err(reason) => ChatOutcome::Ignored(reason),
        }
    }

    async fn transmit(&self, _guard: ControlGuard, message: &str) -> ChatOutcome {
        let Some(session) = self.session.as_ref() else {
            return ChatOutcome::Ignored(IgnoreReason::Unavailable);
        };

        let request_id = new_correlation_id();
        self.render(|s| s.append_turn(ChatRole::User, message));

        let mut session = session.lock().await;
        let mut stream = match session.open_stream(message).await {
            Ok(stream) => stream,
            Err(e) => {
                warn!(request = %request_id, "Chat stream setup failed: {e}");
                self.render(|s| s.append_notice(CHAT_FAILURE_NOTICE));
                return ChatOutcome::Failed {
                    partial: String::new(),
                };
            }
        };

        let handle = self.render(|s| s.append_turn(ChatRole::Assistant, ""));
        let mut buffer = String::new();
        let mut citations: Vec<Citation> = Vec::new();
        let mut usage = None;
        let mut fragments = 0usize;

        while let Some(next) = stream.next().await {
            match next {
                Ok(fragment) => {
                    fragments += 1;
                    buffer.push_str(&fragment.text);
                    self.render(|s| s.update_text(handle, &buffer));
                    citations.extend(fragment.citations);
                    if fragment.usage.is_some() {
                        usage = fragment.usage;
                    }
                }
                Err(e) => {
                    warn!(
                        request = %request_id,
                        fragments,
                        "Chat stream aborted: {e}"
                    );
                    self.render(|s| {
                        s.finish(handle);
                        s.append_notice(CHAT_FAILURE_NOTICE);
                    });
                    return ChatOutcome::Failed { partial: buffer };
                }
            }
        }

        self.render(|s| {
            if !citations.is_empty() {
                s.append_citations(handle, &citations);
            }
            s.finish(handle);
        });

        session.commit(message, buffer.clone(), usage);
        self.tokens
            .store(session.tracker().total_tokens(), Ordering::Relaxed);

        info!(
            request = %request_id,
            fragments,
            citations = citations.len(),
            chars = buffer.len(),
            "Chat response complete"
        );

        ChatOutcome::Completed {
            text: buffer,
            citations,
        }
    }
}
