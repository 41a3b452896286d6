//! In-memory turn log.

use tracing::warn;
use uplink_common::{ChatRole, Citation, TurnHandle};

use crate::surface::RenderSurface;

/// A single turn as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: ChatRole,
    pub text: String,
    pub citations: Vec<Citation>,
}

/// Conversation log state shared by every concrete surface.
#[derive(Debug, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
    notices: Vec<String>,
    /// The responder turn still receiving text, if any.
    live: Option<TurnHandle>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn turn(&self, handle: TurnHandle) -> Option<&Turn> {
        self.turns.get(handle.0)
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn live(&self) -> Option<TurnHandle> {
        self.live
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    fn live_turn_mut(&mut self, handle: TurnHandle) -> Option<&mut Turn> {
        if self.live != Some(handle) {
            warn!(%handle, "Ignoring write to a finalized turn");
            return None;
        }
        self.turns.get_mut(handle.0)
    }
}

impl RenderSurface for Transcript {
    fn append_turn(&mut self, role: ChatRole, text: &str) -> TurnHandle {
        let handle = TurnHandle(self.turns.len());
        self.turns.push(Turn {
            role,
            text: text.to_string(),
            citations: Vec::new(),
        });
        self.live = match role {
            ChatRole::Assistant => Some(handle),
            ChatRole::User => None,
        };
        handle
    }

    fn update_text(&mut self, handle: TurnHandle, text: &str) {
        if let Some(turn) = self.live_turn_mut(handle) {
            turn.text.clear();
            turn.text.push_str(text);
        }
    }

    fn append_citations(&mut self, handle: TurnHandle, citations: &[Citation]) {
        if let Some(turn) = self.live_turn_mut(handle) {
            turn.citations.extend_from_slice(citations);
            self.live = None;
        }
    }

    fn finish(&mut self, handle: TurnHandle) {
        if self.live == Some(handle) {
            self.live = None;
        }
    }

    fn append_notice(&mut self, text: &str) {
        self.notices.push(text.to_string());
    }
}
