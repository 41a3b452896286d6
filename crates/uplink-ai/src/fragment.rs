//! One incremental piece of a streamed chat reply.

use uplink_common::Citation;

use crate::TokenUsage;

/// Text delta plus whatever metadata arrived in the same event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    pub text: String,
    /// Citations carried by this fragment, in the order the service sent them.
    pub citations: Vec<Citation>,
    /// Cumulative usage reported so far, when the service includes it.
    pub usage: Option<TokenUsage>,
}

impl Fragment {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_citations(mut self, citations: Vec<Citation>) -> Self {
        self.citations = citations;
        self
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.citations.is_empty() && self.usage.is_none()
    }
}
