//! Token usage tracking across chat exchanges.

use std::collections::HashMap;

use crate::TokenUsage;

/// Tracks cumulative token usage per model.
pub struct TokenTracker {
    total: TokenUsage,
    by_model: HashMap<String, TokenUsage>,
    call_count: u64,
}

impl TokenTracker {
    pub fn new() -> Self {
        Self {
            total: TokenUsage::default(),
            by_model: HashMap::new(),
            call_count: 0,
        }
    }

    /// Record token usage from one completed exchange.
    pub fn record(&mut self, model: &str, usage: &TokenUsage) {
        self.total.input_tokens = self.total.input_tokens.saturating_add(usage.input_tokens);
        self.total.output_tokens = self.total.output_tokens.saturating_add(usage.output_tokens);
        self.call_count += 1;

        let entry = self.by_model.entry(model.to_string()).or_default();
        entry.input_tokens = entry.input_tokens.saturating_add(usage.input_tokens);
        entry.output_tokens = entry.output_tokens.saturating_add(usage.output_tokens);
    }

    pub fn total(&self) -> &TokenUsage {
        &self.total
    }

    pub fn for_model(&self, model: &str) -> Option<&TokenUsage> {
        self.by_model.get(model)
    }

    pub fn total_tokens(&self) -> u64 {
        self.total.total_tokens()
    }

    pub fn call_count(&self) -> u64 {
        self.call_count
    }
}

impl Default for TokenTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_accumulates_per_model() {
        let mut tracker = TokenTracker::new();
        tracker.record(
            "gemini-2.5-flash",
            &TokenUsage {
                input_tokens: 100,
                output_tokens: 20,
            },
        );
        tracker.record(
            "gemini-2.5-flash",
            &TokenUsage {
                input_tokens: 50,
                output_tokens: 5,
            },
        );
        tracker.record("gemini-2.5-pro", &TokenUsage::default());

        assert_eq!(tracker.total_tokens(), 175);
        assert_eq!(tracker.call_count(), 3);
        assert_eq!(
            tracker.for_model("gemini-2.5-flash").unwrap().input_tokens,
            150
        );
        assert_eq!(tracker.for_model("gemini-2.5-pro").unwrap().total_tokens(), 0);
        assert!(tracker.for_model("other").is_none());
    }
}
