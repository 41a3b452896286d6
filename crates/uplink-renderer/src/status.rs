//! Cosmetic status readout: uptime, link latency, and activity lights.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityState {
    #[default]
    Ready,
    Busy,
    Offline,
}

impl ActivityState {
    pub fn label(self) -> &'static str {
        match self {
            ActivityState::Ready => "READY",
            ActivityState::Busy => "BUSY",
            ActivityState::Offline => "OFFLINE",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusReadout {
    started: Instant,
    uptime: Duration,
    latency_ms: Option<u32>,
    pub chat: ActivityState,
    pub image: ActivityState,
    pub tokens: u64,
}

impl StatusReadout {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            uptime: Duration::ZERO,
            latency_ms: None,
            chat: ActivityState::Ready,
            image: ActivityState::Ready,
            tokens: 0,
        }
    }

    /// Advance the uptime clock and show a new latency sample.
    pub fn tick(&mut self, latency_ms: Option<u32>) {
        self.uptime = self.started.elapsed();
        self.latency_ms = latency_ms;
    }

    pub fn uptime(&self) -> Duration {
        self.uptime
    }

    pub fn render(&self) -> String {
        let secs = self.uptime.as_secs();
        let mut line = format!(
            "UPTIME {:02}:{:02}:{:02}",
            secs / 3600,
            (secs / 60) % 60,
            secs % 60
        );
        if let Some(latency) = self.latency_ms {
            line.push_str(&format!(" | LATENCY {latency}ms"));
        }
        line.push_str(&format!(
            " | CHAT {} | IMAGE {} | TOKENS {}",
            self.chat.label(),
            self.image.label(),
            self.tokens
        ));
        line
    }
}

impl Default for StatusReadout {
    fn default() -> Self {
        Self::new()
    }
}
