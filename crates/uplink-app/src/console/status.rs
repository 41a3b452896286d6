//! Free-running status readout timer. Purely cosmetic.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;
use uplink_renderer::{ActivityState, StatusReadout};

use super::control::Control;
use super::{with_locked, Shared};

/// One activity light: its control, and whether the service came up at all.
pub struct Light {
    pub control: Arc<Control>,
    pub online: bool,
}

impl Light {
    fn state(&self) -> ActivityState {
        if !self.online {
            ActivityState::Offline
        } else if self.control.is_working() {
            ActivityState::Busy
        } else {
            ActivityState::Ready
        }
    }
}

/// Placeholder link latency shown in the readout.
fn simulated_latency() -> u32 {
    rand::thread_rng().gen_range(18..=64)
}

/// Refresh `readout` every `interval` until the runtime shuts down.
pub fn spawn_status_ticker(
    readout: Shared<StatusReadout>,
    chat: Light,
    image: Light,
    tokens: Arc<AtomicU64>,
    interval: Duration,
    show_latency: bool,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let latency = show_latency.then(simulated_latency);
            with_locked(&readout, |r| {
                r.tick(latency);
                r.chat = chat.state();
                r.image = image.state();
                r.tokens = tokens.load(Ordering::Relaxed);
            });
        }
    })
}
