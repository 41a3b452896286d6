//! Input control gate and the transient "working" indicator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

/// A submit control that is disabled while its request is in flight.
///
/// This mirrors a disabled button: it stops the operator from starting a
/// second request, but callers that skip [`engage`](Self::engage) are not
/// held back.
#[derive(Debug)]
pub struct Control {
    name: &'static str,
    enabled: AtomicBool,
    working: AtomicBool,
}

impl Control {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            enabled: AtomicBool::new(true),
            working: AtomicBool::new(false),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn is_working(&self) -> bool {
        self.working.load(Ordering::Acquire)
    }

    /// Disable input and raise the indicator. Returns `None` if the control
    /// is already disabled.
    ///
    /// The guard owns a handle to the control, so it can be taken on the
    /// input loop and moved into the task that runs the request.
    pub fn engage(self: &Arc<Self>) -> Option<ControlGuard> {
        if self
            .enabled
            .compare_exchange(true, false, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return None;
        }
        self.working.store(true, Ordering::Release);
        debug!(control = self.name, "Input disabled");
        Some(ControlGuard {
            control: Arc::clone(self),
        })
    }
}

/// Re-enables input and clears the indicator on drop, so every exit path
/// of a request releases the control exactly once.
#[derive(Debug)]
pub struct ControlGuard {
    control: Arc<Control>,
}

impl ControlGuard {
    /// Whether this guard holds `control`.
    pub fn holds(&self, control: &Arc<Control>) -> bool {
        Arc::ptr_eq(&self.control, control)
    }
}

impl Drop for ControlGuard {
    fn drop(&mut self) {
        self.control.working.store(false, Ordering::Release);
        self.control.enabled.store(true, Ordering::Release);
        debug!(control = self.control.name, "Input re-enabled");
    }
}
