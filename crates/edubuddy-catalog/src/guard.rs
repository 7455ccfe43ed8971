//! Disable-while-in-flight guard for user controls.
//!
//! A control is enabled unless a guard for it is alive. The guard re-enables
//! the control when dropped, on success, failure or early return alike.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A user control that triggers a store read (e.g. the fetch button).
#[derive(Debug, Clone)]
pub struct Control {
    name: &'static str,
    busy: Arc<AtomicBool>,
}

impl Control {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_enabled(&self) -> bool {
        !self.busy.load(Ordering::Acquire)
    }

    /// Disable the control, or return `None` if it is already disabled.
    pub fn try_acquire(&self) -> Option<ControlGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ControlGuard {
                busy: Arc::clone(&self.busy),
            })
    }
}

/// Keeps a control disabled while alive.
#[derive(Debug)]
pub struct ControlGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for ControlGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
