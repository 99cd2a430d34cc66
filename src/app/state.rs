//! Shared runtime state for the monitoring loop.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Monitoring loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Not monitoring.
    Idle,
    /// Sweep cycle active.
    Running,
}

/// Runtime state shared between the monitoring loop and the operator
/// surface. The auto-execution flag may be flipped at any time, including
/// mid-cycle; the change applies at the next decision point.
#[derive(Debug)]
pub struct AppState {
    auto_execute: AtomicBool,
    monitor_state: AtomicU8,
}

const STATE_IDLE: u8 = 0;
const STATE_RUNNING: u8 = 1;

impl AppState {
    /// Create state with the given initial auto-execution setting.
    #[must_use]
    pub fn new(auto_execute: bool) -> Self {
        Self {
            auto_execute: AtomicBool::new(auto_execute),
            monitor_state: AtomicU8::new(STATE_IDLE),
        }
    }

    /// Whether automatic execution is currently enabled.
    pub fn auto_execute(&self) -> bool {
        self.auto_execute.load(Ordering::SeqCst)
    }

    /// Set automatic execution.
    pub fn set_auto_execute(&self, enabled: bool) {
        self.auto_execute.store(enabled, Ordering::SeqCst);
    }

    /// Flip automatic execution, returning the new setting.
    pub fn toggle_auto_execute(&self) -> bool {
        !self.auto_execute.fetch_xor(true, Ordering::SeqCst)
    }

    /// Current monitoring loop state.
    pub fn monitor_state(&self) -> MonitorState {
        match self.monitor_state.load(Ordering::SeqCst) {
            STATE_RUNNING => MonitorState::Running,
            _ => MonitorState::Idle,
        }
    }

    pub(crate) fn set_monitor_state(&self, state: MonitorState) {
        let value = match state {
            MonitorState::Idle => STATE_IDLE,
            MonitorState::Running => STATE_RUNNING,
        };
        self.monitor_state.store(value, Ordering::SeqCst);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(false)
    }
}
