//! Loop lifecycle: Running → ShuttingDown → Terminated.
//!
//! Both an interrupt and a fault lead to `ShuttingDown`; there is no way
//! back to `Running` and no path to `Terminated` that skips cleanup.

/// Lifecycle state of the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Ticking.
    #[default]
    Running,
    /// Forcing the shutdown speed and releasing hardware.
    ShuttingDown,
    /// Hardware released; nothing more happens.
    Terminated,
}

/// Event that can move the loop to another state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    /// Ctrl-C or SIGTERM.
    Interrupt,
    /// Sensor, actuator or terminal failure.
    Fault,
    /// Cleanup finished, successfully or not.
    CleanupComplete,
}

/// Result of a transition attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionResult {
    /// Transition taken; new state.
    Ok(LoopState),
    /// Event ignored in the current state.
    Rejected(&'static str),
}

/// Holder of the current [`LoopState`].
#[derive(Debug, Clone, Default)]
pub struct LoopStateMachine {
    state: LoopState,
}

impl LoopStateMachine {
    /// Start in `Running`.
    pub const fn new() -> Self {
        Self {
            state: LoopState::Running,
        }
    }

    /// Current state.
    #[inline]
    pub const fn state(&self) -> LoopState {
        self.state
    }

    /// `true` while ticks may be issued.
    #[inline]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running)
    }

    /// Attempt a transition.
    pub fn handle_event(&mut self, event: LoopEvent) -> TransitionResult {
        use LoopEvent::*;
        use LoopState::*;

        let next = match (self.state, event) {
            (Running, Interrupt | Fault) => ShuttingDown,
            (ShuttingDown, CleanupComplete) => Terminated,
            _ => return TransitionResult::Rejected(invalid_transition_reason(self.state)),
        };

        self.state = next;
        TransitionResult::Ok(next)
    }
}

fn invalid_transition_reason(state: LoopState) -> &'static str {
    match state {
        LoopState::Running => "Running: cleanup has not started",
        LoopState::ShuttingDown => "ShuttingDown: already stopping",
        LoopState::Terminated => "Terminated: no further transitions",
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
