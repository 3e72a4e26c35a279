use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Progress of a single call through the interceptor chain.
///
/// `Start -> TenantChecked -> Authenticated -> HandlerExecuted -> Completed`,
/// with a transition to `Failed` possible from any non-terminal state.
/// Exempt routes skip `Authenticated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallState {
    #[default]
    Start,
    TenantChecked,
    Authenticated,
    HandlerExecuted,
    Completed,
    Failed,
}

impl CallState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::TenantChecked => "tenant_checked",
            Self::Authenticated => "authenticated",
            Self::HandlerExecuted => "handler_executed",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for CallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default)]
struct Trail {
    current: CallState,
    failed_after: Option<CallState>,
}

/// State shared by every clone of a call's context, advanced by each
/// interceptor as the call moves down the chain.
#[derive(Debug, Clone, Default)]
pub struct CallProgress {
    trail: Arc<Mutex<Trail>>,
}

impl CallProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> CallState {
        self.lock().current
    }

    /// Last state reached before the call failed
    pub fn failed_after(&self) -> Option<CallState> {
        self.lock().failed_after
    }

    /// Move to `next`. Terminal states are final; returns the state the
    /// call was in before this transition.
    pub fn advance(&self, next: CallState) -> CallState {
        let mut trail = self.lock();
        let previous = trail.current;
        if previous.is_terminal() {
            return previous;
        }
        if next == CallState::Failed {
            trail.failed_after = Some(previous);
        }
        trail.current = next;
        previous
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Trail> {
        self.trail.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
