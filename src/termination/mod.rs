//! Termination criteria
//!
//! A run always stops after its configured generation count. It can stop earlier, at
//! a generation boundary, when a shared cancellation token is tripped or a wall-clock
//! limit expires.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Shared, clonable cancellation flag
///
/// Clones observe the same flag, so one clone can be handed to another thread and
/// cancelled from there.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Why a run stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// All configured generations ran
    GenerationsCompleted,
    /// The cancellation token was tripped
    Cancelled,
    /// The time limit expired
    TimeLimit,
}

impl TerminationReason {
    /// Human-readable description
    pub fn describe(&self) -> &'static str {
        match self {
            Self::GenerationsCompleted => "Maximum generations reached",
            Self::Cancelled => "Cancelled by caller",
            Self::TimeLimit => "Time limit reached",
        }
    }
}

/// Stop rule checked at every generation boundary
#[derive(Clone, Debug)]
pub struct StopCondition {
    max_generations: usize,
    cancellation: Option<CancellationToken>,
    time_limit: Option<Duration>,
}

impl StopCondition {
    /// Stop after `max_generations` generations
    pub fn new(max_generations: usize) -> Self {
        Self {
            max_generations,
            cancellation: None,
            time_limit: None,
        }
    }

    /// Also stop when `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Also stop once `limit` has elapsed since the run started
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Decide whether to stop before running generation `completed + 1`
    pub fn check(&self, completed: usize, started: Instant) -> Option<TerminationReason> {
        if completed >= self.max_generations {
            return Some(TerminationReason::GenerationsCompleted);
        }
        if self
            .cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
        {
            return Some(TerminationReason::Cancelled);
        }
        if self
            .time_limit
            .is_some_and(|limit| started.elapsed() >= limit)
        {
            return Some(TerminationReason::TimeLimit);
        }
        None
    }
}
