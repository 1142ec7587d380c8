//! Simulated asynchronous work.
//!
//! Deploys, creative generation, exports and uploads pretend to take time.
//! Instead of chaining timers, each operation is a [`TaskQueue`]: an
//! explicit, ordered list of delays and actions that runs to completion or
//! stops at the first cancellation or error. Swapping a delay for real I/O
//! later does not change the control flow around it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::DashboardError;

/// Granularity at which a sleeping delay re-checks its token.
const CANCEL_POLL: Duration = Duration::from_millis(25);

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// A fixed-duration pause standing in for real work.
#[derive(Debug, Clone)]
pub struct SimulatedDelay {
    name: String,
    duration: Duration,
}

impl SimulatedDelay {
    pub fn new(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }

    pub fn from_millis(name: impl Into<String>, ms: u64) -> Self {
        Self::new(name, Duration::from_millis(ms))
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Sleep for the configured duration in short slices, returning
    /// `Cancelled` as soon as the token is set.
    pub fn wait(&self, token: &CancelToken) -> Result<(), DashboardError> {
        let deadline = Instant::now() + self.duration;
        loop {
            if token.is_cancelled() {
                return Err(DashboardError::Cancelled(self.name.clone()));
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            thread::sleep((deadline - now).min(CANCEL_POLL));
        }
    }
}

type Action<'a, C> = Box<dyn FnOnce(&mut C) -> Result<(), DashboardError> + 'a>;

enum Step<'a, C> {
    Delay(SimulatedDelay),
    Action { name: String, run: Action<'a, C> },
}

/// Ordered steps executed strictly one after another against a context.
pub struct TaskQueue<'a, C> {
    name: String,
    steps: Vec<Step<'a, C>>,
}

impl<'a, C> TaskQueue<'a, C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Append a simulated delay. Zero-length delays are skipped.
    pub fn delay_ms(mut self, ms: u64) -> Self {
        if ms > 0 {
            let name = format!("{} (waiting)", self.name);
            self.steps.push(Step::Delay(SimulatedDelay::from_millis(name, ms)));
        }
        self
    }

    /// Append an action.
    pub fn then(
        mut self,
        name: impl Into<String>,
        run: impl FnOnce(&mut C) -> Result<(), DashboardError> + 'a,
    ) -> Self {
        self.steps.push(Step::Action {
            name: name.into(),
            run: Box::new(run),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order. Returns the names of the completed actions.
    ///
    /// Cancellation is checked before every step; actions that already ran
    /// are not rolled back.
    pub fn run(self, ctx: &mut C, token: &CancelToken) -> Result<Vec<String>, DashboardError> {
        let mut completed = Vec::new();
        for step in self.steps {
            if token.is_cancelled() {
                return Err(DashboardError::Cancelled(self.name));
            }
            match step {
                Step::Delay(delay) => delay.wait(token)?,
                Step::Action { name, run } => {
                    run(ctx)?;
                    completed.push(name);
                }
            }
        }
        Ok(completed)
    }
}
