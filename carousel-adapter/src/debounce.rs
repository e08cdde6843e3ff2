use core::fmt;

/// Quiet period applied to window resize bursts.
pub const RESIZE_DEBOUNCE_MS: u64 = 200;

/// Trailing-edge debounce state (no callback attached).
///
/// Each `trigger` pushes the deadline out to `now + delay`; `poll` reports `true` exactly once
/// after the deadline passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Debouncer {
    delay_ms: u64,
    deadline_ms: Option<u64>,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            deadline_ms: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn trigger(&mut self, now_ms: u64) {
        self.deadline_ms = Some(now_ms.saturating_add(self.delay_ms));
    }

    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE_MS)
    }
}

/// A callback wrapped with trailing-edge debouncing. The most recent arguments win.
pub struct Debounced<F, A> {
    f: F,
    timer: Debouncer,
    pending: Option<A>,
}

/// Wraps `f` so that bursts of `call`s within `delay_ms` collapse into one trailing call.
///
/// Time is injected: the host calls [`Debounced::poll`] from its timer loop.
pub fn debounce<F: FnMut(A), A>(f: F, delay_ms: u64) -> Debounced<F, A> {
    Debounced {
        f,
        timer: Debouncer::new(delay_ms),
        pending: None,
    }
}

impl<F: FnMut(A), A> Debounced<F, A> {
    pub fn call(&mut self, now_ms: u64, args: A) {
        self.pending = Some(args);
        self.timer.trigger(now_ms);
    }

    /// Runs the wrapped callback if the quiet period has elapsed. Returns whether it ran.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if !self.timer.poll(now_ms) {
            return false;
        }
        match self.pending.take() {
            Some(args) => {
                (self.f)(args);
                true
            }
            None => false,
        }
    }

    /// Runs a pending call immediately.
    pub fn flush(&mut self) -> bool {
        self.timer.cancel();
        match self.pending.take() {
            Some(args) => {
                (self.f)(args);
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.timer.cancel();
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }
}

impl<F, A> fmt::Debug for Debounced<F, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("timer", &self.timer)
            .field("pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}
