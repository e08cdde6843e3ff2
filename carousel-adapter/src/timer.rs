/// A repeating timer driven by adapter ticks (the `setInterval` counterpart).
///
/// The widget owns one of these for autoplay; nothing fires unless the host calls `poll`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    period_ms: u64,
    next_due_ms: Option<u64>,
}

impl Interval {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)starts the timer; any previous schedule is discarded.
    pub fn start(&mut self, now_ms: u64, period_ms: u64) {
        self.period_ms = period_ms.max(1);
        self.next_due_ms = Some(now_ms.saturating_add(self.period_ms));
    }

    pub fn stop(&mut self) {
        self.next_due_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due_ms.is_some()
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.next_due_ms
    }

    /// Returns `true` when a period has elapsed and schedules the next one.
    ///
    /// Periods missed between two polls collapse into a single firing.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let Some(due) = self.next_due_ms else {
            return false;
        };
        if now_ms < due {
            return false;
        }
        self.next_due_ms = Some(now_ms.saturating_add(self.period_ms));
        true
    }
}
