use std::rc::Rc;
use std::time::Duration;

use web_time::Instant;

/// Source of monotonic time for a session.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to, clones share the same time.
#[derive(Clone, Debug)]
pub struct ManualClock {
    base: Instant,
    offset: Rc<std::cell::Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Rc::default(),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }
}

/// Elapsed play time net of pauses, in whole seconds.
///
/// Each pause interval is truncated to whole seconds before it is added to
/// the paused total. While paused the reading is frozen at the pause instant,
/// and once stopped it is frozen at the stop instant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Stopwatch {
    started_at: Instant,
    paused_at: Option<Instant>,
    paused_secs: u64,
    stopped_at: Option<Instant>,
}

impl Stopwatch {
    pub fn start(now: Instant) -> Self {
        Self {
            started_at: now,
            paused_at: None,
            paused_secs: 0,
            stopped_at: None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped_at.is_some()
    }

    pub fn pause(&mut self, now: Instant) {
        if self.paused_at.is_none() && self.stopped_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// Ends the current pause and returns how many seconds it added.
    pub fn resume(&mut self, now: Instant) -> u64 {
        let Some(paused_at) = self.paused_at.take() else {
            return 0;
        };
        let secs = now.saturating_duration_since(paused_at).as_secs();
        self.paused_secs += secs;
        secs
    }

    pub fn stop(&mut self, now: Instant) {
        if self.stopped_at.is_none() {
            self.stopped_at = Some(self.paused_at.unwrap_or(now));
        }
    }

    pub fn paused_secs(&self) -> u64 {
        self.paused_secs
    }

    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        let end = self.stopped_at.or(self.paused_at).unwrap_or(now);
        end.saturating_duration_since(self.started_at)
            .as_secs()
            .saturating_sub(self.paused_secs)
    }
}
