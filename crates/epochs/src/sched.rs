use std::time::Duration;

/// Handle for a scheduled callback. Also serves as a generation token: a
/// firing whose id no longer matches the owner's live handle is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// What a firing is for, so the owner can route it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tick {
    LabelSwap,
    YearStep,
    SlideSweep,
    DialFrame,
}

/// Event-loop seam. `after` is a one-shot timeout, `next_frame` a one-shot
/// callback on the next rendered frame. Firings come back to the owner as
/// `(TimerId, Tick)`.
pub trait Scheduler {
    fn after(&mut self, delay: Duration, tick: Tick) -> TimerId;
    fn next_frame(&mut self, tick: Tick) -> TimerId;
    fn cancel(&mut self, id: TimerId);
}

/// At most one live handle. Scheduling always cancels the previous one first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimerSlot(Option<TimerId>);

impl TimerSlot {
    pub fn schedule_after(&mut self, sched: &mut impl Scheduler, delay: Duration, tick: Tick) {
        self.cancel(sched);
        self.0 = Some(sched.after(delay, tick));
    }

    pub fn schedule_frame(&mut self, sched: &mut impl Scheduler, tick: Tick) {
        self.cancel(sched);
        self.0 = Some(sched.next_frame(tick));
    }

    pub fn cancel(&mut self, sched: &mut impl Scheduler) {
        if let Some(id) = self.0.take() {
            sched.cancel(id);
        }
    }

    /// Accepts a firing if it belongs to the live handle, which is then spent.
    pub fn claim(&mut self, id: TimerId) -> bool {
        if self.0 == Some(id) {
            self.0 = None;
            true
        } else {
            false
        }
    }

    pub fn is_live(&self) -> bool {
        self.0.is_some()
    }
}

#[cfg(test)]
pub(crate) mod manual {
    use super::*;

    /// Deterministic scheduler for tests: time only moves when told to.
    #[derive(Debug, Default)]
    pub struct ManualScheduler {
        next_id: u64,
        pub now: Duration,
        timers: Vec<(TimerId, Duration, Tick)>,
        frames: Vec<(TimerId, Tick)>,
        pub cancelled: Vec<TimerId>,
    }

    impl ManualScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        fn issue(&mut self) -> TimerId {
            self.next_id += 1;
            TimerId::new(self.next_id)
        }

        /// Moves the clock and returns the timeouts that came due, oldest first.
        pub fn advance(&mut self, by: Duration) -> Vec<(TimerId, Tick)> {
            self.now += by;
            let now = self.now;
            let (due, waiting): (Vec<_>, Vec<_>) =
                self.timers.drain(..).partition(|(_, at, _)| *at <= now);
            self.timers = waiting;
            due.into_iter().map(|(id, _, tick)| (id, tick)).collect()
        }

        /// Hands out every frame callback requested so far.
        pub fn frame(&mut self) -> Vec<(TimerId, Tick)> {
            std::mem::take(&mut self.frames)
        }

        pub fn pending_timers(&self) -> usize {
            self.timers.len()
        }

        pub fn pending_frames(&self) -> usize {
            self.frames.len()
        }

        pub fn has_frame(&self, tick: Tick) -> bool {
            self.frames.iter().any(|(_, t)| *t == tick)
        }
    }

    impl Scheduler for ManualScheduler {
        fn after(&mut self, delay: Duration, tick: Tick) -> TimerId {
            let id = self.issue();
            self.timers.push((id, self.now + delay, tick));
            id
        }

        fn next_frame(&mut self, tick: Tick) -> TimerId {
            let id = self.issue();
            self.frames.push((id, tick));
            id
        }

        fn cancel(&mut self, id: TimerId) {
            self.timers.retain(|(t, _, _)| *t != id);
            self.frames.retain(|(t, _)| *t != id);
            self.cancelled.push(id);
        }
    }
}
