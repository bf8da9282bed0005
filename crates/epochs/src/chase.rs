use crate::section::{Year, YearRange};
use crate::sched::{Scheduler, Tick, TimerId, TimerSlot};
use std::cmp::Ordering;

/// Year counter that walks toward its target one year per frame.
///
/// The displayed span is taken from the target from the first step on, so
/// only the start year is really being chased.
#[derive(Debug, Clone)]
pub struct YearChase {
    shown: YearRange,
    target: Option<YearRange>,
    frame: TimerSlot,
}

impl YearChase {
    pub fn new(initial: YearRange) -> Self {
        Self {
            shown: initial,
            target: None,
            frame: TimerSlot::default(),
        }
    }

    pub fn shown(&self) -> YearRange {
        self.shown
    }

    pub fn is_running(&self) -> bool {
        self.target.is_some()
    }

    /// Drops any chase in flight and starts toward `target`. The first step
    /// happens immediately.
    pub fn retarget(&mut self, target: YearRange, sched: &mut impl Scheduler) {
        self.frame.cancel(sched);
        self.target = Some(target);
        self.step(sched);
    }

    pub fn on_timer(&mut self, id: TimerId, sched: &mut impl Scheduler) -> bool {
        self.frame.claim(id) && self.step(sched)
    }

    pub fn teardown(&mut self, sched: &mut impl Scheduler) {
        self.frame.cancel(sched);
        self.target = None;
    }

    fn step(&mut self, sched: &mut impl Scheduler) -> bool {
        let Some(target) = self.target else {
            return false;
        };

        let start: Year = match target.start.cmp(&self.shown.start) {
            Ordering::Greater => self.shown.start + 1,
            Ordering::Less => self.shown.start - 1,
            Ordering::Equal => target.start,
        };
        if start == target.start {
            self.shown = target;
            self.target = None;
        } else {
            self.shown = YearRange {
                start,
                end: start.saturating_add(target.span()),
            };
            self.frame.schedule_frame(sched, Tick::YearStep);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sched::manual::ManualScheduler;

    fn range(start: Year, end: Year) -> YearRange {
        YearRange::new(start, end).unwrap()
    }

    fn run_to_rest(chase: &mut YearChase, sched: &mut ManualScheduler) -> Vec<YearRange> {
        let mut frames = vec![chase.shown()];
        while chase.is_running() {
            for (id, _) in sched.frame() {
                if chase.on_timer(id, sched) {
                    frames.push(chase.shown());
                }
            }
        }
        frames
    }

    #[test]
    fn test_chase_keeps_target_span_every_frame() {
        let mut sched = ManualScheduler::new();
        let mut chase = YearChase::new(range(1999, 2004));

        chase.retarget(range(1987, 1991), &mut sched);
        let frames = run_to_rest(&mut chase, &mut sched);

        assert_eq!(frames.first(), Some(&range(1998, 2002)));
        assert_eq!(frames.last(), Some(&range(1987, 1991)));
        assert_eq!(frames.len(), 12);
        for pair in frames.windows(2) {
            assert_eq!(pair[1].start, pair[0].start - 1);
        }
        assert!(frames.iter().all(|r| r.span() == 4));
        assert_eq!(sched.pending_frames(), 0);
    }

    #[test]
    fn test_chase_counts_upward() {
        let mut sched = ManualScheduler::new();
        let mut chase = YearChase::new(range(1987, 1991));

        chase.retarget(range(1992, 1997), &mut sched);
        let frames = run_to_rest(&mut chase, &mut sched);

        let starts: Vec<Year> = frames.iter().map(|r| r.start).collect();
        assert_eq!(starts, vec![1988, 1989, 1990, 1991, 1992]);
        assert!(frames.iter().all(|r| r.span() == 5));
    }

    #[test]
    fn test_equal_start_snaps_immediately() {
        let mut sched = ManualScheduler::new();
        let mut chase = YearChase::new(range(1987, 1991));

        chase.retarget(range(1987, 1995), &mut sched);

        assert!(!chase.is_running());
        assert_eq!(chase.shown(), range(1987, 1995));
        assert_eq!(sched.pending_frames(), 0);
    }

    #[test]
    fn test_retarget_cancels_previous_chase() {
        let mut sched = ManualScheduler::new();
        let mut chase = YearChase::new(range(1999, 2004));

        chase.retarget(range(2015, 2022), &mut sched);
        let stale = sched.frame();
        chase.retarget(range(1987, 1991), &mut sched);

        for (id, _) in stale {
            assert!(!chase.on_timer(id, &mut sched));
        }
        assert_eq!(sched.pending_frames(), 1);
        let frames = run_to_rest(&mut chase, &mut sched);
        assert_eq!(frames.last(), Some(&range(1987, 1991)));
    }

    #[test]
    fn test_chase_across_extreme_years() {
        let mut sched = ManualScheduler::new();
        let mut chase = YearChase::new(range(2_000_000_000, 2_000_000_010));

        chase.retarget(range(-2_000_000_000, -1_999_999_990), &mut sched);
        assert_eq!(chase.shown(), range(1_999_999_999, 2_000_000_009));

        chase.retarget(range(-500, 1_000_000_000), &mut sched);
        assert_eq!(chase.shown(), range(1_999_999_998, Year::MAX));
        assert!(chase.is_running());
    }

    #[test]
    fn test_teardown_stops_loop() {
        let mut sched = ManualScheduler::new();
        let mut chase = YearChase::new(range(1999, 2004));

        chase.retarget(range(2008, 2013), &mut sched);
        chase.teardown(&mut sched);

        assert!(!chase.is_running());
        assert_eq!(sched.pending_frames(), 0);
    }
}
