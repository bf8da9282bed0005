use crate::sched::{Scheduler, Tick, TimerId, TimerSlot};
use std::time::Duration;

pub const LABEL_SWAP_DELAY: Duration = Duration::from_millis(1100);

/// Label next to the dial. Fades out as soon as the active point changes and
/// comes back with the new text once the dial has (mostly) finished turning.
#[derive(Debug, Clone)]
pub struct LabelFader {
    displayed: usize,
    target: usize,
    visible: bool,
    pending: TimerSlot,
    delay: Duration,
}

impl LabelFader {
    pub fn new(initial: usize, delay: Duration) -> Self {
        Self {
            displayed: initial,
            target: initial,
            visible: true,
            pending: TimerSlot::default(),
            delay,
        }
    }

    pub fn displayed(&self) -> usize {
        self.displayed
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_live()
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Last write wins: a newer index replaces whatever swap is queued.
    pub fn sync(&mut self, active: usize, sched: &mut impl Scheduler) {
        if active == self.target {
            return;
        }
        self.visible = false;
        self.target = active;
        self.pending.schedule_after(sched, self.delay, Tick::LabelSwap);
    }

    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if !self.pending.claim(id) {
            return false;
        }
        self.displayed = self.target;
        self.visible = true;
        true
    }

    pub fn teardown(&mut self, sched: &mut impl Scheduler) {
        self.pending.cancel(sched);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sched::manual::ManualScheduler;

    fn fire(fader: &mut LabelFader, sched: &mut ManualScheduler, by: Duration) -> usize {
        sched
            .advance(by)
            .into_iter()
            .filter(|(id, _)| fader.on_timer(*id))
            .count()
    }

    #[test]
    fn test_hides_then_swaps_after_delay() {
        let mut sched = ManualScheduler::new();
        let mut fader = LabelFader::new(0, LABEL_SWAP_DELAY);

        fader.sync(3, &mut sched);
        assert!(!fader.visible());
        assert_eq!(fader.displayed(), 0);

        assert_eq!(fire(&mut fader, &mut sched, Duration::from_millis(1099)), 0);
        assert_eq!(fader.displayed(), 0);

        assert_eq!(fire(&mut fader, &mut sched, Duration::from_millis(1)), 1);
        assert!(fader.visible());
        assert_eq!(fader.displayed(), 3);
    }

    #[test]
    fn test_rapid_changes_never_show_intermediate() {
        let mut sched = ManualScheduler::new();
        let mut fader = LabelFader::new(0, LABEL_SWAP_DELAY);
        let mut shown = vec![fader.displayed()];

        fader.sync(1, &mut sched);
        for (id, _) in sched.advance(Duration::from_millis(500)) {
            fader.on_timer(id);
            shown.push(fader.displayed());
        }
        fader.sync(2, &mut sched);
        for _ in 0..10 {
            for (id, _) in sched.advance(Duration::from_millis(200)) {
                fader.on_timer(id);
                shown.push(fader.displayed());
            }
        }

        assert!(!shown.contains(&1));
        assert_eq!(fader.displayed(), 2);
        assert!(fader.visible());
        assert_eq!(sched.pending_timers(), 0);
    }

    #[test]
    fn test_same_index_is_noop() {
        let mut sched = ManualScheduler::new();
        let mut fader = LabelFader::new(2, LABEL_SWAP_DELAY);

        fader.sync(2, &mut sched);
        assert!(fader.visible());
        assert_eq!(sched.pending_timers(), 0);
    }

    #[test]
    fn test_returning_to_displayed_index_fades_back_in() {
        let mut sched = ManualScheduler::new();
        let mut fader = LabelFader::new(0, LABEL_SWAP_DELAY);

        fader.sync(1, &mut sched);
        fader.sync(0, &mut sched);
        assert!(!fader.visible());
        assert_eq!(sched.pending_timers(), 1);

        fire(&mut fader, &mut sched, LABEL_SWAP_DELAY);
        assert!(fader.visible());
        assert_eq!(fader.displayed(), 0);
    }

    #[test]
    fn test_teardown_cancels_pending_swap() {
        let mut sched = ManualScheduler::new();
        let mut fader = LabelFader::new(0, LABEL_SWAP_DELAY);

        fader.sync(4, &mut sched);
        fader.teardown(&mut sched);

        assert_eq!(sched.pending_timers(), 0);
        assert!(!fader.is_pending());
        assert_eq!(fire(&mut fader, &mut sched, LABEL_SWAP_DELAY * 2), 0);
        assert_eq!(fader.displayed(), 0);
    }
}
