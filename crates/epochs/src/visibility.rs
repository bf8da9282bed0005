use crate::sched::{Scheduler, Tick, TimerId, TimerSlot};

/// Widest viewport that still gets the per-frame visibility sweep.
pub const NARROW_VIEWPORT: f64 = 399.0;
pub const PARTIALLY_VISIBLE_CLASS: &str = "partially-visible";

pub fn is_narrow(width: f64, threshold: f64) -> bool {
    width <= threshold
}

/// Horizontal extent of a widget in a shared coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
}

impl Bounds {
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    pub fn from_origin(x: f64, width: f64) -> Self {
        Self::new(x, x + width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Full,
    Partial,
}

impl Visibility {
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Partial)
    }
}

pub fn classify(slide: Bounds, container: Bounds) -> Visibility {
    if slide.left >= container.left && slide.right <= container.right {
        Visibility::Full
    } else {
        Visibility::Partial
    }
}

/// Self-rescheduling per-frame sweep that only runs on narrow viewports.
#[derive(Debug, Clone, Default)]
pub struct VisibilityLoop {
    enabled: bool,
    frame: TimerSlot,
}

impl VisibilityLoop {
    pub fn is_running(&self) -> bool {
        self.frame.is_live()
    }

    pub fn set_enabled(&mut self, enabled: bool, sched: &mut impl Scheduler) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        self.restart(sched);
    }

    /// Tears the loop down and, when still enabled, starts a fresh one.
    pub fn restart(&mut self, sched: &mut impl Scheduler) {
        self.frame.cancel(sched);
        if self.enabled {
            self.frame.schedule_frame(sched, Tick::SlideSweep);
        }
    }

    /// True when the caller should sweep now; the next frame is already booked.
    pub fn on_timer(&mut self, id: TimerId, sched: &mut impl Scheduler) -> bool {
        if !self.frame.claim(id) {
            return false;
        }
        if self.enabled {
            self.frame.schedule_frame(sched, Tick::SlideSweep);
        }
        self.enabled
    }

    pub fn teardown(&mut self, sched: &mut impl Scheduler) {
        self.frame.cancel(sched);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sched::manual::ManualScheduler;

    #[test]
    fn test_classify_slides() {
        let container = Bounds::new(0.0, 320.0);

        assert_eq!(classify(Bounds::new(0.0, 200.0), container), Visibility::Full);
        assert_eq!(classify(Bounds::new(120.0, 320.0), container), Visibility::Full);
        assert_eq!(
            classify(Bounds::new(220.0, 420.0), container),
            Visibility::Partial
        );
        assert_eq!(
            classify(Bounds::new(-40.0, 160.0), container),
            Visibility::Partial
        );
        assert_eq!(
            classify(Bounds::new(-10.0, 330.0), container),
            Visibility::Partial
        );
        assert!(classify(Bounds::from_origin(300.0, 40.0), container).is_partial());
    }

    #[test]
    fn test_narrow_threshold() {
        assert!(is_narrow(320.0, NARROW_VIEWPORT));
        assert!(is_narrow(399.0, NARROW_VIEWPORT));
        assert!(!is_narrow(400.0, NARROW_VIEWPORT));
    }

    #[test]
    fn test_loop_reschedules_every_frame() {
        let mut sched = ManualScheduler::new();
        let mut sweep = VisibilityLoop::default();

        sweep.set_enabled(true, &mut sched);
        let mut sweeps = 0;
        for _ in 0..5 {
            for (id, _) in sched.frame() {
                if sweep.on_timer(id, &mut sched) {
                    sweeps += 1;
                }
            }
        }

        assert_eq!(sweeps, 5);
        assert!(sched.has_frame(Tick::SlideSweep));
    }

    #[test]
    fn test_loop_stays_idle_on_wide_viewport() {
        let mut sched = ManualScheduler::new();
        let mut sweep = VisibilityLoop::default();

        sweep.restart(&mut sched);
        assert!(!sweep.is_running());
        assert_eq!(sched.pending_frames(), 0);
    }

    #[test]
    fn test_restart_replaces_frame() {
        let mut sched = ManualScheduler::new();
        let mut sweep = VisibilityLoop::default();

        sweep.set_enabled(true, &mut sched);
        let stale = sched.frame();
        sweep.restart(&mut sched);

        assert!(!sweep.on_timer(stale[0].0, &mut sched));
        assert_eq!(sched.pending_frames(), 1);

        sweep.set_enabled(false, &mut sched);
        assert_eq!(sched.pending_frames(), 0);
        assert!(!sweep.is_running());
    }
}
