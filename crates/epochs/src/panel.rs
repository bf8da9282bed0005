use crate::chase::YearChase;
use crate::dial::{Dial, POINT_COUNT, ROTATION_DURATION, SectionChanged, Step};
use crate::fader::{LABEL_SWAP_DELAY, LabelFader};
use crate::sched::{Scheduler, Tick, TimerId, TimerSlot};
use crate::section::{Event, SectionLabel, SectionTable, YearRange};
use crate::visibility::{NARROW_VIEWPORT, VisibilityLoop, is_narrow};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub rotation_secs: f64,
    pub label_delay_secs: f64,
    pub narrow_width: f64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            rotation_secs: ROTATION_DURATION.as_secs_f64(),
            label_delay_secs: LABEL_SWAP_DELAY.as_secs_f64(),
            narrow_width: NARROW_VIEWPORT,
        }
    }
}

impl Timings {
    pub fn rotation(&self) -> Duration {
        Duration::try_from_secs_f64(self.rotation_secs).unwrap_or(ROTATION_DURATION)
    }

    pub fn label_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.label_delay_secs).unwrap_or(LABEL_SWAP_DELAY)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelInput {
    PointClicked(usize),
    PrevButton,
    NextButton,
    Advance(Step),
    Select(usize),
}

/// What the view has to do after a firing was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    Redraw,
    SweepSlides,
    Ignored,
}

/// The timeline panel. Single owner of the active section; every change goes
/// through the dial and fans out to the year counter, label and slider.
#[derive(Debug)]
pub struct Panel {
    sections: SectionTable,
    timings: Timings,
    active: usize,
    dial: Dial,
    fader: LabelFader,
    chase: YearChase,
    sweep: VisibilityLoop,
    dial_frame: TimerSlot,
}

impl Panel {
    pub fn new(sections: SectionTable, timings: Timings) -> Self {
        let initial = sections.years(0).unwrap_or(YearRange { start: 0, end: 0 });
        Self {
            dial: Dial::new(timings.rotation()),
            fader: LabelFader::new(0, timings.label_delay()),
            chase: YearChase::new(initial),
            sweep: VisibilityLoop::default(),
            dial_frame: TimerSlot::default(),
            active: 0,
            sections,
            timings,
        }
    }

    pub fn handle(
        &mut self,
        input: PanelInput,
        now: Duration,
        sched: &mut impl Scheduler,
    ) -> Option<SectionChanged> {
        let change = match input {
            PanelInput::PointClicked(index) | PanelInput::Select(index) => {
                self.dial.select(index, now)
            }
            PanelInput::PrevButton if self.prev_enabled() => {
                self.dial.advance(Step::Previous, now)
            }
            PanelInput::NextButton if self.next_enabled() => self.dial.advance(Step::Next, now),
            PanelInput::PrevButton | PanelInput::NextButton => None,
            PanelInput::Advance(step) => self.dial.advance(step, now),
        }?;

        self.apply(change, sched);
        Some(change)
    }

    fn apply(&mut self, SectionChanged(index): SectionChanged, sched: &mut impl Scheduler) {
        if let Some(years) = self.sections.years(index) {
            self.chase.retarget(years, sched);
        }
        self.active = index;
        self.fader.sync(index, sched);
        self.sweep.restart(sched);
        self.dial_frame.schedule_frame(sched, Tick::DialFrame);
    }

    pub fn on_timer(
        &mut self,
        id: TimerId,
        tick: Tick,
        now: Duration,
        sched: &mut impl Scheduler,
    ) -> TimerOutcome {
        let handled = match tick {
            Tick::LabelSwap => self.fader.on_timer(id),
            Tick::YearStep => self.chase.on_timer(id, sched),
            Tick::SlideSweep => {
                return if self.sweep.on_timer(id, sched) {
                    TimerOutcome::SweepSlides
                } else {
                    TimerOutcome::Ignored
                };
            }
            Tick::DialFrame => {
                let claimed = self.dial_frame.claim(id);
                if claimed && self.dial.settle(now) {
                    self.dial_frame.schedule_frame(sched, Tick::DialFrame);
                }
                claimed
            }
        };

        if handled {
            TimerOutcome::Redraw
        } else {
            TimerOutcome::Ignored
        }
    }

    /// Swaps in a freshly loaded table and re-chases the active section's years.
    pub fn reload(
        &mut self,
        sections: SectionTable,
        timings: Timings,
        sched: &mut impl Scheduler,
    ) {
        self.sections = sections;
        self.timings = timings;
        self.dial.set_duration(timings.rotation());
        self.fader.set_delay(timings.label_delay());
        if let Some(years) = self.sections.years(self.active) {
            self.chase.retarget(years, sched);
        }
        self.sweep.restart(sched);
    }

    pub fn set_viewport_width(&mut self, width: f64, sched: &mut impl Scheduler) {
        self.sweep.set_enabled(is_narrow(width, self.timings.narrow_width), sched);
    }

    pub fn teardown(&mut self, sched: &mut impl Scheduler) {
        self.fader.teardown(sched);
        self.chase.teardown(sched);
        self.sweep.teardown(sched);
        self.dial_frame.cancel(sched);
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn sections(&self) -> &SectionTable {
        &self.sections
    }

    pub fn dial(&self) -> &Dial {
        &self.dial
    }

    pub fn prev_enabled(&self) -> bool {
        self.active > 0
    }

    pub fn next_enabled(&self) -> bool {
        self.active + 1 < POINT_COUNT
    }

    pub fn progress_label(&self) -> String {
        format!("{:02}/{:02}", self.active + 1, POINT_COUNT)
    }

    pub fn dots(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.sections.len()).map(move |i| i == self.active)
    }

    pub fn displayed_years(&self) -> YearRange {
        self.chase.shown()
    }

    pub fn label(&self) -> Option<&SectionLabel> {
        self.sections.label(self.fader.displayed())
    }

    pub fn label_visible(&self) -> bool {
        self.fader.visible()
    }

    pub fn events(&self) -> &[Event] {
        self.sections.events(self.active)
    }

    pub fn is_sweeping(&self) -> bool {
        self.sweep.is_running()
    }
}
