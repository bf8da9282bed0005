use crate::tween::RotationTween;
use serde_with::DeserializeFromStr;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};

pub const POINT_COUNT: usize = 6;
pub const ANGLE_STEP: f64 = 360.0 / POINT_COUNT as f64;
pub const POINT_OFFSET: f64 = -60.0; // first point sits up and to the right of the anchor
pub const POINT_RADIUS: f64 = 50.0; // percent of the dial box
pub const ROTATION_DURATION: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Direction for the dial's imperative control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum Step {
    #[strum(to_string = "next", serialize = "n", serialize = "+")]
    Next,
    #[strum(to_string = "prev", serialize = "previous", serialize = "p", serialize = "-")]
    Previous,
}

impl Step {
    pub fn apply(&self, index: usize) -> usize {
        match self {
            Self::Next => (index + 1) % POINT_COUNT,
            Self::Previous => (index + POINT_COUNT - 1) % POINT_COUNT,
        }
    }
}

/// Reported upward whenever the active point changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionChanged(pub usize);

/// Six-point rotating selector. `rotation` accumulates shortest-path deltas
/// and is never wrapped, so the dial never spins the long way round.
#[derive(Debug, Clone)]
pub struct Dial {
    active: usize,
    rotation: f64,
    tween: Option<RotationTween>,
    duration: Duration,
}

impl Default for Dial {
    fn default() -> Self {
        Self::new(ROTATION_DURATION)
    }
}

impl Dial {
    pub fn new(duration: Duration) -> Self {
        Self {
            active: 0,
            rotation: 0.0,
            tween: None,
            duration,
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Resting rotation in degrees, i.e. where the current tween ends.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn point_angle(index: usize) -> f64 {
        index as f64 * ANGLE_STEP + POINT_OFFSET
    }

    /// Centre of point `index` in percent of the dial's bounding box.
    pub fn point_position(index: usize) -> Point {
        let angle = Self::point_angle(index).to_radians();
        Point::new(
            50.0 + POINT_RADIUS * angle.cos(),
            50.0 + POINT_RADIUS * angle.sin(),
        )
    }

    /// Signed delta from `current` to `target` in (-180, 180].
    pub fn shortest_delta(current: usize, target: usize) -> f64 {
        let mut delta = target as f64 * ANGLE_STEP - current as f64 * ANGLE_STEP;
        if delta > 180.0 {
            delta -= 360.0;
        }
        if delta < -180.0 {
            delta += 360.0;
        }
        delta
    }

    pub fn select(&mut self, index: usize, now: Duration) -> Option<SectionChanged> {
        if index == self.active || index >= POINT_COUNT {
            return None;
        }

        let delta = Self::shortest_delta(self.active, index);
        let from = self.visual_rotation(now);
        self.rotation -= delta;
        // replaces any spin still in flight, starting from where it is now
        self.tween = Some(RotationTween::new(from, self.rotation, now, self.duration));
        self.active = index;

        log::debug!(
            "dial -> point {} (delta {:+}, rotation {})",
            index,
            -delta,
            self.rotation
        );
        Some(SectionChanged(index))
    }

    pub fn advance(&mut self, step: Step, now: Duration) -> Option<SectionChanged> {
        self.select(step.apply(self.active), now)
    }

    pub fn visual_rotation(&self, now: Duration) -> f64 {
        self.tween
            .map(|t| t.value_at(now))
            .unwrap_or(self.rotation)
    }

    /// Counter-rotation that keeps point labels upright.
    pub fn label_rotation(&self, now: Duration) -> f64 {
        -self.visual_rotation(now)
    }

    pub fn is_animating(&self, now: Duration) -> bool {
        self.tween.is_some_and(|t| !t.is_finished(now))
    }

    /// Drops a finished tween. Returns whether the dial is still moving.
    pub fn settle(&mut self, now: Duration) -> bool {
        if self.tween.is_some_and(|t| t.is_finished(now)) {
            self.tween = None;
        }
        self.tween.is_some()
    }
}
