use std::time::Duration;

/// Decelerating curve used for the dial spin (`power2.out` in most tween
/// libraries).
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Eased interpolation of a single angle. Times are offsets on a monotonic
/// clock supplied by the caller (the frame clock in the app).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationTween {
    pub from: f64,
    pub to: f64,
    pub started_at: Duration,
    pub duration: Duration,
}

impl RotationTween {
    pub fn new(from: f64, to: f64, started_at: Duration, duration: Duration) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
        }
    }

    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn value_at(&self, now: Duration) -> f64 {
        lerp(self.from, self.to, ease_out_cubic(self.progress(now)))
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPIN: Duration = Duration::from_millis(1200);

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(-3.0), 0.0);
        assert_eq!(ease_out_cubic(7.0), 1.0);
        // decelerating: more than half the distance is covered by the midpoint
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn test_tween_samples_between_endpoints() {
        let start = Duration::from_secs(10);
        let tween = RotationTween::new(0.0, -60.0, start, SPIN);

        assert_eq!(tween.value_at(start), 0.0);
        assert_eq!(tween.value_at(start - Duration::from_secs(1)), 0.0);

        let mid = tween.value_at(start + SPIN / 2);
        assert!(mid < -30.0 && mid > -60.0);

        assert_eq!(tween.value_at(start + SPIN), -60.0);
        assert!(tween.is_finished(start + SPIN));
        assert!(!tween.is_finished(start + SPIN / 3));
    }

    #[test]
    fn test_zero_duration_jumps_to_target() {
        let tween = RotationTween::new(120.0, 60.0, Duration::ZERO, Duration::ZERO);
        assert_eq!(tween.value_at(Duration::ZERO), 60.0);
        assert!(tween.is_finished(Duration::ZERO));
    }
}
