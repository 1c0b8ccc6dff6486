//! # Tweens
//!
//! A [`Tween`] moves a scalar from one value to another over a fixed duration. It never
//! owns a timer: the caller samples it with the current instant, which keeps it usable
//! both inside a [`FrameActor`](crate::FrameActor) and in plain unit tests.
//!
//! Interrupting a tween is done with [`Tween::settle`], which yields the value the
//! tween was heading to. Callers start the next tween from there, so an interrupted
//! animation is always left fully at its old target and never half-way.

use std::time::Duration;
use tokio::time::Instant;

/// Easing curve applied to the linear time fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    EaseInOut,
}

impl Easing {
    fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

/// A time-driven transition between two values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    started_at: Instant,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, started_at: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
            easing: Easing::default(),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Linear completion fraction in `[0, 1]`.
    pub fn fraction(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// The eased value at `now`.
    pub fn value_at(&self, now: Instant) -> f32 {
        let fraction = self.fraction(now);
        if fraction >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.apply(fraction)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.fraction(now) >= 1.0
    }

    /// Cancels the tween, returning the value it was heading to.
    pub fn settle(self) -> f32 {
        self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_reaches_target_at_duration() {
        let t0 = Instant::now();
        let tween = Tween::new(0.0, 1.0, t0, Duration::from_millis(300));

        assert_eq!(tween.value_at(t0), 0.0);
        assert!(!tween.is_finished(t0 + Duration::from_millis(150)));
        assert_eq!(tween.value_at(t0 + Duration::from_millis(300)), 1.0);
        assert!(tween.is_finished(t0 + Duration::from_millis(301)));
    }

    #[test]
    fn test_tween_midpoint_and_direction() {
        let t0 = Instant::now();
        let down = Tween::new(1.0, 0.0, t0, Duration::from_millis(200)).with_easing(Easing::Linear);
        let mid = down.value_at(t0 + Duration::from_millis(100));
        assert!((mid - 0.5).abs() < 1e-4);

        let eased = Tween::new(0.0, 1.0, t0, Duration::from_millis(200));
        let v = eased.value_at(t0 + Duration::from_millis(100));
        assert!((v - 0.5).abs() < 1e-4);
        assert!(eased.value_at(t0 + Duration::from_millis(20)) < 0.1);
    }

    #[test]
    fn test_zero_duration_is_immediately_finished() {
        let t0 = Instant::now();
        let tween = Tween::new(0.0, 1.0, t0, Duration::ZERO);
        assert!(tween.is_finished(t0));
        assert_eq!(tween.value_at(t0), 1.0);
    }

    #[test]
    fn test_settle_returns_target() {
        let t0 = Instant::now();
        let tween = Tween::new(0.25, 0.0, t0, Duration::from_secs(1));
        assert_eq!(tween.settle(), 0.0);
    }
}
