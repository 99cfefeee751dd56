//! Growth Animation Module
//! Time-driven progress in [0, 1] with an accelerate-decelerate curve.

use std::f32::consts::PI;
use std::time::Duration;

/// Ease-in-ease-out curve: slow start, fast middle, slow end.
pub fn accelerate_decelerate(t: f32) -> f32 {
    ((t + 1.0) * PI).cos() / 2.0 + 0.5
}

/// A single linear timeline mapped through [`accelerate_decelerate`].
///
/// Driven cooperatively: the owner feeds elapsed time through [`Animation::advance`]
/// from the thread that draws.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    duration: Duration,
    elapsed: Duration,
    running: bool,
}

impl Default for Animation {
    /// An idle animation at full progress.
    fn default() -> Self {
        Self::idle(Duration::ZERO)
    }
}

impl Animation {
    /// Idle animation of the given length, at full progress.
    pub fn idle(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: duration,
            running: false,
        }
    }

    /// Start from progress 0. A zero duration finishes immediately.
    pub fn start(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            running: !duration.is_zero(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Move the timeline forward. Returns true while the animation is still running.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed = (self.elapsed + dt).min(self.duration);
        if self.elapsed >= self.duration {
            self.running = false;
        }
        self.running
    }

    /// Linear fraction of the timeline that has elapsed.
    pub fn fraction(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Eased progress used to scale displayed values.
    pub fn progress(&self) -> f32 {
        let fraction = self.fraction();
        if fraction <= 0.0 {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }
        accelerate_decelerate(fraction)
    }
}

/// Lazy sequence of eased progress values sampled every `frame_interval`.
///
/// Always ends with exactly one `1.0`; a zero duration yields only that value.
pub fn animate(duration: Duration, frame_interval: Duration) -> Frames {
    Frames {
        animation: Animation::start(duration),
        frame_interval,
        started: false,
        done: false,
    }
}

/// Iterator returned by [`animate`].
#[derive(Debug, Clone)]
pub struct Frames {
    animation: Animation,
    frame_interval: Duration,
    started: bool,
    done: bool,
}

impl Iterator for Frames {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
        } else if self.frame_interval.is_zero() {
            // Cannot make progress with empty frames; jump to the end.
            self.animation.advance(self.animation.duration());
        } else {
            self.animation.advance(self.frame_interval);
        }
        if !self.animation.is_running() {
            self.done = true;
        }
        Some(self.animation.progress())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn curve_endpoints_and_midpoint() {
        assert!(accelerate_decelerate(0.0).abs() < EPS);
        assert!((accelerate_decelerate(1.0) - 1.0).abs() < EPS);
        assert!((accelerate_decelerate(0.5) - 0.5).abs() < EPS);
        // Slow start
        assert!(accelerate_decelerate(0.1) < 0.1);
    }

    #[test]
    fn zero_duration_is_complete_immediately() {
        let animation = Animation::start(Duration::ZERO);
        assert!(!animation.is_running());
        assert_eq!(animation.progress(), 1.0);
        let frames: Vec<f32> = animate(Duration::ZERO, Duration::from_millis(16)).collect();
        assert_eq!(frames, vec![1.0]);
    }

    #[test]
    fn advance_reaches_completion() {
        let mut animation = Animation::start(Duration::from_millis(400));
        assert!(animation.is_running());
        assert_eq!(animation.progress(), 0.0);
        assert!(animation.advance(Duration::from_millis(200)));
        assert!((animation.progress() - 0.5).abs() < EPS);
        assert!(!animation.advance(Duration::from_millis(300)));
        assert_eq!(animation.progress(), 1.0);
        assert!(!animation.advance(Duration::from_millis(100)));
    }

    #[test]
    fn frames_are_monotonic_and_end_at_one() {
        let frames: Vec<f32> = animate(Duration::from_millis(400), Duration::from_millis(16)).collect();
        assert_eq!(frames.first().copied(), Some(0.0));
        assert_eq!(frames.last().copied(), Some(1.0));
        assert_eq!(frames.iter().filter(|&&p| p == 1.0).count(), 1);
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));
        assert!(frames.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn zero_frame_interval_terminates() {
        let frames: Vec<f32> = animate(Duration::from_millis(400), Duration::ZERO).collect();
        assert_eq!(frames, vec![0.0, 1.0]);
    }
}
