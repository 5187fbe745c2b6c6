use std::time::Duration;

use keyframe::functions::{EaseOutCubic, EaseOutQuad, Linear};
use keyframe::EasingFunction;

mod clock;

pub use clock::Clock;

/// A one-shot interpolation between two values.
#[derive(Debug, Clone)]
pub struct Animation {
    from: f64,
    to: f64,
    duration: Duration,
    start_time: Duration,
    curve: Curve,
    clock: Clock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Linear,
    EaseOutQuad,
    EaseOutCubic,
    EaseOutExpo,
}

impl Animation {
    pub fn new(clock: Clock, from: f64, to: f64, config: taskview_config::Animation) -> Self {
        let duration = if config.off || clock.should_complete_instantly() {
            Duration::ZERO
        } else {
            Duration::from_millis(u64::from(config.duration_ms))
        };

        Self {
            from,
            to,
            duration,
            start_time: clock.now(),
            curve: Curve::from(config.curve),
            clock,
        }
    }

    /// Restarts the animation towards a new target, keeping the timing configuration.
    pub fn restarted(&self, from: f64, to: f64) -> Self {
        Self {
            from,
            to,
            start_time: self.clock.now(),
            ..self.clone()
        }
    }

    pub fn is_done(&self) -> bool {
        self.clock.now() >= self.start_time + self.duration
    }

    pub fn value(&self) -> f64 {
        let passed = self.clock.now().saturating_sub(self.start_time);
        if passed >= self.duration {
            return self.to;
        }

        let x = passed.as_secs_f64() / self.duration.as_secs_f64();
        // The easing functions stay within the segment, but keep it that way regardless.
        let y = self.curve.y(x).clamp(0., 1.);
        self.from + (self.to - self.from) * y
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    pub fn offset(&mut self, delta: f64) {
        self.from += delta;
        self.to += delta;
    }
}

impl Curve {
    pub fn y(self, x: f64) -> f64 {
        match self {
            Curve::Linear => Linear.y(x),
            Curve::EaseOutQuad => EaseOutQuad.y(x),
            Curve::EaseOutCubic => EaseOutCubic.y(x),
            Curve::EaseOutExpo => 1. - 2f64.powf(-10. * x),
        }
    }
}

impl From<taskview_config::Curve> for Curve {
    fn from(value: taskview_config::Curve) -> Self {
        match value {
            taskview_config::Curve::Linear => Curve::Linear,
            taskview_config::Curve::EaseOutQuad => Curve::EaseOutQuad,
            taskview_config::Curve::EaseOutCubic => Curve::EaseOutCubic,
            taskview_config::Curve::EaseOutExpo => Curve::EaseOutExpo,
        }
    }
}

/// Work to run once a set of animated values has settled on its goal.
///
/// Replacing a pending transition with a new one drops the old continuation without running it.
pub struct Transition<T> {
    name: &'static str,
    continuation: Box<dyn FnOnce(&mut T)>,
}

impl<T> Transition<T> {
    pub fn new(name: &'static str, continuation: impl FnOnce(&mut T) + 'static) -> Self {
        Self {
            name,
            continuation: Box::new(continuation),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn run(self, target: &mut T) {
        (self.continuation)(target);
    }
}

impl<T> std::fmt::Debug for Transition<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
