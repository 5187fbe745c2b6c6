//! Animated values for the overview layouts.
//!
//! This module provides [`AnimatedValue`] for 1D animations and [`AnimatedPoint`] for 2D.
//! Retargeting a value with [`AnimatedValue::animate_to`] starts from wherever the value currently
//! is, so an in-flight animation is cancelled simply by giving it a new goal.

use smithay::utils::{Physical, Point};

use crate::animation::{Animation, Clock};

/// A value that is either static or animating toward a target.
#[derive(Debug, Clone)]
pub enum AnimatedValue {
    /// The value is static.
    Static(f64),
    /// The value is animating toward a target.
    Animation(Animation),
}

impl AnimatedValue {
    /// Creates a new static value.
    pub fn new(value: f64) -> Self {
        Self::Static(value)
    }

    /// Returns the current value.
    pub fn current(&self) -> f64 {
        match self {
            AnimatedValue::Static(value) => *value,
            AnimatedValue::Animation(anim) => anim.value(),
        }
    }

    /// Returns the value the animation is heading to.
    pub fn target(&self) -> f64 {
        match self {
            AnimatedValue::Static(value) => *value,
            AnimatedValue::Animation(anim) => anim.to(),
        }
    }

    /// Returns `true` if the value is static.
    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static(_))
    }

    /// Returns `true` if an animation is currently ongoing.
    pub fn is_animation_ongoing(&self) -> bool {
        match self {
            AnimatedValue::Static(_) => false,
            AnimatedValue::Animation(anim) => !anim.is_done(),
        }
    }

    /// Animates from the current value to `to`.
    pub fn animate_to(&mut self, to: f64, clock: &Clock, config: taskview_config::Animation) {
        let from = self.current();
        let anim = Animation::new(clock.clone(), from, to, config);
        *self = if anim.is_done() {
            AnimatedValue::Static(to)
        } else {
            AnimatedValue::Animation(anim)
        };
    }

    /// Jumps straight to `value`, dropping any animation.
    pub fn warp(&mut self, value: f64) {
        *self = AnimatedValue::Static(value);
    }

    /// Offsets the value by the given delta.
    pub fn offset(&mut self, delta: f64) {
        match self {
            AnimatedValue::Static(value) => *value += delta,
            AnimatedValue::Animation(anim) => anim.offset(delta),
        }
    }

    /// Replaces a finished animation with its final value.
    pub fn settle(&mut self) {
        if let AnimatedValue::Animation(anim) = self {
            if anim.is_done() {
                *self = AnimatedValue::Static(anim.to());
            }
        }
    }
}

/// A 2D point in monitor pixels with animated X and Y components.
#[derive(Debug, Clone)]
pub struct AnimatedPoint {
    pub x: AnimatedValue,
    pub y: AnimatedValue,
}

impl AnimatedPoint {
    /// Creates a new static point.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: AnimatedValue::new(x),
            y: AnimatedValue::new(y),
        }
    }

    /// Returns the current position.
    pub fn current(&self) -> Point<f64, Physical> {
        Point::from((self.x.current(), self.y.current()))
    }

    /// Returns the target position.
    pub fn target(&self) -> Point<f64, Physical> {
        Point::from((self.x.target(), self.y.target()))
    }

    /// Returns `true` if both components are static.
    pub fn is_static(&self) -> bool {
        self.x.is_static() && self.y.is_static()
    }

    /// Returns `true` if any animation is currently ongoing.
    pub fn is_animation_ongoing(&self) -> bool {
        self.x.is_animation_ongoing() || self.y.is_animation_ongoing()
    }

    pub fn animate_to(
        &mut self,
        to: Point<f64, Physical>,
        clock: &Clock,
        config: taskview_config::Animation,
    ) {
        self.x.animate_to(to.x, clock, config);
        self.y.animate_to(to.y, clock, config);
    }

    pub fn warp(&mut self, to: Point<f64, Physical>) {
        self.x.warp(to.x);
        self.y.warp(to.y);
    }

    /// Offsets the point by the given delta.
    pub fn offset(&mut self, delta: Point<f64, Physical>) {
        self.x.offset(delta.x);
        self.y.offset(delta.y);
    }

    pub fn settle(&mut self) {
        self.x.settle();
        self.y.settle();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use approx::assert_abs_diff_eq;

    use super::*;

    fn linear(duration_ms: u32) -> taskview_config::Animation {
        taskview_config::Animation {
            off: false,
            duration_ms,
            curve: taskview_config::Curve::Linear,
        }
    }

    #[test]
    fn static_value() {
        let v = AnimatedValue::new(42.0);
        assert!(v.is_static());
        assert!(!v.is_animation_ongoing());
        assert_eq!(v.current(), 42.0);
        assert_eq!(v.target(), 42.0);
    }

    #[test]
    fn offset_static() {
        let mut v = AnimatedValue::new(10.0);
        v.offset(5.0);
        assert_eq!(v.current(), 15.0);
    }

    #[test]
    fn retarget_starts_from_current() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let mut v = AnimatedValue::new(1.0);
        v.animate_to(0.0, &clock, linear(100));

        clock.set_unadjusted(Duration::from_millis(25));
        assert_abs_diff_eq!(v.current(), 0.75, epsilon = 1e-9);

        // Going back mid-flight continues from 0.75 instead of jumping.
        v.animate_to(1.0, &clock, linear(100));
        assert_abs_diff_eq!(v.current(), 0.75, epsilon = 1e-9);
        assert_eq!(v.target(), 1.0);

        clock.set_unadjusted(Duration::from_millis(125));
        assert!(!v.is_animation_ongoing());
        v.settle();
        assert!(v.is_static());
        assert_eq!(v.current(), 1.0);
    }

    #[test]
    fn instant_animation_is_static() {
        let clock = Clock::with_time(Duration::ZERO);
        let mut v = AnimatedValue::new(0.0);
        v.animate_to(3.0, &clock, linear(0));
        assert!(v.is_static());
        assert_eq!(v.current(), 3.0);
    }

    #[test]
    fn animated_point_basic() {
        let p = AnimatedPoint::new(100.0, 200.0);
        assert!(p.is_static());
        assert!(!p.is_animation_ongoing());
        assert_eq!(p.current(), Point::from((100.0, 200.0)));
    }

    #[test]
    fn animated_point_offset() {
        let mut p = AnimatedPoint::new(10.0, 20.0);
        p.offset(Point::from((5.0, -5.0)));
        assert_eq!(p.current(), Point::from((15.0, 15.0)));
    }

    #[test]
    fn animated_point_warp_drops_animation() {
        let clock = Clock::with_time(Duration::ZERO);
        let mut p = AnimatedPoint::new(0.0, 0.0);
        p.animate_to(Point::from((10.0, 10.0)), &clock, linear(100));
        assert!(p.is_animation_ongoing());

        p.warp(Point::from((-4.0, 2.0)));
        assert!(p.is_static());
        assert_eq!(p.target(), Point::from((-4.0, 2.0)));
    }
}
