use std::collections::VecDeque;
use std::time::Duration;

use tracing::trace;

const HISTORY_LIMIT: Duration = Duration::from_millis(150);
const DECELERATION_TOUCHPAD: f64 = 0.997;

/// Swipe progress tracker.
///
/// Keeps a short history of deltas to estimate the velocity at release time.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    history: VecDeque<Event>,
    pos: f64,
}

#[derive(Debug, Clone, Copy)]
struct Event {
    delta: f64,
    timestamp: Duration,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self {
            history: VecDeque::new(),
            pos: 0.,
        }
    }

    /// Pushes a new reading into the tracker.
    pub fn push(&mut self, delta: f64, timestamp: Duration) {
        // For the events that we care about, timestamps should always increase monotonically.
        if let Some(last) = self.history.back() {
            if timestamp < last.timestamp {
                trace!(
                    "ignoring event with timestamp {timestamp:?} earlier than last {:?}",
                    last.timestamp
                );
                return;
            }
        }

        self.history.push_back(Event { delta, timestamp });
        self.pos += delta;

        self.trim_history();
    }

    /// Returns the current gesture position.
    pub fn pos(&self) -> f64 {
        self.pos
    }

    /// Computes the current gesture velocity.
    pub fn velocity(&self) -> f64 {
        let (Some(first), Some(last)) = (self.history.front(), self.history.back()) else {
            return 0.;
        };

        let total_time = (last.timestamp - first.timestamp).as_secs_f64();
        if total_time == 0. {
            return 0.;
        }

        let total_delta = self.history.iter().map(|event| event.delta).sum::<f64>();
        total_delta / total_time
    }

    /// Computes the gesture end position after decelerating to a halt.
    pub fn projected_end_pos(&self) -> f64 {
        let vel = self.velocity();
        self.pos - vel / (1000. * DECELERATION_TOUCHPAD.ln())
    }

    fn trim_history(&mut self) {
        let Some(&Event { timestamp: now, .. }) = self.history.back() else {
            return;
        };

        while let Some(first) = self.history.front() {
            if now <= first.timestamp + HISTORY_LIMIT {
                break;
            }

            let _ = self.history.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn accumulates_position() {
        let mut tracker = SwipeTracker::new();
        tracker.push(10., ms(0));
        tracker.push(-4., ms(10));
        assert_eq!(tracker.pos(), 6.);
    }

    #[test]
    fn ignores_events_going_back_in_time() {
        let mut tracker = SwipeTracker::new();
        tracker.push(10., ms(20));
        tracker.push(10., ms(10));
        assert_eq!(tracker.pos(), 10.);
    }

    #[test]
    fn velocity_over_recent_history() {
        let mut tracker = SwipeTracker::new();
        assert_eq!(tracker.velocity(), 0.);

        tracker.push(0., ms(0));
        tracker.push(10., ms(50));
        tracker.push(10., ms(100));
        assert_abs_diff_eq!(tracker.velocity(), 200., epsilon = 1e-9);

        // Old events fall out of the history window.
        tracker.push(0., ms(400));
        assert_eq!(tracker.velocity(), 0.);
    }

    #[test]
    fn projection_follows_velocity() {
        let mut tracker = SwipeTracker::new();
        tracker.push(0., ms(0));
        tracker.push(-30., ms(30));
        assert!(tracker.projected_end_pos() < tracker.pos());
    }
}
