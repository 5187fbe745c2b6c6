//! Interactive open and close with a touchpad swipe.

use std::time::Duration;

use tracing::{debug, trace};

use super::view::{View, ViewState};
use crate::desktop::Desktop;
use crate::input::swipe_tracker::SwipeTracker;

#[derive(Debug, Clone)]
pub struct GestureState {
    tracker: SwipeTracker,
    /// Progress when the swipe began.
    start_progress: f64,
    started_open: bool,
}

impl View {
    fn gesture_distance(&self) -> f64 {
        self.layout.options().overview.gestures.distance.0.max(1.)
    }

    pub fn gesture_begin<D: Desktop + ?Sized>(&mut self, desktop: &mut D) -> bool {
        let _span = tracy_client::span!("View::gesture_begin");

        let started_open = match self.state() {
            ViewState::Closed => false,
            ViewState::Open => true,
            state => {
                trace!("monitor {}: ignoring swipe while {state:?}", self.monitor());
                return false;
            }
        };

        let Some(monitor) = desktop.monitor(self.monitor()) else {
            return false;
        };

        let start_progress = match self.layout.progress(&monitor) {
            Ok(progress) => progress,
            Err(err) => {
                self.report(err, desktop);
                return false;
            }
        };

        if !started_open {
            self.begin_opening(monitor.active_workspace);
        }

        debug!(
            "monitor {}: swipe started at progress {start_progress}",
            monitor.name
        );
        self.gesture = Some(GestureState {
            tracker: SwipeTracker::new(),
            start_progress,
            started_open,
        });
        true
    }

    pub fn gesture_update<D: Desktop + ?Sized>(
        &mut self,
        delta_y: f64,
        timestamp: Duration,
        desktop: &mut D,
    ) -> bool {
        let distance = self.gesture_distance();
        let Some(gesture) = &mut self.gesture else {
            return false;
        };

        // Swiping up opens. Swiping past either end stops there.
        gesture.tracker.push(-delta_y, timestamp);
        let progress = (gesture.start_progress + gesture.tracker.pos() / distance).clamp(0., 1.);

        let Some(monitor) = desktop.monitor(self.monitor()) else {
            return false;
        };

        if let Err(err) = self.layout.set_progress(progress, &monitor, &*desktop) {
            self.report(err, desktop);
            self.force_close();
        }

        true
    }

    pub fn gesture_end<D: Desktop + ?Sized>(&mut self, cancelled: bool, desktop: &mut D) -> bool {
        let _span = tracy_client::span!("View::gesture_end");

        let distance = self.gesture_distance();
        let Some(gesture) = self.gesture.take() else {
            return false;
        };

        let end = if cancelled {
            gesture.start_progress
        } else {
            gesture.start_progress + gesture.tracker.projected_end_pos() / distance
        };
        trace!("monitor {}: swipe ended, projected progress {end}", self.monitor());

        let Some(monitor) = desktop.monitor(self.monitor()) else {
            self.force_close();
            return true;
        };

        if end >= 0.5 {
            if let Err(err) = self.layout.on_show(&monitor, &*desktop) {
                self.report(err, desktop);
                self.force_close();
                return true;
            }

            self.set_opening();
        } else if gesture.started_open {
            self.hide(false, desktop);
        } else {
            if let Err(err) = self.layout.on_hide(&monitor, &*desktop) {
                self.report(err, desktop);
                self.force_close();
                return true;
            }

            self.set_closing();
        }

        true
    }
}
