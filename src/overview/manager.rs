use std::rc::Rc;
use std::time::Duration;

use taskview_config::Config;
use tracing::{debug, trace};

use super::drag::DragSession;
use super::view::{View, ViewState};
use super::Direction;
use crate::animation::Clock;
use crate::desktop::{Desktop, MonitorId, RenderHost, WindowId};
use crate::layout::Options;

/// Registry of the per-monitor views.
///
/// The host constructs one at startup, keeps it in sync with its monitors and forwards input,
/// render and config reload events to it.
#[derive(Debug)]
pub struct Manager {
    views: Vec<View>,
    drag: Option<DragSession>,
    /// Monitor whose view is following a touchpad swipe.
    swipe: Option<MonitorId>,
    clock: Clock,
    options: Rc<Options>,
}

impl Manager {
    pub fn new(clock: Clock, config: &Config) -> Self {
        Self {
            views: Vec::new(),
            drag: None,
            swipe: None,
            clock,
            options: Rc::new(Options::from_config(config)),
        }
    }

    pub fn options(&self) -> &Rc<Options> {
        &self.options
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    pub fn view(&self, monitor: MonitorId) -> Option<&View> {
        self.views.iter().find(|view| view.monitor() == monitor)
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    fn cursor_view_idx<D: Desktop + ?Sized>(&self, desktop: &D) -> Option<usize> {
        let monitor = desktop.monitor_under_cursor()?;
        self.views.iter().position(|view| view.monitor() == monitor)
    }

    /// Creates views for new monitors and drops the views of removed ones.
    pub fn sync_monitors<D: Desktop + ?Sized>(&mut self, desktop: &mut D) {
        let _span = tracy_client::span!("Manager::sync_monitors");

        let monitors = desktop.monitors();

        self.views.retain(|view| {
            let keep = monitors.contains(&view.monitor());
            if !keep {
                debug!("monitor {} removed, dropping its view", view.monitor());
            }
            keep
        });

        if self
            .drag
            .is_some_and(|drag| !monitors.contains(&drag.monitor))
        {
            self.drag = None;
        }
        if self.swipe.is_some_and(|swipe| !monitors.contains(&swipe)) {
            self.swipe = None;
        }

        for monitor in monitors {
            match self.views.iter().position(|view| view.monitor() == monitor) {
                Some(idx) => {
                    // The monitor may have been resized.
                    let view = &mut self.views[idx];
                    if view.state() == ViewState::Closed {
                        view.init_position(desktop);
                    }
                }
                None => {
                    debug!("monitor {monitor} added, creating a view");
                    let view =
                        View::new(monitor, self.clock.clone(), self.options.clone(), desktop);
                    self.views.push(view);
                }
            }
        }
    }

    /// Drops every view and any drag in progress.
    pub fn reset(&mut self) {
        self.views.clear();
        self.drag = None;
        self.swipe = None;
    }

    pub fn update_config<D: Desktop + ?Sized>(&mut self, config: &Config, desktop: &mut D) {
        let _span = tracy_client::span!("Manager::update_config");

        let options = Rc::new(Options::from_config(config));
        if options == self.options {
            return;
        }

        self.options = options;
        self.drag = None;
        self.swipe = None;
        for view in &mut self.views {
            view.update_options(self.options.clone(), desktop);
        }
    }

    pub fn has_active_view(&self) -> bool {
        self.views.iter().any(View::is_active)
    }

    pub fn cursor_view_active<D: Desktop + ?Sized>(&self, desktop: &D) -> bool {
        self.cursor_view_idx(desktop)
            .is_some_and(|idx| self.views[idx].is_active())
    }

    pub fn show_all<D: Desktop + ?Sized>(&mut self, desktop: &mut D) {
        let _span = tracy_client::span!("Manager::show_all");

        for view in &mut self.views {
            view.show(desktop);
        }
    }

    pub fn show_cursor_view<D: Desktop + ?Sized>(&mut self, desktop: &mut D) {
        let _span = tracy_client::span!("Manager::show_cursor_view");

        if let Some(idx) = self.cursor_view_idx(&*desktop) {
            self.views[idx].show(desktop);
        }
    }

    pub fn hide_all<D: Desktop + ?Sized>(&mut self, resolve_on_pointer: bool, desktop: &mut D) {
        let _span = tracy_client::span!("Manager::hide_all");

        if let Some(drag) = self.drag.take() {
            trace!("hiding during a drag of window {}", drag.window);
            desktop.end_window_move();
        }
        self.swipe = None;

        for view in &mut self.views {
            view.hide(resolve_on_pointer, desktop);
        }
    }

    /// Hides every view if one is active, shows them otherwise.
    pub fn toggle<D: Desktop + ?Sized>(&mut self, all: bool, desktop: &mut D) {
        if self.has_active_view() {
            self.hide_all(false, desktop);
        } else if all {
            self.show_all(desktop);
        } else {
            self.show_cursor_view(desktop);
        }
    }

    /// Closes the overview, landing on the workspace under the pointer.
    pub fn exit_to_workspace<D: Desktop + ?Sized>(&mut self, desktop: &mut D) -> bool {
        if !self.has_active_view() {
            return false;
        }

        self.hide_all(true, desktop);
        true
    }

    /// Moves to the neighboring workspace on the cursor's monitor.
    pub fn move_to<D: Desktop + ?Sized>(
        &mut self,
        direction: Direction,
        move_window: bool,
        desktop: &mut D,
    ) -> bool {
        let _span = tracy_client::span!("Manager::move_to");

        if self.drag.is_some() {
            trace!("not moving during a drag");
            return false;
        }

        let Some(idx) = self.cursor_view_idx(&*desktop) else {
            return false;
        };
        self.views[idx].move_to(direction, move_window, desktop)
    }

    /// Handles a pointer button. Returns `true` if the event was consumed.
    pub fn on_mouse_button<D: Desktop + ?Sized>(
        &mut self,
        button: u32,
        pressed: bool,
        desktop: &mut D,
    ) -> bool {
        let _span = tracy_client::span!("Manager::on_mouse_button");

        let drag_button = self.options.overview.drag_button;
        let select_button = self.options.overview.select_button;

        if button == drag_button && !pressed {
            if let Some(drag) = self.drag.take() {
                // Outside of the filmstrip the host finishes the move on the live workspace.
                return match self.cursor_view_idx(&*desktop) {
                    Some(idx)
                        if self.views[idx].is_active()
                            && self.views[idx].manages_pointer(&*desktop) =>
                    {
                        self.views[idx].end_window_drag(drag, desktop)
                    }
                    _ => {
                        desktop.end_window_move();
                        false
                    }
                };
            }
        }

        let Some(idx) = self.cursor_view_idx(&*desktop) else {
            return false;
        };
        let view = &mut self.views[idx];
        if !view.is_active() {
            return false;
        }
        if !view.manages_pointer(&*desktop) {
            // Clicking the live workspace around the filmstrip dismisses it; the click itself
            // still goes to the workspace.
            if button == drag_button && pressed {
                debug!("pressed outside of the overview, hiding");
                self.hide_all(false, desktop);
            }
            return false;
        }

        if button == drag_button {
            if pressed && self.drag.is_none() {
                self.drag = view.start_window_drag(desktop);
            }
            return true;
        }

        if button == select_button {
            if pressed {
                self.exit_to_workspace(desktop);
            }
            return true;
        }

        false
    }

    /// Handles pointer motion. Never consumes the event.
    pub fn on_mouse_move<D: Desktop + ?Sized>(&mut self, desktop: &mut D) -> bool {
        let Some(mut drag) = self.drag else {
            return false;
        };

        if desktop.dragged_window() != Some(drag.window) {
            debug!("window {} is no longer being moved", drag.window);
            self.drag = None;
            return false;
        }

        if let Some(idx) = self.cursor_view_idx(&*desktop) {
            if self.views[idx].is_active() {
                self.views[idx].on_drag_motion(&mut drag, desktop);
            }
        }

        self.drag = Some(drag);
        false
    }

    /// Handles a scroll event. Returns `true` if the event was consumed.
    pub fn on_mouse_axis<D: Desktop + ?Sized>(&mut self, delta: f64, desktop: &mut D) -> bool {
        let Some(idx) = self.cursor_view_idx(&*desktop) else {
            return false;
        };
        self.views[idx].on_mouse_axis(delta, &*desktop)
    }

    pub fn on_swipe_begin<D: Desktop + ?Sized>(&mut self, fingers: u32, desktop: &mut D) -> bool {
        let gestures = self.options.overview.gestures;
        if gestures.off || fingers != u32::from(gestures.fingers) || self.drag.is_some() {
            return false;
        }

        let Some(idx) = self.cursor_view_idx(&*desktop) else {
            return false;
        };

        let view = &mut self.views[idx];
        if !view.gesture_begin(desktop) {
            return false;
        }

        self.swipe = Some(view.monitor());
        true
    }

    pub fn on_swipe_update<D: Desktop + ?Sized>(
        &mut self,
        delta_x: f64,
        delta_y: f64,
        timestamp: Duration,
        desktop: &mut D,
    ) -> bool {
        let Some(monitor) = self.swipe else {
            return false;
        };
        trace!("swipe update: {delta_x}, {delta_y}");

        let Some(view) = self.views.iter_mut().find(|view| view.monitor() == monitor) else {
            self.swipe = None;
            return false;
        };
        view.gesture_update(delta_y, timestamp, desktop)
    }

    pub fn on_swipe_end<D: Desktop + ?Sized>(&mut self, cancelled: bool, desktop: &mut D) -> bool {
        let Some(monitor) = self.swipe.take() else {
            return false;
        };

        let Some(view) = self.views.iter_mut().find(|view| view.monitor() == monitor) else {
            return false;
        };
        view.gesture_end(cancelled, desktop)
    }

    /// Whether the host should draw the window on the monitor at its regular place.
    pub fn should_render_window<D: Desktop + ?Sized>(
        &self,
        window: WindowId,
        monitor: MonitorId,
        desktop: &D,
    ) -> bool {
        let Some(view) = self.view(monitor) else {
            return true;
        };
        if !view.is_visible() {
            return true;
        }

        let (Some(window), Some(monitor)) = (desktop.window(window), desktop.monitor(monitor))
        else {
            return false;
        };

        let dragged = self.drag.map(|drag| drag.window);
        view.layout()
            .should_render_window(&window, dragged, &monitor, desktop)
    }

    /// Scale the dragged window is drawn at.
    pub fn drag_window_scale<D: Desktop + ?Sized>(&self, desktop: &D) -> f64 {
        if self.drag.is_none() {
            return 1.;
        }

        match self.cursor_view_idx(desktop) {
            Some(idx) if self.views[idx].is_active() => {
                self.views[idx].drag_window_scale(desktop.pointer_position(), desktop)
            }
            _ => 1.,
        }
    }

    pub fn render<H: RenderHost + ?Sized>(&mut self, monitor: MonitorId, host: &mut H) {
        let drag = self.drag;
        if let Some(view) = self.views.iter_mut().find(|view| view.monitor() == monitor) {
            view.render(host, drag.as_ref());
        }
    }

    pub fn are_animations_ongoing(&self) -> bool {
        self.views.iter().any(View::are_animations_ongoing)
    }

    pub fn advance_animations(&mut self) {
        for view in &mut self.views {
            view.advance_animations();
        }
    }
}
