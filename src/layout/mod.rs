//! Overview layouts.
//!
//! A layout decides where every workspace slot sits inside a monitor for a given [`Stage`]. Slot
//! rectangles live in the monitor's pixel space: the origin is the monitor's top-left corner and
//! units are physical pixels.
//!
//! Layouts own the values that animate between the closed and opened arrangements (grid scale and
//! offset, filmstrip scroll and reveal). Slot maps are rebuilt from those values on demand and are
//! never stored, so a map always reflects the current configuration and animation state.

use std::collections::BTreeMap;
use std::rc::Rc;

use smithay::utils::{Logical, Physical, Point, Rectangle};
use taskview_config::{Config, LayoutKind};

use crate::animation::Clock;
use crate::desktop::{Desktop, MonitorInfo, WindowId, WindowInfo, WorkspaceId};

pub mod animated_value;
mod grid;
mod linear;
mod mapper;

#[cfg(test)]
mod tests;

pub use grid::GridLayout;
pub use linear::LinearLayout;
pub use mapper::Mapper;

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub overview: taskview_config::Overview,
    pub animations: taskview_config::Animations,
}

impl Default for Options {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Options {
    pub fn from_config(config: &Config) -> Self {
        Self {
            overview: config.overview.clone(),
            animations: config.animations,
        }
    }

    /// Animation parameters for the overview, with the global switch applied.
    pub fn overview_animation(&self) -> taskview_config::Animation {
        let mut anim = self.animations.overview;
        anim.off |= self.animations.off;
        anim
    }
}

/// Arrangement to compute slots for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Fully closed: the active workspace covers the monitor.
    Closed,
    /// Fully opened.
    Opened,
    /// Wherever the animated values currently are.
    Animating,
}

/// Placement of one workspace at the current instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub x: i32,
    pub y: i32,
    /// Position and size in monitor pixels.
    pub rect: Rectangle<f64, Physical>,
}

pub type SlotMap = BTreeMap<WorkspaceId, Slot>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("gap size {gap} px does not fit a {width}x{height} px monitor")]
    InvalidGapSize { gap: f64, width: f64, height: f64 },
    #[error("filmstrip height {height} px does not fit a monitor {monitor_height} px tall")]
    InvalidHeight { height: f64, monitor_height: f64 },
    #[error("layout leaves no room for workspaces: cells would be {width}x{height} px")]
    NonPositiveCell { width: f64, height: f64 },
}

/// One of the available layouts.
#[derive(Debug)]
pub enum OverviewLayout {
    Grid(GridLayout),
    Linear(LinearLayout),
}

impl OverviewLayout {
    pub fn new(clock: Clock, options: Rc<Options>) -> Self {
        match options.overview.layout {
            LayoutKind::Grid => OverviewLayout::Grid(GridLayout::new(clock, options)),
            LayoutKind::Linear => OverviewLayout::Linear(LinearLayout::new(clock, options)),
        }
    }

    pub fn kind(&self) -> LayoutKind {
        match self {
            OverviewLayout::Grid(_) => LayoutKind::Grid,
            OverviewLayout::Linear(_) => LayoutKind::Linear,
        }
    }

    pub fn options(&self) -> &Rc<Options> {
        match self {
            OverviewLayout::Grid(layout) => &layout.options,
            OverviewLayout::Linear(layout) => &layout.options,
        }
    }

    /// Replaces the options. The layout kind must stay the same.
    pub fn update_options(&mut self, options: Rc<Options>) {
        debug_assert_eq!(options.overview.layout, self.kind());
        match self {
            OverviewLayout::Grid(layout) => layout.options = options,
            OverviewLayout::Linear(layout) => layout.options = options,
        }
    }

    pub fn build<D: Desktop + ?Sized>(
        &self,
        stage: Stage,
        monitor: &MonitorInfo,
        desktop: &D,
    ) -> Result<SlotMap, LayoutError> {
        let _span = tracy_client::span!("OverviewLayout::build");

        match self {
            OverviewLayout::Grid(layout) => layout.build(stage, monitor, desktop),
            OverviewLayout::Linear(layout) => layout.build(stage, monitor, desktop),
        }
    }

    /// Starts animating towards the opened arrangement.
    pub fn on_show<D: Desktop + ?Sized>(
        &mut self,
        monitor: &MonitorInfo,
        desktop: &D,
    ) -> Result<(), LayoutError> {
        let _span = tracy_client::span!("OverviewLayout::on_show");

        match self {
            OverviewLayout::Grid(layout) => layout.on_show(monitor),
            OverviewLayout::Linear(layout) => layout.on_show(monitor, desktop),
        }
    }

    /// Starts animating towards the closed arrangement around the monitor's active workspace.
    pub fn on_hide<D: Desktop + ?Sized>(
        &mut self,
        monitor: &MonitorInfo,
        desktop: &D,
    ) -> Result<(), LayoutError> {
        let _span = tracy_client::span!("OverviewLayout::on_hide");

        match self {
            OverviewLayout::Grid(layout) => layout.on_hide(monitor, desktop),
            OverviewLayout::Linear(layout) => layout.on_hide(monitor, desktop),
        }
    }

    /// Reacts to the monitor switching from `old` to `new`.
    pub fn on_move<D: Desktop + ?Sized>(
        &mut self,
        old: WorkspaceId,
        new: WorkspaceId,
        view_active: bool,
        monitor: &MonitorInfo,
        desktop: &D,
    ) -> Result<(), LayoutError> {
        let _span = tracy_client::span!("OverviewLayout::on_move");

        match self {
            OverviewLayout::Grid(layout) => {
                layout.on_move(old, new, view_active, monitor, desktop)
            }
            OverviewLayout::Linear(layout) => layout.on_move(new, monitor, desktop),
        }
    }

    /// Jumps to the closed arrangement. Only meaningful while the view is closed.
    pub fn init_position<D: Desktop + ?Sized>(
        &mut self,
        monitor: &MonitorInfo,
        desktop: &D,
    ) -> Result<(), LayoutError> {
        match self {
            OverviewLayout::Grid(layout) => layout.init_position(monitor, desktop),
            OverviewLayout::Linear(layout) => layout.init_position(monitor, desktop),
        }
    }

    /// Places the animated values at `progress` between closed (0) and opened (1).
    ///
    /// Progress outside of that range is clamped: neither arrangement is ever overshot.
    pub fn set_progress<D: Desktop + ?Sized>(
        &mut self,
        progress: f64,
        monitor: &MonitorInfo,
        desktop: &D,
    ) -> Result<(), LayoutError> {
        let progress = progress.clamp(0., 1.);
        match self {
            OverviewLayout::Grid(layout) => layout.set_progress(progress, monitor, desktop),
            OverviewLayout::Linear(layout) => layout.set_progress(progress, monitor),
        }
    }

    /// Current position between closed (0) and opened (1).
    pub fn progress(&self, monitor: &MonitorInfo) -> Result<f64, LayoutError> {
        match self {
            OverviewLayout::Grid(layout) => layout.progress(monitor),
            OverviewLayout::Linear(layout) => layout.progress(monitor),
        }
    }

    /// Whether pointer buttons over the monitor belong to the overview rather than to the
    /// workspace underneath.
    pub fn should_manage_mouse(&self, monitor: &MonitorInfo, pointer: Point<f64, Logical>) -> bool {
        match self {
            OverviewLayout::Grid(_) => true,
            OverviewLayout::Linear(layout) => layout.should_manage_mouse(monitor, pointer),
        }
    }

    /// Scale to draw the dragged window at, about the pointer.
    pub fn drag_window_scale(
        &self,
        monitor: &MonitorInfo,
        pointer: Point<f64, Logical>,
    ) -> Result<f64, LayoutError> {
        match self {
            OverviewLayout::Grid(layout) => Ok(layout.drag_window_scale()),
            OverviewLayout::Linear(layout) => layout.drag_window_scale(monitor, pointer),
        }
    }

    /// Whether the host should draw `window` on `monitor` while an overview is up.
    pub fn should_render_window<D: Desktop + ?Sized>(
        &self,
        window: &WindowInfo,
        dragged: Option<WindowId>,
        monitor: &MonitorInfo,
        desktop: &D,
    ) -> bool {
        if dragged == Some(window.id) {
            return false;
        }

        let Some(workspace) = desktop.workspace(window.workspace) else {
            return false;
        };

        if let OverviewLayout::Linear(_) = self {
            // The full-size workspace under the strip is drawn as usual.
            if monitor.active_workspace == Some(workspace.id) {
                return true;
            }
        }

        if workspace.monitor != monitor.id {
            return false;
        }

        let slots = match self.build(Stage::Animating, monitor, desktop) {
            Ok(slots) => slots,
            Err(err) => {
                tracing::trace!("cannot place window {}: {err}", window.id);
                return false;
            }
        };

        let mapper = Mapper::new(monitor, &slots);
        let Some(window_box) = mapper.global_window_box(window) else {
            return false;
        };

        crate::utils::intersects(window_box, monitor.logical_box())
    }

    /// Handles a scroll event. Returns `true` if the event was consumed.
    pub fn on_mouse_axis<D: Desktop + ?Sized>(
        &mut self,
        delta: f64,
        monitor: &MonitorInfo,
        pointer: Point<f64, Logical>,
        desktop: &D,
    ) -> bool {
        match self {
            // The whole monitor is overview space.
            OverviewLayout::Grid(_) => true,
            OverviewLayout::Linear(layout) => {
                layout.on_mouse_axis(delta, monitor, pointer, desktop)
            }
        }
    }

    /// Scrolls towards the edge the pointer is close to while dragging.
    ///
    /// Returns the applied scroll in monitor pixels.
    pub fn edge_scroll<D: Desktop + ?Sized>(
        &mut self,
        monitor: &MonitorInfo,
        pointer: Point<f64, Logical>,
        desktop: &D,
    ) -> f64 {
        match self {
            OverviewLayout::Grid(_) => 0.,
            OverviewLayout::Linear(layout) => layout.edge_scroll(monitor, pointer, desktop),
        }
    }

    pub fn are_animations_ongoing(&self) -> bool {
        match self {
            OverviewLayout::Grid(layout) => layout.are_animations_ongoing(),
            OverviewLayout::Linear(layout) => layout.are_animations_ongoing(),
        }
    }

    /// Drops finished animations.
    pub fn settle(&mut self) {
        match self {
            OverviewLayout::Grid(layout) => layout.settle(),
            OverviewLayout::Linear(layout) => layout.settle(),
        }
    }
}

/// Finds the slot next to `from` in the `(dx, dy)` direction.
///
/// With `wrap_around`, moving past an edge continues from the opposite edge.
pub fn neighbor(
    slots: &SlotMap,
    from: WorkspaceId,
    (dx, dy): (i32, i32),
    wrap_around: bool,
) -> Option<WorkspaceId> {
    let from = slots.get(&from)?;

    let (mut x, mut y) = (from.x + dx, from.y + dy);
    if wrap_around {
        let columns = slots.values().map(|slot| slot.x).max()? + 1;
        let rows = slots.values().map(|slot| slot.y).max()? + 1;
        x = x.rem_euclid(columns);
        y = y.rem_euclid(rows);
    }

    slot_at(slots, x, y)
}

/// Finds the workspace occupying the `(x, y)` slot.
pub fn slot_at(slots: &SlotMap, x: i32, y: i32) -> Option<WorkspaceId> {
    slots
        .iter()
        .find(|(_, slot)| slot.x == x && slot.y == y)
        .map(|(id, _)| *id)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
