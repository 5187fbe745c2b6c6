//! Interface to the host compositor.
//!
//! The overview never owns monitors, workspaces or windows. It refers to them by id and resolves
//! them through [`Desktop`] every time it needs them, since the host may destroy any of them
//! between two calls.

use std::fmt;

use smithay::utils::{Logical, Physical, Point, Rectangle, Size};
use taskview_config::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonitorId(pub u64);

/// Workspace id as the host knows it.
///
/// Ids of live workspaces are positive. An id may also name a slot that has no live workspace
/// yet; the host creates it on demand through [`Desktop::create_workspace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkspaceId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u64);

impl fmt::Display for MonitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonitorInfo {
    pub id: MonitorId,
    pub name: String,
    /// Top-left corner in the global logical space.
    pub position: Point<f64, Logical>,
    /// Size in physical pixels, after the output transform.
    pub size: Size<f64, Physical>,
    pub scale: f64,
    pub active_workspace: Option<WorkspaceId>,
}

impl MonitorInfo {
    /// The monitor's area in the global logical space.
    pub fn logical_box(&self) -> Rectangle<f64, Logical> {
        Rectangle::new(self.position, self.size.to_logical(self.scale))
    }

    /// The monitor's area in its own pixel space, with the origin at the top-left corner.
    pub fn pixel_box(&self) -> Rectangle<f64, Physical> {
        Rectangle::from_size(self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkspaceInfo {
    pub id: WorkspaceId,
    pub monitor: MonitorId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowInfo {
    pub id: WindowId,
    pub workspace: WorkspaceId,
    /// Current (possibly animating) position in the global logical space.
    pub position: Point<f64, Logical>,
    /// Where the position animation is heading.
    pub position_goal: Point<f64, Logical>,
    pub size: Size<f64, Logical>,
    pub is_floating: bool,
    /// Whether the window is being dragged out of the tiling layout.
    pub is_dragging_tiled: bool,
}

impl WindowInfo {
    pub fn geometry(&self) -> Rectangle<f64, Logical> {
        Rectangle::new(self.position, self.size)
    }
}

/// Window system operations the overview relies on.
///
/// Lookups return `None` when the object is gone; callers treat that as "do nothing".
pub trait Desktop {
    fn monitors(&self) -> Vec<MonitorId>;
    fn monitor(&self, id: MonitorId) -> Option<MonitorInfo>;
    fn monitor_under_cursor(&self) -> Option<MonitorId>;

    fn workspace(&self, id: WorkspaceId) -> Option<WorkspaceInfo>;
    fn workspaces(&self) -> Vec<WorkspaceInfo>;
    /// Creates a workspace with the given id on the monitor.
    fn create_workspace(&mut self, id: WorkspaceId, monitor: MonitorId) -> Option<WorkspaceInfo>;
    /// Makes the workspace active on the monitor.
    ///
    /// `internal` switches skip the host's own workspace switch animation and history.
    fn change_workspace(&mut self, monitor: MonitorId, workspace: WorkspaceId, internal: bool);

    fn window(&self, id: WindowId) -> Option<WindowInfo>;
    /// Windows of the workspace, bottom-most first.
    fn workspace_windows(&self, workspace: WorkspaceId) -> Vec<WindowInfo>;
    fn window_under_cursor(&self) -> Option<WindowId>;
    fn focused_window(&self) -> Option<WindowId>;
    fn focus_window(&mut self, window: WindowId);
    fn move_window_to_workspace(&mut self, window: WindowId, workspace: WorkspaceId);
    /// Sets the window position, skipping any animation.
    fn warp_window_position(&mut self, window: WindowId, position: Point<f64, Logical>);
    /// Animates the window position towards the goal.
    fn set_window_position_goal(&mut self, window: WindowId, goal: Point<f64, Logical>);

    fn pointer_position(&self) -> Point<f64, Logical>;
    fn warp_pointer(&mut self, position: Point<f64, Logical>);
    /// Starts the host's interactive move for the window under the pointer.
    fn begin_window_move(&mut self) -> Option<WindowId>;
    fn end_window_move(&mut self);
    fn dragged_window(&self) -> Option<WindowId>;
    fn simulate_pointer_motion(&mut self);

    /// Shows an error to the user.
    fn notify_error(&mut self, message: &str);
}

/// Drawing operations used by the overview's render pass.
///
/// All rectangles are in the pixel space of the monitor being rendered unless noted otherwise.
pub trait RenderHost: Desktop {
    /// Temporarily repoints the monitor's active workspace without switching to it.
    fn set_active_workspace_pointer(&mut self, monitor: MonitorId, workspace: Option<WorkspaceId>);
    fn set_workspace_visible(&mut self, workspace: WorkspaceId, visible: bool);

    fn render_background(&mut self, rect: Rectangle<f64, Physical>, color: Color, blur: bool);
    fn render_border(&mut self, rect: Rectangle<f64, Physical>, color: Color, width: f64);
    /// Renders a workspace (or only the monitor's layer surfaces for `None`) into `geometry`.
    fn render_workspace(
        &mut self,
        monitor: MonitorId,
        workspace: Option<WorkspaceId>,
        geometry: Rectangle<f64, Physical>,
    );
    /// Renders a window into a rectangle in the global logical space.
    fn render_window_at(
        &mut self,
        window: WindowId,
        monitor: MonitorId,
        rect: Rectangle<f64, Logical>,
    );
}
