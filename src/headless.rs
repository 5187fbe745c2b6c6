//! In-memory desktop.
//!
//! Implements the host traits without any compositor behind them. The CLI uses it to preview
//! layouts and the tests drive the overview through it.

use std::collections::{BTreeMap, BTreeSet};

use smithay::utils::{Logical, Physical, Point, Rectangle, Size};
use taskview_config::Color;
use tracing::trace;

use crate::desktop::{
    Desktop, MonitorId, MonitorInfo, RenderHost, WindowId, WindowInfo, WorkspaceId, WorkspaceInfo,
};

/// A draw call recorded by [`HeadlessDesktop`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Background {
        rect: Rectangle<f64, Physical>,
        color: Color,
        blur: bool,
    },
    Border {
        rect: Rectangle<f64, Physical>,
        color: Color,
        width: f64,
    },
    Workspace {
        monitor: MonitorId,
        workspace: Option<WorkspaceId>,
        geometry: Rectangle<f64, Physical>,
        /// The monitor's active workspace pointer at the time of the call.
        active: Option<WorkspaceId>,
    },
    Window {
        window: WindowId,
        monitor: MonitorId,
        rect: Rectangle<f64, Logical>,
    },
}

#[derive(Debug, Default)]
pub struct HeadlessDesktop {
    monitors: BTreeMap<MonitorId, MonitorInfo>,
    workspaces: BTreeMap<WorkspaceId, WorkspaceInfo>,
    windows: BTreeMap<WindowId, WindowInfo>,
    visible: BTreeSet<WorkspaceId>,
    pointer: Point<f64, Logical>,
    focused: Option<WindowId>,
    dragged: Option<WindowId>,
    next_monitor_id: u64,
    next_window_id: u64,
    simulated_motions: usize,
    render_calls: Vec<RenderCall>,
    notifications: Vec<String>,
}

impl HeadlessDesktop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_monitor(
        &mut self,
        name: &str,
        position: impl Into<Point<f64, Logical>>,
        size: impl Into<Size<f64, Physical>>,
        scale: f64,
    ) -> MonitorId {
        self.next_monitor_id += 1;
        let id = MonitorId(self.next_monitor_id);
        self.monitors.insert(
            id,
            MonitorInfo {
                id,
                name: name.to_owned(),
                position: position.into(),
                size: size.into(),
                scale,
                active_workspace: None,
            },
        );
        id
    }

    pub fn remove_monitor(&mut self, id: MonitorId) {
        self.monitors.remove(&id);

        let orphans: Vec<_> = self
            .workspaces
            .values()
            .filter(|ws| ws.monitor == id)
            .map(|ws| ws.id)
            .collect();
        for ws in orphans {
            self.remove_workspace(ws);
        }
    }

    pub fn resize_monitor(&mut self, id: MonitorId, size: impl Into<Size<f64, Physical>>) {
        if let Some(monitor) = self.monitors.get_mut(&id) {
            monitor.size = size.into();
        }
    }

    /// Adds a workspace; it becomes active if the monitor had none.
    pub fn add_workspace(&mut self, id: WorkspaceId, monitor: MonitorId) -> Option<WorkspaceInfo> {
        let mon = self.monitors.get_mut(&monitor)?;
        if mon.active_workspace.is_none() {
            mon.active_workspace = Some(id);
            self.visible.insert(id);
        }

        let info = WorkspaceInfo { id, monitor };
        self.workspaces.insert(id, info);
        Some(info)
    }

    /// Destroys the workspace and every window on it.
    pub fn remove_workspace(&mut self, id: WorkspaceId) {
        self.workspaces.remove(&id);
        self.visible.remove(&id);
        self.windows.retain(|_, window| window.workspace != id);

        for monitor in self.monitors.values_mut() {
            if monitor.active_workspace == Some(id) {
                monitor.active_workspace = None;
            }
        }

        if self.focused.is_some_and(|w| !self.windows.contains_key(&w)) {
            self.focused = None;
        }
        if self.dragged.is_some_and(|w| !self.windows.contains_key(&w)) {
            self.dragged = None;
        }
    }

    pub fn add_window(
        &mut self,
        workspace: WorkspaceId,
        geometry: Rectangle<f64, Logical>,
        is_floating: bool,
    ) -> Option<WindowId> {
        self.workspaces.get(&workspace)?;

        self.next_window_id += 1;
        let id = WindowId(self.next_window_id);
        self.windows.insert(
            id,
            WindowInfo {
                id,
                workspace,
                position: geometry.loc,
                position_goal: geometry.loc,
                size: geometry.size,
                is_floating,
                is_dragging_tiled: false,
            },
        );
        Some(id)
    }

    pub fn remove_window(&mut self, id: WindowId) {
        self.windows.remove(&id);
        if self.focused == Some(id) {
            self.focused = None;
        }
        if self.dragged == Some(id) {
            self.dragged = None;
        }
    }

    /// Moves the pointer like a physical motion event would, dragging the grabbed window along.
    pub fn move_pointer(&mut self, position: impl Into<Point<f64, Logical>>) {
        let position = position.into();
        let delta = position - self.pointer;
        self.pointer = position;

        if let Some(window) = self.dragged.and_then(|id| self.windows.get_mut(&id)) {
            window.position += delta;
            window.position_goal += delta;
        }
    }

    /// Completes every window position animation.
    pub fn finish_window_animations(&mut self) {
        for window in self.windows.values_mut() {
            window.position = window.position_goal;
        }
    }

    pub fn is_visible(&self, workspace: WorkspaceId) -> bool {
        self.visible.contains(&workspace)
    }

    pub fn simulated_motions(&self) -> usize {
        self.simulated_motions
    }

    pub fn render_calls(&self) -> &[RenderCall] {
        &self.render_calls
    }

    pub fn take_render_calls(&mut self) -> Vec<RenderCall> {
        std::mem::take(&mut self.render_calls)
    }

    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    fn window_at(&self, pos: Point<f64, Logical>) -> Option<WindowId> {
        let monitor = self.monitor_under_cursor()?;
        let active = self.monitors.get(&monitor)?.active_workspace?;

        self.windows
            .values()
            .filter(|window| window.workspace == active && Some(window.id) != self.dragged)
            .filter(|window| window.geometry().contains(pos))
            .map(|window| window.id)
            .next_back()
    }
}

impl Desktop for HeadlessDesktop {
    fn monitors(&self) -> Vec<MonitorId> {
        self.monitors.keys().copied().collect()
    }

    fn monitor(&self, id: MonitorId) -> Option<MonitorInfo> {
        self.monitors.get(&id).cloned()
    }

    fn monitor_under_cursor(&self) -> Option<MonitorId> {
        self.monitors
            .values()
            .find(|monitor| monitor.logical_box().contains(self.pointer))
            .map(|monitor| monitor.id)
    }

    fn workspace(&self, id: WorkspaceId) -> Option<WorkspaceInfo> {
        self.workspaces.get(&id).copied()
    }

    fn workspaces(&self) -> Vec<WorkspaceInfo> {
        self.workspaces.values().copied().collect()
    }

    fn create_workspace(&mut self, id: WorkspaceId, monitor: MonitorId) -> Option<WorkspaceInfo> {
        if let Some(existing) = self.workspaces.get(&id) {
            return Some(*existing);
        }

        trace!("creating workspace {id} on monitor {monitor}");
        self.add_workspace(id, monitor)
    }

    fn change_workspace(&mut self, monitor: MonitorId, workspace: WorkspaceId, internal: bool) {
        if !self.workspaces.contains_key(&workspace) {
            return;
        }
        let Some(mon) = self.monitors.get_mut(&monitor) else {
            return;
        };

        trace!("monitor {monitor}: switching to workspace {workspace} (internal: {internal})");
        if let Some(old) = mon.active_workspace.replace(workspace) {
            self.visible.remove(&old);
        }
        self.visible.insert(workspace);
    }

    fn window(&self, id: WindowId) -> Option<WindowInfo> {
        self.windows.get(&id).copied()
    }

    fn workspace_windows(&self, workspace: WorkspaceId) -> Vec<WindowInfo> {
        self.windows
            .values()
            .filter(|window| window.workspace == workspace)
            .copied()
            .collect()
    }

    fn window_under_cursor(&self) -> Option<WindowId> {
        self.window_at(self.pointer)
    }

    fn focused_window(&self) -> Option<WindowId> {
        self.focused
    }

    fn focus_window(&mut self, window: WindowId) {
        if self.windows.contains_key(&window) {
            self.focused = Some(window);
        }
    }

    fn move_window_to_workspace(&mut self, window: WindowId, workspace: WorkspaceId) {
        if !self.workspaces.contains_key(&workspace) {
            return;
        }
        if let Some(window) = self.windows.get_mut(&window) {
            window.workspace = workspace;
        }
    }

    fn warp_window_position(&mut self, window: WindowId, position: Point<f64, Logical>) {
        if let Some(window) = self.windows.get_mut(&window) {
            window.position = position;
            window.position_goal = position;
        }
    }

    fn set_window_position_goal(&mut self, window: WindowId, goal: Point<f64, Logical>) {
        if let Some(window) = self.windows.get_mut(&window) {
            window.position_goal = goal;
        }
    }

    fn pointer_position(&self) -> Point<f64, Logical> {
        self.pointer
    }

    fn warp_pointer(&mut self, position: Point<f64, Logical>) {
        self.pointer = position;
    }

    fn begin_window_move(&mut self) -> Option<WindowId> {
        let id = self.window_under_cursor()?;
        let window = self.windows.get_mut(&id)?;

        if !window.is_floating {
            window.is_dragging_tiled = true;
            window.is_floating = true;
        }

        self.dragged = Some(id);
        Some(id)
    }

    fn end_window_move(&mut self) {
        let Some(id) = self.dragged.take() else {
            return;
        };

        if let Some(window) = self.windows.get_mut(&id) {
            if window.is_dragging_tiled {
                window.is_dragging_tiled = false;
                window.is_floating = false;
            }
        }
    }

    fn dragged_window(&self) -> Option<WindowId> {
        self.dragged
    }

    fn simulate_pointer_motion(&mut self) {
        self.simulated_motions += 1;
    }

    fn notify_error(&mut self, message: &str) {
        self.notifications.push(message.to_owned());
    }
}

impl RenderHost for HeadlessDesktop {
    fn set_active_workspace_pointer(&mut self, monitor: MonitorId, workspace: Option<WorkspaceId>) {
        if let Some(mon) = self.monitors.get_mut(&monitor) {
            mon.active_workspace = workspace;
        }
    }

    fn set_workspace_visible(&mut self, workspace: WorkspaceId, visible: bool) {
        if visible {
            self.visible.insert(workspace);
        } else {
            self.visible.remove(&workspace);
        }
    }

    fn render_background(&mut self, rect: Rectangle<f64, Physical>, color: Color, blur: bool) {
        self.render_calls
            .push(RenderCall::Background { rect, color, blur });
    }

    fn render_border(&mut self, rect: Rectangle<f64, Physical>, color: Color, width: f64) {
        self.render_calls
            .push(RenderCall::Border { rect, color, width });
    }

    fn render_workspace(
        &mut self,
        monitor: MonitorId,
        workspace: Option<WorkspaceId>,
        geometry: Rectangle<f64, Physical>,
    ) {
        let active = self
            .monitors
            .get(&monitor)
            .and_then(|mon| mon.active_workspace);
        self.render_calls.push(RenderCall::Workspace {
            monitor,
            workspace,
            geometry,
            active,
        });
    }

    fn render_window_at(
        &mut self,
        window: WindowId,
        monitor: MonitorId,
        rect: Rectangle<f64, Logical>,
    ) {
        self.render_calls.push(RenderCall::Window {
            window,
            monitor,
            rect,
        });
    }
}
