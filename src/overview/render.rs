use std::ops::{Deref, DerefMut};

use tracing::trace;

use super::drag::DragSession;
use super::view::View;
use crate::desktop::{Desktop, MonitorId, MonitorInfo, RenderHost, WorkspaceId};
use crate::layout::{Options, OverviewLayout, Slot, Stage};
use crate::utils::{expand, intersects, scale_about};

/// Repoints a monitor's active workspace for the duration of a render pass.
///
/// The host renders "the active workspace" of a monitor, so every slot temporarily becomes the
/// active one. Dropping the guard puts the original workspace back and hides every workspace
/// that was only made visible for its preview.
pub struct ActiveWorkspaceGuard<'a, H: RenderHost + ?Sized> {
    host: &'a mut H,
    monitor: MonitorId,
    saved: Option<WorkspaceId>,
    shown: Vec<WorkspaceId>,
}

impl<'a, H: RenderHost + ?Sized> ActiveWorkspaceGuard<'a, H> {
    pub fn new(host: &'a mut H, monitor: MonitorId) -> Self {
        let saved = host
            .monitor(monitor)
            .and_then(|monitor| monitor.active_workspace);

        Self {
            host,
            monitor,
            saved,
            shown: Vec::new(),
        }
    }

    /// The monitor's real active workspace.
    pub fn saved(&self) -> Option<WorkspaceId> {
        self.saved
    }

    pub fn point_at(&mut self, workspace: Option<WorkspaceId>) {
        self.host.set_active_workspace_pointer(self.monitor, workspace);

        if let Some(workspace) = workspace {
            self.host.set_workspace_visible(workspace, true);
            if !self.shown.contains(&workspace) {
                self.shown.push(workspace);
            }
        }
    }
}

impl<H: RenderHost + ?Sized> Drop for ActiveWorkspaceGuard<'_, H> {
    fn drop(&mut self) {
        for workspace in self.shown.drain(..) {
            if Some(workspace) != self.saved {
                self.host.set_workspace_visible(workspace, false);
            }
        }

        self.host.set_active_workspace_pointer(self.monitor, self.saved);
        if let Some(saved) = self.saved {
            self.host.set_workspace_visible(saved, true);
        }
    }
}

impl<H: RenderHost + ?Sized> Deref for ActiveWorkspaceGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: RenderHost + ?Sized> DerefMut for ActiveWorkspaceGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

fn render_slot<H: RenderHost + ?Sized>(
    guard: &mut ActiveWorkspaceGuard<'_, H>,
    monitor: &MonitorInfo,
    options: &Options,
    id: WorkspaceId,
    slot: &Slot,
) {
    let overview = &options.overview;
    let border = overview.border_size.0 * monitor.scale;
    let bordered = expand(slot.rect, border);

    if !intersects(bordered, monitor.pixel_box()) {
        trace!("workspace {id} is off screen");
        return;
    }

    if border > 0. {
        let color = if guard.saved() == Some(id) {
            overview.active_border_color
        } else {
            overview.inactive_border_color
        };
        guard.render_border(bordered, color, border);
    }

    // Empty slots and workspaces of other monitors only get the monitor's layer surfaces.
    let live = guard
        .workspace(id)
        .is_some_and(|ws| ws.monitor == monitor.id);
    let workspace = live.then_some(id);

    guard.point_at(workspace);
    guard.render_workspace(monitor.id, workspace, slot.rect);
}

impl View {
    /// Issues the draw calls of one frame of this monitor.
    ///
    /// Does nothing while closed: the host renders the monitor as usual.
    pub fn render<H: RenderHost + ?Sized>(&mut self, host: &mut H, drag: Option<&DragSession>) {
        let _span = tracy_client::span!("View::render");

        if !self.is_visible() {
            return;
        }

        let Some(monitor) = host.monitor(self.monitor()) else {
            return;
        };

        let slots = match self.layout.build(Stage::Animating, &monitor, &*host) {
            Ok(slots) => slots,
            Err(err) => {
                self.report(err, host);
                return;
            }
        };

        let options = self.layout.options().clone();
        let overview = &options.overview;
        let mut guard = ActiveWorkspaceGuard::new(host, monitor.id);
        let start = guard.saved();

        match &self.layout {
            OverviewLayout::Grid(_) => {
                guard.render_background(monitor.pixel_box(), overview.background_color, false);

                for (id, slot) in &slots {
                    if Some(*id) != start {
                        render_slot(&mut guard, &monitor, &options, *id, slot);
                    }
                }

                // Last, so that a window dropped into it is drawn above its neighbors.
                if let Some((id, slot)) = start.and_then(|id| slots.get_key_value(&id)) {
                    render_slot(&mut guard, &monitor, &options, *id, slot);
                }
            }
            OverviewLayout::Linear(layout) => {
                guard.point_at(start);
                guard.render_workspace(monitor.id, start, monitor.pixel_box());

                if let Ok(band) = layout.band_rect(&monitor) {
                    guard.render_background(band, overview.background_color, overview.linear.blur);
                }

                for (id, slot) in &slots {
                    render_slot(&mut guard, &monitor, &options, *id, slot);
                }
            }
        }

        let Some(drag) = drag else {
            return;
        };
        if guard.monitor_under_cursor() != Some(monitor.id) {
            return;
        }
        let Some(window) = guard.window(drag.window) else {
            return;
        };

        let pointer = guard.pointer_position();
        let scale = self.drag_window_scale(pointer, &*guard);
        let rect = scale_about(window.geometry(), pointer, scale);
        guard.render_window_at(window.id, monitor.id, rect);
    }
}
