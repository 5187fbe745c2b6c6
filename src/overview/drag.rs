//! Dragging windows between workspace previews.
//!
//! The host's interactive move works in real workspace coordinates, while the user sees the
//! window inside a zoomed preview. The dragged window is drawn scaled about the pointer by the
//! drag-scale factor, so at drag start its real position is rewritten such that the scaled
//! rendition lands exactly on its preview. At drop time the same relation is inverted through
//! the target workspace's slot.

use smithay::utils::{Logical, Point};
use tracing::{debug, trace};

use super::view::View;
use crate::desktop::{Desktop, MonitorId, WindowId, WorkspaceId};
use crate::layout::{Mapper, OverviewLayout, Stage};
use crate::utils::closest_point;

/// A window move in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub window: WindowId,
    /// Monitor the drag started on.
    pub monitor: MonitorId,
    /// Workspace the window was picked from.
    pub origin: WorkspaceId,
    /// Last workspace slot the pointer was over.
    pub last_hovered: WorkspaceId,
    /// Window position relative to the pointer.
    pub grab_offset: Point<f64, Logical>,
}

/// Position that makes a window drawn at `scale` about `pointer` appear at `visual`.
fn drag_position(
    visual: Point<f64, Logical>,
    pointer: Point<f64, Logical>,
    scale: f64,
) -> Point<f64, Logical> {
    pointer + (visual - pointer).downscale(scale)
}

/// Where a window drawn at `scale` about `pointer` appears.
fn visual_position(
    position: Point<f64, Logical>,
    pointer: Point<f64, Logical>,
    scale: f64,
) -> Point<f64, Logical> {
    pointer + (position - pointer).upscale(scale)
}

impl View {
    /// Picks up the window under the pointer.
    pub fn start_window_drag<D: Desktop + ?Sized>(
        &mut self,
        desktop: &mut D,
    ) -> Option<DragSession> {
        let _span = tracy_client::span!("View::start_window_drag");

        if !self.is_active() || desktop.monitor_under_cursor() != Some(self.monitor()) {
            return None;
        }

        let (monitor, slots) = self.build_slots(desktop)?;
        let mapper = Mapper::new(&monitor, &slots);
        let pointer = desktop.pointer_position();

        let hovered = mapper.workspace_at(pointer)?;
        if !desktop
            .workspace(hovered)
            .is_some_and(|ws| ws.monitor == monitor.id)
        {
            trace!("workspace {hovered} under the pointer is not live");
            return None;
        }

        if monitor.active_workspace != Some(hovered) {
            desktop.change_workspace(monitor.id, hovered, true);
        }

        // The host hit-tests real window geometry, so present it the real pointer position for
        // the grab and put the pointer back where the user sees it right after.
        let real_pointer = mapper.global_to_local_unscaled(pointer, hovered)? + monitor.position;
        desktop.warp_pointer(real_pointer);
        let window = desktop.begin_window_move();
        desktop.warp_pointer(pointer);

        let Some(window) = window else {
            debug!("no window under the pointer in workspace {hovered}");
            if let Some(previous) = monitor.active_workspace {
                if previous != hovered {
                    desktop.change_workspace(monitor.id, previous, true);
                }
            }
            return None;
        };
        self.set_last_interacted(hovered);

        let Some(info) = desktop.window(window) else {
            desktop.end_window_move();
            return None;
        };

        let scale = self.drag_window_scale(pointer, &*desktop);
        let remap = |pos: Point<f64, Logical>| {
            let visual = mapper.local_unscaled_to_global(pos - monitor.position, hovered)?;
            Some(drag_position(visual, pointer, scale))
        };

        if info.is_dragging_tiled {
            // Both ends of the tile-to-floating animation have to play at the preview's size.
            let (Some(current), Some(goal)) = (remap(info.position), remap(info.position_goal))
            else {
                desktop.end_window_move();
                return None;
            };
            desktop.warp_window_position(window, current);
            desktop.set_window_position_goal(window, goal);
        } else {
            let Some(position) = remap(info.position) else {
                desktop.end_window_move();
                return None;
            };
            desktop.warp_window_position(window, position);
            desktop.simulate_pointer_motion();
        }

        let position = desktop.window(window)?.position;
        debug!("dragging window {window} from workspace {hovered}");

        Some(DragSession {
            window,
            monitor: monitor.id,
            origin: hovered,
            last_hovered: hovered,
            grab_offset: position - pointer,
        })
    }

    /// Tracks the hovered slot and scrolls the filmstrip when the pointer nears its edges.
    pub fn on_drag_motion<D: Desktop + ?Sized>(&mut self, drag: &mut DragSession, desktop: &mut D) {
        if desktop.monitor_under_cursor() != Some(self.monitor()) {
            return;
        }

        let Some(monitor) = desktop.monitor(self.monitor()) else {
            return;
        };
        let pointer = desktop.pointer_position();

        if let OverviewLayout::Linear(_) = self.layout {
            let scrolled = self.layout.edge_scroll(&monitor, pointer, &*desktop);
            if scrolled != 0. {
                desktop.warp_window_position(drag.window, pointer + drag.grab_offset);
            }
        }

        let Ok(slots) = self.layout.build(Stage::Animating, &monitor, &*desktop) else {
            return;
        };

        if let Some(hovered) = Mapper::new(&monitor, &slots).workspace_at(pointer) {
            if hovered != drag.last_hovered {
                trace!("dragging over workspace {hovered}");
            }
            drag.last_hovered = hovered;
        }
    }

    /// Drops the window into the workspace under the pointer.
    ///
    /// Always returns `false`: the host still has to finish its own pointer-up handling.
    pub fn end_window_drag<D: Desktop + ?Sized>(
        &mut self,
        drag: DragSession,
        desktop: &mut D,
    ) -> bool {
        let _span = tracy_client::span!("View::end_window_drag");

        let Some((monitor, slots)) = self.build_slots(desktop) else {
            desktop.end_window_move();
            return false;
        };
        let Some(info) = desktop.window(drag.window) else {
            desktop.end_window_move();
            return false;
        };

        let pointer = desktop.pointer_position();
        let scale = self.drag_window_scale(pointer, &*desktop);
        let visual = visual_position(info.position, pointer, scale);

        // Dropping into a gap lands in the last workspace the pointer crossed.
        let mapper = Mapper::new(&monitor, &slots);
        let mut drop_point = pointer;
        if mapper.workspace_at(pointer).is_none() {
            if let Some(rect) = mapper.global_workspace_box(drag.last_hovered) {
                drop_point = closest_point(rect, pointer);
                debug!("dropped outside any workspace, snapping to {}", drag.last_hovered);
                desktop.warp_pointer(drop_point);
            }
        }

        let target = match self.exit_workspace(true, &*desktop) {
            Ok(Some(target)) => target,
            Ok(None) => {
                desktop.end_window_move();
                return false;
            }
            Err(err) => {
                self.report(err, desktop);
                desktop.end_window_move();
                return false;
            }
        };

        if target.create && desktop.create_workspace(target.workspace, monitor.id).is_none() {
            debug!("could not create workspace {}", target.workspace);
            desktop.end_window_move();
            return false;
        }

        desktop.move_window_to_workspace(drag.window, target.workspace);
        desktop.change_workspace(monitor.id, target.workspace, true);

        // Creating a workspace can shift the filmstrip, so map through fresh slots.
        let Some((monitor, slots)) = self.build_slots(desktop) else {
            desktop.end_window_move();
            return false;
        };
        let mapper = Mapper::new(&monitor, &slots);

        if let Some(real) = mapper.global_to_local_unscaled(visual, target.workspace) {
            desktop.warp_window_position(drag.window, real + monitor.position);
        }

        match mapper.global_to_local_unscaled(drop_point, target.workspace) {
            Some(real_pointer) => {
                desktop.warp_pointer(real_pointer + monitor.position);
                desktop.end_window_move();
                desktop.warp_pointer(drop_point);
            }
            None => desktop.end_window_move(),
        }

        debug!(
            "dropped window {} into workspace {} ({:?})",
            drag.window, target.workspace, target.policy
        );
        self.set_last_interacted(target.workspace);
        desktop.focus_window(drag.window);

        false
    }
}
