use smithay::utils::{Logical, Physical, Point, Rectangle};

use super::SlotMap;
use crate::desktop::{MonitorInfo, WindowInfo, WorkspaceId};
use crate::utils::is_empty;

/// Converts points between the global space and the space of one workspace inside the overview.
///
/// "Local" coordinates are relative to the monitor's top-left corner, in the units the
/// workspace's own windows use when the workspace covers the whole monitor. "Unscaled" variants
/// work in logical units, "scaled" variants in physical pixels.
///
/// All conversions return `None` when the workspace has no slot, or its slot has no area.
#[derive(Debug, Clone, Copy)]
pub struct Mapper<'a> {
    monitor: &'a MonitorInfo,
    slots: &'a SlotMap,
}

impl<'a> Mapper<'a> {
    pub fn new(monitor: &'a MonitorInfo, slots: &'a SlotMap) -> Self {
        Self { monitor, slots }
    }

    /// The workspace's slot in monitor pixels.
    pub fn workspace_rect(&self, workspace: WorkspaceId) -> Option<Rectangle<f64, Physical>> {
        let rect = self.slots.get(&workspace)?.rect;
        if is_empty(rect) || self.monitor.size.w <= 0. {
            return None;
        }
        Some(rect)
    }

    /// How much the workspace is shrunk inside its slot.
    pub fn zoom(&self, workspace: WorkspaceId) -> Option<f64> {
        let rect = self.workspace_rect(workspace)?;
        Some(rect.size.w / self.monitor.size.w)
    }

    pub fn global_to_local_unscaled(
        &self,
        pos: Point<f64, Logical>,
        workspace: WorkspaceId,
    ) -> Option<Point<f64, Logical>> {
        let rect = self.workspace_rect(workspace)?;
        let zoom = rect.size.w / self.monitor.size.w;
        let scale = self.monitor.scale;

        let pos = (pos - self.monitor.position).to_physical(scale) - rect.loc;
        Some(pos.to_logical(scale).downscale(zoom))
    }

    pub fn local_unscaled_to_global(
        &self,
        pos: Point<f64, Logical>,
        workspace: WorkspaceId,
    ) -> Option<Point<f64, Logical>> {
        let rect = self.workspace_rect(workspace)?;
        let zoom = rect.size.w / self.monitor.size.w;
        let scale = self.monitor.scale;

        let pos = pos.upscale(zoom).to_physical(scale) + rect.loc;
        Some(pos.to_logical(scale) + self.monitor.position)
    }

    pub fn global_to_local_scaled(
        &self,
        pos: Point<f64, Logical>,
        workspace: WorkspaceId,
    ) -> Option<Point<f64, Physical>> {
        let pos = self.global_to_local_unscaled(pos, workspace)?;
        Some(pos.to_physical(self.monitor.scale))
    }

    pub fn local_scaled_to_global(
        &self,
        pos: Point<f64, Physical>,
        workspace: WorkspaceId,
    ) -> Option<Point<f64, Logical>> {
        self.local_unscaled_to_global(pos.to_logical(self.monitor.scale), workspace)
    }

    /// The workspace under a global point, if any.
    ///
    /// Gaps, margins and points outside the monitor resolve to `None`.
    pub fn workspace_at(&self, pos: Point<f64, Logical>) -> Option<WorkspaceId> {
        if !self.monitor.logical_box().contains(pos) {
            return None;
        }

        let pos = (pos - self.monitor.position).to_physical(self.monitor.scale);
        self.slots
            .iter()
            .find(|(_, slot)| slot.rect.contains(pos))
            .map(|(id, _)| *id)
    }

    /// The workspace's slot in the global logical space.
    pub fn global_workspace_box(&self, workspace: WorkspaceId) -> Option<Rectangle<f64, Logical>> {
        let rect = self.workspace_rect(workspace)?;
        let scale = self.monitor.scale;
        Some(Rectangle::new(
            rect.loc.to_logical(scale) + self.monitor.position,
            rect.size.to_logical(scale),
        ))
    }

    /// Where the window currently shows up inside its workspace's slot, in the global space.
    ///
    /// The window's workspace must be on this mapper's monitor.
    pub fn global_window_box(&self, window: &WindowInfo) -> Option<Rectangle<f64, Logical>> {
        let geo = window.geometry();
        let top_left = geo.loc - self.monitor.position;
        let bottom_right = top_left + geo.size.to_point();

        let top_left = self.local_unscaled_to_global(top_left, window.workspace)?;
        let bottom_right = self.local_unscaled_to_global(bottom_right, window.workspace)?;
        Some(Rectangle::new(
            top_left,
            (bottom_right - top_left).to_size(),
        ))
    }
}
