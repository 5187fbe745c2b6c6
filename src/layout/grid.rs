use std::rc::Rc;

use smithay::utils::{Physical, Point, Rectangle};
use tracing::debug;

use super::animated_value::{AnimatedPoint, AnimatedValue};
use super::{lerp, LayoutError, Options, Slot, SlotMap, Stage};
use crate::animation::Clock;
use crate::desktop::{Desktop, MonitorInfo, WorkspaceId};

/// Rows × columns matrix of workspaces.
///
/// The opened grid shows every cell at once. Closing zooms into the active cell until it covers
/// the monitor.
#[derive(Debug)]
pub struct GridLayout {
    /// Size of a cell relative to the monitor.
    scale: AnimatedValue,
    /// Translation applied to every cell, in monitor pixels.
    offset: AnimatedPoint,
    clock: Clock,
    pub(super) options: Rc<Options>,
}

/// Cell geometry shared by every stage.
#[derive(Debug, Clone, Copy)]
struct Cells {
    rows: i32,
    columns: i32,
    gap: f64,
    /// Letterbox or pillarbox padding that keeps cells at the monitor's aspect ratio.
    start: Point<f64, Physical>,
    opened_scale: f64,
}

impl Cells {
    fn count(&self) -> i64 {
        i64::from(self.rows) * i64::from(self.columns)
    }
}

impl GridLayout {
    pub fn new(clock: Clock, options: Rc<Options>) -> Self {
        Self {
            scale: AnimatedValue::new(1.),
            offset: AnimatedPoint::new(0., 0.),
            clock,
            options,
        }
    }

    pub fn scale(&self) -> &AnimatedValue {
        &self.scale
    }

    pub fn offset(&self) -> &AnimatedPoint {
        &self.offset
    }

    fn cells(&self, monitor: &MonitorInfo) -> Result<Cells, LayoutError> {
        let grid = self.options.overview.grid;
        let rows = i32::from(grid.rows);
        let columns = i32::from(grid.columns);

        let width = monitor.size.w;
        let height = monitor.size.h;
        let gap = self.options.overview.gap_size.0 * monitor.scale;

        if gap < 0. || gap > width.min(height) {
            return Err(LayoutError::InvalidGapSize { gap, width, height });
        }

        if rows == 0 || columns == 0 {
            return Err(LayoutError::NonPositiveCell {
                width: 0.,
                height: 0.,
            });
        }

        let rows_f = f64::from(rows);
        let columns_f = f64::from(columns);

        let mut cell_w = (width - gap * (columns_f + 1.)) / columns_f;
        let mut cell_h = (height - gap * (rows_f + 1.)) / rows_f;
        if cell_w <= 0. || cell_h <= 0. {
            return Err(LayoutError::NonPositiveCell {
                width: cell_w,
                height: cell_h,
            });
        }

        // Shrink one axis so that cells keep the monitor's aspect ratio, and center the grid
        // along that axis.
        let aspect = width / height;
        let mut start = Point::from((0., 0.));
        if cell_h * aspect > cell_w {
            start.y = (cell_h - cell_w / aspect) * rows_f / 2.;
            cell_h = cell_w / aspect;
        } else if cell_w / aspect > cell_h {
            start.x = (cell_w - cell_h * aspect) * columns_f / 2.;
            cell_w = cell_h * aspect;
        }

        Ok(Cells {
            rows,
            columns,
            gap,
            start,
            opened_scale: cell_w / width,
        })
    }

    fn slot_rect(
        &self,
        x: i32,
        y: i32,
        stage: Stage,
        monitor: &MonitorInfo,
        cells: &Cells,
    ) -> Rectangle<f64, Physical> {
        let (scale, offset) = match stage {
            Stage::Closed => (1., Point::from((0., 0.))),
            Stage::Opened => (cells.opened_scale, Point::from((0., 0.))),
            Stage::Animating => (self.scale.current(), self.offset.current()),
        };

        let size = monitor.size.upscale(scale);
        let loc = Point::from((
            f64::from(x) * (size.w + cells.gap) + cells.gap,
            f64::from(y) * (size.h + cells.gap) + cells.gap,
        ));
        Rectangle::new(loc + offset + cells.start, size)
    }

    /// Id of the workspace before the monitor's first cell.
    ///
    /// Every monitor owns a block of `rows * columns` ids, in the order of the monitor ids: the
    /// first monitor gets 1 to 9 on a 3×3 grid, the second one 10 to 18, and so on.
    fn id_base<D: Desktop + ?Sized>(cells: &Cells, monitor: &MonitorInfo, desktop: &D) -> i64 {
        let mut monitors = desktop.monitors();
        monitors.sort_unstable();
        let index = monitors.iter().position(|id| *id == monitor.id).unwrap_or(0);
        i64::try_from(index).unwrap_or(0) * cells.count()
    }

    pub fn build<D: Desktop + ?Sized>(
        &self,
        stage: Stage,
        monitor: &MonitorInfo,
        desktop: &D,
    ) -> Result<SlotMap, LayoutError> {
        let cells = self.cells(monitor)?;
        let base = Self::id_base(&cells, monitor, desktop);

        let mut slots = SlotMap::new();
        for y in 0..cells.rows {
            for x in 0..cells.columns {
                let id = WorkspaceId(base + i64::from(y * cells.columns + x + 1));
                let rect = self.slot_rect(x, y, stage, monitor, &cells);
                slots.insert(id, Slot { x, y, rect });
            }
        }

        Ok(slots)
    }

    /// Cell coordinates of a workspace id, if it belongs to the grid.
    fn position_of(cells: &Cells, base: i64, id: WorkspaceId) -> Option<(i32, i32)> {
        let idx = id.0.checked_sub(base + 1)?;
        if !(0..cells.count()).contains(&idx) {
            return None;
        }

        let idx = i32::try_from(idx).ok()?;
        Some((idx % cells.columns, idx / cells.columns))
    }

    /// Offset that puts the workspace's closed cell at the monitor origin.
    fn closed_offset<D: Desktop + ?Sized>(
        &self,
        id: Option<WorkspaceId>,
        monitor: &MonitorInfo,
        cells: &Cells,
        desktop: &D,
    ) -> Point<f64, Physical> {
        let base = Self::id_base(cells, monitor, desktop);
        let (x, y) = match id.and_then(|id| Self::position_of(cells, base, id)) {
            Some(pos) => pos,
            None => {
                debug!(
                    "workspace {id:?} is outside the grid on monitor {}, using the first cell",
                    monitor.name
                );
                (0, 0)
            }
        };

        let rect = self.slot_rect(x, y, Stage::Closed, monitor, cells);
        Point::from((-rect.loc.x, -rect.loc.y))
    }

    pub fn on_show(&mut self, monitor: &MonitorInfo) -> Result<(), LayoutError> {
        let cells = self.cells(monitor)?;
        let config = self.options.overview_animation();
        self.scale.animate_to(cells.opened_scale, &self.clock, config);
        self.offset.animate_to(Point::from((0., 0.)), &self.clock, config);
        Ok(())
    }

    pub fn on_hide<D: Desktop + ?Sized>(
        &mut self,
        monitor: &MonitorInfo,
        desktop: &D,
    ) -> Result<(), LayoutError> {
        let cells = self.cells(monitor)?;
        let offset = self.closed_offset(monitor.active_workspace, monitor, &cells, desktop);
        let config = self.options.overview_animation();
        self.scale.animate_to(1., &self.clock, config);
        self.offset.animate_to(offset, &self.clock, config);
        Ok(())
    }

    pub fn on_move<D: Desktop + ?Sized>(
        &mut self,
        old: WorkspaceId,
        new: WorkspaceId,
        view_active: bool,
        monitor: &MonitorInfo,
        desktop: &D,
    ) -> Result<(), LayoutError> {
        // The opened grid already shows every workspace.
        if view_active {
            return Ok(());
        }

        let cells = self.cells(monitor)?;
        debug!("sliding grid from workspace {old} to {new}");

        let offset = self.closed_offset(Some(new), monitor, &cells, desktop);
        let config = self.options.overview_animation();
        self.scale.animate_to(1., &self.clock, config);
        self.offset.animate_to(offset, &self.clock, config);
        Ok(())
    }

    pub fn init_position<D: Desktop + ?Sized>(
        &mut self,
        monitor: &MonitorInfo,
        desktop: &D,
    ) -> Result<(), LayoutError> {
        let cells = self.cells(monitor)?;
        let offset = self.closed_offset(monitor.active_workspace, monitor, &cells, desktop);
        self.offset.warp(offset);
        self.scale.warp(1.);
        Ok(())
    }

    pub fn set_progress<D: Desktop + ?Sized>(
        &mut self,
        progress: f64,
        monitor: &MonitorInfo,
        desktop: &D,
    ) -> Result<(), LayoutError> {
        let cells = self.cells(monitor)?;
        let closed = self.closed_offset(monitor.active_workspace, monitor, &cells, desktop);

        self.scale.warp(lerp(1., cells.opened_scale, progress));
        self.offset.warp(Point::from((
            lerp(closed.x, 0., progress),
            lerp(closed.y, 0., progress),
        )));
        Ok(())
    }

    pub fn progress(&self, monitor: &MonitorInfo) -> Result<f64, LayoutError> {
        let cells = self.cells(monitor)?;
        let range = 1. - cells.opened_scale;
        if range.abs() < 1e-9 {
            // A single gapless cell: opened and closed look the same.
            return Ok(if self.offset.current() == Point::from((0., 0.)) {
                1.
            } else {
                0.
            });
        }

        Ok(((1. - self.scale.current()) / range).clamp(0., 1.))
    }

    pub fn drag_window_scale(&self) -> f64 {
        self.scale.current()
    }

    pub fn are_animations_ongoing(&self) -> bool {
        self.scale.is_animation_ongoing() || self.offset.is_animation_ongoing()
    }

    pub fn settle(&mut self) {
        self.scale.settle();
        self.offset.settle();
    }
}
