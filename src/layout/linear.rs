use std::collections::BTreeSet;
use std::rc::Rc;

use smithay::utils::{Logical, Physical, Point, Rectangle, Size};

use super::animated_value::AnimatedValue;
use super::{lerp, LayoutError, Options, Slot, SlotMap, Stage};
use crate::animation::Clock;
use crate::desktop::{Desktop, MonitorInfo, WorkspaceId};

/// How far a single pointer motion at the very edge of the strip scrolls it, in logical pixels.
const EDGE_SCROLL_STEP: f64 = 24.;

/// Filmstrip of the monitor's workspaces along the bottom edge.
///
/// The strip slides up over the live workspace when shown, so the workspace above it stays fully
/// interactive.
#[derive(Debug)]
pub struct LinearLayout {
    /// Horizontal pan of the strip, in monitor pixels.
    scroll: AnimatedValue,
    /// How much of the strip is revealed, from 0 (hidden) to the strip height.
    view_offset: AnimatedValue,
    clock: Clock,
    pub(super) options: Rc<Options>,
}

#[derive(Debug, Clone, Copy)]
struct Strip {
    height: f64,
    gap: f64,
    cell: Size<f64, Physical>,
}

impl LinearLayout {
    pub fn new(clock: Clock, options: Rc<Options>) -> Self {
        Self {
            scroll: AnimatedValue::new(0.),
            view_offset: AnimatedValue::new(0.),
            clock,
            options,
        }
    }

    pub fn scroll(&self) -> &AnimatedValue {
        &self.scroll
    }

    pub fn view_offset(&self) -> &AnimatedValue {
        &self.view_offset
    }

    fn strip(&self, monitor: &MonitorInfo) -> Result<Strip, LayoutError> {
        let width = monitor.size.w;
        let monitor_height = monitor.size.h;
        let height = self.options.overview.linear.height.0 * monitor.scale;
        let gap = self.options.overview.gap_size.0 * monitor.scale;

        if height < 0. || height > monitor_height {
            return Err(LayoutError::InvalidHeight {
                height,
                monitor_height,
            });
        }

        if gap < 0. || gap > height / 2. {
            return Err(LayoutError::InvalidGapSize {
                gap,
                width,
                height: monitor_height,
            });
        }

        let cell_h = height - 2. * gap;
        let cell_w = cell_h * width / monitor_height;
        if cell_h <= 0. || cell_w <= 0. {
            return Err(LayoutError::NonPositiveCell {
                width: cell_w,
                height: cell_h,
            });
        }

        Ok(Strip {
            height,
            gap,
            cell: Size::from((cell_w, cell_h)),
        })
    }

    /// Live workspaces of the monitor in id order, followed by a free id for a new workspace.
    fn workspace_ids<D: Desktop + ?Sized>(monitor: &MonitorInfo, desktop: &D) -> Vec<WorkspaceId> {
        let all = desktop.workspaces();

        let mut ids: Vec<_> = all
            .iter()
            .filter(|ws| ws.monitor == monitor.id && ws.id.0 >= 0)
            .map(|ws| ws.id)
            .collect();
        ids.sort_unstable();

        let used: BTreeSet<_> = all.iter().map(|ws| ws.id).collect();
        if let Some(free) = (1..).map(WorkspaceId).find(|id| !used.contains(id)) {
            ids.push(free);
        }

        ids
    }

    fn slot_rect(
        &self,
        x: usize,
        stage: Stage,
        monitor: &MonitorInfo,
        strip: &Strip,
    ) -> Rectangle<f64, Physical> {
        let view_offset = match stage {
            Stage::Closed => 0.,
            Stage::Opened => strip.height,
            Stage::Animating => self.view_offset.current(),
        };

        let loc = Point::from((
            self.scroll.current() + x as f64 * (strip.gap + strip.cell.w) + strip.gap,
            monitor.size.h - view_offset + strip.gap,
        ));
        Rectangle::new(loc, strip.cell)
    }

    pub fn build<D: Desktop + ?Sized>(
        &self,
        stage: Stage,
        monitor: &MonitorInfo,
        desktop: &D,
    ) -> Result<SlotMap, LayoutError> {
        let strip = self.strip(monitor)?;

        let slots = Self::workspace_ids(monitor, desktop)
            .into_iter()
            .enumerate()
            .map(|(x, id)| {
                let rect = self.slot_rect(x, stage, monitor, &strip);
                let x = i32::try_from(x).unwrap_or(i32::MAX);
                (id, Slot { x, y: 0, rect })
            })
            .collect();

        Ok(slots)
    }

    fn band_pixels(&self, monitor: &MonitorInfo, strip: &Strip) -> Rectangle<f64, Physical> {
        Rectangle::new(
            Point::from((0., monitor.size.h - self.view_offset.current())),
            Size::from((monitor.size.w, strip.height)),
        )
    }

    /// The strip area in the global logical space.
    fn band(&self, monitor: &MonitorInfo, strip: &Strip) -> Rectangle<f64, Logical> {
        let band = self.band_pixels(monitor, strip);
        Rectangle::new(
            band.loc.to_logical(monitor.scale) + monitor.position,
            band.size.to_logical(monitor.scale),
        )
    }

    /// The revealed strip in monitor pixels, for drawing its background.
    pub fn band_rect(
        &self,
        monitor: &MonitorInfo,
    ) -> Result<Rectangle<f64, Physical>, LayoutError> {
        let strip = self.strip(monitor)?;
        Ok(self.band_pixels(monitor, &strip))
    }

    fn scroll_range<D: Desktop + ?Sized>(
        monitor: &MonitorInfo,
        strip: &Strip,
        desktop: &D,
    ) -> (f64, f64) {
        let count = Self::workspace_ids(monitor, desktop).len() as f64;
        let total = count * (strip.gap + strip.cell.w) + strip.gap;
        ((monitor.size.w - total).min(0.), 0.)
    }

    pub fn on_show<D: Desktop + ?Sized>(
        &mut self,
        monitor: &MonitorInfo,
        desktop: &D,
    ) -> Result<(), LayoutError> {
        let strip = self.strip(monitor)?;
        let config = self.options.overview_animation();
        self.view_offset.animate_to(strip.height, &self.clock, config);

        if let Some(active) = monitor.active_workspace {
            self.scroll_into_view(active, monitor, desktop)?;
        }

        Ok(())
    }

    pub fn on_hide<D: Desktop + ?Sized>(
        &mut self,
        monitor: &MonitorInfo,
        _desktop: &D,
    ) -> Result<(), LayoutError> {
        self.strip(monitor)?;
        let config = self.options.overview_animation();
        self.view_offset.animate_to(0., &self.clock, config);
        Ok(())
    }

    pub fn on_move<D: Desktop + ?Sized>(
        &mut self,
        new: WorkspaceId,
        monitor: &MonitorInfo,
        desktop: &D,
    ) -> Result<(), LayoutError> {
        self.scroll_into_view(new, monitor, desktop)
    }

    /// Pans the strip so that the workspace's cell is fully visible.
    fn scroll_into_view<D: Desktop + ?Sized>(
        &mut self,
        id: WorkspaceId,
        monitor: &MonitorInfo,
        desktop: &D,
    ) -> Result<(), LayoutError> {
        let strip = self.strip(monitor)?;
        let slots = self.build(Stage::Animating, monitor, desktop)?;
        let Some(slot) = slots.get(&id) else {
            return Ok(());
        };

        let min_x = slot.rect.loc.x;
        let max_x = slot.rect.loc.x + slot.rect.size.w;
        let current = self.scroll.current();
        let target = if min_x < 0. {
            current - min_x + strip.gap
        } else if max_x > monitor.size.w {
            current - (max_x - monitor.size.w) - strip.gap
        } else {
            return Ok(());
        };

        let config = self.options.overview_animation();
        self.scroll.animate_to(target, &self.clock, config);
        Ok(())
    }

    pub fn init_position<D: Desktop + ?Sized>(
        &mut self,
        monitor: &MonitorInfo,
        _desktop: &D,
    ) -> Result<(), LayoutError> {
        self.strip(monitor)?;
        self.scroll.warp(0.);
        self.view_offset.warp(0.);
        Ok(())
    }

    pub fn set_progress(
        &mut self,
        progress: f64,
        monitor: &MonitorInfo,
    ) -> Result<(), LayoutError> {
        let strip = self.strip(monitor)?;
        self.view_offset.warp(lerp(0., strip.height, progress));
        Ok(())
    }

    pub fn progress(&self, monitor: &MonitorInfo) -> Result<f64, LayoutError> {
        let strip = self.strip(monitor)?;
        if strip.height <= 0. {
            return Ok(0.);
        }
        Ok((self.view_offset.current() / strip.height).clamp(0., 1.))
    }

    pub fn should_manage_mouse(&self, monitor: &MonitorInfo, pointer: Point<f64, Logical>) -> bool {
        let Ok(strip) = self.strip(monitor) else {
            return false;
        };

        self.band(monitor, &strip).contains(pointer)
    }

    pub fn drag_window_scale(
        &self,
        monitor: &MonitorInfo,
        pointer: Point<f64, Logical>,
    ) -> Result<f64, LayoutError> {
        let strip = self.strip(monitor)?;
        if self.band(monitor, &strip).contains(pointer) {
            Ok(strip.cell.w / monitor.size.w)
        } else {
            Ok(1.)
        }
    }

    pub fn on_mouse_axis<D: Desktop + ?Sized>(
        &mut self,
        delta: f64,
        monitor: &MonitorInfo,
        pointer: Point<f64, Logical>,
        desktop: &D,
    ) -> bool {
        let Ok(strip) = self.strip(monitor) else {
            return false;
        };

        if !self.band(monitor, &strip).contains(pointer) {
            return false;
        }

        let speed = self.options.overview.linear.scroll_speed.0;
        let (min, max) = Self::scroll_range(monitor, &strip, desktop);
        let target = (self.scroll.target() - delta * speed * monitor.scale).clamp(min, max);

        let config = self.options.overview_animation();
        self.scroll.animate_to(target, &self.clock, config);
        true
    }

    pub fn edge_scroll<D: Desktop + ?Sized>(
        &mut self,
        monitor: &MonitorInfo,
        pointer: Point<f64, Logical>,
        desktop: &D,
    ) -> f64 {
        let Ok(strip) = self.strip(monitor) else {
            return 0.;
        };

        if !self.band(monitor, &strip).contains(pointer) {
            return 0.;
        }

        let x = (pointer.x - monitor.position.x) * monitor.scale;
        let zone = strip.cell.w / 2.;
        let step = EDGE_SCROLL_STEP * monitor.scale;

        let amount = if x < zone {
            (zone - x) / zone * step
        } else if x > monitor.size.w - zone {
            -(x - (monitor.size.w - zone)) / zone * step
        } else {
            return 0.;
        };

        let (min, max) = Self::scroll_range(monitor, &strip, desktop);
        let current = self.scroll.current();
        let new = (current + amount).clamp(min, max);
        self.scroll.warp(new);
        new - current
    }

    pub fn are_animations_ongoing(&self) -> bool {
        self.scroll.is_animation_ongoing() || self.view_offset.is_animation_ongoing()
    }

    pub fn settle(&mut self) {
        self.scroll.settle();
        self.view_offset.settle();
    }
}
