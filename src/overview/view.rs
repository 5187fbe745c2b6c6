use std::rc::Rc;

use smithay::utils::{Logical, Point};
use taskview_config::ExitPolicy;
use tracing::{debug, trace, warn};

use super::gesture::GestureState;
use super::Direction;
use crate::animation::{Clock, Transition};
use crate::desktop::{Desktop, MonitorId, MonitorInfo, WindowId, WorkspaceId};
use crate::layout::{neighbor, LayoutError, Mapper, Options, OverviewLayout, SlotMap, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// The monitor shows its active workspace as usual.
    Closed,
    /// Animating towards the opened arrangement. Input is already captured.
    Opening,
    Open,
    /// Animating back to the exit workspace.
    Closing,
    /// Sliding between two workspaces without opening the overview.
    Navigating,
}

/// Workspace picked by the exit policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitTarget {
    pub workspace: WorkspaceId,
    pub policy: ExitPolicy,
    /// The workspace is an empty slot that has to be created first.
    pub create: bool,
}

/// The overview of one monitor.
#[derive(Debug)]
pub struct View {
    monitor: MonitorId,
    state: ViewState,
    pub(super) layout: OverviewLayout,
    clock: Clock,
    /// Workspace that was active when the view opened.
    original_workspace: Option<WorkspaceId>,
    /// Workspace most recently clicked, dropped onto or moved to.
    last_interacted: Option<WorkspaceId>,
    /// Runs once the layout's animations finish.
    transition: Option<Transition<View>>,
    pub(super) gesture: Option<GestureState>,
    /// Whether the current configuration already produced a notification.
    error_reported: bool,
}

impl View {
    pub fn new<D: Desktop + ?Sized>(
        monitor: MonitorId,
        clock: Clock,
        options: Rc<Options>,
        desktop: &mut D,
    ) -> Self {
        let mut view = Self {
            monitor,
            state: ViewState::Closed,
            layout: OverviewLayout::new(clock.clone(), options),
            clock,
            original_workspace: None,
            last_interacted: None,
            transition: None,
            gesture: None,
            error_reported: false,
        };
        view.init_position(desktop);
        view
    }

    pub fn monitor(&self) -> MonitorId {
        self.monitor
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Whether the view captures input in overview space.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ViewState::Opening | ViewState::Open)
    }

    /// Whether the view draws instead of the host's regular workspace rendering.
    pub fn is_visible(&self) -> bool {
        self.state != ViewState::Closed
    }

    pub fn layout(&self) -> &OverviewLayout {
        &self.layout
    }

    pub fn original_workspace(&self) -> Option<WorkspaceId> {
        self.original_workspace
    }

    pub fn last_interacted(&self) -> Option<WorkspaceId> {
        self.last_interacted
    }

    pub(super) fn set_last_interacted(&mut self, workspace: WorkspaceId) {
        self.last_interacted = Some(workspace);
    }

    pub(super) fn report<D: Desktop + ?Sized>(&mut self, err: LayoutError, desktop: &mut D) {
        if self.error_reported {
            debug!("monitor {}: {err}", self.monitor);
            return;
        }

        warn!("monitor {}: {err}", self.monitor);
        self.error_reported = true;
        desktop.notify_error(&format!("taskview: {err}"));
    }

    /// Rebuilds the slot map at the current animation values, reporting configuration errors.
    pub(super) fn build_slots<D: Desktop + ?Sized>(
        &mut self,
        desktop: &mut D,
    ) -> Option<(MonitorInfo, SlotMap)> {
        let Some(monitor) = desktop.monitor(self.monitor) else {
            debug!("monitor {} is gone", self.monitor);
            return None;
        };

        match self.layout.build(Stage::Animating, &monitor, &*desktop) {
            Ok(slots) => Some((monitor, slots)),
            Err(err) => {
                self.report(err, desktop);
                None
            }
        }
    }

    /// Puts the layout in the closed arrangement around the active workspace.
    pub(super) fn init_position<D: Desktop + ?Sized>(&mut self, desktop: &mut D) {
        let Some(monitor) = desktop.monitor(self.monitor) else {
            return;
        };

        if let Err(err) = self.layout.init_position(&monitor, &*desktop) {
            self.report(err, desktop);
        }
    }

    /// Starts a new open cycle from the closed state.
    pub(super) fn begin_opening(&mut self, original: Option<WorkspaceId>) {
        self.original_workspace = original;
        self.last_interacted = None;
        self.gesture = None;
        self.transition = None;
        self.state = ViewState::Opening;
    }

    pub(super) fn set_opening(&mut self) {
        self.state = ViewState::Opening;
        self.transition = Some(Transition::new("open", |view: &mut View| {
            view.state = ViewState::Open;
        }));
    }

    pub(super) fn set_closing(&mut self) {
        self.state = ViewState::Closing;
        self.original_workspace = None;
        self.transition = Some(Transition::new("close", |view: &mut View| {
            view.state = ViewState::Closed;
        }));
    }

    pub(super) fn force_close(&mut self) {
        self.state = ViewState::Closed;
        self.transition = None;
        self.gesture = None;
        self.original_workspace = None;
    }

    pub fn update_options<D: Desktop + ?Sized>(&mut self, options: Rc<Options>, desktop: &mut D) {
        self.error_reported = false;

        if options.overview.layout == self.layout.kind() {
            self.layout.update_options(options);
        } else {
            debug!(
                "monitor {}: switching layout to {:?}",
                self.monitor, options.overview.layout
            );
            self.layout = OverviewLayout::new(self.clock.clone(), options);
        }

        match self.state {
            ViewState::Opening | ViewState::Open => {
                let Some(monitor) = desktop.monitor(self.monitor) else {
                    return;
                };
                if let Err(err) = self.layout.set_progress(1., &monitor, &*desktop) {
                    self.report(err, desktop);
                    self.force_close();
                }
            }
            ViewState::Closing | ViewState::Navigating | ViewState::Closed => {
                self.force_close();
                self.init_position(desktop);
            }
        }
    }

    /// The slot under the pointer, if the pointer is on this monitor.
    pub fn hovered_workspace<D: Desktop + ?Sized>(
        &self,
        monitor: &MonitorInfo,
        slots: &SlotMap,
        desktop: &D,
    ) -> Option<WorkspaceId> {
        if desktop.monitor_under_cursor() != Some(self.monitor) {
            return None;
        }

        Mapper::new(monitor, slots).workspace_at(desktop.pointer_position())
    }

    /// The topmost window under the pointer inside a workspace preview.
    fn hovered_window<D: Desktop + ?Sized>(
        &self,
        workspace: WorkspaceId,
        monitor: &MonitorInfo,
        slots: &SlotMap,
        desktop: &D,
    ) -> Option<WindowId> {
        let mapper = Mapper::new(monitor, slots);
        let pos = mapper.global_to_local_unscaled(desktop.pointer_position(), workspace)?;
        let pos = pos + monitor.position;

        desktop
            .workspace_windows(workspace)
            .iter()
            .rev()
            .find(|window| window.geometry().contains(pos))
            .map(|window| window.id)
    }

    /// Whether the workspace is live and belongs to this monitor.
    fn is_own_workspace<D: Desktop + ?Sized>(&self, workspace: WorkspaceId, desktop: &D) -> bool {
        desktop
            .workspace(workspace)
            .is_some_and(|ws| ws.monitor == self.monitor)
    }

    fn hovered_exit<D: Desktop + ?Sized>(
        &self,
        monitor: &MonitorInfo,
        desktop: &D,
    ) -> Result<Option<ExitTarget>, LayoutError> {
        let slots = self.layout.build(Stage::Animating, monitor, desktop)?;
        let Some(workspace) = self.hovered_workspace(monitor, &slots, desktop) else {
            return Ok(None);
        };

        let target = match desktop.workspace(workspace) {
            Some(ws) if ws.monitor == monitor.id => Some(ExitTarget {
                workspace,
                policy: ExitPolicy::Hovered,
                create: false,
            }),
            Some(ws) => {
                debug!("hovered workspace {workspace} lives on monitor {}", ws.monitor);
                None
            }
            None => Some(ExitTarget {
                workspace,
                policy: ExitPolicy::Hovered,
                create: true,
            }),
        };

        Ok(target)
    }

    /// Resolves the workspace to land on when the view closes.
    ///
    /// With `override_hover`, the hovered workspace is tried before the configured policies.
    pub fn exit_workspace<D: Desktop + ?Sized>(
        &self,
        override_hover: bool,
        desktop: &D,
    ) -> Result<Option<ExitTarget>, LayoutError> {
        let Some(monitor) = desktop.monitor(self.monitor) else {
            return Ok(None);
        };

        let options = self.layout.options().clone();
        let policies = override_hover
            .then_some(ExitPolicy::Hovered)
            .into_iter()
            .chain(options.overview.exit_behavior.resolved());

        for policy in policies {
            let remembered = |id: Option<WorkspaceId>| {
                id.filter(|id| self.is_own_workspace(*id, desktop))
                    .map(|workspace| ExitTarget {
                        workspace,
                        policy,
                        create: false,
                    })
            };

            let target = match policy {
                ExitPolicy::Hovered => self.hovered_exit(&monitor, desktop)?,
                ExitPolicy::Interacted => remembered(self.last_interacted),
                ExitPolicy::Original => remembered(self.original_workspace),
                ExitPolicy::Active => monitor.active_workspace.map(|workspace| ExitTarget {
                    workspace,
                    policy,
                    create: false,
                }),
            };

            if let Some(target) = target {
                trace!("monitor {}: exit workspace {target:?}", self.monitor);
                return Ok(Some(target));
            }
        }

        Ok(None)
    }

    /// Makes the exit workspace active, creating it first if needed.
    pub(super) fn apply_exit<D: Desktop + ?Sized>(
        &mut self,
        target: ExitTarget,
        desktop: &mut D,
    ) -> bool {
        if target.create && desktop.create_workspace(target.workspace, self.monitor).is_none() {
            debug!("could not create workspace {}", target.workspace);
            return false;
        }

        let active = desktop
            .monitor(self.monitor)
            .and_then(|monitor| monitor.active_workspace);
        if active != Some(target.workspace) {
            desktop.change_workspace(self.monitor, target.workspace, true);
        }

        true
    }

    pub fn show<D: Desktop + ?Sized>(&mut self, desktop: &mut D) -> bool {
        let _span = tracy_client::span!("View::show");

        if !matches!(self.state, ViewState::Closed | ViewState::Navigating) {
            trace!("monitor {}: not showing while {:?}", self.monitor, self.state);
            return false;
        }

        let Some(monitor) = desktop.monitor(self.monitor) else {
            debug!("monitor {} is gone", self.monitor);
            return false;
        };

        if let Err(err) = self.layout.on_show(&monitor, &*desktop) {
            self.report(err, desktop);
            return false;
        }

        debug!("showing overview on {}", monitor.name);
        self.begin_opening(monitor.active_workspace);
        self.set_opening();
        true
    }

    pub fn hide<D: Desktop + ?Sized>(&mut self, resolve_on_pointer: bool, desktop: &mut D) {
        let _span = tracy_client::span!("View::hide");

        if !self.is_active() {
            trace!("monitor {}: not hiding while {:?}", self.monitor, self.state);
            return;
        }

        self.gesture = None;

        match self.exit_workspace(resolve_on_pointer, &*desktop) {
            Ok(Some(target)) => {
                debug!(
                    "monitor {}: leaving to workspace {} ({:?})",
                    self.monitor, target.workspace, target.policy
                );
                self.apply_exit(target, desktop);
            }
            Ok(None) => debug!("monitor {}: no exit workspace", self.monitor),
            Err(err) => {
                self.report(err, desktop);
                self.force_close();
                return;
            }
        }

        // The exit workspace changed the monitor's active workspace.
        let Some(monitor) = desktop.monitor(self.monitor) else {
            self.force_close();
            return;
        };

        if let Err(err) = self.layout.on_hide(&monitor, &*desktop) {
            self.report(err, desktop);
            self.force_close();
            return;
        }

        self.set_closing();

        if let Some(window) = desktop.window_under_cursor() {
            desktop.focus_window(window);
        }
    }

    /// Switches the monitor to the neighboring workspace, optionally taking a window along.
    ///
    /// While the view is closed this plays the navigating animation and returns to closed.
    pub fn move_to<D: Desktop + ?Sized>(
        &mut self,
        direction: Direction,
        move_window: bool,
        desktop: &mut D,
    ) -> bool {
        let _span = tracy_client::span!("View::move_to");

        if self.state == ViewState::Closing {
            trace!("monitor {}: not moving while closing", self.monitor);
            return false;
        }

        let Some((monitor, slots)) = self.build_slots(desktop) else {
            return false;
        };

        let active_view = self.is_active();
        let hovered = active_view
            .then(|| self.hovered_workspace(&monitor, &slots, &*desktop))
            .flatten();
        let Some(from) = hovered.or(monitor.active_workspace) else {
            debug!("monitor {}: nothing to move from", self.monitor);
            return false;
        };

        let wrap_around = self.layout.options().overview.grid.wrap_around;
        let target = match neighbor(&slots, from, direction.delta(), wrap_around) {
            Some(target) if target != from => target,
            _ => {
                debug!("no workspace {direction} of {from}");
                return false;
            }
        };

        match desktop.workspace(target) {
            Some(ws) if ws.monitor != monitor.id => {
                debug!("workspace {target} lives on monitor {}", ws.monitor);
                return false;
            }
            Some(_) => (),
            None => {
                if desktop.create_workspace(target, monitor.id).is_none() {
                    debug!("could not create workspace {target}");
                    return false;
                }
            }
        }

        let window = if !move_window {
            None
        } else if active_view {
            self.hovered_window(from, &monitor, &slots, &*desktop)
        } else {
            desktop.focused_window()
        };
        if let Some(window) = window {
            debug!("moving window {window} to workspace {target}");
            desktop.move_window_to_workspace(window, target);
        }

        let old = monitor.active_workspace.unwrap_or(from);
        desktop.change_workspace(monitor.id, target, false);
        self.last_interacted = Some(target);

        if let Some(window) = window.or_else(|| desktop.window_under_cursor()) {
            desktop.focus_window(window);
        }

        let Some(monitor) = desktop.monitor(self.monitor) else {
            return true;
        };

        if let Err(err) = self.layout.on_move(old, target, active_view, &monitor, &*desktop) {
            self.report(err, desktop);
            self.force_close();
            return true;
        }

        if !active_view {
            self.state = ViewState::Navigating;
            self.transition = Some(Transition::new("navigate", |view: &mut View| {
                view.state = ViewState::Closed;
            }));
        }

        true
    }

    /// Whether pointer buttons at the pointer belong to the overview.
    pub fn manages_pointer<D: Desktop + ?Sized>(&self, desktop: &D) -> bool {
        if desktop.monitor_under_cursor() != Some(self.monitor) {
            return false;
        }

        let pointer = desktop.pointer_position();
        desktop
            .monitor(self.monitor)
            .is_some_and(|monitor| self.layout.should_manage_mouse(&monitor, pointer))
    }

    pub fn on_mouse_axis<D: Desktop + ?Sized>(&mut self, delta: f64, desktop: &D) -> bool {
        if !self.is_active() {
            return false;
        }

        let Some(monitor) = desktop.monitor(self.monitor) else {
            return false;
        };

        let pointer = desktop.pointer_position();
        self.layout.on_mouse_axis(delta, &monitor, pointer, desktop)
    }

    pub fn drag_window_scale<D: Desktop + ?Sized>(
        &self,
        pointer: Point<f64, Logical>,
        desktop: &D,
    ) -> f64 {
        let Some(monitor) = desktop.monitor(self.monitor) else {
            return 1.;
        };

        match self.layout.drag_window_scale(&monitor, pointer) {
            Ok(scale) if scale > 0. => scale,
            Ok(_) => 1.,
            Err(err) => {
                trace!("monitor {}: {err}", self.monitor);
                1.
            }
        }
    }

    pub fn are_animations_ongoing(&self) -> bool {
        self.layout.are_animations_ongoing()
    }

    /// Settles finished animations and runs the pending transition once they are all done.
    pub fn advance_animations(&mut self) {
        self.layout.settle();

        if self.gesture.is_some() || self.layout.are_animations_ongoing() {
            return;
        }

        if let Some(transition) = self.transition.take() {
            trace!("monitor {}: {} finished", self.monitor, transition.name());
            transition.run(self);
        }
    }
}
