use std::fmt::Write as _;
use std::rc::Rc;
use std::time::Duration;

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use smithay::utils::{Point, Rectangle, Size};
use taskview_config::{Config, FloatOrInt, LayoutKind};

use super::*;
use crate::desktop::{MonitorId, MonitorInfo, WindowId};
use crate::headless::HeadlessDesktop;

fn monitor(active: i64) -> MonitorInfo {
    MonitorInfo {
        id: MonitorId(1),
        name: String::from("DP-1"),
        position: Point::from((0., 0.)),
        size: Size::from((1920., 1080.)),
        scale: 1.,
        active_workspace: Some(WorkspaceId(active)),
    }
}

fn options(f: impl FnOnce(&mut Config)) -> Rc<Options> {
    let mut config = Config::default();
    f(&mut config);
    Rc::new(Options::from_config(&config))
}

fn grid(f: impl FnOnce(&mut Config)) -> OverviewLayout {
    OverviewLayout::new(Clock::with_time(Duration::ZERO), options(f))
}

fn linear(f: impl FnOnce(&mut Config)) -> OverviewLayout {
    grid(|config| {
        config.overview.layout = LayoutKind::Linear;
        f(config);
    })
}

fn dump(slots: &SlotMap) -> String {
    let mut buf = String::new();
    for (id, slot) in slots {
        let Rectangle { loc, size } = slot.rect;
        writeln!(
            buf,
            "{id} ({}, {}): {:.0},{:.0} {:.0}x{:.0}",
            slot.x, slot.y, loc.x, loc.y, size.w, size.h
        )
        .unwrap();
    }
    buf
}

#[test]
fn grid_opened_slots() {
    let layout = grid(|_| ());
    let slots = layout
        .build(Stage::Opened, &monitor(5), &HeadlessDesktop::new())
        .unwrap();

    insta::assert_snapshot!(dump(&slots), @r"
    1 (0, 0): 20,8 621x349
    2 (1, 0): 649,8 621x349
    3 (2, 0): 1279,8 621x349
    4 (0, 1): 20,365 621x349
    5 (1, 1): 649,365 621x349
    6 (2, 1): 1279,365 621x349
    7 (0, 2): 20,723 621x349
    8 (1, 2): 649,723 621x349
    9 (2, 2): 1279,723 621x349
    ");
}

#[test]
fn grid_partitions_monitor() {
    for (rows, columns) in [(1, 1), (2, 3), (3, 3), (4, 2), (5, 7)] {
        let layout = grid(|config| {
            config.overview.grid.rows = rows;
            config.overview.grid.columns = columns;
        });
        let slots = layout
            .build(Stage::Opened, &monitor(1), &HeadlessDesktop::new())
            .unwrap();

        assert_eq!(slots.len(), usize::from(rows) * usize::from(columns));

        let slots: Vec<_> = slots.values().collect();
        for (i, a) in slots.iter().enumerate() {
            for b in &slots[i + 1..] {
                assert_ne!((a.x, a.y), (b.x, b.y));
                assert!(
                    a.rect.intersection(b.rect).is_none(),
                    "{rows}x{columns}: {a:?} overlaps {b:?}"
                );
            }
        }
    }
}

#[test]
fn grid_ids_follow_rows() {
    let layout = grid(|config| {
        config.overview.grid.rows = 2;
        config.overview.grid.columns = 4;
    });
    let slots = layout
        .build(Stage::Closed, &monitor(1), &HeadlessDesktop::new())
        .unwrap();

    let ids: Vec<_> = slots
        .iter()
        .map(|(id, slot)| (id.0, slot.x, slot.y))
        .collect();
    assert_eq!(
        ids,
        [
            (1, 0, 0),
            (2, 1, 0),
            (3, 2, 0),
            (4, 3, 0),
            (5, 0, 1),
            (6, 1, 1),
            (7, 2, 1),
            (8, 3, 1)
        ]
    );
}

#[test]
fn grid_closed_slots_are_monitor_sized() {
    let layout = grid(|_| ());
    let slots = layout
        .build(Stage::Closed, &monitor(1), &HeadlessDesktop::new())
        .unwrap();

    for slot in slots.values() {
        assert_eq!(slot.rect.size, Size::from((1920., 1080.)));
    }
}

#[test]
fn grid_show_and_hide_goals() {
    let mon = monitor(5);
    let desktop = HeadlessDesktop::new();
    let mut layout = grid(|_| ());

    layout.init_position(&mon, &desktop).unwrap();
    layout.on_show(&mon, &desktop).unwrap();

    let OverviewLayout::Grid(inner) = &layout else {
        unreachable!()
    };
    assert!(inner.scale().is_animation_ongoing());
    assert_abs_diff_eq!(inner.scale().target(), 0.32346, epsilon = 1e-5);
    assert_eq!(inner.offset().target(), Point::from((0., 0.)));

    layout.on_hide(&mon, &desktop).unwrap();

    let closed = layout.build(Stage::Closed, &mon, &desktop).unwrap();
    let center = closed[&WorkspaceId(5)].rect.loc;

    let OverviewLayout::Grid(inner) = &layout else {
        unreachable!()
    };
    assert_eq!(inner.scale().target(), 1.);
    assert_abs_diff_eq!(inner.offset().target().x, -center.x);
    assert_abs_diff_eq!(inner.offset().target().y, -center.y);
}

#[test]
fn grid_closed_arrangement_covers_monitor_with_active() {
    let mon = monitor(6);
    let desktop = HeadlessDesktop::new();
    let mut layout = grid(|_| ());

    layout.init_position(&mon, &desktop).unwrap();
    let slots = layout.build(Stage::Animating, &mon, &desktop).unwrap();
    let active = slots[&WorkspaceId(6)].rect;

    assert_abs_diff_eq!(active.loc.x, 0.);
    assert_abs_diff_eq!(active.loc.y, 0.);
    assert_eq!(active.size, mon.size);
    assert_eq!(layout.progress(&mon).unwrap(), 0.);
}

#[test]
fn grid_progress_interpolates() {
    let mon = monitor(1);
    let desktop = HeadlessDesktop::new();
    let mut layout = grid(|_| ());

    layout.set_progress(0.5, &mon, &desktop).unwrap();
    assert_abs_diff_eq!(layout.progress(&mon).unwrap(), 0.5, epsilon = 1e-9);

    layout.set_progress(1., &mon, &desktop).unwrap();
    let animating = layout.build(Stage::Animating, &mon, &desktop).unwrap();
    let opened = layout.build(Stage::Opened, &mon, &desktop).unwrap();
    for (id, slot) in &opened {
        assert_abs_diff_eq!(animating[id].rect.loc.x, slot.rect.loc.x, epsilon = 1e-9);
        assert_abs_diff_eq!(animating[id].rect.loc.y, slot.rect.loc.y, epsilon = 1e-9);
    }
}

#[test]
fn grid_move_while_closed_slides_to_target() {
    let mon = monitor(1);
    let desktop = HeadlessDesktop::new();
    let mut layout = grid(|_| ());
    layout.init_position(&mon, &desktop).unwrap();

    layout
        .on_move(WorkspaceId(1), WorkspaceId(2), false, &mon, &desktop)
        .unwrap();

    let OverviewLayout::Grid(inner) = &layout else {
        unreachable!()
    };
    let closed = layout.build(Stage::Closed, &mon, &desktop).unwrap();
    assert_abs_diff_eq!(
        inner.offset().target().x,
        -closed[&WorkspaceId(2)].rect.loc.x
    );
    assert!(inner.offset().is_animation_ongoing());
}

#[test]
fn grid_move_while_open_keeps_arrangement() {
    let mon = monitor(1);
    let desktop = HeadlessDesktop::new();
    let mut layout = grid(|_| ());
    layout.set_progress(1., &mon, &desktop).unwrap();

    layout
        .on_move(WorkspaceId(1), WorkspaceId(2), true, &mon, &desktop)
        .unwrap();

    assert!(!layout.are_animations_ongoing());
}

#[test]
fn grid_configuration_errors() {
    let mon = monitor(1);
    let desktop = HeadlessDesktop::new();

    let layout = grid(|config| config.overview.gap_size = FloatOrInt(2000.));
    assert!(matches!(
        layout.build(Stage::Opened, &mon, &desktop),
        Err(LayoutError::InvalidGapSize { .. })
    ));

    let layout = grid(|config| config.overview.gap_size = FloatOrInt(-1.));
    assert!(matches!(
        layout.build(Stage::Opened, &mon, &desktop),
        Err(LayoutError::InvalidGapSize { .. })
    ));

    let layout = grid(|config| config.overview.gap_size = FloatOrInt(600.));
    assert!(matches!(
        layout.build(Stage::Opened, &mon, &desktop),
        Err(LayoutError::NonPositiveCell { .. })
    ));

    let layout = grid(|config| config.overview.grid.rows = 0);
    assert!(matches!(
        layout.build(Stage::Opened, &mon, &desktop),
        Err(LayoutError::NonPositiveCell { .. })
    ));
}

#[test]
fn gap_is_scaled_by_output_scale() {
    let mut mon = monitor(1);
    mon.scale = 2.;
    mon.size = Size::from((3840., 2160.));

    let layout = grid(|_| ());
    let slots = layout
        .build(Stage::Opened, &mon, &HeadlessDesktop::new())
        .unwrap();
    assert_abs_diff_eq!(slots[&WorkspaceId(1)].rect.loc.y, 16.);
}

fn linear_desktop() -> (HeadlessDesktop, MonitorInfo) {
    let mut desktop = HeadlessDesktop::new();
    let mon = desktop.add_monitor("DP-1", (0., 0.), (1920., 1080.), 1.);
    let other = desktop.add_monitor("DP-2", (1920., 0.), (1920., 1080.), 1.);
    desktop.add_workspace(WorkspaceId(1), mon);
    desktop.add_workspace(WorkspaceId(5), mon);
    desktop.add_workspace(WorkspaceId(2), mon);
    desktop.add_workspace(WorkspaceId(3), other);

    let info = desktop.monitor(mon).unwrap();
    (desktop, info)
}

#[test]
fn linear_slots_are_live_workspaces_plus_empty() {
    let (desktop, mon) = linear_desktop();
    let layout = linear(|_| ());

    let slots = layout.build(Stage::Opened, &mon, &desktop).unwrap();
    insta::assert_snapshot!(dump(&slots), @r"
    1 (0, 0): 8,788 505x284
    2 (1, 0): 521,788 505x284
    4 (3, 0): 1547,788 505x284
    5 (2, 0): 1034,788 505x284
    ");
}

#[test]
fn linear_closed_strip_is_below_monitor() {
    let (desktop, mon) = linear_desktop();
    let layout = linear(|_| ());

    let slots = layout.build(Stage::Closed, &mon, &desktop).unwrap();
    for slot in slots.values() {
        assert!(slot.rect.loc.y >= mon.size.h);
    }
}

#[test]
fn linear_configuration_errors() {
    let (desktop, mon) = linear_desktop();

    let layout = linear(|config| config.overview.linear.height = FloatOrInt(2000.));
    assert!(matches!(
        layout.build(Stage::Opened, &mon, &desktop),
        Err(LayoutError::InvalidHeight { .. })
    ));

    let layout = linear(|config| config.overview.gap_size = FloatOrInt(200.));
    assert!(matches!(
        layout.build(Stage::Opened, &mon, &desktop),
        Err(LayoutError::InvalidGapSize { .. })
    ));

    let layout = linear(|config| config.overview.gap_size = FloatOrInt(150.));
    assert!(matches!(
        layout.build(Stage::Opened, &mon, &desktop),
        Err(LayoutError::NonPositiveCell { .. })
    ));
}

#[test]
fn linear_manages_mouse_only_in_band() {
    let (desktop, mon) = linear_desktop();
    let mut layout = linear(|_| ());
    layout.set_progress(1., &mon, &desktop).unwrap();

    assert!(layout.should_manage_mouse(&mon, Point::from((100., 900.))));
    assert!(!layout.should_manage_mouse(&mon, Point::from((100., 100.))));

    let grid = grid(|_| ());
    assert!(grid.should_manage_mouse(&mon, Point::from((100., 100.))));

    assert_abs_diff_eq!(
        layout
            .drag_window_scale(&mon, Point::from((100., 900.)))
            .unwrap(),
        284. * 16. / 9. / 1920.,
        epsilon = 1e-9
    );
    assert_eq!(
        layout
            .drag_window_scale(&mon, Point::from((100., 100.)))
            .unwrap(),
        1.
    );
}

#[test]
fn linear_scroll_is_clamped() {
    let (mut desktop, mon) = linear_desktop();
    for id in 6..12 {
        desktop.add_workspace(WorkspaceId(id), mon.id);
    }

    let mut layout = linear(|config| config.animations.off = true);
    layout.set_progress(1., &mon, &desktop).unwrap();

    let pointer = Point::from((960., 900.));
    assert!(layout.on_mouse_axis(10_000., &mon, pointer, &desktop));

    let OverviewLayout::Linear(inner) = &layout else {
        unreachable!()
    };
    // 9 live workspaces and the empty slot.
    let total = 10. * (8. + 284. * 16. / 9.) + 8.;
    assert_abs_diff_eq!(inner.scroll().current(), 1920. - total, epsilon = 1e-9);

    assert!(layout.on_mouse_axis(-10_000., &mon, pointer, &desktop));
    let OverviewLayout::Linear(inner) = &layout else {
        unreachable!()
    };
    assert_eq!(inner.scroll().current(), 0.);

    assert!(!layout.on_mouse_axis(10., &mon, Point::from((960., 100.)), &desktop));
}

#[test]
fn linear_edge_scroll_only_near_edges() {
    let (mut desktop, mon) = linear_desktop();
    for id in 6..12 {
        desktop.add_workspace(WorkspaceId(id), mon.id);
    }

    let mut layout = linear(|_| ());
    layout.set_progress(1., &mon, &desktop).unwrap();

    assert_eq!(
        layout.edge_scroll(&mon, Point::from((960., 900.)), &desktop),
        0.
    );
    assert!(layout.edge_scroll(&mon, Point::from((1919., 900.)), &desktop) < 0.);
    // Already at the start.
    assert_eq!(layout.edge_scroll(&mon, Point::from((0., 900.)), &desktop), 0.);
}

#[test]
fn should_render_window_hides_far_workspaces() {
    let (mut desktop, mon) = linear_desktop();
    let near = desktop
        .add_window(
            WorkspaceId(2),
            Rectangle::new(Point::from((0., 0.)), Size::from((800., 600.))),
            false,
        )
        .unwrap();
    let elsewhere = desktop
        .add_window(
            WorkspaceId(3),
            Rectangle::new(Point::from((1920., 0.)), Size::from((800., 600.))),
            false,
        )
        .unwrap();
    let active = desktop
        .add_window(
            WorkspaceId(1),
            Rectangle::new(Point::from((0., 0.)), Size::from((800., 600.))),
            false,
        )
        .unwrap();

    let mut layout = linear(|_| ());
    layout.set_progress(1., &mon, &desktop).unwrap();

    let info = |id: WindowId| desktop.window(id).unwrap();
    assert!(layout.should_render_window(&info(near), None, &mon, &desktop));
    assert!(!layout.should_render_window(&info(elsewhere), None, &mon, &desktop));
    assert!(layout.should_render_window(&info(active), None, &mon, &desktop));
    assert!(!layout.should_render_window(&info(near), Some(near), &mon, &desktop));

    // Closed strip: only the full-size workspace is visible.
    layout.set_progress(0., &mon, &desktop).unwrap();
    assert!(!layout.should_render_window(&info(near), None, &mon, &desktop));
}

#[test]
fn neighbor_respects_wrap_around() {
    let layout = grid(|_| ());
    let slots = layout
        .build(Stage::Opened, &monitor(1), &HeadlessDesktop::new())
        .unwrap();

    assert_eq!(neighbor(&slots, WorkspaceId(5), (1, 0), false), Some(WorkspaceId(6)));
    assert_eq!(neighbor(&slots, WorkspaceId(5), (0, -1), false), Some(WorkspaceId(2)));
    assert_eq!(neighbor(&slots, WorkspaceId(4), (-1, 0), false), None);
    assert_eq!(neighbor(&slots, WorkspaceId(4), (-1, 0), true), Some(WorkspaceId(6)));
    assert_eq!(neighbor(&slots, WorkspaceId(9), (0, 1), true), Some(WorkspaceId(3)));
    assert_eq!(neighbor(&slots, WorkspaceId(42), (1, 0), true), None);
}

#[test]
fn mapper_resolves_workspace_under_point() {
    let mon = monitor(1);
    let layout = grid(|_| ());
    let slots = layout
        .build(Stage::Opened, &mon, &HeadlessDesktop::new())
        .unwrap();
    let mapper = Mapper::new(&mon, &slots);

    assert_eq!(mapper.workspace_at(Point::from((30., 10.))), Some(WorkspaceId(1)));
    assert_eq!(mapper.workspace_at(Point::from((960., 540.))), Some(WorkspaceId(5)));
    // Gap between columns.
    assert_eq!(mapper.workspace_at(Point::from((644., 100.))), None);
    // Off the monitor.
    assert_eq!(mapper.workspace_at(Point::from((-5., 100.))), None);

    assert_eq!(mapper.global_to_local_unscaled(Point::from((0., 0.)), WorkspaceId(42)), None);
}

#[test]
fn mapper_maps_slot_corners_to_monitor_corners() {
    let mut mon = monitor(1);
    mon.position = Point::from((100., 50.));
    mon.scale = 2.;
    mon.size = Size::from((3840., 2160.));

    let layout = grid(|_| ());
    let slots = layout
        .build(Stage::Opened, &mon, &HeadlessDesktop::new())
        .unwrap();
    let mapper = Mapper::new(&mon, &slots);

    let ws = WorkspaceId(9);
    let slot = mapper.global_workspace_box(ws).unwrap();

    let top_left = mapper.global_to_local_unscaled(slot.loc, ws).unwrap();
    assert_abs_diff_eq!(top_left.x, 0., epsilon = 1e-9);
    assert_abs_diff_eq!(top_left.y, 0., epsilon = 1e-9);

    let bottom_right = slot.loc + slot.size.to_point();
    let bottom_right = mapper.global_to_local_unscaled(bottom_right, ws).unwrap();
    assert_abs_diff_eq!(bottom_right.x, 1920., epsilon = 1e-6);
    assert_abs_diff_eq!(bottom_right.y, 1080., epsilon = 1e-6);

    let scaled = mapper.global_to_local_scaled(slot.loc, ws).unwrap();
    assert_abs_diff_eq!(scaled.x, 0., epsilon = 1e-9);
}

#[test]
fn grid_ids_are_per_monitor() {
    let mut desktop = HeadlessDesktop::new();
    let first = desktop.add_monitor("DP-1", (0., 0.), (1920., 1080.), 1.);
    let second = desktop.add_monitor("DP-2", (1920., 0.), (1920., 1080.), 1.);
    desktop.add_workspace(WorkspaceId(1), first);
    desktop.add_workspace(WorkspaceId(14), second);
    let mon = desktop.monitor(second).unwrap();

    let mut layout = grid(|_| ());
    let slots = layout.build(Stage::Opened, &mon, &desktop).unwrap();
    let ids: Vec<_> = slots.keys().map(|id| id.0).collect();
    assert_eq!(ids, (10..=18).collect::<Vec<_>>());
    assert_eq!((slots[&WorkspaceId(10)].x, slots[&WorkspaceId(10)].y), (0, 0));
    assert_eq!((slots[&WorkspaceId(14)].x, slots[&WorkspaceId(14)].y), (1, 1));

    // Closed, the second monitor zooms into its own active workspace.
    layout.init_position(&mon, &desktop).unwrap();
    let slots = layout.build(Stage::Animating, &mon, &desktop).unwrap();
    let active = slots[&WorkspaceId(14)].rect;
    assert_abs_diff_eq!(active.loc.x, 0., epsilon = 1e-9);
    assert_abs_diff_eq!(active.loc.y, 0., epsilon = 1e-9);
}

#[test]
fn progress_outside_range_is_clamped() {
    let mon = monitor(1);
    let desktop = HeadlessDesktop::new();
    let mut layout = grid(|_| ());
    let opened = layout.build(Stage::Opened, &mon, &desktop).unwrap();
    let opened_scale = opened[&WorkspaceId(1)].rect.size.w / mon.size.w;

    layout.set_progress(-0.042, &mon, &desktop).unwrap();
    let OverviewLayout::Grid(inner) = &layout else {
        unreachable!()
    };
    assert_eq!(inner.scale().current(), 1.);

    layout.set_progress(1.5, &mon, &desktop).unwrap();
    let OverviewLayout::Grid(inner) = &layout else {
        unreachable!()
    };
    assert_abs_diff_eq!(inner.scale().current(), opened_scale, epsilon = 1e-12);

    let mut layout = linear(|_| ());
    layout.set_progress(2., &mon, &desktop).unwrap();
    let OverviewLayout::Linear(inner) = &layout else {
        unreachable!()
    };
    assert_eq!(inner.view_offset().current(), 300.);
}

fn arbitrary_monitor() -> impl Strategy<Value = MonitorInfo> {
    (
        -4000f64..4000.,
        -4000f64..4000.,
        640f64..7680.,
        480f64..4320.,
        prop::sample::select(vec![1., 1.25, 1.5, 2., 3.]),
    )
        .prop_map(|(x, y, w, h, scale)| MonitorInfo {
            id: MonitorId(1),
            name: String::from("test"),
            position: Point::from((x, y)),
            size: Size::from((w, h)),
            scale,
            active_workspace: Some(WorkspaceId(1)),
        })
}

proptest! {
    #[test]
    fn mapper_round_trip(
        mon in arbitrary_monitor(),
        progress in 0f64..=1.,
        px in -10_000f64..10_000.,
        py in -10_000f64..10_000.,
    ) {
        let desktop = HeadlessDesktop::new();
        let mut layout = grid(|config| config.overview.gap_size = FloatOrInt(4.));
        layout.set_progress(progress, &mon, &desktop).unwrap();
        let slots = layout.build(Stage::Animating, &mon, &desktop).unwrap();
        let mapper = Mapper::new(&mon, &slots);

        let p = Point::from((px, py));
        for id in slots.keys() {
            let local = mapper.global_to_local_unscaled(p, *id).unwrap();
            let back = mapper.local_unscaled_to_global(local, *id).unwrap();
            prop_assert!((back.x - p.x).abs() < 1e-4, "{id}: {back:?} != {p:?}");
            prop_assert!((back.y - p.y).abs() < 1e-4, "{id}: {back:?} != {p:?}");

            let scaled = mapper.global_to_local_scaled(p, *id).unwrap();
            let back = mapper.local_scaled_to_global(scaled, *id).unwrap();
            prop_assert!((back.x - p.x).abs() < 1e-4);
            prop_assert!((back.y - p.y).abs() < 1e-4);
        }
    }

    #[test]
    fn linear_mapper_round_trip(
        scale in prop::sample::select(vec![1., 1.25, 1.5, 2.]),
        progress in 0f64..=1.,
        scroll in -20_000f64..20_000.,
        px in -10_000f64..10_000.,
        py in -10_000f64..10_000.,
    ) {
        let mut desktop = HeadlessDesktop::new();
        let id = desktop.add_monitor("DP-1", (-1280., 200.), (3840., 2160.), scale);
        for ws in 1..=12 {
            desktop.add_workspace(WorkspaceId(ws), id);
        }
        let mon = desktop.monitor(id).unwrap();

        let mut layout = linear(|config| config.animations.off = true);
        layout.set_progress(1., &mon, &desktop).unwrap();
        let in_band = mon.position + Point::from((10., mon.size.h / scale - 150.));
        prop_assert!(layout.on_mouse_axis(scroll, &mon, in_band, &desktop));
        layout.set_progress(progress, &mon, &desktop).unwrap();

        let slots = layout.build(Stage::Animating, &mon, &desktop).unwrap();
        let mapper = Mapper::new(&mon, &slots);

        let p = Point::from((px, py));
        for id in slots.keys() {
            let local = mapper.global_to_local_unscaled(p, *id).unwrap();
            let back = mapper.local_unscaled_to_global(local, *id).unwrap();
            prop_assert!((back.x - p.x).abs() < 1e-4, "{id}: {back:?} != {p:?}");
            prop_assert!((back.y - p.y).abs() < 1e-4, "{id}: {back:?} != {p:?}");

            let scaled = mapper.global_to_local_scaled(p, *id).unwrap();
            let back = mapper.local_scaled_to_global(scaled, *id).unwrap();
            prop_assert!((back.x - p.x).abs() < 1e-4);
            prop_assert!((back.y - p.y).abs() < 1e-4);
        }
    }

    #[test]
    fn grid_scale_never_overshoots(ms in 0u64..600) {
        let mon = monitor(5);
        let desktop = HeadlessDesktop::new();
        let mut clock = Clock::with_time(Duration::ZERO);
        let mut layout = OverviewLayout::new(clock.clone(), options(|_| ()));

        layout.init_position(&mon, &desktop).unwrap();
        layout.on_show(&mon, &desktop).unwrap();
        clock.set_unadjusted(Duration::from_millis(ms));

        let OverviewLayout::Grid(inner) = &layout else {
            unreachable!()
        };
        let scale = inner.scale().current();
        prop_assert!((0.32345..=1.).contains(&scale), "{scale}");
    }
}
