// End-to-end behavior of the navigator: per-frame projection, hover, ground
// cursor, and click dispatch through the injected callbacks.

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use pano_core::*;

const W: f64 = 1600.0;
const H: f64 = 900.0;

fn view(yaw: f64, pitch: f64, fov: f64) -> ViewState {
    ViewState { yaw, pitch, fov }
}

fn lat_for_meters_north(m: f64) -> f64 {
    m / (EARTH_RADIUS_M * std::f64::consts::PI / 180.0)
}

fn target(id: &str, north_m: f64) -> Target {
    Target {
        id: id.into(),
        lon: 0.0,
        lat: lat_for_meters_north(north_m),
        ele: 0.0,
        display_name: format!("Photo {id}"),
        is_next: false,
        is_original: true,
        hidden: false,
        ground_override: None,
    }
}

fn placed(id: &str, bearing_deg: f64, distance: f64) -> Target {
    Target {
        ground_override: Some(GroundOverride {
            bearing_deg,
            ground_distance_m: distance,
            height_m: 0.0,
        }),
        ..target(id, 100.0)
    }
}

#[derive(Default)]
struct Calls {
    navigate: Vec<String>,
    select: Vec<String>,
    proposals: Vec<(String, OverrideProposal)>,
    nearby: Vec<String>,
}

fn navigator() -> (Navigator, Rc<RefCell<Calls>>) {
    let calls = Rc::new(RefCell::new(Calls::default()));
    let (c1, c2, c3) = (calls.clone(), calls.clone(), calls.clone());
    let callbacks = NavigatorCallbacks {
        on_navigate: Box::new(move |id: &str| c1.borrow_mut().navigate.push(id.to_string())),
        on_target_select: Box::new(move |id: &str| c2.borrow_mut().select.push(id.to_string())),
        on_set_from_click: Box::new(move |id: &str, p: OverrideProposal| {
            c3.borrow_mut().proposals.push((id.to_string(), p))
        }),
    };
    let mut nav = Navigator::new(NavigatorSettings::default(), callbacks);
    nav.resize(W, H);
    nav.set_camera_config(Some(CameraConfig::default()));
    (nav, calls)
}

fn marker<'a>(nav: &'a Navigator, id: &str) -> &'a ProjectedMarker {
    nav.markers()
        .iter()
        .find(|m| m.id == id)
        .unwrap_or_else(|| panic!("marker {id} missing"))
}

fn click(nav: &mut Navigator, x: f64, y: f64, v: ViewState) -> ClickOutcome {
    nav.pointer_down(x, y);
    nav.pointer_up(x, y, v)
}

#[test]
fn frame_projects_targets_and_reports_markers() {
    let (mut nav, _) = navigator();
    nav.set_targets(vec![target("a", 10.0), target("b", 25.0)]);
    let mut s = RecordingSurface::new();
    nav.update(view(0.0, -0.2, 75.0), &mut s);
    assert_eq!(nav.markers().len(), 2);
    let a = marker(&nav, "a");
    let b = marker(&nav, "b");
    assert!(a.visible && b.visible);
    assert!(a.radius > b.radius, "nearer marker is larger");
    assert!(a.screen_y > b.screen_y, "nearer ground marker sits lower");
    assert!(s.fills().count() >= 4);
}

#[test]
fn missing_config_is_a_cleared_noop_frame() {
    let mut nav = Navigator::new(NavigatorSettings::default(), NavigatorCallbacks::noop());
    nav.resize(W, H);
    nav.set_targets(vec![target("a", 10.0)]);
    let mut s = RecordingSurface::new();
    nav.update(view(0.0, 0.0, 75.0), &mut s);
    assert!(nav.markers().is_empty());
    assert_eq!(s.ops, vec![DrawOp::Clear]);
    assert_eq!(nav.handle_click(800.0, 600.0, view(0.0, 0.0, 75.0)), ClickOutcome::Ignored);
}

#[test]
fn dropping_the_config_clears_hover_and_pointer() {
    let (mut nav, _) = navigator();
    nav.set_targets(vec![target("a", 10.0)]);
    let v = view(0.0, -0.2, 75.0);
    let mut s = RecordingSurface::new();
    nav.update(v, &mut s);
    let (x, y) = {
        let m = marker(&nav, "a");
        (m.screen_x, m.screen_y)
    };
    nav.pointer_move(x, y);
    nav.update(v, &mut s);
    assert_eq!(nav.hovered_id(), Some("a"));
    assert_eq!(s.last_pointer(), Some(PointerStyle::Pointer));

    nav.set_camera_config(None);
    nav.update(v, &mut s);
    assert!(nav.markers().is_empty());
    assert_eq!(nav.hovered_id(), None);
    assert_eq!(nav.cursor_nearest_target_id(), None);
    assert!(nav.ground_cursor().is_none());
    assert_eq!(s.last_pointer(), Some(PointerStyle::Default));
}

#[test]
fn nearest_target_excludes_hidden_and_is_stable() {
    let (mut nav, _) = navigator();
    let mut close = target("close", 5.0);
    close.hidden = true;
    nav.set_targets(vec![target("far", 40.0), close, target("mid", 12.0)]);
    assert_eq!(nav.nearest_target_id(), Some("mid"));
    for _ in 0..5 {
        nav.set_targets(nav.context().targets.clone());
        assert_eq!(nav.nearest_target_id(), Some("mid"));
    }
}

#[test]
fn nearest_target_is_not_per_frame() {
    let (mut nav, _) = navigator();
    nav.set_targets(vec![target("a", 10.0), target("b", 30.0)]);
    let mut s = RecordingSurface::new();
    // Cursor near b does not move the geographic nearest.
    let b_ground = nav
        .projector()
        .project_ground(DVec2::new(0.5, -29.0), 0.0, -0.2, 75.0);
    nav.pointer_move(b_ground.x + 40.0, b_ground.y);
    nav.update(view(0.0, -0.2, 75.0), &mut s);
    assert_eq!(nav.nearest_target_id(), Some("a"));
    assert_eq!(nav.cursor_nearest_target_id(), Some("b"));
}

#[test]
fn click_selects_then_navigates() {
    let (mut nav, calls) = navigator();
    nav.set_targets(vec![target("a", 10.0)]);
    let v = view(0.0, -0.2, 75.0);
    nav.update(v, &mut RecordingSurface::new());
    let (x, y) = {
        let m = marker(&nav, "a");
        (m.screen_x, m.screen_y)
    };
    assert_eq!(click(&mut nav, x, y, v), ClickOutcome::SelectTarget("a".into()));
    nav.set_selected_target(Some("a".into()));
    assert_eq!(click(&mut nav, x, y, v), ClickOutcome::Navigate("a".into()));
    let calls = calls.borrow();
    assert_eq!(calls.select, vec!["a".to_string()]);
    assert_eq!(calls.navigate, vec!["a".to_string()]);
}

#[test]
fn click_on_empty_space_is_ignored() {
    let (mut nav, calls) = navigator();
    nav.set_targets(vec![target("a", 10.0)]);
    let v = view(0.0, -0.2, 75.0);
    nav.update(v, &mut RecordingSurface::new());
    assert_eq!(click(&mut nav, 30.0, 30.0, v), ClickOutcome::Ignored);
    assert_eq!(nav.mode(), InteractionMode::Normal);
    assert!(calls.borrow().select.is_empty());
}

#[test]
fn drag_is_not_a_click() {
    let (mut nav, calls) = navigator();
    nav.set_targets(vec![target("a", 10.0)]);
    let v = view(0.0, -0.2, 75.0);
    nav.update(v, &mut RecordingSurface::new());
    let (x, y) = {
        let m = marker(&nav, "a");
        (m.screen_x, m.screen_y)
    };
    nav.pointer_down(x - 100.0, y);
    nav.pointer_move(x - 50.0, y);
    nav.pointer_move(x, y);
    assert_eq!(nav.pointer_up(x, y, v), ClickOutcome::Ignored);
    assert!(calls.borrow().select.is_empty());
}

#[test]
fn click_uses_orientation_at_click_time() {
    let (mut nav, calls) = navigator();
    nav.set_targets(vec![target("a", 10.0)]);
    let frame_view = view(0.0, -0.2, 75.0);
    nav.update(frame_view, &mut RecordingSurface::new());
    let (x, y) = {
        let m = marker(&nav, "a");
        (m.screen_x, m.screen_y)
    };
    // Camera has turned 20° right since the last frame; the marker moved left.
    let turned = view(20f64.to_radians(), -0.2, 75.0);
    assert_eq!(nav.handle_click(x, y, turned), ClickOutcome::Ignored);
    let wv = WorldView::from_view(turned, 0.0);
    let moved = nav
        .projector()
        .project_ground(DVec2::new(0.0, -10.0), wv.yaw, wv.pitch, wv.fov);
    assert!(moved.x < x);
    assert_eq!(
        nav.handle_click(moved.x, moved.y, turned),
        ClickOutcome::SelectTarget("a".into())
    );
    assert_eq!(calls.borrow().select.len(), 1);
}

#[test]
fn set_from_click_proposes_bearing_and_distance() {
    let (mut nav, calls) = navigator();
    nav.set_targets(vec![target("a", 10.0)]);
    assert!(!nav.enter_set_from_click(), "needs a selection first");
    nav.set_selected_target(Some("a".into()));
    assert!(nav.enter_set_from_click());
    let v = view(0.0, -0.4, 75.0);
    let mut s = RecordingSurface::new();
    nav.update(v, &mut s);
    assert_eq!(s.last_pointer(), Some(PointerStyle::Crosshair));

    let p = nav
        .projector()
        .project_ground(DVec2::new(3.0, -4.0), 0.0, -0.4, 75.0);
    assert!(p.visible);
    match click(&mut nav, p.x, p.y, v) {
        ClickOutcome::ProposeOverride {
            target_id,
            proposal,
        } => {
            assert_eq!(target_id, "a");
            assert!((proposal.bearing_deg - 36.8699).abs() < 1e-3);
            assert!((proposal.ground_distance_m - 5.0).abs() < 1e-6);
        }
        other => panic!("expected proposal, got {other:?}"),
    }
    assert_eq!(nav.mode(), InteractionMode::Normal);
    assert_eq!(calls.borrow().proposals.len(), 1);
    assert!(calls.borrow().select.is_empty());
}

#[test]
fn set_from_click_exits_after_a_sky_click() {
    let (mut nav, calls) = navigator();
    nav.set_targets(vec![target("a", 10.0)]);
    nav.set_selected_target(Some("a".into()));
    nav.enter_set_from_click();
    assert_eq!(nav.handle_click(800.0, 100.0, view(0.0, 0.0, 75.0)), ClickOutcome::Ignored);
    assert!(!nav.is_set_from_click());
    assert!(calls.borrow().proposals.is_empty());
}

#[test]
fn clearing_selection_cancels_set_from_click() {
    let (mut nav, _) = navigator();
    nav.set_targets(vec![target("a", 10.0)]);
    nav.set_selected_target(Some("a".into()));
    nav.enter_set_from_click();
    nav.set_selected_target(None);
    assert_eq!(nav.mode(), InteractionMode::Normal);
}

#[test]
fn proposal_reprojects_onto_the_clicked_pixel() {
    let (mut nav, calls) = navigator();
    let mut cfg = CameraConfig::default();
    cfg.heading = 35.0;
    nav.set_camera_config(Some(cfg));
    nav.set_targets(vec![target("a", 10.0)]);
    nav.set_selected_target(Some("a".into()));
    nav.enter_set_from_click();
    let v = view(0.3, -0.35, 70.0);
    let (cx, cy) = (930.0, 700.0);
    nav.handle_click(cx, cy, v);
    let (_, proposal) = calls.borrow().proposals[0].clone();

    nav.set_override_edit(
        "a",
        Override::Set(GroundOverride {
            bearing_deg: proposal.bearing_deg,
            ground_distance_m: proposal.ground_distance_m,
            height_m: 0.0,
        }),
    );
    nav.update(v, &mut RecordingSurface::new());
    let m = marker(&nav, "a");
    assert!((m.screen_x - cx).abs() < 1e-6 && (m.screen_y - cy).abs() < 1e-6);
}

#[test]
fn override_edits_shadow_persisted_values() {
    let (mut nav, _) = navigator();
    let mut t = target("a", 10.0);
    t.ground_override = Some(GroundOverride {
        bearing_deg: 20.0,
        ground_distance_m: 6.0,
        height_m: 0.0,
    });
    nav.set_targets(vec![t.clone()]);
    let v = view(0.0, -0.3, 75.0);
    let wv = WorldView::from_view(v, 0.0);

    let pos = |nav: &mut Navigator| {
        nav.update(v, &mut RecordingSurface::new());
        let m = marker(nav, "a");
        (m.screen_x, m.screen_y)
    };
    let expect = |o: GroundOverride, nav: &Navigator| {
        let s = nav.projector().project_from_override(&o, wv.yaw, wv.pitch, wv.fov);
        (s.x, s.y)
    };

    let original = t.ground_override.expect("override");
    assert_eq!(pos(&mut nav), expect(original, &nav));

    let edited = GroundOverride {
        bearing_deg: 350.0,
        ground_distance_m: 4.0,
        height_m: 0.5,
    };
    nav.set_override_edit("a", Override::Set(edited));
    assert_eq!(pos(&mut nav), expect(edited, &nav));

    nav.set_override_edit("a", Override::Cleared);
    let geo = nav.projector().geo_world(t.lon, t.lat).expect("config");
    let s = nav.projector().world_to_screen(geo, wv.yaw, wv.pitch, wv.fov);
    assert_eq!(pos(&mut nav), (s.x, s.y));

    nav.clear_override_edits();
    assert_eq!(pos(&mut nav), expect(original, &nav));
}

#[test]
fn hover_suppresses_ground_cursor_and_sets_pointer() {
    let (mut nav, _) = navigator();
    nav.set_targets(vec![target("a", 10.0)]);
    let v = view(0.0, -0.2, 75.0);
    let mut s = RecordingSurface::new();
    nav.update(v, &mut s);
    let (x, y) = {
        let m = marker(&nav, "a");
        (m.screen_x, m.screen_y)
    };
    nav.pointer_move(x, y);
    nav.update(v, &mut s);
    assert_eq!(nav.hovered_id(), Some("a"));
    assert!(nav.ground_cursor().is_none());
    assert_eq!(s.last_pointer(), Some(PointerStyle::Pointer));
    assert!(s.ops.iter().any(|op| matches!(op, DrawOp::Text { text, .. } if text == "Photo a")));

    nav.pointer_leave();
    nav.update(v, &mut s);
    assert_eq!(nav.hovered_id(), None);
    assert_eq!(s.last_pointer(), Some(PointerStyle::Default));
}

#[test]
fn hover_enlarged_marker_is_hit_over_its_drawn_size() {
    let (mut nav, calls) = navigator();
    nav.set_targets(vec![target("a", 10.0)]);
    let v = view(0.0, -0.2, 75.0);
    let mut s = RecordingSurface::new();
    nav.update(v, &mut s);
    let (x, y, r) = {
        let m = marker(&nav, "a");
        (m.screen_x, m.screen_y, m.radius)
    };
    nav.pointer_move(x, y);
    for _ in 0..40 {
        nav.update(v, &mut s);
    }
    let drawn_rx = s
        .ops
        .iter()
        .rev()
        .find_map(|op| match op {
            DrawOp::FillEllipse { cx, rx, .. } if (*cx - x).abs() < 1e-9 && *rx > r => Some(*rx),
            _ => None,
        })
        .expect("enlarged body drawn");
    assert!(drawn_rx > r * 1.2);

    // Inside the drawn ellipse, outside the base one and beyond snap range.
    let edge = x + r * 1.1;
    assert!(!marker(&nav, "a").contains(edge, y));
    nav.pointer_move(edge, y);
    nav.update(v, &mut s);
    assert_eq!(nav.hovered_id(), Some("a"));

    assert_eq!(click(&mut nav, edge, y, v), ClickOutcome::SelectTarget("a".into()));
    assert_eq!(calls.borrow().select, vec!["a".to_string()]);
}

#[test]
fn snap_finds_marker_just_outside_its_ellipse() {
    let (mut nav, _) = navigator();
    // far enough that the marker is clamped small and nearly flat
    nav.set_targets(vec![target("a", 150.0)]);
    nav.update(view(0.0, -0.2, 75.0), &mut RecordingSurface::new());
    let (x, y, ry) = {
        let m = marker(&nav, "a");
        (m.screen_x, m.screen_y, m.radius * m.flatten_y)
    };
    let below = y + ry + 2.0;
    assert!(!marker(&nav, "a").contains(x, below));
    assert_eq!(nav.snap_marker(x, below).map(|m| m.id.as_str()), Some("a"));
    assert!(nav.snap_marker(x, y + ry + 200.0).is_none());
}

#[test]
fn ground_cursor_arrow_points_at_nearest_visible_target() {
    let (mut nav, _) = navigator();
    nav.set_targets(vec![placed("left", 340.0, 10.0), placed("right", 20.0, 10.0)]);
    let v = view(0.0, -0.3, 75.0);
    let cursor_px = nav
        .projector()
        .project_ground(ground_at(15.0, 6.0), 0.0, -0.3, 75.0);
    nav.pointer_move(cursor_px.x, cursor_px.y);
    nav.update(v, &mut RecordingSurface::new());

    assert_eq!(nav.cursor_nearest_target_id(), Some("right"));
    let cursor = *nav.ground_cursor().expect("cursor on ground");
    assert!((cursor.distance - 6.0).abs() < 1e-6);
    let right = marker(&nav, "right");
    let expected = (right.screen_x - cursor.screen_x).atan2(-(right.screen_y - cursor.screen_y));
    assert_eq!(cursor.arrow_angle, Some(expected));
    assert!(expected > 0.0, "target is up and to the right");

    let mut targets = nav.context().targets.clone();
    targets[1].hidden = true;
    nav.set_targets(targets);
    nav.update(v, &mut RecordingSurface::new());
    assert_eq!(nav.cursor_nearest_target_id(), Some("left"));
}

fn ground_at(bearing_deg: f64, distance: f64) -> DVec2 {
    let b = bearing_deg.to_radians();
    DVec2::new(distance * b.sin(), -distance * b.cos())
}

#[test]
fn ground_cursor_absent_when_looking_at_sky() {
    let (mut nav, _) = navigator();
    nav.set_targets(vec![target("a", 10.0)]);
    nav.pointer_move(800.0, 100.0);
    nav.update(view(0.0, 0.0, 75.0), &mut RecordingSurface::new());
    assert!(nav.ground_cursor().is_none());
    assert_eq!(nav.cursor_nearest_target_id(), None);
}

#[test]
fn fov_gate_hides_then_shrinks_markers() {
    let (mut nav, _) = navigator();
    nav.set_targets(vec![target("a", 10.0)]);
    let settings = nav.settings().clone();
    let pitch = -0.05;

    nav.update(view(0.0, pitch, settings.fov_hide_deg - 1.0), &mut RecordingSurface::new());
    assert!(nav.markers().is_empty());

    let mid_fov = (settings.fov_hide_deg + settings.fov_full_deg) * 0.5;
    nav.update(view(0.0, pitch, mid_fov), &mut RecordingSurface::new());
    let mid = marker(&nav, "a").radius;
    let full = nav.projector().marker_radius_px(settings.nav_marker_radius_m, 10.0, mid_fov);
    assert!((mid - full * 0.5).abs() < 1e-9);
}

#[test]
fn nearby_markers_only_with_preview() {
    let (mut nav, calls) = navigator();
    nav.set_targets(vec![placed("t", 300.0, 8.0)]);
    nav.set_nearby_photos(vec![NearbyPhoto {
        id: "p".into(),
        lon: 0.0,
        lat: lat_for_meters_north(15.0),
        ele: 0.0,
        display_name: "Nearby p".into(),
    }]);
    let v = view(0.0, -0.2, 75.0);
    nav.update(v, &mut RecordingSurface::new());
    assert!(nav.markers().iter().all(|m| m.kind == MarkerKind::Navigation));

    let sink = calls.clone();
    nav.set_nearby_preview_mode(
        true,
        Some(Box::new(move |id: &str| sink.borrow_mut().nearby.push(id.to_string()))),
    );
    nav.update(v, &mut RecordingSurface::new());
    let (x, y) = {
        let m = marker(&nav, "p");
        assert_eq!(m.kind, MarkerKind::Nearby);
        (m.screen_x, m.screen_y)
    };
    assert_eq!(click(&mut nav, x, y, v), ClickOutcome::SelectNearby("p".into()));
    assert_eq!(calls.borrow().nearby, vec!["p".to_string()]);

    nav.set_nearby_preview_mode(false, None);
    nav.update(v, &mut RecordingSurface::new());
    assert!(nav.markers().iter().all(|m| m.id != "p"));
    assert_eq!(click(&mut nav, x, y, v), ClickOutcome::Ignored);
}

#[test]
fn hidden_targets_remain_clickable() {
    let (mut nav, calls) = navigator();
    let mut t = target("a", 10.0);
    t.hidden = true;
    nav.set_targets(vec![t]);
    let v = view(0.0, -0.2, 75.0);
    nav.update(v, &mut RecordingSurface::new());
    let (x, y) = {
        let m = marker(&nav, "a");
        assert!(m.hidden);
        (m.screen_x, m.screen_y)
    };
    assert_eq!(click(&mut nav, x, y, v), ClickOutcome::SelectTarget("a".into()));
    assert_eq!(calls.borrow().select.len(), 1);
}

#[test]
fn ground_grid_segments_are_split_and_scaled() {
    let (mut nav, _) = navigator();
    nav.set_ground_grid_visible(true);
    let v = view(0.0, -0.4, 75.0);
    nav.update(v, &mut RecordingSurface::new());
    let lines = nav.grid_lines().to_vec();
    assert!(!lines.is_empty());
    assert!(lines.iter().all(|l| l.len() >= 2));
    // Rings behind the camera are cut, so there are more segments than rings.
    assert!(lines.len() > nav.settings().grid_radii_m.len());

    let mut cfg = CameraConfig::default();
    cfg.distance_scale = 2.0;
    nav.set_camera_config(Some(cfg));
    nav.update(v, &mut RecordingSurface::new());
    assert_ne!(nav.grid_lines().to_vec(), lines);

    nav.set_ground_grid_visible(false);
    nav.update(v, &mut RecordingSurface::new());
    assert!(nav.grid_lines().is_empty());
}

#[test]
fn image_heading_rotates_markers() {
    let (mut nav, _) = navigator();
    nav.set_targets(vec![target("north", 10.0)]);
    let mut cfg = CameraConfig::default();
    cfg.heading = 90.0;
    nav.set_camera_config(Some(cfg));
    // Facing east: north is off to the left, outside a 40° view.
    nav.update(view(0.0, -0.2, 40.0), &mut RecordingSurface::new());
    assert!(!marker(&nav, "north").visible);
    // Turning the viewer 90° left brings it back to center.
    nav.update(view(-90f64.to_radians(), -0.2, 40.0), &mut RecordingSurface::new());
    let m = marker(&nav, "north");
    assert!(m.visible);
    assert!((m.screen_x - W / 2.0).abs() < 1e-6);
}
