//! Per-photo navigation state and the per-frame projection/interaction pass.
//!
//! Within one frame the order is fixed: project, hit-test, then render. The
//! hover id and ground cursor read what projection produced in the same frame.

use fnv::FnvHashMap;
use glam::DVec2;
use smallvec::SmallVec;

use crate::constants::*;
use crate::hit_test::HitTester;
use crate::overrides::{resolve_override, Override};
use crate::projector::{bearing_to_local, geo_to_local_meters, local_to_bearing, Projector, ScreenPoint};
use crate::renderer::{MarkerRenderer, Scene};
use crate::settings::NavigatorSettings;
use crate::surface::DrawSurface;
use crate::types::*;

pub type TargetCallback = Box<dyn FnMut(&str)>;
pub type ProposalCallback = Box<dyn FnMut(&str, OverrideProposal)>;

/// Click-result handlers supplied by the panel at construction.
pub struct NavigatorCallbacks {
    pub on_navigate: TargetCallback,
    pub on_target_select: TargetCallback,
    pub on_set_from_click: ProposalCallback,
}

impl NavigatorCallbacks {
    pub fn noop() -> Self {
        Self {
            on_navigate: Box::new(|_: &str| {}),
            on_target_select: Box::new(|_: &str| {}),
            on_set_from_click: Box::new(|_: &str, _: OverrideProposal| {}),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionMode {
    #[default]
    Normal,
    SetFromClick,
}

/// What a click landed on, reduced to what routing needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitKind {
    Nothing,
    Navigation { selected: bool },
    Nearby,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    ProposeOverride,
    Navigate,
    SelectTarget,
    SelectNearby,
    Ignore,
}

/// Which handler fires for each mode / hit / preview combination.
pub fn route_click(mode: InteractionMode, hit: HitKind, nearby_preview: bool) -> Route {
    use InteractionMode::*;
    match (mode, hit, nearby_preview) {
        (SetFromClick, _, _) => Route::ProposeOverride,
        (Normal, HitKind::Navigation { selected: true }, _) => Route::Navigate,
        (Normal, HitKind::Navigation { selected: false }, _) => Route::SelectTarget,
        (Normal, HitKind::Nearby, true) => Route::SelectNearby,
        (Normal, HitKind::Nearby, false) => Route::Ignore,
        (Normal, HitKind::Nothing, _) => Route::Ignore,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    SelectTarget(String),
    Navigate(String),
    SelectNearby(String),
    ProposeOverride {
        target_id: String,
        proposal: OverrideProposal,
    },
    Ignored,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    pub down: bool,
    pub dragging: bool,
    pub start: DVec2,
}

/// Mutable per-viewer state. Everything a frame or a pointer event reads
/// lives here rather than in globals.
#[derive(Clone, Debug, Default)]
pub struct NavigatorContext {
    pub camera: Option<CameraConfig>,
    pub targets: Vec<Target>,
    pub nearby: Vec<NearbyPhoto>,
    pub override_edits: FnvHashMap<String, Override>,
    pub selected_target_id: Option<String>,
    pub mode: InteractionMode,
    pub nearby_preview: bool,
    pub grid_visible: bool,
    pub mouse: Option<DVec2>,
    pub drag: DragState,
    pub nearest_target_id: Option<String>,
}

impl NavigatorContext {
    pub fn effective_override(&self, target: &Target) -> Option<GroundOverride> {
        let edit = self
            .override_edits
            .get(&target.id)
            .copied()
            .unwrap_or_default();
        resolve_override(target.ground_override, edit)
    }

    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.targets
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.display_name.as_str())
            .or_else(|| {
                self.nearby
                    .iter()
                    .find(|n| n.id == id)
                    .map(|n| n.display_name.as_str())
            })
    }
}

/// Camera orientation in world terms for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldView {
    pub yaw: f64,
    pub pitch: f64,
    pub fov: f64,
}

impl WorldView {
    /// Viewer yaw is relative to the image center; markers at true north sit
    /// on world `-z`, hence the sign flip.
    pub fn from_view(view: ViewState, image_heading_deg: f64) -> Self {
        let world_heading_deg = image_heading_deg + view.yaw.to_degrees();
        Self {
            yaw: -world_heading_deg.to_radians(),
            pitch: view.pitch,
            fov: view.fov,
        }
    }
}

#[derive(Clone, Debug, Default)]
struct Projection {
    markers: Vec<ProjectedMarker>,
    /// Local ground position of each navigation marker, same index order.
    ground: Vec<Option<DVec2>>,
}

#[derive(Clone, Debug, Default)]
struct FrameState {
    markers: Vec<ProjectedMarker>,
    ground: Vec<Option<DVec2>>,
    cursor: Option<GroundCursor>,
    grid: Vec<Vec<[f64; 2]>>,
    hovered_id: Option<String>,
    cursor_nearest_id: Option<String>,
    pointer: PointerStyle,
    last_view: Option<ViewState>,
}

pub struct Navigator {
    ctx: NavigatorContext,
    settings: NavigatorSettings,
    projector: Projector,
    hit_tester: HitTester,
    renderer: MarkerRenderer,
    callbacks: NavigatorCallbacks,
    on_nearby_click: Option<TargetCallback>,
    frame: FrameState,
    reported_missing_config: bool,
}

impl Navigator {
    pub fn new(settings: NavigatorSettings, callbacks: NavigatorCallbacks) -> Self {
        let renderer = MarkerRenderer::new(settings.hover_scale, settings.hover_lerp);
        Self {
            ctx: NavigatorContext::default(),
            settings,
            projector: Projector::default(),
            hit_tester: HitTester::new(),
            renderer,
            callbacks,
            on_nearby_click: None,
            frame: FrameState::default(),
            reported_missing_config: false,
        }
    }

    // ---------------- Panel-facing setters ----------------

    pub fn resize(&mut self, width: f64, height: f64) {
        self.projector.resize(width, height);
    }

    pub fn set_camera_config(&mut self, config: Option<CameraConfig>) {
        self.ctx.camera = config;
        self.projector.set_camera_config(config);
        self.reported_missing_config = false;
        self.recompute_nearest_target();
    }

    pub fn set_targets(&mut self, targets: Vec<Target>) {
        log::debug!("[nav] {} targets loaded", targets.len());
        self.ctx.targets = targets;
        let stale_selection = self
            .ctx
            .selected_target_id
            .as_ref()
            .is_some_and(|sel| !self.ctx.targets.iter().any(|t| &t.id == sel));
        if stale_selection {
            self.ctx.selected_target_id = None;
            self.set_mode(InteractionMode::Normal);
        }
        self.recompute_nearest_target();
    }

    pub fn set_nearby_photos(&mut self, nearby: Vec<NearbyPhoto>) {
        self.ctx.nearby = nearby;
    }

    pub fn set_nearby_preview_mode(&mut self, enabled: bool, on_click: Option<TargetCallback>) {
        self.ctx.nearby_preview = enabled;
        self.on_nearby_click = if enabled { on_click } else { None };
        log::info!("[nav] nearby preview {}", if enabled { "on" } else { "off" });
    }

    pub fn set_ground_grid_visible(&mut self, visible: bool) {
        self.ctx.grid_visible = visible;
    }

    pub fn set_selected_target(&mut self, id: Option<String>) {
        if id.is_none() && self.ctx.mode == InteractionMode::SetFromClick {
            self.set_mode(InteractionMode::Normal);
        }
        self.ctx.selected_target_id = id;
    }

    pub fn set_override_edit(&mut self, id: &str, edit: Override) {
        if edit == Override::None {
            self.ctx.override_edits.remove(id);
        } else {
            self.ctx.override_edits.insert(id.to_string(), edit);
        }
    }

    pub fn clear_override_edits(&mut self) {
        self.ctx.override_edits.clear();
    }

    /// Arms the next click to place an override for the selected target.
    /// Returns false when no target is selected.
    pub fn enter_set_from_click(&mut self) -> bool {
        if self.ctx.selected_target_id.is_none() {
            log::debug!("[nav] set-from-click refused: no target selected");
            return false;
        }
        self.set_mode(InteractionMode::SetFromClick);
        true
    }

    pub fn cancel_set_from_click(&mut self) {
        self.set_mode(InteractionMode::Normal);
    }

    fn set_mode(&mut self, mode: InteractionMode) {
        if self.ctx.mode != mode {
            log::info!("[nav] mode {:?} -> {:?}", self.ctx.mode, mode);
            self.ctx.mode = mode;
        }
    }

    // ---------------- Read accessors ----------------

    pub fn context(&self) -> &NavigatorContext {
        &self.ctx
    }

    pub fn settings(&self) -> &NavigatorSettings {
        &self.settings
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn mode(&self) -> InteractionMode {
        self.ctx.mode
    }

    pub fn is_set_from_click(&self) -> bool {
        self.ctx.mode == InteractionMode::SetFromClick
    }

    /// Last computed marker list, for minimap cross-highlighting. Radii are
    /// unscaled by hover animation. Nearby photos appear only while nearby
    /// preview is on; otherwise they are not projected at all.
    pub fn markers(&self) -> &[ProjectedMarker] {
        &self.frame.markers
    }

    pub fn ground_cursor(&self) -> Option<&GroundCursor> {
        self.frame.cursor.as_ref()
    }

    pub fn grid_lines(&self) -> &[Vec<[f64; 2]>] {
        &self.frame.grid
    }

    pub fn hovered_id(&self) -> Option<&str> {
        self.frame.hovered_id.as_deref()
    }

    pub fn cursor_nearest_target_id(&self) -> Option<&str> {
        self.frame.cursor_nearest_id.as_deref()
    }

    pub fn nearest_target_id(&self) -> Option<&str> {
        self.ctx.nearest_target_id.as_deref()
    }

    pub fn pointer_style(&self) -> PointerStyle {
        self.frame.pointer
    }

    pub fn last_view(&self) -> Option<ViewState> {
        self.frame.last_view
    }

    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.ctx.display_name(id)
    }

    /// Visible marker from the last frame whose center is within the snap
    /// distance of the point, ignoring marker shape.
    pub fn snap_marker(&self, x: f64, y: f64) -> Option<&ProjectedMarker> {
        self.hit_tester
            .find_closest(x, y, self.settings.cursor_snap_px)
    }

    // ---------------- Nearest target (once per load) ----------------

    fn recompute_nearest_target(&mut self) {
        self.ctx.nearest_target_id = nearest_geographic(&self.ctx);
    }

    // ---------------- Per-frame pass ----------------

    /// Runs once per displayed frame with the renderer-reported orientation.
    pub fn update(&mut self, view: ViewState, surface: &mut dyn DrawSurface) {
        self.frame.last_view = Some(view);
        let Some(cfg) = self.ctx.camera else {
            if !self.reported_missing_config {
                log::debug!("[nav] no camera config; skipping frame");
                self.reported_missing_config = true;
            }
            self.frame.markers.clear();
            self.frame.ground.clear();
            self.frame.cursor = None;
            self.frame.grid.clear();
            self.frame.hovered_id = None;
            self.frame.cursor_nearest_id = None;
            self.hit_tester.clear();
            let (w, h) = self.projector.size();
            surface.clear(w, h);
            self.refresh_pointer(surface);
            return;
        };
        let wv = WorldView::from_view(view, cfg.heading);

        // 1-4: projection
        let projection = self.project(wv);
        self.frame.markers = projection.markers;
        self.frame.ground = projection.ground;

        // 5: hover
        let drawn = self.drawn_markers(&self.frame.markers);
        self.hit_tester.set_markers(&drawn);
        let hovered = self
            .ctx
            .mouse
            .and_then(|p| self.pick(&self.hit_tester, p))
            .map(|m| m.id.clone());
        self.frame.hovered_id = hovered;
        self.refresh_pointer(surface);

        // 6: ground cursor
        let (cursor, nearest) = self.ground_cursor_for(wv);
        self.frame.cursor = cursor;
        self.frame.cursor_nearest_id = nearest;

        // 7: grid
        self.frame.grid = if self.ctx.grid_visible {
            self.project_grid(wv, &cfg)
        } else {
            Vec::new()
        };

        log::trace!(
            "[nav] frame markers={} grid={} hover={:?}",
            self.frame.markers.len(),
            self.frame.grid.len(),
            self.frame.hovered_id
        );

        // 8: draw
        let (width, height) = self.projector.size();
        let label = self
            .frame
            .hovered_id
            .as_deref()
            .and_then(|id| self.ctx.display_name(id));
        let scene = Scene {
            width,
            height,
            markers: &self.frame.markers,
            cursor: self.frame.cursor.as_ref(),
            grid: &self.frame.grid,
            show_nearby: self.ctx.nearby_preview,
            hovered_id: self.frame.hovered_id.as_deref(),
            cursor_nearest_id: self.frame.cursor_nearest_id.as_deref(),
            selected_id: self.ctx.selected_target_id.as_deref(),
            label,
        };
        self.renderer.draw(surface, &scene);
    }

    fn refresh_pointer(&mut self, surface: &mut dyn DrawSurface) {
        let style = if self.ctx.mode == InteractionMode::SetFromClick {
            PointerStyle::Crosshair
        } else if self.frame.hovered_id.is_some() {
            PointerStyle::Pointer
        } else {
            PointerStyle::Default
        };
        if style != self.frame.pointer {
            self.frame.pointer = style;
            surface.set_pointer_style(style);
        }
    }

    /// Markers at the size they were last drawn, so a hover-enlarged marker
    /// is hit over its whole enlarged ellipse.
    fn drawn_markers(&self, markers: &[ProjectedMarker]) -> Vec<ProjectedMarker> {
        markers
            .iter()
            .map(|m| ProjectedMarker {
                radius: m.radius * self.renderer.scale_of(&m.id),
                ..m.clone()
            })
            .collect()
    }

    /// Precise ellipse hit first, then a small center-distance snap.
    fn pick<'h>(&self, hit_tester: &'h HitTester, p: DVec2) -> Option<&'h ProjectedMarker> {
        hit_tester
            .test_point(p.x, p.y)
            .or_else(|| hit_tester.find_closest(p.x, p.y, self.settings.cursor_snap_px))
    }

    fn marker_for(
        &self,
        id: &str,
        world: glam::DVec3,
        kind: MarkerKind,
        wv: WorldView,
        fov_scale: f64,
        world_radius: f64,
    ) -> ProjectedMarker {
        let sp: ScreenPoint = self.projector.world_to_screen(world, wv.yaw, wv.pitch, wv.fov);
        let horizontal = DVec2::new(world.x, world.z).length();
        ProjectedMarker {
            id: id.to_string(),
            screen_x: sp.x,
            screen_y: sp.y,
            distance: sp.distance,
            radius: self.projector.marker_radius_px(world_radius, horizontal, wv.fov) * fov_scale,
            flatten_y: self.projector.flatten_ratio(horizontal, wv.pitch),
            visible: sp.visible,
            kind,
            hidden: false,
            is_next: false,
        }
    }

    fn project(&self, wv: WorldView) -> Projection {
        let mut out = Projection::default();
        let fov_scale = self.settings.fov_scale(wv.fov);
        if fov_scale <= 0.0 {
            return out;
        }

        for t in &self.ctx.targets {
            let world = match self.ctx.effective_override(t) {
                Some(o) => self.projector.override_world(&o),
                None => match self.projector.geo_world(t.lon, t.lat) {
                    Some(w) => w,
                    None => continue,
                },
            };
            let mut m = self.marker_for(
                &t.id,
                world,
                MarkerKind::Navigation,
                wv,
                fov_scale,
                self.settings.nav_marker_radius_m,
            );
            m.hidden = t.hidden;
            m.is_next = t.is_next;
            out.markers.push(m);
            out.ground.push(Some(DVec2::new(world.x, world.z)));
        }

        if self.ctx.nearby_preview {
            for n in &self.ctx.nearby {
                let Some(world) = self.projector.geo_world(n.lon, n.lat) else {
                    continue;
                };
                let m = self.marker_for(
                    &n.id,
                    world,
                    MarkerKind::Nearby,
                    wv,
                    fov_scale,
                    self.settings.nearby_marker_radius_m,
                );
                if m.visible {
                    out.markers.push(m);
                    out.ground.push(None);
                }
            }
        }
        out
    }

    fn ground_cursor_for(&self, wv: WorldView) -> (Option<GroundCursor>, Option<String>) {
        if self.frame.hovered_id.is_some() || self.settings.fov_scale(wv.fov) <= 0.0 {
            return (None, None);
        }
        let Some(mouse) = self.ctx.mouse else {
            return (None, None);
        };
        let Some(ground) = self
            .projector
            .screen_to_ground(mouse.x, mouse.y, wv.yaw, wv.pitch, wv.fov)
        else {
            return (None, None);
        };
        let distance = ground.length();

        // Recomputed every frame: the cursor moves independently of targets.
        let mut nearest: Option<(usize, f64)> = None;
        for (i, (m, g)) in self.frame.markers.iter().zip(&self.frame.ground).enumerate() {
            let Some(g) = g else { continue };
            if m.kind != MarkerKind::Navigation || !m.visible || m.hidden {
                continue;
            }
            let d = g.distance(ground);
            match nearest {
                Some((_, bd)) if d >= bd => {}
                _ => nearest = Some((i, d)),
            }
        }

        let nearest_marker = nearest.map(|(i, _)| &self.frame.markers[i]);
        let arrow_angle = nearest_marker
            .map(|t| (t.screen_x - mouse.x).atan2(-(t.screen_y - mouse.y)));
        let cursor = GroundCursor {
            screen_x: mouse.x,
            screen_y: mouse.y,
            flatten_y: self.projector.flatten_ratio(distance, wv.pitch),
            arrow_angle,
            distance,
            fov: wv.fov,
            radius: self.projector.marker_radius_px(CURSOR_RADIUS_M, distance, wv.fov),
        };
        (Some(cursor), nearest_marker.map(|m| m.id.clone()))
    }

    fn project_grid(&self, wv: WorldView, cfg: &CameraConfig) -> Vec<Vec<[f64; 2]>> {
        let mut lines = Vec::new();
        let radii: Vec<f64> = self
            .settings
            .grid_radii_m
            .iter()
            .map(|r| r * cfg.distance_scale)
            .collect();

        for r in &radii {
            let pts = (0..=GRID_RING_SEGMENTS).map(|i| {
                let bearing = i as f64 * 360.0 / GRID_RING_SEGMENTS as f64;
                self.projector
                    .project_ground(bearing_to_local(bearing, *r), wv.yaw, wv.pitch, wv.fov)
            });
            lines.extend(split_visible(pts));
        }

        if let (Some(r0), Some(r1)) = (radii.first(), radii.last()) {
            let count = self.settings.grid_bearing_count.max(1);
            for b in 0..count {
                let bearing = b as f64 * 360.0 / count as f64;
                let pts = (0..=GRID_RADIAL_STEPS).map(|i| {
                    let r = r0 + (r1 - r0) * i as f64 / GRID_RADIAL_STEPS as f64;
                    self.projector
                        .project_ground(bearing_to_local(bearing, r), wv.yaw, wv.pitch, wv.fov)
                });
                lines.extend(split_visible(pts));
            }
        }
        lines
    }

    // ---------------- Pointer events ----------------

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let p = DVec2::new(x, y);
        self.ctx.mouse = Some(p);
        let drag = &mut self.ctx.drag;
        if drag.down && drag.start.distance(p) > self.settings.click_tolerance_px {
            drag.dragging = true;
        }
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.ctx.drag = DragState {
            down: true,
            dragging: false,
            start: DVec2::new(x, y),
        };
    }

    /// Ends a press; a press that did not travel is a click.
    pub fn pointer_up(&mut self, x: f64, y: f64, view: ViewState) -> ClickOutcome {
        let drag = std::mem::take(&mut self.ctx.drag);
        let p = DVec2::new(x, y);
        if !drag.down
            || drag.dragging
            || drag.start.distance(p) > self.settings.click_tolerance_px
        {
            return ClickOutcome::Ignored;
        }
        self.handle_click(x, y, view)
    }

    pub fn pointer_leave(&mut self) {
        self.ctx.mouse = None;
        self.ctx.drag = DragState::default();
    }

    /// Dispatches a click using the orientation at the moment of the click.
    pub fn handle_click(&mut self, x: f64, y: f64, view: ViewState) -> ClickOutcome {
        let Some(cfg) = self.ctx.camera else {
            log::debug!("[nav] click ignored: no camera config");
            return ClickOutcome::Ignored;
        };
        let wv = WorldView::from_view(view, cfg.heading);
        let p = DVec2::new(x, y);

        let (hit, hit_id) = if self.ctx.mode == InteractionMode::SetFromClick {
            (HitKind::Nothing, None)
        } else {
            let mut click_tester = HitTester::new();
            click_tester.set_markers(&self.drawn_markers(&self.project(wv).markers));
            match self.pick(&click_tester, p) {
                Some(m) => {
                    let kind = match m.kind {
                        MarkerKind::Navigation => HitKind::Navigation {
                            selected: self.ctx.selected_target_id.as_deref() == Some(m.id.as_str()),
                        },
                        MarkerKind::Nearby => HitKind::Nearby,
                    };
                    (kind, Some(m.id.clone()))
                }
                None => (HitKind::Nothing, None),
            }
        };

        let outcome = match route_click(self.ctx.mode, hit, self.ctx.nearby_preview) {
            Route::ProposeOverride => {
                self.set_mode(InteractionMode::Normal);
                let target = self.ctx.selected_target_id.clone();
                let ground = self
                    .projector
                    .screen_to_ground(x, y, wv.yaw, wv.pitch, wv.fov);
                match (target, ground) {
                    (Some(target_id), Some(g)) => {
                        let (bearing_deg, ground_distance_m) = local_to_bearing(g);
                        let proposal = OverrideProposal {
                            bearing_deg,
                            ground_distance_m,
                        };
                        (self.callbacks.on_set_from_click)(&target_id, proposal);
                        ClickOutcome::ProposeOverride {
                            target_id,
                            proposal,
                        }
                    }
                    (None, _) => {
                        log::debug!("[nav] set-from-click without a selected target");
                        ClickOutcome::Ignored
                    }
                    (Some(_), None) => {
                        log::debug!("[nav] set-from-click missed the ground plane");
                        ClickOutcome::Ignored
                    }
                }
            }
            Route::Navigate => {
                let id = hit_id.unwrap_or_default();
                (self.callbacks.on_navigate)(&id);
                ClickOutcome::Navigate(id)
            }
            Route::SelectTarget => {
                let id = hit_id.unwrap_or_default();
                (self.callbacks.on_target_select)(&id);
                ClickOutcome::SelectTarget(id)
            }
            Route::SelectNearby => {
                let id = hit_id.unwrap_or_default();
                match self.on_nearby_click.as_mut() {
                    Some(cb) => cb(&id),
                    None => log::debug!("[nav] nearby click without a handler"),
                }
                ClickOutcome::SelectNearby(id)
            }
            Route::Ignore => ClickOutcome::Ignored,
        };
        if outcome != ClickOutcome::Ignored {
            log::info!("[click] {:?}", outcome);
        }
        outcome
    }
}

/// Geographic nearest non-hidden target to the camera.
fn nearest_geographic(ctx: &NavigatorContext) -> Option<String> {
    let cfg = ctx.camera?;
    let mut best: Option<(&Target, f64)> = None;
    for t in ctx.targets.iter().filter(|t| !t.hidden) {
        let d = geo_to_local_meters(t.lon, t.lat, cfg.lon, cfg.lat).length();
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((t, d)),
        }
    }
    best.map(|(t, _)| t.id.clone())
}

/// Split a projected polyline wherever a point drops out of view.
fn split_visible(points: impl Iterator<Item = ScreenPoint>) -> SmallVec<[Vec<[f64; 2]>; 4]> {
    let mut segments = SmallVec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    for p in points {
        if p.visible {
            current.push([p.x, p.y]);
        } else if !current.is_empty() {
            if current.len() >= 2 {
                segments.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        }
    }
    if current.len() >= 2 {
        segments.push(current);
    }
    segments
}
