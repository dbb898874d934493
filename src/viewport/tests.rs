use glam::{DMat4, DVec3, Mat4, Vec2, Vec3};

use super::*;
use crate::camera::perspective;
use crate::engine::null::NullEngineFactory;
use crate::gizmo::{Operation, Space};
use crate::input::MouseButton;
use crate::scene::{
    CameraProjection, CameraSchema, Extent, MemoryScene, Prim, XformOverlay,
};
use crate::test_support::{
    RecordingDrawList, RecordingFactory, RecordingPresenter, ScriptedGizmo,
};
use crate::ui::ViewportRegion;

fn cam1_schema() -> CameraSchema {
    let vertical = 2.0 * 50.0 * 25.0_f32.to_radians().tan();
    CameraSchema {
        projection: Some(CameraProjection::Perspective),
        horizontal_aperture: Some(vertical * 4.0 / 3.0),
        vertical_aperture: Some(vertical),
        horizontal_aperture_offset: Some(0.0),
        vertical_aperture_offset: Some(0.0),
        focal_length: Some(50.0),
        clipping_range: Some([0.1, 1000.0]),
    }
}

fn scene() -> MemoryScene {
    let mut scene = MemoryScene::new();
    let _ = scene.insert(
        "/World/Cam1",
        Prim::camera(
            DMat4::from_translation(DVec3::new(0.0, 0.0, 10.0)),
            cam1_schema(),
        ),
    );
    let _ = scene.insert(
        "/World/Sphere",
        Prim::mesh(DMat4::IDENTITY, Extent::new(DVec3::NEG_ONE, DVec3::ONE)),
    );
    scene
}

fn rect(width: f32, height: f32) -> Rect {
    Rect::from_min_size(Vec2::new(10.0, 20.0), Vec2::new(width, height))
}

struct Harness {
    stage: XformOverlay<MemoryScene>,
    model: SelectionModel,
    draw: RecordingDrawList,
    gizmo: ScriptedGizmo,
    presenter: RecordingPresenter,
}

impl Harness {
    fn new() -> Self {
        Self {
            stage: XformOverlay::new(scene()),
            model: SelectionModel::new(),
            draw: RecordingDrawList::default(),
            gizmo: ScriptedGizmo::default(),
            presenter: RecordingPresenter::default(),
        }
    }

    fn frame(&mut self, viewport: &mut Viewport, rect: Rect, focused: bool) -> FrameReport {
        let mut host = FrameHost {
            region: ViewportRegion { rect, focused },
            draw: &mut self.draw,
            gizmo: &mut self.gizmo,
            stage: &mut self.stage,
            model: &mut self.model,
            presenter: &mut self.presenter,
        };
        viewport.render_frame(&mut host)
    }

    fn run(&mut self, viewport: &mut Viewport, cmd: ViewportCommand) {
        viewport.execute(cmd, &mut self.stage, &mut self.model);
    }

    fn input(&mut self, viewport: &mut Viewport, event: InputEvent) -> bool {
        viewport.handle_input(event, &mut self.stage, &mut self.model)
    }

    fn click(&mut self, viewport: &mut Viewport, x: f32, y: f32) {
        let _ = self.input(viewport, InputEvent::CursorMoved { x, y });
        for pressed in [true, false] {
            let _ = self.input(
                viewport,
                InputEvent::MouseButton {
                    button: MouseButton::Left,
                    pressed,
                },
            );
        }
    }
}

fn recording_viewport(plugins: &[&str]) -> (Viewport, crate::test_support::EventLog) {
    let factory = RecordingFactory::new(plugins);
    let log = factory.log();
    let viewport = Viewport::new(ViewportId(1), "Viewport 1", Options::default(), Box::new(factory));
    (viewport, log)
}

fn null_viewport() -> Viewport {
    Viewport::new(
        ViewportId(2),
        "Viewport 2",
        Options::default(),
        Box::new(NullEngineFactory::default()),
    )
}

#[test]
fn zero_area_region_skips_whole_frame() {
    let (mut viewport, log) = recording_viewport(&["Storm"]);
    let mut h = Harness::new();

    let report = h.frame(&mut viewport, rect(0.0, 300.0), false);

    assert_eq!(report, FrameReport::skipped());
    assert!(h.gizmo.frames.is_empty());
    assert_eq!(log.borrow().as_slice(), ["create Storm"]);
    assert!(h.presenter.created.is_empty());
}

#[test]
fn frame_drives_engine_then_presents() {
    let (mut viewport, log) = recording_viewport(&["Storm"]);
    let mut h = Harness::new();
    h.model.set_selection(vec![PrimPath::from("/World/Sphere")]);

    let report = h.frame(&mut viewport, rect(640.0, 480.0), true);

    assert_eq!(
        log.borrow().as_slice(),
        ["create Storm", "selection 1", "size 640x480", "matrices", "prepare", "render"]
    );
    let texture = report.texture.unwrap();
    assert_eq!(h.presenter.created, vec![(texture, 640, 480)]);
    assert_eq!(
        h.draw.images,
        vec![(
            texture,
            Vec2::new(10.0, 20.0),
            Vec2::new(650.0, 500.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 0.0)
        )]
    );
    assert_eq!(h.gizmo.frames, vec![(1, rect(640.0, 480.0))]);
    assert_eq!(h.gizmo.grids, vec![10.0]);
}

#[test]
fn same_size_frames_update_texture_in_place() {
    let (mut viewport, _log) = recording_viewport(&["Storm"]);
    let mut h = Harness::new();

    let first = h.frame(&mut viewport, rect(320.0, 240.0), true).texture;
    let second = h.frame(&mut viewport, rect(320.0, 240.0), true).texture;
    let resized = h.frame(&mut viewport, rect(400.0, 240.0), true).texture;

    assert_eq!(first, second);
    assert_ne!(first, resized);
    assert_eq!(h.presenter.created.len(), 2);
    assert_eq!(h.presenter.updated.len(), 1);
    assert_eq!(h.presenter.removed, vec![first.unwrap()]);
}

#[test]
fn renderer_label_sits_top_right() {
    let (mut viewport, _log) = recording_viewport(&["Storm"]);
    let mut h = Harness::new();
    let _ = h.frame(&mut viewport, rect(640.0, 480.0), true);

    // "Storm" is 40px wide with the fake font.
    let pos = Vec2::new(650.0 - 64.0 - 20.0, 20.0 + 12.0);
    assert_eq!(h.draw.texts, vec![(pos, "Storm".to_owned())]);
    assert_eq!(
        h.draw.rects,
        vec![(pos - Vec2::splat(6.0), pos + Vec2::new(46.0, 19.0), [0.0, 0.0, 0.0, 0.2])]
    );
}

#[test]
fn bound_camera_sets_projection_and_focus_frames_selection() {
    let (mut viewport, _log) = recording_viewport(&["Storm"]);
    let mut h = Harness::new();
    let cam1 = PrimPath::from("/World/Cam1");

    h.run(&mut viewport, ViewportCommand::SetActiveCamera(cam1.clone()));
    assert_eq!(h.model.active_camera(), Some(&cam1));
    assert_eq!(viewport.camera().eye, DVec3::new(0.0, 0.0, 10.0));

    let _ = h.frame(&mut viewport, rect(800.0, 600.0), false);
    let expected = perspective(50.0, 800.0 / 600.0, 0.1, 1000.0);
    assert!(viewport.camera().projection.abs_diff_eq(expected, 1e-4));
    assert_eq!(h.stage.write_count(), 0);

    h.model.set_selection(vec![PrimPath::from("/World/Sphere")]);
    h.run(&mut viewport, ViewportCommand::FocusSelection);

    let cam = viewport.camera();
    assert_eq!(cam.at, DVec3::ZERO);
    assert!(cam.eye.abs_diff_eq(DVec3::new(0.0, 0.0, 2.0 * 12.0_f64.sqrt()), 1e-9));
    assert_eq!(h.stage.write_count(), 1);

    // No camera motion since the focus push: nothing more to write.
    h.run(&mut viewport, ViewportCommand::Zoom { delta: 0.0 });
    let _ = h.frame(&mut viewport, rect(800.0, 600.0), true);
    assert_eq!(h.stage.write_count(), 1);
}

#[test]
fn focus_without_extent_is_skipped() {
    let (mut viewport, _log) = recording_viewport(&["Storm"]);
    let mut h = Harness::new();
    let before = viewport.camera().clone();

    h.model.set_selection(vec![PrimPath::from("/World/Cam1")]);
    h.run(&mut viewport, ViewportCommand::FocusSelection);
    assert_eq!(viewport.camera(), &before);
}

#[test]
fn gizmo_edit_is_written_back_once() {
    let (mut viewport, _log) = recording_viewport(&["Storm"]);
    let mut h = Harness::new();
    let sphere = PrimPath::from("/World/Sphere");
    h.model.set_selection(vec![sphere.clone()]);

    h.gizmo.translate = Some(Vec3::X);
    let first = h.frame(&mut viewport, rect(640.0, 480.0), true);
    assert!(first.transform_written);
    assert_eq!(h.stage.write_count(), 1);
    assert_eq!(h.stage.xform(&sphere), Some(DMat4::from_translation(DVec3::X)));

    let second = h.frame(&mut viewport, rect(640.0, 480.0), true);
    assert!(!second.transform_written);
    assert_eq!(h.stage.write_count(), 1);
    assert_eq!(h.gizmo.manipulate_calls, 2);
}

#[test]
fn gizmo_uses_current_tool() {
    let (mut viewport, _log) = recording_viewport(&["Storm"]);
    let mut h = Harness::new();
    h.model.set_selection(vec![PrimPath::from("/World/Sphere")]);

    assert!(viewport.handle_key("KeyE", &mut h.stage, &mut h.model));
    let _ = h.frame(&mut viewport, rect(640.0, 480.0), true);
    assert_eq!(h.gizmo.last_tool, Some(ToolMode::new(Operation::Rotate, Space::Local)));

    let world_scale = ToolMode::new(Operation::Scale, Space::World);
    h.run(&mut viewport, ViewportCommand::SetTool(world_scale));
    let _ = h.frame(&mut viewport, rect(640.0, 480.0), true);
    assert_eq!(h.gizmo.last_tool, Some(world_scale));
}

#[test]
fn no_selection_means_no_transform_gizmo() {
    let (mut viewport, _log) = recording_viewport(&["Storm"]);
    let mut h = Harness::new();
    let _ = h.frame(&mut viewport, rect(640.0, 480.0), true);
    assert_eq!(h.gizmo.manipulate_calls, 0);
}

#[test]
fn view_cube_rotates_camera_and_pushes_to_bound_camera() {
    let (mut viewport, _log) = recording_viewport(&["Storm"]);
    let mut h = Harness::new();
    h.run(&mut viewport, ViewportCommand::SetActiveCamera(PrimPath::from("/World/Cam1")));

    h.gizmo.next_view = Some(Mat4::look_at_rh(Vec3::new(8.0, 0.0, 0.0), Vec3::ZERO, Vec3::Y));
    let report = h.frame(&mut viewport, rect(640.0, 480.0), true);

    assert!(report.view_changed);
    assert!(report.camera_pushed);
    assert_eq!(h.stage.write_count(), 1);
    let cam = viewport.camera();
    assert!(cam.eye.abs_diff_eq(DVec3::new(8.0, 0.0, 0.0), 1e-4));
    assert!(cam.forward().abs_diff_eq(DVec3::NEG_X, 1e-4));
}

#[test]
fn unfocused_viewport_follows_shared_camera() {
    let (mut writer, _) = recording_viewport(&["Storm"]);
    let (mut observer, _) = recording_viewport(&["Storm"]);
    let mut h = Harness::new();
    let cam1 = PrimPath::from("/World/Cam1");
    h.run(&mut writer, ViewportCommand::SetActiveCamera(cam1.clone()));
    h.run(&mut observer, ViewportCommand::SetActiveCamera(cam1));

    h.run(&mut writer, ViewportCommand::Orbit { delta: Vec2::new(60.0, 0.0) });
    assert_eq!(h.stage.write_count(), 1);

    let focused = h.frame(&mut observer, rect(640.0, 480.0), true);
    assert!(!focused.pulled_camera);
    let unfocused = h.frame(&mut observer, rect(640.0, 480.0), false);
    assert!(unfocused.pulled_camera);
    assert!(observer.camera().eye.abs_diff_eq(writer.camera().eye, 1e-9));
}

#[test]
fn free_camera_never_writes() {
    let (mut viewport, _log) = recording_viewport(&["Storm"]);
    let mut h = Harness::new();
    h.run(&mut viewport, ViewportCommand::Orbit { delta: Vec2::new(10.0, 5.0) });
    h.run(&mut viewport, ViewportCommand::Pan { delta: Vec2::new(3.0, 4.0) });
    h.run(&mut viewport, ViewportCommand::Zoom { delta: 2.0 });
    let report = h.frame(&mut viewport, rect(640.0, 480.0), false);
    assert!(!report.pulled_camera);
    assert_eq!(h.stage.write_count(), 0);
    assert!(h.model.active_camera().is_none());
}

#[test]
fn click_picks_and_empty_click_clears() {
    let mut viewport = null_viewport();
    let mut h = Harness::new();
    let region = Rect::from_min_size(Vec2::ZERO, Vec2::new(200.0, 200.0));
    let _ = h.frame(&mut viewport, region, true);

    h.click(&mut viewport, 100.0, 100.0);
    assert_eq!(h.model.selection(), &[PrimPath::from("/World/Sphere")]);
    assert!(h.model.hit().is_some());

    h.click(&mut viewport, 1.0, 1.0);
    assert!(h.model.selection().is_empty());
}

#[test]
fn drag_release_does_not_pick() {
    let mut viewport = null_viewport();
    let mut h = Harness::new();
    let region = Rect::from_min_size(Vec2::ZERO, Vec2::new(200.0, 200.0));
    let _ = h.frame(&mut viewport, region, true);
    h.model.set_selection(vec![PrimPath::from("/World/Cam1")]);

    let _ = h.input(&mut viewport, InputEvent::CursorMoved { x: 100.0, y: 100.0 });
    let _ = h.input(&mut viewport, InputEvent::MouseButton { button: MouseButton::Left, pressed: true });
    let _ = h.input(&mut viewport, InputEvent::CursorMoved { x: 140.0, y: 100.0 });
    let _ = h.input(&mut viewport, InputEvent::MouseButton { button: MouseButton::Left, pressed: false });

    assert_eq!(h.model.selection(), &[PrimPath::from("/World/Cam1")]);
}

#[test]
fn switching_renderer_tears_down_old_engine_first() {
    let (mut viewport, log) = recording_viewport(&["Storm", "Embree"]);
    let mut h = Harness::new();

    h.run(&mut viewport, ViewportCommand::SwitchRenderer(PluginId::from("Embree")));
    assert_eq!(
        log.borrow().as_slice(),
        ["create Storm", "drop Storm", "create Embree"]
    );

    let entries = viewport.available_renderers();
    assert!(!entries[0].current);
    assert!(entries[1].current);

    let _ = h.frame(&mut viewport, rect(640.0, 480.0), true);
    assert_eq!(h.draw.texts.last().map(|(_, text)| text.as_str()), Some("Embree"));
}

#[test]
fn unknown_renderer_is_an_error() {
    let (mut viewport, _log) = recording_viewport(&["Storm"]);
    assert!(matches!(
        viewport.switch_renderer(&PluginId::from("Cycles")),
        Err(ViewportError::UnknownPlugin(_))
    ));
    assert_eq!(viewport.engine().plugin(), Some(&PluginId::from("Storm")));
}

#[test]
fn frame_without_engine_still_runs_gizmos() {
    let (mut viewport, _log) = recording_viewport(&[]);
    let mut h = Harness::new();
    h.model.set_selection(vec![PrimPath::from("/World/Sphere")]);

    let report = h.frame(&mut viewport, rect(640.0, 480.0), true);
    assert!(report.texture.is_none());
    assert!(h.draw.images.is_empty());
    assert!(h.draw.texts.is_empty());
    assert_eq!(h.gizmo.manipulate_calls, 1);
}

#[test]
fn engine_without_output_skips_presentation_only() {
    let factory = RecordingFactory::new(&["Storm"]).without_output();
    let log = factory.log();
    let mut viewport = Viewport::new(ViewportId(1), "Viewport 1", Options::default(), Box::new(factory));
    let mut h = Harness::new();
    h.model.set_selection(vec![PrimPath::from("/World/Sphere")]);
    h.gizmo.translate = Some(Vec3::Y);

    let report = h.frame(&mut viewport, rect(640.0, 480.0), true);

    assert!(log.borrow().iter().any(|event| event == "render"));
    assert!(report.texture.is_none());
    assert!(h.presenter.created.is_empty());
    assert!(h.draw.images.is_empty());
    assert!(report.transform_written);
    assert_eq!(h.gizmo.grids, vec![10.0]);
    assert_eq!(h.draw.texts.last().map(|(_, text)| text.as_str()), Some("Storm"));
}

#[test]
fn camera_menu_lists_free_camera_then_prims() {
    let (mut viewport, _log) = recording_viewport(&["Storm"]);
    let mut h = Harness::new();

    let menu = viewport.camera_menu(&h.stage);
    assert_eq!(menu.len(), 2);
    assert_eq!(menu[0].name, "free camera");
    assert!(menu[0].current);
    assert_eq!(menu[1].name, "Cam1");

    h.run(&mut viewport, ViewportCommand::SetActiveCamera(PrimPath::from("/World/Cam1")));
    let menu = viewport.camera_menu(&h.stage);
    assert!(!menu[0].current);
    assert!(menu[1].current);

    h.run(&mut viewport, ViewportCommand::SetFreeCamera);
    assert_eq!(viewport.binding(), &CameraBinding::Free);
    assert!(h.model.active_camera().is_none());
}

#[test]
fn grid_toggles_from_keyboard() {
    let (mut viewport, _log) = recording_viewport(&["Storm"]);
    let mut h = Harness::new();
    assert!(viewport.handle_key("KeyG", &mut h.stage, &mut h.model));
    assert!(!viewport.options().display.show_grid);

    let _ = h.frame(&mut viewport, rect(640.0, 480.0), true);
    assert!(h.gizmo.grids.is_empty());
}

#[test]
fn destroy_returns_display_texture() {
    let (mut viewport, _log) = recording_viewport(&["Storm"]);
    let mut h = Harness::new();
    let texture = h.frame(&mut viewport, rect(64.0, 64.0), true).texture.unwrap();

    viewport.destroy(&mut h.presenter);
    assert_eq!(h.presenter.removed, vec![texture]);
}
