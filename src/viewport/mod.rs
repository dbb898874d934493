//! The viewport: one window's camera, input, render engine, and gizmos,
//! sequenced once per UI redraw.
//!
//! # Frame sequence
//!
//! [`Viewport::render_frame`] runs, in order:
//!
//! 1. skip when the region has no area
//! 2. pull the bound camera when the window is not focused
//! 3. projection from the bound camera or free-camera defaults
//! 4. grid overlay
//! 5. engine submit, prepare, render; readback; present
//! 6. transform gizmo, then view cube
//! 7. backend name label
//!
//! A missing prim, engine, or output buffer skips only the stage that
//! needed it.

mod command;
mod frame;
#[cfg(test)]
mod tests;

use glam::{DMat4, DVec3, Mat4, Vec2};

pub use command::ViewportCommand;
pub use frame::{FrameHost, FrameReport};

use crate::camera::{AuthoredCamera, CameraController, CameraState};
use crate::engine::{EngineFactory, EngineSlot, PluginId, RendererEntry};
use crate::error::ViewportError;
use crate::gizmo::{self, ToolMode, ViewCubePlacement};
use crate::gpu::{FrameResources, Presenter};
use crate::input::{InputEvent, InputProcessor};
use crate::options::Options;
use crate::picking::{self, PickOutcome};
use crate::scene::{
    pull_active_camera_to_viewport, push_viewport_to_active_camera,
    read_camera, read_extent, CameraBinding, EditableLayer, PrimPath,
    SceneGraph,
};
use crate::selection::SelectionModel;
use crate::ui::{DrawList, Rect, TextureId};

/// Padding around the backend label, in pixels.
const LABEL_MARGIN: f32 = 6.0;
/// Distance from the right edge to the label's center, in pixels.
const LABEL_RIGHT_INSET: f32 = 64.0;
const LABEL_BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 0.2];
const LABEL_TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Identity of a viewport among several sharing one host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewportId(pub u64);

/// Menu entry for one camera choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraEntry {
    /// Camera prim, or `None` for the free camera.
    pub path: Option<PrimPath>,
    /// Menu label.
    pub name: String,
    /// Whether the viewport is looking through this camera.
    pub current: bool,
}

/// A single interactive 3D viewport.
///
/// Owns its camera, input state, render engine, and readback/display
/// resources. The scene layer, selection model, and host UI services are
/// lent to it per call.
pub struct Viewport {
    id: ViewportId,
    label: String,
    options: Options,
    camera: CameraController,
    binding: CameraBinding,
    tool: ToolMode,
    input: InputProcessor,
    engine: EngineSlot,
    resources: FrameResources,
}

impl Viewport {
    /// Create a viewport with a free camera placed by `options` and an
    /// engine for the factory's default plugin.
    pub fn new(
        id: ViewportId,
        label: impl Into<String>,
        options: Options,
        factory: Box<dyn EngineFactory>,
    ) -> Self {
        let cam = &options.camera;
        let mut state = CameraState::new(
            DVec3::from_array(cam.eye),
            DVec3::from_array(cam.target),
            DVec3::from_array(cam.up),
        );
        state.projection = AuthoredCamera::free(cam).projection_matrix(state.aspect);

        let label = label.into();
        log::info!("viewport {label} created");
        Self {
            id,
            label,
            camera: CameraController::new(state, options.navigation.clone()),
            binding: CameraBinding::Free,
            tool: ToolMode::default(),
            input: InputProcessor::new(&options.navigation, options.keybindings.clone()),
            engine: EngineSlot::new(factory),
            resources: FrameResources::new(),
            options,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Viewport identity.
    #[must_use]
    pub fn id(&self) -> ViewportId {
        self.id
    }

    /// Window label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Options in use.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the options. Navigation and key bindings apply immediately.
    pub fn set_options(&mut self, options: Options) {
        self.camera.set_navigation(options.navigation.clone());
        self.input = InputProcessor::new(&options.navigation, options.keybindings.clone());
        self.options = options;
    }

    /// Camera state.
    #[must_use]
    pub fn camera(&self) -> &CameraState {
        &self.camera.state
    }

    /// Camera state, for hosts that place the camera directly.
    pub fn camera_mut(&mut self) -> &mut CameraState {
        &mut self.camera.state
    }

    /// Free or bound camera.
    #[must_use]
    pub fn binding(&self) -> &CameraBinding {
        &self.binding
    }

    /// Transform gizmo mode.
    #[must_use]
    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    /// Input processor, e.g. for rebinding keys.
    pub fn input_mut(&mut self) -> &mut InputProcessor {
        &mut self.input
    }

    /// Render engine slot.
    #[must_use]
    pub fn engine(&self) -> &EngineSlot {
        &self.engine
    }

    /// Readback and display resources.
    #[must_use]
    pub fn resources(&self) -> &FrameResources {
        &self.resources
    }

    // ── Input ───────────────────────────────────────────────────────

    /// Route a raw input event. Returns whether it produced a command.
    pub fn handle_input<L: EditableLayer>(
        &mut self,
        event: InputEvent,
        stage: &mut L,
        model: &mut SelectionModel,
    ) -> bool {
        let Some(cmd) = self.input.handle_event(event) else {
            return false;
        };
        self.execute(cmd, stage, model);
        true
    }

    /// Route a key press. Returns whether the key is bound.
    pub fn handle_key<L: EditableLayer>(
        &mut self,
        key: &str,
        stage: &mut L,
        model: &mut SelectionModel,
    ) -> bool {
        let Some(cmd) = self.input.handle_key_press(key) else {
            return false;
        };
        self.execute(cmd, stage, model);
        true
    }

    /// Perform `cmd`. Camera motion is pushed to the bound camera.
    pub fn execute<L: EditableLayer>(
        &mut self,
        cmd: ViewportCommand,
        stage: &mut L,
        model: &mut SelectionModel,
    ) {
        match cmd {
            ViewportCommand::Orbit { delta } => {
                self.camera.orbit(delta);
                let _ = self.push(stage);
            }
            ViewportCommand::Pan { delta } => {
                self.camera.pan(delta);
                let _ = self.push(stage);
            }
            ViewportCommand::Zoom { delta } => {
                self.camera.zoom(f64::from(delta));
                let _ = self.push(stage);
            }
            ViewportCommand::FocusSelection => {
                if self.focus_selection(&*stage, model) {
                    let _ = self.push(stage);
                }
            }
            ViewportCommand::Pick { point } => {
                let _ = self.pick(point, model);
            }
            ViewportCommand::SetTool(tool) => self.tool = tool,
            ViewportCommand::ToggleGrid => {
                self.options.display.show_grid = !self.options.display.show_grid;
            }
            ViewportCommand::SetActiveCamera(path) => {
                self.set_active_camera(path, &*stage, model);
            }
            ViewportCommand::SetFreeCamera => self.set_free_camera(model),
            ViewportCommand::SwitchRenderer(plugin) => {
                if let Err(e) = self.switch_renderer(&plugin) {
                    log::warn!("{e}");
                }
            }
        }
    }

    // ── Camera binding ──────────────────────────────────────────────

    /// Look through the camera prim at `path` and pull its placement.
    ///
    /// An empty path selects the free camera.
    pub fn set_active_camera<S: SceneGraph + ?Sized>(
        &mut self,
        path: PrimPath,
        scene: &S,
        model: &mut SelectionModel,
    ) {
        self.binding = CameraBinding::from_path(path);
        if self.binding.is_bound() {
            let _ = self.pull(scene, model);
        } else {
            model.set_active_camera(None);
        }
    }

    /// Detach from the bound camera prim.
    pub fn set_free_camera(&mut self, model: &mut SelectionModel) {
        self.binding = CameraBinding::Free;
        model.set_active_camera(None);
    }

    /// The free camera followed by every camera prim in `scene`.
    #[must_use]
    pub fn camera_menu<S: SceneGraph + ?Sized>(&self, scene: &S) -> Vec<CameraEntry> {
        let bound = self.binding.path();
        let free = CameraEntry {
            path: None,
            name: "free camera".into(),
            current: bound.is_none(),
        };
        std::iter::once(free)
            .chain(scene.camera_paths().into_iter().map(|path| CameraEntry {
                name: path.name().to_owned(),
                current: bound == Some(&path),
                path: Some(path),
            }))
            .collect()
    }

    // ── Backend ─────────────────────────────────────────────────────

    /// Replace the render engine. The old engine is torn down first.
    pub fn switch_renderer(&mut self, plugin: &PluginId) -> Result<(), ViewportError> {
        self.engine.bind(plugin)?;
        self.resources.release_gpu();
        Ok(())
    }

    /// Backends offered by the engine factory.
    #[must_use]
    pub fn available_renderers(&self) -> Vec<RendererEntry> {
        self.engine.renderers()
    }

    // ── Frame ───────────────────────────────────────────────────────

    /// Run one frame.
    pub fn render_frame<L: EditableLayer>(
        &mut self,
        host: &mut FrameHost<'_, L>,
    ) -> FrameReport {
        let rect = host.region.rect;
        let Some((width, height)) = rect.pixel_size() else {
            log::trace!("viewport {} has no area; skipping frame", self.label);
            return FrameReport::skipped();
        };

        let mut report = FrameReport::default();
        host.gizmo.begin_frame(self.id.0, rect);

        // Another viewport may have moved the shared camera.
        if !host.region.focused {
            report.pulled_camera = self.pull(&*host.stage, host.model);
        }

        self.update_projection(&*host.stage, width, height);
        let view = self.camera.state.view_matrix();

        if self.options.display.show_grid {
            host.gizmo.draw_grid(
                view.as_mat4(),
                self.camera.state.projection.as_mat4(),
                Mat4::IDENTITY,
                self.options.display.grid_size,
            );
        }

        report.texture = self.render_and_present(host, width, height, view);
        if let Some(texture) = report.texture {
            host.draw.add_image(
                texture,
                rect.min,
                rect.max,
                Vec2::new(0.0, 1.0),
                Vec2::new(1.0, 0.0),
            );
        }

        report.transform_written = self.update_transform_gizmo(host, &view);
        if let Some(pushed) = self.update_view_cube(host, &view) {
            report.view_changed = true;
            report.camera_pushed = pushed;
        }

        self.draw_plugin_label(host.draw, &rect);
        report
    }

    /// Free the display texture and readback buffers.
    pub fn destroy(mut self, presenter: &mut dyn Presenter) {
        log::info!("viewport {} destroyed", self.label);
        self.resources.release(presenter);
    }

    // ── Stages ──────────────────────────────────────────────────────

    fn push<L: EditableLayer + ?Sized>(&self, stage: &mut L) -> bool {
        push_viewport_to_active_camera(&self.binding, &self.camera.state, stage)
    }

    fn pull<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &S,
        model: &mut SelectionModel,
    ) -> bool {
        let pulled = pull_active_camera_to_viewport(
            &self.binding,
            scene,
            &mut self.camera.state,
            self.options.camera.view_distance,
        );
        if pulled {
            model.set_active_camera(self.binding.path().cloned());
        }
        pulled
    }

    fn focus_selection<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &S,
        model: &SelectionModel,
    ) -> bool {
        let Some(path) = model.primary() else {
            return false;
        };
        let Some(extent) = read_extent(scene, path) else {
            log::warn!("prim at {path} has no extent; skipping focus");
            return false;
        };
        self.camera.focus_on(&extent);
        true
    }

    fn pick(&mut self, point: Vec2, model: &mut SelectionModel) -> Option<PickOutcome> {
        let Some(engine) = self.engine.engine_mut() else {
            log::debug!("no render engine; ignoring pick");
            return None;
        };
        Some(picking::pick(engine, point, model))
    }

    fn update_projection<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &S,
        width: u32,
        height: u32,
    ) {
        let aspect = f64::from(width) / f64::from(height);
        let camera = match self.binding.path() {
            Some(path) => read_camera(scene, path, &self.options.camera),
            None => AuthoredCamera::free(&self.options.camera),
        };
        self.camera.state.aspect = aspect;
        self.camera.state.projection = camera.projection_matrix(aspect);
    }

    fn render_and_present<L: EditableLayer>(
        &mut self,
        host: &mut FrameHost<'_, L>,
        width: u32,
        height: u32,
        view: DMat4,
    ) -> Option<TextureId> {
        let Some(engine) = self.engine.engine_mut() else {
            log::debug!("no render engine; skipping render");
            return None;
        };
        engine.set_selection(host.model.selection());
        engine.set_render_size(width, height);
        engine.set_camera_matrices(view, self.camera.state.projection);
        engine.prepare(&*host.stage);
        engine.render();

        let Some(output) = engine.color_output() else {
            log::debug!("{} produced no color output", engine.plugin());
            return None;
        };
        self.resources
            .present_output(host.presenter, output)
            .map_err(|e| log::warn!("presentation skipped: {e}"))
            .ok()
    }

    fn update_transform_gizmo<L: EditableLayer>(
        &self,
        host: &mut FrameHost<'_, L>,
        view: &DMat4,
    ) -> bool {
        let Some(path) = host.model.primary().cloned() else {
            return false;
        };
        let Some(xform) = host.stage.xform(&path) else {
            log::debug!("prim at {path} has no transform; no gizmo");
            return false;
        };
        let edited = gizmo::manipulate_transform(
            host.gizmo,
            view,
            &self.camera.state.projection,
            self.tool,
            &xform,
        );
        let Some(new_xform) = edited else {
            return false;
        };
        host.stage.set_xform(&path, new_xform);
        true
    }

    /// Returns `Some(pushed)` when the view cube moved the camera.
    fn update_view_cube<L: EditableLayer>(
        &mut self,
        host: &mut FrameHost<'_, L>,
        view: &DMat4,
    ) -> Option<bool> {
        let placement = ViewCubePlacement::for_rect(&host.region.rect, &self.options.display);
        let new_view = gizmo::manipulate_view_cube(host.gizmo, view, &placement)?;
        self.camera.state.set_from_camera_to_world(
            &new_view.inverse(),
            self.options.camera.view_distance,
        );
        Some(self.push(host.stage))
    }

    fn draw_plugin_label(&self, draw: &mut dyn DrawList, rect: &Rect) {
        if !self.options.display.show_renderer_label {
            return;
        }
        let Some(engine) = self.engine.engine() else {
            return;
        };
        let text = engine.display_name();
        let size = draw.calc_text_size(&text);
        let pos = Vec2::new(
            rect.max.x - LABEL_RIGHT_INSET - size.x / 2.0,
            rect.min.y + LABEL_MARGIN * 2.0,
        );
        draw.add_rect_filled(
            pos - Vec2::splat(LABEL_MARGIN),
            pos + size + Vec2::splat(LABEL_MARGIN),
            LABEL_BACKGROUND,
            LABEL_MARGIN,
        );
        draw.add_text(pos, LABEL_TEXT, &text);
    }
}
