//! Recording fakes for the host services the viewport talks to.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{DMat4, Mat4, Vec2, Vec3};

use crate::engine::{EngineFactory, PluginId, RenderEngine, RenderOutput};
use crate::error::ViewportError;
use crate::gizmo::{GizmoOverlay, ToolMode};
use crate::gpu::{HostImage, Presenter};
use crate::picking::IntersectionResult;
use crate::scene::{PrimPath, SceneGraph};
use crate::ui::{DrawList, Rect, TextureId};

pub(crate) type EventLog = Rc<RefCell<Vec<String>>>;

/// Factory whose engines log every call into a shared event log.
pub(crate) struct RecordingFactory {
    plugins: Vec<PluginId>,
    log: EventLog,
    blank: bool,
}

impl RecordingFactory {
    pub fn new(plugins: &[&str]) -> Self {
        Self {
            plugins: plugins.iter().copied().map(PluginId::from).collect(),
            log: EventLog::default(),
            blank: false,
        }
    }

    /// Engines from this factory render but never produce color output.
    pub fn without_output(mut self) -> Self {
        self.blank = true;
        self
    }

    pub fn log(&self) -> EventLog {
        Rc::clone(&self.log)
    }
}

impl EngineFactory for RecordingFactory {
    fn plugins(&self) -> Vec<PluginId> {
        self.plugins.clone()
    }

    fn create(&self, plugin: &PluginId) -> Result<Box<dyn RenderEngine>, ViewportError> {
        self.log.borrow_mut().push(format!("create {plugin}"));
        Ok(Box::new(RecordingEngine {
            plugin: plugin.clone(),
            log: Rc::clone(&self.log),
            width: 0,
            height: 0,
            pixels: Vec::new(),
            blank: self.blank,
        }))
    }
}

pub(crate) struct RecordingEngine {
    plugin: PluginId,
    log: EventLog,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    blank: bool,
}

impl RecordingEngine {
    fn record(&self, event: String) {
        self.log.borrow_mut().push(event);
    }
}

impl Drop for RecordingEngine {
    fn drop(&mut self) {
        self.record(format!("drop {}", self.plugin));
    }
}

impl RenderEngine for RecordingEngine {
    fn plugin(&self) -> &PluginId {
        &self.plugin
    }

    fn set_selection(&mut self, paths: &[PrimPath]) {
        self.record(format!("selection {}", paths.len()));
    }

    fn set_render_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.record(format!("size {width}x{height}"));
    }

    fn set_camera_matrices(&mut self, _view: DMat4, _projection: DMat4) {
        self.record("matrices".into());
    }

    fn prepare(&mut self, _scene: &dyn SceneGraph) {
        self.record("prepare".into());
    }

    fn render(&mut self) {
        self.pixels = vec![0; self.width as usize * self.height as usize * 4];
        self.record("render".into());
    }

    fn color_output(&self) -> Option<RenderOutput<'_>> {
        if self.blank {
            return None;
        }
        Some(RenderOutput::Host(HostImage {
            pixels: &self.pixels,
            width: self.width,
            height: self.height,
            format: wgpu::TextureFormat::Rgba8Unorm,
        }))
    }

    fn find_intersection(&mut self, _point: Vec2) -> Option<IntersectionResult> {
        None
    }
}

/// Gizmo overlay that applies scripted one-shot edits.
#[derive(Default)]
pub(crate) struct ScriptedGizmo {
    /// Translation applied by the next `manipulate` call.
    pub translate: Option<Vec3>,
    /// View returned by the next `view_manipulate` call.
    pub next_view: Option<Mat4>,
    pub last_tool: Option<ToolMode>,
    pub manipulate_calls: usize,
    pub frames: Vec<(u64, Rect)>,
    pub grids: Vec<f32>,
}

impl GizmoOverlay for ScriptedGizmo {
    fn begin_frame(&mut self, id: u64, rect: Rect) {
        self.frames.push((id, rect));
    }

    fn manipulate(
        &mut self,
        _view: Mat4,
        _projection: Mat4,
        tool: ToolMode,
        matrix: Mat4,
    ) -> Mat4 {
        self.manipulate_calls += 1;
        self.last_tool = Some(tool);
        self.translate
            .take()
            .map_or(matrix, |offset| Mat4::from_translation(offset) * matrix)
    }

    fn view_manipulate(
        &mut self,
        view: Mat4,
        _distance: f32,
        _origin: Vec2,
        _size: Vec2,
    ) -> Mat4 {
        self.next_view.take().unwrap_or(view)
    }

    fn draw_grid(&mut self, _view: Mat4, _projection: Mat4, _model: Mat4, size: f32) {
        self.grids.push(size);
    }
}

#[derive(Default)]
pub(crate) struct RecordingDrawList {
    pub rects: Vec<(Vec2, Vec2, [f32; 4])>,
    pub texts: Vec<(Vec2, String)>,
    pub images: Vec<(TextureId, Vec2, Vec2, Vec2, Vec2)>,
}

impl DrawList for RecordingDrawList {
    fn add_rect_filled(&mut self, min: Vec2, max: Vec2, color: [f32; 4], _rounding: f32) {
        self.rects.push((min, max, color));
    }

    fn add_text(&mut self, pos: Vec2, _color: [f32; 4], text: &str) {
        self.texts.push((pos, text.to_owned()));
    }

    fn calc_text_size(&self, text: &str) -> Vec2 {
        Vec2::new(8.0 * text.len() as f32, 13.0)
    }

    fn add_image(
        &mut self,
        texture: TextureId,
        min: Vec2,
        max: Vec2,
        uv_min: Vec2,
        uv_max: Vec2,
    ) {
        self.images.push((texture, min, max, uv_min, uv_max));
    }
}

#[derive(Default)]
pub(crate) struct RecordingPresenter {
    next_id: u64,
    /// Refuse every `create_texture`.
    refuse: bool,
    pub created: Vec<(TextureId, u32, u32)>,
    pub updated: Vec<TextureId>,
    pub removed: Vec<TextureId>,
}

impl RecordingPresenter {
    /// Presenter that refuses every texture.
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }
}

impl Presenter for RecordingPresenter {
    fn create_texture(&mut self, image: &HostImage<'_>) -> Option<TextureId> {
        if self.refuse {
            return None;
        }
        self.next_id += 1;
        let id = TextureId(self.next_id);
        self.created.push((id, image.width, image.height));
        Some(id)
    }

    fn update_texture(&mut self, id: TextureId, _image: &HostImage<'_>) {
        self.updated.push(id);
    }

    fn remove_texture(&mut self, id: TextureId) {
        self.removed.push(id);
    }
}
