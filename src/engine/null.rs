use glam::{DMat4, DVec3, Vec2};

use super::{EngineFactory, PluginId, RenderEngine, RenderOutput};
use crate::error::ViewportError;
use crate::gpu::HostImage;
use crate::picking::IntersectionResult;
use crate::scene::{Extent, PrimPath, SceneGraph};

/// Bytes per RGBA8 pixel.
const BYTES_PER_PIXEL: usize = 4;

/// Background color, RGBA8.
const CLEAR_COLOR: [u8; 4] = [38, 38, 46, 255];

/// Engine that clears to a flat color on the CPU and answers intersection
/// queries by ray-casting world-space prim extents.
///
/// Useful headless and as a fallback when no GPU backend is available.
pub struct NullEngine {
    plugin: PluginId,
    width: u32,
    height: u32,
    view: DMat4,
    projection: DMat4,
    selection: Vec<PrimPath>,
    bounds: Vec<(PrimPath, Extent)>,
    pixels: Vec<u8>,
}

impl NullEngine {
    /// Engine reporting itself as `plugin`.
    #[must_use]
    pub fn new(plugin: PluginId) -> Self {
        Self {
            plugin,
            width: 0,
            height: 0,
            view: DMat4::IDENTITY,
            projection: DMat4::IDENTITY,
            selection: Vec::new(),
            bounds: Vec::new(),
            pixels: Vec::new(),
        }
    }

    /// Paths last submitted as selected.
    #[must_use]
    pub fn selection(&self) -> &[PrimPath] {
        &self.selection
    }

    /// World-space ray through `point` (viewport pixels, y down).
    fn pixel_ray(&self, point: Vec2) -> Option<(DVec3, DVec3)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let ndc_x = 2.0 * f64::from(point.x) / f64::from(self.width) - 1.0;
        let ndc_y = 1.0 - 2.0 * f64::from(point.y) / f64::from(self.height);
        let inv = (self.projection * self.view).inverse();
        let near = inv.project_point3(DVec3::new(ndc_x, ndc_y, -1.0));
        let far = inv.project_point3(DVec3::new(ndc_x, ndc_y, 1.0));
        let dir = (far - near).normalize_or_zero();
        (dir != DVec3::ZERO && near.is_finite()).then_some((near, dir))
    }
}

impl RenderEngine for NullEngine {
    fn plugin(&self) -> &PluginId {
        &self.plugin
    }

    fn set_selection(&mut self, paths: &[PrimPath]) {
        paths.clone_into(&mut self.selection);
    }

    fn set_render_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn set_camera_matrices(&mut self, view: DMat4, projection: DMat4) {
        self.view = view;
        self.projection = projection;
    }

    fn prepare(&mut self, scene: &dyn SceneGraph) {
        self.bounds.clear();
        for path in scene.prim_paths() {
            let Some(prim) = scene.prim(&path) else {
                continue;
            };
            if let Some(extent) = prim.extent {
                let world = extent.transformed(&prim.xform.unwrap_or(DMat4::IDENTITY));
                self.bounds.push((path, world));
            }
        }
    }

    fn render(&mut self) {
        let len = self.width as usize * self.height as usize * BYTES_PER_PIXEL;
        self.pixels.clear();
        self.pixels.extend(CLEAR_COLOR.iter().copied().cycle().take(len));
    }

    fn color_output(&self) -> Option<RenderOutput<'_>> {
        if self.pixels.is_empty() {
            return None;
        }
        Some(RenderOutput::Host(HostImage {
            pixels: &self.pixels,
            width: self.width,
            height: self.height,
            format: wgpu::TextureFormat::Rgba8Unorm,
        }))
    }

    fn find_intersection(&mut self, point: Vec2) -> Option<IntersectionResult> {
        let (origin, dir) = self.pixel_ray(point)?;
        self.bounds
            .iter()
            .filter_map(|(path, extent)| {
                ray_box(origin, dir, extent).map(|(t, normal)| (t, path, normal))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(t, path, normal)| IntersectionResult {
                path: path.clone(),
                world_hit_point: origin + dir * t,
                world_hit_normal: normal,
            })
    }
}

/// Slab test. Returns the entry distance and the entry face normal; a ray
/// starting inside the box hits at distance zero.
fn ray_box(origin: DVec3, dir: DVec3, extent: &Extent) -> Option<(f64, DVec3)> {
    let mut t_near = f64::NEG_INFINITY;
    let mut t_far = f64::INFINITY;
    let mut normal = DVec3::ZERO;

    for axis in 0..3 {
        let (o, d) = (origin[axis], dir[axis]);
        let (lo, hi) = (extent.min[axis], extent.max[axis]);
        if d.abs() < f64::EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let (t0, t1) = ((lo - o) / d, (hi - o) / d);
        let (enter, exit) = if t0 < t1 { (t0, t1) } else { (t1, t0) };
        if enter > t_near {
            t_near = enter;
            normal = DVec3::ZERO;
            normal[axis] = -d.signum();
        }
        t_far = t_far.min(exit);
    }

    if t_near > t_far || t_far < 0.0 {
        return None;
    }
    Some((t_near.max(0.0), normal))
}

/// Factory offering one [`NullEngine`] per plugin name.
#[derive(Debug, Clone)]
pub struct NullEngineFactory {
    plugins: Vec<PluginId>,
}

impl NullEngineFactory {
    /// Factory offering the given plugin tokens, in order.
    #[must_use]
    pub fn new(plugins: &[&str]) -> Self {
        Self {
            plugins: plugins.iter().copied().map(PluginId::from).collect(),
        }
    }
}

impl Default for NullEngineFactory {
    fn default() -> Self {
        Self::new(&["Null"])
    }
}

impl EngineFactory for NullEngineFactory {
    fn plugins(&self) -> Vec<PluginId> {
        self.plugins.clone()
    }

    fn create(&self, plugin: &PluginId) -> Result<Box<dyn RenderEngine>, ViewportError> {
        if !self.plugins.contains(plugin) {
            return Err(ViewportError::UnknownPlugin(plugin.clone()));
        }
        Ok(Box::new(NullEngine::new(plugin.clone())))
    }
}
