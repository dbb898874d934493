use super::{EngineFactory, PluginId, RenderEngine, RendererEntry};
use crate::error::ViewportError;

/// The engine bound to a viewport and the factory that builds it.
///
/// Switching backends is `Bound(p) -> Bound(p')`: the old engine is always
/// dropped before the factory constructs its replacement, so two backends
/// never hold GPU resources at once.
pub struct EngineSlot {
    factory: Box<dyn EngineFactory>,
    engine: Option<Box<dyn RenderEngine>>,
}

impl EngineSlot {
    /// Slot bound to the factory's default plugin.
    ///
    /// A factory with no plugins, or one that fails to build its default,
    /// leaves the slot empty; frames then skip rendering.
    pub fn new(factory: Box<dyn EngineFactory>) -> Self {
        let mut slot = Self {
            factory,
            engine: None,
        };
        if let Some(plugin) = slot.factory.default_plugin() {
            if let Err(e) = slot.bind(&plugin) {
                log::warn!("{e}");
            }
        } else {
            log::warn!("no renderer plugins available");
        }
        slot
    }

    /// Tear down the current engine and build one for `plugin`.
    ///
    /// On failure the slot stays empty; the previous engine is already gone.
    pub fn bind(&mut self, plugin: &PluginId) -> Result<(), ViewportError> {
        if !self.factory.plugins().contains(plugin) {
            return Err(ViewportError::UnknownPlugin(plugin.clone()));
        }
        if let Some(old) = self.engine.take() {
            log::info!("tearing down renderer {}", old.plugin());
            drop(old);
        }
        let engine = self.factory.create(plugin)?;
        log::info!("renderer {} ready", engine.display_name());
        self.engine = Some(engine);
        Ok(())
    }

    /// Plugin of the live engine.
    #[must_use]
    pub fn plugin(&self) -> Option<&PluginId> {
        self.engine.as_deref().map(RenderEngine::plugin)
    }

    /// The live engine.
    #[must_use]
    pub fn engine(&self) -> Option<&dyn RenderEngine> {
        self.engine.as_deref()
    }

    /// The live engine, mutably.
    pub fn engine_mut(&mut self) -> Option<&mut (dyn RenderEngine + 'static)> {
        self.engine.as_deref_mut()
    }

    /// Every backend the factory offers, flagging the live one.
    #[must_use]
    pub fn renderers(&self) -> Vec<RendererEntry> {
        let current = self.plugin();
        self.factory
            .plugins()
            .into_iter()
            .map(|plugin| RendererEntry {
                name: self.factory.display_name(&plugin),
                current: current == Some(&plugin),
                plugin,
            })
            .collect()
    }
}
