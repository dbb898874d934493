//! Crate-level error types.

use std::fmt;

use crate::engine::PluginId;
use crate::scene::PrimPath;

/// Errors produced by the vista crate.
///
/// None of these escape the per-frame sequence: the viewport logs them and
/// skips the affected stage. They surface directly only from setup calls
/// such as [`Options::load`](crate::options::Options::load) or
/// [`Viewport::switch_renderer`](crate::viewport::Viewport::switch_renderer).
#[derive(Debug)]
pub enum ViewportError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// No prim exists at the path.
    MissingPrim(PrimPath),
    /// The prim exists but is not a camera.
    NotACamera(PrimPath),
    /// A required schema field is not authored on the prim.
    MissingField {
        /// Prim that was read.
        path: PrimPath,
        /// Schema field that was undefined.
        field: &'static str,
    },
    /// GPU to host copy of the render output failed.
    Readback(String),
    /// Render output cannot be copied to the host in this format.
    UnsupportedFormat(wgpu::TextureFormat),
    /// The requested renderer plugin is not offered by the factory.
    UnknownPlugin(PluginId),
    /// The render engine could not be constructed.
    EngineCreation {
        /// Plugin that failed.
        plugin: PluginId,
        /// Backend-supplied reason.
        reason: String,
    },
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::MissingPrim(path) => write!(f, "no prim at {path}"),
            Self::NotACamera(path) => write!(f, "prim at {path} is not a camera"),
            Self::MissingField { path, field } => {
                write!(f, "prim at {path} has no authored `{field}`")
            }
            Self::Readback(msg) => write!(f, "render output readback failed: {msg}"),
            Self::UnsupportedFormat(format) => {
                write!(f, "render output format {format:?} cannot be read back")
            }
            Self::UnknownPlugin(plugin) => {
                write!(f, "unknown renderer plugin `{plugin}`")
            }
            Self::EngineCreation { plugin, reason } => {
                write!(f, "failed to create render engine `{plugin}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ViewportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ViewportError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
