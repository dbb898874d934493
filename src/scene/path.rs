use std::fmt;

/// Hierarchical prim path, e.g. `/World/Cam1`.
///
/// The empty path names no prim; engines and menus use it where a path is
/// optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimPath(String);

impl PrimPath {
    /// Wrap a path string. No normalization is applied.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The empty path.
    #[must_use]
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Whether this path names no prim.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Full path string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path element (`Cam1` for `/World/Cam1`).
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }
}

impl fmt::Display for PrimPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PrimPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for PrimPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}
