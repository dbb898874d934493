/// What the transform gizmo edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operation {
    /// Move along axes and planes.
    #[default]
    Translate,
    /// Rotate about axes.
    Rotate,
    /// Scale along axes.
    Scale,
}

/// Frame the gizmo's axes are aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Space {
    /// The prim's own axes.
    #[default]
    Local,
    /// World axes.
    World,
}

/// Transform gizmo mode. Persists across frames until the user changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ToolMode {
    /// Translate, rotate, or scale.
    pub operation: Operation,
    /// Local or world axes.
    pub space: Space,
}

impl ToolMode {
    /// Every operation in both spaces, local first, in menu order.
    pub const ALL: [Self; 6] = [
        Self::new(Operation::Translate, Space::Local),
        Self::new(Operation::Rotate, Space::Local),
        Self::new(Operation::Scale, Space::Local),
        Self::new(Operation::Translate, Space::World),
        Self::new(Operation::Rotate, Space::World),
        Self::new(Operation::Scale, Space::World),
    ];

    /// Mode with the given operation and space.
    #[must_use]
    pub const fn new(operation: Operation, space: Space) -> Self {
        Self { operation, space }
    }

    /// Menu label, e.g. `"local translate"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match (self.space, self.operation) {
            (Space::Local, Operation::Translate) => "local translate",
            (Space::Local, Operation::Rotate) => "local rotation",
            (Space::Local, Operation::Scale) => "local scale",
            (Space::World, Operation::Translate) => "global translate",
            (Space::World, Operation::Rotate) => "global rotation",
            (Space::World, Operation::Scale) => "global scale",
        }
    }
}
