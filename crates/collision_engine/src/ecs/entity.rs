//! Entity implementation

/// Entity identifier
///
/// Ordered by id so that collision pairs can be keyed as `{min, max}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    id: u32,
}

impl Entity {
    /// Create a new entity with the given ID
    pub const fn new(id: u32) -> Self {
        Self { id }
    }

    /// Get the entity ID
    pub const fn id(&self) -> u32 {
        self.id
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.id)
    }
}
