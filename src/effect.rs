//! Effects - side effects declared by the reducer

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Resolve one catalog page
    ResolvePage { page: u32 },
    /// Resolve the whole catalog for search, debounced
    ResolveAll { generation: u64 },
    /// Drop a pending catalog resolution
    CancelResolveAll,
    /// Fetch and decode the sprite of the opened record
    LoadSprite { name: String, url: String },
}
