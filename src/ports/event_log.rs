use crate::domain::CatalogEvent;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Event log port for recording catalog events.
///
/// Append-only: events are immutable facts about successful mutations
/// and are returned in the order they were appended.
pub trait EventLog: Send + Sync {
    fn append(&mut self, event: CatalogEvent) -> Result<()>;

    /// Load every event in insertion order.
    fn load_all(&self) -> Result<Vec<CatalogEvent>>;
}
