use crate::domain::CatalogEvent;
use crate::ports::event_log::{EventLog as EventLogTrait, Result};

/// In-memory implementation of EventLog
///
/// Events are appended to a Vec and never modified.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<CatalogEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventLogTrait for EventLog {
    fn append(&mut self, event: CatalogEvent) -> Result<()> {
        self.events.push(event);
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<CatalogEvent>> {
        Ok(self.events.clone())
    }
}
