//! The client-side notion of "currently identified tutor".

use crate::types::RecordId;

/// Holds the active tutor id, if any. Only lives in memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    current: Option<RecordId>,
}

impl Session {
    pub fn activate(&mut self, tutor_id: RecordId) {
        tracing::debug!(tutor_id, "session activated");
        self.current = Some(tutor_id);
    }

    pub fn clear(&mut self) {
        if let Some(tutor_id) = self.current.take() {
            tracing::debug!(tutor_id, "session cleared");
        }
    }

    pub fn current(&self) -> Option<RecordId> {
        self.current
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}
