//! Outcome of a bootstrap run

/// What happened to one room definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomStatus {
    /// Created and both space links written
    Linked { room_id: String },
    /// Created, but at least one link write failed
    Unlinked { room_id: String, error: String },
    /// Creation failed, no links attempted
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomOutcome {
    pub name: String,
    pub status: RoomStatus,
}

impl RoomOutcome {
    pub fn room_id(&self) -> Option<&str> {
        match &self.status {
            RoomStatus::Linked { room_id } | RoomStatus::Unlinked { room_id, .. } => Some(room_id.as_str()),
            RoomStatus::Failed { .. } => None,
        }
    }

    pub fn is_linked(&self) -> bool {
        matches!(self.status, RoomStatus::Linked { .. })
    }
}

#[derive(Debug, Clone)]
pub struct BootstrapReport {
    pub user_id: String,
    pub space_id: String,
    pub rooms: Vec<RoomOutcome>,
}

impl BootstrapReport {
    pub fn created_count(&self) -> usize {
        self.rooms.iter().filter(|r| r.room_id().is_some()).count()
    }

    pub fn linked_count(&self) -> usize {
        self.rooms.iter().filter(|r| r.is_linked()).count()
    }

    /// Rooms that were not fully created and linked
    pub fn failures(&self) -> impl Iterator<Item = &RoomOutcome> {
        self.rooms.iter().filter(|r| !r.is_linked())
    }

    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}
