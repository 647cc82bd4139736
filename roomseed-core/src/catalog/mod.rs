//! The community layout: one space and the rooms placed inside it

use crate::matrix::types::{StateEvent, ROOM_TYPE_SPACE};
use crate::matrix::{CreateRoomRequest, Visibility};
use serde_json::{json, Value};

/// History visibility applied to the space and every room
pub const HISTORY_VISIBILITY: &str = "shared";

/// Room whose members need moderator rights to post
pub const READ_ONLY_ROOM: &str = "Announcements";

/// Power level required to send events in [`READ_ONLY_ROOM`]
pub const MODERATOR_POWER_LEVEL: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceDefinition {
    pub name: &'static str,
    pub topic: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomDefinition {
    pub name: &'static str,
    pub topic: &'static str,
    pub encrypted: bool,
    /// Carried with the definition but not applied: every room is private
    pub public: bool,
}

pub const SPACE: SpaceDefinition = SpaceDefinition {
    name: "YourBrand Community",
    topic: "The official community space. Browse rooms below.",
};

pub const ROOMS: [RoomDefinition; 6] = [
    RoomDefinition {
        name: "Lobby",
        topic: "Welcome! Introduce yourself and hang out.",
        encrypted: true,
        public: true,
    },
    RoomDefinition {
        name: "Announcements",
        topic: "Official announcements from the team. Read-only for members.",
        encrypted: true,
        public: true,
    },
    RoomDefinition {
        name: "General",
        topic: "General discussion — anything goes.",
        encrypted: true,
        public: true,
    },
    RoomDefinition {
        name: "Support",
        topic: "Ask questions and get help.",
        encrypted: true,
        public: true,
    },
    RoomDefinition {
        name: "Off Topic",
        topic: "Memes, random links, and everything else.",
        encrypted: true,
        public: true,
    },
    RoomDefinition {
        name: "Voice",
        topic: "Voice/video calls — join the room and start a call.",
        encrypted: true,
        public: true,
    },
];

impl SpaceDefinition {
    pub fn create_request(&self) -> CreateRoomRequest {
        CreateRoomRequest {
            name: Some(self.name.to_string()),
            topic: Some(self.topic.to_string()),
            visibility: Visibility::Private,
            creation_content: Some(json!({ "type": ROOM_TYPE_SPACE })),
            initial_state: vec![StateEvent::history_visibility(HISTORY_VISIBILITY)],
            power_level_content_override: None,
        }
    }
}

impl RoomDefinition {
    pub fn initial_state(&self) -> Vec<StateEvent> {
        let mut state = vec![StateEvent::history_visibility(HISTORY_VISIBILITY)];
        if self.encrypted {
            state.push(StateEvent::megolm_encryption());
        }
        state
    }

    pub fn power_level_override(&self) -> Option<Value> {
        (self.name == READ_ONLY_ROOM).then(|| json!({ "events_default": MODERATOR_POWER_LEVEL }))
    }

    pub fn create_request(&self) -> CreateRoomRequest {
        CreateRoomRequest {
            name: Some(self.name.to_string()),
            topic: Some(self.topic.to_string()),
            visibility: Visibility::Private,
            creation_content: None,
            initial_state: self.initial_state(),
            power_level_content_override: self.power_level_override(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::types::{EVENT_ENCRYPTION, EVENT_HISTORY_VISIBILITY};

    #[test]
    fn test_room_order() {
        let names: Vec<_> = ROOMS.iter().map(|r| r.name).collect();
        assert_eq!(names, ["Lobby", "Announcements", "General", "Support", "Off Topic", "Voice"]);
    }

    #[test]
    fn test_space_request() {
        let request = SPACE.create_request();
        assert!(request.is_space());
        assert_eq!(request.name.as_deref(), Some("YourBrand Community"));
        assert_eq!(request.visibility, Visibility::Private);
        assert_eq!(request.initial_state.len(), 1);
        assert_eq!(request.initial_state[0].event_type, EVENT_HISTORY_VISIBILITY);
        assert_eq!(request.initial_state[0].content["history_visibility"], "shared");
    }

    #[test]
    fn test_only_announcements_is_restricted() {
        for room in &ROOMS {
            let request = room.create_request();
            if room.name == "Announcements" {
                assert_eq!(request.events_default_override(), Some(50));
            } else {
                assert!(request.power_level_content_override.is_none(), "{} has an override", room.name);
            }
        }
    }

    #[test]
    fn test_rooms_are_private_even_when_public() {
        for room in &ROOMS {
            assert!(room.public);
            let request = room.create_request();
            assert_eq!(request.visibility, Visibility::Private);
            assert!(!request.is_space());
        }
    }

    #[test]
    fn test_encrypted_room_state() {
        let state = ROOMS[0].initial_state();
        assert_eq!(state.len(), 2);
        assert_eq!(state[1].event_type, EVENT_ENCRYPTION);
        assert_eq!(state[1].content["algorithm"], "m.megolm.v1.aes-sha2");
    }

    #[test]
    fn test_unencrypted_room_state() {
        let room = RoomDefinition {
            name: "Plain",
            topic: "no e2ee",
            encrypted: false,
            public: false,
        };
        let state = room.initial_state();
        assert_eq!(state.len(), 1);
        assert_eq!(state[0].event_type, EVENT_HISTORY_VISIBILITY);
    }
}
