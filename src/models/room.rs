//! Room model.
//!
//! Rooms are where lessons take place. Each room has a kind that decides
//! which half of a subject's coverage it counts toward: every subject in a
//! group's curriculum must be taught at least once in a lecture room and
//! at least once in a lab.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::RoomId;

/// A room that can host lessons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Index of this room.
    pub id: RoomId,
    /// Human-readable name.
    pub name: String,
    /// Room classification.
    pub kind: RoomKind,
}

/// Room classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    /// Lecture hall.
    Lecture,
    /// Laboratory.
    Lab,
}

impl RoomKind {
    /// All room kinds, in declaration order.
    pub const ALL: [RoomKind; 2] = [RoomKind::Lecture, RoomKind::Lab];

    /// Number of distinct room kinds a subject must cover.
    pub const COUNT: usize = Self::ALL.len();

    /// Dense index (lecture = 0, lab = 1).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            RoomKind::Lecture => 0,
            RoomKind::Lab => 1,
        }
    }
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomKind::Lecture => f.write_str("lec"),
            RoomKind::Lab => f.write_str("lab"),
        }
    }
}

impl Room {
    /// Creates a room.
    pub fn new(id: impl Into<RoomId>, kind: RoomKind) -> Self {
        let id = id.into();
        Self {
            id,
            name: id.to_string(),
            kind,
        }
    }

    /// Creates a lecture room.
    pub fn lecture(id: impl Into<RoomId>) -> Self {
        Self::new(id, RoomKind::Lecture)
    }

    /// Creates a lab.
    pub fn lab(id: impl Into<RoomId>) -> Self {
        Self::new(id, RoomKind::Lab)
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
