//! Blocks within a residency and the rooms inside each block.
//!
//! The service reports identity under `block_id` and `room_id` rather than
//! `_id`, and links each level to its parent by id.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::residency::string_id;

string_id!(
    /// Service-assigned block identifier (`block_id`).
    BlockId,
    "block"
);

string_id!(
    /// Service-assigned room identifier (`room_id`).
    RoomId,
    "room"
);

/// A building block as stored by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Immutable identity.
    #[serde(rename = "block_id")]
    pub id: BlockId,
    /// Residency the block belongs to.
    pub residency_id: String,
    /// Display name.
    pub block_name: String,
    /// Storeys in the block.
    pub number_of_floors: u32,
    /// Rooms across all floors.
    pub total_rooms: u32,
}

/// A room as stored by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Immutable identity.
    #[serde(rename = "room_id")]
    pub id: RoomId,
    /// Block the room belongs to.
    pub block_id: String,
    /// Door number.
    pub room_number: String,
    /// Floor the room is on.
    pub floor: u32,
    /// Beds in the room.
    pub capacity: u32,
    /// Whether the room can be allocated.
    pub is_available: bool,
}

/// Validation errors returned by [`BlockDraft::validate`] and
/// [`RoomDraft::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutValidationError {
    /// A required text field was left blank.
    MissingField {
        /// Human-readable field label.
        field: &'static str,
    },
    /// A count that must be positive was zero.
    Zero {
        /// Human-readable field label.
        field: &'static str,
    },
}

impl fmt::Display for LayoutValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "{field} is required"),
            Self::Zero { field } => write!(f, "{field} must be at least 1"),
        }
    }
}

impl std::error::Error for LayoutValidationError {}

/// Block fields without identity; the body of create and update calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlockDraft {
    /// Display name.
    pub block_name: String,
    /// Storeys in the block.
    pub number_of_floors: u32,
    /// Rooms across all floors.
    pub total_rooms: u32,
}

impl BlockDraft {
    /// Check the fields the block form marks as required.
    ///
    /// # Examples
    /// ```
    /// use portal::domain::{BlockDraft, LayoutValidationError};
    ///
    /// let draft = BlockDraft {
    ///     block_name: "North".to_owned(),
    ///     number_of_floors: 0,
    ///     total_rooms: 40,
    /// };
    /// assert_eq!(
    ///     draft.validate(),
    ///     Err(LayoutValidationError::Zero { field: "number of floors" })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), LayoutValidationError> {
        if self.block_name.trim().is_empty() {
            return Err(LayoutValidationError::MissingField { field: "block name" });
        }
        if self.number_of_floors == 0 {
            return Err(LayoutValidationError::Zero {
                field: "number of floors",
            });
        }
        Ok(())
    }
}

impl From<&Block> for BlockDraft {
    fn from(block: &Block) -> Self {
        Self {
            block_name: block.block_name.clone(),
            number_of_floors: block.number_of_floors,
            total_rooms: block.total_rooms,
        }
    }
}

/// Room fields without identity; the body of create and update calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomDraft {
    /// Door number.
    pub room_number: String,
    /// Floor the room is on.
    pub floor: u32,
    /// Beds in the room.
    pub capacity: u32,
    /// Whether the room can be allocated; new rooms are.
    pub is_available: bool,
}

impl Default for RoomDraft {
    fn default() -> Self {
        Self {
            room_number: String::new(),
            floor: 0,
            capacity: 1,
            is_available: true,
        }
    }
}

impl RoomDraft {
    /// Check the fields the room form marks as required.
    pub fn validate(&self) -> Result<(), LayoutValidationError> {
        if self.room_number.trim().is_empty() {
            return Err(LayoutValidationError::MissingField {
                field: "room number",
            });
        }
        if self.capacity == 0 {
            return Err(LayoutValidationError::Zero { field: "capacity" });
        }
        Ok(())
    }
}

impl From<&Room> for RoomDraft {
    fn from(room: &Room) -> Self {
        Self {
            room_number: room.room_number.clone(),
            floor: room.floor,
            capacity: room.capacity,
            is_available: room.is_available,
        }
    }
}
