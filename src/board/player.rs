//! Players registered on a board

use serde::{Deserialize, Serialize};
use super::PlayerId;

/// A registered player
///
/// The id and name are fixed at registration. The position only moves when
/// the player rolls on their own turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: u32,
}

impl Player {
    /// New player at the start position
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            position: 0,
        }
    }
}

/// Result of a successful dice roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub player_id: PlayerId,
    /// Face shown by the die
    pub dice: u8,
    /// Position before the move
    pub from: u32,
    /// Position after the move
    pub to: u32,
}
