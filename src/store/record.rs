//! Durable record of a board's full state

use std::collections::HashSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::board::{BoardId, Player, MAX_PLAYERS};
use crate::config::NameRules;
use crate::error::{BoardError, BoardResult};

/// Current record layout version
pub const RECORD_VERSION: u32 = 1;

/// Everything needed to reconstruct a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardRecord {
    pub version: u32,
    pub id: BoardId,
    /// Players in registration order, which is also turn order
    pub players: Vec<Player>,
    /// Index into `players` of the next turn-taker
    pub turn: usize,
    pub in_progress: bool,
    /// Successful rolls since the board was created
    pub rolls: u64,
    /// Name rules applied to registrations on this board
    #[serde(default)]
    pub names: NameRules,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BoardRecord {
    /// Empty record for a freshly created board
    pub fn new(id: BoardId) -> Self {
        let now = Utc::now();
        Self {
            version: RECORD_VERSION,
            id,
            players: Vec::new(),
            turn: 0,
            in_progress: false,
            rolls: 0,
            names: NameRules::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn to_json(&self) -> BoardResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode and validate a record
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let record: BoardRecord = serde_json::from_str(json)?;
        record.validate()?;
        Ok(record)
    }

    /// Check the structural invariants a stored record must satisfy
    pub fn validate(&self) -> BoardResult<()> {
        if self.version != RECORD_VERSION {
            return Err(corrupt(format!(
                "unsupported record version {} (expected {})",
                self.version, RECORD_VERSION
            )));
        }

        if self.players.len() > MAX_PLAYERS {
            return Err(corrupt(format!(
                "record holds {} players, limit is {}",
                self.players.len(),
                MAX_PLAYERS
            )));
        }

        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for player in &self.players {
            if !names.insert(player.name.as_str()) {
                return Err(corrupt(format!("duplicate player name {:?}", player.name)));
            }
            if !ids.insert(player.id) {
                return Err(corrupt(format!("duplicate player id {}", player.id)));
            }
        }

        let turn_in_range = if self.players.is_empty() {
            self.turn == 0
        } else {
            self.turn < self.players.len()
        };
        if !turn_in_range {
            return Err(corrupt(format!(
                "turn index {} out of range for {} players",
                self.turn,
                self.players.len()
            )));
        }

        // Rolling is the only way to start a game or move a player
        if self.in_progress != (self.rolls > 0) {
            return Err(corrupt(format!(
                "in_progress is {} after {} rolls",
                self.in_progress, self.rolls
            )));
        }
        if !self.in_progress {
            if let Some(moved) = self.players.iter().find(|p| p.position != 0) {
                return Err(corrupt(format!(
                    "player {} is at position {} before any roll",
                    moved.id, moved.position
                )));
            }
        }

        Ok(())
    }
}

fn corrupt(message: String) -> BoardError {
    BoardError::Serialization {
        message: format!("invalid board record: {}", message),
    }
}
