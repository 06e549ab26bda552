//! Ladder - authoritative board state for Snakes and Ladders style games
//!
//! Ladder keeps the state of a single game instance:
//! - Player registration with unique names and a four player capacity
//! - Strict, registration ordered turn taking driven by a six-sided die
//! - Player removal that keeps the remaining turn order intact
//! - A durable record of the whole board written after every mutation

pub mod board;
pub mod config;
pub mod error;
pub mod store;

// Re-export commonly used types for convenience
pub use error::{BoardError, BoardResult, ErrorKind};

// Re-export the board state machine
pub use board::{
    Board, BoardId, Dice, LoadedDice, NameValidator, Player, PlayerId, RollOutcome, StandardDice,
    MAX_PLAYERS,
};

// Re-export persistence interfaces
pub use store::{BoardRecord, BoardStore, FileStore, MemoryStore};

// Re-export configuration interfaces
pub use config::{LadderConfig, NameRules, StorageConfig};
