//! Board state machine: registration, turn order, movement and removal

pub mod dice;
pub mod ids;
pub mod names;
pub mod player;

pub use dice::{Dice, LoadedDice, StandardDice, DIE_MAX, DIE_MIN};
pub use ids::{BoardId, PlayerId};
pub use names::NameValidator;
pub use player::{Player, RollOutcome};

use chrono::Utc;
use tracing::{debug, info, warn};
use crate::config::NameRules;
use crate::error::{BoardError, BoardResult};
use crate::store::{BoardRecord, BoardStore};

/// Maximum number of players on one board
pub const MAX_PLAYERS: usize = 4;

/// Authoritative state of one game
///
/// Every successful mutation is written to the store before it becomes
/// visible in memory. A rejected or unpersisted operation leaves the board
/// exactly as it was.
///
/// Turn order is registration order. The turn cursor is an index into the
/// player list; deleting a player before the cursor shifts it back by one,
/// deleting the current player hands the turn to whoever was registered
/// after them (wrapping to the first player).
#[derive(Debug)]
pub struct Board<S: BoardStore, D: Dice = StandardDice> {
    state: BoardRecord,
    store: S,
    dice: D,
    names: NameValidator,
}

impl<S: BoardStore> Board<S> {
    /// Create an empty board with a fair die and persist it
    pub fn create(store: S) -> BoardResult<Self> {
        Self::create_with_dice(store, StandardDice::new())
    }

    /// Reopen a persisted board with a fair die
    pub fn open(id: BoardId, store: S) -> BoardResult<Self> {
        Self::open_with_dice(id, store, StandardDice::new())
    }
}

impl<S: BoardStore, D: Dice> Board<S, D> {
    /// Create an empty board using `dice` and persist it
    pub fn create_with_dice(store: S, dice: D) -> BoardResult<Self> {
        Self::create_with_rules(store, dice, NameRules::default())
    }

    /// Create an empty board whose registrations follow `rules`.
    ///
    /// The rules are part of the durable record, so a reopened board keeps them.
    pub fn create_with_rules(store: S, dice: D, rules: NameRules) -> BoardResult<Self> {
        let names = NameValidator::new(&rules)?;
        let mut state = BoardRecord::new(BoardId::new());
        state.names = rules;
        store.save(&state)?;
        info!(board_id = %state.id, "Created board");

        Ok(Self {
            state,
            store,
            dice,
            names,
        })
    }

    /// Reconstruct a board from its durable record
    pub fn open_with_dice(id: BoardId, store: S, dice: D) -> BoardResult<Self> {
        let state = store.load(&id)?;
        let names = NameValidator::new(&state.names)?;
        info!(
            board_id = %id,
            players = state.players.len(),
            in_progress = state.in_progress,
            "Opened board"
        );

        Ok(Self {
            state,
            store,
            dice,
            names,
        })
    }

    pub fn id(&self) -> BoardId {
        self.state.id
    }

    /// Name rules applied to registrations
    pub fn name_rules(&self) -> &NameRules {
        self.names.rules()
    }

    /// Players in registration (and turn) order
    pub fn players(&self) -> &[Player] {
        &self.state.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.state.players.iter().find(|p| p.id == id)
    }

    /// The player expected to roll next, if anyone is registered
    pub fn current_player(&self) -> Option<&Player> {
        self.state.players.get(self.state.turn)
    }

    /// Whether any dice roll has happened; registration is closed once it has
    pub fn is_in_progress(&self) -> bool {
        self.state.in_progress
    }

    pub fn rolls(&self) -> u64 {
        self.state.rolls
    }

    /// Full state as written to the store
    pub fn record(&self) -> &BoardRecord {
        &self.state
    }

    /// Full state as a JSON value
    pub fn data(&self) -> BoardResult<serde_json::Value> {
        Ok(serde_json::to_value(&self.state)?)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a new player at the end of the turn order.
    ///
    /// Checks run in a fixed order: name rules, duplicate name, capacity,
    /// then whether the game has started.
    pub fn register_player(&mut self, name: &str) -> BoardResult<PlayerId> {
        if let Err(e) = self.names.validate(name) {
            return Err(self.reject("register_player", e));
        }

        if self.state.players.iter().any(|p| p.name == name) {
            let e = BoardError::PlayerExists { name: name.to_string() };
            return Err(self.reject("register_player", e));
        }

        if self.state.players.len() >= MAX_PLAYERS {
            let e = BoardError::MaxPlayersReached { max: MAX_PLAYERS };
            return Err(self.reject("register_player", e));
        }

        if self.state.in_progress {
            return Err(self.reject("register_player", BoardError::GameInProgress));
        }

        let player = Player::new(PlayerId::new(), name);
        let id = player.id;

        let mut next = self.state.clone();
        next.players.push(player);
        self.commit(next)?;

        info!(board_id = %self.state.id, player_id = %id, name, "Registered player");
        Ok(id)
    }

    /// Roll for `player_id`, who must be the current turn-taker
    pub fn roll_dice(&mut self, player_id: PlayerId) -> BoardResult<RollOutcome> {
        let expected = self.current_player().map(|p| p.id);
        if expected != Some(player_id) {
            let e = BoardError::InvalidTurn { expected, actual: player_id };
            return Err(self.reject("roll_dice", e));
        }

        let dice = self.dice.roll();
        debug_assert!((DIE_MIN..=DIE_MAX).contains(&dice), "die rolled {}", dice);

        let mut next = self.state.clone();
        let turn = next.turn;
        let player = &mut next.players[turn];
        let from = player.position;
        let to = from.saturating_add(u32::from(dice));
        player.position = to;

        next.in_progress = true;
        next.rolls += 1;
        next.turn = (turn + 1) % next.players.len();
        self.commit(next)?;

        info!(
            board_id = %self.state.id,
            player_id = %player_id,
            dice,
            position = to,
            "Rolled dice"
        );

        Ok(RollOutcome { player_id, dice, from, to })
    }

    /// Remove a player, returning it.
    ///
    /// Deleting an id that is not on the board, including one already
    /// deleted, is an error.
    pub fn delete_player(&mut self, player_id: PlayerId) -> BoardResult<Player> {
        let Some(index) = self.state.players.iter().position(|p| p.id == player_id) else {
            return Err(self.reject("delete_player", BoardError::NoSuchPlayer(player_id)));
        };

        let mut next = self.state.clone();
        let removed = next.players.remove(index);
        if index < next.turn {
            next.turn -= 1;
        }
        if next.turn >= next.players.len() {
            next.turn = 0;
        }
        self.commit(next)?;

        info!(
            board_id = %self.state.id,
            player_id = %player_id,
            name = %removed.name,
            "Deleted player"
        );
        Ok(removed)
    }

    fn commit(&mut self, mut next: BoardRecord) -> BoardResult<()> {
        next.updated_at = Utc::now();
        if let Err(e) = self.store.save(&next) {
            warn!(board_id = %self.state.id, error = %e, "Failed to persist board");
            return Err(e);
        }

        debug!(board_id = %next.id, turn = next.turn, rolls = next.rolls, "Committed board state");
        self.state = next;
        Ok(())
    }

    fn reject(&self, operation: &str, error: BoardError) -> BoardError {
        warn!(
            board_id = %self.state.id,
            operation,
            kind = %error.kind(),
            "Rejected operation: {}",
            error
        );
        error
    }
}
