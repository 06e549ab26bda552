//! Error types for the Ladder board

use std::fmt;
use thiserror::Error;
use crate::board::{BoardId, PlayerId};

/// Main error type for board operations
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Player already exists: {name}")]
    PlayerExists { name: String },

    #[error("Max players reached: the board holds at most {max} players")]
    MaxPlayersReached { max: usize },

    #[error("Game in progress: registration is closed once the dice have been rolled")]
    GameInProgress,

    #[error("Invalid turn: player {actual} tried to roll, expected {}", display_expected(.expected))]
    InvalidTurn {
        expected: Option<PlayerId>,
        actual: PlayerId,
    },

    #[error("No such player: {0}")]
    NoSuchPlayer(PlayerId),

    #[error("Invalid player name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Board not found: {0}")]
    BoardNotFound(BoardId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        field: String,
    },
}

fn display_expected(expected: &Option<PlayerId>) -> String {
    match expected {
        Some(id) => id.to_string(),
        None => "nobody (no players registered)".to_string(),
    }
}

/// Payload-free classification of a [`BoardError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    PlayerExists,
    MaxPlayersReached,
    GameInProgress,
    InvalidTurn,
    NoSuchPlayer,
    InvalidName,
    BoardNotFound,
    Io,
    Serialization,
    Configuration,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::PlayerExists => "player_exists",
            ErrorKind::MaxPlayersReached => "max_players_reached",
            ErrorKind::GameInProgress => "game_in_progress",
            ErrorKind::InvalidTurn => "invalid_turn",
            ErrorKind::NoSuchPlayer => "no_such_player",
            ErrorKind::InvalidName => "invalid_name",
            ErrorKind::BoardNotFound => "board_not_found",
            ErrorKind::Io => "io",
            ErrorKind::Serialization => "serialization",
            ErrorKind::Configuration => "configuration",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BoardError {
    /// Classify this error without inspecting its payload
    pub fn kind(&self) -> ErrorKind {
        match self {
            BoardError::PlayerExists { .. } => ErrorKind::PlayerExists,
            BoardError::MaxPlayersReached { .. } => ErrorKind::MaxPlayersReached,
            BoardError::GameInProgress => ErrorKind::GameInProgress,
            BoardError::InvalidTurn { .. } => ErrorKind::InvalidTurn,
            BoardError::NoSuchPlayer(_) => ErrorKind::NoSuchPlayer,
            BoardError::InvalidName { .. } => ErrorKind::InvalidName,
            BoardError::BoardNotFound(_) => ErrorKind::BoardNotFound,
            BoardError::Io(_) => ErrorKind::Io,
            BoardError::Serialization { .. } => ErrorKind::Serialization,
            BoardError::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    /// Whether the error was raised by a game rule rather than by storage or setup
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::PlayerExists
                | ErrorKind::MaxPlayersReached
                | ErrorKind::GameInProgress
                | ErrorKind::InvalidTurn
                | ErrorKind::NoSuchPlayer
                | ErrorKind::InvalidName
        )
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        BoardError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Type alias for the main result type used throughout the library
pub type BoardResult<T> = Result<T, BoardError>;

/// Logging configuration and initialization
pub mod logging {
    use tracing::Level;
    use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};
    use std::env;

    /// Logging output format
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum LogFormat {
        Human,
        Json,
    }

    /// Logging output destination
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum LogOutput {
        Stdout,
        Stderr,
    }

    /// Logging configuration
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        pub level: Level,
        pub format: LogFormat,
        pub output: LogOutput,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::INFO,
                format: LogFormat::Human,
                output: LogOutput::Stdout,
            }
        }
    }

    impl LoggingConfig {
        /// Build a configuration from `LADDER_LOG_LEVEL`, `LADDER_LOG_FORMAT` and `LADDER_LOG_OUTPUT`
        pub fn from_env() -> Self {
            let level = env::var("LADDER_LOG_LEVEL")
                .ok()
                .and_then(|value| value.parse::<Level>().ok())
                .unwrap_or(Level::INFO);

            let format = match env::var("LADDER_LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Human,
            };

            let output = match env::var("LADDER_LOG_OUTPUT").as_deref() {
                Ok("stderr") => LogOutput::Stderr,
                _ => LogOutput::Stdout,
            };

            Self { level, format, output }
        }
    }

    /// Initialize structured logging with the given configuration.
    ///
    /// Fails instead of panicking when a global subscriber is already installed.
    pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let env_filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(config.level).into())
            .from_env_lossy();

        let registry = tracing_subscriber::registry()
            .with(env_filter);

        match config.format {
            LogFormat::Human => {
                let fmt_layer = fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true);

                match config.output {
                    LogOutput::Stdout => registry.with(fmt_layer.with_writer(std::io::stdout)).try_init()?,
                    LogOutput::Stderr => registry.with(fmt_layer.with_writer(std::io::stderr)).try_init()?,
                }
            }
            LogFormat::Json => {
                let fmt_layer = fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true);

                match config.output {
                    LogOutput::Stdout => registry.with(fmt_layer.with_writer(std::io::stdout)).try_init()?,
                    LogOutput::Stderr => registry.with(fmt_layer.with_writer(std::io::stderr)).try_init()?,
                }
            }
        }

        Ok(())
    }

    /// Initialize logging with environment-based configuration
    pub fn init_from_env() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        init_logging(LoggingConfig::from_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_distinct() {
        let player = PlayerId::new();
        let errors = vec![
            BoardError::PlayerExists { name: "Ada".to_string() },
            BoardError::MaxPlayersReached { max: 4 },
            BoardError::GameInProgress,
            BoardError::InvalidTurn { expected: None, actual: player },
            BoardError::NoSuchPlayer(player),
            BoardError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full")),
        ];

        let kinds: std::collections::HashSet<_> = errors.iter().map(BoardError::kind).collect();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn test_rule_violation_classification() {
        assert!(BoardError::GameInProgress.is_rule_violation());
        assert!(!BoardError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom")).is_rule_violation());
        assert!(!BoardError::BoardNotFound(BoardId::new()).is_rule_violation());
    }

    #[test]
    fn test_invalid_turn_message_names_both_players() {
        let expected = PlayerId::new();
        let actual = PlayerId::new();
        let message = BoardError::InvalidTurn { expected: Some(expected), actual }.to_string();

        assert!(message.contains(&expected.to_string()));
        assert!(message.contains(&actual.to_string()));
    }

    #[test]
    fn test_io_error_is_preserved() {
        let err: BoardError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into();
        match err {
            BoardError::Io(inner) => assert_eq!(inner.kind(), std::io::ErrorKind::PermissionDenied),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_logging_config_defaults() {
        let config = logging::LoggingConfig::default();
        assert_eq!(config.level, tracing::Level::INFO);
        assert_eq!(config.format, logging::LogFormat::Human);
        assert_eq!(config.output, logging::LogOutput::Stdout);
    }
}
