use std::path::PathBuf;

/// A move that cannot be applied to the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is out of range (board has {cols} columns)")]
    InvalidColumn { column: i64, cols: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),
}

/// Errors raised while building a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board must have at least one row and one column (got {rows}x{cols})")]
    EmptyDimensions { rows: usize, cols: usize },

    #[error("a {rows}x{cols} board has too many cells")]
    TooLarge { rows: usize, cols: usize },

    #[error("connect length {connect} does not fit on a {rows}x{cols} board")]
    ConnectLength {
        connect: usize,
        rows: usize,
        cols: usize,
    },

    #[error("diagram row {row} has {found} cells, expected {expected}")]
    RaggedDiagram {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("unknown cell character {0:?} in diagram")]
    UnknownCell(char),

    #[error("disc at row {row}, column {col} is floating above an empty cell")]
    FloatingDisc { row: usize, col: usize },
}

/// Errors raised by the minimax search engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no legal move: the board is full")]
    NoLegalMove,
}

/// Errors a player can raise while choosing a move.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    #[error("no legal move available")]
    NoLegalMove,

    #[error("move input was closed")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort a game.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("the game is already over")]
    GameOver,

    #[error("illegal move: {0}")]
    IllegalMove(#[from] MoveError),

    #[error("player {name} failed: {source}")]
    Player {
        name: String,
        source: PlayerError,
    },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
