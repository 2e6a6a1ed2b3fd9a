//! Errors used by the [`Game`][crate::game::Game].

use thiserror::Error;

use crate::{
    board::{CodecError, Inconsistency, PlaceError},
    game::{SetupStatus, Status},
    store::StoreError,
};

/// Reason a game operation failed. A failed operation leaves the game view as it was.
#[derive(Debug, Error)]
pub enum GameError {
    /// The name is not one of the two players in the record.
    #[error("{0} is not playing in this game")]
    NotAPlayer(String),
    /// The operation needs the game to be in a different phase.
    #[error("the game is in {actual}, expected {expected}")]
    WrongStatus { expected: Status, actual: Status },
    /// The player tried to act out of turn.
    #[error("it is not your turn")]
    NotYourTurn,
    /// Setup was reported finished from a state that doesn't allow it.
    #[error("cannot finish setup from {0}")]
    IllegalTransition(SetupStatus),
    /// A win was claimed while the opponent still has animals left.
    #[error("the opponent still has animals left")]
    NotWon,
    /// The record says the game is active but nobody holds the turn and nobody won.
    #[error("active game has no player to move and no winner")]
    NobodysTurn,
    /// A new board blob arrived but contained no new shot.
    #[error("remote board changed without recording a shot")]
    UnchangedBoard,
    #[error(transparent)]
    Inconsistent(#[from] Inconsistency),
    #[error(transparent)]
    Place(#[from] PlaceError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("could not access the game record: {0}")]
    Store(#[from] StoreError),
}
