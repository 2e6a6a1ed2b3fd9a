//! Notifications queued by a [`Game`][crate::game::Game] as its state changes.
use crate::{
    board::Coordinate,
    game::{SetupStatus, Status},
    objects::AnimalType,
};

/// Which of the two boards held by a game view.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Side {
    /// The player's own board.
    Own,
    /// The player's view of the opponent's board.
    Opponent,
}

/// A single state transition. Collaborators read these with
/// [`Game::drain_events`][crate::game::Game::drain_events] and react however they like.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum GameEvent {
    SetupStatusChanged(SetupStatus),
    StatusChanged(Status),
    TurnChanged { your_turn: bool },
    /// A square was photographed.
    SquareUpdated { side: Side, coord: Coordinate },
    /// The last segment of an animal was photographed.
    AnimalFullyShot { side: Side, animal: AnimalType },
    Won { winner: String },
}
