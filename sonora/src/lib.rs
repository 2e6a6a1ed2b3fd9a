//! Game-state engine for Sonora, a two-player game of hide-and-photograph played with
//! desert animals on a 10x10 grid.
//!
//! Each player hides a handful of [`Animal`][objects::Animal]s on their own [`Board`].
//! Players take turns placing a [`Photo`][objects::Photo] on their view of the opponent's
//! board; resolving the photo either marks a segment of an animal as shot or leaves a
//! permanent [`Miss`][objects::Miss]. The first player to photograph every segment of every
//! opposing animal wins.
//!
//! The engine is split the same way the game flows:
//!
//! - [`board`] holds the grid, placement rules, turn resolution, reconciliation of a remote
//!   board and the persisted record format.
//! - [`objects`] defines the things that can be placed on a board, along with the static
//!   [`catalog`][objects::catalog] of animal templates.
//! - [`setup`] stages animal placement, one page of interchangeable animals at a time.
//! - [`game`] is one player's view over a shared persisted match record.
//! - [`store`] abstracts where that record lives.
//! - [`session`] ties a user, their setup and their current game together.
//!
//! The engine never decides when to synchronize with the other player. Collaborators call
//! [`Game::refresh`][game::Game::refresh] on whatever cadence suits them.

pub mod board;
pub mod game;
pub mod objects;
pub mod session;
pub mod setup;
pub mod store;

pub use crate::{
    board::{Board, Column, Coordinate},
    game::Game,
    objects::{AnimalType, BoardObject},
    setup::GameSetup,
};
