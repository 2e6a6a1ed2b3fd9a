//! The persisted record shared by both players of a game.
use enumflags2::BitFlags;
use serde::{Deserialize, Serialize};

use crate::game::{Slot, Status};

/// Everything stored about one game. Both players read and write the same record.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub player1: String,
    pub player2: String,
    /// Blob of player 1's board, written once player 1 finishes setup and again by
    /// player 2 after every shot.
    #[serde(default)]
    pub player1_board: Option<String>,
    /// Blob of player 2's board.
    #[serde(default)]
    pub player2_board: Option<String>,
    #[serde(default)]
    pub player1_setup_done: bool,
    #[serde(default)]
    pub player2_setup_done: bool,
    pub status: Status,
    /// Name of the player whose turn it is. Empty once the game is over.
    #[serde(default)]
    pub turn: Option<String>,
    #[serde(default)]
    pub winner: Option<String>,
}

impl GameRecord {
    /// Create the record for a new game in setup.
    pub fn new(player1: impl Into<String>, player2: impl Into<String>) -> Self {
        Self {
            player1: player1.into(),
            player2: player2.into(),
            player1_board: None,
            player2_board: None,
            player1_setup_done: false,
            player2_setup_done: false,
            status: Status::Setup,
            turn: None,
            winner: None,
        }
    }

    /// Find the seat of the player with the given name.
    pub fn slot_of(&self, name: &str) -> Option<Slot> {
        if self.player1 == name {
            Some(Slot::Player1)
        } else if self.player2 == name {
            Some(Slot::Player2)
        } else {
            None
        }
    }

    /// Name of the player in the given seat.
    pub fn player(&self, slot: Slot) -> &str {
        match slot {
            Slot::Player1 => &self.player1,
            Slot::Player2 => &self.player2,
        }
    }

    /// Stored board blob of the player in the given seat.
    pub fn board(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::Player1 => self.player1_board.as_deref(),
            Slot::Player2 => self.player2_board.as_deref(),
        }
    }

    /// Replace the stored board blob of the player in the given seat.
    pub fn set_board(&mut self, slot: Slot, blob: String) {
        match slot {
            Slot::Player1 => self.player1_board = Some(blob),
            Slot::Player2 => self.player2_board = Some(blob),
        }
    }

    /// Set of seats that finished setup.
    pub fn setup_done(&self) -> BitFlags<Slot> {
        let mut done = BitFlags::empty();
        if self.player1_setup_done {
            done.insert(Slot::Player1);
        }
        if self.player2_setup_done {
            done.insert(Slot::Player2);
        }
        done
    }

    /// Record that the player in the given seat finished setup.
    pub fn mark_setup_done(&mut self, slot: Slot) {
        match slot {
            Slot::Player1 => self.player1_setup_done = true,
            Slot::Player2 => self.player2_setup_done = true,
        }
    }
}
