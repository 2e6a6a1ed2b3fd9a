//! Status values tracked for a game.
use std::fmt;

use enumflags2::BitFlags;
use serde::{Deserialize, Serialize};

/// One of the two seats in a game.
#[derive(BitFlags, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Slot {
    /// The player who created the game. Takes the first turn.
    Player1 = 0b01,
    /// The invited player.
    Player2 = 0b10,
}

impl Slot {
    /// Get the other seat.
    pub fn other(self) -> Self {
        match self {
            Slot::Player1 => Slot::Player2,
            Slot::Player2 => Slot::Player1,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Slot::Player1 => f.pad("player 1"),
            Slot::Player2 => f.pad("player 2"),
        }
    }
}

/// Overall phase of a game. Only ever moves forward.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Players are hiding their animals.
    Setup,
    /// Players are taking turns.
    Active,
    /// Somebody won.
    Complete,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Status::Setup => "SETUP",
            Status::Active => "ACTIVE",
            Status::Complete => "COMPLETE",
        })
    }
}

/// Progress of the setup phase, as seen by one player.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SetupStatus {
    NeitherDone,
    YouDoneOppNot,
    OppDoneYouNot,
    Complete,
}

impl SetupStatus {
    /// Derive the status seen from seat `you`, given the set of seats that finished setup.
    pub fn derive(done: BitFlags<Slot>, you: Slot) -> Self {
        if done.is_all() {
            SetupStatus::Complete
        } else if done.is_empty() {
            SetupStatus::NeitherDone
        } else if done.contains(you) {
            SetupStatus::YouDoneOppNot
        } else {
            SetupStatus::OppDoneYouNot
        }
    }
}

impl fmt::Display for SetupStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            SetupStatus::NeitherDone => "NEITHER_DONE",
            SetupStatus::YouDoneOppNot => "YOU_DONE_OPP_NOT",
            SetupStatus::OppDoneYouNot => "OPP_DONE_YOU_NOT",
            SetupStatus::Complete => "COMPLETE",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_status_table() {
        let none = BitFlags::<Slot>::empty();
        let p1 = BitFlags::from(Slot::Player1);
        let p2 = BitFlags::from(Slot::Player2);
        let both = BitFlags::<Slot>::all();

        for &you in &[Slot::Player1, Slot::Player2] {
            assert_eq!(SetupStatus::derive(none, you), SetupStatus::NeitherDone);
            assert_eq!(SetupStatus::derive(both, you), SetupStatus::Complete);
        }
        assert_eq!(SetupStatus::derive(p1, Slot::Player1), SetupStatus::YouDoneOppNot);
        assert_eq!(SetupStatus::derive(p1, Slot::Player2), SetupStatus::OppDoneYouNot);
        assert_eq!(SetupStatus::derive(p2, Slot::Player2), SetupStatus::YouDoneOppNot);
        assert_eq!(SetupStatus::derive(p2, Slot::Player1), SetupStatus::OppDoneYouNot);
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(serde_json::to_string(&Status::Active).unwrap(), r#""ACTIVE""#);
        assert_eq!(
            serde_json::from_str::<Status>(r#""COMPLETE""#).unwrap(),
            Status::Complete
        );
        assert!(Status::Setup < Status::Active && Status::Active < Status::Complete);
    }
}
