//! Errors used by the [`GameSetup`][crate::setup::GameSetup].

use thiserror::Error;

use crate::{
    board::{Coordinate, Inconsistency, PlaceError},
    objects::AnimalType,
};

/// Reason a setup operation was rejected. Rejected operations leave the setup untouched.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Placement was requested with no animal selected.
    #[error("no animal is selected")]
    NothingSelected,
    /// The animal is not available on the active page.
    #[error("the {0} is not available on this page")]
    NotOnPage(AnimalType),
    /// The selected animal does not fit at the requested base.
    #[error("the {animal} does not fit at {base}")]
    InvalidLocation { animal: AnimalType, base: Coordinate },
    /// The active page has no animal on the board yet.
    #[error("place an animal from page {} before moving on", .0 + 1)]
    PageIncomplete(usize),
    /// Every page was already completed.
    #[error("setup is already complete")]
    AlreadyComplete,
    /// Setup needs at least one page.
    #[error("setup needs at least one page of animals")]
    NoPages,
    /// An animal type may only be offered once.
    #[error("the {0} is offered on more than one page")]
    DuplicateAnimal(AnimalType),
    /// No animal on the page fits anywhere on the board.
    #[error("no room left for any animal on page {}", .0 + 1)]
    NoRoom(usize),
    /// The staged board broke one of its invariants.
    #[error(transparent)]
    Inconsistent(#[from] Inconsistency),
    /// The staged board refused the placement.
    #[error(transparent)]
    Place(#[from] PlaceError),
}
