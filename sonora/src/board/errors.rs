//! Errors used by the [`Board`][crate::board::Board].

use std::fmt::{self, Debug};

use thiserror::Error;

use crate::{
    board::Coordinate,
    objects::{AnimalType, BoardObject, ObjectKind, UnknownTag},
};

/// Reason why an object could not be placed.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlaceReason {
    /// One or more of the squares is off the board.
    #[error("the object does not fit on the board")]
    OutOfBounds,
    /// One or more of the squares was already occupied.
    #[error("the requested position was already occupied")]
    AlreadyOccupied,
    /// An animal of the same type is already on the board.
    #[error("an animal of that type was already placed")]
    AlreadyPlaced,
    /// A photo is already waiting to be resolved.
    #[error("a photo is already pending on this board")]
    PhotoPending,
    /// The square was already photographed.
    #[error("the requested square was already photographed")]
    AlreadyShot,
}

/// Error caused when attempting to place an object in an invalid position. Hands the
/// rejected object back to the caller.
#[derive(Error)]
#[error("could not place {}: {reason}", .object.kind())]
pub struct PlaceError {
    #[source]
    reason: CannotPlaceReason,
    object: BoardObject,
}

impl Debug for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl PlaceError {
    pub(crate) fn new(reason: CannotPlaceReason, object: BoardObject) -> Self {
        Self { reason, object }
    }

    /// Get the reason placement was aborted.
    pub fn reason(&self) -> CannotPlaceReason {
        self.reason
    }

    /// Get a reference to the object that was not placed.
    pub fn object(&self) -> &BoardObject {
        &self.object
    }

    /// Extract the object from this error.
    pub fn into_object(self) -> BoardObject {
        self.object
    }
}

/// Error returned when removing an object that is not on the board.
#[derive(Error)]
#[error("{} is not on the board", .object.kind())]
pub struct RemoveError {
    object: BoardObject,
}

impl Debug for RemoveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl RemoveError {
    pub(crate) fn new(object: BoardObject) -> Self {
        Self { object }
    }

    /// The object that was not found.
    pub fn object(&self) -> &BoardObject {
        &self.object
    }
}

/// A broken board invariant. These point at a defect in the caller or at corrupted shared
/// state, never at a user mistake.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum Inconsistency {
    /// Turn resolution needs exactly one photo.
    #[error("expected exactly one photo on the board, found {0}")]
    PhotoCount(usize),
    /// A type-based clear matched more than one object.
    #[error("expected at most one object of kinds {kinds:?}, found {found}")]
    MultipleMatches { kinds: Vec<ObjectKind>, found: usize },
    /// A remote board differed from the local one in more than one place.
    #[error("expected a single change from the remote board, found {0}")]
    MultipleChanges(usize),
    /// A remote board contains an animal that is not on the local board.
    #[error("remote board has a {0} that is not on the local board")]
    UnknownAnimal(AnimalType),
    /// A remote animal's segments don't line up with the local animal.
    #[error("remote {0} does not match the local one")]
    AnimalMismatch(AnimalType),
    /// A resolved photo could not be recorded.
    #[error("could not record the result of a photo at {0}")]
    Unrecordable(Coordinate),
}

/// Failure to encode or decode a persisted board.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The blob was not valid base64.
    #[error("board blob is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The payload was not valid JSON for the record format.
    #[error("board payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A record carried a type tag that is not in the catalog.
    #[error(transparent)]
    UnknownTag(#[from] UnknownTag),
    /// A record's params or attrs did not match its type tag.
    #[error("bad {field} for {tag}: {source}")]
    BadRecord {
        tag: String,
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// An animal's template runs off the side of the board.
    #[error("{animal} at {base} runs off the board")]
    OffBoard { animal: AnimalType, base: Coordinate },
    /// An animal's stored segments don't match what its template produces.
    #[error("stored segments do not match the {0} template")]
    TemplateMismatch(AnimalType),
    /// Replaying a decoded object onto the board failed.
    #[error("could not replay record: {0}")]
    Replay(#[from] PlaceError),
}
