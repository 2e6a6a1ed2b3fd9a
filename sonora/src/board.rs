//! Types that make up the game board.

use tracing::{debug, error, warn};

use crate::objects::{
    Animal, AnimalType, BoardObject, Miss, ObjectKind, Photo, Segment, SegmentRef,
};

use self::grid::Grid;
pub use self::{
    codec::ObjectRecord,
    coordinate::{Column, Coordinate, ParseCoordinateError, COLS, ROWS},
    errors::{CannotPlaceReason, CodecError, Inconsistency, PlaceError, RemoveError},
    grid::{Occupant, Square},
};

pub mod codec;
mod coordinate;
mod errors;
mod grid;

/// Resolved view of what occupies a square.
#[derive(Debug, Copy, Clone)]
pub enum ObjectRef<'a> {
    /// A segment along with the animal that owns it.
    Segment(&'a Animal, &'a Segment),
    Photo(&'a Photo),
    Miss(&'a Miss),
}

/// Result of resolving the photo on a board.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShotOutcome {
    /// The photo found nothing and a miss was recorded.
    Miss(Coordinate),
    /// The photo caught a segment of the given animal, which still has unshot segments.
    Hit(AnimalType, Coordinate),
    /// The photo caught the last unshot segment of the given animal.
    FullyShot(AnimalType, Coordinate),
}

impl ShotOutcome {
    /// Square that was photographed.
    pub fn coord(&self) -> Coordinate {
        match *self {
            ShotOutcome::Miss(coord)
            | ShotOutcome::Hit(_, coord)
            | ShotOutcome::FullyShot(_, coord) => coord,
        }
    }

    /// Get the animal that was hit, if any.
    pub fn animal(&self) -> Option<AnimalType> {
        match *self {
            ShotOutcome::Miss(_) => None,
            ShotOutcome::Hit(animal, _) | ShotOutcome::FullyShot(animal, _) => Some(animal),
        }
    }
}

/// A single square that changed when a remote board was reconciled into a local one.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BoardChange {
    /// A segment was newly shot.
    Hit {
        segment: SegmentRef,
        coord: Coordinate,
    },
    /// A miss was newly recorded.
    Miss(Coordinate),
}

impl BoardChange {
    /// Square that changed.
    pub fn coord(&self) -> Coordinate {
        match *self {
            BoardChange::Hit { coord, .. } | BoardChange::Miss(coord) => coord,
        }
    }
}

/// Represents a single player's board: the grid of squares plus the ordered list of placed
/// objects.
///
/// Segments are never listed in `contents` directly, they are reached through their
/// animal. Every segment occupies the square matching its coordinate, except while a photo
/// sits on top of it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Board {
    /// Grid of squares.
    grid: Grid,

    /// Placed objects in insertion order.
    contents: Vec<BoardObject>,

    /// Animal whose last segment was shot by the most recent resolution, until taken.
    fully_shot: Option<AnimalType>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Construct an empty board.
    pub fn new() -> Self {
        Self {
            grid: Grid::new(),
            contents: Vec::new(),
            fully_shot: None,
        }
    }

    /// All placed objects in insertion order.
    pub fn contents(&self) -> &[BoardObject] {
        &self.contents
    }

    /// Whether nothing is placed on this board.
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Get the square at the given coordinate. Returns `None` if it is off the board.
    pub fn square(&self, coord: Coordinate) -> Option<&Square> {
        self.grid.get(coord)
    }

    /// Resolve what occupies the square at `coord`.
    pub fn object_at(&self, coord: Coordinate) -> Option<ObjectRef> {
        match self.grid.get(coord)?.obj? {
            Occupant::Segment(seg) => {
                let animal = self.animal(seg.animal)?;
                animal
                    .segment(seg.index)
                    .map(|segment| ObjectRef::Segment(animal, segment))
            }
            Occupant::Photo => self.photo().map(ObjectRef::Photo),
            Occupant::Miss => self
                .misses()
                .find(|miss| miss.coord() == coord)
                .map(ObjectRef::Miss),
        }
    }

    /// Get an iterator over all animals on this board.
    pub fn animals(&self) -> impl Iterator<Item = &Animal> {
        self.contents.iter().filter_map(BoardObject::as_animal)
    }

    /// Get the animal of the given type, if it is on this board.
    pub fn animal(&self, animal_type: AnimalType) -> Option<&Animal> {
        self.animals()
            .find(|animal| animal.animal_type() == animal_type)
    }

    /// Get the pending photo, if any.
    pub fn photo(&self) -> Option<&Photo> {
        self.contents.iter().find_map(|obj| match obj {
            BoardObject::Photo(photo) => Some(photo),
            _ => None,
        })
    }

    /// Get an iterator over all misses on this board.
    pub fn misses(&self) -> impl Iterator<Item = &Miss> {
        self.contents.iter().filter_map(|obj| match obj {
            BoardObject::Miss(miss) => Some(miss),
            _ => None,
        })
    }

    /// Returns true if the board holds at least one animal and every animal is shot.
    pub fn all_animals_shot(&self) -> bool {
        let mut animals = self.animals().peekable();
        animals.peek().is_some() && animals.all(Animal::shot)
    }

    /// Take the "animal fully shot" signal left by the last resolution. Returns it at most
    /// once.
    pub fn take_fully_shot(&mut self) -> Option<AnimalType> {
        self.fully_shot.take()
    }

    /// Check whether `object` could be placed without placing it.
    pub fn check_placement(&self, object: &BoardObject) -> Result<(), CannotPlaceReason> {
        match object {
            BoardObject::Animal(animal) => {
                if self.animal(animal.animal_type()).is_some() {
                    return Err(CannotPlaceReason::AlreadyPlaced);
                }
                for segment in animal.segments() {
                    match self.grid.get(segment.coord()) {
                        None => return Err(CannotPlaceReason::OutOfBounds),
                        Some(square) if !square.is_empty() => {
                            return Err(CannotPlaceReason::AlreadyOccupied)
                        }
                        _ => {}
                    }
                }
                Ok(())
            }
            BoardObject::Photo(photo) => {
                if self.photo().is_some() {
                    return Err(CannotPlaceReason::PhotoPending);
                }
                match self.grid.get(photo.coord()) {
                    None => Err(CannotPlaceReason::OutOfBounds),
                    Some(square) => match square.obj {
                        None => Ok(()),
                        // A photo may sit on top of a segment it has not caught yet.
                        Some(Occupant::Segment(seg)) if !self.segment_shot(seg) => Ok(()),
                        Some(Occupant::Segment(_)) | Some(Occupant::Miss) => {
                            Err(CannotPlaceReason::AlreadyShot)
                        }
                        Some(Occupant::Photo) => Err(CannotPlaceReason::PhotoPending),
                    },
                }
            }
            BoardObject::Miss(miss) => match self.grid.get(miss.coord()) {
                None => Err(CannotPlaceReason::OutOfBounds),
                Some(square) if !square.is_empty() => Err(CannotPlaceReason::AlreadyOccupied),
                Some(_) => Ok(()),
            },
        }
    }

    /// Place an object on the board. Either every square the object covers is claimed and
    /// the object is appended to the contents, or the board is left untouched and the
    /// object is handed back in the error.
    pub fn place(&mut self, object: BoardObject) -> Result<(), PlaceError> {
        if let Err(reason) = self.check_placement(&object) {
            debug!("rejected placement of {}: {}", object.kind(), reason);
            return Err(PlaceError::new(reason, object));
        }
        // Already ensured that every square is on the board and free.
        match &object {
            BoardObject::Animal(animal) => {
                for segment in animal.segments() {
                    self.grid[segment.coord()].obj = Some(Occupant::Segment(segment.owner()));
                }
            }
            BoardObject::Photo(photo) => self.grid[photo.coord()].obj = Some(Occupant::Photo),
            BoardObject::Miss(miss) => self.grid[miss.coord()].obj = Some(Occupant::Miss),
        }
        debug!("placed {} at {:?}", object.kind(), object.coords());
        self.contents.push(object);
        Ok(())
    }

    /// Remove an object from the board, clearing every square it covers. Removing a photo
    /// puts back any segment it was covering. Returns the removed object, with its current
    /// state, if it was present.
    pub fn remove(&mut self, object: &BoardObject) -> Result<BoardObject, RemoveError> {
        match self.contents.iter().position(|obj| obj.same_object(object)) {
            Some(idx) => Ok(self.remove_at(idx)),
            None => {
                debug!("{} not present, nothing removed", object.kind());
                Err(RemoveError::new(object.clone()))
            }
        }
    }

    fn remove_at(&mut self, idx: usize) -> BoardObject {
        let object = self.contents.remove(idx);
        match &object {
            BoardObject::Animal(animal) => {
                for segment in animal.segments() {
                    if let Some(square) = self.grid.get_mut(segment.coord()) {
                        // Leave a photo that is covering this segment alone.
                        if square.obj == Some(Occupant::Segment(segment.owner())) {
                            square.obj = None;
                        }
                    }
                }
            }
            BoardObject::Photo(photo) => {
                let restored = self.segment_ref_at(photo.coord()).map(Occupant::Segment);
                if let Some(square) = self.grid.get_mut(photo.coord()) {
                    square.obj = restored;
                }
            }
            BoardObject::Miss(miss) => {
                if let Some(square) = self.grid.get_mut(miss.coord()) {
                    square.obj = None;
                }
            }
        }
        object
    }

    /// Remove the single object whose kind is in `kinds`. Nothing matching is not an error.
    ///
    /// More than one match means a caller broke the uniqueness it is responsible for. This
    /// is logged at `error` level and returned as [`Inconsistency::MultipleMatches`] in every
    /// build, with the board left untouched, so a collaborator can surface it instead of the
    /// process aborting.
    pub fn clear_of_types(
        &mut self,
        kinds: &[ObjectKind],
    ) -> Result<Option<BoardObject>, Inconsistency> {
        let matches: Vec<usize> = self
            .contents
            .iter()
            .enumerate()
            .filter(|(_, obj)| kinds.contains(&obj.kind()))
            .map(|(idx, _)| idx)
            .collect();
        match matches.as_slice() {
            [] => {
                debug!("no object of kinds {:?} to clear", kinds);
                Ok(None)
            }
            [idx] => Ok(Some(self.remove_at(*idx))),
            _ => {
                error!("{} objects match kinds {:?}", matches.len(), kinds);
                Err(Inconsistency::MultipleMatches {
                    kinds: kinds.to_vec(),
                    found: matches.len(),
                })
            }
        }
    }

    /// Resolve the pending photo into either a shot segment or a permanent miss.
    ///
    /// The photo is removed. If it was aimed at an unshot segment, that segment is marked
    /// shot and left in place; if this finishes off its animal, the animal is reported as
    /// [`ShotOutcome::FullyShot`] and left in [`take_fully_shot`][Self::take_fully_shot].
    /// Otherwise a [`Miss`] is placed where the photo was.
    pub fn resolve_shot(&mut self) -> Result<ShotOutcome, Inconsistency> {
        let photos: Vec<(usize, Coordinate)> = self
            .contents
            .iter()
            .enumerate()
            .filter_map(|(idx, obj)| match obj {
                BoardObject::Photo(photo) => Some((idx, photo.coord())),
                _ => None,
            })
            .collect();
        let (idx, coord) = match photos.as_slice() {
            [photo] => *photo,
            _ => {
                error!("cannot resolve shot with {} photos", photos.len());
                return Err(Inconsistency::PhotoCount(photos.len()));
            }
        };

        let target = self.segment_ref_at(coord).filter(|seg| !self.segment_shot(*seg));
        if target.is_none() {
            // Check before touching anything so a failure leaves the photo in place.
            if let Some(square) = self.grid.get(coord) {
                if square.obj != Some(Occupant::Photo) {
                    error!("photo at {} is not in its square", coord);
                    return Err(Inconsistency::Unrecordable(coord));
                }
            }
        }
        self.remove_at(idx);

        match target {
            None => {
                self.place(Miss::new(coord).into()).map_err(|err| {
                    error!("could not record miss: {}", err);
                    Inconsistency::Unrecordable(coord)
                })?;
                debug!("photo at {} missed", coord);
                Ok(ShotOutcome::Miss(coord))
            }
            Some(seg) => match self.mark_shot(seg).map(Animal::shot) {
                Some(true) => {
                    debug!("photo at {} finished off the {}", coord, seg.animal);
                    self.fully_shot = Some(seg.animal);
                    Ok(ShotOutcome::FullyShot(seg.animal, coord))
                }
                Some(false) => {
                    debug!("photo at {} caught the {}", coord, seg.animal);
                    Ok(ShotOutcome::Hit(seg.animal, coord))
                }
                None => Err(Inconsistency::Unrecordable(coord)),
            },
        }
    }

    /// Bring this board up to date with a freshly fetched copy of the same board.
    ///
    /// Finds the single square where `remote` is ahead of `self`: either a newly shot
    /// segment or a new miss, and applies it. Returns `Ok(None)` if the boards already
    /// agree, which makes reconciling the same remote board twice a no-op. More than one
    /// difference, or animals that don't line up, are an [`Inconsistency`].
    pub fn reconcile(&mut self, remote: &Board) -> Result<Option<BoardChange>, Inconsistency> {
        let mut changes = Vec::new();
        for object in remote.contents() {
            match object {
                BoardObject::Animal(remote_animal) => {
                    let animal_type = remote_animal.animal_type();
                    let local = self
                        .animal(animal_type)
                        .ok_or(Inconsistency::UnknownAnimal(animal_type))?;
                    if local.segments().len() != remote_animal.segments().len() {
                        return Err(Inconsistency::AnimalMismatch(animal_type));
                    }
                    let pairs = local.segments().iter().zip(remote_animal.segments());
                    for (local_seg, remote_seg) in pairs {
                        if local_seg.coord() != remote_seg.coord() {
                            return Err(Inconsistency::AnimalMismatch(animal_type));
                        }
                        if remote_seg.shot() && !local_seg.shot() {
                            changes.push(BoardChange::Hit {
                                segment: local_seg.owner(),
                                coord: local_seg.coord(),
                            });
                        }
                    }
                }
                BoardObject::Miss(miss) => {
                    if !self.misses().any(|local| local.coord() == miss.coord()) {
                        changes.push(BoardChange::Miss(miss.coord()));
                    }
                }
                BoardObject::Photo(photo) => {
                    warn!("ignoring photo at {} on remote board", photo.coord());
                }
            }
        }

        match changes.as_slice() {
            [] => Ok(None),
            [change] => {
                let change = *change;
                match change {
                    BoardChange::Hit { segment, coord } => {
                        let shot = self.mark_shot(segment).map(Animal::shot);
                        if shot == Some(true) {
                            self.fully_shot = Some(segment.animal);
                        }
                        debug!("reconciled hit on {} at {}", segment.animal, coord);
                    }
                    BoardChange::Miss(coord) => {
                        self.place(Miss::new(coord).into()).map_err(|err| {
                            error!("could not reconcile miss: {}", err);
                            Inconsistency::Unrecordable(coord)
                        })?;
                        debug!("reconciled miss at {}", coord);
                    }
                }
                Ok(Some(change))
            }
            _ => {
                error!("remote board differs in {} places", changes.len());
                Err(Inconsistency::MultipleChanges(changes.len()))
            }
        }
    }

    /// Mark a segment shot and point its square back at it. Returns the owning animal.
    fn mark_shot(&mut self, seg: SegmentRef) -> Option<&Animal> {
        let animal = self.contents.iter_mut().find_map(|obj| match obj {
            BoardObject::Animal(animal) if animal.animal_type() == seg.animal => Some(animal),
            _ => None,
        })?;
        let segment = animal.segment_mut(seg.index)?;
        segment.set_shot(true);
        let coord = segment.coord();
        if let Some(square) = self.grid.get_mut(coord) {
            square.obj = Some(Occupant::Segment(seg));
        }
        self.animal(seg.animal)
    }

    /// Find the segment whose coordinate is `coord`, whether or not it currently occupies
    /// its square.
    fn segment_ref_at(&self, coord: Coordinate) -> Option<SegmentRef> {
        self.animals()
            .find_map(|animal| animal.segment_at(coord))
            .map(Segment::owner)
    }

    fn segment_shot(&self, seg: SegmentRef) -> bool {
        self.animal(seg.animal)
            .and_then(|animal| animal.segment(seg.index))
            .map_or(false, Segment::shot)
    }

    /// Serialize this board as an ordered list of records.
    pub fn serialize(&self) -> Vec<ObjectRecord> {
        self.contents.iter().map(codec::encode).collect()
    }

    /// Rebuild a board from a list of records by replaying placement of every object.
    pub fn deserialize(records: &[ObjectRecord]) -> Result<Self, CodecError> {
        let mut board = Self::new();
        for record in records {
            board.place(codec::decode(record)?)?;
        }
        Ok(board)
    }

    /// Serialize this board into an opaque storage blob.
    pub fn to_blob(&self) -> Result<String, CodecError> {
        codec::encode_blob(&self.serialize())
    }

    /// Rebuild a board from a storage blob. An absent or empty blob is an empty board.
    pub fn from_blob(blob: Option<&str>) -> Result<Self, CodecError> {
        match blob.map(str::trim) {
            None | Some("") => Ok(Self::new()),
            Some(blob) => Self::deserialize(&codec::decode_blob(blob)?),
        }
    }
}
