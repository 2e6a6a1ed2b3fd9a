//! Types for the things that can be placed on a board.
use std::fmt;

use crate::board::Coordinate;

pub use self::catalog::{AnimalType, SegmentKind, ShapeProjection, TemplateEntry, UnknownTag};

pub mod catalog;

/// Explicit back-reference from a segment to the animal that owns it. Boards hold at most
/// one animal of each type, so the type identifies the animal and the index identifies the
/// segment within its template.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SegmentRef {
    /// Type of the owning animal.
    pub animal: AnimalType,
    /// Position of the segment in the animal's segment list.
    pub index: usize,
}

/// A single square of an [`Animal`]. The location is fixed when the animal is built; only
/// the `shot` flag changes afterwards.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Segment {
    coord: Coordinate,
    kind: SegmentKind,
    index: usize,
    shot: bool,
}

impl Segment {
    pub(crate) fn new(coord: Coordinate, kind: SegmentKind, index: usize) -> Self {
        Self {
            coord,
            kind,
            index,
            shot: false,
        }
    }

    /// Location of this segment.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }

    /// Which part of which animal this is.
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// Whether this segment has been photographed.
    pub fn shot(&self) -> bool {
        self.shot
    }

    /// Reference to the animal that owns this segment.
    pub fn owner(&self) -> SegmentRef {
        SegmentRef {
            animal: self.kind.animal(),
            index: self.index,
        }
    }

    pub(crate) fn set_shot(&mut self, shot: bool) {
        self.shot = shot;
    }
}

/// A multi-square animal built from a catalog template and a base square.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Animal {
    animal_type: AnimalType,
    base: Coordinate,
    segments: Vec<Segment>,
}

impl Animal {
    /// Build an animal of the given type anchored at `base`. Returns `None` if the template
    /// runs off the left or right edge of the board. Rows are checked on placement.
    pub fn new(animal_type: AnimalType, base: Coordinate) -> Option<Self> {
        Self::make_segments(animal_type, base).map(|segments| Self {
            animal_type,
            base,
            segments,
        })
    }

    /// Compute the segments an animal of `animal_type` would have at `base`. The same type
    /// and base always yield the same segments in the same order.
    pub fn make_segments(animal_type: AnimalType, base: Coordinate) -> Option<Vec<Segment>> {
        animal_type.project(base).map(|proj| {
            proj.into_iter()
                .enumerate()
                .map(|(index, (coord, kind))| Segment::new(coord, kind, index))
                .collect()
        })
    }

    /// Type of this animal.
    pub fn animal_type(&self) -> AnimalType {
        self.animal_type
    }

    /// Base square the template was projected from.
    pub fn base(&self) -> Coordinate {
        self.base
    }

    /// Segments of this animal in template order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Get the segment at the given index in template order.
    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub(crate) fn segment_mut(&mut self, index: usize) -> Option<&mut Segment> {
        self.segments.get_mut(index)
    }

    /// Get the segment occupying the given square, if any.
    pub fn segment_at(&self, coord: Coordinate) -> Option<&Segment> {
        self.segments.iter().find(|seg| seg.coord == coord)
    }

    /// An animal is shot once every one of its segments is shot.
    pub fn shot(&self) -> bool {
        self.segments.iter().all(Segment::shot)
    }

    /// Number of segments that are still unshot.
    pub fn remaining(&self) -> usize {
        self.segments.iter().filter(|seg| !seg.shot).count()
    }
}

/// A transient marker declaring the square being photographed this turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Photo {
    coord: Coordinate,
}

impl Photo {
    /// Construct a photo aimed at `coord`.
    pub fn new(coord: Coordinate) -> Self {
        Self { coord }
    }

    /// Square this photo is aimed at.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }
}

/// A permanent marker left where a photo found nothing.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Miss {
    coord: Coordinate,
}

impl Miss {
    /// Construct a miss at `coord`.
    pub fn new(coord: Coordinate) -> Self {
        Self { coord }
    }

    /// Square of this miss.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }
}

/// Anything that can be listed in a board's contents.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum BoardObject {
    Animal(Animal),
    Photo(Photo),
    Miss(Miss),
}

impl BoardObject {
    /// Kind of this object, used for type-based lookups such as clearing a setup page.
    pub fn kind(&self) -> ObjectKind {
        match self {
            BoardObject::Animal(animal) => ObjectKind::Animal(animal.animal_type),
            BoardObject::Photo(_) => ObjectKind::Photo,
            BoardObject::Miss(_) => ObjectKind::Miss,
        }
    }

    /// Squares this object covers.
    pub fn coords(&self) -> Vec<Coordinate> {
        match self {
            BoardObject::Animal(animal) => animal.segments.iter().map(Segment::coord).collect(),
            BoardObject::Photo(photo) => vec![photo.coord],
            BoardObject::Miss(miss) => vec![miss.coord],
        }
    }

    /// Whether `other` refers to the same placed object as `self`. Animals are identified by
    /// type, unit objects by kind and location. Mutable state is ignored.
    pub fn same_object(&self, other: &BoardObject) -> bool {
        match (self, other) {
            (BoardObject::Animal(a), BoardObject::Animal(b)) => a.animal_type == b.animal_type,
            (BoardObject::Photo(a), BoardObject::Photo(b)) => a.coord == b.coord,
            (BoardObject::Miss(a), BoardObject::Miss(b)) => a.coord == b.coord,
            _ => false,
        }
    }

    /// Get the animal if this is one.
    pub fn as_animal(&self) -> Option<&Animal> {
        match self {
            BoardObject::Animal(animal) => Some(animal),
            _ => None,
        }
    }
}

impl From<Animal> for BoardObject {
    fn from(animal: Animal) -> Self {
        BoardObject::Animal(animal)
    }
}

impl From<Photo> for BoardObject {
    fn from(photo: Photo) -> Self {
        BoardObject::Photo(photo)
    }
}

impl From<Miss> for BoardObject {
    fn from(miss: Miss) -> Self {
        BoardObject::Miss(miss)
    }
}

/// The type of a [`BoardObject`], without its location or state.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ObjectKind {
    Animal(AnimalType),
    Photo,
    Miss,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ObjectKind::Animal(animal) => fmt::Display::fmt(animal, f),
            ObjectKind::Photo => f.pad("Photo"),
            ObjectKind::Miss => f.pad("Miss"),
        }
    }
}
