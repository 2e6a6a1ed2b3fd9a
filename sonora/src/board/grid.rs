//! Defines the squares that make up the grid.

use std::{
    borrow::Borrow,
    ops::{Index, IndexMut},
};

use crate::{board::Coordinate, objects::SegmentRef};

/// What a square points at. Segments are referenced through their owning animal rather
/// than stored in the square.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Occupant {
    Segment(SegmentRef),
    Photo,
    Miss,
}

/// A single square of the board. A square holds at most one object.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Square {
    pub(super) obj: Option<Occupant>,
}

impl Square {
    /// The object currently in this square, if any.
    pub fn obj(&self) -> Option<Occupant> {
        self.obj
    }

    /// Whether nothing is in this square.
    pub fn is_empty(&self) -> bool {
        self.obj.is_none()
    }
}

/// The 10x10 grid of squares owned by a [`Board`][crate::board::Board].
#[derive(Debug, Clone, Eq, PartialEq)]
pub(super) struct Grid {
    squares: Box<[Square]>,
}

impl Grid {
    pub(super) fn new() -> Self {
        let squares = Coordinate::all().map(|_| Square::default()).collect();
        Self { squares }
    }

    /// Get a reference to the square at the given [`Coordinate`].
    pub(super) fn get<B: Borrow<Coordinate>>(&self, coord: B) -> Option<&Square> {
        coord
            .borrow()
            .linearize()
            .and_then(|i| self.squares.get(i))
    }

    /// Get a mutable reference to the square at the given [`Coordinate`].
    pub(super) fn get_mut<B: Borrow<Coordinate>>(&mut self, coord: B) -> Option<&mut Square> {
        coord
            .borrow()
            .linearize()
            .and_then(move |i| self.squares.get_mut(i))
    }
}

impl<B: Borrow<Coordinate>> Index<B> for Grid {
    type Output = Square;

    fn index(&self, coord: B) -> &Self::Output {
        self.get(coord).expect("coordinate out of bounds")
    }
}

impl<B: Borrow<Coordinate>> IndexMut<B> for Grid {
    fn index_mut(&mut self, coord: B) -> &mut Self::Output {
        self.get_mut(coord).expect("coordinate out of bounds")
    }
}
