//! Implements the setup phase, where a player hides their animals one page at a time.
//!
//! Each page offers a pair of interchangeable animal types. Exactly one animal from each
//! page ends up on the board: placing an animal replaces whatever was already placed from
//! the same page.
use std::collections::HashSet;

#[cfg(feature = "rng_gen")]
use rand::Rng;
use tracing::{debug, info};

use crate::{
    board::{Board, Coordinate, Occupant},
    objects::{Animal, AnimalType, ObjectKind},
};

pub use self::errors::SetupError;

mod errors;

/// Pages offered by [`GameSetup::new`].
pub const DEFAULT_PAGES: &[[AnimalType; 2]] = &[
    [AnimalType::Flycatcher, AnimalType::Pyrrhuloxia],
    [AnimalType::Snake, AnimalType::Centipede],
    [AnimalType::Gila, AnimalType::Jackrabbit],
    [AnimalType::Javelina, AnimalType::Ringtail],
    [AnimalType::Bighorn, AnimalType::Bobcat],
];

/// Result of a successful [`GameSetup::advance_page`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PageAdvance {
    /// Moved on to the page with the given index.
    NextPage(usize),
    /// The final page was completed.
    SetupComplete,
}

/// Client-local staging area for animal placement.
#[derive(Debug, Clone)]
pub struct GameSetup {
    /// Pages of animal types, offered in order.
    pages: Vec<[AnimalType; 2]>,

    /// Index of the page currently offered.
    active_page: usize,

    /// Animal armed for placement, if any.
    selected: Option<AnimalType>,

    /// Board being built.
    board: Board,

    /// Set once the final page is advanced past.
    complete: bool,
}

impl Default for GameSetup {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSetup {
    /// Begin setup with the standard five pages of desert animals.
    pub fn new() -> Self {
        Self::from_pages(DEFAULT_PAGES.to_vec())
    }

    /// Begin setup with a custom list of pages. Fails if there are no pages or if any
    /// animal type is offered more than once.
    pub fn with_pages(pages: Vec<[AnimalType; 2]>) -> Result<Self, SetupError> {
        if pages.is_empty() {
            return Err(SetupError::NoPages);
        }
        let mut seen = HashSet::new();
        for &animal in pages.iter().flat_map(|page| page.iter()) {
            if !seen.insert(animal) {
                return Err(SetupError::DuplicateAnimal(animal));
            }
        }
        Ok(Self::from_pages(pages))
    }

    fn from_pages(pages: Vec<[AnimalType; 2]>) -> Self {
        Self {
            pages,
            active_page: 0,
            selected: None,
            board: Board::new(),
            complete: false,
        }
    }

    /// All pages in order.
    pub fn pages(&self) -> &[[AnimalType; 2]] {
        &self.pages
    }

    /// Index of the page currently offered.
    pub fn active_page(&self) -> usize {
        self.active_page
    }

    /// Animal types offered on the active page.
    pub fn available(&self) -> &[AnimalType; 2] {
        &self.pages[self.active_page]
    }

    fn page_kinds(&self) -> Vec<ObjectKind> {
        self.available()
            .iter()
            .map(|&animal| ObjectKind::Animal(animal))
            .collect()
    }

    /// Animal armed for placement, if any.
    pub fn selected(&self) -> Option<AnimalType> {
        self.selected
    }

    /// Board built so far.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whether the final page has been completed.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Arm an animal from the active page for placement. Does not touch the board.
    pub fn select(&mut self, animal: AnimalType) -> Result<(), SetupError> {
        if self.complete {
            return Err(SetupError::AlreadyComplete);
        }
        if !self.available().contains(&animal) {
            return Err(SetupError::NotOnPage(animal));
        }
        debug!("selected {}", animal);
        self.selected = Some(animal);
        Ok(())
    }

    /// Disarm the selected animal. Returns the previous selection.
    pub fn deselect(&mut self) -> Option<AnimalType> {
        self.selected.take()
    }

    /// Check whether an animal of type `animal` could be placed at `base`. Squares held by
    /// an animal from the active page don't count as occupied, since placing replaces it.
    pub fn is_valid_location(&self, animal: AnimalType, base: Coordinate) -> bool {
        let page = self.available();
        match animal.project(base) {
            None => false,
            Some(proj) => proj.iter().all(|(coord, _)| match self.board.square(*coord) {
                None => false,
                Some(square) => match square.obj() {
                    None => true,
                    Some(Occupant::Segment(seg)) => page.contains(&seg.animal),
                    Some(_) => false,
                },
            }),
        }
    }

    /// Place the selected animal at `base`, replacing any animal already placed from the
    /// active page.
    pub fn place_selected(&mut self, base: Coordinate) -> Result<(), SetupError> {
        if self.complete {
            return Err(SetupError::AlreadyComplete);
        }
        let animal = self.selected.ok_or(SetupError::NothingSelected)?;
        if !self.is_valid_location(animal, base) {
            return Err(SetupError::InvalidLocation { animal, base });
        }
        let new = Animal::new(animal, base).ok_or(SetupError::InvalidLocation { animal, base })?;

        let replaced = self.board.clear_of_types(&self.page_kinds())?;
        if let Err(err) = self.board.place(new.into()) {
            // Put the previous choice back so a rejected placement changes nothing.
            if let Some(old) = replaced {
                self.board.place(old)?;
            }
            return Err(err.into());
        }
        match replaced {
            Some(old) => debug!("moved {} to {}, replacing {}", animal, base, old.kind()),
            None => debug!("placed {} at {}", animal, base),
        }
        Ok(())
    }

    /// Move on to the next page. The active page must have an animal on the board. Past
    /// the final page this marks setup complete instead.
    pub fn advance_page(&mut self) -> Result<PageAdvance, SetupError> {
        if self.complete {
            return Err(SetupError::AlreadyComplete);
        }
        let page = *self.available();
        if !page.iter().any(|&animal| self.board.animal(animal).is_some()) {
            return Err(SetupError::PageIncomplete(self.active_page));
        }
        self.selected = None;
        if self.active_page + 1 < self.pages.len() {
            self.active_page += 1;
            debug!("advanced to page {}", self.active_page);
            Ok(PageAdvance::NextPage(self.active_page))
        } else {
            self.complete = true;
            info!("setup complete with {} animals", self.board.animals().count());
            Ok(PageAdvance::SetupComplete)
        }
    }

    /// Tries to finish setup. If every page is complete, returns the staged [`Board`].
    /// Otherwise returns self.
    pub fn finish(self) -> Result<Board, Self> {
        if self.complete {
            Ok(self.board)
        } else {
            Err(self)
        }
    }

    /// Take the staged board if setup is complete, leaving this setup reset to its first
    /// page.
    pub fn take_board(&mut self) -> Option<Board> {
        if !self.complete {
            return None;
        }
        let board = std::mem::take(&mut self.board);
        self.reset();
        Some(board)
    }

    /// Discard every placement and start again from the first page.
    pub fn reset(&mut self) {
        self.active_page = 0;
        self.selected = None;
        self.board = Board::new();
        self.complete = false;
    }

    /// Complete every remaining page by choosing one animal per page at random and placing
    /// it at a random valid location. Pages that already have an animal are kept as is.
    #[cfg(feature = "rng_gen")]
    pub fn randomize(&mut self, rng: &mut impl Rng) -> Result<(), SetupError> {
        while !self.complete {
            let page = *self.available();
            if !page.iter().any(|&animal| self.board.animal(animal).is_some()) {
                let first = page[rng.gen_range(0, page.len())];
                let animal = if self.has_room(first) {
                    first
                } else {
                    page.iter()
                        .copied()
                        .find(|&animal| self.has_room(animal))
                        .ok_or(SetupError::NoRoom(self.active_page))?
                };
                self.select(animal)?;
                loop {
                    let base: Coordinate = rng.gen();
                    if self.is_valid_location(animal, base) {
                        self.place_selected(base)?;
                        break;
                    }
                }
            }
            self.advance_page()?;
        }
        Ok(())
    }

    #[cfg(feature = "rng_gen")]
    fn has_room(&self, animal: AnimalType) -> bool {
        Coordinate::all().any(|base| self.is_valid_location(animal, base))
    }
}
