//! Text rendering of boards.
use std::fmt;

use sonora::{
    board::{Board, ObjectRef, COLS},
    objects::AnimalType,
    Coordinate,
};

/// Print a player's own board with every animal visible.
pub fn show_revealed_board(board: &Board) {
    enum RevealedCell {
        Empty,
        Miss,
        Photo,
        NotShot(AnimalAbbreviation),
        Hit(AnimalAbbreviation),
        FullyShot(AnimalAbbreviation),
    }
    impl fmt::Display for RevealedCell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                RevealedCell::Empty => f.pad("~~"),
                RevealedCell::Miss => f.pad("x"),
                RevealedCell::Photo => f.pad("[]"),
                RevealedCell::NotShot(animal) => fmt::Display::fmt(animal, f),
                RevealedCell::Hit(animal) => f.pad(&format!("x{}", animal.abbrev())),
                RevealedCell::FullyShot(animal) => f.pad(&format!("X{}", animal.abbrev())),
            }
        }
    }
    show_board(Coordinate::rows().map(move |row| {
        row.map(move |coord| match board.object_at(coord) {
            None => RevealedCell::Empty,
            Some(ObjectRef::Miss(_)) => RevealedCell::Miss,
            Some(ObjectRef::Photo(_)) => RevealedCell::Photo,
            Some(ObjectRef::Segment(animal, _)) if animal.shot() => {
                RevealedCell::FullyShot(AnimalAbbreviation(animal.animal_type()))
            }
            Some(ObjectRef::Segment(animal, segment)) if segment.shot() => {
                RevealedCell::Hit(AnimalAbbreviation(animal.animal_type()))
            }
            Some(ObjectRef::Segment(animal, _)) => {
                RevealedCell::NotShot(AnimalAbbreviation(animal.animal_type()))
            }
        })
    }))
}

/// Print the view of the opponent's board, showing only what has been photographed.
pub fn show_obscured_board(board: &Board) {
    enum HiddenCell {
        NotShot,
        Miss,
        Photo,
        Hit(AnimalAbbreviation),
        FullyShot(AnimalAbbreviation),
    }
    impl fmt::Display for HiddenCell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                HiddenCell::NotShot => f.pad("~~"),
                HiddenCell::Miss => f.pad("x"),
                HiddenCell::Photo => f.pad("[]"),
                HiddenCell::Hit(animal) => f.pad(&format!("x{}", animal.abbrev())),
                HiddenCell::FullyShot(animal) => f.pad(&format!("X{}", animal.abbrev())),
            }
        }
    }
    show_board(Coordinate::rows().map(move |row| {
        row.map(move |coord| match board.object_at(coord) {
            Some(ObjectRef::Miss(_)) => HiddenCell::Miss,
            Some(ObjectRef::Photo(_)) => HiddenCell::Photo,
            Some(ObjectRef::Segment(animal, _)) if animal.shot() => {
                HiddenCell::FullyShot(AnimalAbbreviation(animal.animal_type()))
            }
            Some(ObjectRef::Segment(animal, segment)) if segment.shot() => {
                HiddenCell::Hit(AnimalAbbreviation(animal.animal_type()))
            }
            _ => HiddenCell::NotShot,
        })
    }))
}

/// Show the board by printing the grid. Takes an iterator over the rows of iterators over
/// the items
fn show_board(rows: impl Iterator<Item = impl Iterator<Item = impl fmt::Display>>) {
    print!("   ");
    for col in COLS.chars() {
        print!("{:^4}", col);
    }
    println!();
    for (i, row) in rows.enumerate() {
        print!("{:>2} ", i + 1);
        for cell in row {
            print!("{:^4}", cell);
        }
        println!();
    }
}

/// Display helper that prints the animal's two letter abbreviation.
pub struct AnimalAbbreviation(pub AnimalType);

impl AnimalAbbreviation {
    pub fn abbrev(&self) -> &'static str {
        match self.0 {
            AnimalType::Flycatcher => "fl",
            AnimalType::Pyrrhuloxia => "py",
            AnimalType::Snake => "sn",
            AnimalType::Centipede => "ce",
            AnimalType::Gila => "gi",
            AnimalType::Jackrabbit => "jr",
            AnimalType::Javelina => "jv",
            AnimalType::Ringtail => "rt",
            AnimalType::Bighorn => "bh",
            AnimalType::Bobcat => "bc",
        }
    }
}

impl fmt::Display for AnimalAbbreviation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.abbrev())
    }
}
