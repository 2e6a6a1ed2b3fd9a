//! Static catalog of animal templates.
//!
//! Every animal type owns a fixed, ordered template of `(row offset, column offset,
//! segment kind)` entries. Offsets are relative to the base square, which is the
//! bottom-left corner of the template's bounding box: row offsets are never positive and
//! column offsets are never negative.
use std::{collections::HashMap, fmt, str::FromStr};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Coordinate;

/// Error returned when a type tag does not name anything in the catalog.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("unknown catalog tag {0:?}")]
pub struct UnknownTag(pub String);

/// The animals that can be hidden on a board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum AnimalType {
    /// Vermilion flycatcher pair: 2 segments, horizontal.
    Flycatcher,
    /// Pyrrhuloxia: 2 segments, vertical.
    Pyrrhuloxia,
    /// Snake: 3 segments, vertical.
    Snake,
    /// Centipede: 3 segments, horizontal.
    Centipede,
    /// Gila monster: 3 segments, horizontal.
    Gila,
    /// Jackrabbit: 3 segments, L shape.
    Jackrabbit,
    /// Javelina: 4 segments, square.
    Javelina,
    /// Ringtail: 4 segments, hooked tail.
    Ringtail,
    /// Bighorn sheep: 5 segments.
    Bighorn,
    /// Bobcat: 5 segments.
    Bobcat,
}

/// One cell of one animal type. Each kind belongs to exactly one [`AnimalType`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    FlycatcherMale,
    FlycatcherFemale,
    PyrrhuloxiaHead,
    PyrrhuloxiaBody,
    SnakeHead,
    SnakeBody,
    SnakeTail,
    CentipedeHead,
    CentipedeBody,
    CentipedeTail,
    GilaHead,
    GilaBody,
    GilaTail,
    JackrabbitEars,
    JackrabbitChest,
    JackrabbitButt,
    JavelinaMouth,
    JavelinaHead,
    JavelinaBack,
    JavelinaBottom,
    RingtailHead,
    RingtailBody,
    RingtailTail,
    RingtailTail2,
    BighornLhorn,
    BighornHead,
    BighornChest,
    BighornTorso,
    BighornButt,
    BobcatFeet,
    BobcatChest,
    BobcatHead,
    BobcatButt,
    BobcatBack,
}

/// A single template entry: row offset, column offset and the segment that lands there.
pub type TemplateEntry = (i32, i32, SegmentKind);

/// Projection of a template onto the board from a particular base square. Entries are in
/// template order.
pub type ShapeProjection = Vec<(Coordinate, SegmentKind)>;

impl AnimalType {
    /// Every animal type, in catalog order.
    pub const ALL: &'static [AnimalType] = &[
        AnimalType::Flycatcher,
        AnimalType::Pyrrhuloxia,
        AnimalType::Snake,
        AnimalType::Centipede,
        AnimalType::Gila,
        AnimalType::Jackrabbit,
        AnimalType::Javelina,
        AnimalType::Ringtail,
        AnimalType::Bighorn,
        AnimalType::Bobcat,
    ];

    /// Type tag used in the persisted record format.
    pub fn name(self) -> &'static str {
        match self {
            AnimalType::Flycatcher => "Flycatcher",
            AnimalType::Pyrrhuloxia => "Pyrrhuloxia",
            AnimalType::Snake => "Snake",
            AnimalType::Centipede => "Centipede",
            AnimalType::Gila => "Gila",
            AnimalType::Jackrabbit => "Jackrabbit",
            AnimalType::Javelina => "Javelina",
            AnimalType::Ringtail => "Ringtail",
            AnimalType::Bighorn => "Bighorn",
            AnimalType::Bobcat => "Bobcat",
        }
    }

    /// Display asset for the whole animal.
    pub fn asset(self) -> &'static str {
        match self {
            AnimalType::Flycatcher => "vermilion_flycatcher.jpeg",
            AnimalType::Pyrrhuloxia => "pyrrhuloxia.jpeg",
            AnimalType::Snake => "snake.jpeg",
            AnimalType::Centipede => "centipede.png",
            AnimalType::Gila => "gila.jpeg",
            AnimalType::Jackrabbit => "jackrabbit.png",
            AnimalType::Javelina => "javelina.jpeg",
            AnimalType::Ringtail => "ringtail.png",
            AnimalType::Bighorn => "big_horn_sheep.png",
            AnimalType::Bobcat => "bobcat.png",
        }
    }

    /// The template for this animal type.
    pub fn template(self) -> &'static [TemplateEntry] {
        use SegmentKind::*;
        match self {
            AnimalType::Flycatcher => &[(0, 0, FlycatcherMale), (0, 1, FlycatcherFemale)],
            AnimalType::Pyrrhuloxia => &[(0, 0, PyrrhuloxiaBody), (-1, 0, PyrrhuloxiaHead)],
            AnimalType::Snake => &[(0, 0, SnakeTail), (-1, 0, SnakeBody), (-2, 0, SnakeHead)],
            AnimalType::Centipede => &[
                (0, 0, CentipedeTail),
                (0, 1, CentipedeBody),
                (0, 2, CentipedeHead),
            ],
            AnimalType::Gila => &[(0, 0, GilaHead), (0, 1, GilaBody), (0, 2, GilaTail)],
            AnimalType::Jackrabbit => &[
                (0, 0, JackrabbitButt),
                (0, 1, JackrabbitChest),
                (-1, 1, JackrabbitEars),
            ],
            AnimalType::Javelina => &[
                (0, 0, JavelinaMouth),
                (0, 1, JavelinaBottom),
                (-1, 0, JavelinaHead),
                (-1, 1, JavelinaBack),
            ],
            AnimalType::Ringtail => &[
                (-1, 0, RingtailHead),
                (-1, 1, RingtailBody),
                (-1, 2, RingtailTail),
                (0, 2, RingtailTail2),
            ],
            AnimalType::Bighorn => &[
                (0, 0, BighornButt),
                (0, 1, BighornTorso),
                (0, 2, BighornChest),
                (-1, 1, BighornLhorn),
                (-1, 2, BighornHead),
            ],
            AnimalType::Bobcat => &[
                (0, 0, BobcatFeet),
                (0, 1, BobcatButt),
                (-1, 0, BobcatChest),
                (-1, 1, BobcatBack),
                (-2, 0, BobcatHead),
            ],
        }
    }

    /// Number of segments in this animal.
    pub fn len(self) -> usize {
        self.template().len()
    }

    /// Project this animal's template onto the board from `base`. Returns `None` if any
    /// column leaves the board. Rows are not checked here.
    pub fn project(self, base: Coordinate) -> Option<ShapeProjection> {
        self.template()
            .iter()
            .map(|&(drow, dcol, kind)| base.offset(drow, dcol).map(|coord| (coord, kind)))
            .collect()
    }
}

impl fmt::Display for AnimalType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

static ANIMALS_BY_NAME: Lazy<HashMap<&'static str, AnimalType>> = Lazy::new(|| {
    AnimalType::ALL
        .iter()
        .map(|&animal| (animal.name(), animal))
        .collect()
});

static SEGMENTS_BY_NAME: Lazy<HashMap<&'static str, SegmentKind>> = Lazy::new(|| {
    AnimalType::ALL
        .iter()
        .flat_map(|animal| animal.template().iter())
        .map(|&(_, _, kind)| (kind.name(), kind))
        .collect()
});

impl FromStr for AnimalType {
    type Err = UnknownTag;

    /// Look up an animal type by its record tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ANIMALS_BY_NAME
            .get(s)
            .copied()
            .ok_or_else(|| UnknownTag(s.to_owned()))
    }
}

impl SegmentKind {
    /// The animal type this segment is part of.
    pub fn animal(self) -> AnimalType {
        use SegmentKind::*;
        match self {
            FlycatcherMale | FlycatcherFemale => AnimalType::Flycatcher,
            PyrrhuloxiaHead | PyrrhuloxiaBody => AnimalType::Pyrrhuloxia,
            SnakeHead | SnakeBody | SnakeTail => AnimalType::Snake,
            CentipedeHead | CentipedeBody | CentipedeTail => AnimalType::Centipede,
            GilaHead | GilaBody | GilaTail => AnimalType::Gila,
            JackrabbitEars | JackrabbitChest | JackrabbitButt => AnimalType::Jackrabbit,
            JavelinaMouth | JavelinaHead | JavelinaBack | JavelinaBottom => AnimalType::Javelina,
            RingtailHead | RingtailBody | RingtailTail | RingtailTail2 => AnimalType::Ringtail,
            BighornLhorn | BighornHead | BighornChest | BighornTorso | BighornButt => {
                AnimalType::Bighorn
            }
            BobcatFeet | BobcatChest | BobcatHead | BobcatButt | BobcatBack => AnimalType::Bobcat,
        }
    }

    /// Type tag used in the persisted record format.
    pub fn name(self) -> &'static str {
        use SegmentKind::*;
        match self {
            FlycatcherMale => "FlycatcherMale",
            FlycatcherFemale => "FlycatcherFemale",
            PyrrhuloxiaHead => "PyrrhuloxiaHead",
            PyrrhuloxiaBody => "PyrrhuloxiaBody",
            SnakeHead => "SnakeHead",
            SnakeBody => "SnakeBody",
            SnakeTail => "SnakeTail",
            CentipedeHead => "CentipedeHead",
            CentipedeBody => "CentipedeBody",
            CentipedeTail => "CentipedeTail",
            GilaHead => "GilaHead",
            GilaBody => "GilaBody",
            GilaTail => "GilaTail",
            JackrabbitEars => "JackrabbitEars",
            JackrabbitChest => "JackrabbitChest",
            JackrabbitButt => "JackrabbitButt",
            JavelinaMouth => "JavelinaMouth",
            JavelinaHead => "JavelinaHead",
            JavelinaBack => "JavelinaBack",
            JavelinaBottom => "JavelinaBottom",
            RingtailHead => "RingtailHead",
            RingtailBody => "RingtailBody",
            RingtailTail => "RingtailTail",
            RingtailTail2 => "RingtailTail2",
            BighornLhorn => "BighornLhorn",
            BighornHead => "BighornHead",
            BighornChest => "BighornChest",
            BighornTorso => "BighornTorso",
            BighornButt => "BighornButt",
            BobcatFeet => "BobcatFeet",
            BobcatChest => "BobcatChest",
            BobcatHead => "BobcatHead",
            BobcatButt => "BobcatButt",
            BobcatBack => "BobcatBack",
        }
    }

    /// Display asset for this segment.
    pub fn asset(self) -> &'static str {
        use SegmentKind::*;
        match self {
            FlycatcherMale => "vermilion_flycatcher_male.jpeg",
            FlycatcherFemale => "vermilion_flycatcher_female.jpeg",
            PyrrhuloxiaHead => "pyrrhuloxia_head.jpeg",
            PyrrhuloxiaBody => "pyrrhuloxia_body.jpeg",
            SnakeHead => "snake_head.jpeg",
            SnakeBody => "snake_body.jpeg",
            SnakeTail => "snake_tail.jpeg",
            CentipedeHead => "centipede_head.png",
            CentipedeBody => "centipede_body.png",
            CentipedeTail => "centipede_tail.png",
            GilaHead => "gila_head.jpeg",
            GilaBody => "gila_body.jpeg",
            GilaTail => "gila_tail.jpeg",
            JackrabbitEars => "jackrabbit_ears.png",
            JackrabbitChest => "jackrabbit_chest.png",
            JackrabbitButt => "jackrabbit_butt.png",
            JavelinaMouth => "javelina_mouth.jpeg",
            JavelinaHead => "javelina_head.jpeg",
            JavelinaBack => "javelina_back.jpeg",
            JavelinaBottom => "javelina_bottom.jpeg",
            RingtailHead => "ringtail_head.jpeg",
            RingtailBody => "ringtail_body.jpeg",
            RingtailTail => "ringtail_tail.jpeg",
            RingtailTail2 => "ringtail_tail2.jpeg",
            BighornLhorn => "big_horn_sheep_lhorn.jpeg",
            BighornHead => "big_horn_sheep_head.jpeg",
            BighornChest => "big_horn_sheep_chest.jpeg",
            BighornTorso => "big_horn_sheep_torso.jpeg",
            BighornButt => "big_horn_sheep_butt.jpeg",
            BobcatFeet => "bobcat_feet.jpeg",
            BobcatChest => "bobcat_chest.jpeg",
            BobcatHead => "bobcat_head.jpeg",
            BobcatButt => "bobcat_butt.jpeg",
            BobcatBack => "bobcat_back.jpeg",
        }
    }
}

impl FromStr for SegmentKind {
    type Err = UnknownTag;

    /// Look up a segment kind by its record tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SEGMENTS_BY_NAME
            .get(s)
            .copied()
            .ok_or_else(|| UnknownTag(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn templates_are_anchored_bottom_left() {
        for &animal in AnimalType::ALL {
            let template = animal.template();
            assert!(template.iter().all(|&(drow, dcol, _)| drow <= 0 && dcol >= 0));
            assert_eq!(template.iter().map(|&(drow, _, _)| drow).max(), Some(0));
            assert_eq!(template.iter().map(|&(_, dcol, _)| dcol).min(), Some(0));
        }
    }

    #[test]
    fn segment_kinds_belong_to_their_template() {
        let mut seen = HashSet::new();
        for &animal in AnimalType::ALL {
            let mut offsets = HashSet::new();
            for &(drow, dcol, kind) in animal.template() {
                assert_eq!(kind.animal(), animal);
                assert!(seen.insert(kind), "{:?} listed twice", kind);
                assert!(offsets.insert((drow, dcol)));
            }
        }
        assert_eq!(seen.len(), 34);
    }

    #[test]
    fn names_round_trip() {
        for &animal in AnimalType::ALL {
            assert_eq!(animal.name().parse::<AnimalType>(), Ok(animal));
            for &(_, _, kind) in animal.template() {
                assert_eq!(kind.name().parse::<SegmentKind>(), Ok(kind));
            }
        }
        assert_eq!(
            "Tortoise".parse::<AnimalType>(),
            Err(UnknownTag("Tortoise".to_owned()))
        );
    }

    #[test]
    fn projection_rejects_column_overflow() {
        let base: Coordinate = "I5".parse().unwrap();
        assert!(AnimalType::Centipede.project(base).is_none());
        let base: Coordinate = "H5".parse().unwrap();
        let proj = AnimalType::Centipede.project(base).unwrap();
        let coords: Vec<String> = proj.iter().map(|(c, _)| c.to_string()).collect();
        assert_eq!(coords, ["H5", "I5", "J5"]);
    }

    #[test]
    fn projection_leaves_rows_unchecked() {
        let base: Coordinate = "A1".parse().unwrap();
        let proj = AnimalType::Snake.project(base).unwrap();
        assert_eq!(proj.len(), 3);
        assert!(!proj[2].0.in_bounds());
    }
}
