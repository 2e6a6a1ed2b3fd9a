//! Record format used to persist boards.
//!
//! A board is stored as an ordered list of `{type, params, attrs}` records. `params` holds
//! what is needed to rebuild an object's identity (its coordinates) and `attrs` holds its
//! mutable state. Animals nest one record per segment inside their `attrs`. For storage the
//! list is written as JSON and wrapped in standard base64.
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    board::{CodecError, Column, Coordinate},
    objects::{Animal, AnimalType, BoardObject, Miss, Photo, Segment, SegmentKind},
};

/// Type tag of a [`Photo`] record.
pub const PHOTO_TAG: &str = "Photo";
/// Type tag of a [`Miss`] record.
pub const MISS_TAG: &str = "Miss";

/// One serialized object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// Catalog tag naming the concrete type of the object.
    #[serde(rename = "type", alias = "class")]
    pub tag: String,
    /// Identity of the object.
    pub params: Value,
    /// Mutable state of the object.
    #[serde(default)]
    pub attrs: Value,
}

#[derive(Deserialize)]
struct UnitParams {
    row: i32,
    col: Column,
}

#[derive(Deserialize)]
struct AnimalParams {
    base_row: i32,
    base_col: Column,
}

#[derive(Deserialize)]
struct SegmentAttrs {
    shot: bool,
}

#[derive(Deserialize)]
struct AnimalAttrs {
    segments: Vec<ObjectRecord>,
}

impl ObjectRecord {
    fn unit(tag: &str, coord: Coordinate, attrs: Value) -> Self {
        Self {
            tag: tag.to_owned(),
            params: json!({ "row": coord.row, "col": coord.col }),
            attrs,
        }
    }

    fn params<T: DeserializeOwned>(&self) -> Result<T, CodecError> {
        T::deserialize(&self.params).map_err(|source| CodecError::BadRecord {
            tag: self.tag.clone(),
            field: "params",
            source,
        })
    }

    fn attrs<T: DeserializeOwned>(&self) -> Result<T, CodecError> {
        T::deserialize(&self.attrs).map_err(|source| CodecError::BadRecord {
            tag: self.tag.clone(),
            field: "attrs",
            source,
        })
    }

    fn coord(&self) -> Result<Coordinate, CodecError> {
        self.params::<UnitParams>()
            .map(|params| Coordinate::new(params.row, params.col))
    }
}

fn encode_segment(segment: &Segment) -> ObjectRecord {
    ObjectRecord::unit(
        segment.kind().name(),
        segment.coord(),
        json!({ "shot": segment.shot() }),
    )
}

/// Serialize a single object.
pub fn encode(object: &BoardObject) -> ObjectRecord {
    match object {
        BoardObject::Animal(animal) => {
            let base = animal.base();
            let segments: Vec<ObjectRecord> =
                animal.segments().iter().map(encode_segment).collect();
            ObjectRecord {
                tag: animal.animal_type().name().to_owned(),
                params: json!({ "base_row": base.row, "base_col": base.col }),
                attrs: json!({ "segments": segments }),
            }
        }
        BoardObject::Photo(photo) => ObjectRecord::unit(PHOTO_TAG, photo.coord(), json!({})),
        BoardObject::Miss(miss) => ObjectRecord::unit(MISS_TAG, miss.coord(), json!({})),
    }
}

/// Rebuild a single object from its record: look the type up by tag, rebuild identity from
/// `params`, then overlay `attrs`.
pub fn decode(record: &ObjectRecord) -> Result<BoardObject, CodecError> {
    match record.tag.as_str() {
        PHOTO_TAG => Ok(Photo::new(record.coord()?).into()),
        MISS_TAG => Ok(Miss::new(record.coord()?).into()),
        tag => decode_animal(tag.parse()?, record).map(BoardObject::Animal),
    }
}

fn decode_animal(animal_type: AnimalType, record: &ObjectRecord) -> Result<Animal, CodecError> {
    let params: AnimalParams = record.params()?;
    let base = Coordinate::new(params.base_row, params.base_col);
    let mut animal = Animal::new(animal_type, base).ok_or(CodecError::OffBoard {
        animal: animal_type,
        base,
    })?;
    let attrs: AnimalAttrs = record.attrs()?;
    if attrs.segments.len() != animal.segments().len() {
        return Err(CodecError::TemplateMismatch(animal_type));
    }
    for (index, seg_record) in attrs.segments.iter().enumerate() {
        let kind: SegmentKind = seg_record.tag.parse()?;
        let coord = seg_record.coord()?;
        let seg_attrs: SegmentAttrs = seg_record.attrs()?;
        match animal.segment_mut(index) {
            Some(segment) if segment.kind() == kind && segment.coord() == coord => {
                segment.set_shot(seg_attrs.shot);
            }
            _ => return Err(CodecError::TemplateMismatch(animal_type)),
        }
    }
    Ok(animal)
}

/// Wrap a list of records into an opaque storage blob.
pub fn encode_blob(records: &[ObjectRecord]) -> Result<String, CodecError> {
    Ok(STANDARD.encode(serde_json::to_vec(records)?))
}

/// Unwrap a storage blob into its list of records.
pub fn decode_blob(blob: &str) -> Result<Vec<ObjectRecord>, CodecError> {
    let bytes = STANDARD.decode(blob.trim())?;
    Ok(serde_json::from_slice(&bytes)?)
}
