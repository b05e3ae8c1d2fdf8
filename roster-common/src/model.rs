//! Roster record types
//!
//! `Raw*` types mirror the content API's JSON with every field optional.
//! Absent and `null` fields decode identically. Conversion into the typed
//! records enforces required fields and normalizes blank strings to absent,
//! so "has role" means the same thing everywhere downstream.

use serde::{Deserialize, Serialize};

use crate::error::{Error, RecordKind, Result};

/// Earliest year a record may carry
pub const MIN_YEAR: i32 = 1;

/// Latest year a record may carry; keeps `year + 1` labels in range
pub const MAX_YEAR: i32 = 9999;

/// Opaque image reference as stored by the content API
///
/// Only the image URL builder looks inside; everything else treats it as a
/// token that is either present or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(serde_json::Value);

impl ImageRef {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Asset reference id (`asset._ref`), if the object carries one
    pub fn asset_ref(&self) -> Option<&str> {
        self.0
            .get("asset")
            .and_then(|asset| asset.get("_ref"))
            .and_then(|r| r.as_str())
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Query response envelope: `{ "result": [ ... ] }`
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse<T> {
    #[serde(default = "Vec::new")]
    pub result: Vec<T>,
}

/// Member record as decoded from the content API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMember {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub officer: Option<bool>,
}

/// Group photo record as decoded from the content API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGroupPhoto {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

/// One member in one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberRecord {
    pub name: String,
    pub role: Option<String>,
    pub image: Option<ImageRef>,
    pub linkedin: Option<String>,
    /// Tri-state: `None` when the API omitted the flag
    pub officer: Option<bool>,
    pub year: i32,
}

impl MemberRecord {
    /// Build a typed record from a raw one at `position` in its batch
    pub fn from_raw(raw: RawMember, position: usize) -> Result<Self> {
        let year = checked_year(raw.year, RecordKind::Member, position)?;
        let name = non_blank(raw.name).ok_or(Error::MalformedRecord {
            kind: RecordKind::Member,
            position,
            field: "name",
            problem: "missing",
        })?;

        Ok(Self {
            name,
            role: non_blank(raw.role),
            image: raw.image.filter(|img| !img.as_value().is_null()),
            linkedin: non_blank(raw.linkedin),
            officer: raw.officer,
            year,
        })
    }

    pub fn is_officer(&self) -> bool {
        self.officer == Some(true)
    }

    pub fn has_role(&self) -> bool {
        self.role.is_some()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

/// Group photograph for one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupPhotoRecord {
    pub year: i32,
    pub image: ImageRef,
}

impl GroupPhotoRecord {
    pub fn from_raw(raw: RawGroupPhoto, position: usize) -> Result<Self> {
        let year = checked_year(raw.year, RecordKind::GroupPhoto, position)?;
        let image = raw
            .image
            .filter(|img| !img.as_value().is_null())
            .ok_or(Error::MalformedRecord {
                kind: RecordKind::GroupPhoto,
                position,
                field: "image",
                problem: "missing",
            })?;

        Ok(Self { year, image })
    }
}

/// Year must be present and within [`MIN_YEAR`, `MAX_YEAR`]
fn checked_year(year: Option<i32>, kind: RecordKind, position: usize) -> Result<i32> {
    let malformed = |problem| Error::MalformedRecord {
        kind,
        position,
        field: "year",
        problem,
    };
    let year = year.ok_or_else(|| malformed("missing"))?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(malformed("out-of-range"));
    }
    Ok(year)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
