//! Group photo selection with downward fallback
//!
//! A year is eligible when it has a group photo and at least one member.
//! The search walks down from the requested year and gives up at the floor
//! year, returning the default year instead. The default year must carry a
//! photo; [`PhotoResolver::check_default`] asserts that at load time.

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::GroupPhotoRecord;
use crate::year_index::YearIndex;

/// Search gives up at or below this year
pub const DEFAULT_FLOOR_YEAR: i32 = 1980;

/// Year whose photo is shown when the search gives up
pub const DEFAULT_PHOTO_YEAR: i32 = 2022;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoResolver {
    floor_year: i32,
    default_year: i32,
}

impl Default for PhotoResolver {
    fn default() -> Self {
        Self::new(DEFAULT_FLOOR_YEAR, DEFAULT_PHOTO_YEAR)
    }
}

impl PhotoResolver {
    pub fn new(floor_year: i32, default_year: i32) -> Self {
        Self {
            floor_year,
            default_year,
        }
    }

    pub fn floor_year(&self) -> i32 {
        self.floor_year
    }

    pub fn default_year(&self) -> i32 {
        self.default_year
    }

    /// Year whose photo should be shown for `requested`
    ///
    /// Scan length is bounded by `requested - floor_year`.
    pub fn resolve_year(&self, index: &YearIndex, requested: Option<i32>) -> i32 {
        let Some(mut year) = requested else {
            return self.default_year;
        };

        while year > self.floor_year && !(index.has_photo(year) && index.has_members(year)) {
            year -= 1;
        }

        if year <= self.floor_year {
            debug!(
                requested = ?requested,
                default_year = self.default_year,
                "No eligible photo year above floor, using default"
            );
            return self.default_year;
        }

        year
    }

    /// Resolved year together with its photo
    pub fn resolve_photo<'a>(
        &self,
        index: &'a YearIndex,
        requested: Option<i32>,
    ) -> Result<(i32, &'a GroupPhotoRecord)> {
        let year = self.resolve_year(index, requested);
        // Only the default year can come back without a photo
        let photo = index
            .photo_for(year)
            .ok_or(Error::MissingDefaultPhoto(self.default_year))?;
        Ok((year, photo))
    }

    /// Fail when the default year has no photo
    pub fn check_default(&self, index: &YearIndex) -> Result<()> {
        if index.has_photo(self.default_year) {
            Ok(())
        } else {
            Err(Error::MissingDefaultPhoto(self.default_year))
        }
    }
}
