//! Year index over member and group photo records
//!
//! Built once at startup from the two API collections and read-only after.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{GroupPhotoRecord, MemberRecord, RawGroupPhoto, RawMember};

/// `latest_year` before any member is indexed
pub const EMPTY_LATEST_YEAR: i32 = 0;

/// `oldest_year` before any member is indexed
pub const EMPTY_OLDEST_YEAR: i32 = 99_999_999;

/// Members and group photos keyed by year
#[derive(Debug, Clone)]
pub struct YearIndex {
    members: BTreeMap<i32, Vec<MemberRecord>>,
    photos: BTreeMap<i32, GroupPhotoRecord>,
    latest_year: i32,
    oldest_year: i32,
}

impl Default for YearIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl YearIndex {
    pub fn new() -> Self {
        Self {
            members: BTreeMap::new(),
            photos: BTreeMap::new(),
            latest_year: EMPTY_LATEST_YEAR,
            oldest_year: EMPTY_OLDEST_YEAR,
        }
    }

    /// Index a batch of member records
    ///
    /// The batch is validated in full before anything is inserted: one
    /// record missing `year` or `name` rejects the batch and leaves the
    /// index as it was. Records keep API order within their year.
    ///
    /// Returns the number of records indexed.
    pub fn add_members<I>(&mut self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = RawMember>,
    {
        let batch = records
            .into_iter()
            .enumerate()
            .map(|(position, raw)| MemberRecord::from_raw(raw, position))
            .collect::<Result<Vec<_>>>()?;

        let count = batch.len();
        for record in batch {
            self.latest_year = self.latest_year.max(record.year);
            self.oldest_year = self.oldest_year.min(record.year);
            self.members.entry(record.year).or_default().push(record);
        }

        debug!(
            count,
            latest_year = self.latest_year,
            oldest_year = self.oldest_year,
            "Indexed member records"
        );
        Ok(count)
    }

    /// Index a batch of group photos, last record per year wins
    pub fn add_group_photos<I>(&mut self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = RawGroupPhoto>,
    {
        let batch = records
            .into_iter()
            .enumerate()
            .map(|(position, raw)| GroupPhotoRecord::from_raw(raw, position))
            .collect::<Result<Vec<_>>>()?;

        let count = batch.len();
        for photo in batch {
            let year = photo.year;
            if self.photos.insert(year, photo).is_some() {
                warn!(year, "Duplicate group photo for year, keeping the later record");
            }
        }

        debug!(count, "Indexed group photos");
        Ok(count)
    }

    /// Years with member records, most recent first
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.members.keys().rev().copied()
    }

    pub fn members_for(&self, year: i32) -> Option<&[MemberRecord]> {
        self.members.get(&year).map(Vec::as_slice)
    }

    pub fn photo_for(&self, year: i32) -> Option<&GroupPhotoRecord> {
        self.photos.get(&year)
    }

    /// True when at least one member is recorded for `year`
    pub fn has_members(&self, year: i32) -> bool {
        self.members_for(year).is_some_and(|m| !m.is_empty())
    }

    pub fn has_photo(&self, year: i32) -> bool {
        self.photos.contains_key(&year)
    }

    /// Most recent member year, or [`EMPTY_LATEST_YEAR`] when empty
    pub fn latest_year(&self) -> i32 {
        self.latest_year
    }

    /// Oldest member year, or [`EMPTY_OLDEST_YEAR`] when empty
    pub fn oldest_year(&self) -> i32 {
        self.oldest_year
    }

    /// True when no member has been indexed
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn member_count(&self) -> usize {
        self.members.values().map(Vec::len).sum()
    }

    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }
}
