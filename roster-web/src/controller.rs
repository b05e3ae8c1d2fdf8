//! Year selector state machine
//!
//! `Uninitialized` until both collections are fetched and indexed, then
//! `Ready` for the rest of the process. Selection changes work on the
//! in-memory index only. A failed load is recorded and leaves the
//! controller `Uninitialized`; no partial roster is ever served.

use roster_common::config::RosterConfig;
use roster_common::{
    Classification, Error, GroupPhotoRecord, MemberClassifier, PhotoResolver, Result, YearIndex,
};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::source::RecordSource;

/// One entry of the year selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearOption {
    pub year: i32,
    /// `"2021 - 2022"`
    pub label: String,
}

impl YearOption {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            label: format!("{} - {}", year, year.saturating_add(1)),
        }
    }
}

/// Everything needed to render one year
#[derive(Debug, Clone, Serialize)]
pub struct RosterView<'a> {
    pub year: i32,
    #[serde(flatten)]
    pub classification: Classification<'a>,
    /// Year the banner photo was taken from, after fallback
    pub photo_year: i32,
    pub photo: &'a GroupPhotoRecord,
}

#[derive(Debug)]
enum ControllerState {
    Uninitialized,
    Ready { index: YearIndex, selected: i32 },
}

#[derive(Debug)]
pub struct YearSelectorController {
    state: ControllerState,
    classifier: MemberClassifier,
    resolver: PhotoResolver,
    last_error: Option<String>,
}

/// Fetch members, index them, then fetch and index photos
///
/// The photo fetch starts only after the member batch is indexed.
pub async fn fetch_index<S>(source: &S) -> Result<YearIndex>
where
    S: RecordSource + ?Sized,
{
    let mut index = YearIndex::new();

    let members = source.fetch_members().await?;
    let member_count = index.add_members(members)?;

    let photos = source.fetch_group_photos().await?;
    let photo_count = index.add_group_photos(photos)?;

    info!(
        members = member_count,
        photos = photo_count,
        latest_year = index.latest_year(),
        oldest_year = index.oldest_year(),
        "Roster records indexed"
    );
    Ok(index)
}

impl YearSelectorController {
    pub fn new(classifier: MemberClassifier, resolver: PhotoResolver) -> Self {
        Self {
            state: ControllerState::Uninitialized,
            classifier,
            resolver,
            last_error: None,
        }
    }

    pub fn from_config(config: &RosterConfig) -> Self {
        Self::new(
            MemberClassifier::new(config.visibility_policy),
            PhotoResolver::new(config.floor_year, config.default_year),
        )
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ControllerState::Ready { .. })
    }

    /// Message of the failure that kept the controller uninitialized
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn selected_year(&self) -> Option<i32> {
        match &self.state {
            ControllerState::Ready { selected, .. } => Some(*selected),
            ControllerState::Uninitialized => None,
        }
    }

    pub fn index(&self) -> Option<&YearIndex> {
        match &self.state {
            ControllerState::Ready { index, .. } => Some(index),
            ControllerState::Uninitialized => None,
        }
    }

    /// Fetch, index and enter `Ready`; failures are recorded and returned
    pub async fn load<S>(&mut self, source: &S) -> Result<()>
    where
        S: RecordSource + ?Sized,
    {
        match fetch_index(source).await {
            Ok(index) => self.on_loaded(index),
            Err(e) => {
                self.report_failure(&e);
                Err(e)
            }
        }
    }

    /// Uninitialized → Ready with `latest_year` selected
    ///
    /// Fails without leaving `Uninitialized` when the default photo year has
    /// no photo.
    pub fn on_loaded(&mut self, index: YearIndex) -> Result<()> {
        if self.is_ready() {
            warn!("Roster already loaded, ignoring second load");
            return Ok(());
        }

        if let Err(e) = self.resolver.check_default(&index) {
            self.report_failure(&e);
            return Err(e);
        }

        let selected = index.latest_year();
        info!(selected, "Roster ready");
        self.state = ControllerState::Ready { index, selected };
        self.last_error = None;
        Ok(())
    }

    /// Record a load failure; the controller stays `Uninitialized`
    pub fn report_failure(&mut self, err: &Error) {
        if err.is_fetch_failure() {
            error!("Failed to fetch roster records: {}", err);
        } else {
            error!("Failed to load roster: {}", err);
        }
        self.last_error = Some(err.to_string());
    }

    /// Selector entries, most recent year first
    pub fn year_options(&self) -> Result<Vec<YearOption>> {
        let index = self.index().ok_or(Error::NotReady)?;
        Ok(index.years().map(YearOption::new).collect())
    }

    /// Year shown when a request names none: always the most recent year,
    /// independent of [`select`](Self::select)
    pub fn landing_year(&self) -> Result<i32> {
        self.index()
            .map(YearIndex::latest_year)
            .ok_or(Error::NotReady)
    }

    /// Selection change: Ready → Ready with `year` selected
    ///
    /// Holds one selection per controller, for single-session callers.
    pub fn select(&mut self, year: i32) -> Result<RosterView<'_>> {
        match &mut self.state {
            ControllerState::Uninitialized => return Err(Error::NotReady),
            ControllerState::Ready { index, selected } => {
                if !index.has_members(year) {
                    return Err(Error::UnknownYear(year));
                }
                debug!(from = *selected, to = year, "Year selection changed");
                *selected = year;
            }
        }
        self.view(year)
    }

    /// View of the currently selected year
    pub fn current_view(&self) -> Result<RosterView<'_>> {
        let year = self.selected_year().ok_or(Error::NotReady)?;
        self.view(year)
    }

    /// View of any indexed year without changing the selection
    pub fn view(&self, year: i32) -> Result<RosterView<'_>> {
        let index = self.index().ok_or(Error::NotReady)?;
        let records = index.members_for(year).ok_or(Error::UnknownYear(year))?;

        let classification = self.classifier.classify(records);
        let (photo_year, photo) = self.resolver.resolve_photo(index, Some(year))?;

        Ok(RosterView {
            year,
            classification,
            photo_year,
            photo,
        })
    }
}
