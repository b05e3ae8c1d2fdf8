//! Member ordering and section assignment for one year's roster
//!
//! Two passes over the year's records:
//! 1. Stable sort: role-bearing records first, ordered by [`ROLE_PRIORITY`];
//!    unknown roles after named ones; role-less records last.
//! 2. Partition: officers in sorted order, everyone else bucketed by
//!    image/role presence (see [`Bucket`]).
//!
//! The classifier borrows records and decides order only. Markup belongs to
//! the renderer.

use serde::{Deserialize, Serialize};

use crate::model::MemberRecord;

/// Named roles in display order, matched case-insensitively
pub const ROLE_PRIORITY: [&str; 9] = [
    "general manager",
    "assistant general manager",
    "design manager",
    "assistant design manager",
    "cad technician",
    "construction manager",
    "assistant construction manager",
    "financial manager",
    "outreach manager",
];

/// Priority of a role in [`ROLE_PRIORITY`], `None` for unlisted roles
pub fn role_priority(role: &str) -> Option<usize> {
    let lowered = role.to_lowercase();
    ROLE_PRIORITY.iter().position(|named| *named == lowered)
}

/// Non-officer display bucket, declared in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    ImageRole,
    ImageNoRole,
    NoImageRole,
    NoImageNoRole,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [
        Bucket::ImageRole,
        Bucket::ImageNoRole,
        Bucket::NoImageRole,
        Bucket::NoImageNoRole,
    ];

    pub fn of(member: &MemberRecord) -> Self {
        match (member.has_image(), member.has_role()) {
            (true, true) => Bucket::ImageRole,
            (true, false) => Bucket::ImageNoRole,
            (false, true) => Bucket::NoImageRole,
            (false, false) => Bucket::NoImageNoRole,
        }
    }
}

/// Rule deciding when the members section title is shown
///
/// `ExplicitFlag` only counts records whose officer flag is explicitly
/// `false`; a year whose records all omit the flag shows no members title
/// even though those records are listed as members. `AnyNonOfficer` counts
/// every record that is not an officer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisibilityPolicy {
    #[default]
    ExplicitFlag,
    AnyNonOfficer,
}

/// Which section titles to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionVisibility {
    pub officers: bool,
    pub members: bool,
}

impl SectionVisibility {
    pub fn of(records: &[MemberRecord], policy: VisibilityPolicy) -> Self {
        let officers = records.iter().any(|m| m.officer == Some(true));
        let members = match policy {
            VisibilityPolicy::ExplicitFlag => records.iter().any(|m| m.officer == Some(false)),
            VisibilityPolicy::AnyNonOfficer => records.iter().any(|m| !m.is_officer()),
        };
        Self { officers, members }
    }
}

/// Ordered roster for one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification<'a> {
    pub officers: Vec<&'a MemberRecord>,
    pub members: Vec<&'a MemberRecord>,
    pub visibility: SectionVisibility,
}

/// Orders and partitions one year's members
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberClassifier {
    policy: VisibilityPolicy,
}

impl MemberClassifier {
    pub fn new(policy: VisibilityPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> VisibilityPolicy {
        self.policy
    }

    pub fn classify<'a>(&self, records: &'a [MemberRecord]) -> Classification<'a> {
        let sorted = sort_by_role(records);

        let mut officers = Vec::new();
        let mut buckets: [Vec<&MemberRecord>; 4] = Default::default();
        for member in sorted {
            if member.is_officer() {
                officers.push(member);
            } else {
                buckets[Bucket::of(member) as usize].push(member);
            }
        }

        Classification {
            officers,
            members: buckets.into_iter().flatten().collect(),
            visibility: SectionVisibility::of(records, self.policy),
        }
    }
}

/// Stable role sort; input order breaks every tie
pub fn sort_by_role(records: &[MemberRecord]) -> Vec<&MemberRecord> {
    let mut sorted: Vec<&MemberRecord> = records.iter().collect();
    sorted.sort_by_key(|m| match m.role.as_deref() {
        Some(role) => (0u8, role_priority(role).unwrap_or(usize::MAX)),
        None => (1u8, usize::MAX),
    });
    sorted
}
