//! # Roster Common Library
//!
//! Core of the roster service, free of HTTP and rendering:
//! - Record types decoded from the content API
//! - Year index over members and group photos
//! - Member ordering and section assignment
//! - Group photo fallback search
//! - Image URL construction
//! - Configuration loading

pub mod classifier;
pub mod config;
pub mod error;
pub mod image;
pub mod model;
pub mod photo;
pub mod year_index;

pub use classifier::{Bucket, Classification, MemberClassifier, SectionVisibility, VisibilityPolicy};
pub use error::{Error, RecordKind, Result};
pub use model::{GroupPhotoRecord, ImageRef, MemberRecord, RawGroupPhoto, RawMember};
pub use photo::PhotoResolver;
pub use year_index::YearIndex;
