//! HTTP API handlers for roster-web

pub mod buildinfo;
pub mod health;
pub mod roster;
pub mod ui;

pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use roster::{get_roster, get_years};
pub use ui::roster_page;
