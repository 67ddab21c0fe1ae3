//! Command implementations for `rw`.

pub mod hotspots;
pub mod list;
pub mod map;
pub mod report;
pub mod show;
pub mod version;
