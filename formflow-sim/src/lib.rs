//! Peak panel demand simulation over annotated pour events.
//!
//! This crate turns a project table into a day-by-day count of panels that
//! are on a wall or curing, and derives the fleet size and reports from it.

pub mod export;
pub mod manifest;
pub mod standardization;
pub mod summary;
pub mod timeline;

pub use summary::DemandSummary;
pub use timeline::{
    ActiveInterval, DailyInventorySnapshot, DemandSimulator, InventoryTimeline, ScanStrategy,
};
