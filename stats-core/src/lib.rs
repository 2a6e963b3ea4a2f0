// stats-core/src/lib.rs

//! The core logic for the stat radar tool.
//! This crate is responsible for loading and saving the stats file,
//! flattening it for display, scoring form input and laying out the
//! charts. It is completely headless and contains no GUI code.

pub mod chart;
pub mod comments;
pub mod document;
pub mod error;
pub mod scoring;
pub mod store;
pub mod worker;

pub use document::{FlatStats, StatsDocument};
pub use error::StatsError;
pub use store::{DEFAULT_CATEGORIES, DEFAULT_STATS_FILE, StatsStore, default_flat_stats};
pub use worker::{StoreCommand, StoreEvent, StoreWorker};
