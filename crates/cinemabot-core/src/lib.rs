#![deny(missing_docs)]
//! Cinemabot core library.
//!
//! Title resolution against the catalog backend, action-grid packing and
//! message rendering. Nothing in here knows about a concrete chat transport.

/// Catalog backend, typed records and the title resolver.
pub mod catalog;
/// Configuration management.
pub mod config;
/// Row packing for button grids.
pub mod grid;
/// Text layouts for detail and list messages.
pub mod render;
/// Callback routing tokens.
pub mod routing;
/// Delayed search command arguments.
pub mod schedule;
/// Utility functions.
pub mod utils;

#[cfg(test)]
pub mod testing;
