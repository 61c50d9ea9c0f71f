//! # Tactics Development Tools
//!
//! Command-line tools for development:
//! - Scenario loading from the on-disk layout
//! - Scenario validation
//! - Terminal rendering of maps and reachable tiles

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod loader;
pub mod render;
