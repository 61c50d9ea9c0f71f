//! Data structures for scenario configuration.
//!
//! This module contains pure data structures that describe a scenario
//! chapter: its terrain layout, its deployments and its item drops. All
//! structs are designed to be deserialized from RON files.
//!
//! **Note:** This module contains no IO - it only defines data types.
//! File loading is handled by `tactics_tools`.

mod scenario_data;

pub use scenario_data::{Deployment, ItemDrop, ScenarioData};
