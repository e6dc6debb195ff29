//! factorio-core -- catalog, event, state, and factory-id bookkeeping for a
//! discrete-event production-graph simulation.
//!
//! This crate is the pure data/logic layer: no file I/O, no JSON, no
//! logging side effects. [`factorio-sim`](../factorio_sim/index.html) and
//! [`factorio-planner`](../factorio_planner/index.html) build on top of it;
//! [`factorio-data`](../factorio_data/index.html) is where catalog loading
//! and event serialization live.
//!
//! # Key types
//!
//! - [`catalog::Catalog`] -- immutable item/recipe/factory/technology
//!   lookup tables, built via [`catalog::CatalogBuilder`].
//! - [`event::Event`] -- the six-variant event sum type.
//! - [`state::State`] -- mutable inventory and unlock sets.
//! - [`factory_id_map::FactoryIdMap`] -- collision-checked live factory ids.
//! - [`fixed::Speed`] -- deterministic fixed-point crafting speed.

pub mod catalog;
pub mod error;
pub mod event;
pub mod factory_id_map;
pub mod fixed;
pub mod id;
pub mod state;

pub use catalog::{Catalog, CatalogBuilder};
pub use error::CoreError;
pub use event::Event;
pub use factory_id_map::{FactoryIdMap, FactoryInstance};
pub use id::FactoryId;
pub use state::State;
