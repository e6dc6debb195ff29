//! factorio-planner -- recursive, memoizing search over the production
//! graph.
//!
//! [`planner::Planner`] materializes an event sequence from initial
//! conditions and a goal multiset of items via five mutually recursive
//! operations (`create_item`, `craft_recipe`, `create_factory`,
//! `create_technology` x2), each threaded with a by-value `visited` cycle
//! guard and a `dry_run`/commit protocol.

pub mod error;
pub mod planner;

#[cfg(test)]
mod tests;

pub use error::PlannerError;
pub use planner::Planner;
