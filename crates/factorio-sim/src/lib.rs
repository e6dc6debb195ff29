//! factorio-sim -- the tick-driven simulation engine.
//!
//! [`simulator::Simulator`] consumes a [`factorio_core::Catalog`], an event
//! list, and an initial inventory, and deterministically advances a
//! discrete-tick world through ten ordered intra-tick phases until a
//! recorded `Victory` tick is reached.

pub mod error;
pub mod simulator;


pub use error::SimError;
pub use simulator::Simulator;
