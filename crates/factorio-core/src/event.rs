//! The event sum type.
//!
//! Six variants, each carrying a timestamp. In the original source this was
//! an inheritance hierarchy (`Event` -> `FactoryEvent` -> `{Start, Stop,
//! Build, Destroy}`) downcast at runtime via a `type` string; here it is a
//! closed Rust enum, so phase partitioning ([`crate::event::EventKind`]) is
//! a match, not a downcast.

use crate::id::FactoryId;

pub type Timestamp = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Research {
        timestamp: Timestamp,
        technology: String,
    },
    Build {
        timestamp: Timestamp,
        factory_type: String,
        factory_name: String,
        factory_id: FactoryId,
    },
    Destroy {
        timestamp: Timestamp,
        factory_id: FactoryId,
    },
    Start {
        timestamp: Timestamp,
        factory_id: FactoryId,
        recipe: String,
    },
    Stop {
        timestamp: Timestamp,
        factory_id: FactoryId,
    },
    Victory {
        timestamp: Timestamp,
    },
}

/// Discriminant used by the simulator to partition a tick's events before
/// phases 4-9 apply them (spec phase 2: research vs. factory-addressed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Research,
    Build,
    Destroy,
    Start,
    Stop,
    Victory,
}

impl Event {
    pub fn timestamp(&self) -> Timestamp {
        match self {
            Event::Research { timestamp, .. }
            | Event::Build { timestamp, .. }
            | Event::Destroy { timestamp, .. }
            | Event::Start { timestamp, .. }
            | Event::Stop { timestamp, .. }
            | Event::Victory { timestamp } => *timestamp,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Event::Research { .. } => EventKind::Research,
            Event::Build { .. } => EventKind::Build,
            Event::Destroy { .. } => EventKind::Destroy,
            Event::Start { .. } => EventKind::Start,
            Event::Stop { .. } => EventKind::Stop,
            Event::Victory { .. } => EventKind::Victory,
        }
    }

    /// The factory id this event is addressed to, if any. `Research` and
    /// `Victory` are not factory-addressed.
    pub fn factory_id(&self) -> Option<FactoryId> {
        match self {
            Event::Build { factory_id, .. }
            | Event::Destroy { factory_id, .. }
            | Event::Start { factory_id, .. }
            | Event::Stop { factory_id, .. } => Some(*factory_id),
            Event::Research { .. } | Event::Victory { .. } => None,
        }
    }
}
