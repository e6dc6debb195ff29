//! Serializing the emitted event list to the output wire format: an array
//! of objects with hyphenated keys, including the preserved
//! `destroy-destroy-event` typo.

use factorio_core::event::Event;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum WireEvent {
    #[serde(rename = "research-event")]
    Research { timestamp: i64, technology: String },

    #[serde(rename = "build-factory-event")]
    Build {
        timestamp: i64,
        #[serde(rename = "factory-id")]
        factory_id: u64,
        #[serde(rename = "factory-type")]
        factory_type: String,
        #[serde(rename = "factory-name")]
        factory_name: String,
    },

    #[serde(rename = "destroy-destroy-event")]
    Destroy {
        timestamp: i64,
        #[serde(rename = "factory-id")]
        factory_id: u64,
    },

    #[serde(rename = "start-factory-event")]
    Start {
        timestamp: i64,
        #[serde(rename = "factory-id")]
        factory_id: u64,
        recipe: String,
    },

    #[serde(rename = "stop-factory-event")]
    Stop {
        timestamp: i64,
        #[serde(rename = "factory-id")]
        factory_id: u64,
    },

    #[serde(rename = "victory-event")]
    Victory { timestamp: i64 },
}

impl From<&Event> for WireEvent {
    fn from(event: &Event) -> Self {
        match event {
            Event::Research {
                timestamp,
                technology,
            } => WireEvent::Research {
                timestamp: *timestamp,
                technology: technology.clone(),
            },
            Event::Build {
                timestamp,
                factory_type,
                factory_name,
                factory_id,
            } => WireEvent::Build {
                timestamp: *timestamp,
                factory_id: factory_id.0,
                factory_type: factory_type.clone(),
                factory_name: factory_name.clone(),
            },
            Event::Destroy {
                timestamp,
                factory_id,
            } => WireEvent::Destroy {
                timestamp: *timestamp,
                factory_id: factory_id.0,
            },
            Event::Start {
                timestamp,
                factory_id,
                recipe,
            } => WireEvent::Start {
                timestamp: *timestamp,
                factory_id: factory_id.0,
                recipe: recipe.clone(),
            },
            Event::Stop {
                timestamp,
                factory_id,
            } => WireEvent::Stop {
                timestamp: *timestamp,
                factory_id: factory_id.0,
            },
            Event::Victory { timestamp } => WireEvent::Victory {
                timestamp: *timestamp,
            },
        }
    }
}

pub fn to_json_string(events: &[Event]) -> serde_json::Result<String> {
    let wire: Vec<WireEvent> = events.iter().map(WireEvent::from).collect();
    serde_json::to_string_pretty(&wire)
}
