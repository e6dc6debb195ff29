//! Loading catalog and target JSON from disk, and serializing the emitted
//! event list back out in the expected wire format.

pub mod error;
pub mod events;
pub mod loader;
pub mod schema;

pub use error::DataError;
pub use events::to_json_string;
pub use loader::{load_catalog, load_catalog_dir, load_target, Target};
