use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Only `unlock-recipe` effects are modeled; anything else in the
    /// source data is a defect.
    #[error("technology '{technology}' has effect type '{effect}', only 'unlock-recipe' is modeled")]
    InvalidCatalogEffect { technology: String, effect: String },

    #[error(transparent)]
    Catalog(#[from] factorio_core::CoreError),
}
