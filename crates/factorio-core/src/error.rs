use crate::id::FactoryId;

/// Fatal errors shared by the catalog, state, and factory-id-map layers.
///
/// Every variant here indicates a programming or catalog defect; there is
/// no recovery path. `factorio-sim` and `factorio-planner` extend this set
/// with their own phase-specific fatal kinds and wrap `CoreError` with
/// `#[from]`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A technology effect in the source data was not `unlock-recipe`.
    #[error("invalid catalog effect '{effect}' on technology '{technology}'")]
    InvalidCatalogEffect { technology: String, effect: String },

    /// `FactoryIdMap::insert_with` was called with an id already in use.
    #[error("duplicate factory id {0}")]
    DuplicateFactoryId(FactoryId),

    /// A factory id was looked up, erased, or referenced that does not
    /// currently resolve to a live factory.
    #[error("unknown factory id {0}")]
    UnknownFactoryId(FactoryId),

    /// A `State::add_item` (or folded `remove_items`) call would have
    /// driven an item count negative.
    #[error("inventory underflow: '{item}' has {available}, need {requested}")]
    InventoryUnderflow {
        item: String,
        available: i64,
        requested: i64,
    },

    /// A recipe, factory, item, or technology name referenced from the
    /// catalog does not resolve to a registered entry.
    #[error("unknown {kind} reference '{name}'")]
    UnknownReference { kind: &'static str, name: String },
}
