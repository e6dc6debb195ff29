//! Integer-identified live factory instances, with collision-checked insert.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::id::FactoryId;

/// `f` is the factory *type* name (looked up in [`crate::catalog::Catalog`]);
/// `display_name` is the caller-chosen instance name carried for display and
/// for `Build` event replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryInstance {
    pub factory_type: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct FactoryIdMap {
    factories: HashMap<FactoryId, FactoryInstance>,
    next_id: u64,
}

impl FactoryIdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates `next_id`, registers it, and advances `next_id`.
    pub fn insert(&mut self, factory: FactoryInstance) -> FactoryId {
        let id = FactoryId(self.next_id);
        self.factories.insert(id, factory);
        self.next_id += 1;
        id
    }

    /// Registers `factory` under the caller-supplied `id`. `next_id` always
    /// advances, regardless of whether `id` collided with it, so
    /// auto-generated ids from a later [`FactoryIdMap::insert`] never
    /// collide with any id a caller has ever supplied.
    pub fn insert_with(&mut self, id: FactoryId, factory: FactoryInstance) -> Result<(), CoreError> {
        if self.factories.contains_key(&id) {
            tracing::debug!(factory_id = %id, "rejected duplicate factory id");
            return Err(CoreError::DuplicateFactoryId(id));
        }
        self.factories.insert(id, factory);
        if id.0 >= self.next_id {
            self.next_id = id.0 + 1;
        }
        Ok(())
    }

    pub fn erase(&mut self, id: FactoryId) -> Result<FactoryInstance, CoreError> {
        self.factories
            .remove(&id)
            .ok_or(CoreError::UnknownFactoryId(id))
    }

    pub fn lookup(&self, id: FactoryId) -> Result<&FactoryInstance, CoreError> {
        self.factories.get(&id).ok_or(CoreError::UnknownFactoryId(id))
    }

    pub fn contains(&self, id: FactoryId) -> bool {
        self.factories.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FactoryId, &FactoryInstance)> {
        self.factories.iter().map(|(id, f)| (*id, f))
    }
}
