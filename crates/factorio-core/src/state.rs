//! The mutable world: item counts, unlocked recipes, unlocked technologies.

use std::collections::{HashMap, HashSet};

use crate::catalog::{Catalog, IngredientList, Technology};
use crate::error::CoreError;

#[derive(Debug, Clone, Default)]
pub struct State {
    items: HashMap<String, u64>,
    unlocked_recipes: HashSet<String>,
    unlocked_technologies: HashSet<String>,
}

impl State {
    /// Seeds `unlocked_recipes` with every catalog recipe whose
    /// `initially_enabled` is true, and adds `initial_items` to inventory.
    pub fn new(catalog: &Catalog, initial_items: &IngredientList) -> Result<Self, CoreError> {
        let mut state = State {
            items: HashMap::new(),
            unlocked_recipes: catalog
                .recipes()
                .filter(|r| r.initially_enabled)
                .map(|r| r.name.clone())
                .collect(),
            unlocked_technologies: HashSet::new(),
        };
        state.add_items(initial_items)?;
        Ok(state)
    }

    /// Adjusts `items[name]` by `amount` (may be negative). Fails with
    /// `InventoryUnderflow` if the result would be negative.
    pub fn add_item(&mut self, name: &str, amount: i64) -> Result<(), CoreError> {
        let current = self.has_item(name) as i64;
        let next = current + amount;
        if next < 0 {
            return Err(CoreError::InventoryUnderflow {
                item: name.to_string(),
                available: current,
                requested: -amount,
            });
        }
        if next == 0 {
            self.items.remove(name);
        } else {
            self.items.insert(name.to_string(), next as u64);
        }
        Ok(())
    }

    pub fn has_item(&self, name: &str) -> u64 {
        self.items.get(name).copied().unwrap_or(0)
    }

    pub fn has_items(&self, required: &IngredientList) -> bool {
        required
            .iter()
            .all(|(name, amount)| self.has_item(name) >= *amount)
    }

    pub fn add_items(&mut self, amounts: &IngredientList) -> Result<(), CoreError> {
        for (name, amount) in amounts {
            self.add_item(name, *amount as i64)?;
        }
        Ok(())
    }

    pub fn remove_items(&mut self, amounts: &IngredientList) -> Result<(), CoreError> {
        for (name, amount) in amounts {
            self.add_item(name, -(*amount as i64))?;
        }
        Ok(())
    }

    pub fn is_recipe_unlocked(&self, recipe_name: &str) -> bool {
        self.unlocked_recipes.contains(recipe_name)
    }

    pub fn is_technology_unlocked(&self, technology_name: &str) -> bool {
        self.unlocked_technologies.contains(technology_name)
    }

    /// Consumes `technology.ingredients` from inventory (must succeed),
    /// marks the technology unlocked, and unlocks every recipe it names.
    pub fn unlock_technology(&mut self, technology: &Technology) -> Result<(), CoreError> {
        self.remove_items(&technology.ingredients)?;
        self.unlocked_technologies.insert(technology.name.clone());
        for recipe_name in &technology.unlocked_recipes {
            self.unlocked_recipes.insert(recipe_name.clone());
        }
        Ok(())
    }
}
