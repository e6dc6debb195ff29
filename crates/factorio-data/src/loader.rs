//! Loading the four catalog files and the target file into
//! `factorio-core` runtime types.

use std::path::{Path, PathBuf};

use factorio_core::catalog::{Catalog, CatalogBuilder, Factory, IngredientList, Item, Recipe, Technology};
use factorio_core::fixed::speed_from_f64;
use factorio_core::FactoryId;

use crate::error::DataError;
use crate::schema::{FactoriesFile, ItemsFile, PairList, RecipesFile, TargetFile, TechnologiesFile};

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn pairs_to_ingredients(pairs: PairList) -> IngredientList {
    pairs.into_iter().collect()
}

/// The fully-resolved input to a planning + simulation run.
pub struct Target {
    pub initial_items: IngredientList,
    pub goal_items: IngredientList,
    /// `(id, factory_type, display_name)`, as handed to
    /// `factorio_planner::Planner::new` and to the `Build(-1, ...)` events
    /// the caller feeds the simulator.
    pub initial_factories: Vec<(FactoryId, String, String)>,
}

pub fn load_catalog(
    items_path: &Path,
    recipes_path: &Path,
    factories_path: &Path,
    technologies_path: &Path,
) -> Result<Catalog, DataError> {
    let items: ItemsFile = read_json(items_path)?;
    let recipes: RecipesFile = read_json(recipes_path)?;
    let factories: FactoriesFile = read_json(factories_path)?;
    let technologies: TechnologiesFile = read_json(technologies_path)?;

    let mut builder = CatalogBuilder::new();

    for (name, entry) in items {
        builder.register_item(Item {
            name,
            item_type: entry.item_type,
        });
    }

    for (name, entry) in recipes {
        builder.register_recipe(Recipe {
            name,
            category: entry.category,
            energy: entry.energy,
            initially_enabled: entry.enabled,
            ingredients: pairs_to_ingredients(entry.ingredients),
            products: pairs_to_ingredients(entry.products),
        });
    }

    for (name, entry) in factories {
        builder.register_factory(Factory {
            name,
            crafting_speed: speed_from_f64(entry.crafting_speed),
            crafting_categories: entry.crafting_categories.into_iter().collect(),
        });
    }

    for (name, entry) in technologies {
        let mut unlocked_recipes = std::collections::BTreeSet::new();
        for effect in entry.effects {
            if effect.effect_type != "unlock-recipe" {
                return Err(DataError::InvalidCatalogEffect {
                    technology: name,
                    effect: effect.effect_type,
                });
            }
            unlocked_recipes.insert(effect.recipe);
        }
        builder.register_technology(Technology {
            name,
            prerequisites: entry.prerequisites.into_iter().collect(),
            ingredients: pairs_to_ingredients(entry.ingredients),
            unlocked_recipes,
        });
    }

    Ok(builder.build()?)
}

pub fn load_target(path: &Path) -> Result<Target, DataError> {
    let file: TargetFile = read_json(path)?;
    let initial_factories = file
        .initial_factories
        .into_values()
        .map(|f| (FactoryId(f.factory_id), f.factory_type, f.factory_name))
        .collect();
    Ok(Target {
        initial_items: pairs_to_ingredients(file.initial_items),
        goal_items: pairs_to_ingredients(file.goal_items),
        initial_factories,
    })
}

/// Convenience for callers who keep the four catalog files side by side
/// under a single directory, named `items.json`, `recipes.json`,
/// `factories.json`, `technologies.json`.
pub fn load_catalog_dir(dir: &Path) -> Result<Catalog, DataError> {
    let path = |name: &str| -> PathBuf { dir.join(name) };
    load_catalog(
        &path("items.json"),
        &path("recipes.json"),
        &path("factories.json"),
        &path("technologies.json"),
    )
}
