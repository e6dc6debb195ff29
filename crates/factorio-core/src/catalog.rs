//! Immutable lookup tables: items, recipes, factories, technologies.
//!
//! Built in two phases: register everything, then [`CatalogBuilder::build`]
//! validates cross-references once and freezes the result. There is no
//! mutation after that; `Catalog` exposes only `&self` getters.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::CoreError;

/// `(name, type)`. Identity is the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub item_type: String,
}

/// `name -> amount` ingredient/product list, as used both internally and as
/// the shape of the external `[[name, amount], ...]` JSON pairs.
pub type IngredientList = BTreeMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub name: String,
    pub category: String,
    pub energy: u64,
    pub initially_enabled: bool,
    pub ingredients: IngredientList,
    pub products: IngredientList,
}

impl Recipe {
    /// Amount of `product_name` yielded by one execution of this recipe.
    /// Panics if the recipe does not produce that item; callers only use
    /// this after confirming `products.contains_key(product_name)`.
    pub fn yield_of(&self, product_name: &str) -> u64 {
        self.products
            .get(product_name)
            .copied()
            .expect("yield_of called for a product this recipe does not make")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Factory {
    pub name: String,
    pub crafting_speed: crate::fixed::Speed,
    pub crafting_categories: BTreeSet<String>,
}

impl Factory {
    pub fn covers(&self, category: &str) -> bool {
        self.crafting_categories.contains(category)
    }

    /// Ticks to complete `recipe` on this factory: `ceil(energy / speed)`,
    /// minimum one tick.
    pub fn ticks_for(&self, recipe: &Recipe) -> crate::fixed::Ticks {
        crate::fixed::ticks_for_energy(recipe.energy, self.crafting_speed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Technology {
    pub name: String,
    pub prerequisites: BTreeSet<String>,
    pub ingredients: IngredientList,
    pub unlocked_recipes: BTreeSet<String>,
}

#[derive(Debug, Default)]
pub struct CatalogBuilder {
    items: HashMap<String, Item>,
    recipes: HashMap<String, Recipe>,
    factories: HashMap<String, Factory>,
    technologies: HashMap<String, Technology>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_item(&mut self, item: Item) {
        self.items.insert(item.name.clone(), item);
    }

    pub fn register_recipe(&mut self, recipe: Recipe) {
        self.recipes.insert(recipe.name.clone(), recipe);
    }

    pub fn register_factory(&mut self, factory: Factory) {
        self.factories.insert(factory.name.clone(), factory);
    }

    pub fn register_technology(&mut self, technology: Technology) {
        self.technologies.insert(technology.name.clone(), technology);
    }

    /// Validates every cross-reference (recipe ingredients/products against
    /// items, technology prerequisites against technologies, technology
    /// ingredients against items, `unlocked_recipes` against recipes) and
    /// freezes the catalog.
    pub fn build(self) -> Result<Catalog, CoreError> {
        for recipe in self.recipes.values() {
            for name in recipe.ingredients.keys().chain(recipe.products.keys()) {
                if !self.items.contains_key(name) {
                    return Err(CoreError::UnknownReference {
                        kind: "item",
                        name: name.clone(),
                    });
                }
            }
        }
        for tech in self.technologies.values() {
            for prereq in &tech.prerequisites {
                if !self.technologies.contains_key(prereq) {
                    return Err(CoreError::UnknownReference {
                        kind: "technology",
                        name: prereq.clone(),
                    });
                }
            }
            for name in tech.ingredients.keys() {
                if !self.items.contains_key(name) {
                    return Err(CoreError::UnknownReference {
                        kind: "item",
                        name: name.clone(),
                    });
                }
            }
            for recipe_name in &tech.unlocked_recipes {
                if !self.recipes.contains_key(recipe_name) {
                    return Err(CoreError::UnknownReference {
                        kind: "recipe",
                        name: recipe_name.clone(),
                    });
                }
            }
        }
        tracing::debug!(
            items = self.items.len(),
            recipes = self.recipes.len(),
            factories = self.factories.len(),
            technologies = self.technologies.len(),
            "catalog built"
        );
        Ok(Catalog {
            items: self.items,
            recipes: self.recipes,
            factories: self.factories,
            technologies: self.technologies,
        })
    }
}

#[derive(Debug, Default)]
pub struct Catalog {
    items: HashMap<String, Item>,
    recipes: HashMap<String, Recipe>,
    factories: HashMap<String, Factory>,
    technologies: HashMap<String, Technology>,
}

impl Catalog {
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    pub fn recipe(&self, name: &str) -> Option<&Recipe> {
        self.recipes.get(name)
    }

    pub fn factory(&self, name: &str) -> Option<&Factory> {
        self.factories.get(name)
    }

    pub fn technology(&self, name: &str) -> Option<&Technology> {
        self.technologies.get(name)
    }

    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    pub fn factories(&self) -> impl Iterator<Item = &Factory> {
        self.factories.values()
    }

    pub fn technologies(&self) -> impl Iterator<Item = &Technology> {
        self.technologies.values()
    }

    /// Every recipe whose products contain `item_name`.
    pub fn recipes_producing<'a>(&'a self, item_name: &'a str) -> impl Iterator<Item = &'a Recipe> {
        self.recipes
            .values()
            .filter(move |r| r.products.contains_key(item_name))
    }

    /// The unique technology whose `unlocked_recipes` contains `recipe_name`,
    /// if any. Catalogs are expected to have at most one.
    pub fn technology_unlocking(&self, recipe_name: &str) -> Option<&Technology> {
        self.technologies
            .values()
            .find(|t| t.unlocked_recipes.contains(recipe_name))
    }

    /// Every factory type whose categories include `category`.
    pub fn factories_with_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a Factory> {
        self.factories.values().filter(move |f| f.covers(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::speed_from_f64;

    fn ing(pairs: &[(&str, u64)]) -> IngredientList {
        pairs.iter().map(|(n, a)| (n.to_string(), *a)).collect()
    }

    #[test]
    fn register_and_build() {
        let mut b = CatalogBuilder::new();
        b.register_item(Item {
            name: "iron-ore".into(),
            item_type: "resource".into(),
        });
        b.register_item(Item {
            name: "iron-plate".into(),
            item_type: "intermediate".into(),
        });
        b.register_recipe(Recipe {
            name: "iron-plate".into(),
            category: "smelting".into(),
            energy: 32,
            initially_enabled: true,
            ingredients: ing(&[("iron-ore", 1)]),
            products: ing(&[("iron-plate", 1)]),
        });
        let catalog = b.build().expect("builds");
        assert!(catalog.item("iron-ore").is_some());
        assert!(catalog.recipe("iron-plate").is_some());
    }

    #[test]
    fn unknown_item_ref_in_recipe_fails() {
        let mut b = CatalogBuilder::new();
        b.register_recipe(Recipe {
            name: "ghost".into(),
            category: "x".into(),
            energy: 1,
            initially_enabled: true,
            ingredients: IngredientList::new(),
            products: ing(&[("nonexistent", 1)]),
        });
        let err = b.build().unwrap_err();
        assert!(matches!(err, CoreError::UnknownReference { kind: "item", .. }));
    }

    #[test]
    fn unknown_prerequisite_fails() {
        let mut b = CatalogBuilder::new();
        b.register_technology(Technology {
            name: "automation".into(),
            prerequisites: BTreeSet::from(["nonexistent".to_string()]),
            ingredients: IngredientList::new(),
            unlocked_recipes: BTreeSet::new(),
        });
        let err = b.build().unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnknownReference { kind: "technology", .. }
        ));
    }

    #[test]
    fn recipes_producing_finds_matches() {
        let mut b = CatalogBuilder::new();
        b.register_item(Item {
            name: "coal".into(),
            item_type: "resource".into(),
        });
        b.register_recipe(Recipe {
            name: "mine-coal".into(),
            category: "mining".into(),
            energy: 60,
            initially_enabled: true,
            ingredients: IngredientList::new(),
            products: ing(&[("coal", 1)]),
        });
        let catalog = b.build().unwrap();
        let found: Vec<_> = catalog.recipes_producing("coal").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "mine-coal");
    }

    #[test]
    fn factory_ticks_for_uses_ceil() {
        let factory = Factory {
            name: "drill".into(),
            crafting_speed: speed_from_f64(0.5),
            crafting_categories: BTreeSet::from(["mining".to_string()]),
        };
        let recipe = Recipe {
            name: "coal".into(),
            category: "mining".into(),
            energy: 1,
            initially_enabled: true,
            ingredients: IngredientList::new(),
            products: ing(&[("coal", 1)]),
        };
        assert_eq!(factory.ticks_for(&recipe), 2);
    }

    #[test]
    fn catalog_is_immutable_after_build() {
        let catalog = CatalogBuilder::new().build().unwrap();
        assert!(catalog.item("anything").is_none());
    }
}
