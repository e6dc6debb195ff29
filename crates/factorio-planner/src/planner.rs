//! The recursive, memoizing planner.
//!
//! [`Planner`] materializes a valid event sequence from initial conditions
//! and a goal multiset of items, navigating two interleaved dependency
//! relations: item -> recipe -> factory -> parent-item, and recipe ->
//! technology -> prerequisite-technology -> ingredient-item. It maintains
//! its own [`State`] and [`FactoryIdMap`] that mirror what the simulator
//! will later derive from the emitted events.

use std::collections::{BTreeSet, HashMap, HashSet};

use factorio_core::catalog::{Catalog, IngredientList};
use factorio_core::event::{Event, Timestamp};
use factorio_core::factory_id_map::{FactoryIdMap, FactoryInstance};
use factorio_core::state::State;
use factorio_core::FactoryId;

use crate::error::PlannerError;

fn div_ceil(numerator: u64, denominator: u64) -> u64 {
    (numerator + denominator - 1) / denominator
}

pub struct Planner<'c> {
    catalog: &'c Catalog,
    tick: Timestamp,
    state: State,
    fid_map: FactoryIdMap,
    order: Vec<Event>,
    /// Categories covered by some live factory -- the fast "can anything
    /// run this recipe right now" test.
    craftable_categories: BTreeSet<String>,
    /// Memo: item name -> recipe name known (from past traversal) to
    /// produce it.
    creatable_items: HashMap<String, String>,
}

impl<'c> Planner<'c> {
    /// `initial_factories` are factories already standing at the start of
    /// the plan (e.g. the caller's `initial-factories`); the planner
    /// registers them in its `FactoryIdMap` and `craftable_categories` but
    /// does not emit `Build` events for them -- those, if any, are the
    /// caller's responsibility.
    pub fn new(
        catalog: &'c Catalog,
        initial_items: &IngredientList,
        initial_factories: &[(FactoryId, String, String)],
    ) -> Result<Self, PlannerError> {
        let state = State::new(catalog, initial_items)?;
        let mut fid_map = FactoryIdMap::new();
        let mut craftable_categories = BTreeSet::new();
        for (id, factory_type, display_name) in initial_factories {
            fid_map.insert_with(
                *id,
                FactoryInstance {
                    factory_type: factory_type.clone(),
                    display_name: display_name.clone(),
                },
            )?;
            if let Some(factory) = catalog.factory(factory_type) {
                craftable_categories.extend(factory.crafting_categories.iter().cloned());
            }
        }
        Ok(Planner {
            catalog,
            tick: 0,
            state,
            fid_map,
            order: Vec::new(),
            craftable_categories,
            creatable_items: HashMap::new(),
        })
    }

    /// Attempts to create every goal item. Returns `true` iff every one of
    /// them succeeded; a `false` return is [`PlanInfeasible`](crate) --
    /// recovered locally, not an error -- the caller will observe it as a
    /// plan the simulator then rejects.
    pub fn plan(&mut self, goal_items: &IngredientList) -> Result<bool, PlannerError> {
        let mut overall = true;
        for (name, amount) in goal_items {
            let visited = HashSet::new();
            if !self.create_item(name, *amount, &visited, false)? {
                overall = false;
            }
        }
        Ok(overall)
    }

    pub fn last_tick(&self) -> Timestamp {
        self.tick
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn into_events(self) -> Vec<Event> {
        self.order
    }

    fn live_factory_for_category(&self, category: &str) -> Option<FactoryId> {
        let catalog = self.catalog;
        self.fid_map.iter().find_map(|(id, instance)| {
            catalog
                .factory(&instance.factory_type)
                .filter(|f| f.covers(category))
                .map(|_| id)
        })
    }

    /// 1. memoized? use it. 2. already held? trivially done. 3. cycle
    /// guard. 4-6. try each producing recipe, craftable-category-first.
    fn create_item(
        &mut self,
        name: &str,
        amount: u64,
        visited: &HashSet<String>,
        dry_run: bool,
    ) -> Result<bool, PlannerError> {
        tracing::trace!(item = name, amount, dry_run, visited = visited.len(), "create_item");
        if let Some(recipe_name) = self.creatable_items.get(name).cloned() {
            if !dry_run {
                self.craft_recipe(&recipe_name, name, amount, visited, false)?;
            }
            return Ok(true);
        }

        let held = self.state.has_item(name);
        let remaining = amount.saturating_sub(held);
        if remaining == 0 {
            return Ok(true);
        }
        if visited.contains(name) {
            tracing::trace!(item = name, "cycle detected, abandoning branch");
            return Ok(false);
        }
        let mut descended = visited.clone();
        descended.insert(name.to_string());

        let catalog = self.catalog;
        let mut candidates: Vec<&factorio_core::catalog::Recipe> =
            catalog.recipes_producing(name).collect();
        candidates.sort_by_key(|r| !self.craftable_categories.contains(&r.category));

        for recipe in candidates {
            let recipe_name = recipe.name.clone();
            if self.craft_recipe(&recipe_name, name, remaining, &descended, true)? {
                if !dry_run {
                    self.craft_recipe(&recipe_name, name, remaining, &descended, false)?;
                }
                self.creatable_items.insert(name.to_string(), recipe_name);
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// 1. unlock via technology if needed. 2. get a factory if needed.
    /// 3. recursively create every ingredient. 4. on commit, emit
    /// Start/Stop and update inventory.
    fn craft_recipe(
        &mut self,
        recipe_name: &str,
        product_name: &str,
        product_amount: u64,
        visited: &HashSet<String>,
        dry_run: bool,
    ) -> Result<bool, PlannerError> {
        let catalog = self.catalog;
        let recipe = catalog
            .recipe(recipe_name)
            .ok_or_else(|| PlannerError::UnknownRecipe(recipe_name.to_string()))?;

        if !self.state.is_recipe_unlocked(recipe_name)
            && !self.create_technology_for_recipe(recipe_name, visited, dry_run)?
        {
            return Ok(false);
        }
        if !self.craftable_categories.contains(&recipe.category)
            && !self.create_factory(&recipe.category, visited, dry_run)?
        {
            return Ok(false);
        }

        let executions = div_ceil(product_amount, recipe.yield_of(product_name));
        let ingredients: IngredientList = recipe
            .ingredients
            .iter()
            .map(|(k, v)| (k.clone(), v * executions))
            .collect();
        let products: IngredientList = recipe
            .products
            .iter()
            .map(|(k, v)| (k.clone(), v * executions))
            .collect();
        let category = recipe.category.clone();

        for (ingredient_name, needed) in &ingredients {
            if !self.create_item(ingredient_name, *needed, visited, dry_run)? {
                return Ok(false);
            }
        }

        if !dry_run {
            let fid = self
                .live_factory_for_category(&category)
                .ok_or_else(|| PlannerError::NoLiveFactory(category.clone()))?;
            self.order.push(Event::Start {
                timestamp: self.tick,
                factory_id: fid,
                recipe: recipe_name.to_string(),
            });
            let factory_type = self.fid_map.lookup(fid)?.factory_type.clone();
            let factory = catalog
                .factory(&factory_type)
                .ok_or_else(|| PlannerError::NoLiveFactory(category.clone()))?;
            let duration = executions * factory.ticks_for(recipe);
            self.tick += duration as i64;
            self.order.push(Event::Stop {
                timestamp: self.tick,
                factory_id: fid,
            });
            self.state.remove_items(&ingredients)?;
            self.state.add_items(&products)?;
            tracing::debug!(recipe = recipe_name, factory_id = %fid, executions, tick = self.tick, "recipe scheduled");
        }
        self.creatable_items
            .insert(product_name.to_string(), recipe_name.to_string());
        Ok(true)
    }

    /// Every factory type covering `category`, skipping pseudo-factories
    /// (the "player") with no recipe that produces them.
    fn create_factory(
        &mut self,
        category: &str,
        visited: &HashSet<String>,
        dry_run: bool,
    ) -> Result<bool, PlannerError> {
        let catalog = self.catalog;
        let candidates: Vec<String> = catalog
            .factories_with_category(category)
            .filter(|f| catalog.recipes_producing(&f.name).next().is_some())
            .map(|f| f.name.clone())
            .collect();

        for factory_name in candidates {
            if self.create_item(&factory_name, 1, visited, dry_run)? {
                if !dry_run {
                    let factory = catalog
                        .factory(&factory_name)
                        .expect("candidate came from factories_with_category");
                    let fid = self.fid_map.insert(FactoryInstance {
                        factory_type: factory_name.clone(),
                        display_name: factory_name.clone(),
                    });
                    self.craftable_categories
                        .extend(factory.crafting_categories.iter().cloned());
                    self.state.add_item(&factory_name, -1)?;
                    self.order.push(Event::Build {
                        timestamp: self.tick,
                        factory_type: factory_name.clone(),
                        factory_name: factory_name.clone(),
                        factory_id: fid,
                    });
                    tracing::debug!(factory = factory_name, factory_id = %fid, category, tick = self.tick, "factory built");
                }
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn create_technology_for_recipe(
        &mut self,
        recipe_name: &str,
        visited: &HashSet<String>,
        dry_run: bool,
    ) -> Result<bool, PlannerError> {
        let catalog = self.catalog;
        let technology_name = catalog
            .technology_unlocking(recipe_name)
            .ok_or_else(|| PlannerError::NoTechnologyForRecipe(recipe_name.to_string()))?
            .name
            .clone();
        self.create_technology(&technology_name, visited, dry_run)
    }

    /// Dry-run-checks every prerequisite and ingredient first; only if both
    /// pass does the commit pass actually create them and mark the
    /// technology unlocked.
    fn create_technology(
        &mut self,
        name: &str,
        visited: &HashSet<String>,
        dry_run: bool,
    ) -> Result<bool, PlannerError> {
        if self.state.is_technology_unlocked(name) {
            return Ok(true);
        }
        let catalog = self.catalog;
        let technology = catalog
            .technology(name)
            .ok_or_else(|| PlannerError::UnknownTechnology(name.to_string()))?;
        let mut descended = visited.clone();
        descended.insert(name.to_string());

        for prerequisite in &technology.prerequisites {
            if !self.create_technology(prerequisite, &descended, true)? {
                return Ok(false);
            }
        }
        for (ingredient_name, amount) in &technology.ingredients {
            if !self.create_item(ingredient_name, *amount, &descended, true)? {
                return Ok(false);
            }
        }
        if dry_run {
            return Ok(true);
        }

        for prerequisite in technology.prerequisites.clone() {
            self.create_technology(&prerequisite, &descended, false)?;
        }
        for (ingredient_name, amount) in technology.ingredients.clone() {
            self.create_item(&ingredient_name, amount, &descended, false)?;
        }
        self.order.push(Event::Research {
            timestamp: self.tick,
            technology: name.to_string(),
        });
        self.state.unlock_technology(technology)?;
        tracing::debug!(technology = name, tick = self.tick, "technology researched");
        Ok(true)
    }
}
