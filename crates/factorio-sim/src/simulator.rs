//! The tick-driven simulation engine.
//!
//! `Simulator::simulate` consumes a catalog, an event list, and an initial
//! inventory, and advances tick by tick through [`Simulator::advance`]'s ten
//! ordered phases until the recorded `Victory` timestamp is reached. The
//! phase ordering is a semantic contract: reordering it changes outcomes.

use std::collections::HashMap;

use factorio_core::catalog::Catalog;
use factorio_core::event::{Event, Timestamp};
use factorio_core::factory_id_map::{FactoryIdMap, FactoryInstance};
use factorio_core::state::State;
use factorio_core::FactoryId;

use crate::error::SimError;

const MAX_TICK: i64 = 1 << 40;

/// A recipe instance running on (or awaiting ingredients on) a factory.
/// Only the energy counter is per-instance; everything else is looked up
/// from the catalog by name each phase.
#[derive(Debug, Clone)]
struct RunningRecipe {
    recipe_name: String,
    remaining_energy: u64,
}

pub struct Simulator<'c> {
    catalog: &'c Catalog,
    state: State,
    fid_map: FactoryIdMap,
    active: HashMap<FactoryId, RunningRecipe>,
    starved: HashMap<FactoryId, RunningRecipe>,
    tick: Timestamp,
    /// Remaining events, stable-sorted by timestamp ascending, not yet
    /// consumed by the initialization phase or by `advance`.
    pending: Vec<Event>,
    victory_tick: Timestamp,
}

impl<'c> Simulator<'c> {
    /// Builds a simulator over `catalog`, seeding `State` with
    /// `initial_items`. Does not yet run anything; call
    /// [`Simulator::simulate`] to drive it to completion.
    pub fn new(
        catalog: &'c Catalog,
        events: Vec<Event>,
        initial_items: &factorio_core::catalog::IngredientList,
    ) -> Result<Self, SimError> {
        let state = State::new(catalog, initial_items)?;

        let mut victory_ticks: Vec<Timestamp> = Vec::new();
        let mut pending: Vec<Event> = Vec::with_capacity(events.len());
        for event in events {
            if let Event::Victory { timestamp } = event {
                victory_ticks.push(timestamp);
            } else {
                pending.push(event);
            }
        }
        if victory_ticks.len() != 1 {
            return Err(SimError::MissingVictory);
        }
        let victory_tick = victory_ticks[0];

        pending.sort_by_key(|e| e.timestamp());

        let mut sim = Simulator {
            catalog,
            state,
            fid_map: FactoryIdMap::new(),
            active: HashMap::new(),
            starved: HashMap::new(),
            tick: -1,
            pending,
            victory_tick,
        };
        sim.initialize()?;
        Ok(sim)
    }

    /// Consumes every `Build(-1, ...)` event: initial placement, no
    /// inventory cost.
    fn initialize(&mut self) -> Result<(), SimError> {
        let (initial, rest): (Vec<Event>, Vec<Event>) = self
            .pending
            .drain(..)
            .partition(|e| matches!(e, Event::Build { timestamp, .. } if *timestamp == -1));
        self.pending = rest;
        for event in initial {
            if let Event::Build {
                factory_type,
                factory_name,
                factory_id,
                ..
            } = event
            {
                self.build_factory(factory_id, &factory_type, &factory_name, false)?;
            }
        }
        Ok(())
    }

    /// Drives `advance()` until the recorded victory tick is reached.
    pub fn simulate(mut self) -> Result<(Timestamp, State), SimError> {
        while self.tick < self.victory_tick {
            self.advance()?;
        }
        Ok((self.tick, self.state))
    }

    pub fn tick(&self) -> Timestamp {
        self.tick
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn is_active(&self, id: FactoryId) -> bool {
        self.active.contains_key(&id)
    }

    pub fn is_starved(&self, id: FactoryId) -> bool {
        self.starved.contains_key(&id)
    }

    /// The ten ordered intra-tick phases. Preserve this order exactly.
    pub fn advance(&mut self) -> Result<(), SimError> {
        self.phase_increment_tick()?;
        tracing::trace!(tick = self.tick, "advancing");
        let (research_events, factory_events) = self.phase_partition_events();
        self.phase_progress_active()?;
        self.phase_research(&research_events)?;
        self.phase_stop(&factory_events)?;
        self.phase_destroy(&factory_events)?;
        // phase 7 (Victory) is a no-op here; handled by the outer loop.
        self.phase_build(&factory_events)?;
        self.phase_start(&factory_events)?;
        self.phase_attempt_start()?;
        Ok(())
    }

    fn phase_increment_tick(&mut self) -> Result<(), SimError> {
        self.tick += 1;
        if self.tick > MAX_TICK {
            return Err(SimError::SimulationOverflow);
        }
        Ok(())
    }

    fn phase_partition_events(&mut self) -> (Vec<Event>, Vec<Event>) {
        let tick = self.tick;
        let split = self
            .pending
            .iter()
            .position(|e| e.timestamp() != tick)
            .unwrap_or(self.pending.len());
        let this_tick: Vec<Event> = self.pending.drain(..split).collect();

        let mut research = Vec::new();
        let mut factory = Vec::new();
        for event in this_tick {
            match event {
                Event::Research { .. } => research.push(event),
                _ => factory.push(event),
            }
        }
        research.sort_by(|a, b| match (a, b) {
            (Event::Research { technology: x, .. }, Event::Research { technology: y, .. }) => {
                x.cmp(y)
            }
            _ => unreachable!("research bucket holds only Research events"),
        });
        factory.sort_by_key(|e| e.factory_id());
        (research, factory)
    }

    fn phase_progress_active(&mut self) -> Result<(), SimError> {
        let finished: Vec<FactoryId> = self
            .active
            .iter_mut()
            .filter_map(|(id, running)| {
                running.remaining_energy = running.remaining_energy.saturating_sub(1);
                (running.remaining_energy == 0).then_some(*id)
            })
            .collect();
        for id in finished {
            let running = self.active.remove(&id).expect("just observed as finished");
            let recipe = self
                .catalog
                .recipe(&running.recipe_name)
                .ok_or_else(|| SimError::UnknownRecipe(running.recipe_name.clone()))?;
            self.state.add_items(&recipe.products)?;
            tracing::debug!(factory_id = %id, recipe = %running.recipe_name, tick = self.tick, "recipe finished");
            self.starved.insert(id, running);
        }
        Ok(())
    }

    fn phase_research(&mut self, research_events: &[Event]) -> Result<(), SimError> {
        for event in research_events {
            let Event::Research { technology, .. } = event else {
                unreachable!()
            };
            let tech = self
                .catalog
                .technology(technology)
                .ok_or_else(|| SimError::UnknownRecipe(technology.clone()))?;
            for prerequisite in &tech.prerequisites {
                if !self.state.is_technology_unlocked(prerequisite) {
                    return Err(SimError::PrerequisiteNotUnlocked {
                        technology: technology.clone(),
                        prerequisite: prerequisite.clone(),
                    });
                }
            }
            self.state.unlock_technology(tech)?;
            tracing::debug!(technology = %technology, tick = self.tick, "technology unlocked");
        }
        Ok(())
    }

    fn phase_stop(&mut self, factory_events: &[Event]) -> Result<(), SimError> {
        for event in factory_events {
            if let Event::Stop { factory_id, .. } = event {
                self.cancel_recipe(*factory_id)?;
            }
        }
        Ok(())
    }

    fn phase_destroy(&mut self, factory_events: &[Event]) -> Result<(), SimError> {
        for event in factory_events {
            if let Event::Destroy { factory_id, .. } = event {
                self.cancel_recipe(*factory_id)?;
                let instance = self.fid_map.erase(*factory_id)?;
                self.state.add_item(&instance.factory_type, 1)?;
                tracing::debug!(factory_id = %factory_id, tick = self.tick, "factory destroyed");
            }
        }
        Ok(())
    }

    fn phase_build(&mut self, factory_events: &[Event]) -> Result<(), SimError> {
        for event in factory_events {
            if let Event::Build {
                factory_type,
                factory_name,
                factory_id,
                ..
            } = event
            {
                self.build_factory(*factory_id, factory_type, factory_name, true)?;
            }
        }
        Ok(())
    }

    fn phase_start(&mut self, factory_events: &[Event]) -> Result<(), SimError> {
        for event in factory_events {
            if let Event::Start {
                factory_id, recipe, ..
            } = event
            {
                self.cancel_recipe(*factory_id)?;
                if !self.state.is_recipe_unlocked(recipe) {
                    return Err(SimError::RecipeLocked {
                        factory_id: *factory_id,
                        recipe: recipe.clone(),
                    });
                }
                self.starved.insert(
                    *factory_id,
                    RunningRecipe {
                        recipe_name: recipe.clone(),
                        remaining_energy: 0,
                    },
                );
            }
        }
        Ok(())
    }

    fn phase_attempt_start(&mut self) -> Result<(), SimError> {
        let mut ids: Vec<FactoryId> = self.starved.keys().copied().collect();
        ids.sort();
        for id in ids {
            let recipe_name = self.starved[&id].recipe_name.clone();
            let recipe = self
                .catalog
                .recipe(&recipe_name)
                .ok_or_else(|| SimError::UnknownRecipe(recipe_name.clone()))?;
            if !self.state.has_items(&recipe.ingredients) {
                continue;
            }
            self.state.remove_items(&recipe.ingredients)?;
            let instance = self.fid_map.lookup(id)?;
            let factory = self
                .catalog
                .factory(&instance.factory_type)
                .ok_or_else(|| SimError::UnknownFactoryType(instance.factory_type.clone()))?;
            let remaining_energy = factory.ticks_for(recipe);
            tracing::debug!(factory_id = %id, recipe = %recipe_name, remaining_energy, tick = self.tick, "recipe started");
            let running = self.starved.remove(&id).expect("id came from starved keys");
            self.active.insert(
                id,
                RunningRecipe {
                    remaining_energy,
                    ..running
                },
            );
        }
        Ok(())
    }

    fn build_factory(
        &mut self,
        id: FactoryId,
        factory_type: &str,
        display_name: &str,
        consume: bool,
    ) -> Result<(), SimError> {
        self.fid_map.insert_with(
            id,
            FactoryInstance {
                factory_type: factory_type.to_string(),
                display_name: display_name.to_string(),
            },
        )?;
        if consume {
            self.state.add_item(factory_type, -1)?;
        }
        tracing::debug!(factory_id = %id, factory_type, display_name, tick = self.tick, "factory built");
        Ok(())
    }

    /// If `id` has an active recipe, refunds its ingredients and drops it.
    /// Erases from `starved` either way. A no-op if `id` has neither.
    fn cancel_recipe(&mut self, id: FactoryId) -> Result<(), SimError> {
        if let Some(running) = self.active.remove(&id) {
            let recipe = self
                .catalog
                .recipe(&running.recipe_name)
                .ok_or(SimError::UnknownRecipe(running.recipe_name))?;
            self.state.add_items(&recipe.ingredients)?;
        }
        self.starved.remove(&id);
        Ok(())
    }
}
