use std::collections::BTreeSet;

use factorio_core::catalog::{CatalogBuilder, Factory, IngredientList, Item, Recipe};
use factorio_core::event::Event;
use factorio_core::fixed::speed_from_f64;
use factorio_core::FactoryId;
use factorio_sim::Simulator;

use crate::{Planner, PlannerError};

fn ing(pairs: &[(&str, u64)]) -> IngredientList {
    pairs.iter().map(|(n, a)| (n.to_string(), *a)).collect()
}

fn smelting_chain_catalog() -> factorio_core::Catalog {
    let mut b = CatalogBuilder::new();
    for name in ["iron-ore", "iron-plate", "burner-mining-drill", "stone-furnace"] {
        b.register_item(Item {
            name: name.into(),
            item_type: "generic".into(),
        });
    }
    b.register_recipe(Recipe {
        name: "mine-iron-ore".into(),
        category: "mining".into(),
        energy: 60,
        initially_enabled: true,
        ingredients: IngredientList::new(),
        products: ing(&[("iron-ore", 1)]),
    });
    b.register_recipe(Recipe {
        name: "craft-stone-furnace".into(),
        category: "mining".into(),
        energy: 10,
        initially_enabled: true,
        ingredients: ing(&[("iron-ore", 1)]),
        products: ing(&[("stone-furnace", 1)]),
    });
    b.register_recipe(Recipe {
        name: "smelt-iron-plate".into(),
        category: "smelting".into(),
        energy: 32,
        initially_enabled: true,
        ingredients: ing(&[("iron-ore", 1)]),
        products: ing(&[("iron-plate", 1)]),
    });
    b.register_factory(Factory {
        name: "burner-mining-drill".into(),
        crafting_speed: speed_from_f64(1.0),
        crafting_categories: BTreeSet::from(["mining".to_string()]),
    });
    b.register_factory(Factory {
        name: "stone-furnace".into(),
        crafting_speed: speed_from_f64(1.0),
        crafting_categories: BTreeSet::from(["smelting".to_string()]),
    });
    b.build().unwrap()
}

/// A solvable goal produces a plan whose simulator round-trip reaches
/// exactly the planner's own last tick, per the planner-simulator
/// round-trip property.
#[test]
fn plan_round_trips_through_the_simulator() {
    let catalog = smelting_chain_catalog();
    let mut planner = Planner::new(
        &catalog,
        &IngredientList::new(),
        &[(
            FactoryId(0),
            "burner-mining-drill".to_string(),
            "drill".to_string(),
        )],
    )
    .unwrap();

    let solved = planner.plan(&ing(&[("iron-plate", 2)])).unwrap();
    assert!(solved);
    assert_eq!(planner.state().has_item("iron-plate"), 2);

    let last_tick = planner.last_tick();
    let mut events = planner.into_events();
    events.push(Event::Build {
        timestamp: -1,
        factory_type: "burner-mining-drill".into(),
        factory_name: "drill".into(),
        factory_id: FactoryId(0),
    });
    events.push(Event::Victory { timestamp: last_tick });

    let sim = Simulator::new(&catalog, events, &IngredientList::new()).unwrap();
    let (final_tick, state) = sim.simulate().unwrap();
    assert_eq!(final_tick, last_tick);
    assert!(state.has_item("iron-plate") >= 2);
}

/// An item with no producing recipe at all is infeasible, recovered as a
/// `false` return rather than an error.
#[test]
fn unreachable_goal_is_infeasible_not_an_error() {
    let catalog = smelting_chain_catalog();
    let mut planner = Planner::new(&catalog, &IngredientList::new(), &[]).unwrap();
    let solved = planner.plan(&ing(&[("unobtainium", 1)])).unwrap();
    assert!(!solved);
    assert!(planner.into_events().is_empty());
}

/// A recipe that is not initially enabled and that no technology unlocks
/// is a fatal catalog defect, not a recoverable infeasibility.
#[test]
fn recipe_with_no_unlocking_technology_is_a_fatal_error() {
    let mut b = CatalogBuilder::new();
    b.register_item(Item {
        name: "mystery-part".into(),
        item_type: "generic".into(),
    });
    b.register_recipe(Recipe {
        name: "make-mystery-part".into(),
        category: "assembly".into(),
        energy: 1,
        initially_enabled: false,
        ingredients: IngredientList::new(),
        products: ing(&[("mystery-part", 1)]),
    });
    let catalog = b.build().unwrap();
    let mut planner = Planner::new(&catalog, &IngredientList::new(), &[]).unwrap();
    let err = planner
        .plan(&ing(&[("mystery-part", 1)]))
        .unwrap_err();
    assert!(matches!(err, PlannerError::NoTechnologyForRecipe(_)));
}

/// Already-held items short-circuit without consulting the catalog at all.
#[test]
fn goal_already_in_inventory_needs_no_crafting() {
    let catalog = smelting_chain_catalog();
    let mut planner =
        Planner::new(&catalog, &ing(&[("iron-plate", 5)]), &[]).unwrap();
    let solved = planner.plan(&ing(&[("iron-plate", 3)])).unwrap();
    assert!(solved);
    assert!(planner.into_events().is_empty());
}
