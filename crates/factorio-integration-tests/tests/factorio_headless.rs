//! End-to-end tests exercising `factorio-data`, `factorio-planner`, and
//! `factorio-sim` together: JSON on disk in, a planned + simulated event
//! list out, matching the wire format the CLI itself would print.

use std::io::Write;
use std::path::PathBuf;

use factorio_core::event::Event;
use factorio_planner::Planner;
use factorio_sim::Simulator;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "factorio-integration-test-{}-{}",
        std::process::id(),
        name
    ));
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    path
}

struct Catalog {
    items: PathBuf,
    recipes: PathBuf,
    factories: PathBuf,
    technologies: PathBuf,
}

/// A small self-consistent mining -> smelting chain: a burner-mining-drill
/// mines iron ore, a stone-furnace (unlocked behind "automation") smelts it
/// into plates.
fn smelting_chain_catalog() -> Catalog {
    let items = write_temp(
        "items.json",
        r#"{
            "iron-ore": {"type": "resource"},
            "iron-plate": {"type": "intermediate"},
            "burner-mining-drill": {"type": "intermediate"},
            "stone-furnace": {"type": "intermediate"}
        }"#,
    );
    let recipes = write_temp(
        "recipes.json",
        r#"{
            "mine-iron-ore": {"category": "mining", "energy": 10, "enabled": true, "ingredients": [], "products": [["iron-ore", 1]]},
            "smelt-iron-plate": {"category": "smelting", "energy": 20, "enabled": false, "ingredients": [["iron-ore", 1]], "products": [["iron-plate", 1]]},
            "craft-stone-furnace": {"category": "crafting", "energy": 5, "enabled": true, "ingredients": [["iron-ore", 5]], "products": [["stone-furnace", 1]]}
        }"#,
    );
    let factories = write_temp(
        "factories.json",
        r#"{
            "burner-mining-drill": {"crafting_speed": 1.0, "crafting_categories": ["mining"]},
            "stone-furnace": {"crafting_speed": 1.0, "crafting_categories": ["smelting"]},
            "player": {"crafting_speed": 1.0, "crafting_categories": ["crafting"]}
        }"#,
    );
    let technologies = write_temp(
        "technologies.json",
        r#"{
            "automation": {"prerequisites": [], "ingredients": [["iron-ore", 2]], "effects": [{"type": "unlock-recipe", "recipe": "smelt-iron-plate"}]}
        }"#,
    );
    Catalog {
        items,
        recipes,
        factories,
        technologies,
    }
}

#[test]
fn full_pipeline_plans_loads_and_simulates_to_victory() {
    let catalog_files = smelting_chain_catalog();
    let catalog = factorio_data::load_catalog(
        &catalog_files.items,
        &catalog_files.recipes,
        &catalog_files.factories,
        &catalog_files.technologies,
    )
    .expect("catalog loads");

    let target_path = write_temp(
        "target.json",
        r#"{
            "initial-items": [],
            "goal-items": [["iron-plate", 3]],
            "initial-factories": {
                "drill-1": {"factory-type": "burner-mining-drill", "factory-name": "drill-1", "factory-id": 0},
                "player-1": {"factory-type": "player", "factory-name": "player", "factory-id": 1}
            }
        }"#,
    );
    let target = factorio_data::load_target(&target_path).expect("target loads");

    let mut planner = Planner::new(&catalog, &target.initial_items, &target.initial_factories)
        .expect("planner constructs");
    let solved = planner.plan(&target.goal_items).expect("planning does not error");
    assert!(solved, "three iron plates should be reachable from a bare drill");

    let last_tick = planner.last_tick();
    let mut events: Vec<Event> = target
        .initial_factories
        .iter()
        .map(|(id, factory_type, factory_name)| Event::Build {
            timestamp: -1,
            factory_type: factory_type.clone(),
            factory_name: factory_name.clone(),
            factory_id: *id,
        })
        .collect();
    events.extend(planner.into_events());
    events.push(Event::Victory {
        timestamp: last_tick,
    });

    let json = factorio_data::to_json_string(&events).expect("events serialize");
    assert!(json.contains("\"victory-event\""));
    assert!(json.contains("\"build-factory-event\""));

    let (final_tick, state) = Simulator::new(&catalog, events, &target.initial_items)
        .expect("simulator constructs")
        .simulate()
        .expect("simulation reaches victory");
    assert_eq!(final_tick, last_tick);
    assert!(state.has_item("iron-plate") >= 3);
}

#[test]
fn an_unreachable_goal_is_reported_as_infeasible_not_a_fatal_error() {
    let catalog_files = smelting_chain_catalog();
    let catalog = factorio_data::load_catalog(
        &catalog_files.items,
        &catalog_files.recipes,
        &catalog_files.factories,
        &catalog_files.technologies,
    )
    .expect("catalog loads");

    let target_path = write_temp(
        "target-unreachable.json",
        r#"{
            "initial-items": [],
            "goal-items": [["unobtainium", 1]],
            "initial-factories": {}
        }"#,
    );
    let target = factorio_data::load_target(&target_path).expect("target loads");

    let mut planner = Planner::new(&catalog, &target.initial_items, &target.initial_factories)
        .expect("planner constructs");
    let solved = planner
        .plan(&target.goal_items)
        .expect("planning itself does not error for an unreachable item");
    assert!(!solved);
    assert!(planner.into_events().is_empty());
}
