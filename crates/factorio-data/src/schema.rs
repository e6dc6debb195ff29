//! Wire structs for the four catalog files and the target file. Kept
//! distinct from [`factorio_core::catalog`]'s runtime types so the engine's
//! Rust-idiomatic shapes (`BTreeMap`, `Speed`, `FactoryId`) never leak the
//! on-disk JSON's conventions (name/amount pairs as two-element arrays,
//! hyphenated keys in the target file).

use std::collections::HashMap;

use serde::Deserialize;

pub type PairList = Vec<(String, u64)>;

#[derive(Debug, Deserialize)]
pub struct ItemEntry {
    #[serde(rename = "type")]
    pub item_type: String,
}

pub type ItemsFile = HashMap<String, ItemEntry>;

#[derive(Debug, Deserialize)]
pub struct RecipeEntry {
    pub category: String,
    pub energy: u64,
    pub enabled: bool,
    pub ingredients: PairList,
    pub products: PairList,
}

pub type RecipesFile = HashMap<String, RecipeEntry>;

#[derive(Debug, Deserialize)]
pub struct FactoryEntry {
    pub crafting_speed: f64,
    pub crafting_categories: Vec<String>,
}

pub type FactoriesFile = HashMap<String, FactoryEntry>;

#[derive(Debug, Deserialize)]
pub struct EffectEntry {
    #[serde(rename = "type")]
    pub effect_type: String,
    pub recipe: String,
}

#[derive(Debug, Deserialize)]
pub struct TechnologyEntry {
    pub prerequisites: Vec<String>,
    pub ingredients: PairList,
    pub effects: Vec<EffectEntry>,
}

pub type TechnologiesFile = HashMap<String, TechnologyEntry>;

#[derive(Debug, Deserialize)]
pub struct InitialFactoryEntry {
    #[serde(rename = "factory-type")]
    pub factory_type: String,
    #[serde(rename = "factory-name")]
    pub factory_name: String,
    #[serde(rename = "factory-id")]
    pub factory_id: u64,
}

#[derive(Debug, Deserialize)]
pub struct TargetFile {
    #[serde(rename = "initial-items")]
    pub initial_items: PairList,
    #[serde(rename = "goal-items")]
    pub goal_items: PairList,
    #[serde(rename = "initial-factories")]
    pub initial_factories: HashMap<String, InitialFactoryEntry>,
}
