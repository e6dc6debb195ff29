use std::path::PathBuf;

use clap::Parser;

/// Plans and simulates a production target against a catalog of items,
/// recipes, factories, and technologies.
#[derive(Debug, Parser)]
#[command(name = "factorio-plan", version, about)]
pub struct Args {
    /// Path to the target JSON (initial items, goal items, initial factories).
    pub target: PathBuf,

    #[arg(long, default_value = "items.json")]
    pub items: PathBuf,

    #[arg(long, default_value = "recipes.json")]
    pub recipes: PathBuf,

    #[arg(long, default_value = "factories.json")]
    pub factories: PathBuf,

    #[arg(long, default_value = "technologies.json")]
    pub technologies: PathBuf,

    /// Suppress diagnostic logging on stderr.
    #[arg(long)]
    pub quiet: bool,
}
