use factorio_core::CoreError;

/// Fatal simulator errors. Every variant is a catalog defect or a misuse of
/// the simulator's contract; none of them are recoverable within a run.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("recipe '{recipe}' is not unlocked (factory {factory_id})")]
    RecipeLocked {
        factory_id: factorio_core::FactoryId,
        recipe: String,
    },

    #[error("technology '{technology}' requires unfulfilled prerequisite '{prerequisite}'")]
    PrerequisiteNotUnlocked {
        technology: String,
        prerequisite: String,
    },

    #[error("event list does not contain exactly one Victory event")]
    MissingVictory,

    #[error("simulation exceeded 2^40 ticks")]
    SimulationOverflow,

    #[error("event references unknown recipe '{0}'")]
    UnknownRecipe(String),

    #[error("event references unknown factory type '{0}'")]
    UnknownFactoryType(String),
}
