/// Fatal planner errors. An unreachable goal is not one of these: it is
/// recovered locally as `Ok(false)` from [`crate::planner::Planner::plan`],
/// not raised.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error(transparent)]
    Core(#[from] factorio_core::CoreError),

    #[error("no technology unlocks recipe '{0}'")]
    NoTechnologyForRecipe(String),

    #[error("unknown recipe '{0}' referenced during planning")]
    UnknownRecipe(String),

    #[error("unknown technology '{0}' referenced during planning")]
    UnknownTechnology(String),

    #[error("no live factory covers category '{0}'")]
    NoLiveFactory(String),
}
