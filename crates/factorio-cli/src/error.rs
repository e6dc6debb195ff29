/// Top-level CLI error. Every variant maps to a non-zero exit and a short
/// stderr line; none of them produce partial stdout output.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Data(#[from] factorio_data::DataError),

    #[error(transparent)]
    Planner(#[from] factorio_planner::PlannerError),

    #[error(transparent)]
    Sim(#[from] factorio_sim::SimError),

    /// The planner could not reach every goal item. Recovered locally by
    /// the planner as `Ok(false)`; the CLI is where it becomes fatal.
    #[error("goal is not reachable from the given initial conditions")]
    PlanInfeasible,

    #[error("failed to serialize event list: {0}")]
    Serialize(#[from] serde_json::Error),
}
