use thiserror::Error;

#[derive(Debug, Error)]
pub enum MassPropsError {
    #[error("Geometry error: {0}")]
    GeometryError(String),

    #[error("Mass error: {0}")]
    MassError(String),

    #[error("propellant mass {mass_kg} kg is outside [0, {capacity_kg} kg]")]
    PropMassOutOfRange { mass_kg: f64, capacity_kg: f64 },

    #[error("element models no propellant (zero density)")]
    NoPropellant,

    #[error("propellant level solver did not converge after {iterations} iterations")]
    LevelSolverDiverged { iterations: usize },
}
