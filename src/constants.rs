// Numerical Tolerances
pub const BOUNDARY_TOL: f64 = 100.0 * f64::EPSILON; // relative, for boundary clamps at level/volume limits
pub const BOUNDARY_TOL_FACTOR: f64 = 1.0 + BOUNDARY_TOL;

// Level Solver Parameters
pub const HALLEY_MAX_ITERATIONS: usize = 100;

// Propellant Densities
pub const RG1_DENSITY: f64 = 833.0; // kg/m³ (Naftil, RG-1)
pub const T1_DENSITY: f64 = 820.0; // kg/m³ (kerosene T-1)
pub const LOX_DENSITY: f64 = 1141.0; // kg/m³ (liquid oxygen)
