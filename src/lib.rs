pub mod constants;
pub mod elements;
pub mod errors;
pub mod utils;

pub use constants::*;
pub use elements::construction::{ConstructionElement, InertiaMoments};
pub use elements::point_mass::PointMass;
pub use elements::rotation_body::RotationBody;
pub use elements::spherical_segment::SphericalSegment;
pub use elements::truncated_cone::TruncatedCone;

// Re-export commonly used utilities
pub use utils::point3::Point3;
