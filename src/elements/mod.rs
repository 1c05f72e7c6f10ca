pub mod construction;
pub mod point_mass;
pub mod rotation_body;
pub mod spherical_segment;
pub mod truncated_cone;
