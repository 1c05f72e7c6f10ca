use std::f64::consts::PI;

use uom::si::f64::{Angle, Area, Length, Mass, MassDensity, Volume};
use uom::si::length::meter;

use crate::elements::construction::ConstructionElement;
use crate::elements::rotation_body::{LevelSolver, RotationBody, RotationBodyParams};
use crate::errors::MassPropsError;
use crate::utils::point3::Point3;

// Spherical segment shell (always containing a pole, never a mid-sphere
// slice), used for tank bulkheads. Base diameter d and height h with
// h <= d/2; equality gives a hemisphere. `facing_plus_x` tells whether the
// pole points toward increasing X (toward the tail) or away from it.
#[derive(Debug, Clone)]
pub struct SphericalSegment {
    body: RotationBody,
    base_radius: f64,   // m
    sphere_radius: f64, // m
    facing_plus_x: bool,
}

impl SphericalSegment {
    // General form: (x0, y0, z0) is the center of the BASE (not the pole),
    // the axis runs at the angle alpha from OX inside the OXY or OXZ plane.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        facing_plus_x: bool,
        x0: Length,
        y0: Length,
        z0: Length,
        alpha: Angle,
        d: Length,
        h: Length,
        rho: MassDensity,
        empty_mass: Option<Mass>,
    ) -> Result<Self, MassPropsError> {
        let h_m = h.value;
        let d_m = d.value;
        if d_m <= 0.0 || h_m <= 0.0 {
            return Err(MassPropsError::GeometryError(
                "segment base diameter and height must be positive".to_string(),
            ));
        }

        let r = d_m / 2.0; // base radius
        if h_m > r * (1.0 + 10.0 * f64::EPSILON) {
            return Err(MassPropsError::GeometryError(
                "segment height cannot exceed its base radius".to_string(),
            ));
        }
        let big_r = (r * r / h_m + h_m) / 2.0; // radius of the full sphere
        let h2 = h_m * h_m;
        let h3 = h2 * h_m;
        let big_r2 = big_r * big_r;

        let side_area = 2.0 * PI * big_r * h_m;
        let encl_vol = PI * h2 * (big_r - h_m / 3.0);

        // Empty-shell intrinsic integrals. These do not depend on the
        // facing: the two orientations are mirror images about a plane
        // orthogonal to the axis, and the profile satisfies
        // f(xi)·sqrt(1 + f'(xi)²) = R = const.
        let je0 = 2.0 * PI / 3.0 * big_r * h3;
        let je1 = big_r * encl_vol;
        let ke = -PI * big_r * h2;

        // The liquid polynomials DO depend on which end holds the pole.
        let rmh = big_r - h_m;
        let trmh = big_r + rmh;
        let (jp0, jp1, kp) = if facing_plus_x {
            (
                [-PI / 5.0, PI / 2.0 * big_r, 0.0],
                [
                    PI / 20.0,
                    -PI / 4.0 * big_r,
                    PI / 3.0 * big_r2,
                    0.0,
                    0.0,
                ],
                [PI / 4.0, -2.0 * PI / 3.0 * big_r, 0.0],
            )
        } else {
            (
                [-PI / 5.0, -PI / 2.0 * rmh, PI / 3.0 * trmh * h_m],
                [
                    PI / 20.0,
                    PI / 4.0 * rmh,
                    PI * (big_r2 / 3.0 - big_r * h_m + h2 / 2.0),
                    -PI / 2.0 * rmh * trmh * h_m,
                    PI / 4.0 * trmh * trmh * h2,
                ],
                [PI / 4.0, 2.0 * PI / 3.0 * rmh, -PI / 2.0 * trmh * h_m],
            )
        };

        // The base center is the LEFT axis end exactly when the pole faces
        // the positive OX direction.
        let body = RotationBody::build(RotationBodyParams {
            alpha: alpha.value,
            x0: x0.value,
            y0: y0.value,
            z0: z0.value,
            zero_point_is_left: facing_plus_x,
            height: h_m,
            side_area,
            encl_vol,
            empty_mass: empty_mass.map(|m| m.value),
            je0,
            je1,
            ke,
            rho: rho.value,
            solver: LevelSolver::Segment {
                facing_plus_x,
                sphere_radius: big_r,
            },
            jp0,
            jp1,
            kp,
        })?;

        Ok(SphericalSegment {
            body,
            base_radius: r,
            sphere_radius: big_r,
            facing_plus_x,
        })
    }

    // Rotation axis coinciding with OX.
    pub fn along_x(
        facing_plus_x: bool,
        x0: Length,
        d: Length,
        h: Length,
        rho: MassDensity,
        empty_mass: Option<Mass>,
    ) -> Result<Self, MassPropsError> {
        let zero = Length::new::<meter>(0.0);
        Self::new(
            facing_plus_x,
            x0,
            zero,
            zero,
            Angle::new::<uom::si::angle::radian>(0.0),
            d,
            h,
            rho,
            empty_mass,
        )
    }

    // Height equal to the base radius: a hemisphere along OX.
    pub fn hemisphere(
        facing_plus_x: bool,
        x0: Length,
        d: Length,
        rho: MassDensity,
        empty_mass: Option<Mass>,
    ) -> Result<Self, MassPropsError> {
        let h = d * 0.5;
        Self::along_x(facing_plus_x, x0, d, h, rho, empty_mass)
    }

    pub fn element(&self) -> &ConstructionElement {
        self.body.element()
    }

    pub fn propellant_element(
        &self,
        prop_mass: Mass,
    ) -> Result<(ConstructionElement, Length), MassPropsError> {
        self.body.propellant_element(prop_mass)
    }

    pub fn side_surf_area(&self) -> Area {
        self.body.side_surf_area()
    }

    pub fn encl_vol(&self) -> Volume {
        self.body.encl_vol()
    }

    pub fn height(&self) -> Length {
        self.body.height()
    }

    pub fn prop_mass_cap(&self) -> Mass {
        self.body.prop_mass_cap()
    }

    pub fn prop_density(&self) -> MassDensity {
        self.body.prop_density()
    }

    pub fn left(&self) -> Point3 {
        self.body.left()
    }

    pub fn right(&self) -> Point3 {
        self.body.right()
    }

    pub fn base_radius(&self) -> Length {
        Length::new::<meter>(self.base_radius)
    }

    pub fn sphere_radius(&self) -> Length {
        Length::new::<meter>(self.sphere_radius)
    }

    pub fn faces_plus_x(&self) -> bool {
        self.facing_plus_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use uom::si::mass::kilogram;
    use uom::si::mass_density::kilogram_per_cubic_meter;

    fn len(v: f64) -> Length {
        Length::new::<meter>(v)
    }

    fn dens(v: f64) -> MassDensity {
        MassDensity::new::<kilogram_per_cubic_meter>(v)
    }

    // Liquid volume of a pole-down cap filled to `level` above the pole.
    fn cap_volume_at(sphere_r: f64, level: f64) -> f64 {
        PI / 3.0 * level * level * (3.0 * sphere_r - level)
    }

    #[test]
    fn test_hemisphere_geometry() {
        let hemi =
            SphericalSegment::hemisphere(true, len(0.0), len(4.0), dens(0.0), None).unwrap();
        // d=4 => r=h=2, sphere radius 2.
        assert_abs_diff_eq!(hemi.sphere_radius().value, 2.0, epsilon = 1e-12);
        assert_relative_eq!(
            hemi.side_surf_area().value,
            2.0 * PI * 2.0 * 2.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            hemi.encl_vol().value,
            2.0 / 3.0 * PI * 8.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_flat_segment_sphere_radius() {
        // r=3, h=1: R = (9 + 1)/2 = 5.
        let segm =
            SphericalSegment::along_x(true, len(0.0), len(6.0), len(1.0), dens(0.0), None)
                .unwrap();
        assert_abs_diff_eq!(segm.sphere_radius().value, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_height_above_base_radius() {
        assert!(
            SphericalSegment::along_x(true, len(0.0), len(2.0), len(1.5), dens(0.0), None)
                .is_err()
        );
    }

    #[test]
    fn test_facing_level_round_trip() {
        let rho = 1141.0;
        let hemi =
            SphericalSegment::hemisphere(true, len(0.0), len(4.0), dens(rho), None).unwrap();
        let sphere_r = hemi.sphere_radius().value;

        for level in [0.2, 0.8, 1.3, 1.9] {
            let vol = cap_volume_at(sphere_r, level);
            let (_, solved) = hemi
                .propellant_element(Mass::new::<kilogram>(rho * vol))
                .unwrap();
            assert_relative_eq!(solved.value, level, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_complementary_facing_identity() {
        // level_away(v) = h - level_toward(V - v) for every volume.
        let rho = 1000.0;
        let toward =
            SphericalSegment::along_x(true, len(0.0), len(6.0), len(1.2), dens(rho), None)
                .unwrap();
        let away =
            SphericalSegment::along_x(false, len(0.0), len(6.0), len(1.2), dens(rho), None)
                .unwrap();

        let capacity = toward.prop_mass_cap().value;
        for fraction in [0.0, 0.12, 0.35, 0.5, 0.78, 1.0] {
            let m = fraction * capacity;
            let (_, l_away) = away.propellant_element(Mass::new::<kilogram>(m)).unwrap();
            let (_, l_toward) = toward
                .propellant_element(Mass::new::<kilogram>(capacity - m))
                .unwrap();
            assert_abs_diff_eq!(
                l_away.value,
                1.2 - l_toward.value,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_full_hemisphere_matches_solid_values() {
        // Full fill: solid hemisphere, MoI about the symmetry axis is
        // (2/5) M R² and the CoM sits 3R/8 above the flat face.
        let rho = 1000.0;
        let hemi =
            SphericalSegment::hemisphere(true, len(0.0), len(4.0), dens(rho), None).unwrap();
        let cap = hemi.prop_mass_cap();
        let (liquid, level) = hemi.propellant_element(cap).unwrap();

        assert_relative_eq!(level.value, 2.0, max_relative = 1e-9);
        assert_relative_eq!(
            liquid.moi().x.value,
            0.4 * cap.value * 4.0,
            max_relative = 1e-9
        );
        // Base center at x0=0, pole at x=h=2; CoM 3R/8 = 0.75 from the base.
        assert_relative_eq!(liquid.com().x.value, 0.75, max_relative = 1e-9);
    }

    #[test]
    fn test_boundary_fills() {
        let rho = 800.0;
        let segm =
            SphericalSegment::along_x(false, len(1.0), len(5.0), len(1.0), dens(rho), None)
                .unwrap();

        let (empty, level) = segm.propellant_element(Mass::new::<kilogram>(0.0)).unwrap();
        assert_abs_diff_eq!(empty.mass().value, 0.0);
        assert_abs_diff_eq!(empty.moi().x.value, 0.0);
        assert_abs_diff_eq!(level.value, 0.0);

        let (full, level) = segm.propellant_element(segm.prop_mass_cap()).unwrap();
        assert_relative_eq!(full.mass().value, segm.prop_mass_cap().value);
        assert_relative_eq!(level.value, 1.0, max_relative = 1e-9);
    }

    #[test]
    fn test_empty_shell_com_between_base_and_pole() {
        // Hemispherical shell CoM is R/2 from the base along the axis.
        let hemi =
            SphericalSegment::hemisphere(true, len(0.0), len(4.0), dens(0.0), None).unwrap();
        let com = hemi.element().com();
        assert_relative_eq!(com.x.value, 1.0, max_relative = 1e-9);
        assert_abs_diff_eq!(com.y.value, 0.0);
        assert_abs_diff_eq!(com.z.value, 0.0);
    }
}
