use std::f64::consts::PI;

use uom::si::f64::{Angle, Area, Length, Mass, MassDensity, Volume};
use uom::si::length::meter;

use crate::elements::construction::ConstructionElement;
use crate::elements::rotation_body::{LevelSolver, RotationBody, RotationBodyParams};
use crate::errors::MassPropsError;
use crate::utils::point3::Point3;

// Truncated conical shell (side surface only), optionally holding
// propellant in the enclosed volume. Diameter d0 belongs to the left
// (smaller-X) base, d1 to the right one; either may be zero (a full cone)
// but not both, and d0 = d1 gives a cylinder.
#[derive(Debug, Clone)]
pub struct TruncatedCone {
    body: RotationBody,
    left_radius: f64,  // m
    right_radius: f64, // m
}

impl TruncatedCone {
    // General form: (x0, y0, z0) is the center of the LEFT base, the axis
    // runs at the angle alpha from OX inside the OXY or OXZ plane
    // (whichever of y0/z0 is zero). With `empty_mass` given the shell is
    // final; with None it stays at unit surface density for later
    // pro-rating.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        x0: Length,
        y0: Length,
        z0: Length,
        alpha: Angle,
        d0: Length,
        d1: Length,
        h: Length,
        rho: MassDensity,
        empty_mass: Option<Mass>,
    ) -> Result<Self, MassPropsError> {
        let h_m = h.value;
        let d0_m = d0.value;
        let d1_m = d1.value;
        if h_m <= 0.0 {
            return Err(MassPropsError::GeometryError(
                "cone height must be positive".to_string(),
            ));
        }
        if d0_m < 0.0 || d1_m < 0.0 {
            return Err(MassPropsError::GeometryError(
                "base diameters cannot be negative".to_string(),
            ));
        }
        if d0_m == 0.0 && d1_m == 0.0 {
            return Err(MassPropsError::GeometryError(
                "base diameters cannot both be zero".to_string(),
            ));
        }

        let r = d0_m / 2.0; // left (smaller-X) base radius
        let big_r = d1_m / 2.0; // right (larger-X) base radius
        let delta_r = big_r - r;
        let h2 = h_m * h_m;

        let s = (delta_r * delta_r + h2).sqrt(); // slant length
        let a = delta_r / h_m;
        let a2 = a * a;
        let a3 = a2 * a;
        let a4 = a2 * a2;
        let big_r2 = big_r * big_r;
        let big_r3 = big_r2 * big_r;
        let big_r4 = big_r2 * big_r2;
        let r2 = r * r;

        let side_area = PI * s * (big_r + r);
        let encl_vol = PI / 3.0 * h_m * (big_r2 + big_r * r + r2);

        // Intrinsic inertia integrals of the empty shell, relative to the
        // right base center.
        let je0 = PI * h2 * s * (r / 2.0 + big_r / 6.0);
        let je1 = PI / 4.0 * s * (big_r + r) * (big_r2 + r2);
        let ke = -PI / 3.0 * s * h_m * (2.0 * r + big_r);

        // Intrinsic parameters of the liquid as polynomials of the level.
        let jp0 = [PI / 5.0 * a2, -PI / 2.0 * a * big_r, PI / 3.0 * big_r2];
        let jp1 = [
            PI / 20.0 * a4,
            -PI / 4.0 * a3 * big_r,
            PI / 2.0 * a2 * big_r2,
            -PI / 2.0 * a * big_r3,
            PI / 4.0 * big_r4,
        ];
        let kp = [-PI / 4.0 * a2, 2.0 * PI / 3.0 * a * big_r, -PI / 2.0 * big_r2];

        let solver = if delta_r == 0.0 {
            LevelSolver::Cylinder
        } else {
            LevelSolver::Cone {
                delta_r,
                vol_coeff: 3.0 / PI * h2 * delta_r,
                rh: big_r * h_m,
                rh3: (big_r * h_m).powi(3),
            }
        };

        let body = RotationBody::build(RotationBodyParams {
            alpha: alpha.value,
            x0: x0.value,
            y0: y0.value,
            z0: z0.value,
            zero_point_is_left: true,
            height: h_m,
            side_area,
            encl_vol,
            empty_mass: empty_mass.map(|m| m.value),
            je0,
            je1,
            ke,
            rho: rho.value,
            solver,
            jp0,
            jp1,
            kp,
        })?;

        Ok(TruncatedCone {
            body,
            left_radius: r,
            right_radius: big_r,
        })
    }

    // Rotation axis coinciding with OX.
    pub fn along_x(
        x0: Length,
        d0: Length,
        d1: Length,
        h: Length,
        rho: MassDensity,
        empty_mass: Option<Mass>,
    ) -> Result<Self, MassPropsError> {
        let zero = Length::new::<meter>(0.0);
        Self::new(
            x0,
            zero,
            zero,
            Angle::new::<uom::si::angle::radian>(0.0),
            d0,
            d1,
            h,
            rho,
            empty_mass,
        )
    }

    // Equal base diameters: a cylinder along OX.
    pub fn cylinder(
        x0: Length,
        d: Length,
        h: Length,
        rho: MassDensity,
        empty_mass: Option<Mass>,
    ) -> Result<Self, MassPropsError> {
        Self::along_x(x0, d, d, h, rho, empty_mass)
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

    pub fn left_radius(&self) -> Length {
        Length::new::<meter>(self.left_radius)
    }

    pub fn right_radius(&self) -> Length {
        Length::new::<meter>(self.right_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use uom::si::angle::radian;
    use uom::si::mass::kilogram;
    use uom::si::mass_density::kilogram_per_cubic_meter;

    fn len(v: f64) -> Length {
        Length::new::<meter>(v)
    }

    fn dens(v: f64) -> MassDensity {
        MassDensity::new::<kilogram_per_cubic_meter>(v)
    }

    // Liquid volume when the cone is filled to `level` above the right base.
    fn cone_volume_at(r_left: f64, r_right: f64, h: f64, level: f64) -> f64 {
        let a = (r_right - r_left) / h;
        let r_at_level = r_right - a * level;
        PI / 3.0 * level * (r_right * r_right + r_right * r_at_level + r_at_level * r_at_level)
    }

    #[test]
    fn test_full_cone_surface_and_volume() {
        // r=0, R=1 m, h=3 m: volume is exactly pi.
        let cone = TruncatedCone::along_x(len(0.0), len(0.0), len(2.0), len(3.0), dens(0.0), None)
            .unwrap();
        assert_relative_eq!(cone.encl_vol().value, PI, max_relative = 1e-12);
        let slant = (1.0f64 + 9.0).sqrt();
        assert_relative_eq!(
            cone.side_surf_area().value,
            PI * slant,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_rejects_degenerate_geometry() {
        assert!(
            TruncatedCone::along_x(len(0.0), len(0.0), len(0.0), len(1.0), dens(0.0), None)
                .is_err()
        );
        assert!(
            TruncatedCone::along_x(len(0.0), len(1.0), len(1.0), len(0.0), dens(0.0), None)
                .is_err()
        );
        assert!(
            TruncatedCone::along_x(len(0.0), len(-1.0), len(1.0), len(1.0), dens(0.0), None)
                .is_err()
        );
    }

    #[test]
    fn test_cylinder_shell_axial_moi_is_hoop() {
        // A thin cylindrical shell about its own axis: Jx = M R².
        let cyl =
            TruncatedCone::cylinder(len(0.0), len(2.0), len(5.0), dens(0.0), None).unwrap();
        let scale = ConstructionElement::mass_scale(
            [cyl.element()],
            Mass::new::<kilogram>(300.0),
        )
        .unwrap();
        let shell = cyl.element().pro_rate_mass(scale).unwrap();
        assert_relative_eq!(shell.moi().x.value, 300.0 * 1.0, max_relative = 1e-12);
        // Shell CoM sits at mid-height on the axis.
        assert_abs_diff_eq!(shell.com().x.value, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_tilted_cylinder_com() {
        let alpha = 0.3f64;
        let cyl = TruncatedCone::new(
            len(1.0),
            len(0.5),
            len(0.0),
            Angle::new::<radian>(alpha),
            len(2.0),
            len(2.0),
            len(4.0),
            dens(0.0),
            None,
        )
        .unwrap();
        let com = cyl.element().com();
        assert_abs_diff_eq!(com.x.value, 1.0 + alpha.cos() * 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(com.y.value, 0.5 + alpha.sin() * 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(com.z.value, 0.0);
    }

    #[test]
    fn test_tilt_plane_must_be_determined() {
        // Both offsets non-zero: the axis lies in neither coordinate plane.
        let result = TruncatedCone::new(
            len(0.0),
            len(1.0),
            len(1.0),
            Angle::new::<radian>(0.1),
            len(2.0),
            len(2.0),
            len(4.0),
            dens(0.0),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_cylinder_level_is_linear() {
        let rho = 1000.0;
        let cyl = TruncatedCone::cylinder(len(0.0), len(2.0), len(2.0), dens(rho), None).unwrap();
        // Capacity of a r=1 m, h=2 m cylinder at 1000 kg/m³ is 2000*pi kg.
        assert_relative_eq!(cyl.prop_mass_cap().value, 2000.0 * PI, max_relative = 1e-12);

        let half = Mass::new::<kilogram>(1000.0 * PI);
        let (_, level) = cyl.propellant_element(half).unwrap();
        assert_abs_diff_eq!(level.value, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cone_level_round_trip() {
        let rho = 800.0;
        let (r_left, r_right, h) = (0.6, 1.4, 3.0);
        let cone = TruncatedCone::along_x(
            len(0.0),
            len(2.0 * r_left),
            len(2.0 * r_right),
            len(h),
            dens(rho),
            None,
        )
        .unwrap();

        for level in [0.1, 0.7, 1.5, 2.4, 2.95] {
            let vol = cone_volume_at(r_left, r_right, h, level);
            let (_, solved) = cone
                .propellant_element(Mass::new::<kilogram>(rho * vol))
                .unwrap();
            assert_relative_eq!(solved.value, level, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_widening_cone_level_round_trip() {
        // Left base wider than the right one: the cubic coefficient flips sign.
        let rho = 1000.0;
        let (r_left, r_right, h) = (1.5, 0.5, 2.0);
        let cone = TruncatedCone::along_x(
            len(0.0),
            len(2.0 * r_left),
            len(2.0 * r_right),
            len(h),
            dens(rho),
            None,
        )
        .unwrap();

        for level in [0.2, 0.9, 1.6, 1.95] {
            let vol = cone_volume_at(r_left, r_right, h, level);
            let (_, solved) = cone
                .propellant_element(Mass::new::<kilogram>(rho * vol))
                .unwrap();
            assert_relative_eq!(solved.value, level, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_full_cone_propellant_matches_solid_cone() {
        // Full fill of an apex-up cone equals the classic solid-cone MoI
        // about its axis, (3/10) M R².
        let rho = 1000.0;
        let cone =
            TruncatedCone::along_x(len(0.0), len(0.0), len(2.0), len(3.0), dens(rho), None)
                .unwrap();
        let cap = cone.prop_mass_cap();
        let (liquid, level) = cone.propellant_element(cap).unwrap();

        assert_relative_eq!(level.value, 3.0, max_relative = 1e-9);
        assert_relative_eq!(
            liquid.moi().x.value,
            0.3 * cap.value * 1.0,
            max_relative = 1e-9
        );
        // Solid cone CoM sits a quarter height above the base.
        assert_relative_eq!(liquid.com().x.value, 3.0 - 0.75, max_relative = 1e-9);
    }

    #[test]
    fn test_propellant_mass_out_of_range() {
        let cyl =
            TruncatedCone::cylinder(len(0.0), len(2.0), len(2.0), dens(1000.0), None).unwrap();
        let over = Mass::new::<kilogram>(cyl.prop_mass_cap().value * 1.01);
        assert!(cyl.propellant_element(over).is_err());
        assert!(cyl
            .propellant_element(Mass::new::<kilogram>(-1.0))
            .is_err());
    }

    #[test]
    fn test_dry_tank_rejects_propellant() {
        let cyl = TruncatedCone::cylinder(len(0.0), len(2.0), len(2.0), dens(0.0), None).unwrap();
        assert!(cyl.propellant_element(Mass::new::<kilogram>(1.0)).is_err());
        // Zero is still answerable.
        let (empty, level) = cyl.propellant_element(Mass::new::<kilogram>(0.0)).unwrap();
        assert_abs_diff_eq!(empty.mass().value, 0.0);
        assert_abs_diff_eq!(level.value, 0.0);
    }
}
