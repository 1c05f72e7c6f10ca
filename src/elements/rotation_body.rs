use std::f64::consts::PI;

use uom::si::area::square_meter;
use uom::si::f64::{Area, Length, Mass, MassDensity, Volume};
use uom::si::length::meter;
use uom::si::mass::kilogram;
use uom::si::mass_density::kilogram_per_cubic_meter;
use uom::si::volume::cubic_meter;

use crate::constants::{BOUNDARY_TOL, BOUNDARY_TOL_FACTOR, HALLEY_MAX_ITERATIONS};
use crate::elements::construction::{ConstructionElement, InertiaMoments};
use crate::errors::MassPropsError;
use crate::utils::point3::Point3;

// Shared engine for bodies of revolution (truncated cones, spherical
// segments). The rotation axis makes the angle alpha (|alpha| < pi/2) with
// OX and lies in the OXY or OXZ plane; all intrinsic inertia integrals are
// taken relative to the RIGHT (larger-X) axis end, which stays fixed as
// propellant drains while the left boundary of the liquid moves.
//
// Everything below the public boundary is plain f64 in SI base units
// (m, kg and their powers); uom quantities appear only in signatures.

// Shape-specific propellant volume -> fill level inversion, selected at
// construction time.
#[derive(Debug, Clone, Copy)]
pub(crate) enum LevelSolver {
    // Equal base radii: the level is linear in the volume.
    Cylinder,
    // General truncated cone: the unique real root of a cubic, via the
    // Cardano-style closed form with coefficients cached by the shape.
    Cone {
        delta_r: f64,   // m, right radius minus left radius
        vol_coeff: f64, // m³, premultiplied 3h²·delta_r/pi
        rh: f64,        // m², right radius times height
        rh3: f64,       // m⁶, rh cubed
    },
    // Spherical segment: Halley iteration on the normalized cap equation.
    Segment {
        facing_plus_x: bool,
        sphere_radius: f64, // m
    },
}

impl LevelSolver {
    fn level_of(&self, vol: f64, encl_vol: f64, height: f64) -> Result<f64, MassPropsError> {
        match *self {
            LevelSolver::Cylinder => Ok(vol / encl_vol * height),
            LevelSolver::Cone {
                delta_r,
                vol_coeff,
                rh,
                rh3,
            } => Ok((rh - (rh3 - vol_coeff * vol).cbrt()) / delta_r),
            LevelSolver::Segment {
                facing_plus_x: true,
                sphere_radius,
            } => segment_level(vol, sphere_radius),
            LevelSolver::Segment {
                facing_plus_x: false,
                sphere_radius,
            } => {
                // V_away(l) + V_toward(h - l) = enclosed volume
                let complement = segment_level(encl_vol - vol, sphere_radius)?;
                Ok(height - complement)
            }
        }
    }
}

// Solves x²(3 - x) = v for the pole-down spherical cap, where x is the
// fill level over the sphere radius (0 <= x <= 1) and v is the volume over
// pi/3·R³ (0 <= v <= 2). Halley's method from x = 1/2; the closed-form
// cubic root would run through complex arithmetic here, the iteration
// does not.
fn segment_level(vol: f64, sphere_radius: f64) -> Result<f64, MassPropsError> {
    let r3 = sphere_radius.powi(3);
    let mut v = 3.0 * vol / (PI * r3);
    debug_assert!((0.0..2.0 + BOUNDARY_TOL).contains(&v));
    v = v.min(2.0);

    let mut x: f64 = 0.5;
    for _ in 0..HALLEY_MAX_ITERATIONS {
        let x2 = x * x;
        let x3 = x2 * x;
        let x4 = x2 * x2;
        let dx = x * (x - 2.0) * (x3 - 3.0 * x2 + v)
            / (2.0 * x4 - 8.0 * x3 + 9.0 * x2 + v * (1.0 - x));
        x -= dx;

        if dx.abs() < BOUNDARY_TOL {
            return Ok(x.clamp(0.0, 1.0) * sphere_radius);
        }
    }
    Err(MassPropsError::LevelSolverDiverged {
        iterations: HALLEY_MAX_ITERATIONS,
    })
}

// Everything a concrete shape computes before handing over to `build`.
// All scalars in SI base units; the intrinsic inertia integrals je0/je1
// (m⁴) and ke (m³) are per unit surface density, relative to the right
// axis end.
pub(crate) struct RotationBodyParams {
    pub alpha: f64, // rad, axis tilt from OX
    pub x0: f64,    // m, the given axis end
    pub y0: f64,
    pub z0: f64,
    pub zero_point_is_left: bool,
    pub height: f64,    // m, body length along the rotation axis
    pub side_area: f64, // m², side surface without the bases
    pub encl_vol: f64,  // m³, volume enclosed with imaginary bases
    pub empty_mass: Option<f64>, // kg; None = unit surface density, non-final
    pub je0: f64,
    pub je1: f64,
    pub ke: f64,
    pub rho: f64, // kg/m³, propellant density; 0 = no propellant
    pub solver: LevelSolver,
    // Propellant intrinsic parameters as polynomials of the fill level,
    // highest power first: J0 terms l⁵..l³, J1 terms l⁵..l¹, K terms l⁴..l².
    pub jp0: [f64; 3],
    pub jp1: [f64; 5],
    pub kp: [f64; 3],
}

#[derive(Debug, Clone)]
pub struct RotationBody {
    element: ConstructionElement,
    in_xy: bool,
    in_xz: bool,
    cos_a: f64,
    sin_a: f64,
    left: [f64; 3],  // m
    right: [f64; 3], // m, origin of all intrinsic inertia integrals
    yz_r: f64,       // m, right[1] or right[2] depending on the axis plane
    height: f64,     // m
    side_area: f64,  // m²
    encl_vol: f64,   // m³
    rho: f64,        // kg/m³
    prop_mass_cap: f64, // kg
    // Coefficients translating (J0, J1, K, surface-or-volume) into Jx/Jin/Jort.
    jx0: f64,
    jx1: f64,
    jx_k: f64,
    jx_sv: f64,
    jin0: f64,
    jin1: f64,
    jin_k: f64,
    jin_sv: f64,
    jort_k: f64,
    jort_sv: f64,
    jp0: [f64; 3],
    jp1: [f64; 5],
    kp: [f64; 3],
    solver: LevelSolver,
}

impl RotationBody {
    pub(crate) fn build(params: RotationBodyParams) -> Result<RotationBody, MassPropsError> {
        let in_xy = params.z0 == 0.0;
        let in_xz = params.y0 == 0.0;
        if !(in_xy || in_xz) {
            return Err(MassPropsError::GeometryError(
                "rotation axis must lie in the OXY or OXZ plane".to_string(),
            ));
        }
        if in_xy && in_xz && params.alpha != 0.0 {
            return Err(MassPropsError::GeometryError(
                "an axis end on OX leaves the tilt plane undetermined; use zero tilt".to_string(),
            ));
        }

        let cos_a = params.alpha.cos();
        let sin_a = params.alpha.sin();
        if cos_a <= 0.0 {
            return Err(MassPropsError::GeometryError(
                "axis tilt must satisfy |alpha| < pi/2".to_string(),
            ));
        }
        if params.height <= 0.0 {
            return Err(MassPropsError::GeometryError(
                "body length must be positive".to_string(),
            ));
        }
        if params.side_area <= 0.0 || params.encl_vol <= 0.0 {
            return Err(MassPropsError::GeometryError(
                "side surface area and enclosed volume must be positive".to_string(),
            ));
        }
        if params.rho < 0.0 {
            return Err(MassPropsError::GeometryError(
                "propellant density cannot be negative".to_string(),
            ));
        }

        // Left and right ends of the rotation axis.
        let h = params.height;
        let dyz = sin_a * h;
        let (left, right) = if params.zero_point_is_left {
            let left = [params.x0, params.y0, params.z0];
            let right = [
                params.x0 + cos_a * h,
                if in_xy { params.y0 + dyz } else { 0.0 },
                if in_xz { params.z0 + dyz } else { 0.0 },
            ];
            (left, right)
        } else {
            let right = [params.x0, params.y0, params.z0];
            let left = [
                params.x0 - cos_a * h,
                if in_xy { params.y0 - dyz } else { 0.0 },
                if in_xz { params.z0 - dyz } else { 0.0 },
            ];
            (left, right)
        };
        let yz_r = if in_xy { right[1] } else { right[2] };

        let mut body = RotationBody {
            element: ConstructionElement::zero(),
            in_xy,
            in_xz,
            cos_a,
            sin_a,
            left,
            right,
            yz_r,
            height: h,
            side_area: params.side_area,
            encl_vol: params.encl_vol,
            rho: params.rho,
            prop_mass_cap: params.rho * params.encl_vol,
            jx0: sin_a * sin_a,
            jx1: 1.0 + cos_a * cos_a,
            jx_k: 2.0 * sin_a * yz_r,
            jx_sv: yz_r * yz_r,
            jin0: cos_a * cos_a,
            jin1: 1.0 + sin_a * sin_a,
            jin_k: 2.0 * cos_a * right[0],
            jin_sv: right[0] * right[0],
            jort_k: 2.0 * (cos_a * right[0] + sin_a * yz_r),
            jort_sv: right[0] * right[0] + yz_r * yz_r,
            jp0: params.jp0,
            jp1: params.jp1,
            kp: params.kp,
            solver: params.solver,
        };

        // "Empty" (shell-only) mass properties. With an explicit mass the
        // surface density follows from it and the element is final;
        // otherwise the surface density is 1 and the mass stays nominal.
        let (is_final, surf_dens, empty_mass) = match params.empty_mass {
            Some(mass) => {
                if mass <= 0.0 {
                    return Err(MassPropsError::MassError(
                        "empty mass must be positive".to_string(),
                    ));
                }
                (true, mass / params.side_area, mass)
            }
            None => (false, 1.0, params.side_area),
        };

        let (com, moi) = body.mois_com(params.je0, params.je1, params.ke, params.side_area, surf_dens);

        // The plane flags derived from the axis end must agree with the CoM.
        debug_assert!(!body.in_xy || com.z.value == 0.0);
        debug_assert!(!body.in_xz || com.y.value == 0.0);

        body.element =
            ConstructionElement::new(com, Mass::new::<kilogram>(empty_mass), moi, is_final);
        Ok(body)
    }

    // Translates intrinsic inertia parameters (J0: second moment along the
    // axis, J1: quarter of the fourth radial moment, K: negative first
    // moment, all relative to the right axis end) and the surface-or-volume
    // scalar into body-axis MoIs and the CoM. The same mapping serves the
    // 2D shell (sv = area, dens = surface density) and the 3D propellant
    // volume (sv = volume, dens = propellant density).
    fn mois_com(&self, j0: f64, j1: f64, k: f64, sv: f64, dens: f64) -> (Point3, InertiaMoments) {
        debug_assert!(j0 >= 0.0 && j1 >= 0.0 && sv > 0.0 && k <= 0.0);

        let jx = self.jx0 * j0 + self.jx1 * j1 + self.jx_k * k + self.jx_sv * sv;
        let jin = self.jin0 * j0 + self.jin1 * j1 + self.jin_k * k + self.jin_sv * sv;
        let jort = j0 + j1 + self.jort_k * k + self.jort_sv * sv;
        let jy = if self.in_xy { jin } else { jort };
        let jz = if self.in_xz { jin } else { jort };
        let moi = InertiaMoments::from_si(dens * jx, dens * jy, dens * jz);

        // CoM offset along the rotation axis, relative to the right end.
        let xi_c = k / sv;
        let yz_c = self.yz_r + self.sin_a * xi_c;
        let com = Point3::from_meters(
            self.right[0] + self.cos_a * xi_c,
            if self.in_xy { yz_c } else { 0.0 },
            if self.in_xz { yz_c } else { 0.0 },
        );
        (com, moi)
    }

    // Mass properties of the propellant currently filling this body (the
    // shell itself is NOT included), together with the fill level measured
    // from the right axis end. The propellant surface is taken orthogonal
    // to the rotation axis, as in a pressurized tank.
    pub fn propellant_element(
        &self,
        prop_mass: Mass,
    ) -> Result<(ConstructionElement, Length), MassPropsError> {
        let m = prop_mass.value;
        if self.rho <= 0.0 {
            return if m == 0.0 {
                Ok((ConstructionElement::zero(), Length::new::<meter>(0.0)))
            } else {
                Err(MassPropsError::NoPropellant)
            };
        }
        if m < 0.0 || m > self.prop_mass_cap * BOUNDARY_TOL_FACTOR {
            return Err(MassPropsError::PropMassOutOfRange {
                mass_kg: m,
                capacity_kg: self.prop_mass_cap,
            });
        }
        if m == 0.0 {
            // The weighted-CoM transform is undefined at zero volume.
            return Ok((ConstructionElement::zero(), Length::new::<meter>(0.0)));
        }

        let vol = (m / self.rho).clamp(0.0, self.encl_vol);

        let level = self.solver.level_of(vol, self.encl_vol, self.height)?;
        debug_assert!(
            level >= -self.height * BOUNDARY_TOL && level <= self.height * BOUNDARY_TOL_FACTOR
        );
        let level = level.clamp(0.0, self.height);

        // Intrinsic parameters of the liquid at this level (Horner).
        let l = level;
        let l2 = l * l;
        let l3 = l2 * l;
        let jp0 = ((self.jp0[0] * l + self.jp0[1]) * l + self.jp0[2]) * l3;
        let jp1 = ((((self.jp1[0] * l + self.jp1[1]) * l + self.jp1[2]) * l + self.jp1[3]) * l
            + self.jp1[4])
            * l;
        let kp = ((self.kp[0] * l + self.kp[1]) * l + self.kp[2]) * l2;
        debug_assert!(jp0 >= 0.0 && jp1 >= 0.0 && kp <= 0.0);

        // Current volume here, not the full capacity.
        let (com, moi) = self.mois_com(jp0, jp1, kp, vol, self.rho);
        Ok((
            ConstructionElement::new(com, prop_mass, moi, true),
            Length::new::<meter>(level),
        ))
    }

    pub fn element(&self) -> &ConstructionElement {
        &self.element
    }

    pub fn side_surf_area(&self) -> Area {
        Area::new::<square_meter>(self.side_area)
    }

    pub fn encl_vol(&self) -> Volume {
        Volume::new::<cubic_meter>(self.encl_vol)
    }

    pub fn height(&self) -> Length {
        Length::new::<meter>(self.height)
    }

    pub fn prop_mass_cap(&self) -> Mass {
        Mass::new::<kilogram>(self.prop_mass_cap)
    }

    pub fn prop_density(&self) -> MassDensity {
        MassDensity::new::<kilogram_per_cubic_meter>(self.rho)
    }

    pub fn left(&self) -> Point3 {
        Point3::from_meters(self.left[0], self.left[1], self.left[2])
    }

    pub fn right(&self) -> Point3 {
        Point3::from_meters(self.right[0], self.right[1], self.right[2])
    }
}
