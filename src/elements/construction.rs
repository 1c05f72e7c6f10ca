use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use uom::si::f64::{Mass, MomentOfInertia};
use uom::si::mass::kilogram;
use uom::si::moment_of_inertia::kilogram_square_meter;

use crate::errors::MassPropsError;
use crate::utils::point3::Point3;

// Moments of inertia about the OX, OY and OZ body axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertiaMoments {
    pub x: MomentOfInertia,
    pub y: MomentOfInertia,
    pub z: MomentOfInertia,
}

impl InertiaMoments {
    pub fn new(x: MomentOfInertia, y: MomentOfInertia, z: MomentOfInertia) -> Self {
        InertiaMoments { x, y, z }
    }

    pub fn from_si(x: f64, y: f64, z: f64) -> Self {
        InertiaMoments {
            x: MomentOfInertia::new::<kilogram_square_meter>(x),
            y: MomentOfInertia::new::<kilogram_square_meter>(y),
            z: MomentOfInertia::new::<kilogram_square_meter>(z),
        }
    }

    pub fn zero() -> Self {
        InertiaMoments::from_si(0.0, 0.0, 0.0)
    }

    pub fn as_si(&self) -> [f64; 3] {
        [self.x.value, self.y.value, self.z.value]
    }
}

impl Add for InertiaMoments {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        InertiaMoments::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for InertiaMoments {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        InertiaMoments::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for InertiaMoments {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        InertiaMoments::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

// A construction element: the mass, center of mass and moments of inertia
// of one structural or propellant body, combinable with "+"/"-" into the
// aggregate properties of a whole stage. A non-final element carries the
// mass distribution of its shape at unit surface density; its absolute
// mass scale is fixed exactly once, via `pro_rate_mass`.
//
// Summed elements are assumed not to intersect in space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstructionElement {
    com: Point3,
    mass: Mass,
    moi: InertiaMoments,
    is_final: bool,
}

impl ConstructionElement {
    pub(crate) fn new(com: Point3, mass: Mass, moi: InertiaMoments, is_final: bool) -> Self {
        assert!(mass.value >= 0.0, "Element mass cannot be negative");
        assert!(
            moi.x.value >= 0.0 && moi.y.value >= 0.0 && moi.z.value >= 0.0,
            "Moments of inertia cannot be negative"
        );
        ConstructionElement {
            com,
            mass,
            moi,
            is_final,
        }
    }

    // The all-zero element is final so that it can seed a "+" accumulation.
    pub fn zero() -> Self {
        ConstructionElement {
            com: Point3::origin(),
            mass: Mass::new::<kilogram>(0.0),
            moi: InertiaMoments::zero(),
            is_final: true,
        }
    }

    pub fn com(&self) -> Point3 {
        self.com
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn mass(&self) -> Mass {
        assert!(self.is_final, "Mass queried on a non-final element");
        self.mass
    }

    pub fn moi(&self) -> InertiaMoments {
        assert!(self.is_final, "Moments of inertia queried on a non-final element");
        self.moi
    }

    // The dimensionless factor which, applied to each of the given non-final
    // elements via `pro_rate_mass`, makes their masses sum to `total_mass`.
    // Valid only when all elements share the same surface (or volume)
    // density, so their relative masses are already correct.
    pub fn mass_scale<'a, I>(elements: I, total_mass: Mass) -> Result<f64, MassPropsError>
    where
        I: IntoIterator<Item = &'a ConstructionElement>,
    {
        if total_mass.value <= 0.0 {
            return Err(MassPropsError::MassError(
                "total mass must be positive".to_string(),
            ));
        }

        let mut nominal_total = 0.0;
        for element in elements {
            if element.is_final {
                return Err(MassPropsError::MassError(
                    "mass scale requires non-final elements".to_string(),
                ));
            }
            nominal_total += element.mass.value;
        }

        if nominal_total <= 0.0 {
            return Err(MassPropsError::MassError(
                "nominal total mass must be positive".to_string(),
            ));
        }
        Ok(total_mass.value / nominal_total)
    }

    // Finalizes a non-final element: mass and MoIs are multiplied by the
    // scale factor, the CoM is unchanged. One-shot: a final element cannot
    // be re-scaled.
    pub fn pro_rate_mass(&self, scale: f64) -> Result<ConstructionElement, MassPropsError> {
        if self.is_final {
            return Err(MassPropsError::MassError(
                "element mass is already finalized".to_string(),
            ));
        }
        if scale <= 0.0 {
            return Err(MassPropsError::MassError(
                "mass scale factor must be positive".to_string(),
            ));
        }
        Ok(ConstructionElement {
            com: self.com,
            mass: self.mass * scale,
            moi: self.moi * scale,
            is_final: true,
        })
    }
}

impl Default for ConstructionElement {
    fn default() -> Self {
        ConstructionElement::zero()
    }
}

impl AddAssign for ConstructionElement {
    fn add_assign(&mut self, right: ConstructionElement) {
        assert!(
            self.is_final && right.is_final,
            "Only finalized elements can be combined"
        );
        assert!(
            self.mass.value > 0.0 || right.mass.value > 0.0,
            "Cannot combine two zero-mass elements"
        );

        // Masses and MoIs are directly additive; the CoM is mass-weighted.
        let mass_before = self.mass;
        self.mass += right.mass;
        self.moi = self.moi + right.moi;

        let mu0 = mass_before.value / self.mass.value;
        let mu1 = right.mass.value / self.mass.value;
        self.com = mu0 * self.com + mu1 * right.com;
    }
}

impl Add for ConstructionElement {
    type Output = Self;

    fn add(self, right: Self) -> Self {
        let mut result = self;
        result += right;
        result
    }
}

impl SubAssign for ConstructionElement {
    fn sub_assign(&mut self, right: ConstructionElement) {
        assert!(
            self.is_final && right.is_final,
            "Only finalized elements can be combined"
        );
        assert!(
            self.mass.value > 0.0 || right.mass.value > 0.0,
            "Cannot combine two zero-mass elements"
        );

        let mass_before = self.mass;
        self.mass -= right.mass;
        self.moi = self.moi - right.moi;
        assert!(
            self.mass.value > 0.0,
            "Subtraction must leave a positive mass"
        );
        assert!(
            self.moi.x.value >= 0.0 && self.moi.y.value >= 0.0 && self.moi.z.value >= 0.0,
            "Subtraction drove a moment of inertia negative"
        );

        let mu0 = mass_before.value / self.mass.value;
        let mu1 = right.mass.value / self.mass.value;
        self.com = mu0 * self.com - mu1 * right.com;
    }
}

impl Sub for ConstructionElement {
    type Output = Self;

    fn sub(self, right: Self) -> Self {
        let mut result = self;
        result -= right;
        result
    }
}
