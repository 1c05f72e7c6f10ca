use std::ops::{Add, Mul, Neg, Sub};
use uom::si::f64::Length;
use uom::si::length::meter;

// Body-fixed frame: OX is the vehicle's axis of symmetry, positive from
// nose to tail; OY and OZ complete the right-handed triad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: Length,
    pub y: Length,
    pub z: Length,
}

impl Point3 {
    pub fn new(x: Length, y: Length, z: Length) -> Self {
        Point3 { x, y, z }
    }

    pub fn from_meters(x: f64, y: f64, z: f64) -> Self {
        Point3 {
            x: Length::new::<meter>(x),
            y: Length::new::<meter>(y),
            z: Length::new::<meter>(z),
        }
    }

    pub fn origin() -> Self {
        Point3::from_meters(0.0, 0.0, 0.0)
    }

    pub fn as_meters(&self) -> [f64; 3] {
        [
            self.x.get::<meter>(),
            self.y.get::<meter>(),
            self.z.get::<meter>(),
        ]
    }
}

impl Default for Point3 {
    fn default() -> Self {
        Point3::origin()
    }
}

impl Add for Point3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Point3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Point3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Point3 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Point3::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Mul<Point3> for f64 {
    type Output = Point3;

    fn mul(self, point: Point3) -> Point3 {
        Point3::new(self * point.x, self * point.y, self * point.z)
    }
}

impl Neg for Point3 {
    type Output = Self;

    fn neg(self) -> Self {
        Point3::new(-self.x, -self.y, -self.z)
    }
}
