use uom::si::f64::{Length, Mass};

use crate::elements::construction::{ConstructionElement, InertiaMoments};
use crate::errors::MassPropsError;
use crate::utils::point3::Point3;

// A mass concentrated in a single point. Always final.
#[derive(Debug, Clone, Copy)]
pub struct PointMass {
    element: ConstructionElement,
}

impl PointMass {
    pub fn new(x: Length, y: Length, z: Length, mass: Mass) -> Result<Self, MassPropsError> {
        if mass.value <= 0.0 {
            return Err(MassPropsError::MassError(
                "point mass must be positive".to_string(),
            ));
        }

        let (xm, ym, zm) = (x.value, y.value, z.value);
        let m = mass.value;
        // MoI about each axis: mass times the squared distance to that axis.
        let moi = InertiaMoments::from_si(
            m * (ym * ym + zm * zm),
            m * (xm * xm + zm * zm),
            m * (xm * xm + ym * ym),
        );

        Ok(PointMass {
            element: ConstructionElement::new(Point3::new(x, y, z), mass, moi, true),
        })
    }

    pub fn element(&self) -> &ConstructionElement {
        &self.element
    }

    pub fn into_element(self) -> ConstructionElement {
        self.element
    }
}
