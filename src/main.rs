use mass_props::*;
use uom::si::f64::{Length, Mass, MassDensity};
use uom::si::length::meter;
use uom::si::mass::kilogram;
use uom::si::mass_density::kilogram_per_cubic_meter;

fn m(v: f64) -> Length {
    Length::new::<meter>(v)
}

fn kg(v: f64) -> Mass {
    Mass::new::<kilogram>(v)
}

fn rho(v: f64) -> MassDensity {
    MassDensity::new::<kilogram_per_cubic_meter>(v)
}

// A simplified kerosene/LOX stage: two cylindrical tanks with spherical
// bulkheads, an engine as a point mass. Shell masses are pro-rated to the
// known dry mass, then the propellant load is drained step by step and the
// aggregate mass properties printed.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let lox = rho(LOX_DENSITY);
    let rg1 = rho(RG1_DENSITY);
    let dry = rho(0.0);

    let d = m(2.6); // stage diameter

    // Oxidiser tank, nose side. Bulkheads carry no propellant of their own
    // here; the cylindrical walls hold the full load.
    let oxid_top = SphericalSegment::along_x(false, m(2.0), d, m(0.9), dry, None)?;
    let oxid_wall = TruncatedCone::cylinder(m(2.0), d, m(7.0), lox, None)?;
    let oxid_bottom = SphericalSegment::along_x(true, m(9.0), d, m(0.9), dry, None)?;

    // Fuel tank below it, past the intertank gap.
    let fuel_top = SphericalSegment::along_x(false, m(10.5), d, m(0.9), dry, None)?;
    let fuel_wall = TruncatedCone::cylinder(m(10.5), d, m(4.5), rg1, None)?;
    let fuel_bottom = SphericalSegment::along_x(true, m(15.0), d, m(0.9), dry, None)?;

    // Tail section and engine.
    let tail = TruncatedCone::along_x(m(16.0), d, m(3.0), m(1.6), dry, None)?;
    let engine = PointMass::new(m(17.2), m(0.0), m(0.0), kg(1250.0))?;

    // All shells share the same skin density; fix their absolute masses
    // against the known structural dry mass.
    let shells = [
        oxid_top.element(),
        oxid_wall.element(),
        oxid_bottom.element(),
        fuel_top.element(),
        fuel_wall.element(),
        fuel_bottom.element(),
        tail.element(),
    ];
    let structure_mass = kg(4750.0);
    let scale = ConstructionElement::mass_scale(shells, structure_mass)?;

    let mut stage_dry = ConstructionElement::zero();
    for shell in shells {
        stage_dry += shell.pro_rate_mass(scale)?;
    }
    stage_dry += engine.into_element();

    let lox_cap = oxid_wall.prop_mass_cap();
    let rg1_cap = fuel_wall.prop_mass_cap();
    println!(
        "Stage dry mass {:8.1} kg | LOX capacity {:8.1} kg | RG-1 capacity {:8.1} kg",
        stage_dry.mass().value,
        lox_cap.value,
        rg1_cap.value
    );
    println!("{:-<78}", "");

    // Drain both tanks linearly over the burn.
    const BURN_TIME: f64 = 120.0; // s
    const TIME_STEP: f64 = 10.0; // s

    let mut elapsed_time = 0.0;
    while elapsed_time <= BURN_TIME {
        let remaining = 1.0 - elapsed_time / BURN_TIME;
        let (lox_load, lox_level) = oxid_wall.propellant_element(lox_cap * remaining)?;
        let (rg1_load, rg1_level) = fuel_wall.propellant_element(rg1_cap * remaining)?;

        let total = stage_dry + lox_load + rg1_load;
        println!(
            "t={:5.0} s | mass {:8.1} kg | CoM x {:6.3} m | MoI [{:10.3e} {:10.3e} {:10.3e}] kg·m² | levels {:5.2}/{:5.2} m",
            elapsed_time,
            total.mass().value,
            total.com().x.value,
            total.moi().x.value,
            total.moi().y.value,
            total.moi().z.value,
            lox_level.value,
            rg1_level.value,
        );

        elapsed_time += TIME_STEP;
    }

    Ok(())
}
