use std::fmt;

use crate::error::{CalcError, Result};

/// Speed of light in vacuum (m/s)
pub const C: f64 = 299_792_458.0;

/// Largest `f64` below 1.
const BELOW_LIGHT: f64 = 1.0 - f64::EPSILON / 2.0;

/// Speed as a fraction of the speed of light, always in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct VelocityFraction(f64);

impl VelocityFraction {
    pub const REST: VelocityFraction = VelocityFraction(0.0);

    pub fn new(v: f64) -> Result<Self> {
        if v.is_nan() {
            return Err(CalcError::InvalidInput {
                value: v,
                reason: "velocity is not a number",
            });
        }
        if v < 0.0 {
            return Err(CalcError::InvalidInput {
                value: v,
                reason: "velocity must not be negative",
            });
        }
        if v >= 1.0 {
            return Err(CalcError::InvalidInput {
                value: v,
                reason: "velocity must be below the speed of light",
            });
        }
        Ok(Self(v))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for VelocityFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}c", self.0)
    }
}

/// Rest mass and speed of light used for the energy terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalParams {
    rest_mass_kg: f64,
    speed_of_light: f64,
}

impl PhysicalParams {
    pub fn new(rest_mass_kg: f64, speed_of_light: f64) -> Result<Self> {
        if !rest_mass_kg.is_finite() || rest_mass_kg < 0.0 {
            return Err(CalcError::InvalidInput {
                value: rest_mass_kg,
                reason: "rest mass must be finite and not negative",
            });
        }
        if !speed_of_light.is_finite() || speed_of_light <= 0.0 {
            return Err(CalcError::InvalidInput {
                value: speed_of_light,
                reason: "speed of light must be finite and positive",
            });
        }
        if !(rest_mass_kg * speed_of_light * speed_of_light).is_finite() {
            return Err(CalcError::InvalidInput {
                value: rest_mass_kg,
                reason: "rest energy overflows",
            });
        }
        Ok(Self {
            rest_mass_kg,
            speed_of_light,
        })
    }

    pub fn rest_mass_kg(&self) -> f64 {
        self.rest_mass_kg
    }

    pub fn speed_of_light(&self) -> f64 {
        self.speed_of_light
    }

    /// E0 = m c^2
    pub fn rest_energy(&self) -> f64 {
        self.rest_mass_kg * self.speed_of_light * self.speed_of_light
    }
}

impl Default for PhysicalParams {
    fn default() -> Self {
        Self {
            rest_mass_kg: 1.0,
            speed_of_light: C,
        }
    }
}

/// Lorentz factor γ = 1 / sqrt(1 - v^2), with v as a fraction of c
pub fn lorentz_factor(v: VelocityFraction) -> f64 {
    1.0 / (1.0 - v.0 * v.0).sqrt()
}

/// Time dilation: t = γ t0
pub fn time_dilation(proper_time: f64, v: VelocityFraction) -> f64 {
    proper_time * lorentz_factor(v)
}

/// Length contraction: L = L0 / γ
pub fn length_contraction(proper_length: f64, v: VelocityFraction) -> f64 {
    let gamma = lorentz_factor(v);
    proper_length / gamma
}

/// Relativistic velocity addition: w = (u + v) / (1 + uv)
///
/// The exact sum is below 1; rounding near c is clamped back under it.
pub fn add_velocities(u: VelocityFraction, v: VelocityFraction) -> VelocityFraction {
    VelocityFraction(((u.0 + v.0) / (1.0 + u.0 * v.0)).min(BELOW_LIGHT))
}

/// Everything derived from one velocity and one set of parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedQuantities {
    pub velocity: VelocityFraction,
    pub rest_mass_kg: f64,
    pub gamma: f64,
    pub time_dilation_factor: f64,
    pub length_contraction_factor: f64,
    pub relativistic_mass_factor: f64,
    pub rest_energy: f64,
    pub total_energy: f64,
    pub kinetic_energy: f64,
}

impl DerivedQuantities {
    pub fn new(velocity: VelocityFraction, params: &PhysicalParams) -> Self {
        let gamma = lorentz_factor(velocity);
        let rest_energy = params.rest_energy();
        let total_energy = gamma * rest_energy;

        Self {
            velocity,
            rest_mass_kg: params.rest_mass_kg(),
            gamma,
            time_dilation_factor: gamma,
            length_contraction_factor: 1.0 / gamma,
            relativistic_mass_factor: gamma,
            rest_energy,
            total_energy,
            kinetic_energy: total_energy - rest_energy,
        }
    }
}

/// Validates `v` and computes the derived quantities for it.
pub fn calculate(v: f64, params: &PhysicalParams) -> Result<DerivedQuantities> {
    let velocity = VelocityFraction::new(v)?;
    Ok(DerivedQuantities::new(velocity, params))
}

impl fmt::Display for DerivedQuantities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "For velocity = {}:", self.velocity)?;
        writeln!(f, "Lorentz factor (γ) = {:.3}", self.gamma)?;
        writeln!(
            f,
            "Time dilation: time runs {:.2}x slower",
            self.time_dilation_factor
        )?;
        writeln!(
            f,
            "Length contraction: length is {:.3}x the rest length",
            self.length_contraction_factor
        )?;
        writeln!(
            f,
            "Relativistic mass increase: {:.2}x rest mass",
            self.relativistic_mass_factor
        )?;
        writeln!(f)?;
        writeln!(f, "For a {} kg object:", self.rest_mass_kg)?;
        writeln!(f, "Rest energy: {:.2e} J", self.rest_energy)?;
        writeln!(f, "Total energy: {:.2e} J", self.total_energy)?;
        write!(f, "Kinetic energy: {:.2e} J", self.kinetic_energy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64) -> VelocityFraction {
        VelocityFraction::new(x).unwrap()
    }

    #[test]
    fn gamma_is_one_at_rest() {
        assert_eq!(lorentz_factor(VelocityFraction::REST), 1.0);
    }

    #[test]
    fn gamma_grows_with_velocity() {
        let mut last = lorentz_factor(VelocityFraction::REST);
        for i in 1..1000 {
            let gamma = lorentz_factor(v(i as f64 / 1000.0));
            assert!(gamma > last, "gamma not increasing at {i}");
            last = gamma;
        }
        assert!(lorentz_factor(v(0.999_999_9)) > 2000.0);
    }

    #[test]
    fn contraction_and_dilation_use_gamma() {
        let velocity = v(0.6);
        assert!((lorentz_factor(velocity) - 1.25).abs() < 1e-12);
        assert!((time_dilation(10.0, velocity) - 12.5).abs() < 1e-9);
        assert!((length_contraction(100.0, velocity) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn velocity_addition_stays_below_light() {
        let w = add_velocities(v(0.8), v(0.8));
        assert!((w.get() - 1.6 / 1.64).abs() < 1e-12);
        assert_eq!(add_velocities(VelocityFraction::REST, v(0.3)).get(), 0.3);

        let near = add_velocities(v(0.999_999), v(0.999_999));
        assert!(near.get() < 1.0);
    }

    #[test]
    fn velocity_addition_rounding_never_reaches_light() {
        let fastest = v(0.999_999_999_999_999_9);
        let w = add_velocities(v(0.999_999_99), fastest);
        assert!(w.get() < 1.0);
        assert!(VelocityFraction::new(w.get()).is_ok());
        assert!(lorentz_factor(w).is_finite());

        let w = add_velocities(fastest, fastest);
        assert!(w.get() < 1.0);
        assert!(lorentz_factor(w).is_finite());
    }

    #[test]
    fn rejects_out_of_range() {
        for bad in [1.0, 1.5, -0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                VelocityFraction::new(bad),
                Err(CalcError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn rejects_bad_params() {
        assert!(PhysicalParams::new(-1.0, C).is_err());
        assert!(PhysicalParams::new(1.0, 0.0).is_err());
        assert!(PhysicalParams::new(f64::NAN, C).is_err());
        assert!(PhysicalParams::new(0.0, C).is_ok());
    }

    #[test]
    fn rejects_params_whose_rest_energy_overflows() {
        assert!(matches!(
            PhysicalParams::new(1e300, C),
            Err(CalcError::InvalidInput { .. })
        ));
        assert!(PhysicalParams::new(1.0, 1e200).is_err());

        let params = PhysicalParams::new(1e280, C).unwrap();
        let derived = calculate(0.5, &params).unwrap();
        assert!(derived.rest_energy.is_finite());
        assert!(derived.kinetic_energy.is_finite());
    }

    #[test]
    fn report_lists_every_quantity() {
        let report = calculate(0.8, &PhysicalParams::default())
            .unwrap()
            .to_string();
        assert!(report.contains("For velocity = 0.800c:"));
        assert!(report.contains("Lorentz factor (γ) = 1.667"));
        assert!(report.contains("time runs 1.67x slower"));
        assert!(report.contains("length is 0.600x"));
        assert!(report.contains("Rest energy: 8.99e16 J"));
        assert!(report.contains("Kinetic energy: 5.99e16 J"));
    }

    #[test]
    fn velocity_close_to_light_is_not_shown_as_light() {
        assert_eq!(v(0.999).to_string(), "0.999c");
    }
}
