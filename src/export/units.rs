use super::error::Error;
use std::f64::consts::PI;

/// Native length unit (nm) to export length unit (Å).
pub const NM_TO_ANGSTROM: f64 = 10.0;

/// Vacuum permittivity in the native unit system, used to reduce charges.
pub const VACUUM_PERMITTIVITY: f64 = 2.39725e-4;

/// Reference quantities used to nondimensionalize exported values.
///
/// The default `(1, 1, 1)` leaves masses and charges untouched; lengths are
/// still converted from nm to Å.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceUnits {
    /// Reference distance in Å.
    pub distance: f64,
    /// Reference energy in kcal/mol.
    pub energy: f64,
    /// Reference mass in amu.
    pub mass: f64,
}

impl Default for ReferenceUnits {
    fn default() -> Self {
        Self {
            distance: 1.0,
            energy: 1.0,
            mass: 1.0,
        }
    }
}

impl ReferenceUnits {
    pub fn new(distance: f64, energy: f64, mass: f64) -> Self {
        Self {
            distance,
            energy,
            mass,
        }
    }

    /// Checks that every reference quantity is finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unit`] naming the first offending quantity.
    pub fn validate(&self) -> Result<(), Error> {
        for (quantity, value) in [
            ("ref_distance", self.distance),
            ("ref_energy", self.energy),
            ("ref_mass", self.mass),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::unit(quantity, value));
            }
        }
        Ok(())
    }

    /// Multiplier applied to native lengths.
    #[inline]
    pub fn length_scale(&self) -> f64 {
        NM_TO_ANGSTROM / self.distance
    }

    /// Divisor applied to native charges: `sqrt(4π·ε0·d·E)`.
    #[inline]
    pub fn charge_factor(&self) -> f64 {
        (4.0 * PI * VACUUM_PERMITTIVITY * self.distance * self.energy).sqrt()
    }

    #[inline]
    pub fn reduce_length(&self, value: f64) -> f64 {
        value * self.length_scale()
    }

    #[inline]
    pub fn reduce_mass(&self, value: f64) -> f64 {
        value / self.mass
    }

    #[inline]
    pub fn reduce_charge(&self, value: f64) -> f64 {
        value / self.charge_factor()
    }
}
