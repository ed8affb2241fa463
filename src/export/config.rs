use super::units::ReferenceUnits;
use crate::model::simbox::SimBox;

/// Options controlling a single export.
#[derive(Debug, Clone, Default)]
pub struct ExportConfig {
    /// Force field to apply before exporting. `None` exports untyped particles.
    pub forcefield: Option<String>,
    /// Reference quantities used to reduce lengths, masses and charges.
    pub units: ReferenceUnits,
    /// Box to export instead of the compound's own.
    pub simbox: Option<SimBox>,
    /// Translate positions by `-(a + b + c) / 2`, mapping a box spanning
    /// `[0, L)` onto `[-L/2, L/2)`.
    pub shift_coords: bool,
}

impl ExportConfig {
    pub fn with_forcefield(mut self, name: impl Into<String>) -> Self {
        self.forcefield = Some(name.into());
        self
    }

    pub fn with_units(mut self, units: ReferenceUnits) -> Self {
        self.units = units;
        self
    }

    pub fn with_simbox(mut self, simbox: SimBox) -> Self {
        self.simbox = Some(simbox);
        self
    }

    pub fn with_shift_coords(mut self, shift: bool) -> Self {
        self.shift_coords = shift;
        self
    }
}
