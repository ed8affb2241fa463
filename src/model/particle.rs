use super::element::Element;

/// A single point particle of a [`Compound`](super::compound::Compound).
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Element or type label. Untyped exports use it as the particle type.
    pub name: String,
    /// Cartesian coordinates in nanometres.
    pub position: [f64; 3],
    /// Mass in amu.
    pub mass: f64,
    /// Partial charge in elementary charges.
    pub charge: f64,
    /// Rigid body this particle belongs to, if any.
    pub rigid_id: Option<usize>,
}

impl Particle {
    pub fn new(name: impl Into<String>, position: [f64; 3], mass: f64) -> Self {
        Self {
            name: name.into(),
            position,
            mass,
            charge: 0.0,
            rigid_id: None,
        }
    }

    /// Creates a particle named after `element` carrying its standard atomic mass.
    pub fn from_element(element: Element, position: [f64; 3]) -> Self {
        Self::new(element.symbol(), position, element.atomic_mass())
    }

    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = charge;
        self
    }

    pub fn with_rigid_id(mut self, rigid_id: usize) -> Self {
        self.rigid_id = Some(rigid_id);
        self
    }

    #[inline]
    pub fn is_rigid(&self) -> bool {
        self.rigid_id.is_some()
    }

    /// Element resolved from the particle name.
    pub fn element(&self) -> Option<Element> {
        Element::from_label(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_element_uses_symbol_and_mass() {
        let p = Particle::from_element(Element::C, [0.1, 0.2, 0.3]);
        assert_eq!(p.name, "C");
        assert_eq!(p.mass, 12.011);
        assert_eq!(p.charge, 0.0);
        assert!(!p.is_rigid());
        assert_eq!(p.element(), Some(Element::C));
    }

    #[test]
    fn builders_set_charge_and_body() {
        let p = Particle::new("X", [0.0; 3], 1.0)
            .with_charge(-0.5)
            .with_rigid_id(3);
        assert_eq!(p.charge, -0.5);
        assert_eq!(p.rigid_id, Some(3));
        assert!(p.is_rigid());
        assert_eq!(p.element(), None);
    }
}
