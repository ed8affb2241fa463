//! TOML typing rules and their evaluation against a bond graph.

use super::error::Error;
use super::graph::MolecularGraph;
use crate::model::element::Element;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

const OPLSAA_TOML: &str = include_str!("../../resources/oplsaa.toml");

static OPLSAA: OnceLock<RuleSet> = OnceLock::new();

/// A named force field: atom-type rules listed in priority order.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSet {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rules: Vec<AtomRule>,
}

/// One atom type and the local environment it applies to.
#[derive(Debug, Clone, Deserialize)]
pub struct AtomRule {
    /// Type name assigned on a match, e.g. `opls_135`.
    pub name: String,
    /// Element symbol the particle must resolve to.
    pub element: String,
    /// Exact number of bonded neighbours.
    #[serde(default)]
    pub degree: Option<usize>,
    /// Exact neighbour count for each listed element symbol.
    #[serde(default)]
    pub neighbors: BTreeMap<String, usize>,
    /// Required degree of every bonded neighbour.
    #[serde(default)]
    pub neighbor_degree: Option<usize>,
    /// Partial charge assigned with the type.
    #[serde(default)]
    pub charge: Option<f64>,
    #[serde(default)]
    pub description: String,
}

impl RuleSet {
    /// Parses and validates a rule set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RuleParse`] for malformed TOML and
    /// [`Error::InvalidRule`] when a rule names an unknown element.
    pub fn from_toml(toml: &str) -> Result<Self, Error> {
        let rule_set: RuleSet = toml::from_str(toml)?;
        rule_set.validate()?;
        Ok(rule_set)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_rule("<rule set>", "force field name is empty"));
        }
        for rule in &self.rules {
            rule.element
                .parse::<Element>()
                .map_err(|e| Error::invalid_rule(&rule.name, e.to_string()))?;
            for symbol in rule.neighbors.keys() {
                symbol
                    .parse::<Element>()
                    .map_err(|e| Error::invalid_rule(&rule.name, e.to_string()))?;
            }
        }
        Ok(())
    }

    /// The first rule matching particle `idx`, if any.
    pub fn match_particle(&self, graph: &MolecularGraph, idx: usize) -> Option<&AtomRule> {
        self.rules.iter().find(|rule| rule.matches(graph, idx))
    }

    /// Distinct type names in rule order.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !names.contains(&rule.name.as_str()) {
                names.push(&rule.name);
            }
        }
        names
    }
}

impl AtomRule {
    pub fn matches(&self, graph: &MolecularGraph, idx: usize) -> bool {
        if graph.elements[idx].symbol() != self.element {
            return false;
        }
        if self.degree.is_some_and(|d| graph.degree(idx) != d) {
            return false;
        }
        if let Some(required) = self.neighbor_degree {
            if graph.neighbors[idx].iter().any(|&n| graph.degree(n) != required) {
                return false;
            }
        }
        self.neighbors.iter().all(|(symbol, &count)| {
            symbol
                .parse::<Element>()
                .is_ok_and(|element| graph.neighbor_count(idx, element) == count)
        })
    }
}

/// The embedded OPLS-AA subset.
pub fn builtin_oplsaa() -> &'static RuleSet {
    OPLSAA.get_or_init(|| {
        RuleSet::from_toml(OPLSAA_TOML)
            .expect("Failed to parse embedded OPLS-AA rules. This is a library bug.")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::compound::Compound;
    use crate::model::particle::Particle;

    fn ethanol() -> Compound {
        let mut c = Compound::new("ethanol");
        let c1 = c.add_particle(Particle::from_element(Element::C, [0.0; 3]));
        let c2 = c.add_particle(Particle::from_element(Element::C, [0.15, 0.0, 0.0]));
        let o = c.add_particle(Particle::from_element(Element::O, [0.2, 0.13, 0.0]));
        let ho = c.add_particle(Particle::from_element(Element::H, [0.29, 0.13, 0.0]));
        c.add_bond(c1, c2);
        c.add_bond(c2, o);
        c.add_bond(o, ho);
        for k in 0..3 {
            let h = c.add_particle(Particle::from_element(Element::H, [-0.1, 0.01 * k as f64, 0.0]));
            c.add_bond(c1, h);
        }
        for k in 0..2 {
            let h = c.add_particle(Particle::from_element(Element::H, [0.15, -0.1, 0.01 * k as f64]));
            c.add_bond(c2, h);
        }
        c
    }

    fn types_of(rule_set: &RuleSet, compound: &Compound) -> Vec<String> {
        let graph = MolecularGraph::from_compound(compound).unwrap();
        (0..graph.elements.len())
            .map(|idx| rule_set.match_particle(&graph, idx).unwrap().name.clone())
            .collect()
    }

    #[test]
    fn builtin_rules_load_common_types() {
        let ff = builtin_oplsaa();
        assert_eq!(ff.name, "oplsaa");
        let names = ff.type_names();
        for t in ["opls_135", "opls_140", "opls_145", "opls_146", "opls_154", "opls_155"] {
            assert!(names.contains(&t), "missing {t}");
        }
    }

    #[test]
    fn builtin_rules_type_ethanol() {
        let types = types_of(builtin_oplsaa(), &ethanol());
        assert_eq!(
            types,
            vec![
                "opls_135", "opls_157", "opls_154", "opls_155", "opls_140", "opls_140",
                "opls_140", "opls_140", "opls_140"
            ]
        );
    }

    #[test]
    fn first_matching_rule_wins() {
        let specific_first = r#"
            name = "layered"

            [[rules]]
            name = "specific"
            element = "C"
            neighbors = { O = 1 }

            [[rules]]
            name = "generic"
            element = "C"
        "#;
        let ff = RuleSet::from_toml(specific_first).unwrap();
        let graph = MolecularGraph::from_compound(&ethanol()).unwrap();
        assert_eq!(ff.match_particle(&graph, 1).unwrap().name, "specific");
        assert_eq!(ff.match_particle(&graph, 0).unwrap().name, "generic");
        assert!(ff.match_particle(&graph, 2).is_none());

        let mut generic_first = ff.clone();
        generic_first.rules.reverse();
        assert_eq!(generic_first.match_particle(&graph, 1).unwrap().name, "generic");
    }

    #[test]
    fn neighbor_degree_constrains_every_neighbor() {
        let custom = r#"
            name = "degree"

            [[rules]]
            name = "h_on_sp3"
            element = "H"
            neighbor_degree = 4
        "#;
        let ff = RuleSet::from_toml(custom).unwrap();
        let graph = MolecularGraph::from_compound(&ethanol()).unwrap();
        assert!(ff.match_particle(&graph, 4).is_some());
        assert!(ff.match_particle(&graph, 3).is_none());
    }

    #[test]
    fn errors_on_invalid_toml() {
        let result = RuleSet::from_toml("not valid [[[toml");
        assert!(matches!(result, Err(Error::RuleParse(_))));
    }

    #[test]
    fn errors_on_unknown_rule_element() {
        let custom = r#"
            name = "bad"

            [[rules]]
            name = "xx"
            element = "Qq"
        "#;
        let err = RuleSet::from_toml(custom).unwrap_err();
        assert!(matches!(err, Error::InvalidRule { ref rule, .. } if rule == "xx"));
    }

    #[test]
    fn errors_on_unknown_neighbor_element() {
        let custom = r#"
            name = "bad"

            [[rules]]
            name = "yy"
            element = "C"
            neighbors = { Zz = 1 }
        "#;
        assert!(matches!(
            RuleSet::from_toml(custom),
            Err(Error::InvalidRule { .. })
        ));
    }
}
