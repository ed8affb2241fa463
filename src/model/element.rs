use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(String);

/// Chemical elements commonly found in coarse and all-atom organic models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Element {
    H = 1,
    He = 2,
    Li = 3,
    Be = 4,
    B = 5,
    C = 6,
    N = 7,
    O = 8,
    F = 9,
    Ne = 10,
    Na = 11,
    Mg = 12,
    Al = 13,
    Si = 14,
    P = 15,
    S = 16,
    Cl = 17,
    Ar = 18,
    K = 19,
    Ca = 20,
    Fe = 26,
    Cu = 29,
    Zn = 30,
    Se = 34,
    Br = 35,
    I = 53,
}

const TABLE: [(Element, &str, f64); 26] = [
    (Element::H, "H", 1.008),
    (Element::He, "He", 4.0026),
    (Element::Li, "Li", 6.94),
    (Element::Be, "Be", 9.0122),
    (Element::B, "B", 10.81),
    (Element::C, "C", 12.011),
    (Element::N, "N", 14.007),
    (Element::O, "O", 15.999),
    (Element::F, "F", 18.998),
    (Element::Ne, "Ne", 20.18),
    (Element::Na, "Na", 22.99),
    (Element::Mg, "Mg", 24.305),
    (Element::Al, "Al", 26.982),
    (Element::Si, "Si", 28.085),
    (Element::P, "P", 30.974),
    (Element::S, "S", 32.06),
    (Element::Cl, "Cl", 35.45),
    (Element::Ar, "Ar", 39.948),
    (Element::K, "K", 39.098),
    (Element::Ca, "Ca", 40.078),
    (Element::Fe, "Fe", 55.845),
    (Element::Cu, "Cu", 63.546),
    (Element::Zn, "Zn", 65.38),
    (Element::Se, "Se", 78.971),
    (Element::Br, "Br", 79.904),
    (Element::I, "I", 126.9),
];

impl Element {
    pub fn atomic_number(&self) -> u8 {
        *self as u8
    }

    pub fn symbol(&self) -> &'static str {
        self.entry().1
    }

    /// Standard atomic weight in amu.
    pub fn atomic_mass(&self) -> f64 {
        self.entry().2
    }

    fn entry(&self) -> &'static (Element, &'static str, f64) {
        TABLE
            .iter()
            .find(|(e, _, _)| e == self)
            .unwrap_or(&TABLE[0])
    }

    /// Resolves a particle label such as `"C"`, `"c"`, `"CL"`, `"H12"` or a
    /// SYBYL type like `"C.ar"` to an element.
    ///
    /// Trailing digits and anything after a `.` are ignored. Two-letter
    /// symbols are preferred over their one-letter prefix.
    pub fn from_label(label: &str) -> Option<Element> {
        let head = label.split('.').next().unwrap_or("").trim();
        let letters: String = head
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();
        if letters.is_empty() {
            return None;
        }

        if letters.len() >= 2 {
            if let Ok(e) = capitalize(&letters[..2]).parse::<Element>() {
                return Some(e);
            }
        }
        capitalize(&letters[..1]).parse::<Element>().ok()
    }
}

fn capitalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.chars().enumerate() {
        if i == 0 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TABLE
            .iter()
            .find(|(_, symbol, _)| *symbol == s)
            .map(|(e, _, _)| *e)
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}
