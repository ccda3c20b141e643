use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Standard atomic weights (g/mol) of the analytes commonly measured in shale leachates
const STANDARD_MOLAR_MASSES: &[(&str, f64)] = &[
    ("Li", 6.94),
    ("B", 10.81),
    ("Na", 22.990),
    ("Mg", 24.305),
    ("Al", 26.982),
    ("Si", 28.085),
    ("P", 30.974),
    ("S", 32.06),
    ("Cl", 35.45),
    ("K", 39.098),
    ("Ca", 40.078),
    ("Ti", 47.867),
    ("V", 50.942),
    ("Cr", 51.996),
    ("Mn", 54.938),
    ("Fe", 55.845),
    ("Co", 58.933),
    ("Ni", 58.693),
    ("Cu", 63.546),
    ("Zn", 65.38),
    ("As", 74.922),
    ("Se", 78.971),
    ("Rb", 85.468),
    ("Sr", 87.62),
    ("Mo", 95.95),
    ("Cd", 112.41),
    ("Sb", 121.76),
    ("Cs", 132.91),
    ("Ba", 137.33),
    ("Pb", 207.2),
    ("Th", 232.04),
    ("U", 238.03),
];

/// Lookup of molar mass (g/mol) by element symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MolarMassTable {
    masses: BTreeMap<String, f64>,
}

impl Default for MolarMassTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl MolarMassTable {
    /// Table with the standard atomic weights
    pub fn standard() -> Self {
        Self {
            masses: STANDARD_MOLAR_MASSES
                .iter()
                .map(|(symbol, mass)| (symbol.to_string(), *mass))
                .collect(),
        }
    }

    /// Table with no entries; every element passes through unconverted
    pub fn empty() -> Self {
        Self {
            masses: BTreeMap::new(),
        }
    }

    /// Add or override one entry
    pub fn with_mass(mut self, symbol: impl Into<String>, mass: f64) -> Self {
        self.insert(symbol, mass);
        self
    }

    /// Add or override one entry in place
    pub fn insert(&mut self, symbol: impl Into<String>, mass: f64) {
        self.masses.insert(symbol.into(), mass);
    }

    /// Molar mass of an element, if known
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.masses.get(symbol).copied()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// True when the table has no entries
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }
}
