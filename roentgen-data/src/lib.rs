#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// All roentgen reference tables, as parsed from a data directory or
/// deserialized from a catalog snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceData {
    pub elements: Vec<ElementRecord>,
    pub compounds: Vec<CompoundRecord>,
    pub attenuation: Vec<AttenuationRecord>,
    pub edges: Vec<EdgeRecord>,
    pub emission_lines: Vec<EmissionLineRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub atomic_number: u16,
    pub symbol: String,
    pub name: String,
    /// Atomic mass in u.
    pub atomic_mass: f64,
    /// Reference density in g/cm³.
    pub density: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundRecord {
    pub symbol: String,
    pub name: String,
    /// Reference density in g/cm³.
    pub density: f64,
}

/// Tabulated mass attenuation coefficients for one element or compound.
///
/// `material` is the canonical catalog symbol. Energies are in keV and are
/// stored exactly as tabulated, so absorption edges show up as repeated
/// energies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttenuationRecord {
    pub material: String,
    pub energy: Vec<f64>,
    /// Mass attenuation coefficient in cm²/g.
    pub mu_over_rho: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub element: String,
    pub edge: String,
    /// Binding energy in keV.
    pub energy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionLineRecord {
    pub element: String,
    pub line: String,
    /// Line energy in keV.
    pub energy: f64,
    /// Intensity relative to the strongest line of the series (100).
    pub intensity: f64,
}
