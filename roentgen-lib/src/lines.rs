use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::error::{Result, RoentgenError};

/// A characteristic x-ray emission line.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionLine {
    pub element: String,
    /// Siegbahn label (Ka1, Kb1, La1, ...).
    pub line: String,
    /// keV
    pub energy: f64,
    /// Relative to the strongest line of the same series (100).
    pub intensity: f64,
}

/// An absorption edge (inner-shell binding energy).
#[derive(Debug, Clone, PartialEq)]
pub struct AbsorptionEdge {
    pub element: String,
    /// IUPAC label (K, L1, L2, L3, M1, ...).
    pub edge: String,
    /// keV
    pub energy: f64,
}

const DEFAULT_GUESS_EDGES: [&str; 5] = ["K", "L3", "L2", "L1", "M5"];

impl Catalog {
    /// Emission lines with `low_kev < energy < high_kev`, sorted by energy.
    ///
    /// With `element` set, only that element's lines are returned.
    pub fn emission_lines(
        &self,
        low_kev: f64,
        high_kev: f64,
        element: Option<&str>,
    ) -> Result<Vec<EmissionLine>> {
        let symbol = element.map(|e| self.periodic_symbol(e)).transpose()?;
        let mut lines: Vec<EmissionLine> = self
            .reference_data()
            .emission_lines
            .iter()
            .filter(|l| symbol.is_none_or(|s| l.element == s))
            .filter(|l| l.energy > low_kev && l.energy < high_kev)
            .map(|l| EmissionLine {
                element: l.element.clone(),
                line: l.line.clone(),
                energy: l.energy,
                intensity: l.intensity,
            })
            .collect();
        lines.sort_by(|a, b| a.energy.total_cmp(&b.energy));
        Ok(lines)
    }

    /// All tabulated absorption edges of an element, keyed by edge label.
    pub fn absorption_edges(&self, element: &str) -> Result<HashMap<String, AbsorptionEdge>> {
        let sym = self.periodic_symbol(element)?;
        Ok(self
            .reference_data()
            .edges
            .iter()
            .filter(|e| e.element == sym)
            .map(|e| {
                (
                    e.edge.clone(),
                    AbsorptionEdge {
                        element: e.element.clone(),
                        edge: e.edge.clone(),
                        energy: e.energy,
                    },
                )
            })
            .collect())
    }

    pub fn absorption_edge(&self, element: &str, edge: &str) -> Result<AbsorptionEdge> {
        let sym = self.periodic_symbol(element)?;
        self.reference_data()
            .edges
            .iter()
            .find(|e| e.element == sym && e.edge.eq_ignore_ascii_case(edge))
            .map(|e| AbsorptionEdge {
                element: e.element.clone(),
                edge: e.edge.clone(),
                energy: e.energy,
            })
            .ok_or_else(|| RoentgenError::UnknownEdge {
                element: element.to_string(),
                edge: edge.to_string(),
            })
    }

    /// The absorption edge closest in energy to `energy_kev`.
    ///
    /// Only the edges named in `edges` are considered, by default K, L3, L2,
    /// L1 and M5.
    pub fn guess_edge(&self, energy_kev: f64, edges: Option<&[&str]>) -> Option<AbsorptionEdge> {
        let edge_filter = edges.unwrap_or(&DEFAULT_GUESS_EDGES);
        self.reference_data()
            .edges
            .iter()
            .filter(|e| e.energy > 0.0 && edge_filter.contains(&e.edge.as_str()))
            .min_by(|a, b| {
                (a.energy - energy_kev)
                    .abs()
                    .total_cmp(&(b.energy - energy_kev).abs())
            })
            .map(|e| AbsorptionEdge {
                element: e.element.clone(),
                edge: e.edge.clone(),
                energy: e.energy,
            })
    }
}
