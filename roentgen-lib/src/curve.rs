use std::sync::OnceLock;

use crate::constants::EDGE_EPSILON_KEV;
use crate::error::{Result, RoentgenError};
use crate::interp::LogLogInterpolator;

/// Mass attenuation coefficient of one element or compound as a function
/// of photon energy.
///
/// The tabulated samples are held as given (after edge separation) and the
/// log-log interpolator over them is built on first evaluation. A curve
/// with different samples is a different curve: use
/// [`AttenuationCurve::from_table`] on a modified copy of [`table`](Self::table).
#[derive(Debug, Clone)]
pub struct AttenuationCurve {
    symbol: String,
    name: String,
    energies: Vec<f64>,
    coefficients: Vec<f64>,
    interpolator: OnceLock<LogLogInterpolator>,
}

impl AttenuationCurve {
    /// Build a curve from tabulated `(energy keV, μ/ρ cm²/g)` samples.
    ///
    /// Energies must be non-decreasing. A run of `k` equal energies (an
    /// absorption edge) is separated by moving the earlier samples down in
    /// steps of 1e-6 keV, so the last sample of the run keeps the tabulated
    /// energy and the edge stays sharp.
    pub fn from_table(
        symbol: impl Into<String>,
        name: impl Into<String>,
        energies: &[f64],
        coefficients: &[f64],
    ) -> Result<Self> {
        let symbol = symbol.into();
        if energies.len() != coefficients.len() {
            return Err(RoentgenError::DataError(format!(
                "'{symbol}': {} energies but {} coefficients",
                energies.len(),
                coefficients.len()
            )));
        }
        if energies.len() < 2 {
            return Err(RoentgenError::DataError(format!(
                "'{symbol}': at least two samples are required"
            )));
        }
        let positive = |v: &f64| v.is_finite() && *v > 0.0;
        if !energies.iter().all(positive) || !coefficients.iter().all(positive) {
            return Err(RoentgenError::DataError(format!(
                "'{symbol}': energies and coefficients must be positive and finite"
            )));
        }
        if energies.windows(2).any(|w| w[1] < w[0]) {
            return Err(RoentgenError::DataError(format!(
                "'{symbol}': energies must be non-decreasing"
            )));
        }

        let mut energies = energies.to_vec();
        let perturbed = separate_edges(&mut energies);
        if energies.windows(2).any(|w| w[1] <= w[0]) {
            return Err(RoentgenError::DataError(format!(
                "'{symbol}': edge energies closer than {EDGE_EPSILON_KEV} keV to a neighbour"
            )));
        }

        log::debug!(
            "built attenuation curve for {symbol}: {} samples, {perturbed} edge energies separated",
            energies.len()
        );

        Ok(AttenuationCurve {
            symbol,
            name: name.into(),
            energies,
            coefficients: coefficients.to_vec(),
            interpolator: OnceLock::new(),
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sample energies in keV, strictly increasing.
    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    /// Mass attenuation coefficients in cm²/g, one per energy.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// A copy of the samples as `(energy, coefficient)` pairs.
    pub fn table(&self) -> Vec<(f64, f64)> {
        self.energies
            .iter()
            .copied()
            .zip(self.coefficients.iter().copied())
            .collect()
    }

    /// Tabulated energy range `(min, max)` in keV.
    pub fn domain(&self) -> (f64, f64) {
        (self.energies[0], self.energies[self.energies.len() - 1])
    }

    fn interpolator(&self) -> &LogLogInterpolator {
        self.interpolator
            .get_or_init(|| LogLogInterpolator::new(&self.energies, &self.coefficients))
    }

    /// μ/ρ in cm²/g at `energy_kev`.
    ///
    /// Energies outside the tabulated range, and non-finite or non-positive
    /// energies, are rejected with [`RoentgenError::EnergyOutOfRange`].
    pub fn evaluate(&self, energy_kev: f64) -> Result<f64> {
        let interpolator = self.interpolator();
        if !(energy_kev.is_finite() && energy_kev > 0.0) || !interpolator.contains(energy_kev) {
            let (min, max) = interpolator.domain();
            return Err(RoentgenError::EnergyOutOfRange {
                energy: energy_kev,
                min,
                max,
            });
        }
        Ok(interpolator.evaluate(energy_kev))
    }

    pub fn evaluate_many(&self, energies_kev: &[f64]) -> Result<Vec<f64>> {
        energies_kev.iter().map(|&e| self.evaluate(e)).collect()
    }
}

/// Separate runs of equal energies in place. Returns how many samples moved.
fn separate_edges(energies: &mut [f64]) -> usize {
    let mut moved = 0;
    let mut start = 0;
    while start < energies.len() {
        let mut end = start + 1;
        while end < energies.len() && energies[end] == energies[start] {
            end += 1;
        }
        let run = end - start;
        for (offset, energy) in energies[start..end].iter_mut().enumerate() {
            *energy -= (run - 1 - offset) as f64 * EDGE_EPSILON_KEV;
        }
        moved += run - 1;
        start = end;
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separate_edges_pairs() {
        let mut e = vec![1.0, 7.112, 7.112, 8.0];
        assert_eq!(separate_edges(&mut e), 1);
        assert!((e[1] - (7.112 - 1e-6)).abs() < 1e-12);
        assert_eq!(e[2], 7.112);
    }

    #[test]
    fn test_separate_edges_triples() {
        let mut e = vec![1.0, 2.0, 2.0, 2.0, 3.0];
        assert_eq!(separate_edges(&mut e), 2);
        assert!(e.windows(2).all(|w| w[0] < w[1]));
        assert!((e[1] - (2.0 - 2e-6)).abs() < 1e-12);
        assert!((e[2] - (2.0 - 1e-6)).abs() < 1e-12);
        assert_eq!(e[3], 2.0);
    }

    #[test]
    fn test_edge_is_sharp() {
        let curve = AttenuationCurve::from_table(
            "X",
            "test",
            &[1.0, 2.0, 2.0, 4.0],
            &[1000.0, 125.0, 1000.0, 125.0],
        )
        .unwrap();
        let below = curve.evaluate(2.0 - 2e-6).unwrap();
        let above = curve.evaluate(2.0 + 1e-6).unwrap();
        assert!(below < 126.0);
        assert!(above > 999.0);
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert!(AttenuationCurve::from_table("X", "x", &[1.0], &[1.0]).is_err());
        assert!(AttenuationCurve::from_table("X", "x", &[1.0, 2.0], &[1.0]).is_err());
        assert!(AttenuationCurve::from_table("X", "x", &[2.0, 1.0], &[1.0, 1.0]).is_err());
        assert!(AttenuationCurve::from_table("X", "x", &[1.0, 2.0], &[0.0, 1.0]).is_err());
    }

    #[test]
    fn test_out_of_range() {
        let curve =
            AttenuationCurve::from_table("X", "x", &[1.0, 10.0], &[100.0, 1.0]).unwrap();
        for bad in [0.5, 11.0, 0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    curve.evaluate(bad),
                    Err(RoentgenError::EnergyOutOfRange { .. })
                ),
                "{bad} accepted"
            );
        }
        assert!((curve.evaluate(1.0).unwrap() - 100.0).abs() < 1e-9);
        assert!((curve.evaluate(10.0).unwrap() - 1.0).abs() < 1e-12);
    }
}
