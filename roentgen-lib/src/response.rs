use crate::error::Result;
use crate::material::{Material, map_energies};
use crate::stack::OpticalPath;

/// The absorbing element at the end of an optical path.
#[derive(Debug, Clone)]
pub enum Detector {
    /// Detects the photons it absorbs.
    Material(Material),
    /// Detects every photon that reaches it.
    Ideal,
}

impl Detector {
    pub fn absorption(&self, energy_kev: f64) -> Result<f64> {
        match self {
            Detector::Material(m) => m.absorption(energy_kev),
            Detector::Ideal => Ok(1.0),
        }
    }

    pub fn absorption_many(&self, energies_kev: &[f64]) -> Result<Vec<f64>> {
        map_energies(energies_kev, |e| self.absorption(e))
    }

    pub fn name(&self) -> &str {
        match self {
            Detector::Material(m) => m.name(),
            Detector::Ideal => "ideal detector",
        }
    }
}

impl From<Material> for Detector {
    fn from(m: Material) -> Self {
        Detector::Material(m)
    }
}

/// Fraction of incident photons detected: transmission through the
/// optical path times absorption in the detector.
#[derive(Debug, Clone)]
pub struct Response {
    optical_path: OpticalPath,
    detector: Detector,
}

impl Response {
    pub fn new(optical_path: impl Into<OpticalPath>, detector: impl Into<Detector>) -> Self {
        Response {
            optical_path: optical_path.into(),
            detector: detector.into(),
        }
    }

    pub fn optical_path(&self) -> &OpticalPath {
        &self.optical_path
    }

    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    pub fn response(&self, energy_kev: f64) -> Result<f64> {
        Ok(self.optical_path.transmission(energy_kev)? * self.detector.absorption(energy_kev)?)
    }

    pub fn response_many(&self, energies_kev: &[f64]) -> Result<Vec<f64>> {
        map_energies(energies_kev, |e| self.response(e))
    }
}
