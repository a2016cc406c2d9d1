use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::curve::AttenuationCurve;
use crate::error::{Result, RoentgenError};
use crate::units::{Density, Thickness};

/// What a [`Material`] is made of.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialSpec {
    /// An element symbol or name, or a compound symbol or name.
    Single(String),
    /// Identifiers with relative mass weights. Weights need not sum to 1.
    Mixture(Vec<(String, f64)>),
}

impl MaterialSpec {
    /// Read a specifier from JSON: a string, or an object mapping
    /// identifiers to numeric mass weights.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        use serde_json::Value;
        match value {
            Value::String(id) => Ok(MaterialSpec::Single(id.clone())),
            Value::Object(map) => map
                .iter()
                .map(|(id, weight)| {
                    weight
                        .as_f64()
                        .map(|w| (id.clone(), w))
                        .ok_or_else(|| {
                            RoentgenError::InvalidSpecifier(format!(
                                "mass weight of '{id}' must be a number, got {weight}"
                            ))
                        })
                })
                .collect::<Result<Vec<_>>>()
                .map(MaterialSpec::Mixture),
            other => Err(RoentgenError::InvalidSpecifier(format!(
                "expected an identifier or a map of identifiers to mass weights, got {other}"
            ))),
        }
    }
}

impl From<&str> for MaterialSpec {
    fn from(id: &str) -> Self {
        MaterialSpec::Single(id.to_string())
    }
}

impl From<String> for MaterialSpec {
    fn from(id: String) -> Self {
        MaterialSpec::Single(id)
    }
}

impl From<&[(&str, f64)]> for MaterialSpec {
    fn from(parts: &[(&str, f64)]) -> Self {
        MaterialSpec::Mixture(parts.iter().map(|&(id, w)| (id.to_string(), w)).collect())
    }
}

impl<const N: usize> From<[(&str, f64); N]> for MaterialSpec {
    fn from(parts: [(&str, f64); N]) -> Self {
        MaterialSpec::from(&parts[..])
    }
}

impl From<Vec<(String, f64)>> for MaterialSpec {
    fn from(parts: Vec<(String, f64)>) -> Self {
        MaterialSpec::Mixture(parts)
    }
}

impl From<BTreeMap<String, f64>> for MaterialSpec {
    fn from(parts: BTreeMap<String, f64>) -> Self {
        MaterialSpec::Mixture(parts.into_iter().collect())
    }
}

impl From<HashMap<String, f64>> for MaterialSpec {
    fn from(parts: HashMap<String, f64>) -> Self {
        // sorted so that the display name does not depend on hash order
        MaterialSpec::from(parts.into_iter().collect::<BTreeMap<_, _>>())
    }
}

/// One constituent of a material.
#[derive(Debug, Clone)]
pub struct Component {
    pub curve: Arc<AttenuationCurve>,
    /// Fraction of the total mass, in (0, 1].
    pub mass_fraction: f64,
}

/// A layer of a single element, compound or mixture with a thickness and
/// density.
#[derive(Debug, Clone)]
pub struct Material {
    name: String,
    components: Vec<Component>,
    thickness: Thickness,
    density: Density,
}

impl Material {
    /// Build a material layer.
    ///
    /// Without an explicit density the reference density is used; for
    /// mixtures that is the mass-weighted average of the component
    /// reference densities.
    pub fn new(
        catalog: &Catalog,
        spec: impl Into<MaterialSpec>,
        thickness: Thickness,
        density: Option<Density>,
    ) -> Result<Self> {
        let thickness = thickness.validate()?;
        let spec: MaterialSpec = spec.into();
        let (components, name, reference_density) = match spec {
            MaterialSpec::Single(id) => {
                let curve = catalog.curve(&id)?;
                let density = catalog.get_material_density(&id)?;
                let name = curve.name().to_string();
                (
                    vec![Component {
                        curve,
                        mass_fraction: 1.0,
                    }],
                    name,
                    density.g_per_cm3(),
                )
            }
            MaterialSpec::Mixture(parts) => mixture(catalog, &parts)?,
        };
        let density = match density {
            Some(d) => d.validate()?,
            None => Density::from_g_per_cm3(reference_density).validate()?,
        };

        Ok(Material {
            name,
            components,
            thickness,
            density,
        })
    }

    /// Same material under a different display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.components.iter().map(|c| c.curve.symbol()).collect()
    }

    pub fn mass_fractions(&self) -> Vec<f64> {
        self.components.iter().map(|c| c.mass_fraction).collect()
    }

    pub fn thickness(&self) -> Thickness {
        self.thickness
    }

    pub fn density(&self) -> Density {
        self.density
    }

    /// μ/ρ in cm²/g, the mass-weighted sum over the components.
    pub fn mass_attenuation_coefficient(&self, energy_kev: f64) -> Result<f64> {
        let mut mu = 0.0;
        for c in &self.components {
            mu += c.mass_fraction * c.curve.evaluate(energy_kev)?;
        }
        Ok(mu)
    }

    /// μ in 1/cm.
    pub fn linear_attenuation_coefficient(&self, energy_kev: f64) -> Result<f64> {
        Ok(self.mass_attenuation_coefficient(energy_kev)? * self.density.g_per_cm3())
    }

    /// Fraction of photons passing through the layer unattenuated.
    pub fn transmission(&self, energy_kev: f64) -> Result<f64> {
        Ok((-self.linear_attenuation_coefficient(energy_kev)? * self.thickness.cm()).exp())
    }

    pub fn absorption(&self, energy_kev: f64) -> Result<f64> {
        Ok(1.0 - self.transmission(energy_kev)?)
    }

    pub fn mass_attenuation_coefficient_many(&self, energies_kev: &[f64]) -> Result<Vec<f64>> {
        map_energies(energies_kev, |e| self.mass_attenuation_coefficient(e))
    }

    pub fn linear_attenuation_coefficient_many(&self, energies_kev: &[f64]) -> Result<Vec<f64>> {
        map_energies(energies_kev, |e| self.linear_attenuation_coefficient(e))
    }

    pub fn transmission_many(&self, energies_kev: &[f64]) -> Result<Vec<f64>> {
        map_energies(energies_kev, |e| self.transmission(e))
    }

    pub fn absorption_many(&self, energies_kev: &[f64]) -> Result<Vec<f64>> {
        map_energies(energies_kev, |e| self.absorption(e))
    }
}

pub(crate) fn map_energies(
    energies_kev: &[f64],
    f: impl Fn(f64) -> Result<f64>,
) -> Result<Vec<f64>> {
    energies_kev.iter().map(|&e| f(e)).collect()
}

fn mixture(catalog: &Catalog, parts: &[(String, f64)]) -> Result<(Vec<Component>, String, f64)> {
    if parts.is_empty() {
        return Err(RoentgenError::InvalidSpecifier(
            "a mixture needs at least one component".to_string(),
        ));
    }
    if let Some((id, w)) = parts.iter().find(|(_, w)| !(w.is_finite() && *w > 0.0)) {
        return Err(RoentgenError::InvalidSpecifier(format!(
            "mass weight of '{id}' must be positive and finite, got {w}"
        )));
    }
    // scaled by the largest weight so that huge weights cannot overflow the sum
    let largest = parts.iter().map(|(_, w)| *w).fold(0.0, f64::max);
    let total: f64 = parts.iter().map(|(_, w)| w / largest).sum();

    let mut components = Vec::with_capacity(parts.len());
    let mut names = Vec::with_capacity(parts.len());
    let mut density = 0.0;
    for (id, weight) in parts {
        let mass_fraction = weight / largest / total;
        let curve = catalog.curve(id)?;
        density += mass_fraction * catalog.get_material_density(id)?.g_per_cm3();
        names.push(curve.name().to_string());
        components.push(Component {
            curve,
            mass_fraction,
        });
    }
    Ok((components, names.join(" + "), density))
}
