use std::ops::Add;

use crate::error::Result;
use crate::material::{Material, map_energies};

/// Layers traversed one after the other.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    materials: Vec<Material>,
}

impl Stack {
    pub fn new(materials: Vec<Material>) -> Self {
        Stack { materials }
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Layer names with their thicknesses, in order.
    pub fn name(&self) -> String {
        self.materials
            .iter()
            .map(|m| format!("{} {}", m.name(), m.thickness()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Product of the layer transmissions. An empty stack transmits everything.
    pub fn transmission(&self, energy_kev: f64) -> Result<f64> {
        let mut t = 1.0;
        for m in &self.materials {
            t *= m.transmission(energy_kev)?;
        }
        Ok(t)
    }

    pub fn absorption(&self, energy_kev: f64) -> Result<f64> {
        Ok(1.0 - self.transmission(energy_kev)?)
    }

    pub fn transmission_many(&self, energies_kev: &[f64]) -> Result<Vec<f64>> {
        map_energies(energies_kev, |e| self.transmission(e))
    }

    pub fn absorption_many(&self, energies_kev: &[f64]) -> Result<Vec<f64>> {
        map_energies(energies_kev, |e| self.absorption(e))
    }
}

impl FromIterator<Material> for Stack {
    fn from_iter<I: IntoIterator<Item = Material>>(iter: I) -> Self {
        Stack::new(iter.into_iter().collect())
    }
}

/// Anything a photon can pass through on its way to a detector.
#[derive(Debug, Clone)]
pub enum OpticalPath {
    Material(Material),
    Stack(Stack),
}

impl OpticalPath {
    /// This path followed by `next`.
    pub fn compose(self, next: impl Into<OpticalPath>) -> Stack {
        let mut materials = self.into_materials();
        materials.extend(next.into().into_materials());
        Stack::new(materials)
    }

    fn into_materials(self) -> Vec<Material> {
        match self {
            OpticalPath::Material(m) => vec![m],
            OpticalPath::Stack(s) => s.materials,
        }
    }

    pub fn transmission(&self, energy_kev: f64) -> Result<f64> {
        match self {
            OpticalPath::Material(m) => m.transmission(energy_kev),
            OpticalPath::Stack(s) => s.transmission(energy_kev),
        }
    }

    pub fn absorption(&self, energy_kev: f64) -> Result<f64> {
        Ok(1.0 - self.transmission(energy_kev)?)
    }

    pub fn transmission_many(&self, energies_kev: &[f64]) -> Result<Vec<f64>> {
        map_energies(energies_kev, |e| self.transmission(e))
    }

    pub fn name(&self) -> String {
        match self {
            OpticalPath::Material(m) => m.name().to_string(),
            OpticalPath::Stack(s) => s.name(),
        }
    }
}

impl From<Material> for OpticalPath {
    fn from(m: Material) -> Self {
        OpticalPath::Material(m)
    }
}

impl From<Stack> for OpticalPath {
    fn from(s: Stack) -> Self {
        OpticalPath::Stack(s)
    }
}

impl Add<Material> for Material {
    type Output = Stack;

    fn add(self, rhs: Material) -> Stack {
        OpticalPath::from(self).compose(rhs)
    }
}

impl Add<Stack> for Material {
    type Output = Stack;

    fn add(self, rhs: Stack) -> Stack {
        OpticalPath::from(self).compose(rhs)
    }
}

impl Add<Material> for Stack {
    type Output = Stack;

    fn add(self, rhs: Material) -> Stack {
        OpticalPath::from(self).compose(rhs)
    }
}

impl Add<Stack> for Stack {
    type Output = Stack;

    fn add(self, rhs: Stack) -> Stack {
        OpticalPath::from(self).compose(rhs)
    }
}

// Borrowed operands clone the layers; curves are shared through `Arc`.

impl Add<&Material> for &Material {
    type Output = Stack;

    fn add(self, rhs: &Material) -> Stack {
        self.clone() + rhs.clone()
    }
}

impl Add<&Stack> for &Material {
    type Output = Stack;

    fn add(self, rhs: &Stack) -> Stack {
        self.clone() + rhs.clone()
    }
}

impl Add<&Material> for &Stack {
    type Output = Stack;

    fn add(self, rhs: &Material) -> Stack {
        self.clone() + rhs.clone()
    }
}

impl Add<&Stack> for &Stack {
    type Output = Stack;

    fn add(self, rhs: &Stack) -> Stack {
        self.clone() + rhs.clone()
    }
}
