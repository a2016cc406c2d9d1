//! Length and density quantities.
//!
//! Attenuation tables are in cm²/g, so thicknesses are held in cm and
//! densities in g/cm³. Photon energies are plain `f64` values in keV
//! throughout the crate.

use std::fmt;
use std::str::FromStr;

use crate::constants::R_DRY_AIR;
use crate::error::{Result, RoentgenError};

/// A path length through a material.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Thickness {
    cm: f64,
}

impl Thickness {
    pub fn from_cm(cm: f64) -> Self {
        Thickness { cm }
    }

    pub fn from_m(m: f64) -> Self {
        Self::from_cm(m * 1e2)
    }

    pub fn from_mm(mm: f64) -> Self {
        Self::from_cm(mm * 1e-1)
    }

    pub fn from_um(um: f64) -> Self {
        Self::from_cm(um * 1e-4)
    }

    pub fn from_nm(nm: f64) -> Self {
        Self::from_cm(nm * 1e-7)
    }

    pub fn from_pm(pm: f64) -> Self {
        Self::from_cm(pm * 1e-10)
    }

    /// Megametres. Only useful for opacity limits, but it reads better than 5e10 cm.
    #[allow(non_snake_case)]
    pub fn from_Mm(megametres: f64) -> Self {
        Self::from_cm(megametres * 1e8)
    }

    pub fn cm(&self) -> f64 {
        self.cm
    }

    pub fn um(&self) -> f64 {
        self.cm * 1e4
    }

    /// Physical thicknesses are finite and strictly positive.
    pub fn validate(self) -> Result<Self> {
        if self.cm.is_finite() && self.cm > 0.0 {
            Ok(self)
        } else {
            Err(RoentgenError::InvalidQuantity(format!(
                "thickness must be positive and finite, got {} cm",
                self.cm
            )))
        }
    }
}

impl fmt::Display for Thickness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} um", self.um())
    }
}

impl FromStr for Thickness {
    type Err = RoentgenError;

    /// Parses `"<value> <unit>"`, e.g. `"500 um"`, `"1mm"`, `"1e-6 pm"`.
    fn from_str(s: &str) -> Result<Self> {
        let (value, unit) = split_quantity(s)?;
        let thickness = match unit {
            "m" => Thickness::from_m(value),
            "cm" => Thickness::from_cm(value),
            "mm" => Thickness::from_mm(value),
            "um" | "µm" | "micron" => Thickness::from_um(value),
            "nm" => Thickness::from_nm(value),
            "pm" => Thickness::from_pm(value),
            "Mm" => Thickness::from_Mm(value),
            other => {
                return Err(RoentgenError::InvalidQuantity(format!(
                    "unknown length unit '{other}'"
                )));
            }
        };
        thickness.validate()
    }
}

/// A mass density.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Density {
    g_per_cm3: f64,
}

impl Density {
    pub fn from_g_per_cm3(g_per_cm3: f64) -> Self {
        Density { g_per_cm3 }
    }

    pub fn from_kg_per_m3(kg_per_m3: f64) -> Self {
        Self::from_g_per_cm3(kg_per_m3 * 1e-3)
    }

    pub fn g_per_cm3(&self) -> f64 {
        self.g_per_cm3
    }

    pub fn kg_per_m3(&self) -> f64 {
        self.g_per_cm3 * 1e3
    }

    pub fn validate(self) -> Result<Self> {
        if self.g_per_cm3.is_finite() && self.g_per_cm3 > 0.0 {
            Ok(self)
        } else {
            Err(RoentgenError::InvalidQuantity(format!(
                "density must be positive and finite, got {} g/cm3",
                self.g_per_cm3
            )))
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} g/cm3", self.g_per_cm3)
    }
}

impl FromStr for Density {
    type Err = RoentgenError;

    /// Parses `"<value> <unit>"` with unit `g/cm3` (or `g/cm^3`, `g/cc`)
    /// or `kg/m3` (or `kg/m^3`).
    fn from_str(s: &str) -> Result<Self> {
        let (value, unit) = split_quantity(s)?;
        let density = match unit {
            "g/cm3" | "g/cm^3" | "g/cc" => Density::from_g_per_cm3(value),
            "kg/m3" | "kg/m^3" => Density::from_kg_per_m3(value),
            other => {
                return Err(RoentgenError::InvalidQuantity(format!(
                    "unknown density unit '{other}'"
                )));
            }
        };
        density.validate()
    }
}

fn split_quantity(s: &str) -> Result<(f64, &str)> {
    let s = s.trim();
    // The number ends at the first character that cannot continue a float.
    let split = s
        .char_indices()
        .find(|&(i, c)| {
            !(c.is_ascii_digit()
                || c == '.'
                || c == '+'
                || c == '-'
                || ((c == 'e' || c == 'E')
                    && i > 0
                    && !s[i + 1..].starts_with(char::is_alphabetic)))
        })
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    let (number, unit) = s.split_at(split);
    let value = number.parse::<f64>().map_err(|_| {
        RoentgenError::InvalidQuantity(format!("cannot parse a number from '{s}'"))
    })?;
    Ok((value, unit.trim()))
}

/// Density of dry air from the ideal gas law.
///
/// `pressure_pa` in pascal, `temperature_k` in kelvin.
pub fn density_ideal_gas(pressure_pa: f64, temperature_k: f64) -> Result<Density> {
    if !(temperature_k.is_finite() && temperature_k > 0.0) {
        return Err(RoentgenError::InvalidQuantity(format!(
            "temperature must be above absolute zero, got {temperature_k} K"
        )));
    }
    if !(pressure_pa.is_finite() && pressure_pa >= 0.0) {
        return Err(RoentgenError::InvalidQuantity(format!(
            "pressure must be non-negative, got {pressure_pa} Pa"
        )));
    }
    Ok(Density::from_kg_per_m3(
        pressure_pa / (R_DRY_AIR * temperature_k),
    ))
}
