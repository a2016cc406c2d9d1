//! Serializable descriptions of catalogs and instruments.
//!
//! An instrument file is JSON:
//!
//! ```json
//! {
//!   "catalog": { "data_dir": null },
//!   "optical_path": [
//!     { "material": "air", "thickness": "10 cm" },
//!     { "material": "Be", "thickness": "25 um", "name": "window" }
//!   ],
//!   "detector": { "material": "Si", "thickness": "500 um" }
//! }
//! ```
//!
//! `material` is an identifier or an object of identifiers to mass weights.
//! `"detector": "ideal"` selects a detector that absorbs every photon.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{Result, RoentgenError};
use crate::material::{Material, MaterialSpec};
use crate::response::{Detector, Response};
use crate::stack::{OpticalPath, Stack};
use crate::units::{Density, Thickness};

/// Environment variable naming a reference-data directory.
pub const DATA_DIR_ENV: &str = "ROENTGEN_DATA_DIR";

/// Where a [`Catalog`] gets its tables from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directory laid out like the bundled data. `None` uses the bundled data.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl CatalogConfig {
    /// Reads [`DATA_DIR_ENV`]; unset or empty means bundled data.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var_os(DATA_DIR_ENV))
    }

    fn from_env_value(value: Option<std::ffi::OsString>) -> Self {
        CatalogConfig {
            data_dir: value.filter(|v| !v.is_empty()).map(PathBuf::from),
        }
    }
}

/// One layer of an optical path or a detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    pub material: serde_json::Value,
    /// e.g. `"500 um"`
    pub thickness: String,
    /// e.g. `"2.33 g/cm3"`; the reference density when absent.
    #[serde(default)]
    pub density: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl LayerConfig {
    pub fn build(&self, catalog: &Catalog) -> Result<Material> {
        let spec = MaterialSpec::from_json(&self.material)?;
        let thickness: Thickness = self.thickness.parse()?;
        let density = self
            .density
            .as_deref()
            .map(str::parse::<Density>)
            .transpose()?;
        let material = Material::new(catalog, spec, thickness, density)?;
        Ok(match &self.name {
            Some(name) => material.with_name(name.as_str()),
            None => material,
        })
    }
}

/// A detector entry: a layer, or the string `"ideal"`.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectorConfig {
    Ideal,
    Layer(LayerConfig),
}

impl DetectorConfig {
    /// Read a detector from JSON. Anything other than `"ideal"` (any case)
    /// or a layer object is an [`RoentgenError::InvalidSpecifier`].
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        use serde_json::Value;
        match value {
            Value::String(name) if name.eq_ignore_ascii_case("ideal") => {
                Ok(DetectorConfig::Ideal)
            }
            Value::Object(_) => serde_json::from_value(value.clone())
                .map(DetectorConfig::Layer)
                .map_err(|e| RoentgenError::InvalidSpecifier(format!("detector layer: {e}"))),
            other => Err(RoentgenError::InvalidSpecifier(format!(
                "detector must be a layer or \"ideal\", got {other}"
            ))),
        }
    }

    pub fn build(&self, catalog: &Catalog) -> Result<Detector> {
        match self {
            DetectorConfig::Ideal => Ok(Detector::Ideal),
            DetectorConfig::Layer(layer) => Ok(Detector::Material(layer.build(catalog)?)),
        }
    }
}

/// An optical path and detector, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub optical_path: Vec<LayerConfig>,
    /// A layer object or `"ideal"`, checked by [`DetectorConfig::from_json`].
    #[serde(default)]
    pub detector: Option<serde_json::Value>,
}

impl InstrumentConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load the catalog this instrument refers to.
    pub fn load_catalog(&self) -> Result<Catalog> {
        Catalog::from_config(&self.catalog)
    }

    /// Build the response against `catalog`. A detector is required.
    pub fn build(&self, catalog: &Catalog) -> Result<Response> {
        let detector = self
            .detector
            .as_ref()
            .filter(|value| !value.is_null())
            .ok_or_else(|| {
                RoentgenError::InvalidSpecifier(
                    "an instrument needs a detector; use \"ideal\" for a perfect absorber"
                        .to_string(),
                )
            })
            .and_then(DetectorConfig::from_json)?
            .build(catalog)?;

        let mut layers = self
            .optical_path
            .iter()
            .map(|layer| layer.build(catalog))
            .collect::<Result<Vec<_>>>()?;
        let optical_path = if layers.len() == 1 {
            OpticalPath::Material(layers.remove(0))
        } else {
            OpticalPath::Stack(Stack::new(layers))
        };

        log::debug!(
            "built response: [{}] onto {}",
            optical_path.name(),
            detector.name()
        );
        Ok(Response::new(optical_path, detector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_value() {
        assert_eq!(CatalogConfig::from_env_value(None).data_dir, None);
        assert_eq!(CatalogConfig::from_env_value(Some("".into())).data_dir, None);
        assert_eq!(
            CatalogConfig::from_env_value(Some("/opt/roentgen".into())).data_dir,
            Some(PathBuf::from("/opt/roentgen"))
        );
    }

    #[test]
    fn test_detector_forms() {
        use serde_json::json;

        assert_eq!(
            DetectorConfig::from_json(&json!("IDEAL")).unwrap(),
            DetectorConfig::Ideal
        );
        let layer =
            DetectorConfig::from_json(&json!({"material": "Si", "thickness": "500 um"})).unwrap();
        assert!(matches!(layer, DetectorConfig::Layer(l) if l.thickness == "500 um"));
        assert!(matches!(
            DetectorConfig::from_json(&json!({"material": "Si"})),
            Err(RoentgenError::InvalidSpecifier(_))
        ));
    }
}
