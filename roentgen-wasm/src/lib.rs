//! WASM bindings for roentgen over the bundled catalog.
//!
//! Build with:
//! ```sh
//! wasm-pack build roentgen-wasm
//! ```

use std::sync::OnceLock;

use wasm_bindgen::prelude::*;

use roentgen::{Catalog, InstrumentConfig, Material, Thickness};

static CATALOG: OnceLock<Result<Catalog, String>> = OnceLock::new();

fn catalog() -> Result<&'static Catalog, JsError> {
    CATALOG
        .get_or_init(|| Catalog::bundled().map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|e| JsError::new(e))
}

fn to_js(e: roentgen::RoentgenError) -> JsError {
    JsError::new(&e.to_string())
}

fn material(id: &str, thickness_um: f64) -> Result<Material, JsError> {
    Material::new(catalog()?, id, Thickness::from_um(thickness_um), None).map_err(to_js)
}

// ── Catalog lookups ──

#[wasm_bindgen]
pub fn atomic_number(element: &str) -> Result<u16, JsError> {
    catalog()?.get_atomic_number(element).map_err(to_js)
}

/// Reference density in g/cm³ of an element or compound.
#[wasm_bindgen]
pub fn material_density(material: &str) -> Result<f64, JsError> {
    catalog()?
        .get_material_density(material)
        .map(|d| d.g_per_cm3())
        .map_err(to_js)
}

// ── Attenuation ──

/// Transmitted fraction through `thickness_um` of a material at reference density.
#[wasm_bindgen]
pub fn transmission(
    material_id: &str,
    thickness_um: f64,
    energies: &[f64],
) -> Result<Vec<f64>, JsError> {
    material(material_id, thickness_um)?
        .transmission_many(energies)
        .map_err(to_js)
}

#[wasm_bindgen]
pub fn absorption(
    material_id: &str,
    thickness_um: f64,
    energies: &[f64],
) -> Result<Vec<f64>, JsError> {
    material(material_id, thickness_um)?
        .absorption_many(energies)
        .map_err(to_js)
}

/// Detected fraction for an instrument given as JSON. The instrument's
/// catalog section is ignored; the bundled catalog is always used.
#[wasm_bindgen]
pub fn response(instrument_json: &str, energies: &[f64]) -> Result<Vec<f64>, JsError> {
    let config = InstrumentConfig::from_json_str(instrument_json).map_err(to_js)?;
    config
        .build(catalog()?)
        .and_then(|r| r.response_many(energies))
        .map_err(to_js)
}

// ── Emission lines ──

/// Energies (keV) of the emission lines strictly between `low` and `high`.
#[wasm_bindgen]
pub fn emission_lines(low: f64, high: f64, element: Option<String>) -> Result<Vec<f64>, JsError> {
    Ok(catalog()?
        .emission_lines(low, high, element.as_deref())
        .map_err(to_js)?
        .into_iter()
        .map(|l| l.energy)
        .collect())
}

/// Labels such as `"Fe Ka1"`, in the same order as [`emission_lines`].
#[wasm_bindgen]
pub fn emission_line_labels(
    low: f64,
    high: f64,
    element: Option<String>,
) -> Result<Vec<String>, JsError> {
    Ok(catalog()?
        .emission_lines(low, high, element.as_deref())
        .map_err(to_js)?
        .into_iter()
        .map(|l| format!("{} {}", l.element, l.line))
        .collect())
}
