//! Parsers for the reference-data directory layout.
//!
//! Every table is a comma-separated text file. Lines starting with `#` are
//! comments and blank lines are ignored.

use roentgen_data::{
    AttenuationRecord, CompoundRecord, EdgeRecord, ElementRecord, EmissionLineRecord,
};

use crate::constants::KEV_PER_MEV;
use crate::error::{Result, RoentgenError};

fn data_lines(content: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.starts_with('#') && !line.trim().is_empty())
        .map(|(i, line)| (i + 1, line.split(',').map(str::trim).collect()))
}

fn field<'a>(parts: &[&'a str], index: usize, line: usize, table: &str) -> Result<&'a str> {
    parts.get(index).copied().ok_or_else(|| {
        RoentgenError::DataError(format!(
            "{table}, line {line}: expected at least {} columns",
            index + 1
        ))
    })
}

fn number<T: std::str::FromStr>(
    parts: &[&str],
    index: usize,
    line: usize,
    table: &str,
) -> Result<T> {
    let raw = field(parts, index, line, table)?;
    raw.parse().map_err(|_| {
        RoentgenError::DataError(format!("{table}, line {line}: cannot parse '{raw}'"))
    })
}

/// `z,symbol,name,atomic_mass,density`
pub fn parse_elements(content: &str) -> Result<Vec<ElementRecord>> {
    const TABLE: &str = "elements.csv";
    data_lines(content)
        .map(|(line, parts)| -> Result<ElementRecord> {
            Ok(ElementRecord {
                atomic_number: number(&parts, 0, line, TABLE)?,
                symbol: field(&parts, 1, line, TABLE)?.to_string(),
                name: field(&parts, 2, line, TABLE)?.to_string(),
                atomic_mass: number(&parts, 3, line, TABLE)?,
                density: number(&parts, 4, line, TABLE)?,
            })
        })
        .collect()
}

/// `symbol,name,density`
pub fn parse_compounds(content: &str) -> Result<Vec<CompoundRecord>> {
    const TABLE: &str = "compounds_mixtures.csv";
    data_lines(content)
        .map(|(line, parts)| -> Result<CompoundRecord> {
            Ok(CompoundRecord {
                symbol: field(&parts, 0, line, TABLE)?.to_string(),
                name: field(&parts, 1, line, TABLE)?.to_string(),
                density: number(&parts, 2, line, TABLE)?,
            })
        })
        .collect()
}

/// Two columns, energy in MeV and μ/ρ in cm²/g. Energies are converted to
/// keV; repeated edge energies are kept as they are.
pub fn parse_attenuation_table(material: &str, content: &str) -> Result<AttenuationRecord> {
    let mut energy = Vec::new();
    let mut mu_over_rho = Vec::new();
    for (line, parts) in data_lines(content) {
        let e_mev: f64 = number(&parts, 0, line, material)?;
        energy.push(e_mev * KEV_PER_MEV);
        mu_over_rho.push(number(&parts, 1, line, material)?);
    }
    if energy.is_empty() {
        return Err(RoentgenError::DataError(format!(
            "attenuation table for '{material}' is empty"
        )));
    }
    Ok(AttenuationRecord {
        material: material.to_string(),
        energy,
        mu_over_rho,
    })
}

/// `symbol,edge,energy_kev`
pub fn parse_edges(content: &str) -> Result<Vec<EdgeRecord>> {
    const TABLE: &str = "binding_energies.csv";
    data_lines(content)
        .map(|(line, parts)| -> Result<EdgeRecord> {
            Ok(EdgeRecord {
                element: field(&parts, 0, line, TABLE)?.to_string(),
                edge: field(&parts, 1, line, TABLE)?.to_string(),
                energy: number(&parts, 2, line, TABLE)?,
            })
        })
        .collect()
}

/// `symbol,line,energy_kev,intensity`
pub fn parse_emission_lines(content: &str) -> Result<Vec<EmissionLineRecord>> {
    const TABLE: &str = "emission_lines.csv";
    data_lines(content)
        .map(|(line, parts)| -> Result<EmissionLineRecord> {
            Ok(EmissionLineRecord {
                element: field(&parts, 0, line, TABLE)?.to_string(),
                line: field(&parts, 1, line, TABLE)?.to_string(),
                energy: number(&parts, 2, line, TABLE)?,
                intensity: number(&parts, 3, line, TABLE)?,
            })
        })
        .collect()
}

/// File name of an element's attenuation table, relative to `elements/`.
pub fn element_table_file(atomic_number: u16) -> String {
    format!("z{atomic_number:02}.csv")
}

/// File name of a compound's attenuation table, relative to `compounds_mixtures/`.
pub fn compound_table_file(symbol: &str) -> String {
    format!("{}.csv", symbol.replace(' ', "_"))
}
