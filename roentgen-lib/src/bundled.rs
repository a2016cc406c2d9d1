//! Reference subset compiled into the library.
//!
//! Attenuation tables are shipped for a handful of common filter, window
//! and detector materials; element and compound metadata, edges and
//! emission lines cover more than that.

use roentgen_data::ReferenceData;

use crate::error::Result;
use crate::parsers;

const ELEMENTS: &str = include_str!("../data/elements.csv");
const COMPOUNDS: &str = include_str!("../data/compounds_mixtures.csv");
const BINDING_ENERGIES: &str = include_str!("../data/binding_energies.csv");
const EMISSION_LINES: &str = include_str!("../data/emission_lines.csv");

/// (symbol, table)
const ELEMENT_TABLES: &[(&str, &str)] = &[
    ("H", include_str!("../data/elements/z01.csv")),
    ("Be", include_str!("../data/elements/z04.csv")),
    ("C", include_str!("../data/elements/z06.csv")),
    ("N", include_str!("../data/elements/z07.csv")),
    ("O", include_str!("../data/elements/z08.csv")),
    ("Al", include_str!("../data/elements/z13.csv")),
    ("Si", include_str!("../data/elements/z14.csv")),
    ("Fe", include_str!("../data/elements/z26.csv")),
    ("Cu", include_str!("../data/elements/z29.csv")),
    ("Ge", include_str!("../data/elements/z32.csv")),
    ("Au", include_str!("../data/elements/z79.csv")),
];

const COMPOUND_TABLES: &[(&str, &str)] = &[
    ("water", include_str!("../data/compounds_mixtures/water.csv")),
    ("air", include_str!("../data/compounds_mixtures/air.csv")),
    ("mylar", include_str!("../data/compounds_mixtures/mylar.csv")),
    ("kapton", include_str!("../data/compounds_mixtures/kapton.csv")),
    ("cdte", include_str!("../data/compounds_mixtures/cdte.csv")),
];

/// LNHB nuclide tables, keyed by nuclide name.
pub(crate) const LARA_TABLES: &[(&str, &str)] = &[
    ("Fe-55", include_str!("../data/lara/Fe-55.lara.txt")),
    ("Cd-109", include_str!("../data/lara/Cd-109.lara.txt")),
];

pub(crate) fn reference_data() -> Result<ReferenceData> {
    let attenuation = ELEMENT_TABLES
        .iter()
        .chain(COMPOUND_TABLES)
        .map(|(symbol, table)| parsers::parse_attenuation_table(symbol, table))
        .collect::<Result<Vec<_>>>()?;

    Ok(ReferenceData {
        elements: parsers::parse_elements(ELEMENTS)?,
        compounds: parsers::parse_compounds(COMPOUNDS)?,
        attenuation,
        edges: parsers::parse_edges(BINDING_ENERGIES)?,
        emission_lines: parsers::parse_emission_lines(EMISSION_LINES)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_tables_parse() {
        let data = reference_data().unwrap();
        assert_eq!(data.elements.len(), 92);
        assert_eq!(data.compounds.len(), 5);
        assert_eq!(
            data.attenuation.len(),
            ELEMENT_TABLES.len() + COMPOUND_TABLES.len()
        );
        assert!(!data.edges.is_empty());
        assert!(!data.emission_lines.is_empty());
    }

    #[test]
    fn test_bundled_tables_start_at_one_kev() {
        let data = reference_data().unwrap();
        for record in &data.attenuation {
            assert!(
                (record.energy[0] - 1.0).abs() < 1e-9,
                "{} starts at {} keV",
                record.material,
                record.energy[0]
            );
            assert!(record.energy.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
