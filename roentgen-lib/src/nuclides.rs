//! X-ray and gamma-ray emission of radionuclides, read from LNHB "LARA"
//! text tables.

use std::path::Path;

use crate::bundled::LARA_TABLES;
use crate::error::{Result, RoentgenError};

const SECONDS_PER_YEAR: f64 = 365.25 * 86_400.0;
const HEADER_LINES: usize = 12;

/// One emission line of a radionuclide.
#[derive(Debug, Clone, PartialEq)]
pub struct NuclideLine {
    /// keV. Tabulated ranges are replaced by their midpoint.
    pub energy: f64,
    /// Photons per 100 decays.
    pub intensity: f64,
    /// Atom or nucleus emitting the line.
    pub origin: String,
    /// Nuclide whose decay produces the line.
    pub parent: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Nuclide {
    name: String,
    element: String,
    mass_number: u16,
    half_life_s: f64,
    decay_chain: String,
    lines: Vec<NuclideLine>,
}

impl Nuclide {
    /// Parse a LARA table: a `key ; value` header followed by one or more
    /// emission tables, each opened by a dashed separator and closed by the
    /// first line that is not `;`-separated.
    pub fn from_lara(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().map(str::trim_end).collect();

        let mut name = None;
        let mut element = None;
        let mut daughter = None;
        let mut half_life_s = None;
        for line in lines.iter().take(HEADER_LINES) {
            let tokens: Vec<&str> = line.split(';').map(str::trim).collect();
            if tokens.len() < 2 {
                continue;
            }
            match tokens[0] {
                "Nuclide" => name = Some(tokens[1].to_string()),
                "Element" => element = Some(tokens[1].to_string()),
                key if key.starts_with("Daughter") => {
                    daughter = tokens.get(2).map(|d| d.to_string());
                }
                "Half-life (s)" => half_life_s = tokens[1].parse::<f64>().ok(),
                _ => {}
            }
        }
        let missing = |key: &str| RoentgenError::DataError(format!("LARA header lacks '{key}'"));
        let name = name.ok_or_else(|| missing("Nuclide"))?;
        let element = element.ok_or_else(|| missing("Element"))?;
        let half_life_s = half_life_s.ok_or_else(|| missing("Half-life (s)"))?;
        let mass_number = name
            .split('-')
            .nth(1)
            .map(|m| m.trim_end_matches(|c: char| c.is_ascii_alphabetic()))
            .and_then(|m| m.parse::<u16>().ok())
            .ok_or_else(|| {
                RoentgenError::DataError(format!("cannot read a mass number from '{name}'"))
            })?;

        let separators: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.matches("---------").count() > 1)
            .map(|(i, _)| i)
            .collect();

        let mut parents = Vec::with_capacity(separators.len());
        let mut emission = Vec::new();
        for (table, &start) in separators.iter().enumerate() {
            let parent = lines[start]
                .split_whitespace()
                .nth(1)
                .unwrap_or(name.as_str())
                .to_string();
            // the first table repeats the column headers
            let skip = if table == 0 { 2 } else { 1 };
            for row in lines.iter().skip(start + skip) {
                let tokens: Vec<&str> = row.split(';').map(str::trim).collect();
                if tokens.len() < 6 {
                    break;
                }
                emission.push(NuclideLine {
                    energy: parse_energy(tokens[0])?,
                    intensity: tokens[2].parse().map_err(|_| {
                        RoentgenError::DataError(format!("{name}: bad intensity '{}'", tokens[2]))
                    })?,
                    origin: tokens[5].to_string(),
                    parent: parent.clone(),
                });
            }
            parents.push(parent);
        }
        emission.sort_by(|a, b| a.energy.total_cmp(&b.energy));

        let decay_chain = if parents.len() > 1 {
            parents.join("->")
        } else {
            format!("{name}->{}", daughter.unwrap_or_default())
        };

        Ok(Nuclide {
            name,
            element,
            mass_number,
            half_life_s,
            decay_chain,
            lines: emission,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn mass_number(&self) -> u16 {
        self.mass_number
    }

    pub fn half_life_seconds(&self) -> f64 {
        self.half_life_s
    }

    /// Julian years.
    pub fn half_life_years(&self) -> f64 {
        self.half_life_s / SECONDS_PER_YEAR
    }

    /// e.g. `"Cd-109->Ag-109m"`
    pub fn decay_chain(&self) -> &str {
        &self.decay_chain
    }

    pub fn data_sheet_url(&self) -> String {
        format!("http://www.lnhb.fr/nuclides/{}_tables.pdf", self.name)
    }

    /// Every emission line, sorted by energy.
    pub fn all_lines(&self) -> &[NuclideLine] {
        &self.lines
    }

    /// Lines with `low_kev < energy < high_kev` and, if `min_intensity` is
    /// positive, intensity above it.
    pub fn lines(&self, low_kev: f64, high_kev: f64, min_intensity: f64) -> Vec<&NuclideLine> {
        self.lines
            .iter()
            .filter(|l| l.energy > low_kev && l.energy < high_kev)
            .filter(|l| min_intensity <= 0.0 || l.intensity > min_intensity)
            .collect()
    }
}

fn parse_energy(token: &str) -> Result<f64> {
    let bad = || RoentgenError::DataError(format!("bad LARA energy '{token}'"));
    match token.split_once(" - ") {
        Some((low, high)) => {
            let low: f64 = low.trim().parse().map_err(|_| bad())?;
            let high: f64 = high.trim().parse().map_err(|_| bad())?;
            Ok(0.5 * (low + high))
        }
        None => token.parse().map_err(|_| bad()),
    }
}

/// A set of parsed nuclides.
#[derive(Debug, Clone, Default)]
pub struct NuclideLibrary {
    nuclides: Vec<Nuclide>,
}

impl NuclideLibrary {
    /// Nuclides compiled into the library.
    pub fn bundled() -> Result<Self> {
        let nuclides = LARA_TABLES
            .iter()
            .map(|(_, text)| Nuclide::from_lara(text))
            .collect::<Result<Vec<_>>>()?;
        log::info!("loaded {} bundled nuclides", nuclides.len());
        Ok(NuclideLibrary { nuclides })
    }

    /// Every `*.lara.txt` file in `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(".lara.txt"))
            {
                paths.push(path);
            }
        }
        paths.sort();
        let nuclides = paths
            .iter()
            .map(|p| -> Result<Nuclide> { Nuclide::from_lara(&std::fs::read_to_string(p)?) })
            .collect::<Result<Vec<_>>>()?;
        log::info!("loaded {} nuclides from {}", nuclides.len(), dir.display());
        Ok(NuclideLibrary { nuclides })
    }

    pub fn nuclides(&self) -> &[Nuclide] {
        &self.nuclides
    }

    /// Mass numbers available for an element symbol, ascending.
    pub fn mass_numbers(&self, element: &str) -> Vec<u16> {
        let mut numbers: Vec<u16> = self
            .nuclides
            .iter()
            .filter(|n| n.element.eq_ignore_ascii_case(element))
            .map(|n| n.mass_number)
            .collect();
        numbers.sort_unstable();
        numbers.dedup();
        numbers
    }

    pub fn get(&self, element: &str, mass_number: u16) -> Result<&Nuclide> {
        self.nuclides
            .iter()
            .find(|n| n.element.eq_ignore_ascii_case(element) && n.mass_number == mass_number)
            .ok_or_else(|| RoentgenError::UnknownNuclide {
                element: element.to_string(),
                mass_number,
                valid: self.mass_numbers(element),
            })
    }
}
