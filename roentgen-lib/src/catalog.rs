use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use roentgen_data::ReferenceData;

use crate::bundled;
use crate::config::CatalogConfig;
use crate::curve::AttenuationCurve;
use crate::error::{Result, RoentgenError};
use crate::parsers;
use crate::units::Density;

/// One element or compound known to a [`Catalog`].
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub symbol: String,
    pub name: String,
    /// `None` for compounds and mixtures.
    pub atomic_number: Option<u16>,
    /// Atomic mass in u, elements only.
    pub atomic_mass: Option<f64>,
    pub density: Density,
}

impl CatalogEntry {
    pub fn is_element(&self) -> bool {
        self.atomic_number.is_some()
    }
}

#[derive(Debug, Clone, Copy)]
enum Resolved {
    Element(usize),
    Compound(usize),
}

/// Read-only reference tables plus a cache of attenuation curves.
///
/// Identifiers are matched case-insensitively, first against element
/// symbols, then element names, compound symbols and compound names.
/// A catalog is built once and passed by reference to everything that
/// needs reference data.
///
/// Only elements and compounds with an attenuation table are catalog
/// entries. Element records without one still take part in emission-line
/// and edge lookups.
pub struct Catalog {
    data: ReferenceData,
    /// lowercase symbol or name -> index into `data.elements`
    periodic: HashMap<String, usize>,
    elements: Vec<CatalogEntry>,
    compounds: Vec<CatalogEntry>,
    element_symbols: HashMap<String, usize>,
    element_names: HashMap<String, usize>,
    compound_symbols: HashMap<String, usize>,
    compound_names: HashMap<String, usize>,
    /// lowercase canonical symbol -> index into `data.attenuation`
    tables: HashMap<String, usize>,
    curves: RwLock<HashMap<String, Arc<AttenuationCurve>>>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("elements", &self.elements.len())
            .field("compounds", &self.compounds.len())
            .field("tables", &self.tables.len())
            .finish()
    }
}

impl Catalog {
    /// The reference subset compiled into the library.
    pub fn bundled() -> Result<Self> {
        Self::build(bundled::reference_data()?, "bundled data")
    }

    pub fn from_reference_data(data: ReferenceData) -> Result<Self> {
        Self::build(data, "reference data")
    }

    /// Load a data directory laid out like the bundled `data/` directory.
    ///
    /// `elements.csv` and `compounds_mixtures.csv` are required. Edges,
    /// emission lines and the attenuation table directories are optional.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let elements = parsers::parse_elements(&read_table(&dir.join("elements.csv"))?)?;
        let compounds =
            parsers::parse_compounds(&read_table(&dir.join("compounds_mixtures.csv"))?)?;

        let edges = match read_optional(dir, "binding_energies.csv")? {
            Some(text) => parsers::parse_edges(&text)?,
            None => Vec::new(),
        };
        let emission_lines = match read_optional(dir, "emission_lines.csv")? {
            Some(text) => parsers::parse_emission_lines(&text)?,
            None => Vec::new(),
        };

        let mut attenuation = Vec::new();
        let element_dir = dir.join("elements");
        if element_dir.is_dir() {
            for element in &elements {
                let path = element_dir.join(parsers::element_table_file(element.atomic_number));
                if path.is_file() {
                    attenuation.push(parsers::parse_attenuation_table(
                        &element.symbol,
                        &read_table(&path)?,
                    )?);
                }
            }
        } else {
            log::warn!("{} has no elements/ directory", dir.display());
        }
        let compound_dir = dir.join("compounds_mixtures");
        if compound_dir.is_dir() {
            for compound in &compounds {
                let path = compound_dir.join(parsers::compound_table_file(&compound.symbol));
                if path.is_file() {
                    attenuation.push(parsers::parse_attenuation_table(
                        &compound.symbol,
                        &read_table(&path)?,
                    )?);
                }
            }
        } else {
            log::warn!("{} has no compounds_mixtures/ directory", dir.display());
        }

        let data = ReferenceData {
            elements,
            compounds,
            attenuation,
            edges,
            emission_lines,
        };
        Self::build(data, &dir.display().to_string())
    }

    /// Load a zstd-compressed postcard snapshot written by `roentgen-generate`.
    pub fn from_snapshot(compressed: &[u8]) -> Result<Self> {
        let mut decoder = ruzstd::decoding::StreamingDecoder::new(compressed)
            .map_err(|e| RoentgenError::Snapshot(e.to_string()))?;
        let mut decompressed = Vec::new();
        std::io::Read::read_to_end(&mut decoder, &mut decompressed)?;
        let data: ReferenceData = postcard::from_bytes(&decompressed)
            .map_err(|e| RoentgenError::Snapshot(e.to_string()))?;
        Self::build(data, "snapshot")
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        match &config.data_dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::bundled(),
        }
    }

    fn build(data: ReferenceData, source: &str) -> Result<Self> {
        let mut tables = HashMap::new();
        for (i, record) in data.attenuation.iter().enumerate() {
            let known = data
                .elements
                .iter()
                .map(|e| e.symbol.as_str())
                .chain(data.compounds.iter().map(|c| c.symbol.as_str()))
                .any(|symbol| symbol.eq_ignore_ascii_case(&record.material));
            if !known {
                return Err(RoentgenError::DataError(format!(
                    "attenuation table for unknown material '{}'",
                    record.material
                )));
            }
            tables.insert(record.material.to_lowercase(), i);
        }
        let tabulated = |symbol: &str| tables.contains_key(&symbol.to_lowercase());

        let elements: Vec<CatalogEntry> = data
            .elements
            .iter()
            .filter(|e| tabulated(&e.symbol))
            .map(|e| CatalogEntry {
                symbol: e.symbol.clone(),
                name: e.name.clone(),
                atomic_number: Some(e.atomic_number),
                atomic_mass: Some(e.atomic_mass),
                density: Density::from_g_per_cm3(e.density),
            })
            .collect();
        let compounds: Vec<CatalogEntry> = data
            .compounds
            .iter()
            .filter(|c| tabulated(&c.symbol))
            .map(|c| CatalogEntry {
                symbol: c.symbol.clone(),
                name: c.name.clone(),
                atomic_number: None,
                atomic_mass: None,
                density: Density::from_g_per_cm3(c.density),
            })
            .collect();

        let untabulated =
            data.elements.len() + data.compounds.len() - elements.len() - compounds.len();
        if untabulated > 0 {
            log::debug!("{untabulated} records in {source} have no attenuation table");
        }

        let periodic = data
            .elements
            .iter()
            .enumerate()
            .flat_map(|(i, e)| [(e.symbol.to_lowercase(), i), (e.name.to_lowercase(), i)])
            .collect();
        let element_symbols = index_by(&elements, |e| e.symbol.as_str());
        let element_names = index_by(&elements, |e| e.name.as_str());
        let compound_symbols = index_by(&compounds, |e| e.symbol.as_str());
        let compound_names = index_by(&compounds, |e| e.name.as_str());

        log::info!(
            "loaded catalog from {source}: {} elements, {} compounds, {} edges, {} emission lines",
            elements.len(),
            compounds.len(),
            data.edges.len(),
            data.emission_lines.len()
        );

        Ok(Catalog {
            data,
            periodic,
            elements,
            compounds,
            element_symbols,
            element_names,
            compound_symbols,
            compound_names,
            tables,
            curves: RwLock::new(HashMap::new()),
        })
    }

    /// The raw tables this catalog was built from.
    pub fn reference_data(&self) -> &ReferenceData {
        &self.data
    }

    /// Uncompressed postcard encoding of [`reference_data`](Self::reference_data).
    pub fn snapshot_payload(&self) -> Result<Vec<u8>> {
        postcard::to_allocvec(&self.data).map_err(|e| RoentgenError::Snapshot(e.to_string()))
    }

    fn resolve(&self, id: &str) -> Option<Resolved> {
        let key = id.trim().to_lowercase();
        if key.chars().count() <= 2 {
            if let Some(&i) = self.element_symbols.get(&key) {
                return Some(Resolved::Element(i));
            }
        }
        if let Some(&i) = self.element_names.get(&key) {
            return Some(Resolved::Element(i));
        }
        if let Some(&i) = self.compound_symbols.get(&key) {
            return Some(Resolved::Compound(i));
        }
        self.compound_names.get(&key).map(|&i| Resolved::Compound(i))
    }

    /// Look up an element or compound.
    pub fn entry(&self, id: &str) -> Result<&CatalogEntry> {
        match self.resolve(id) {
            Some(Resolved::Element(i)) => Ok(&self.elements[i]),
            Some(Resolved::Compound(i)) => Ok(&self.compounds[i]),
            None => Err(RoentgenError::MaterialNotFound(id.to_string())),
        }
    }

    pub fn elements(&self) -> &[CatalogEntry] {
        &self.elements
    }

    pub fn compounds(&self) -> &[CatalogEntry] {
        &self.compounds
    }

    /// Every element and compound, elements first.
    pub fn materials(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.elements.iter().chain(&self.compounds)
    }

    /// True if `id` is an element symbol or element name, in any case.
    pub fn is_an_element(&self, id: &str) -> bool {
        matches!(self.resolve(id), Some(Resolved::Element(_)))
    }

    /// True if `id` is a compound symbol or compound name, in any case.
    pub fn is_in_known_compounds(&self, id: &str) -> bool {
        let key = id.trim().to_lowercase();
        self.compound_symbols.contains_key(&key) || self.compound_names.contains_key(&key)
    }

    pub fn get_atomic_number(&self, id: &str) -> Result<u16> {
        match self.resolve(id) {
            Some(Resolved::Element(i)) => self.elements[i]
                .atomic_number
                .ok_or_else(|| RoentgenError::MaterialNotFound(id.to_string())),
            _ => Err(RoentgenError::MaterialNotFound(id.to_string())),
        }
    }

    /// Position of a compound in [`compounds`](Self::compounds).
    pub fn get_compound_index(&self, id: &str) -> Result<usize> {
        let key = id.trim().to_lowercase();
        self.compound_symbols
            .get(&key)
            .or_else(|| self.compound_names.get(&key))
            .copied()
            .ok_or_else(|| RoentgenError::MaterialNotFound(id.to_string()))
    }

    /// Reference density of an element or compound.
    pub fn get_material_density(&self, id: &str) -> Result<Density> {
        Ok(self.entry(id)?.density)
    }

    /// Canonical symbol of an element, e.g. `"Fe"` for `"iron"` or `"FE"`.
    pub fn get_element_symbol(&self, id: &str) -> Result<&str> {
        match self.resolve(id) {
            Some(Resolved::Element(i)) => Ok(&self.elements[i].symbol),
            _ => Err(RoentgenError::MaterialNotFound(id.to_string())),
        }
    }

    /// Canonical symbol of any tabulated element record, with or without an
    /// attenuation table.
    pub(crate) fn periodic_symbol(&self, id: &str) -> Result<&str> {
        self.periodic
            .get(&id.trim().to_lowercase())
            .map(|&i| self.data.elements[i].symbol.as_str())
            .ok_or_else(|| RoentgenError::MaterialNotFound(id.to_string()))
    }

    pub fn get_material_symbol(&self, id: &str) -> Result<&str> {
        Ok(&self.entry(id)?.symbol)
    }

    pub fn get_material_name(&self, id: &str) -> Result<&str> {
        Ok(&self.entry(id)?.name)
    }

    /// The attenuation curve of an element or compound.
    ///
    /// Curves are built once per material and shared afterwards.
    pub fn curve(&self, id: &str) -> Result<Arc<AttenuationCurve>> {
        let entry = self.entry(id)?;
        let key = entry.symbol.to_lowercase();

        if let Some(curve) = self
            .curves
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            log::trace!("attenuation curve cache hit for {}", entry.symbol);
            return Ok(Arc::clone(curve));
        }

        let record = self
            .tables
            .get(&key)
            .map(|&i| &self.data.attenuation[i])
            .ok_or_else(|| RoentgenError::MaterialNotFound(id.to_string()))?;
        let curve = Arc::new(AttenuationCurve::from_table(
            entry.symbol.as_str(),
            entry.name.as_str(),
            &record.energy,
            &record.mu_over_rho,
        )?);

        let mut curves = self.curves.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(curves.entry(key).or_insert(curve)))
    }
}

fn index_by(entries: &[CatalogEntry], key: fn(&CatalogEntry) -> &str) -> HashMap<String, usize> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| (key(e).to_lowercase(), i))
        .collect()
}

fn read_table(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        RoentgenError::DataError(format!("cannot read {}: {e}", path.display()))
    })
}

fn read_optional(dir: &Path, file: &str) -> Result<Option<String>> {
    let path = dir.join(file);
    if path.is_file() {
        read_table(&path).map(Some)
    } else {
        log::warn!("{} has no {file}; continuing without it", dir.display());
        Ok(None)
    }
}
