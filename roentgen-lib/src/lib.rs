//! X-ray transmission and absorption of materials.
//!
//! ```no_run
//! use roentgen::{Catalog, Material, Thickness};
//!
//! let catalog = Catalog::bundled()?;
//! let si = Material::new(&catalog, "Si", Thickness::from_um(500.0), None)?;
//! let t = si.transmission(10.0)?;
//! # Ok::<(), roentgen::RoentgenError>(())
//! ```

pub(crate) mod bundled;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod continuum;
pub mod curve;
pub mod error;
pub mod interp;
pub mod lines;
pub mod material;
pub mod nuclides;
pub mod parsers;
pub mod response;
pub mod stack;
pub mod units;

pub use catalog::{Catalog, CatalogEntry};
pub use config::{CatalogConfig, DetectorConfig, InstrumentConfig, LayerConfig};
pub use curve::AttenuationCurve;
pub use error::{Result, RoentgenError};
pub use lines::{AbsorptionEdge, EmissionLine};
pub use material::{Component, Material, MaterialSpec};
pub use nuclides::{Nuclide, NuclideLibrary, NuclideLine};
pub use response::{Detector, Response};
pub use stack::{OpticalPath, Stack};
pub use units::{Density, Thickness, density_ideal_gas};
pub use roentgen_data;
