/// Planck's constant (J·s)
pub const PLANCK: f64 = 6.62607015e-34;

/// Speed of light in vacuum (m/s)
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Elementary charge (C)
pub const ELEMENTARY_CHARGE: f64 = 1.602176634e-19;

/// Boltzmann constant (J/K)
pub const BOLTZMANN: f64 = 1.380649e-23;

/// Specific gas constant of dry air (J/(kg·K))
pub const R_DRY_AIR: f64 = 287.058;

/// Offset (keV) subtracted from the first of two repeated tabulated energies
/// at an absorption edge. Equal to 1e-3 eV.
pub const EDGE_EPSILON_KEV: f64 = 1e-6;

/// Conversion from the MeV energies of the attenuation tables to keV.
pub const KEV_PER_MEV: f64 = 1000.0;
