use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoentgenError {
    /// The identifier is neither a known element nor a known compound.
    #[error("material not found: {0}")]
    MaterialNotFound(String),

    /// A material, stack or response was built from the wrong kind of input.
    #[error("invalid material specifier: {0}")]
    InvalidSpecifier(String),

    #[error("energy {energy} keV out of range [{min}, {max}] keV")]
    EnergyOutOfRange { energy: f64, min: f64, max: f64 },

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("unknown edge '{edge}' for element '{element}'")]
    UnknownEdge { element: String, edge: String },

    #[error("no nuclide {element}-{mass_number}; valid mass numbers are {valid:?}")]
    UnknownNuclide {
        element: String,
        mass_number: u16,
        valid: Vec<u16>,
    },

    #[error("data error: {0}")]
    DataError(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RoentgenError>;
