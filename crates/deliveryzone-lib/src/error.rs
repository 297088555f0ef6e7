use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the delivery zone library.
pub type Result<T> = std::result::Result<T, Error>;

/// Which half of a coordinate failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateField {
    Latitude,
    Longitude,
}

impl std::fmt::Display for CoordinateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateField::Latitude => write!(f, "latitude"),
            CoordinateField::Longitude => write!(f, "longitude"),
        }
    }
}

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a latitude or longitude is non-finite or outside its valid range.
    #[error("invalid {field}: {value} (expected {})", expected_range(.field))]
    InvalidCoordinate { field: CoordinateField, value: f64 },

    /// Raised when delivery settings fail validation at load time.
    #[error("invalid delivery settings: {message}")]
    InvalidSettings { message: String },

    /// Raised when two zones in the same settings file share an identifier.
    #[error("duplicate zone id encountered: {id}")]
    DuplicateZoneId { id: String },

    /// Settings file could not be located at the resolved path.
    #[error("delivery settings not found at {path}")]
    SettingsNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for delivery settings")]
    ConfigDirsUnavailable,

    /// Raised when a geocoding provider answers with a payload we cannot use.
    #[error("geocoding failed: {message}")]
    Geocoding { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// True when the error stems from caller-supplied input rather than I/O.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidCoordinate { .. })
    }
}

fn expected_range(field: &CoordinateField) -> &'static str {
    match field {
        CoordinateField::Latitude => "a finite value between -90 and 90",
        CoordinateField::Longitude => "a finite value between -180 and 180",
    }
}
