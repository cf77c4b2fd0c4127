use thiserror::Error;

/// Failures while loading explorer content. None of these are fatal:
/// the loading systems log them and continue with partial content.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("scene manifest '{path}' failed to load: {reason}")]
    Manifest { path: String, reason: String },

    #[error("dataset '{path}' failed to load: {reason}")]
    Dataset { path: String, reason: String },

    #[error("reference mesh '{path}' failed to load: {reason}")]
    ReferenceMesh { path: String, reason: String },

    #[error("reference mesh '{path}' contains no geometry")]
    EmptyReferenceMesh { path: String },
}

/// Bounding regions that cannot be framed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegionError {
    #[error("region has no spatial extent")]
    Degenerate,

    #[error("region bounds are not finite")]
    NonFinite,
}

/// Invalid runtime configuration values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },

    #[error("{min_field} ({min}) must not exceed {max_field} ({max})")]
    InvertedRange {
        min_field: &'static str,
        min: f32,
        max_field: &'static str,
        max: f32,
    },
}
