//! Error types for tagsql

use thiserror::Error;

/// Result type alias for tagsql operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for query building and modifier lookup
#[derive(Debug, Error)]
pub enum OrmError {
    /// The SELECT shape cannot produce a column list
    #[error("invalid select shape `{type_name}`: {reason}")]
    InvalidSelectShape {
        type_name: &'static str,
        reason: String,
    },

    /// The shape introspector failed for a type
    #[error("error reading the column mapping of `{type_name}`: {source}")]
    ShapeIntrospection {
        type_name: &'static str,
        #[source]
        source: Box<OrmError>,
    },

    /// A condition template has a different number of `%s` slots than bound params
    #[error("condition '{condition}' has {expected} placeholder slot(s) but {got} param(s)")]
    ParamCountMismatch {
        condition: String,
        expected: usize,
        got: usize,
    },

    /// A Rust value does not fit any parameter representation
    #[error("conversion error: {0}")]
    Conversion(String),

    /// No built-in dialect for the given driver name
    #[error("unsupported driver `{0}`")]
    UnsupportedDriver(String),

    /// A modifier key is already registered
    #[error("cannot register modifier '{0}': name is already in use")]
    ModifierCollision(String),

    /// No modifier registered under the key
    #[error("no modifier found with name '{0}'")]
    ModifierNotFound(String),

    /// A modifier hook rejected its input
    #[error("modifier '{key}' failed: {message}")]
    Modifier { key: String, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl OrmError {
    /// Create an invalid select shape error
    pub fn invalid_shape(type_name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSelectShape {
            type_name,
            reason: reason.into(),
        }
    }

    /// Create a modifier hook error
    pub fn modifier(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Modifier {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Check if this is a modifier lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ModifierNotFound(_))
    }

    /// Check if this is a modifier key collision
    pub fn is_collision(&self) -> bool {
        matches!(self, Self::ModifierCollision(_))
    }
}

impl From<serde_json::Error> for OrmError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
