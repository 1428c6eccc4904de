use thiserror::Error;

/// Shape problem found while validating a reporting feed.
///
/// Every variant carries the field path it refers to, e.g.
/// `transparencyUpdates[2].severity`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("public-reporting.json must be an object")]
    NotAnObject,

    #[error("public-reporting.json missing {0}")]
    Missing(String),

    #[error("public-reporting.json invalid {0}")]
    Invalid(String),
}

impl SchemaViolation {
    /// Field path of the violation; empty for the top-level value.
    pub fn path(&self) -> &str {
        match self {
            SchemaViolation::NotAnObject => "",
            SchemaViolation::Missing(p) | SchemaViolation::Invalid(p) => p,
        }
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Schema(#[from] SchemaViolation),

    #[error("import precondition failed: {0}")]
    ImportPrecondition(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("time format error: {0}")]
    TimeFormat(#[from] time::error::Format),
}

pub type CoreResult<T> = Result<T, CoreError>;
