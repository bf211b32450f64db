//! Error types for the mockwire library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::PlanKey;

/// Comprehensive error type for plan store and resolver operations.
///
/// Lookups that find nothing are not errors: they surface as `bool` or
/// `Option` results so callers must check them explicitly.
#[derive(Error, Debug)]
pub enum MockError {
    /// A plan with the same project and plan name already exists
    #[error("Mock plan already exists: {key}")]
    AlreadyExists { key: PlanKey },
    /// Template name is already taken by another mock type in the plan
    #[error("Template name '{template}' already exists in mock plan {key}")]
    DuplicateTemplateName { template: String, key: PlanKey },
    /// A substitute instance could not be constructed
    #[error("Cannot build instance of '{type_id}': {reason}")]
    Build { type_id: String, reason: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> MockError {
        MockError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

/// Builder for instance construction errors.
pub struct BuildErrorBuilder {
    type_id: String,
}

impl BuildErrorBuilder {
    /// Create a new build error builder for a type.
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> MockError {
        MockError::Build {
            type_id: self.type_id,
            reason: reason.into(),
        }
    }
}

impl MockError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a builder for construction errors.
    pub fn build(type_id: impl Into<String>) -> BuildErrorBuilder {
        BuildErrorBuilder::new(type_id)
    }

    /// Returns true for rejected-before-mutation conflicts.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            MockError::AlreadyExists { .. } | MockError::DuplicateTemplateName { .. }
        )
    }
}

/// Failure to assign a single field through [`crate::MockObject::set_field`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// The type declares no field with this name
    #[error("no field named '{0}'")]
    UnknownField(String),
    /// The value's runtime type does not fit the field
    #[error("field '{field}' expects {expected}")]
    TypeMismatch { field: String, expected: String },
}

/// Result type alias for mockwire operations
pub type Result<T> = std::result::Result<T, MockError>;
