//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The hierarchy level an identifier was looked up at.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum IdLevel {
    /// A request / expected-response instantiation of a scenario.
    #[display("request")]
    Request,
    /// A named schema definition.
    #[display("type")]
    Type,
}

/// The Global Error Enum.
///
/// Load-time variants (`Io`, `Parse`, `SpecVersion`, `UnresolvedRef`,
/// `DuplicateOperationId`) mean no describer was produced. Every other variant is
/// returned per query or synthesis call.
///
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The description could not be parsed as YAML/JSON or has the wrong shape.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// The description declares a version other than Swagger `2.0`.
    #[from(ignore)]
    #[display("Unsupported specification version: expected swagger '2.0', got '{_0}'")]
    SpecVersion(String),

    /// A `$ref` points outside the document or at nothing.
    #[from(ignore)]
    #[display("Unresolved reference: {_0}")]
    UnresolvedRef(String),

    /// Two method + path pairs produced the same operation identifier.
    #[from(ignore)]
    #[display("Duplicate operationId `{id}`: declared by {first} and {second}")]
    DuplicateOperationId {
        /// The colliding identifier.
        id: String,
        /// `METHOD path` of the operation that claimed the id first.
        first: String,
        /// `METHOD path` of the operation that collided with it.
        second: String,
    },

    /// An identifier that is not present in the index.
    #[from(ignore)]
    #[display("Unknown {level} id `{id}`")]
    UnknownId {
        /// The hierarchy level the id was looked up at.
        level: IdLevel,
        /// The identifier as supplied by the caller.
        id: String,
    },

    /// Malformed synthesis parameters (odd length, bad prefix, unresolved placeholder).
    #[from(ignore)]
    #[display("Parameter Format Error: {_0}")]
    ParamFormat(String),

    /// The HTTP request could not be assembled (method, URL or header).
    #[from(ignore)]
    #[display("Request Build Error: {_0}")]
    RequestBuild(String),

    /// The actual response status differs from the documented one.
    #[from(ignore)]
    #[display("{_0}")]
    StatusMismatch(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

impl AppError {
    /// Shorthand for an unknown request identifier.
    pub fn unknown_request(id: &str) -> Self {
        AppError::UnknownId {
            level: IdLevel::Request,
            id: id.to_string(),
        }
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::NotFound, "missing.yaml");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        // Test that String defaults to General, not Parse
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_duplicate_operation_display() {
        let err = AppError::DuplicateOperationId {
            id: "listPets".into(),
            first: "GET /pets".into(),
            second: "GET /animals".into(),
        };
        assert_eq!(
            err.to_string(),
            "Duplicate operationId `listPets`: declared by GET /pets and GET /animals"
        );
    }

    #[test]
    fn test_unknown_id_names_level() {
        let err = AppError::unknown_request("addPet.999.0");
        assert_eq!(err.to_string(), "Unknown request id `addPet.999.0`");

        let err = AppError::UnknownId {
            level: IdLevel::Type,
            id: "Dog".into(),
        };
        assert_eq!(err.to_string(), "Unknown type id `Dog`");
    }

    #[test]
    fn test_version_display() {
        let err = AppError::SpecVersion("3.0.0".into());
        assert!(err.to_string().contains("got '3.0.0'"));
    }
}
