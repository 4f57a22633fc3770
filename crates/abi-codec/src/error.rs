// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types shared by the schema loader and the codecs.

use thiserror::Error;

/// Category of an [`AbiError`].
///
/// Callers that only care about *why* a conversion failed (and not the
/// exact message) should match on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Binary input ended early, carried extra bytes, or is otherwise corrupt.
    MalformedInput,
    /// Numeric literal outside the target type's bounds.
    OutOfRange,
    /// Literal text that cannot be parsed for the target type.
    InvalidLiteral,
    /// Fixed-size block given with the wrong length.
    SizeMismatch,
    /// Schema problem: bad version, unknown type, bad variant tag, ...
    Schema,
    /// Required struct field absent from the input object.
    MissingField,
    /// JSON value of the wrong shape for the target type.
    TypeMismatch,
    /// Schema document is not valid JSON.
    Json,
}

/// Errors returned by schema loading and encode/decode.
///
/// Every failure aborts the whole top-level call; no partial output is
/// ever returned alongside an error.
#[derive(Debug, Error)]
pub enum AbiError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("number is out of range: {0}")]
    OutOfRange(String),

    #[error("invalid literal: {0}")]
    InvalidLiteral(String),

    #[error("size mismatch: expected {expected} hex digits, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("schema error: {0}")]
    Schema(String),

    #[error("missing field: {0}")]
    MissingField(String),

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AbiError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedInput(_) => ErrorKind::MalformedInput,
            Self::OutOfRange(_) => ErrorKind::OutOfRange,
            Self::InvalidLiteral(_) => ErrorKind::InvalidLiteral,
            Self::SizeMismatch { .. } => ErrorKind::SizeMismatch,
            Self::Schema(_) => ErrorKind::Schema,
            Self::MissingField(_) => ErrorKind::MissingField,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::Json(_) => ErrorKind::Json,
        }
    }

    pub(crate) fn read_past_end() -> Self {
        Self::MalformedInput("read past end of buffer".into())
    }

    pub(crate) fn mismatch(expected: &str, found: &serde_json::Value) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            found: json_kind(found).to_string(),
        }
    }
}

/// Short description of a JSON value's shape, for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, AbiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            AbiError::read_past_end().kind(),
            ErrorKind::MalformedInput
        );
        assert_eq!(
            AbiError::SizeMismatch {
                expected: 64,
                actual: 2
            }
            .kind(),
            ErrorKind::SizeMismatch
        );
        assert_eq!(
            AbiError::mismatch("object", &json!([1])).kind(),
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn test_display() {
        let err = AbiError::mismatch("string", &json!(true));
        assert_eq!(
            err.to_string(),
            "type mismatch: expected string, found boolean"
        );
        assert_eq!(
            AbiError::read_past_end().to_string(),
            "malformed input: read past end of buffer"
        );
    }
}
