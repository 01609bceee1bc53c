//! Error types for mathdoc-inst.
//!
//! Construction is the only fallible operation in the model: every node is
//! validated once, when it is built, and is read-only afterwards.

use thiserror::Error;

use crate::style::ShapeAttr;

/// Errors raised when a node, primitive, or style value is constructed from
/// invalid arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A required string field is empty
    #[error("{node}: missing required {field}")]
    MissingField {
        /// Node kind being constructed
        node: &'static str,
        /// Field that was missing
        field: &'static str,
    },

    /// A collection that must hold at least one element is empty
    #[error("{node}: {field} must not be empty")]
    EmptyCollection {
        /// Node kind being constructed
        node: &'static str,
        /// Collection that was empty
        field: &'static str,
    },

    /// Parallel arrays have different lengths
    #[error("{node}: coordinate arrays differ in length ({left} vs {right})")]
    LengthMismatch {
        /// Node kind being constructed
        node: &'static str,
        /// Length of the first array
        left: usize,
        /// Length of the second array
        right: usize,
    },

    /// A table row does not have the same number of cells as the first row
    #[error("table row {row} has {found} cells, expected {expected}")]
    RaggedTable {
        /// Zero-based index of the offending row
        row: usize,
        /// Column count of the first row
        expected: usize,
        /// Column count of the offending row
        found: usize,
    },

    /// A rectangle shape attribute kind is not legal in the role it was given
    #[error("unsupported attribute '{attr}' to specify {role}")]
    UnsupportedShapeAttribute {
        /// What the attribute was meant to specify
        role: &'static str,
        /// The attribute kind supplied
        attr: ShapeAttr,
    },

    /// An integral parameter is outside its legal range
    #[error("{node}: {field} out of range: {value}")]
    OutOfRange {
        /// Node kind being constructed
        node: &'static str,
        /// Parameter name
        field: &'static str,
        /// Value supplied
        value: i64,
    },

    /// A caller-supplied tag is not a well-formed XML element name
    #[error("{node}: '{name}' is not a valid element name")]
    InvalidElementName {
        /// Node kind being constructed
        node: &'static str,
        /// The rejected name
        name: String,
    },
}

/// Result type alias for node construction.
pub type BuildResult<T> = Result<T, BuildError>;

impl BuildError {
    /// Create a missing-field error.
    pub fn missing(node: &'static str, field: &'static str) -> Self {
        Self::MissingField { node, field }
    }

    /// Create an empty-collection error.
    pub fn empty(node: &'static str, field: &'static str) -> Self {
        Self::EmptyCollection { node, field }
    }
}

/// Reject an empty required string.
pub(crate) fn require_text(node: &'static str, field: &'static str, value: &str) -> BuildResult<()> {
    if value.is_empty() {
        let err = BuildError::missing(node, field);
        crate::log::debug!(%err, "rejected construction");
        return Err(err);
    }
    Ok(())
}

/// Reject a tag that could not be written as an element name: it must start
/// with an ASCII letter or `_` and continue with letters, digits, `-`, `_`
/// or `.`.
pub(crate) fn require_element_name(node: &'static str, name: &str) -> BuildResult<()> {
    let mut chars = name.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if !valid {
        let err = BuildError::InvalidElementName {
            node,
            name: name.to_owned(),
        };
        crate::log::debug!(%err, "rejected construction");
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BuildError::missing("input", "name");
        assert_eq!(err.to_string(), "input: missing required name");

        let err = BuildError::RaggedTable { row: 2, expected: 3, found: 1 };
        assert_eq!(err.to_string(), "table row 2 has 1 cells, expected 3");

        let err = BuildError::UnsupportedShapeAttribute {
            role: "X coordinate of first corner",
            attr: ShapeAttr::R,
        };
        assert_eq!(err.to_string(), "unsupported attribute 'r' to specify X coordinate of first corner");
    }

    #[test]
    fn test_require_text() {
        assert!(require_text("image", "source", "a.png").is_ok());
        assert_eq!(
            require_text("image", "source", ""),
            Err(BuildError::missing("image", "source"))
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BuildError>();
    }

    #[test]
    fn test_require_element_name() {
        for ok in ["solution", "x-step", "_a.b2"] {
            assert!(require_element_name("column", ok).is_ok(), "{ok}");
        }
        for bad in ["", "2col", "a b", "p><script", "a\"b", "-x"] {
            assert_eq!(
                require_element_name("column", bad).unwrap_err(),
                BuildError::InvalidElementName {
                    node: "column",
                    name: bad.to_owned()
                }
            );
        }
    }
}
