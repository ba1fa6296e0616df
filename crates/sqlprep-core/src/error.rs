//! Error types for template preparation.

use crate::scanner::PlaceholderKind;

/// Errors returned by [`Preparer::prepare`](crate::Preparer::prepare).
///
/// Every variant aborts the whole call; no partially substituted SQL is ever
/// returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrepareError {
    /// The number of placeholders differs from the number of parameters.
    #[error(
        "template has {placeholders} placeholder(s) but {params} parameter(s) were supplied: {template}"
    )]
    PlaceholderCountMismatch {
        /// Placeholders found in the template.
        placeholders: usize,
        /// Parameters supplied by the caller.
        params: usize,
        /// The offending template.
        template: String,
    },

    /// A dispatcher was handed a kind letter it does not support.
    ///
    /// The scanner never produces this: `?` followed by a letter outside the
    /// kind set is plain text.
    #[error("unknown placeholder kind `?{kind}` at byte {position}: {template}")]
    UnknownPlaceholderKind {
        /// The letter following the `?`.
        kind: char,
        /// Byte offset of the `?` in the template.
        position: usize,
        /// The offending template.
        template: String,
    },

    /// A parameter does not have the shape its placeholder requires.
    #[error("parameter {index} for `{kind}` expects {expected}, found {found}: {template}")]
    TypeMismatch {
        /// Zero-based parameter index.
        index: usize,
        /// The placeholder kind the parameter was paired with.
        kind: PlaceholderKind,
        /// What the placeholder accepts.
        expected: &'static str,
        /// What was supplied.
        found: &'static str,
        /// The offending template.
        template: String,
    },

    /// A table or column name failed the identifier grammar.
    #[error("parameter {index} for `{kind}` is not a valid identifier: {name:?}")]
    InvalidIdentifier {
        /// Zero-based parameter index.
        index: usize,
        /// The placeholder kind the parameter was paired with.
        kind: PlaceholderKind,
        /// The rejected name.
        name: String,
        /// The offending template.
        template: String,
    },

    /// The configured table prefix is not a valid identifier.
    #[error("table prefix is not a valid identifier: {prefix:?}")]
    InvalidPrefix {
        /// The rejected prefix.
        prefix: String,
    },
}

/// Errors returned by the type dispatcher for a single placeholder.
///
/// These carry no template context; [`SubstituteError::at`] attaches it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubstituteError {
    /// The value shape does not match the placeholder kind.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        /// What the placeholder accepts.
        expected: &'static str,
        /// What was supplied.
        found: &'static str,
    },

    /// The name failed the identifier grammar.
    #[error("invalid identifier: {name:?}")]
    InvalidIdentifier {
        /// The rejected name.
        name: String,
    },
}

impl SubstituteError {
    pub(crate) const fn mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch { expected, found }
    }

    pub(crate) fn invalid_identifier(name: impl Into<String>) -> Self {
        Self::InvalidIdentifier { name: name.into() }
    }

    /// Attaches the parameter position, placeholder kind and template.
    #[must_use]
    pub fn at(self, index: usize, kind: PlaceholderKind, template: &str) -> PrepareError {
        let template = String::from(template);
        match self {
            Self::TypeMismatch { expected, found } => PrepareError::TypeMismatch {
                index,
                kind,
                expected,
                found,
                template,
            },
            Self::InvalidIdentifier { name } => PrepareError::InvalidIdentifier {
                index,
                kind,
                name,
                template,
            },
        }
    }
}

/// Result type for preparation.
pub type Result<T> = std::result::Result<T, PrepareError>;
