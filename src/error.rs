//! Error types for media type parsing and charset resolution.

use thiserror::Error;

/// Errors produced while parsing a media type string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input does not start with `type "/" subtype`.
    #[error("No subtype found for: \"{0}\"")]
    NoSubtype(String),

    /// A `;`-delimited segment after the type/subtype is not `name=value`.
    #[error("Parameter is not formatted correctly: \"{remainder}\" for: \"{input}\"")]
    MalformedParameter {
        /// Unparsed text starting at the offending segment.
        remainder: String,
        /// The full input.
        input: String,
    },
}

/// Errors reported by a [`CharsetResolver`](crate::charset::CharsetResolver).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CharsetError {
    /// The name does not follow the charset naming rules.
    #[error("Illegal charset name: {0:?}")]
    IllegalName(String),

    /// The name is legal but no charset is registered under it.
    #[error("Unsupported charset: {0:?}")]
    Unsupported(String),

    /// An alias is already bound to another charset.
    #[error("Charset alias {alias:?} is already bound to {existing}")]
    AliasConflict {
        /// The alias being registered.
        alias: String,
        /// Canonical name of the charset currently holding the alias.
        existing: String,
    },
}

/// Specialized Result type, defaulting to [`ParseError`].
pub type Result<T, E = ParseError> = std::result::Result<T, E>;
