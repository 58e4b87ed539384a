//! Core error types shared across the mal workspace.
//!
//! Each crate boundary gets its own `thiserror` enum with a matching
//! `Result` alias, following the one-enum-per-domain convention used
//! throughout this workspace.

use thiserror::Error;

/// Errors raised while tokenizing raw source text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A string literal was opened with `"` but never closed before EOF.
    #[error("unbalanced quote")]
    UnterminatedString,
}

/// Errors raised while parsing a token stream into a value tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// A `(`, `[`, or `{` was never matched by its closing delimiter.
    #[error("unbalanced parenthesis")]
    UnbalancedParenthesis,

    /// The token stream was empty, or exhausted earlier than a form's
    /// grammar required.
    #[error("underflow")]
    Underflow,

    /// A `{...}` hash-map literal used a key that is not a string or
    /// keyword.
    #[error("expected hash-map key to be a string or keyword")]
    KeyIsNotString,

    /// A `{...}` hash-map literal had an odd number of forms (a key with
    /// no matching value).
    #[error("odd number of hash-map arguments")]
    UnevenHashMap,

    /// Failure while tokenizing the source underlying this read.
    #[error(transparent)]
    Lex(#[from] LexError),
}

/// Result alias for tokenization.
pub type LexResult<T> = std::result::Result<T, LexError>;

/// Result alias for reading (parsing).
pub type ReadResult<T> = std::result::Result<T, ReadError>;
