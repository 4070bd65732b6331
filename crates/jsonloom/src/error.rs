//! Error types for schema compilation, tokenization, and projection.

use thiserror::Error;

/// Errors rejecting a schema at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A source path pattern does not begin with `.`.
    #[error("path pattern {0:?} does not start with '.'")]
    MissingLeadingDot(String),
    /// A source path pattern contains an empty step, e.g. `.A..B`.
    #[error("path pattern {0:?} contains an empty step")]
    EmptyStep(String),
    /// A step could not be parsed as an object key or array step.
    #[error("path pattern {pattern:?} has an invalid step {step:?}")]
    InvalidStep {
        /// The full pattern source text.
        pattern: String,
        /// The offending step.
        step: String,
    },
    /// The pattern has no steps at all.
    #[error("empty path pattern")]
    EmptyPattern,
    /// Two schema entries share a destination key.
    #[error("duplicate destination key {0:?}")]
    DuplicateDestination(String),
    /// The schema contains no entries.
    #[error("schema has no entries")]
    EmptySchema,
}

/// Errors raised by a token source.
///
/// End of stream is not an error; token sources report it with a
/// distinguished token instead.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The underlying reader failed.
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
    /// An unexpected character outside any string.
    #[error("invalid character {ch:?} at {line}:{column}")]
    InvalidCharacter {
        /// The offending character.
        ch: char,
        /// 1-based line of the character.
        line: usize,
        /// 1-based column of the character.
        column: usize,
    },
    /// A malformed escape sequence inside a string.
    #[error("invalid escape sequence at {line}:{column}")]
    InvalidEscape {
        /// 1-based line of the escape introducer.
        line: usize,
        /// 1-based column of the escape introducer.
        column: usize,
    },
    /// A `\uXXXX` escape encoding half of a surrogate pair without its mate.
    #[error("lone surrogate \\u{value:04X} at {line}:{column}")]
    LoneSurrogate {
        /// The unpaired surrogate code unit.
        value: u16,
        /// 1-based line of the escape.
        line: usize,
        /// 1-based column of the escape.
        column: usize,
    },
    /// String content that is not valid UTF-8.
    #[error("invalid UTF-8 in string starting at {line}:{column}")]
    InvalidUtf8 {
        /// 1-based line of the opening quote.
        line: usize,
        /// 1-based column of the opening quote.
        column: usize,
    },
    /// A number token that does not parse.
    #[error("invalid number {text:?} at {line}:{column}")]
    InvalidNumber {
        /// The lexed number text.
        text: String,
        /// 1-based line of the first digit.
        line: usize,
        /// 1-based column of the first digit.
        column: usize,
    },
    /// A string that was still open when the input ended.
    #[error("unterminated string starting at {line}:{column}")]
    UnterminatedString {
        /// 1-based line of the opening quote.
        line: usize,
        /// 1-based column of the opening quote.
        column: usize,
    },
    /// The input ended in the middle of a token.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}

/// Fatal errors surfaced while projecting records out of a token stream.
///
/// Incomplete records, collisions, and skipped elements indicate either a
/// malformed input or a schema that does not match the document shape.
/// Silently continuing would emit corrupt records, so the projector fails
/// loudly and fuses.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The token source failed.
    #[error(transparent)]
    Read(#[from] TokenError),
    /// A record scope closed before every destination key was bound.
    #[error("incomplete record: missing {missing:?}")]
    IncompleteRecord {
        /// Destination keys that never received a value.
        missing: Vec<String>,
    },
    /// A non-multi destination key was bound twice before a record was
    /// emitted.
    #[error("collision on destination key {destination:?} at {path}")]
    Collision {
        /// The destination key bound twice.
        destination: String,
        /// Rendered concrete path of the second binding.
        path: String,
    },
    /// A record scope closed with multi bindings that were overwritten
    /// before they could complete a record.
    #[error("skipped elements {paths:?} - input out of order?")]
    SkippedElements {
        /// Rendered concrete paths of the skipped bindings.
        paths: Vec<String>,
    },
    /// A schema pattern matched a scalar that is not a string; all projected
    /// values are text in the current design.
    #[error("unsupported {kind} scalar at {path}")]
    UnsupportedScalar {
        /// The scalar's type label.
        kind: &'static str,
        /// Rendered concrete path of the match.
        path: String,
    },
    /// A non-string scalar arrived in object key position.
    #[error("object key is not a string (got {kind})")]
    InvalidKey {
        /// The scalar's type label.
        kind: &'static str,
    },
    /// A close delimiter arrived with no open container.
    #[error("close delimiter with no open container")]
    UnbalancedClose,
}
