//! The canonical token stream consumed by the projection engine.

use crate::{error::TokenError, value::Scalar};

/// A single event from a token source.
///
/// The stream is strictly ordered; structural delimiters carry no payload
/// and scalars arrive fully decoded. `Eof` is a distinguished token rather
/// than an error so that callers can tell a clean end of stream from a
/// failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `{`: an object opens.
    ObjectBegin,
    /// `}`: the innermost object closes.
    ObjectEnd,
    /// `[`: an array opens.
    ArrayBegin,
    /// `]`: the innermost array closes.
    ArrayEnd,
    /// A scalar value or object key; keys are string scalars classified by
    /// position.
    Scalar(Scalar),
    /// End of the token stream.
    Eof,
}

/// A pull source of canonical JSON tokens.
///
/// The engine consumes any `TokenSource`; [`crate::Scanner`] is the bundled
/// implementation over a buffered reader. Implementations must keep
/// returning [`Token::Eof`] once the stream has ended.
pub trait TokenSource {
    /// Returns the next token, blocking on the underlying input if needed.
    ///
    /// # Errors
    ///
    /// Returns a [`TokenError`] when the input cannot be tokenized; the
    /// caller is expected to stop pulling afterwards.
    fn next_token(&mut self) -> Result<Token, TokenError>;
}
