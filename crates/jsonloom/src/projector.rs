//! The driver loop: pulls tokens, advances traversal, feeds the assembler,
//! and yields completed records one at a time.

use crate::{
    assembler::Assembler,
    error::ProjectError,
    schema::Schema,
    token::{Token, TokenSource},
    tracker::{PathTracker, ScalarRole},
    value::{Record, Scalar},
};

/// A streaming projection over a token source.
///
/// Each call to [`next_record`](Projector::next_record) advances the token
/// stream until a completed record is produced or the stream ends. The
/// projector holds O(nesting depth + schema size) state regardless of
/// document size; no input element is retained beyond its own traversal.
///
/// After an error or end of stream the projector is fused: further calls
/// return `Ok(None)`.
///
/// # Examples
///
/// ```
/// use jsonloom::{Projector, Scalar, Scanner, Schema};
///
/// let schema = Schema::compile([
///     ("id", ".[].ID"),
///     ("token", ".[].TOKENS[]"),
/// ])
/// .unwrap();
/// let scanner = Scanner::from_text(r#"[{"ID":"1","TOKENS":["x","y"]}]"#);
/// let mut projector = Projector::new(schema, scanner);
///
/// let record = projector.next_record().unwrap().unwrap();
/// assert_eq!(record["id"], Scalar::String("1".to_string()));
/// assert_eq!(record["token"], Scalar::String("x".to_string()));
///
/// let record = projector.next_record().unwrap().unwrap();
/// assert_eq!(record["token"], Scalar::String("y".to_string()));
///
/// assert!(projector.next_record().unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct Projector<S> {
    source: S,
    schema: Schema,
    tracker: PathTracker,
    assembler: Assembler,
    done: bool,
}

impl<S: TokenSource> Projector<S> {
    /// Creates a projector applying `schema` to `source`.
    #[must_use]
    pub fn new(schema: Schema, source: S) -> Self {
        Self {
            source,
            schema,
            tracker: PathTracker::new(),
            assembler: Assembler::new(),
            done: false,
        }
    }

    /// The compiled schema this projector applies.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Advances the stream until a record completes or the stream ends.
    ///
    /// Returns `Ok(Some(record))` for each completed record, in the order
    /// their completing values appear in the stream, and `Ok(None)` at end
    /// of stream.
    ///
    /// # Errors
    ///
    /// Returns a [`ProjectError`] on token-source failures and on streaming
    /// correctness violations (incomplete record, collision, skipped
    /// elements, unsupported scalar, unbalanced close). Any error fuses the
    /// projector.
    pub fn next_record(&mut self) -> Result<Option<Record>, ProjectError> {
        if self.done {
            return Ok(None);
        }
        let result = self.pump();
        if !matches!(result, Ok(Some(_))) {
            self.done = true;
        }
        result
    }

    fn pump(&mut self) -> Result<Option<Record>, ProjectError> {
        loop {
            match self.source.next_token()? {
                Token::Eof => {
                    self.assembler.finish(&self.schema)?;
                    return Ok(None);
                }
                Token::ObjectBegin => {
                    self.tracker.begin_object();
                    self.check_boundary()?;
                }
                Token::ArrayBegin => {
                    self.tracker.begin_array();
                    self.check_boundary()?;
                }
                Token::ObjectEnd | Token::ArrayEnd => {
                    self.tracker.end_container()?;
                    self.check_boundary()?;
                }
                Token::Scalar(scalar) => match self.tracker.role() {
                    ScalarRole::Key => match scalar {
                        Scalar::String(key) => self.tracker.set_key(key),
                        other => {
                            return Err(ProjectError::InvalidKey { kind: other.kind() });
                        }
                    },
                    ScalarRole::Value => {
                        let emitted =
                            self.assembler.bind(&self.schema, self.tracker.frames(), scalar)?;
                        self.tracker.value_consumed();
                        if let Some(record) = emitted {
                            return Ok(Some(record));
                        }
                    }
                },
            }
        }
    }

    fn check_boundary(&mut self) -> Result<(), ProjectError> {
        self.assembler
            .check_boundary(self.tracker.depth(), &self.schema)
    }
}

impl<S: TokenSource> Iterator for Projector<S> {
    type Item = Result<Record, ProjectError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
