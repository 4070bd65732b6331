//! A streaming JSON projection engine.
//!
//! `jsonloom` reads a single JSON document of unbounded size as a token
//! stream and emits flat records whose fields are selected by a schema of
//! path patterns. The canonical use case is a top-level array of objects,
//! each carrying an inner array too large to materialize: the engine
//! cross-joins the outer scalar fields with every inner element, producing
//! one record per element while holding only the frame stack and one
//! in-progress record in memory.
//!
//! Patterns are absolute paths with optional wildcard array steps: `.[].ID`
//! selects `ID` from every element of the root array, `.[].TOKENS[]` is a
//! *multi* pattern selecting every element of each inner `TOKENS` array.
//! A schema with a multi pattern emits one record per matching inner
//! element; the non-multi fields are carried into each.
//!
//! # Examples
//!
//! ```
//! use jsonloom::{Projector, Scanner, Schema};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Schema::compile([
//!     ("id", ".[].ID"),
//!     ("name", ".[].NAME"),
//!     ("token", ".[].TOKENS[]"),
//! ])?;
//! let scanner = Scanner::from_text(
//!     r#"[{"ID":"1","NAME":"a","TOKENS":["x","y","z"]}]"#,
//! );
//! let records = Projector::new(schema, scanner).collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(records.len(), 3);
//! assert_eq!(records[2]["token"].as_str(), Some("z"));
//! # Ok(())
//! # }
//! ```
//!
//! The engine is deliberately strict: a record scope that closes with
//! missing fields, a non-wildcard field bound twice, or wildcard bindings
//! arriving out of order all fail loudly instead of emitting corrupt
//! records.

mod assembler;
mod error;
mod path;
mod pattern;
mod projector;
mod scanner;
mod schema;
mod token;
mod tracker;
mod value;

pub use error::{ProjectError, SchemaError, TokenError};
pub use path::{Frame, FrameFrom, Path};
pub use pattern::{Pattern, PatternStep};
pub use projector::Projector;
pub use scanner::Scanner;
pub use schema::{Schema, SchemaEntry};
pub use token::{Token, TokenSource};
pub use value::{Record, Scalar};

/// Builds a concrete [`Path`] from a heterogeneous list of keys and
/// indices.
///
/// ```rust
/// # use jsonloom::{path, Frame};
/// let p = path![0, "TOKENS", 2];
/// assert_eq!(
///     p,
///     vec![
///         Frame::Index(0),
///         Frame::Key("TOKENS".into()),
///         Frame::Index(2),
///     ]
/// );
/// ```
#[macro_export]
macro_rules! path {
    ( $( $elem:expr ),* $(,)? ) => {{
        #[allow(unused_imports)]
        use $crate::FrameFrom;
        ::std::vec![$($crate::Frame::from_frame($elem)),*]
    }};
}
