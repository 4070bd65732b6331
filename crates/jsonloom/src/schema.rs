//! Compiled projection schemas.

use tracing::debug;

use crate::{error::SchemaError, path::Frame, pattern::Pattern};

/// One compiled schema entry: a source pattern and the destination key its
/// matches bind to.
#[derive(Debug, Clone)]
pub struct SchemaEntry {
    pattern: Pattern,
    destination: String,
    multi: bool,
}

impl SchemaEntry {
    /// The source path pattern.
    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The destination key this entry populates.
    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Whether the pattern ends in an unbound array step and therefore
    /// binds once per matching element.
    #[must_use]
    pub fn is_multi(&self) -> bool {
        self.multi
    }
}

/// A compiled, immutable projection schema.
///
/// # Examples
///
/// ```
/// use jsonloom::Schema;
///
/// let schema = Schema::compile([
///     ("id", ".[].ID"),
///     ("token", ".[].TOKENS[]"),
/// ])
/// .unwrap();
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.boundary_depth(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    entries: Vec<SchemaEntry>,
    boundary: usize,
}

impl Schema {
    /// Compiles (destination key, source path) pairs into a schema.
    ///
    /// Pair order is preserved; lookups scan entries in order and the first
    /// matching pattern wins.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] when a source path fails to parse, a
    /// destination key repeats, or no pairs are given.
    pub fn compile<I, K, P>(pairs: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: AsRef<str>,
    {
        let mut entries: Vec<SchemaEntry> = Vec::new();
        for (destination, source) in pairs {
            let destination = destination.into();
            let pattern = Pattern::parse(source.as_ref())?;
            if entries.iter().any(|e| e.destination == destination) {
                return Err(SchemaError::DuplicateDestination(destination));
            }
            let multi = pattern.is_multi();
            entries.push(SchemaEntry {
                pattern,
                destination,
                multi,
            });
        }
        if entries.is_empty() {
            return Err(SchemaError::EmptySchema);
        }
        let boundary = entries
            .iter()
            .map(|e| e.pattern.len())
            .min()
            .unwrap_or_default();
        debug!(
            entries = entries.len(),
            boundary, "compiled projection schema"
        );
        Ok(Self { entries, boundary })
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Compiled schemas are never empty; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The compiled entries, in lookup order.
    #[must_use]
    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    /// The record-scope boundary: the shortest pattern length in steps.
    /// When traversal depth drops below this, the current record's
    /// containing scope has been left.
    #[must_use]
    pub fn boundary_depth(&self) -> usize {
        self.boundary
    }

    /// Finds the first entry whose pattern matches the concrete path.
    pub(crate) fn lookup(&self, path: &[Frame]) -> Option<(usize, &SchemaEntry)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.pattern.matches(path))
    }
}
