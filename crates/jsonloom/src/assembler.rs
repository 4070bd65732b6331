//! Record assembly: binding matched values, detecting completion and
//! collisions, and resetting at record-scope boundaries.
//!
//! The assembler owns the record context. It cannot locally distinguish
//! "more multi bindings coming" from "record scope done", so completeness
//! and skip diagnostics are checked when traversal leaves the boundary
//! scope, not at binding time.

use std::mem;

use tracing::trace;

use crate::{
    error::ProjectError,
    path::{Frame, render},
    schema::Schema,
    value::{Record, Scalar},
};

#[derive(Debug, Default)]
pub(crate) struct Assembler {
    record: Record,
    /// Entry indices in binding order.
    seen: Vec<usize>,
    /// Rendered paths of multi bindings overwritten before completing a
    /// record.
    skipped: Vec<String>,
    /// Sticky: set once every destination key is present, stays set while
    /// further multi bindings emit from the same scope.
    full: bool,
}

impl Assembler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Offers a value at a concrete path. Returns an emitted record
    /// snapshot when the binding completes one.
    pub(crate) fn bind(
        &mut self,
        schema: &Schema,
        path: &[Frame],
        scalar: Scalar,
    ) -> Result<Option<Record>, ProjectError> {
        let Some((index, entry)) = schema.lookup(path) else {
            return Ok(None);
        };
        if !scalar.is_string() {
            return Err(ProjectError::UnsupportedScalar {
                kind: scalar.kind(),
                path: render(path),
            });
        }

        let mut just_skipped = false;
        if self.record.contains_key(entry.destination()) {
            if entry.is_multi() {
                // The same multi target bound twice before emission:
                // iteration reached the next match while the previous one
                // was never consumed by a completed record.
                self.skipped.push(render(path));
                just_skipped = true;
            } else {
                return Err(ProjectError::Collision {
                    destination: entry.destination().to_string(),
                    path: render(path),
                });
            }
        }

        trace!(destination = entry.destination(), path = %render(path), "bound value");
        self.record.insert(entry.destination().to_string(), scalar);
        self.seen.push(index);
        if self.record.len() == schema.len() {
            self.full = true;
        }

        if self.full {
            if just_skipped {
                // Subsumed by the completion we are about to emit.
                self.skipped.pop();
            }
            trace!(bindings = self.seen.len(), "record complete");
            return Ok(Some(self.record.clone()));
        }
        Ok(None)
    }

    /// Runs the record-boundary check after a structural event. `depth` is
    /// the traversal depth after the event was applied.
    pub(crate) fn check_boundary(
        &mut self,
        depth: usize,
        schema: &Schema,
    ) -> Result<(), ProjectError> {
        if depth >= schema.boundary_depth() {
            return Ok(());
        }
        self.leave_scope(schema)
    }

    /// End-of-stream check: whatever scope was open is now closed.
    pub(crate) fn finish(&mut self, schema: &Schema) -> Result<(), ProjectError> {
        self.leave_scope(schema)
    }

    fn leave_scope(&mut self, schema: &Schema) -> Result<(), ProjectError> {
        if self.record.is_empty() {
            return Ok(());
        }
        if !self.full {
            let missing = schema
                .entries()
                .iter()
                .map(|entry| entry.destination())
                .filter(|destination| !self.record.contains_key(*destination))
                .map(str::to_string)
                .collect();
            return Err(ProjectError::IncompleteRecord { missing });
        }
        if !self.skipped.is_empty() {
            return Err(ProjectError::SkippedElements {
                paths: mem::take(&mut self.skipped),
            });
        }
        trace!(bindings = self.seen.len(), "record scope closed, context reset");
        self.record.clear();
        self.seen.clear();
        self.full = false;
        Ok(())
    }
}
