//! Schema path patterns.
//!
//! Patterns are the schema-side flavor of paths: a `.`-delimited sequence of
//! object and array steps where an array step may leave its index unbound
//! (`[]`) to match any element. A pattern whose *last* step is unbound is a
//! *multi* pattern; it binds many times per record scope and drives the
//! cross-join behavior of the engine.

use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::{error::SchemaError, path::Frame};

/// An object or array step within a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternStep {
    /// Match an object member with this exact key.
    Key(String),
    /// Match an array element at this exact index.
    Index(usize),
    /// Match an array element at any index.
    AnyIndex,
}

/// Splits a textual step into an optional object-key prefix and an array
/// suffix, e.g. `TOKENS[3]`, `[3]`, `[]`.
static ARRAY_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)(\[(\d*)\])$").expect("array suffix regex"));

/// A parsed schema path pattern.
///
/// # Examples
///
/// ```
/// use jsonloom::{Pattern, path};
///
/// let pattern = Pattern::parse(".[].TOKENS[]").unwrap();
/// assert!(pattern.is_multi());
/// assert!(pattern.matches(&path![4, "TOKENS", 0]));
/// assert!(!pattern.matches(&path![4, "TOKENS"]));
/// assert_eq!(pattern.to_string(), ".[].TOKENS[]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    steps: Vec<PatternStep>,
}

impl Pattern {
    /// Parses a pattern from its textual form.
    ///
    /// The source must start with `.` (the document root) followed by one or
    /// more steps. Each step is an object key (`.KEY`), an array step
    /// (`.[3]`, `.[]`), or an object key with an attached array step
    /// (`.KEY[3]`, `.KEY[]`).
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] when the source is missing the leading dot,
    /// contains an empty step, or a step is neither a bracket-free key nor a
    /// valid array step.
    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        let mut parts = text.split('.');
        if parts.next() != Some("") {
            return Err(SchemaError::MissingLeadingDot(text.to_string()));
        }

        let mut steps = Vec::new();
        for part in parts {
            if part.is_empty() {
                return Err(SchemaError::EmptyStep(text.to_string()));
            }
            let invalid = || SchemaError::InvalidStep {
                pattern: text.to_string(),
                step: part.to_string(),
            };
            if let Some(caps) = ARRAY_SUFFIX.captures(part) {
                let prefix = &caps[1];
                if !prefix.is_empty() {
                    if prefix.contains(['[', ']']) {
                        return Err(invalid());
                    }
                    steps.push(PatternStep::Key(prefix.to_string()));
                }
                let digits = &caps[3];
                if digits.is_empty() {
                    steps.push(PatternStep::AnyIndex);
                } else {
                    let index = digits.parse().map_err(|_| invalid())?;
                    steps.push(PatternStep::Index(index));
                }
            } else {
                if part.contains(['[', ']']) {
                    return Err(invalid());
                }
                steps.push(PatternStep::Key(part.to_string()));
            }
        }

        if steps.is_empty() {
            return Err(SchemaError::EmptyPattern);
        }
        Ok(Self { steps })
    }

    /// The parsed steps, root first.
    #[must_use]
    pub fn steps(&self) -> &[PatternStep] {
        &self.steps
    }

    /// The pattern length in steps. Array and object steps count equally;
    /// this is the unit record-scope boundaries are measured in.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Patterns are never empty; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether the pattern's last step is an unbound array step. Multi
    /// patterns bind once per matching element, producing one record each.
    #[must_use]
    pub fn is_multi(&self) -> bool {
        matches!(self.steps.last(), Some(PatternStep::AnyIndex))
    }

    /// Tests a concrete path against this pattern.
    ///
    /// Lengths must agree exactly; object keys must be equal; a bound array
    /// step must equal the path's index while an unbound step matches any.
    /// The empty concrete path never matches.
    #[must_use]
    pub fn matches(&self, path: &[Frame]) -> bool {
        if path.is_empty() || path.len() != self.steps.len() {
            return false;
        }
        self.steps
            .iter()
            .zip(path)
            .all(|(step, frame)| match (step, frame) {
                (PatternStep::Key(want), Frame::Key(key)) => want == key,
                (PatternStep::Index(want), Frame::Index(index)) => want == index,
                (PatternStep::AnyIndex, Frame::Index(_)) => true,
                _ => false,
            })
    }
}

impl fmt::Display for Pattern {
    /// Renders the canonical textual form; parsing the result yields an
    /// equal pattern.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut after_key = false;
        for step in &self.steps {
            match step {
                PatternStep::Key(key) => {
                    write!(f, ".{key}")?;
                    after_key = true;
                }
                PatternStep::Index(index) => {
                    if !after_key {
                        f.write_str(".")?;
                    }
                    write!(f, "[{index}]")?;
                    after_key = false;
                }
                PatternStep::AnyIndex => {
                    if !after_key {
                        f.write_str(".")?;
                    }
                    f.write_str("[]")?;
                    after_key = false;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::path;

    fn key(k: &str) -> PatternStep {
        PatternStep::Key(k.to_string())
    }

    #[rstest]
    #[case(".ID", vec![key("ID")])]
    #[case(".[]", vec![PatternStep::AnyIndex])]
    #[case(".[7]", vec![PatternStep::Index(7)])]
    #[case(".[].ID", vec![PatternStep::AnyIndex, key("ID")])]
    #[case(".[].TOKENS[]", vec![PatternStep::AnyIndex, key("TOKENS"), PatternStep::AnyIndex])]
    #[case(".[0].NAME", vec![PatternStep::Index(0), key("NAME")])]
    #[case(".a.b[3].c", vec![key("a"), key("b"), PatternStep::Index(3), key("c")])]
    #[case(".a.[3]", vec![key("a"), PatternStep::Index(3)])]
    fn parses_valid_patterns(#[case] text: &str, #[case] steps: Vec<PatternStep>) {
        let pattern = Pattern::parse(text).unwrap();
        assert_eq!(pattern.steps(), steps.as_slice());
    }

    #[rstest]
    #[case("ID")]
    #[case("[].ID")]
    fn rejects_missing_leading_dot(#[case] text: &str) {
        assert!(matches!(
            Pattern::parse(text),
            Err(SchemaError::MissingLeadingDot(_))
        ));
    }

    #[test]
    fn rejects_empty_source() {
        assert!(matches!(Pattern::parse(""), Err(SchemaError::EmptyPattern)));
    }

    #[rstest]
    #[case(".")]
    #[case(".a..b")]
    #[case(".a.")]
    fn rejects_empty_steps(#[case] text: &str) {
        assert!(matches!(Pattern::parse(text), Err(SchemaError::EmptyStep(_))));
    }

    #[rstest]
    #[case(".a[x]")]
    #[case(".a[1][2]")]
    #[case(".[]a")]
    #[case(".a]b")]
    #[case(".[99999999999999999999999]")]
    fn rejects_invalid_steps(#[case] text: &str) {
        assert!(matches!(
            Pattern::parse(text),
            Err(SchemaError::InvalidStep { .. })
        ));
    }

    #[test]
    fn multi_flag_tracks_last_step() {
        assert!(Pattern::parse(".[].TOKENS[]").unwrap().is_multi());
        assert!(!Pattern::parse(".[].TOKENS[0]").unwrap().is_multi());
        assert!(!Pattern::parse(".[].ID").unwrap().is_multi());
    }

    #[test]
    fn matches_wildcard_and_bound_indices() {
        let pattern = Pattern::parse(".[].TOKENS[]").unwrap();
        assert!(pattern.matches(&path![0, "TOKENS", 0]));
        assert!(pattern.matches(&path![9, "TOKENS", 120]));
        assert!(!pattern.matches(&path![0, "tokens", 0]));

        let bound = Pattern::parse(".[0].NAME").unwrap();
        assert!(bound.matches(&path![0, "NAME"]));
        assert!(!bound.matches(&path![1, "NAME"]));
    }

    #[test]
    fn never_matches_empty_or_mismatched_length() {
        let pattern = Pattern::parse(".ID").unwrap();
        assert!(!pattern.matches(&[]));
        assert!(!pattern.matches(&path!["ID", "X"]));
    }

    #[test]
    fn tag_mismatch_fails() {
        let pattern = Pattern::parse(".[].ID").unwrap();
        assert!(!pattern.matches(&path!["outer", "ID"]));
    }

    #[rstest]
    #[case(".[].TOKENS[]")]
    #[case(".[0].NAME")]
    #[case(".a.b[3].c")]
    #[case(".[1].[2]")]
    fn display_is_canonical(#[case] text: &str) {
        let pattern = Pattern::parse(text).unwrap();
        assert_eq!(pattern.to_string(), text);
        assert_eq!(Pattern::parse(&pattern.to_string()).unwrap(), pattern);
    }

    #[test]
    fn equivalent_forms_render_identically() {
        let attached = Pattern::parse(".a[3]").unwrap();
        let dotted = Pattern::parse(".a.[3]").unwrap();
        assert_eq!(attached, dotted);
        assert_eq!(dotted.to_string(), ".a[3]");
    }
}
