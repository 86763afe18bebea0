//! Anchor expressions.
//!
//! An anchor maps a container length to a child length along one axis. A
//! component's `anchor` config holds one token per axis (`"100% -20"`):
//!
//! - `"<n>%"`: `floor(container * n / 100)`
//! - `"<int>"`: `container + int`, an offset from the far edge
//! - `"r"`, `"right"`, `"b"`, `"bottom"`: keep the gap to the far edge that the
//!   child had when the anchor was built
//! - absent or `"none"`: not anchored
//!
//! Percentage and side anchors need the container's reference length when the
//! anchor is built; without it the anchor is inactive and the child keeps its
//! own size.

use serde::Serialize;
use tessera_common::warning::warn_once;

use crate::sides::{parse_float_prefix, parse_int_prefix};

/// How an anchor derives a length from the container length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum AnchorFormula {
    /// Fraction of the container, floored.
    Percent(f64),
    /// Container length plus a (usually negative) offset.
    Offset(i32),
    /// Container length minus the gap recorded at build time.
    Side {
        /// `reference - initial` when the anchor was built.
        gap: i32,
    },
}

impl AnchorFormula {
    /// Compute the child length for a container length.
    #[must_use]
    pub fn apply(self, container: i32) -> i32 {
        match self {
            Self::Percent(percent) => (f64::from(container) * percent / 100.0).floor() as i32,
            Self::Offset(offset) => container.saturating_add(offset),
            Self::Side { gap } => container.saturating_sub(gap),
        }
    }
}

/// An anchor with its last input/output pair cached.
///
/// Evaluating twice with the same container length returns the cached result
/// without recomputing, so callers can skip redundant writes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anchor {
    formula: AnchorFormula,
    last: Option<(i32, i32)>,
}

impl Anchor {
    /// An anchor that has not been evaluated yet.
    #[must_use]
    pub const fn new(formula: AnchorFormula) -> Self {
        Self {
            formula,
            last: None,
        }
    }

    /// The anchor's formula.
    #[must_use]
    pub const fn formula(&self) -> AnchorFormula {
        self.formula
    }

    /// The last `(container, result)` pair, if evaluated.
    #[must_use]
    pub const fn last(&self) -> Option<(i32, i32)> {
        self.last
    }

    /// Child length for `container`.
    pub fn evaluate(&mut self, container: i32) -> i32 {
        if let Some((input, output)) = self.last {
            if input == container {
                return output;
            }
        }
        let output = self.formula.apply(container);
        self.last = Some((container, output));
        output
    }
}

/// Build an anchor from one axis token.
///
/// `initial` is the child's configured length on this axis and `reference` the
/// container's reference length; see the module docs for which tokens need
/// them. Returns `None` for no anchor, a malformed token, or missing reference
/// data.
#[must_use]
pub fn build_anchor(token: &str, initial: Option<i32>, reference: Option<i32>) -> Option<Anchor> {
    let token = token.trim();
    if token.is_empty() || token.eq_ignore_ascii_case("none") {
        return None;
    }

    if is_side_token(token) {
        let (Some(reference), Some(initial)) = (reference, initial) else {
            log::debug!(
                "side anchor '{token}' inactive: reference={reference:?} initial={initial:?}"
            );
            return None;
        };
        return Some(Anchor::new(AnchorFormula::Side {
            gap: reference - initial,
        }));
    }

    if token.contains('%') {
        let Some(percent) = parse_float_prefix(token) else {
            let _ = warn_once("Anchor", &format!("malformed percentage anchor '{token}'"));
            return None;
        };
        if reference.is_none() {
            log::debug!("percentage anchor '{token}' inactive: no reference length");
            return None;
        }
        return Some(Anchor::new(AnchorFormula::Percent(percent)));
    }

    if let Some(offset) = parse_int_prefix(token) {
        return Some(Anchor::new(AnchorFormula::Offset(offset)));
    }

    let _ = warn_once("Anchor", &format!("unrecognised anchor '{token}'"));
    None
}

fn is_side_token(token: &str) -> bool {
    ["r", "right", "b", "bottom"]
        .iter()
        .any(|side| token.eq_ignore_ascii_case(side))
}

/// A component's anchor config split into per-axis tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnchorSpec<'a> {
    /// Width token.
    pub width: Option<&'a str>,
    /// Height token.
    pub height: Option<&'a str>,
}

impl<'a> AnchorSpec<'a> {
    /// Split `"<width> [<height>]"`.
    #[must_use]
    pub fn parse(expression: &'a str) -> Self {
        let mut tokens = expression.split_ascii_whitespace();
        Self {
            width: tokens.next(),
            height: tokens.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_anchor() {
        let mut anchor = build_anchor("50%", None, Some(200)).unwrap();
        assert_eq!(anchor.evaluate(400), 200);
        assert_eq!(anchor.evaluate(301), 150);
    }

    #[test]
    fn test_offset_anchor() {
        let mut anchor = build_anchor("-20", None, None).unwrap();
        assert_eq!(anchor.evaluate(300), 280);
    }

    #[test]
    fn test_side_anchor_preserves_gap() {
        let mut anchor = build_anchor("right", Some(150), Some(200)).unwrap();
        assert_eq!(anchor.formula(), AnchorFormula::Side { gap: 50 });
        assert_eq!(anchor.evaluate(500), 450);

        assert!(build_anchor("B", Some(10), Some(40)).is_some());
    }

    #[test]
    fn test_inactive_without_reference() {
        assert!(build_anchor("50%", None, None).is_none());
        assert!(build_anchor("r", Some(100), None).is_none());
        assert!(build_anchor("r", None, Some(100)).is_none());
    }

    #[test]
    fn test_none_and_malformed() {
        assert!(build_anchor("", None, Some(1)).is_none());
        assert!(build_anchor("none", None, Some(1)).is_none());
        assert!(build_anchor("NONE", None, Some(1)).is_none());
        assert!(build_anchor("wide", None, Some(1)).is_none());
        assert!(build_anchor("abc%", None, Some(1)).is_none());
    }

    #[test]
    fn test_evaluate_caches_last_pair() {
        let mut anchor = build_anchor("100%", None, Some(10)).unwrap();
        assert_eq!(anchor.last(), None);
        assert_eq!(anchor.evaluate(120), 120);
        assert_eq!(anchor.last(), Some((120, 120)));
        assert_eq!(anchor.evaluate(120), 120);
        assert_eq!(anchor.evaluate(90), 90);
        assert_eq!(anchor.last(), Some((90, 90)));
    }

    #[test]
    fn test_anchor_spec_parse() {
        let spec = AnchorSpec::parse("100% -50");
        assert_eq!(spec.width, Some("100%"));
        assert_eq!(spec.height, Some("-50"));
        assert_eq!(AnchorSpec::parse("  ").width, None);
        assert_eq!(AnchorSpec::parse("r").height, None);
    }
}
