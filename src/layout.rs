//! Pure, allocation-free description of how nodes are encoded in the flat `tree` array.
//!
//! Both [`crate::builder`] and [`crate::lookup`] call into this module instead of duplicating
//! the offset arithmetic, so the two halves of the structure can never silently disagree about
//! where a given slot lives.

/// Code unit used to encode "no sibling on this side" is simply the *absence* of a slot — this
/// module never emits a sentinel value for it, it only ever computes slot positions relative to
/// `q`, the radix-child-count slot of a node.
///
/// Splits a sibling-group size into `(left, right)` counts using the left-favouring rule shared
/// by both construction (building the balanced binary tree) and lookup (mirroring the descent).
#[inline]
#[must_use]
pub(crate) fn split(count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }
    let left = count >> 1;
    let right = count - left - 1;
    (left, right)
}

/// The position of the radix-child-count slot `q`, relative to the start of a node `p`, given
/// the node's prefix length.
///
/// `q = p + 1 + len` per §3.2: one code unit for `len` itself, plus `len` code units of prefix.
#[inline]
#[must_use]
pub(crate) const fn child_count_slot(node_start: usize, prefix_len: usize) -> usize {
    node_start + 1 + prefix_len
}

/// Header shape of a node once `children` and sibling presence are known, used by both the
/// builder (to know how many slots to reserve) and the lookup engine (to know how far to skip
/// past the header before descending into children).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct HeaderShape {
    /// Whether a left-sibling relative-offset slot is present.
    pub has_left: bool,
    /// Whether a right-sibling relative-offset slot is present.
    pub has_right: bool,
}
impl HeaderShape {
    #[inline]
    #[must_use]
    pub(crate) const fn new(has_left: bool, has_right: bool) -> Self {
        Self { has_left, has_right }
    }

    /// Number of code units occupied by the sibling-offset slots themselves (0, 1 or 2).
    #[inline]
    #[must_use]
    pub(crate) const fn sibling_slot_count(self) -> usize {
        self.has_left as usize + self.has_right as usize
    }
}

/// For a non-degenerate node (`len > 0`), the sibling-offset slots sit immediately after `q`
/// (the `children` slot), *before* any value index or child subtree. This computes how many
/// code units past `q` the node's body (value index, for a terminal; or first child, for an
/// internal node) begins.
#[inline]
#[must_use]
pub(crate) const fn body_offset_from_children_slot(shape: HeaderShape) -> usize {
    1 + shape.sibling_slot_count()
}

/// For a degenerate node (`len == 0`), `q = p + 1` holds `children` (always 0, since degenerate
/// terminals never have radix children), and the sibling-offset slots — present only when the
/// degenerate node itself has splay siblings, which never happens per §4.1 (it is always
/// inserted as the first, parent-less child) — are therefore always absent. The node's value
/// index sits directly after `q`.
#[inline]
#[must_use]
pub(crate) const fn degenerate_value_slot(node_start: usize) -> usize {
    node_start + 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_even() {
        assert_eq!(split(4), (2, 1));
    }

    #[test]
    fn split_odd() {
        assert_eq!(split(5), (2, 2));
    }

    #[test]
    fn split_one() {
        assert_eq!(split(1), (0, 0));
    }

    #[test]
    fn split_zero() {
        assert_eq!(split(0), (0, 0));
    }

    #[test]
    fn child_count_slot_matches_spec() {
        assert_eq!(child_count_slot(10, 3), 14);
        assert_eq!(child_count_slot(10, 0), 11);
    }

    #[test]
    fn header_shape_slot_count() {
        assert_eq!(HeaderShape::new(false, false).sibling_slot_count(), 0);
        assert_eq!(HeaderShape::new(true, false).sibling_slot_count(), 1);
        assert_eq!(HeaderShape::new(false, true).sibling_slot_count(), 1);
        assert_eq!(HeaderShape::new(true, true).sibling_slot_count(), 2);
    }

    #[test]
    fn body_offset_accounts_for_siblings() {
        assert_eq!(body_offset_from_children_slot(HeaderShape::new(false, false)), 1);
        assert_eq!(body_offset_from_children_slot(HeaderShape::new(true, true)), 3);
    }
}
