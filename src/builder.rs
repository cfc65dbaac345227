//! Construction of the flat `tree` array and parallel `values` array from a sorted,
//! duplicate-free, non-empty-key list of pairs.
//!
//! The distilled algorithm this module implements (see `SPEC_FULL.md` §4.3) is phrased as two
//! conceptually separate passes: *probing* the sorted input to discover the trie's shape and
//! assign fresh value indices to leaves, and *serialising* the discovered shape into the flat
//! array via the balanced-binary-tree splay of §4.2. This implementation fuses both into a
//! single recursive descent — [`emit_node`] discovers a node's children exactly when it needs to
//! serialise them — which assigns value indices in binary-splay visitation order rather than
//! sorted-input order. Both orders are valid: nothing in the specification requires value
//! indices to track input position, only that each leaf gets a fresh index and the matching
//! value. See `DESIGN.md` for the recorded rationale.

#[cfg(feature = "alloc")]
use alloc::{boxed::Box, vec::Vec};
use core::ops::Range;

use crate::{
    error::{BuildError, CapacityError},
    layout,
    scratch::{Scratch, Slot, Slots},
};

/// Maximum number of pairs (and thus the largest representable value index plus one).
pub(crate) const MAX_PAIRS: usize = u16::MAX as usize;

/// Builds the flat `tree` array and the parallel `values` array from already-validated input:
/// `keys` sorted ascending, no duplicates, no empty key, `keys.len() == values.len() <= MAX_PAIRS`.
pub(crate) fn build<V>(
    keys: &[Box<[u16]>],
    mut values: Vec<Option<V>>,
) -> Result<(Vec<u16>, Vec<V>), BuildError> {
    let n = keys.len();
    if n > MAX_PAIRS {
        return Err(CapacityError::TooManyPairs { count: n }.into());
    }

    let mut scratch = Scratch::new();
    let mut out_values = Vec::with_capacity(n);

    let top_level = partition_children(keys, 0..n, 0);
    scratch.push(top_level.len() as u16);
    emit_binary_group(&mut scratch, keys, &mut values, &mut out_values, &top_level, 0)?;

    Ok((scratch.into_vec(), out_values))
}

/// Partitions `range` (sorted ascending, already known to share every code unit before
/// `key_index`) into the ordered list of its immediate radix children at `key_index`: an
/// optional leading degenerate (prefix-of-another-key) singleton, followed by maximal runs of
/// keys agreeing on the code unit at `key_index`.
fn partition_children(keys: &[Box<[u16]>], range: Range<usize>, key_index: usize) -> Vec<Range<usize>> {
    let mut children = Vec::new();
    let mut i = range.start;

    if i < range.end && keys[i].len() == key_index {
        children.push(i..i + 1);
        i += 1;
    }

    while i < range.end {
        let unit = keys[i][key_index];
        let start = i;
        i += 1;
        while i < range.end && keys[i].len() > key_index && keys[i][key_index] == unit {
            i += 1;
        }
        children.push(start..i);
    }

    children
}

/// Recursively serialises a balanced binary tree of sibling children (§4.2): picks the
/// left-favouring midpoint as the root, emits its own node encoding, then recurses into the left
/// and right sub-slices, patching the root's reserved sibling-offset slots once each side's size
/// is known.
fn emit_binary_group<V>(
    scratch: &mut Scratch,
    keys: &[Box<[u16]>],
    values: &mut [Option<V>],
    out_values: &mut Vec<V>,
    children: &[Range<usize>],
    key_index: usize,
) -> Result<(), BuildError> {
    let count = children.len();
    if count == 0 {
        return Ok(());
    }

    let (left, right) = layout::split(count);
    let m = left;
    let has_left = left > 0;
    let has_right = right > 0;

    let (slots, q) = emit_node(
        scratch,
        keys,
        values,
        out_values,
        children[m].clone(),
        key_index,
        has_left,
        has_right,
    )?;

    if let Some(slot) = slots.left {
        let left_start = scratch.len();
        emit_binary_group(scratch, keys, values, out_values, &children[..m], key_index)?;
        patch_offset(scratch, slot, left_start - q)?;
    }
    if let Some(slot) = slots.right {
        let right_start = scratch.len();
        emit_binary_group(scratch, keys, values, out_values, &children[m + 1..], key_index)?;
        patch_offset(scratch, slot, right_start - q)?;
    }

    Ok(())
}

/// Emits one node (leaf or internal) at the current scratch position, reserving (but not yet
/// filling in) its sibling-offset slots if `has_left`/`has_right`. Returns the reserved slot
/// handles (if any) and the position of the node's radix-child-count slot `q`, so the caller can
/// patch the offsets once it knows where the sibling subtrees end up.
#[allow(clippy::type_complexity)]
fn emit_node<V>(
    scratch: &mut Scratch,
    keys: &[Box<[u16]>],
    values: &mut [Option<V>],
    out_values: &mut Vec<V>,
    range: Range<usize>,
    key_index: usize,
    has_left: bool,
    has_right: bool,
) -> Result<(Slots, usize), BuildError> {
    if range.len() == 1 {
        let idx = range.start;
        let node_start = scratch.len();
        let prefix = &keys[idx][key_index..];
        scratch.push(prefix.len() as u16);
        scratch.extend_from_slice(prefix);

        let q = layout::child_count_slot(node_start, prefix.len());
        scratch.push(0); // children = 0: this is always a terminal
        let slots = reserve_slots(scratch, has_left, has_right);

        let value = values[idx].take().expect("each value is taken exactly once");
        let value_idx = out_values.len();
        out_values.push(value);
        scratch.push(value_idx as u16);

        return Ok((slots, q));
    }

    let node_start = scratch.len();
    let new_key_index = extend_shared_prefix(keys, range.clone(), key_index);
    let prefix = &keys[range.start][key_index..new_key_index];
    scratch.push(prefix.len() as u16);
    scratch.extend_from_slice(prefix);

    let q = layout::child_count_slot(node_start, prefix.len());
    let grandchildren = partition_children(keys, range, new_key_index);
    scratch.push(grandchildren.len() as u16);
    let slots = reserve_slots(scratch, has_left, has_right);

    emit_binary_group(scratch, keys, values, out_values, &grandchildren, new_key_index)?;

    Ok((slots, q))
}

/// Finds the longest code-unit span, starting at `key_index`, shared by every key in `range`.
/// `range` is known (by construction of [`partition_children`]) to already agree at `key_index`
/// and to have length > 1, so the first key in it is guaranteed to have a code unit there.
fn extend_shared_prefix(keys: &[Box<[u16]>], range: Range<usize>, key_index: usize) -> usize {
    let mut depth = key_index;
    loop {
        if keys[range.start].len() == depth {
            break;
        }
        let unit = keys[range.start][depth];
        let all_agree = range
            .clone()
            .all(|i| keys[i].len() > depth && keys[i][depth] == unit);
        if all_agree {
            depth += 1;
        } else {
            break;
        }
    }
    depth
}

fn reserve_slots(scratch: &mut Scratch, has_left: bool, has_right: bool) -> Slots {
    let left = has_left.then(|| scratch.reserve());
    let right = has_right.then(|| scratch.reserve());
    Slots { left, right }
}

fn patch_offset(scratch: &mut Scratch, slot: Slot, offset: usize) -> Result<(), BuildError> {
    if offset > u16::MAX as usize {
        return Err(CapacityError::SubtreeTooLarge { size: offset }.into());
    }
    scratch.patch(slot, offset as u16);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{boxed::Box, vec, vec::Vec};

    fn k(s: &str) -> Box<[u16]> {
        s.encode_utf16().collect::<Vec<_>>().into_boxed_slice()
    }

    #[test]
    fn partition_children_groups_by_next_unit() {
        let keys = vec![k("ab"), k("ac"), k("ad")];
        let groups = partition_children(&keys, 0..3, 1);
        assert_eq!(groups, vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn partition_children_handles_degenerate_prefix() {
        let keys = vec![k("car"), k("card"), k("care")];
        let groups = partition_children(&keys, 0..3, 3);
        assert_eq!(groups, vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn extend_shared_prefix_finds_longest_common_span() {
        let keys = vec![k("ARG_Browse_Flags"), k("ARG_Browse_Limit"), k("ARG_Browse_Offset")];
        let depth = extend_shared_prefix(&keys, 0..3, 0);
        // common prefix is "ARG_Browse_" (11 units)
        assert_eq!(depth, 11);
    }

    #[test]
    fn build_single_key() {
        let keys = vec![k("hello")];
        let values = vec![Some(42u32)];
        let (tree, values) = build(&keys, values).unwrap();
        assert_eq!(values, vec![42]);
        assert_eq!(tree[0], 1); // one top-level child
    }
}
