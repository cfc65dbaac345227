//! The stateless O(|key|) walk over a finished `tree` array (§4.4–§4.5).
//!
//! The walk is phrased here as an explicit loop over three states, matching the state machine of
//! §4.5: `DescendingBinary` (deciding whether to go left/right among the current node's splay
//! siblings, or that we've matched its leading code unit), `MatchingPrefix` (verifying the tail
//! of a matched node's prefix), and `AtNodeBody` (deciding terminal-vs-descend at the node we've
//! fully matched). The degenerate (`len == 0`) case never exercises `DescendingBinary` at all —
//! by construction it is never in any binary group with siblings, and it is always a terminal —
//! so it is handled by a direct return via [`layout::degenerate_value_slot`] before the loop body
//! considers siblings or radix children at all.

use core::cmp::Ordering;

use crate::layout::{self, HeaderShape};

/// Walks `tree` looking for `key`, returning the value index on success.
///
/// `tree` is assumed to satisfy the layout invariants of §3.2 (i.e. it was produced by
/// [`crate::builder::build`]); this function performs no validation of the array itself.
pub(crate) fn find(tree: &[u16], key: &[u16]) -> Option<usize> {
    let root_count = *tree.first()? as usize;
    if root_count == 0 {
        return None;
    }

    let mut tree_index = 1usize;
    let mut key_index = 0usize;
    let (mut left, mut right) = layout::split(root_count);

    loop {
        let len = tree[tree_index] as usize;

        if len == 0 {
            // Degenerate node: always a terminal, never has splay siblings.
            return if key_index == key.len() {
                Some(tree[layout::degenerate_value_slot(tree_index)] as usize)
            } else {
                None
            };
        }

        // DescendingBinary: compare the search key against this node's leading code unit.
        let exhausted = key_index == key.len();
        let ordering = if exhausted {
            Ordering::Less
        } else {
            key[key_index].cmp(&tree[tree_index + 1])
        };

        match ordering {
            Ordering::Less => {
                if left == 0 {
                    return None;
                }
                let q = layout::child_count_slot(tree_index, len);
                let offset = tree[q + 1] as usize;
                tree_index = q + offset;
                let new_left = left >> 1;
                right = left - new_left - 1;
                left = new_left;
                continue;
            }
            Ordering::Greater => {
                if right == 0 {
                    return None;
                }
                let q = layout::child_count_slot(tree_index, len);
                let slot = q + 1 + usize::from(left > 0);
                let offset = tree[slot] as usize;
                tree_index = q + offset;
                let new_right = right >> 1;
                left = right - new_right - 1;
                right = new_right;
                continue;
            }
            Ordering::Equal => {
                // MatchingPrefix: verify the remaining len - 1 code units.
                for i in 1..len {
                    let key_pos = key_index + i;
                    if key_pos >= key.len() || key[key_pos] != tree[tree_index + 1 + i] {
                        return None;
                    }
                }
                key_index += len;
            }
        }

        // AtNodeBody: decide terminal vs. descend into radix children.
        let q = layout::child_count_slot(tree_index, len);
        let children = tree[q] as usize;
        let shape = HeaderShape::new(left > 0, right > 0);
        let body_pos = q + layout::body_offset_from_children_slot(shape);

        if children == 0 {
            return if key_index == key.len() {
                Some(tree[body_pos] as usize)
            } else {
                None
            };
        }

        tree_index = body_pos;
        let (new_left, new_right) = layout::split(children);
        left = new_left;
        right = new_right;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use alloc::{boxed::Box, vec, vec::Vec};

    fn k(s: &str) -> Box<[u16]> {
        s.encode_utf16().collect::<Vec<_>>().into_boxed_slice()
    }

    #[test]
    fn finds_single_key_and_rejects_others() {
        let keys = vec![k("hello")];
        let values = vec![Some(42u32)];
        let (tree, values) = build(&keys, values).unwrap();

        assert_eq!(find(&tree, &k("hello")), Some(0));
        assert_eq!(values[0], 42);
        assert_eq!(find(&tree, &k("hell")), None);
        assert_eq!(find(&tree, &k("hello!")), None);
        assert_eq!(find(&tree, &k("world")), None);
    }

    #[test]
    fn prefix_of_key_coexistence() {
        let keys = vec![k("car"), k("card"), k("care")];
        let values = vec![Some(1u32), Some(2), Some(3)];
        let (tree, values) = build(&keys, values).unwrap();

        let car = find(&tree, &k("car")).unwrap();
        let card = find(&tree, &k("card")).unwrap();
        let care = find(&tree, &k("care")).unwrap();
        assert_eq!(values[car], 1);
        assert_eq!(values[card], 2);
        assert_eq!(values[care], 3);

        assert_eq!(find(&tree, &k("ca")), None);
        assert_eq!(find(&tree, &k("cars")), None);
    }

    #[test]
    fn out_of_range_keys_fail() {
        let keys = vec![k("apple"), k("banana")];
        let values = vec![Some(1u32), Some(2)];
        let (tree, _values) = build(&keys, values).unwrap();

        assert_eq!(find(&tree, &k("avocado")), None);
        assert_eq!(find(&tree, &k("apricot")), None);
    }

    #[test]
    fn shared_prefix_bulk() {
        let keys: Vec<Box<[u16]>> = [
            "ARG_Browse",
            "ARG_Browse_Flags",
            "ARG_Browse_Limit",
            "ARG_Browse_Offset",
            "ARG_Search_Flags",
            "System_Id",
            "System_Update_Id",
        ]
        .iter()
        .map(|s| k(s))
        .collect();
        let expected = ["string", "int", "int", "int", "int", "uuid", "uuid"];
        let values: Vec<Option<&str>> = expected.iter().copied().map(Some).collect();
        let (tree, values) = build(&keys, values).unwrap();

        for (i, key) in keys.iter().enumerate() {
            let idx = find(&tree, key).expect("inserted key must be found");
            assert_eq!(values[idx], expected[i]);
        }

        assert_eq!(find(&tree, &k("Foo")), None);
        assert_eq!(find(&tree, &k("AR")), None);
        assert_eq!(find(&tree, &k("ARG_")), None);
        assert_eq!(find(&tree, &k("ARG_Browse_Foo")), None);
    }
}
