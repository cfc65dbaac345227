//! The public container: [`ContiguousSplayedRadixTree`].

#[cfg(feature = "alloc")]
use alloc::{boxed::Box, vec::Vec};

use crate::{
    builder,
    error::{BuildError, KeyNotFoundError},
    lookup,
};

/// A read-only associative container mapping unique string keys (sequences of 16-bit code
/// units) to values of type `V`, using a **Contiguous Splayed Radix Tree** — the entire trie
/// topology is serialised into one flat array of code units (see `SPEC_FULL.md` §3–§4), with
/// values stored in a parallel dense array.
///
/// The container is built once, atomically, from a sorted, duplicate-free sequence of pairs via
/// [`build`][Self::build], and is immutable for the rest of its lifetime: there is no insertion,
/// deletion, or update after construction, no iteration in sorted order, and no prefix-range
/// queries. [`get`][Self::get] and [`contains`][Self::contains] run in O(|key|) time independent
/// of the number of stored keys, performing no allocation.
#[derive(Clone, Debug)]
pub struct ContiguousSplayedRadixTree<V> {
    tree: Box<[u16]>,
    values: Box<[V]>,
}

impl<V> ContiguousSplayedRadixTree<V> {
    /// Builds a container from a sorted, duplicate-free sequence of (key, value) pairs.
    ///
    /// `pairs` must be sorted ascending by key and must not contain an empty key or a duplicate
    /// key; this is verified eagerly (§4.3, §9) rather than merely documented as a caller
    /// precondition, so that unsorted-but-duplicate-free input fails fast instead of silently
    /// producing a corrupt tree.
    ///
    /// # Errors
    /// Returns [`BuildError::Unsorted`] if the input is not in non-decreasing key order,
    /// [`BuildError::DuplicateKey`] if two pairs share a key, [`BuildError::EmptyKey`] if any key
    /// is empty, or [`BuildError::CapacityExceeded`] if there are more than 65,535 pairs or a
    /// subtree's serialised size would not fit in one 16-bit relative offset.
    pub fn build<K>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self, BuildError>
    where
        K: AsRef<[u16]>,
    {
        let (keys, values): (Vec<Box<[u16]>>, Vec<Option<V>>) = pairs
            .into_iter()
            .map(|(k, v)| (Box::from(k.as_ref()), Some(v)))
            .unzip();

        validate(&keys)?;

        let (tree, values) = builder::build(&keys, values)?;

        Ok(Self {
            tree: tree.into_boxed_slice(),
            values: values.into_boxed_slice(),
        })
    }

    /// Returns a reference to the value bound to `key`, or [`KeyNotFoundError`] if `key` was not
    /// present at construction.
    pub fn get(&self, key: &[u16]) -> Result<&V, KeyNotFoundError> {
        lookup::find(&self.tree, key)
            .map(|idx| &self.values[idx])
            .ok_or(KeyNotFoundError)
    }

    /// Returns `true` if `key` was present at construction. Never fails.
    #[must_use]
    pub fn contains(&self, key: &[u16]) -> bool {
        lookup::find(&self.tree, key).is_some()
    }

    /// Returns the number of keys stored in this container.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if this container holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Checks sortedness, duplicate-freedom and non-emptiness of the (already key-extracted) input,
/// eagerly, before handing off to the builder.
fn validate(keys: &[Box<[u16]>]) -> Result<(), BuildError> {
    for (i, key) in keys.iter().enumerate() {
        if key.is_empty() {
            return Err(BuildError::EmptyKey { at: i });
        }
    }
    for i in 1..keys.len() {
        match keys[i - 1].cmp(&keys[i]) {
            core::cmp::Ordering::Less => {}
            core::cmp::Ordering::Equal => return Err(BuildError::DuplicateKey { at: i }),
            core::cmp::Ordering::Greater => return Err(BuildError::Unsorted { at: i }),
        }
    }
    Ok(())
}

/// Converts a `&str` into its sequence of UTF-16 code units, for use as a key passed to
/// [`ContiguousSplayedRadixTree::build`], [`get`][ContiguousSplayedRadixTree::get], or
/// [`contains`][ContiguousSplayedRadixTree::contains].
///
/// This is an ergonomic convenience for building input pairs and test keys; it allocates and is
/// deliberately not on the hot lookup path, which takes `&[u16]` directly.
#[cfg(feature = "alloc")]
#[must_use]
pub fn to_key_units(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}
