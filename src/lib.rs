//! A space-optimized, immutable associative container keyed by sequences of 16-bit code units,
//! encoded as a **Contiguous Splayed Radix Tree**: the whole trie topology — branch points,
//! shared prefixes and the balanced binary search tree of same-level siblings at each branch
//! point — is serialised into one flat `[u16]` array with no pointers, only relative offsets.
//!
//! # Overview
//! A conventional radix tree built from heap-allocated, pointer-linked nodes pays one allocation
//! and one indirection per node. This crate instead builds the tree once from a sorted,
//! duplicate-free list of key/value pairs and bakes the whole shape into a single contiguous
//! buffer: every child pointer becomes a code-unit offset relative to its parent, and the
//! children at a single radix branch point are arranged as a small balanced binary search tree
//! (rather than a flat scan or a hash map) so that picking the right child among many siblings is
//! still logarithmic instead of linear. The result has no deletion, no insertion, and no
//! rebalancing after construction — only [`ContiguousSplayedRadixTree::get`] and
//! [`contains`][ContiguousSplayedRadixTree::contains], both O(|key|), performing no allocation.
//!
//! # Feature flags
//! - `std` (**enabled by default**) — enables the full standard library, disabling `no_std` for
//!   the crate. Currently, this only adds [`Error`] trait implementations for the error types.
//! - `alloc` (**enabled by default**) — required for [`ContiguousSplayedRadixTree::build`] and
//!   [`to_key_units`], both of which allocate. *This does not require standard library support
//!   and only requires a global allocator.*
//!
//! [`Error`]: https://doc.rust-lang.org/std/error/trait.Error.html " "

#![warn(
    rust_2018_idioms,
    clippy::cargo,
    clippy::pedantic,
    clippy::nursery,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    variant_size_differences,
    clippy::unwrap_used, // Only .expect() allowed
)]
#![deny(anonymous_parameters, bare_trait_objects)]
#![allow(
    clippy::use_self, // FIXME reenable when it gets fixed
    clippy::module_name_repetitions, // Annoying and stupid
)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

#[cfg(feature = "alloc")]
extern crate alloc;

mod builder;
mod csrt;
mod error;
mod layout;
mod lookup;
mod scratch;

pub use crate::{
    csrt::ContiguousSplayedRadixTree,
    error::{BuildError, CapacityError, KeyNotFoundError},
};
#[cfg(feature = "alloc")]
pub use crate::csrt::to_key_units;

/// A prelude containing the most used types, for safe glob-importing.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::{BuildError, CapacityError, ContiguousSplayedRadixTree, KeyNotFoundError};
    #[cfg(feature = "alloc")]
    #[doc(no_inline)]
    pub use crate::to_key_units;
}
