//! Intrusive Pairing Heap for Rust
//!
//! This crate provides a two-pass pairing heap whose linkage lives inside the
//! caller's own records. The heap never allocates: callers embed a
//! [`PairingLink`] in each record, hand the heap shared references, and get
//! the same references back from `peek`/`pop`.
//!
//! # Features
//!
//! - **Insert, merge, peek**: O(1)
//! - **Pop, remove**: O(log n) amortized, via two-pass consolidation
//! - **Decrease**: O(1), no sift-up pass
//! - **Increase**: O(log n) amortized, as remove followed by insert
//! - **Custom ordering**: any "ranks strictly before" predicate, plus an
//!   auxiliary context value threaded through every comparison
//! - **Multiple heaps per record**: one [`PairingLink`] and one [`Adapter`]
//!   per heap
//!
//! # Example
//!
//! ```rust
//! use intrusive_pairing_heap::{pairing_adapter, PairingHeap, PairingLink};
//!
//! struct IntWrapper {
//!     value: i32,
//!     elem: PairingLink,
//! }
//!
//! pairing_adapter!(IntAdapter = IntWrapper { elem });
//!
//! let values: Vec<IntWrapper> = [3, 3, 2, 1]
//!     .into_iter()
//!     .map(|value| IntWrapper { value, elem: PairingLink::new() })
//!     .collect();
//!
//! let mut heap = PairingHeap::<IntAdapter, _>::new(|a: &IntWrapper, b: &IntWrapper, _: &()| {
//!     a.value < b.value
//! });
//! for v in &values {
//!     heap.insert(v, &()).unwrap();
//! }
//!
//! assert_eq!(heap.peek().map(|w| w.value), Some(1));
//! let order: Vec<i32> = std::iter::from_fn(|| heap.pop(&()).map(|w| w.value)).collect();
//! assert_eq!(order, vec![1, 2, 3, 3]);
//! assert!(heap.is_empty());
//! ```
//!
//! # Thread safety
//!
//! None. A heap and the links it owns must be used from one thread, or be
//! externally synchronized.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod adapter;
pub mod error;
pub mod heap;
mod raw;

pub use adapter::Adapter;
pub use error::{HeapError, InvariantError};
pub use heap::PairingHeap;
pub use pairing_link::{container_of, container_of_mut, PairingLink, Up};
