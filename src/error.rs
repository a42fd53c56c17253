//! Error types for heap operations

use thiserror::Error;

/// Error type for heap operations
///
/// Every variant reports a caller contract violation that was detected before
/// the heap was touched, so the heap is unchanged when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The operation needs at least one element
    #[error("heap is empty")]
    Empty,
    /// The value's link already belongs to a heap
    #[error("value is already linked into a heap")]
    AlreadyLinked,
    /// The value's link does not belong to this heap
    #[error("value is not linked into this heap")]
    NotLinked,
}

/// A broken invariant found by
/// [`PairingHeap::verify_structure`](crate::PairingHeap::verify_structure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// The root is not marked [`Up::Root`](crate::Up::Root) or has a right sibling
    #[error("root has an upward neighbour or a sibling")]
    RootNotDetached,
    /// A child or sibling relation is not mirrored by the neighbour's `up`
    #[error("a link and its neighbour disagree about their relation")]
    BrokenLink,
    /// The predicate ranks a child strictly before its parent
    #[error("a child ranks before its parent")]
    HeapOrder,
    /// The stored count differs from the number of reachable links
    #[error("heap reports {expected} elements but {found} are reachable")]
    LenMismatch {
        /// Count kept by the heap
        expected: usize,
        /// Links reached by walking the tree
        found: usize,
    },
}
