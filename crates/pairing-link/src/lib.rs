//! Intrusive link for pairing heap trees.
//!
//! A pairing heap is a heap-ordered multiway tree stored in
//! left-child, right-sibling form. Every element embeds one [`PairingLink`]
//! per heap it can belong to, and the heap only ever rewires those links:
//! it never allocates, moves or frees the records that carry them.
//!
//! # Layout
//!
//! Each link holds three relations:
//!
//! - `up`: where the link hangs, as an explicit [`Up`] variant
//! - `next`: the right sibling, or `None` for the rightmost child
//! - `child`: the leftmost child, or `None` for a leaf
//!
//! The upward relation is tagged rather than a bare pointer, so a leftmost
//! child (whose upward neighbour is its parent) can never be confused with a
//! child that has a left sibling, and a link that is in no heap at all is
//! distinguishable from the root of one.
//!
//! # Example
//!
//! ```rust
//! use pairing_link::{PairingLink, TreeOps, Up};
//! use std::ptr::NonNull;
//!
//! struct Node {
//!     link: PairingLink,
//!     value: i32,
//! }
//!
//! let ops = TreeOps;
//!
//! let parent = Node { link: PairingLink::new(), value: 1 };
//! let child = Node { link: PairingLink::new(), value: 2 };
//!
//! unsafe {
//!     let p = NonNull::from(&parent.link);
//!     let c = NonNull::from(&child.link);
//!
//!     ops.make_root(p);
//!     ops.make_root(c);
//!     ops.push_child(p, c);
//!
//!     assert_eq!(parent.link.child(), Some(c));
//!     assert_eq!(child.link.up(), Up::Parent(p));
//!
//!     ops.detach(c);
//!     assert_eq!(parent.link.child(), None);
//!     assert_eq!(child.link.up(), Up::Root);
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

use core::cell::Cell;
use core::fmt;
use core::ptr::NonNull;

// =============================================================================
// Up
// =============================================================================

/// The upward relation of a [`PairingLink`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Up {
    /// Not part of any tree.
    Detached,
    /// Root of a tree, or the leftmost entry of a free sibling list.
    Root,
    /// Leftmost child of the given link.
    Parent(NonNull<PairingLink>),
    /// Right neighbour of the given link.
    LeftSibling(NonNull<PairingLink>),
}

impl Up {
    /// Returns the neighbour this relation points at, if any.
    #[inline]
    pub fn neighbour(self) -> Option<NonNull<PairingLink>> {
        match self {
            Up::Parent(p) | Up::LeftSibling(p) => Some(p),
            Up::Detached | Up::Root => None,
        }
    }
}

// =============================================================================
// PairingLink
// =============================================================================

/// Intrusive link that allows an object to be inserted into a pairing heap.
///
/// A fresh link is [`Up::Detached`] with no sibling and no child.
#[repr(C)]
pub struct PairingLink {
    up: Cell<Up>,
    next: Cell<Option<NonNull<PairingLink>>>,
    child: Cell<Option<NonNull<PairingLink>>>,
}

impl PairingLink {
    /// Creates a new detached `PairingLink`.
    #[inline]
    pub const fn new() -> PairingLink {
        PairingLink {
            up: Cell::new(Up::Detached),
            next: Cell::new(None),
            child: Cell::new(None),
        }
    }

    /// Checks whether the link is part of some tree.
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.up.get() != Up::Detached
    }

    /// Checks whether the link has no upward neighbour while being linked.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.up.get() == Up::Root
    }

    /// Gets the upward relation.
    #[inline]
    pub fn up(&self) -> Up {
        self.up.get()
    }

    /// Gets the right sibling.
    #[inline]
    pub fn next(&self) -> Option<NonNull<PairingLink>> {
        self.next.get()
    }

    /// Gets the leftmost child.
    #[inline]
    pub fn child(&self) -> Option<NonNull<PairingLink>> {
        self.child.get()
    }

    /// Sets the upward relation.
    ///
    /// Links are reachable from the records that embed them while those
    /// records sit in a heap, so rewriting a relation is only possible from
    /// `unsafe` code:
    ///
    /// ```compile_fail,E0133
    /// use pairing_link::{PairingLink, Up};
    ///
    /// let link = PairingLink::new();
    /// link.set_up(Up::Root);
    /// ```
    ///
    /// # Safety
    ///
    /// The neighbour named by `up` must be alive and must point back at this
    /// link through its `child` (for [`Up::Parent`]) or `next`
    /// (for [`Up::LeftSibling`]) relation once the caller finishes rewiring.
    #[inline]
    pub unsafe fn set_up(&self, up: Up) {
        self.up.set(up);
    }

    /// Sets the right sibling.
    ///
    /// ```compile_fail,E0133
    /// use pairing_link::PairingLink;
    ///
    /// let link = PairingLink::new();
    /// link.set_next(None);
    /// ```
    ///
    /// # Safety
    ///
    /// `next` must be alive and its `up` must be [`Up::LeftSibling`] of this
    /// link once the caller finishes rewiring.
    #[inline]
    pub unsafe fn set_next(&self, next: Option<NonNull<PairingLink>>) {
        self.next.set(next);
    }

    /// Sets the leftmost child.
    ///
    /// ```compile_fail,E0133
    /// use pairing_link::PairingLink;
    ///
    /// let link = PairingLink::new();
    /// link.set_child(None);
    /// ```
    ///
    /// # Safety
    ///
    /// `child` must be alive and its `up` must be [`Up::Parent`] of this link
    /// once the caller finishes rewiring.
    #[inline]
    pub unsafe fn set_child(&self, child: Option<NonNull<PairingLink>>) {
        self.child.set(child);
    }

    /// Forcibly marks this link detached and clears all three relations.
    ///
    /// # Safety
    ///
    /// This does not update neighbouring links. Only use it when every link
    /// that points at this one is being discarded too, or has already been
    /// rewired away from it.
    #[inline]
    pub unsafe fn force_unlink(&self) {
        self.up.set(Up::Detached);
        self.next.set(None);
        self.child.set(None);
    }
}

impl Default for PairingLink {
    #[inline]
    fn default() -> Self {
        PairingLink::new()
    }
}

impl Clone for PairingLink {
    /// Cloning a link creates a new detached link.
    #[inline]
    fn clone(&self) -> Self {
        PairingLink::new()
    }
}

impl fmt::Debug for PairingLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.up.get() {
            Up::Detached => write!(f, "PairingLink(detached)"),
            Up::Root => write!(f, "PairingLink(root)"),
            Up::Parent(_) => write!(f, "PairingLink(leftmost child)"),
            Up::LeftSibling(_) => write!(f, "PairingLink(sibling)"),
        }
    }
}

// The pointers inside a PairingLink are only rewritten by the unsafe relation
// setters and only followed by unsafe `TreeOps` calls, whose callers
// guarantee the neighbours are alive and not accessed concurrently.
unsafe impl Send for PairingLink {}

// =============================================================================
// TreeOps
// =============================================================================

/// Structural operations on left-child, right-sibling trees of links.
///
/// None of these compare anything; ordering decisions belong to the heap.
/// All operations except [`TreeOps::root_of`] are O(1).
///
/// # Safety
///
/// Most methods are unsafe because they operate on raw pointers.
/// The caller must ensure:
/// - Pointers are valid and properly aligned
/// - Every link reachable from the arguments is alive
/// - The tree invariants hold on entry
#[derive(Clone, Copy, Default)]
pub struct TreeOps;

impl TreeOps {
    /// Creates a new `TreeOps`.
    #[inline]
    pub const fn new() -> Self {
        TreeOps
    }

    /// Turns a link into a single-node tree.
    ///
    /// # Safety
    ///
    /// Nothing may point at the link.
    #[inline]
    pub unsafe fn make_root(&self, ptr: NonNull<PairingLink>) {
        let link = ptr.as_ref();
        link.set_up(Up::Root);
        link.set_next(None);
        link.set_child(None);
    }

    /// Unlinks a link from its parent and siblings, keeping its children.
    ///
    /// The right sibling, if any, takes over the link's upward relation.
    /// Afterwards the link is the root of its own subtree.
    ///
    /// # Safety
    ///
    /// The link must be part of a tree.
    #[inline]
    pub unsafe fn detach(&self, ptr: NonNull<PairingLink>) {
        let link = ptr.as_ref();
        let up = link.up();
        debug_assert!(up != Up::Detached, "link is not in a tree");

        let next = link.next();
        match up {
            Up::Parent(parent) => {
                debug_assert_eq!(parent.as_ref().child(), Some(ptr));
                parent.as_ref().set_child(next);
            }
            Up::LeftSibling(left) => {
                debug_assert_eq!(left.as_ref().next(), Some(ptr));
                left.as_ref().set_next(next);
            }
            Up::Root | Up::Detached => {}
        }
        if let Some(next) = next {
            next.as_ref().set_up(up);
        }

        link.set_up(Up::Root);
        link.set_next(None);
    }

    /// Makes `child` the leftmost child of `parent`.
    ///
    /// # Safety
    ///
    /// - `child` must be a root with no right sibling
    /// - `parent` must be linked and distinct from `child`
    #[inline]
    pub unsafe fn push_child(&self, parent: NonNull<PairingLink>, child: NonNull<PairingLink>) {
        debug_assert!(child.as_ref().is_root(), "child is not a root");
        debug_assert!(child.as_ref().next().is_none(), "child has a sibling");
        debug_assert_ne!(parent, child);

        let first = parent.as_ref().child();
        if let Some(first) = first {
            first.as_ref().set_up(Up::LeftSibling(child));
        }
        child.as_ref().set_next(first);
        child.as_ref().set_up(Up::Parent(parent));
        parent.as_ref().set_child(Some(child));
    }

    /// Follows upward relations until reaching a link with none.
    ///
    /// This is O(depth + siblings passed on the way up).
    ///
    /// # Safety
    ///
    /// The link must be part of a tree.
    pub unsafe fn root_of(&self, ptr: NonNull<PairingLink>) -> NonNull<PairingLink> {
        let mut current = ptr;
        while let Some(up) = current.as_ref().up().neighbour() {
            current = up;
        }
        current
    }

    /// Counts the links of the tree rooted at `root`, siblings of `root`
    /// excluded.
    ///
    /// Walks the tree without allocating: down through children, right
    /// through siblings and back up through the tagged upward relation.
    ///
    /// # Safety
    ///
    /// `root` must be the root of a well-formed tree.
    pub unsafe fn count(&self, root: NonNull<PairingLink>) -> usize {
        let mut count = 0;
        self.for_each(root, |_| count += 1);
        count
    }

    /// Visits every link of the tree rooted at `root` in preorder.
    ///
    /// # Safety
    ///
    /// `root` must be the root of a well-formed tree.
    /// The callback must not modify the tree structure.
    pub unsafe fn for_each<F>(&self, root: NonNull<PairingLink>, mut f: F)
    where
        F: FnMut(NonNull<PairingLink>),
    {
        let mut current = root;
        loop {
            f(current);
            if let Some(child) = current.as_ref().child() {
                current = child;
                continue;
            }
            // Climb until some ancestor (or the link itself) has a right sibling.
            loop {
                if current == root {
                    return;
                }
                if let Some(next) = current.as_ref().next() {
                    current = next;
                    break;
                }
                current = self.parent_of(current);
            }
        }
    }

    /// Returns the parent of a non-root link by walking left to the
    /// leftmost sibling.
    ///
    /// # Safety
    ///
    /// The link must have a parent.
    pub unsafe fn parent_of(&self, ptr: NonNull<PairingLink>) -> NonNull<PairingLink> {
        let mut current = ptr;
        loop {
            match current.as_ref().up() {
                Up::Parent(parent) => return parent,
                Up::LeftSibling(left) => current = left,
                Up::Root | Up::Detached => {
                    unreachable!("link has no parent")
                }
            }
        }
    }
}

// =============================================================================
// Utility function for calculating container offset
// =============================================================================

/// Recovers a pointer to the record a link is embedded in.
///
/// Must be invoked in an `unsafe` context, since it offsets a raw pointer.
///
/// # Example
///
/// ```rust
/// use pairing_link::{PairingLink, container_of};
/// use std::ptr::NonNull;
///
/// struct Node {
///     value: i32,
///     link: PairingLink,
/// }
///
/// let node = Node { value: 42, link: PairingLink::new() };
/// let link_ptr = NonNull::from(&node.link);
///
/// unsafe {
///     let node_ptr: *const Node = container_of!(link_ptr.as_ptr(), Node, link);
///     assert_eq!((*node_ptr).value, 42);
/// }
/// ```
#[macro_export]
macro_rules! container_of {
    ($ptr:expr, $type:ty, $field:ident) => {{
        let ptr = $ptr as *const u8;
        let offset = core::mem::offset_of!($type, $field);
        ptr.sub(offset) as *const $type
    }};
}

/// Mutable version of `container_of`.
#[macro_export]
macro_rules! container_of_mut {
    ($ptr:expr, $type:ty, $field:ident) => {{
        let ptr = $ptr as *mut u8;
        let offset = core::mem::offset_of!($type, $field);
        ptr.sub(offset) as *mut $type
    }};
}

// =============================================================================
// Tests
// =============================================================================
