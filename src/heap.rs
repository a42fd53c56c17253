//! Intrusive pairing heap handle
//!
//! A pairing heap is a heap-ordered multiway tree with:
//! - O(1) insert, merge and peek
//! - O(log n) amortized pop and remove
//! - O(1) decrease (plus the amortized cost it shifts onto later pops)
//!
//! Elements are caller-owned records that embed a [`PairingLink`](crate::PairingLink). The heap
//! borrows them for `'a` and rewires their links; it never allocates, moves or
//! frees them. The ordering predicate is fixed at construction, and every
//! mutating call takes an auxiliary context that is handed to each comparison.

use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;

use pairing_link::{TreeOps, Up};
use tracing::{debug, trace};

use crate::adapter::Adapter;
use crate::error::{HeapError, InvariantError};
use crate::raw::{combine_siblings, link_pair, LinkPtr};

/// Intrusive two-pass pairing heap
///
/// `A` selects the record type and which of its links this heap uses, `F` is
/// the "ranks strictly before" predicate and `X` the auxiliary context type
/// passed through to `F`.
///
/// # Example
///
/// ```rust
/// use intrusive_pairing_heap::{pairing_adapter, PairingHeap, PairingLink};
/// use std::cell::Cell;
///
/// struct Task {
///     priority: Cell<u32>,
///     link: PairingLink,
/// }
///
/// pairing_adapter!(TaskAdapter = Task { link });
///
/// let a = Task { priority: Cell::new(5), link: PairingLink::new() };
/// let b = Task { priority: Cell::new(3), link: PairingLink::new() };
///
/// let mut heap = PairingHeap::<TaskAdapter, _>::new(|x: &Task, y: &Task, _: &()| {
///     x.priority.get() < y.priority.get()
/// });
/// heap.insert(&a, &()).unwrap();
/// heap.insert(&b, &()).unwrap();
/// assert_eq!(heap.peek().map(|t| t.priority.get()), Some(3));
///
/// a.priority.set(1);
/// unsafe { heap.decrease(&a, &()).unwrap() };
/// assert_eq!(heap.pop(&()).map(|t| t.priority.get()), Some(1));
/// assert_eq!(heap.len(), 1);
/// ```
pub struct PairingHeap<'a, A: Adapter, F, X: ?Sized = ()> {
    root: Option<LinkPtr>,
    len: usize,
    less: F,
    _marker: PhantomData<(&'a A::Value, A, fn(&X))>,
}

impl<'a, A: Adapter, F, X: ?Sized> PairingHeap<'a, A, F, X> {
    /// Returns the number of elements in the heap
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the heap is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the minimum element without removing it
    #[inline]
    pub fn peek(&self) -> Option<&'a A::Value> {
        self.root.map(|root| unsafe { A::value(root).as_ref() })
    }

    /// Detaches every element, leaving the heap empty.
    ///
    /// Runs in O(n) without calling the predicate. Afterwards every former
    /// element can be inserted into any heap again.
    pub fn clear(&mut self) {
        trace!(len = self.len, "clearing heap");
        let mut current = self.root.take();
        while let Some(node) = current {
            unsafe {
                let link = node.as_ref();
                let mut next = link.next();
                if let Some(child) = link.child() {
                    // Queue the whole child list ahead of `next`.
                    let mut tail = child;
                    while let Some(sibling) = tail.as_ref().next() {
                        tail = sibling;
                    }
                    tail.as_ref().set_next(next);
                    next = Some(child);
                }
                link.force_unlink();
                current = next;
            }
        }
        self.len = 0;
    }

    /// Checks that `value` belongs to this heap by walking up to its root.
    ///
    /// O(depth) in the tree, which in a pairing heap can be O(n).
    ///
    /// # Safety
    ///
    /// If `value` is linked into some other heap, that heap must still be
    /// alive with all of its elements.
    pub unsafe fn contains(&self, value: &A::Value) -> bool {
        let link = A::link(value);
        link.is_linked() && self.owns(NonNull::from(link))
    }

    unsafe fn owns(&self, ptr: LinkPtr) -> bool {
        self.root == Some(TreeOps.root_of(ptr))
    }

    fn linked_ptr(value: &A::Value, op: &'static str) -> Result<LinkPtr, HeapError> {
        let link = A::link(value);
        if !link.is_linked() {
            debug!(operation = op, "value is not linked into any heap");
            return Err(HeapError::NotLinked);
        }
        Ok(NonNull::from(link))
    }
}

impl<'a, A, F, X> PairingHeap<'a, A, F, X>
where
    A: Adapter,
    F: Fn(&A::Value, &A::Value, &X) -> bool,
    X: ?Sized,
{
    /// Creates a new empty heap ordered by `less`
    ///
    /// `less(a, b, aux)` must return true iff `a` ranks strictly before `b`,
    /// and must be a strict weak ordering for as long as the heap lives.
    pub fn new(less: F) -> Self {
        Self {
            root: None,
            len: 0,
            less,
            _marker: PhantomData,
        }
    }

    /// Adapts the record-level predicate to links, binding the aux context.
    fn ordering<'s>(less: &'s F, aux: &'s X) -> impl FnMut(LinkPtr, LinkPtr) -> bool + 's {
        move |a, b| unsafe { less(A::value(a).as_ref(), A::value(b).as_ref(), aux) }
    }

    /// Inserts `value` into the heap
    ///
    /// # Errors
    /// Returns `HeapError::AlreadyLinked` if the value's link is in a heap.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, value: &'a A::Value, aux: &X) -> Result<(), HeapError> {
        let link = A::link(value);
        if link.is_linked() {
            debug!(operation = "insert", "value is already linked into a heap");
            return Err(HeapError::AlreadyLinked);
        }

        let node = NonNull::from(link);
        unsafe { TreeOps.make_root(node) };

        self.root = Some(match self.root {
            None => node,
            Some(root) => unsafe { link_pair(node, root, &mut Self::ordering(&self.less, aux)) },
        });
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the minimum element, or `None` if the heap is empty
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn pop(&mut self, aux: &X) -> Option<&'a A::Value> {
        let root = self.root?;
        unsafe {
            let link = root.as_ref();
            self.root = link
                .child()
                .map(|first| combine_siblings(first, &mut Self::ordering(&self.less, aux)));
            link.force_unlink();
            self.len -= 1;
            Some(A::value(root).as_ref())
        }
    }

    /// Like [`pop`](Self::pop), but reports an empty heap as an error
    ///
    /// # Errors
    /// Returns `HeapError::Empty` if there is nothing to pop.
    pub fn pop_checked(&mut self, aux: &X) -> Result<&'a A::Value, HeapError> {
        self.pop(aux).ok_or_else(|| {
            debug!(operation = "pop", "heap is empty");
            HeapError::Empty
        })
    }

    /// Removes `value` from the heap
    ///
    /// # Safety
    /// If `value` is linked, it must be linked into this heap.
    ///
    /// # Errors
    /// Returns `HeapError::NotLinked` if the value is detached, or is the
    /// root of some other heap.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub unsafe fn remove(&mut self, value: &'a A::Value, aux: &X) -> Result<(), HeapError> {
        let node = Self::linked_ptr(value, "remove")?;
        let root = self.foreign_check(node, "remove")?;
        if node == root {
            self.pop(aux);
            return Ok(());
        }
        debug_assert!(self.owns(node), "value is linked into another heap");

        let mut less = Self::ordering(&self.less, aux);
        TreeOps.detach(node);
        if let Some(first) = node.as_ref().child() {
            let subtree = combine_siblings(first, &mut less);
            self.root = Some(link_pair(root, subtree, &mut less));
        }
        node.as_ref().force_unlink();
        self.len -= 1;
        Ok(())
    }

    /// Restores heap order after `value`'s key decreased
    ///
    /// Does nothing if `value` is the minimum already.
    ///
    /// # Safety
    /// If `value` is linked, it must be linked into this heap.
    ///
    /// # Errors
    /// Returns `HeapError::NotLinked` if the value is detached, or is the
    /// root of some other heap.
    ///
    /// # Time Complexity
    /// O(1)
    pub unsafe fn decrease(&mut self, value: &'a A::Value, aux: &X) -> Result<(), HeapError> {
        let node = Self::linked_ptr(value, "decrease")?;
        let root = self.foreign_check(node, "decrease")?;
        if node == root {
            return Ok(());
        }
        debug_assert!(self.owns(node), "value is linked into another heap");

        TreeOps.detach(node);
        self.root = Some(link_pair(root, node, &mut Self::ordering(&self.less, aux)));
        Ok(())
    }

    /// Restores heap order after `value`'s key increased
    ///
    /// There is no sift-down in a pairing heap, so this is a remove followed
    /// by an insert.
    ///
    /// # Safety
    /// If `value` is linked, it must be linked into this heap.
    ///
    /// # Errors
    /// Same as [`remove`](Self::remove).
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub unsafe fn increase(&mut self, value: &'a A::Value, aux: &X) -> Result<(), HeapError> {
        self.remove(value, aux)?;
        self.insert(value, aux)
    }

    /// Moves every element of `other` into this heap, leaving `other` empty
    ///
    /// Both heaps share the predicate type; if `F` carries state, the two
    /// values must order elements identically.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn merge(&mut self, other: &mut Self, aux: &X) {
        trace!(dst_len = self.len, src_len = other.len, "merging heaps");
        let Some(src) = other.root.take() else {
            return;
        };
        self.root = Some(match self.root {
            None => src,
            Some(dst) => unsafe { link_pair(dst, src, &mut Self::ordering(&self.less, aux)) },
        });
        self.len += mem::take(&mut other.len);
    }

    /// Checks every structural invariant of the heap
    ///
    /// Verifies that links and their neighbours agree, that no child ranks
    /// before its parent, and that `len()` matches the reachable element
    /// count. O(n).
    ///
    /// # Errors
    /// Returns the first broken invariant found.
    pub fn verify_structure(&self, aux: &X) -> Result<(), InvariantError> {
        let Some(root) = self.root else {
            return match self.len {
                0 => Ok(()),
                expected => Err(InvariantError::LenMismatch { expected, found: 0 }),
            };
        };

        unsafe {
            let root_link = root.as_ref();
            if !root_link.is_root() || root_link.next().is_some() {
                return Err(InvariantError::RootNotDetached);
            }

            let mut less = Self::ordering(&self.less, aux);
            let mut found = 0;
            let mut result = Ok(());
            TreeOps.for_each(root, |node| {
                found += 1;
                if result.is_err() {
                    return;
                }
                result = check_node(node, root, &mut less);
            });
            result?;

            if found != self.len {
                return Err(InvariantError::LenMismatch {
                    expected: self.len,
                    found,
                });
            }
        }
        Ok(())
    }
}

unsafe fn check_node<L>(node: LinkPtr, root: LinkPtr, less: &mut L) -> Result<(), InvariantError>
where
    L: FnMut(LinkPtr, LinkPtr) -> bool,
{
    let link = node.as_ref();
    if node != root {
        let agrees = match link.up() {
            Up::Parent(parent) => parent.as_ref().child() == Some(node),
            Up::LeftSibling(left) => left.as_ref().next() == Some(node),
            Up::Root | Up::Detached => false,
        };
        if !agrees {
            return Err(InvariantError::BrokenLink);
        }
    }
    if let Some(next) = link.next() {
        if next.as_ref().up() != Up::LeftSibling(node) {
            return Err(InvariantError::BrokenLink);
        }
    }

    let mut child = link.child();
    if let Some(first) = child {
        if first.as_ref().up() != Up::Parent(node) {
            return Err(InvariantError::BrokenLink);
        }
    }
    while let Some(c) = child {
        if less(c, node) {
            return Err(InvariantError::HeapOrder);
        }
        child = c.as_ref().next();
    }
    Ok(())
}

impl<'a, A: Adapter, F, X: ?Sized> PairingHeap<'a, A, F, X> {
    /// Rejects a value that is the root of a tree other than ours, and
    /// returns our root.
    unsafe fn foreign_check(&self, node: LinkPtr, op: &'static str) -> Result<LinkPtr, HeapError> {
        match self.root {
            Some(root) if node == root || !node.as_ref().is_root() => Ok(root),
            _ => {
                debug!(operation = op, "value is not linked into this heap");
                Err(HeapError::NotLinked)
            }
        }
    }
}

impl<A: Adapter, F, X: ?Sized> Drop for PairingHeap<'_, A, F, X> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<A: Adapter, F, X: ?Sized> fmt::Debug for PairingHeap<'_, A, F, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PairingHeap")
            .field("len", &self.len)
            .field("root", &self.root.map(|root| unsafe { root.as_ref() }))
            .finish()
    }
}
