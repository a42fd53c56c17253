//! Link-level pairing heap algorithm
//!
//! These two functions are the whole of the pairing heap: every public heap
//! operation is some number of [`link_pair`] calls plus, for removals, one
//! [`combine_siblings`] on the removed node's children. Neither allocates.
//!
//! The ordering is passed as `less(a, b)`, meaning "`a` ranks strictly before
//! `b`". It is evaluated once per pairing.

use core::ptr::NonNull;
use pairing_link::{PairingLink, TreeOps, Up};

pub(crate) type LinkPtr = NonNull<PairingLink>;

/// Links two trees into one and returns its root.
///
/// `a` wins only if `less(a, b)` holds, so ties go to `b`. The loser becomes
/// the leftmost child of the winner, and the winner takes over `a`'s place:
/// its upward relation and, since `b` is consumed, `b`'s right sibling.
///
/// # Safety
///
/// `a` and `b` must be distinct tree roots, and either `b` is the right
/// sibling of `a`, or both are free-standing (`a` has no right sibling and
/// `b` is a [`Up::Root`]).
pub(crate) unsafe fn link_pair<L>(a: LinkPtr, b: LinkPtr, less: &mut L) -> LinkPtr
where
    L: FnMut(LinkPtr, LinkPtr) -> bool,
{
    debug_assert_ne!(a, b);
    debug_assert!(a.as_ref().is_linked() && b.as_ref().is_linked());
    debug_assert!(
        a.as_ref().next() == Some(b) || (a.as_ref().next().is_none() && b.as_ref().is_root()),
        "b is neither a's right sibling nor a free root"
    );

    let place = a.as_ref().up();
    let after = b.as_ref().next();
    let (winner, loser) = if less(a, b) { (a, b) } else { (b, a) };

    winner.as_ref().set_up(place);
    winner.as_ref().set_next(after);
    match place {
        Up::Parent(parent) => parent.as_ref().set_child(Some(winner)),
        Up::LeftSibling(left) => left.as_ref().set_next(Some(winner)),
        Up::Root | Up::Detached => {}
    }
    if let Some(after) = after {
        after.as_ref().set_up(Up::LeftSibling(winner));
    }

    loser.as_ref().set_up(Up::Root);
    loser.as_ref().set_next(None);
    TreeOps.push_child(winner, loser);
    winner
}

/// Combines a sibling list into a single tree with the two-pass scheme.
///
/// Pass one walks left to right linking the 1st with the 2nd entry, the 3rd
/// with the 4th and so on, carrying an odd last entry through. Pass two
/// starts from the rightmost result and links it with each left neighbour
/// in turn. Both passes reuse the sibling relations, so no buffer is needed.
///
/// Returns a free-standing root.
///
/// # Safety
///
/// `first` must be the leftmost entry of a sibling list of well-formed trees.
/// Whatever pointed at `first` (its old parent) must stop doing so; this
/// function does not touch it.
pub(crate) unsafe fn combine_siblings<L>(first: LinkPtr, less: &mut L) -> LinkPtr
where
    L: FnMut(LinkPtr, LinkPtr) -> bool,
{
    first.as_ref().set_up(Up::Root);

    let mut current = first;
    let rightmost = loop {
        let Some(next) = current.as_ref().next() else {
            break current;
        };
        let winner = link_pair(current, next, less);
        match winner.as_ref().next() {
            Some(after) => current = after,
            None => break winner,
        }
    };

    let mut acc = rightmost;
    while let Up::LeftSibling(left) = acc.as_ref().up() {
        acc = link_pair(left, acc, less);
    }

    debug_assert!(acc.as_ref().is_root() && acc.as_ref().next().is_none());
    acc
}
