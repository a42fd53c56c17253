//! Bounded proofs over small heaps with symbolic keys
//!
//! Each proof builds a heap of at most four records whose keys are chosen by
//! Kani, then checks ordering, counting and structure after the operation.

#[cfg(kani)]
use intrusive_pairing_heap::{pairing_adapter, HeapError, PairingHeap, PairingLink};
#[cfg(kani)]
use std::cell::Cell;

#[cfg(kani)]
struct Rec {
    key: Cell<u8>,
    link: PairingLink,
}

#[cfg(kani)]
pairing_adapter!(RecAdapter = Rec { link });

#[cfg(kani)]
fn rec(key: u8) -> Rec {
    Rec {
        key: Cell::new(key),
        link: PairingLink::new(),
    }
}

#[cfg(kani)]
fn rec_less(a: &Rec, b: &Rec, _: &()) -> bool {
    a.key.get() < b.key.get()
}

#[cfg(kani)]
type RecHeap<'a> = PairingHeap<'a, RecAdapter, fn(&Rec, &Rec, &()) -> bool>;

/// Proof: Empty heap operations are safe
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(5)]
fn verify_empty_heap_operations() {
    let mut heap: RecHeap<'_> = PairingHeap::new(rec_less);

    assert!(heap.is_empty());
    assert!(heap.len() == 0);
    assert!(heap.peek().is_none());
    assert!(heap.pop(&()).is_none());
    assert!(heap.pop_checked(&()) == Err(HeapError::Empty));
}

/// Proof: Pops come out in non-decreasing order
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_pop_order() {
    let recs = [rec(kani::any()), rec(kani::any()), rec(kani::any()), rec(kani::any())];
    let mut heap: RecHeap<'_> = PairingHeap::new(rec_less);
    for r in &recs {
        heap.insert(r, &()).unwrap();
    }
    assert!(heap.len() == 4);

    let mut last = 0u8;
    while let Some(r) = heap.pop(&()) {
        assert!(r.key.get() >= last);
        last = r.key.get();
    }
    assert!(heap.is_empty());
}

/// Proof: Decrease on any element keeps the structure valid
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_decrease() {
    let recs = [rec(kani::any()), rec(kani::any()), rec(kani::any())];
    let mut heap: RecHeap<'_> = PairingHeap::new(rec_less);
    for r in &recs {
        heap.insert(r, &()).unwrap();
    }

    let idx: usize = kani::any();
    kani::assume(idx < recs.len());
    let new_key: u8 = kani::any();
    kani::assume(new_key <= recs[idx].key.get());
    recs[idx].key.set(new_key);
    unsafe { heap.decrease(&recs[idx], &()).unwrap() };

    assert!(heap.verify_structure(&()).is_ok());
    assert!(heap.peek().map(|r| r.key.get()) <= Some(new_key));
}

/// Proof: Remove of any element decrements the length
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_remove() {
    let recs = [rec(kani::any()), rec(kani::any()), rec(kani::any())];
    let mut heap: RecHeap<'_> = PairingHeap::new(rec_less);
    for r in &recs {
        heap.insert(r, &()).unwrap();
    }

    let idx: usize = kani::any();
    kani::assume(idx < recs.len());
    unsafe { heap.remove(&recs[idx], &()).unwrap() };

    assert!(heap.len() == 2);
    assert!(!recs[idx].link.is_linked());
    assert!(heap.verify_structure(&()).is_ok());
}

/// Proof: Merge sums the lengths and empties the source
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_merge() {
    let left = [rec(kani::any()), rec(kani::any())];
    let right = [rec(kani::any()), rec(kani::any())];
    let mut dst: RecHeap<'_> = PairingHeap::new(rec_less);
    let mut src: RecHeap<'_> = PairingHeap::new(rec_less);
    for r in &left {
        dst.insert(r, &()).unwrap();
    }
    for r in &right {
        src.insert(r, &()).unwrap();
    }

    dst.merge(&mut src, &());
    assert!(dst.len() == 4);
    assert!(src.is_empty());
    assert!(dst.verify_structure(&()).is_ok());
}
