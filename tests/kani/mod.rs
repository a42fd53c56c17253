//! Kani proof harnesses
//!
//! - `heap_proofs.rs`: bounded proofs over small heaps with symbolic keys

#[cfg(kani)]
#[path = "heap_proofs.rs"]
mod heap_proofs;
