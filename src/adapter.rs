//! Mapping between caller records and their embedded links
//!
//! The heap works on [`PairingLink`]s, but callers think in terms of their own
//! records. An [`Adapter`] converts in both directions. Usually it is derived
//! with [`pairing_adapter!`](crate::pairing_adapter), which computes the field
//! offset at compile time with `core::mem::offset_of!`.
//!
//! A record that must sit in two heaps at once embeds two links and gets one
//! adapter per link:
//!
//! ```rust
//! use intrusive_pairing_heap::{pairing_adapter, PairingLink};
//!
//! struct Job {
//!     deadline: u64,
//!     cost: u32,
//!     by_deadline: PairingLink,
//!     by_cost: PairingLink,
//! }
//!
//! pairing_adapter!(DeadlineAdapter = Job { by_deadline });
//! pairing_adapter!(CostAdapter = Job { by_cost });
//! ```

use core::ptr::NonNull;
use pairing_link::PairingLink;

/// Maps a record type to one [`PairingLink`] embedded in it.
///
/// # Safety
///
/// `link` must return a reference to a field of `value`, and `value` must
/// invert it: for every record `r`, `Self::value(NonNull::from(Self::link(r)))`
/// points at `r`.
pub unsafe trait Adapter {
    /// The record type carrying the link.
    type Value;

    /// Returns the link embedded in `value`.
    fn link(value: &Self::Value) -> &PairingLink;

    /// Recovers the record a link is embedded in.
    ///
    /// # Safety
    ///
    /// `link` must point at the link field of a live `Self::Value`.
    unsafe fn value(link: NonNull<PairingLink>) -> NonNull<Self::Value>;
}

/// Declares a zero-sized [`Adapter`] for one link field of a record type.
///
/// ```rust
/// use intrusive_pairing_heap::{pairing_adapter, Adapter, PairingLink};
/// use std::ptr::NonNull;
///
/// pub struct Wrapper {
///     value: i32,
///     elem: PairingLink,
/// }
///
/// pairing_adapter!(pub WrapperAdapter = Wrapper { elem });
///
/// let w = Wrapper { value: 3, elem: PairingLink::new() };
/// let link = NonNull::from(WrapperAdapter::link(&w));
/// let back = unsafe { WrapperAdapter::value(link) };
/// assert_eq!(back.as_ptr() as *const Wrapper, &w as *const Wrapper);
/// ```
#[macro_export]
macro_rules! pairing_adapter {
    ($(#[$attr:meta])* $vis:vis $name:ident = $value:ty { $field:ident }) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, Default)]
        $vis struct $name;

        unsafe impl $crate::Adapter for $name {
            type Value = $value;

            #[inline]
            fn link(value: &$value) -> &$crate::PairingLink {
                &value.$field
            }

            #[inline]
            unsafe fn value(
                link: ::core::ptr::NonNull<$crate::PairingLink>,
            ) -> ::core::ptr::NonNull<$value> {
                ::core::ptr::NonNull::new_unchecked($crate::container_of_mut!(
                    link.as_ptr(),
                    $value,
                    $field
                ))
            }
        }
    };
}
