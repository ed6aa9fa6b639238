//! Conversion of fixed width numbers to and from their on-wire layout.
//!
//! BSON stores every multi-byte number in little endian order. The host byte
//! order is detected once and the copy direction is picked from it, so the
//! same bytes come out on every architecture.

use paste::paste;
use std::mem::size_of;

/// `true` when the host stores the most significant byte first.
pub const BIG_ENDIAN: bool = is_big_endian();

/// Detects the host byte order with a known byte pattern.
pub const fn is_big_endian() -> bool {
    0x0102_0304_u32.to_ne_bytes()[0] == 0x01
}

/// Copies native ordered `from` into little endian ordered `to` (or the
/// other way around, the transform is its own inverse).
#[inline]
fn swap_copy(from: &[u8], to: &mut [u8]) {
    if BIG_ENDIAN {
        to.iter_mut()
            .zip(from.iter().rev())
            .for_each(|(x, a)| *x = *a);
    } else {
        to.copy_from_slice(from);
    }
}

macro_rules! endian_impl {
    ($($t:ty),*) => {
        $(paste! {
            /// Encodes the value as its little endian bytes.
            #[inline]
            pub fn [<$t _to_le>](value: $t) -> [u8; size_of::<$t>()] {
                let mut out = [0u8; size_of::<$t>()];
                swap_copy(&value.to_ne_bytes(), &mut out);
                out
            }

            /// Decodes a little endian value starting at `start`.
            ///
            /// # Panics
            ///
            /// If `buf` is shorter than `start` plus the width of the type.
            #[inline]
            pub fn [<read_ $t>](buf: &[u8], start: usize) -> $t {
                let mut out = [0u8; size_of::<$t>()];
                swap_copy(&buf[start..start + size_of::<$t>()], &mut out);
                <$t>::from_ne_bytes(out)
            }

            /// Bounds checked version of the read, `None` when the value
            /// would not fit in `buf`.
            #[inline]
            pub fn [<checked_read_ $t>](buf: &[u8], start: usize) -> Option<$t> {
                let end = start.checked_add(size_of::<$t>())?;
                if end > buf.len() {
                    None
                } else {
                    Some([<read_ $t>](buf, start))
                }
            }
        })*
    };
}

endian_impl!(u32, i32, u64, i64, f64);
