use paste::paste;

use crate::endian;

/// Write position over a caller owned, fixed capacity output buffer.
///
/// Every builder of a document tree writes through the same `Cursor`, a
/// child borrows it from its parent for as long as the child is open.
///
/// Writes beyond the capacity are dropped but still advance the position,
/// so the position always tells the length the output would have had.
pub struct Cursor<'a> {
    buf: &'a mut [u8],
    current: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Cursor { buf, current: 0 }
    }

    /// Number of bytes written so far, including the dropped ones.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// `true` once any write was dropped.
    pub fn overflowed(&self) -> bool {
        self.current > self.buf.len()
    }

    /// The bytes written so far, clamped to the capacity.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.current.min(self.buf.len())]
    }

    pub(crate) fn seek(&mut self, position: usize) {
        self.current = position;
    }

    #[inline]
    pub fn write_u8(&mut self, byte: u8) {
        if let Some(x) = self.buf.get_mut(self.current) {
            *x = byte;
        }
        self.current += 1;
    }

    pub fn extend_from_slice(&mut self, slice: &[u8]) {
        let start = self.current.min(self.buf.len());
        let end = self.current.saturating_add(slice.len()).min(self.buf.len());
        let fit = end - start;
        self.buf[start..end].copy_from_slice(&slice[..fit]);
        self.current += slice.len();
    }

    /// Writes `s` as a cstring, stopping at its first `'\0'` if any.
    pub fn write_cstr(&mut self, s: &str) {
        let bytes = s.as_bytes();
        let len = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
        self.extend_from_slice(&bytes[..len]);
        self.write_u8(0x00);
    }
}

macro_rules! write_impl {
    ($($t:ty),*) => {
        impl<'a> Cursor<'a> {
            $(paste! {
                pub fn [<write_ $t>] (&mut self, value: $t) {
                    self.extend_from_slice(&endian::[<$t _to_le>](value)[..]);
                }
            })*
        }
    };
}

write_impl!(i32, i64, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_data() {
        let mut out = [0u8; 8];
        let mut buf = Cursor::new(&mut out);
        assert_eq!(buf.position(), 0);

        buf.extend_from_slice(&[0, 1, 2, 3, 4, 5]);
        assert_eq!(buf.position(), 6);
        assert_eq!(buf.as_slice(), &[0, 1, 2, 3, 4, 5]);
        assert!(!buf.overflowed());
    }

    #[test]
    fn write_past_capacity() {
        let mut out = [0xEEu8; 6];
        let mut buf = Cursor::new(&mut out[..3]);
        buf.write_u8(1);
        buf.write_i32(0x0504_0302);
        buf.write_u8(6);
        assert_eq!(buf.position(), 6);
        assert!(buf.overflowed());
        assert_eq!(buf.as_slice(), &[1, 2, 3]);
        assert_eq!(out, [1, 2, 3, 0xEE, 0xEE, 0xEE]);
    }

    #[test]
    fn cstr_stops_at_nul() {
        let mut out = [0xEEu8; 8];
        let mut buf = Cursor::new(&mut out);
        buf.write_cstr("ab\0cd");
        assert_eq!(buf.as_slice(), b"ab\0");
    }

    #[test]
    fn seek_overwrites() {
        let mut out = [0u8; 4];
        let mut buf = Cursor::new(&mut out);
        buf.write_i32(0);
        buf.seek(0);
        buf.write_i32(7);
        assert_eq!(buf.as_slice(), &[7, 0, 0, 0]);
    }
}
