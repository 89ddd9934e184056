// Bounds-checked read position within a frame buffer.
//
// The cursor owns the unread tail of the frame as a `&mut [u8]` and hands
// out disjoint sub-slices with `split_at_mut`, so every header view it
// produces can be held (and mutated) at the same time as the others while
// the frame itself stays exclusively borrowed.

use crate::error::DissectError;
use crate::headers::HeaderView;

/// Current parsing position inside one frame.
///
/// Invariant: `position() + remaining()` always equals the frame length the
/// cursor was created with. Failed operations leave the cursor untouched.
#[derive(Debug)]
pub struct HeaderCursor<'a> {
    rest: &'a mut [u8],
    pos: usize,
}

impl<'a> HeaderCursor<'a> {
    /// Start a cursor at the first byte of `data`.
    ///
    /// After a head adjustment, build a new cursor from the frame: the old one
    /// cannot still be alive because it borrows the frame.
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { rest: data, pos: 0 }
    }

    /// Offset of the cursor from the start of the frame.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes between the cursor and the end of the frame.
    pub fn remaining(&self) -> usize {
        self.rest.len()
    }

    /// Fails with `Truncated` unless at least `n` bytes remain.
    pub fn ensure(&self, n: usize) -> Result<(), DissectError> {
        if n > self.rest.len() {
            return Err(DissectError::Truncated {
                offset: self.pos,
                needed: n,
                available: self.rest.len(),
            });
        }
        Ok(())
    }

    /// Look at the next `n` bytes without moving.
    pub fn peek(&self, n: usize) -> Result<&[u8], DissectError> {
        self.ensure(n)?;
        Ok(&self.rest[..n])
    }

    /// Consume the next `n` bytes and return them.
    pub fn advance(&mut self, n: usize) -> Result<&'a mut [u8], DissectError> {
        self.ensure(n)?;
        let rest = std::mem::take(&mut self.rest);
        let (head, tail) = rest.split_at_mut(n);
        self.rest = tail;
        self.pos += n;
        Ok(head)
    }

    /// Consume a fixed-size header and wrap it in its typed view.
    pub fn advance_header<H: HeaderView<'a>>(&mut self) -> Result<H, DissectError> {
        self.advance(H::LEN).map(H::wrap)
    }

    /// Consume `len` bytes (at least `H::LEN`) as one variable-length header.
    pub fn advance_var_header<H: HeaderView<'a>>(&mut self, len: usize) -> Result<H, DissectError> {
        debug_assert!(len >= H::LEN);
        self.advance(len).map(H::wrap)
    }
}
