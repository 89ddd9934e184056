// Frame buffers and head adjustment.
//
// A `FrameBuffer` exposes the bytes between its current start and end and can
// move its start boundary, like `bpf_xdp_adjust_head`. Resizing takes the
// frame by `&mut`, so every cursor and header view drawn from it must already
// be gone; after a resize callers re-derive bounds with a fresh cursor.

use crate::error::DissectError;
use crate::headers::ETH_HLEN;

/// Default headroom in front of a frame (`XDP_PACKET_HEADROOM`).
pub const XDP_PACKET_HEADROOM: usize = 256;

/// Smallest frame a head adjustment may leave behind.
pub const MIN_FRAME_LEN: usize = ETH_HLEN;

/// A mutable frame with an adjustable start boundary.
pub trait FrameBuffer {
    /// Bytes between the current start and end.
    fn data(&self) -> &[u8];

    fn data_mut(&mut self) -> &mut [u8];

    /// Move the start boundary by `delta` bytes: positive shrinks the frame,
    /// negative grows it into the headroom. On failure nothing changes.
    fn adjust_head(&mut self, delta: isize) -> Result<(), DissectError>;

    fn len(&self) -> usize {
        self.data().len()
    }

    fn is_empty(&self) -> bool {
        self.data().is_empty()
    }
}

/// Add `n` bytes in front of the frame.
pub fn grow_head<F: FrameBuffer + ?Sized>(frame: &mut F, n: usize) -> Result<(), DissectError> {
    let delta = -(n as isize);
    frame.adjust_head(delta)?;
    log::trace!("grew frame head by {n} bytes, len now {}", frame.len());
    Ok(())
}

/// Remove `n` bytes from the front of the frame.
pub fn shrink_head<F: FrameBuffer + ?Sized>(frame: &mut F, n: usize) -> Result<(), DissectError> {
    frame.adjust_head(n as isize)?;
    log::trace!("shrank frame head by {n} bytes, len now {}", frame.len());
    Ok(())
}

// ---------------------------------------------------------------------------
// XdpFrame
// ---------------------------------------------------------------------------

/// Owned frame with headroom, laid out like an `xdp_buff`:
/// `[headroom][data .. end][tail]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XdpFrame {
    buf: Vec<u8>,
    start: usize,
    end: usize,
}

impl XdpFrame {
    /// Copy `packet` into a new frame with the default headroom.
    pub fn new(packet: &[u8]) -> Self {
        Self::with_headroom(packet, XDP_PACKET_HEADROOM)
    }

    pub fn with_headroom(packet: &[u8], headroom: usize) -> Self {
        let mut buf = vec![0u8; headroom + packet.len()];
        buf[headroom..].copy_from_slice(packet);
        Self {
            buf,
            start: headroom,
            end: headroom + packet.len(),
        }
    }

    /// Bytes still available in front of the data.
    pub fn headroom(&self) -> usize {
        self.start
    }

    pub fn into_vec(mut self) -> Vec<u8> {
        self.buf.truncate(self.end);
        self.buf.drain(..self.start);
        self.buf
    }
}

impl FrameBuffer for XdpFrame {
    fn data(&self) -> &[u8] {
        &self.buf[self.start..self.end]
    }

    fn data_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.start..self.end]
    }

    fn adjust_head(&mut self, delta: isize) -> Result<(), DissectError> {
        let new_start = self
            .start
            .checked_add_signed(delta)
            .ok_or(DissectError::ResizeFailed {
                delta,
                reason: "not enough headroom",
            })?;
        if new_start + MIN_FRAME_LEN > self.end {
            return Err(DissectError::ResizeFailed {
                delta,
                reason: "frame would be shorter than an Ethernet header",
            });
        }
        self.start = new_start;
        Ok(())
    }
}
