//! Length-prefixed framing for the stream transport.
//!
//! A frame is `[4-byte big-endian length L][L payload bytes]` with no type
//! tag and no checksum. Payloads are arbitrary serialized bytes that may
//! contain any delimiter value, so the boundary has to be declared up front;
//! the prefix also lets the receiver allocate exactly the needed buffer and
//! tell a truncated frame from a clean close.

use crate::error::{Error, ProtocolError};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// Length prefix size in bytes.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Maximum payload size accepted by default (16MB).
pub const MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

/// Codec imposing message boundaries on an otherwise boundary-less byte
/// stream.
///
/// Used through `FramedRead`/`FramedWrite`, which loop over short reads until
/// a full frame has accumulated. At end of stream, fewer than a full length
/// prefix pending means the peer closed cleanly between frames; a pending
/// prefix with an incomplete payload is a [`ProtocolError::Truncated`]
/// connection fault.
#[derive(Debug)]
pub struct FrameCodec {
    max_frame_size: usize,
}

impl FrameCodec {
    /// Create a new frame codec with the default size bound.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_frame_size: MAX_FRAME_SIZE,
        }
    }

    /// Create a codec with a custom max payload size.
    ///
    /// The bound is capped at `u32::MAX`, the largest length the prefix can
    /// carry.
    #[must_use]
    pub fn with_max_frame_size(mut self, size: usize) -> Self {
        self.max_frame_size = size.min(u32::MAX as usize);
        self
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for FrameCodec {
    type Item = Bytes;
    type Error = Error;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Bytes>, Error> {
        if buf.len() < LENGTH_PREFIX_SIZE {
            return Ok(None);
        }

        // Parse the prefix without consuming it
        let mut prefix = &buf[..LENGTH_PREFIX_SIZE];
        let payload_len = prefix.get_u32() as usize;

        if payload_len > self.max_frame_size {
            return Err(ProtocolError::FrameTooLarge {
                size: payload_len,
                max: self.max_frame_size,
            }
            .into());
        }

        let frame_len = LENGTH_PREFIX_SIZE + payload_len;
        if buf.len() < frame_len {
            buf.reserve(frame_len - buf.len());
            return Ok(None);
        }

        buf.advance(LENGTH_PREFIX_SIZE);
        Ok(Some(buf.split_to(payload_len).freeze()))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Bytes>, Error> {
        if let Some(payload) = self.decode(buf)? {
            return Ok(Some(payload));
        }

        // A partial prefix counts as a clean close between frames, matching
        // what the receive loop treats as normal peer disconnect.
        if buf.len() < LENGTH_PREFIX_SIZE {
            return Ok(None);
        }

        let mut prefix = &buf[..LENGTH_PREFIX_SIZE];
        let expected = prefix.get_u32() as usize;
        Err(ProtocolError::Truncated {
            expected,
            got: buf.len() - LENGTH_PREFIX_SIZE,
        }
        .into())
    }
}

impl Encoder<Bytes> for FrameCodec {
    type Error = Error;

    fn encode(&mut self, payload: Bytes, buf: &mut BytesMut) -> Result<(), Error> {
        let payload_len = payload.len();

        if payload_len > self.max_frame_size {
            return Err(ProtocolError::FrameTooLarge {
                size: payload_len,
                max: self.max_frame_size,
            }
            .into());
        }

        buf.reserve(LENGTH_PREFIX_SIZE + payload_len);
        #[allow(clippy::cast_possible_truncation)]
        buf.put_u32(payload_len as u32);
        buf.put(payload);

        Ok(())
    }
}
