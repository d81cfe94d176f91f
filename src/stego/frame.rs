// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Message frame construction and parsing.
//!
//! The frame wraps the message before block padding and encryption so the
//! decoder can tell message bytes from padding:
//!
//! ```text
//! [4 bytes] message length (big-endian u32)
//! [N bytes] message
//! [4 bytes] CRC-32 of everything above
//! [P bytes] zero padding up to the next cipher block boundary
//! ```
//!
//! Total frame size = padded_size(8 + N, block_len). The CRC is a corruption
//! check (it also catches almost every wrong-key decode), not authentication.

use crate::stego::error::StegoError;
use crate::stego::padding::padded_size;

/// Fixed overhead: length(4) + crc(4) = 8 bytes.
pub const FRAME_OVERHEAD: usize = 4 + 4;

/// Largest message the u32 length prefix can describe.
pub const MAX_MESSAGE_LEN: usize = u32::MAX as usize;

/// Frame length for an `n`-byte message, padded to `block_len`.
pub fn framed_len(n: usize, block_len: usize) -> usize {
    padded_size(n + FRAME_OVERHEAD, block_len)
}

/// Build a zero-padded frame around `message`.
///
/// # Errors
/// [`StegoError::MessageTooLarge`] if the message does not fit the u32 length field.
pub fn build_frame(message: &[u8], block_len: usize) -> Result<Vec<u8>, StegoError> {
    let len = u32::try_from(message.len()).map_err(|_| StegoError::MessageTooLarge {
        required_bits: message.len().saturating_mul(8),
        capacity_bits: MAX_MESSAGE_LEN.saturating_mul(8),
    })?;

    let total = framed_len(message.len(), block_len);
    let mut frame = Vec::with_capacity(total);

    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(message);

    let crc = crc32fast::hash(&frame);
    frame.extend_from_slice(&crc.to_be_bytes());

    frame.resize(total, 0);
    Ok(frame)
}

/// Parse a decrypted frame, returning the message it carries.
///
/// The length field must fit inside `data`, the CRC must match, and every
/// byte after the CRC must be zero.
///
/// # Errors
/// [`StegoError::FrameCorrupted`] if any of those checks fail.
pub fn parse_frame(mut data: Vec<u8>) -> Result<Vec<u8>, StegoError> {
    if data.len() < FRAME_OVERHEAD {
        return Err(StegoError::FrameCorrupted);
    }

    let len = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
    let body_end = match len.checked_add(4) {
        Some(end) if end.checked_add(4).is_some_and(|crc_end| crc_end <= data.len()) => end,
        _ => return Err(StegoError::FrameCorrupted),
    };

    let stored_crc = u32::from_be_bytes([
        data[body_end],
        data[body_end + 1],
        data[body_end + 2],
        data[body_end + 3],
    ]);
    if stored_crc != crc32fast::hash(&data[..body_end]) {
        return Err(StegoError::FrameCorrupted);
    }

    if data[body_end + 4..].iter().any(|&b| b != 0) {
        return Err(StegoError::FrameCorrupted);
    }

    data.truncate(body_end);
    data.drain(..4);
    Ok(data)
}
