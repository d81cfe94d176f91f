// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Carrier capacity estimation.
//!
//! Maps between message length and digest length for a given transport
//! mode, accounting for:
//! - Frame overhead (length prefix + CRC)
//! - Zero padding to the cipher block length
//! - Base64 expansion when the text-safe layer is active

use crate::carrier::CarrierImage;
use crate::stego::bitpack;
use crate::stego::crypto::BLOCK_LEN;
use crate::stego::frame::{framed_len, FRAME_OVERHEAD};
use crate::stego::padding::trim;
use crate::stego::pipeline::TextSafe;
use crate::stego::text_safe::encoded_len;

/// Number of bytes embedded in the carrier for an `n`-byte message.
pub fn digest_len(n: usize, text_safe: TextSafe) -> usize {
    let framed = framed_len(n, BLOCK_LEN);
    match text_safe {
        TextSafe::Off => framed,
        TextSafe::Base64 => encoded_len(framed),
    }
}

/// Largest message (in bytes) whose digest fits in `capacity_bits`.
///
/// Returns `None` if not even an empty message fits (a frame is always at
/// least one cipher block).
pub fn max_message_len(capacity_bits: usize, text_safe: TextSafe) -> Option<usize> {
    let capacity_bytes = capacity_bits / 8;
    let max_framed = match text_safe {
        TextSafe::Off => capacity_bytes,
        TextSafe::Base64 => capacity_bytes / 4 * 3,
    };
    let framed = trim(max_framed, BLOCK_LEN);
    framed.checked_sub(FRAME_OVERHEAD).filter(|_| framed >= BLOCK_LEN)
}

/// Largest message (in bytes) the given carrier can hold.
pub fn estimate_capacity(image: &CarrierImage, text_safe: TextSafe) -> Option<usize> {
    max_message_len(bitpack::capacity_bits(image), text_safe)
}
