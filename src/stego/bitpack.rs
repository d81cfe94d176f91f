// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! One-bit-per-pixel LSB packing.
//!
//! Bit `i` of the digest (LSB-first within each byte) lives in the two
//! low-order bits of pixel `i`'s first channel byte: `0b00` or `0b01` for a
//! data bit. Every pixel after the digest holds [`SENTINEL`] (`0b10`), a value
//! a data bit never produces, so extraction knows where the digest ends
//! without any header.

use crate::carrier::CarrierImage;
use crate::stego::error::StegoError;

/// Two-bit end-of-data marker.
pub const SENTINEL: u8 = 0b10;

const LOW_BITS: u8 = 0b11;

/// Embedding capacity in bits (one per pixel).
pub fn capacity_bits(image: &CarrierImage) -> usize {
    image.pixel_count()
}

/// Write `payload` into `image` and mark the remaining pixels with the sentinel.
///
/// # Errors
/// [`StegoError::MessageTooLarge`] if `payload.len() * 8 > capacity_bits(image)`.
/// The capacity check runs before any pixel is touched, so a failed call
/// leaves the image unchanged.
pub fn embed(image: &mut CarrierImage, payload: &[u8]) -> Result<(), StegoError> {
    let capacity = capacity_bits(image);
    let required = payload
        .len()
        .checked_mul(8)
        .ok_or(StegoError::MessageTooLarge { required_bits: usize::MAX, capacity_bits: capacity })?;
    if required > capacity {
        return Err(StegoError::MessageTooLarge { required_bits: required, capacity_bits: capacity });
    }

    for i in 0..required {
        let bit = (payload[i / 8] >> (i % 8)) & 1;
        let px = image.first_channel_mut(i);
        *px = (*px & !LOW_BITS) | bit;
    }
    for i in required..capacity {
        let px = image.first_channel_mut(i);
        *px = (*px & !LOW_BITS) | SENTINEL;
    }

    log::trace!("embedded {required} bits, {} sentinel pixels", capacity - required);
    Ok(())
}

/// Read embedded bytes into `dest`, returning the number of complete bytes.
///
/// `dest` is zeroed first and must hold at least `capacity_bits(image) / 8`
/// bytes. Extraction stops at the first sentinel pixel; a trailing partial
/// byte is discarded.
///
/// # Errors
/// [`StegoError::MessageTooLarge`] if `dest` is smaller than the capacity requires.
pub fn extract_into(image: &CarrierImage, dest: &mut [u8]) -> Result<usize, StegoError> {
    let capacity = capacity_bits(image);
    if dest.len() < capacity / 8 {
        return Err(StegoError::MessageTooLarge {
            required_bits: capacity,
            capacity_bits: dest.len() * 8,
        });
    }
    dest.fill(0);

    let mut bits_read = 0usize;
    while bits_read < capacity {
        let low = image.first_channel(bits_read) & LOW_BITS;
        if low == SENTINEL {
            break;
        }
        let byte = bits_read / 8;
        if byte >= dest.len() {
            // Only whole bytes are returned; the capacity tail cannot complete one.
            break;
        }
        dest[byte] |= (low & 1) << (bits_read % 8);
        bits_read += 1;
    }

    Ok(bits_read / 8)
}

/// Extract the embedded bytes into a freshly sized buffer.
pub fn extract(image: &CarrierImage) -> Vec<u8> {
    let mut out = vec![0u8; capacity_bits(image) / 8];
    // The buffer is sized from the capacity, so the size check cannot fail.
    let n = extract_into(image, &mut out).unwrap_or(0);
    out.truncate(n);
    out
}
