// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Steganographic encoding and decoding pipelines.
//!
//! The message is framed (length + CRC), zero padded to the AES block
//! length, encrypted with AES-128-ECB, optionally base64-wrapped, and then
//! written one bit per pixel into the low bits of each pixel's first channel.
//! Decoding reverses each step; the sentinel written after the digest marks
//! where the embedded data ends.

pub mod bitpack;
pub mod capacity;
pub mod crypto;
pub mod diag;
pub mod error;
pub mod frame;
pub mod padding;
pub mod pipeline;
pub mod stage;
pub mod text_safe;

pub use diag::Diagnostics;
pub use error::{CryptoError, ErrorKind, StegoError};
pub use pipeline::{Pipeline, TextSafe};

/// Read limit for message sources whose size is unknown up front (stdin).
pub const DEFAULT_READ_LIMIT: usize = 100_000;

/// Encode `message` into `carrier` with a one-shot pipeline.
pub fn encode_message(
    carrier: &mut crate::carrier::CarrierImage,
    message: &[u8],
    key: &[u8],
    iv: &[u8],
    text_safe: TextSafe,
) -> Result<(), StegoError> {
    Pipeline::new(key, iv, text_safe, Diagnostics::new("encode"))?.encode_into(message, carrier)
}

/// Decode the message hidden in `carrier` with a one-shot pipeline.
pub fn decode_message(
    carrier: &crate::carrier::CarrierImage,
    key: &[u8],
    iv: &[u8],
    text_safe: TextSafe,
) -> Result<Vec<u8>, StegoError> {
    Pipeline::new(key, iv, text_safe, Diagnostics::new("decode"))?.decode_from(carrier)
}
