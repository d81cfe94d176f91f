// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the steganography pipeline.
//!
//! [`StegoError`] covers all failure modes from key loading through
//! encryption, text-safe encoding, bit packing and carrier persistence.
//! [`StegoError::kind`] folds them into the five categories reported to users.

use core::fmt;
use std::io;

use crate::carrier::error::CarrierError;

/// Coarse error category, used for diagnostics and exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid key, IV, path or option value.
    Config,
    /// Open/read/write failure on a message, key or image file.
    Io,
    /// Key/IV length mismatch, unaligned buffer, or provider failure.
    Crypto,
    /// Message does not fit the carrier (or the read limit).
    Capacity,
    /// Malformed base64, corrupted frame, or undecodable/unsupported image.
    Format,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Config => "config error",
            Self::Io => "I/O error",
            Self::Crypto => "crypto error",
            Self::Capacity => "capacity error",
            Self::Format => "format error",
        };
        f.write_str(s)
    }
}

/// Errors reported by the AES adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Key length differs from the algorithm's key length.
    InvalidKeyLength { expected: usize, actual: usize },
    /// IV length differs from the cipher block length.
    InvalidIvLength { expected: usize, actual: usize },
    /// Buffer length is not a multiple of the block length.
    UnalignedBuffer { len: usize, block_len: usize },
    /// The cipher provider rejected the operation.
    Provider { source: &'static str, message: String },
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKeyLength { expected, actual } => {
                write!(f, "key must be {expected} bytes, got {actual}")
            }
            Self::InvalidIvLength { expected, actual } => {
                write!(f, "initialization vector must be {expected} bytes, got {actual}")
            }
            Self::UnalignedBuffer { len, block_len } => {
                write!(f, "buffer of {len} bytes is not a multiple of the {block_len}-byte block")
            }
            Self::Provider { source, message } => write!(f, "{source}: {message}"),
        }
    }
}

impl std::error::Error for CryptoError {}

/// Errors that can occur during steganographic encoding or decoding.
#[derive(Debug)]
pub enum StegoError {
    /// Missing or invalid configuration value.
    Config(String),
    /// I/O failure on a message, key or output file.
    Io { context: String, source: io::Error },
    /// Cipher setup or block transform failed.
    Crypto(CryptoError),
    /// The digest needs more bits than the carrier (or buffer) offers.
    MessageTooLarge { required_bits: usize, capacity_bits: usize },
    /// The message source exceeds the read limit for unsized input.
    ReadLimitExceeded { limit: usize },
    /// The extracted data is not valid base64.
    InvalidTextSafe(String),
    /// Length, CRC or padding check failed after decryption.
    FrameCorrupted,
    /// The carrier image could not be loaded, built or saved.
    Carrier(CarrierError),
}

impl StegoError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::Io { .. } => ErrorKind::Io,
            Self::Crypto(_) => ErrorKind::Crypto,
            Self::MessageTooLarge { .. } | Self::ReadLimitExceeded { .. } => ErrorKind::Capacity,
            Self::InvalidTextSafe(_) | Self::FrameCorrupted => ErrorKind::Format,
            Self::Carrier(e) => e.kind(),
        }
    }

    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "invalid configuration: {msg}"),
            Self::Io { context, source } => write!(f, "{context}: {source}"),
            Self::Crypto(e) => write!(f, "cipher failure: {e}"),
            Self::MessageTooLarge { required_bits, capacity_bits } => write!(
                f,
                "message too large for this image ({required_bits} bits needed, {capacity_bits} available)"
            ),
            Self::ReadLimitExceeded { limit } => {
                write!(f, "message exceeds the {limit}-byte limit for unsized input")
            }
            Self::InvalidTextSafe(msg) => write!(f, "malformed base64 payload: {msg}"),
            Self::FrameCorrupted => write!(f, "payload frame corrupted (wrong key?)"),
            Self::Carrier(e) => write!(f, "carrier image: {e}"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Crypto(e) => Some(e),
            Self::Carrier(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CryptoError> for StegoError {
    fn from(e: CryptoError) -> Self {
        Self::Crypto(e)
    }
}

impl From<CarrierError> for StegoError {
    fn from(e: CarrierError) -> Self {
        Self::Carrier(e)
    }
}
