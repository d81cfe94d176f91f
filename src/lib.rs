// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # pixsteg-core
//!
//! Hides encrypted messages in the low bits of raster images.
//!
//! A message is framed with its length and a CRC-32, zero padded to the AES
//! block length, encrypted with AES-128-ECB and optionally base64-wrapped.
//! The resulting digest is written one bit per pixel into the first channel
//! of the carrier, followed by a sentinel marking the end of data.
//!
//! Carriers are decoded to raw interleaved pixels (`carrier` module) and must
//! be saved in a lossless format (PNG, BMP or TGA) for the message to survive.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use pixsteg_core::{encode_message, decode_message, CarrierImage, TextSafe};
//!
//! let key = b"sixteen byte key";
//! let iv = b"sixteen byte iv!";
//! let mut carrier = CarrierImage::filled(64, 64, 3, 0x80).unwrap();
//! encode_message(&mut carrier, b"secret message", key, iv, TextSafe::Off).unwrap();
//! let decoded = decode_message(&carrier, key, iv, TextSafe::Off).unwrap();
//! assert_eq!(decoded, b"secret message");
//! ```

pub mod carrier;
pub mod config;
pub mod job;
pub mod stego;

pub use carrier::codec::OutputFormat;
pub use carrier::error::CarrierError;
pub use carrier::CarrierImage;
pub use config::{JobConfig, Mode};
pub use stego::capacity::{digest_len, estimate_capacity, max_message_len};
pub use stego::{decode_message, encode_message, Diagnostics, ErrorKind, Pipeline, StegoError, TextSafe};
