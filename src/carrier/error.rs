// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for carrier construction and the image file codec.

use std::fmt;
use std::io;

use crate::stego::error::ErrorKind;

/// Errors that can occur while building, loading or saving a carrier image.
#[derive(Debug)]
pub enum CarrierError {
    /// The image file could not be opened, read or written.
    Io(io::Error),
    /// The file is not a decodable image.
    Decode(String),
    /// The encoder refused the pixel data.
    Encode(String),
    /// Pixel buffer length does not match width × height × channels.
    InvalidGeometry { width: u32, height: u32, channels: u8, len: usize },
    /// Channel count outside 1..=4.
    UnsupportedChannels(u8),
    /// Output format name other than png, bmp or tga.
    UnsupportedFormat(String),
}

impl CarrierError {
    /// Category of this error: file system failures are I/O, the rest are format errors.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            _ => ErrorKind::Format,
        }
    }
}

impl fmt::Display for CarrierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "{e}"),
            Self::Decode(msg) => write!(f, "cannot decode image: {msg}"),
            Self::Encode(msg) => write!(f, "cannot encode image: {msg}"),
            Self::InvalidGeometry { width, height, channels, len } => write!(
                f,
                "pixel buffer of {len} bytes does not match {width}x{height} with {channels} channel(s)"
            ),
            Self::UnsupportedChannels(n) => write!(f, "unsupported channel count: {n}"),
            Self::UnsupportedFormat(name) => {
                write!(f, "unsupported output image type '{name}' (expected png, bmp or tga)")
            }
        }
    }
}

impl std::error::Error for CarrierError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CarrierError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
