// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Carrier images: an owned 8-bit interleaved pixel buffer plus geometry.
//!
//! The bit packer only ever touches the first channel byte of each pixel, so
//! the carrier keeps the channel count the file was stored with. The `codec`
//! submodule loads and saves carriers as PNG, BMP or TGA.

pub mod codec;
pub mod error;

use error::CarrierError;

/// An image whose pixel bytes host the embedded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierImage {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl CarrierImage {
    /// Wrap an interleaved pixel buffer.
    ///
    /// # Errors
    /// - [`CarrierError::UnsupportedChannels`] unless `1 <= channels <= 4`.
    /// - [`CarrierError::InvalidGeometry`] if `pixels.len() != width * height * channels`.
    pub fn new(pixels: Vec<u8>, width: u32, height: u32, channels: u8) -> Result<Self, CarrierError> {
        if channels == 0 || channels > 4 {
            return Err(CarrierError::UnsupportedChannels(channels));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|p| p.checked_mul(channels as usize));
        if expected != Some(pixels.len()) {
            return Err(CarrierError::InvalidGeometry { width, height, channels, len: pixels.len() });
        }
        Ok(Self { pixels, width, height, channels })
    }

    /// A freshly allocated carrier with every byte set to `fill`.
    pub fn filled(width: u32, height: u32, channels: u8, fill: u8) -> Result<Self, CarrierError> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|p| p.checked_mul(channels as usize))
            .ok_or(CarrierError::InvalidGeometry { width, height, channels, len: usize::MAX })?;
        Self::new(vec![fill; len], width, height, channels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Number of pixels (width × height).
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw interleaved pixel bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// First-channel byte of pixel `i` (raster order).
    pub fn first_channel(&self, i: usize) -> u8 {
        self.pixels[i * self.channels as usize]
    }

    pub(crate) fn first_channel_mut(&mut self, i: usize) -> &mut u8 {
        let stride = self.channels as usize;
        &mut self.pixels[i * stride]
    }
}
