// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Image file load/save for carriers.
//!
//! Carriers may be read from any supported container, lossy ones included.
//! Only lossless containers are offered for output: any lossy re-encode
//! would destroy the low-order bits that carry the payload.

use std::fmt;
use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;

use image::io::Reader as ImageReader;
use image::{ColorType, DynamicImage, ImageError, ImageFormat};

use super::error::CarrierError;
use super::CarrierImage;

/// Output container for an encoded carrier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Png,
    Bmp,
    Tga,
}

impl OutputFormat {
    fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Bmp => ImageFormat::Bmp,
            Self::Tga => ImageFormat::Tga,
        }
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Bmp => "bmp",
            Self::Tga => "tga",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = CarrierError;

    /// Parse `png`, `bmp` or `tga`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "bmp" => Ok(Self::Bmp),
            "tga" => Ok(Self::Tga),
            _ => Err(CarrierError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

fn map_image_error(e: ImageError) -> CarrierError {
    match e {
        ImageError::IoError(io) => CarrierError::Io(io),
        other => CarrierError::Decode(other.to_string()),
    }
}

/// Convert a decoded image to 8-bit samples, keeping its channel count.
fn into_carrier(img: DynamicImage) -> Result<CarrierImage, CarrierError> {
    let (width, height) = (img.width(), img.height());
    let channels = img.color().channel_count();
    let pixels = match channels {
        1 => img.into_luma8().into_raw(),
        2 => img.into_luma_alpha8().into_raw(),
        3 => img.into_rgb8().into_raw(),
        4 => img.into_rgba8().into_raw(),
        n => return Err(CarrierError::UnsupportedChannels(n)),
    };
    CarrierImage::new(pixels, width, height, channels)
}

fn color_type(channels: u8) -> Result<ColorType, CarrierError> {
    match channels {
        1 => Ok(ColorType::L8),
        2 => Ok(ColorType::La8),
        3 => Ok(ColorType::Rgb8),
        4 => Ok(ColorType::Rgba8),
        n => Err(CarrierError::UnsupportedChannels(n)),
    }
}

/// Decode a carrier from an in-memory image file (format sniffed from content).
///
/// TGA has no signature; use [`decode_as`] for it.
pub fn decode(bytes: &[u8]) -> Result<CarrierImage, CarrierError> {
    let img = image::load_from_memory(bytes).map_err(map_image_error)?;
    into_carrier(img)
}

/// Decode a carrier whose container format is already known.
pub fn decode_as(bytes: &[u8], format: ImageFormat) -> Result<CarrierImage, CarrierError> {
    let img = image::load_from_memory_with_format(bytes, format).map_err(map_image_error)?;
    into_carrier(img)
}

/// Load a carrier from disk.
///
/// The format is sniffed from the content and falls back to the file
/// extension, which is the only way to recognize TGA.
///
/// # Errors
/// - [`CarrierError::Io`] if the file cannot be read.
/// - [`CarrierError::Decode`] if it is not a supported image.
pub fn load(path: &Path) -> Result<CarrierImage, CarrierError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = reader.format();
    let img = reader.decode().map_err(map_image_error)?;
    let carrier = into_carrier(img)?;
    log::debug!(
        "loaded {} ({:?}): {}x{}, {} channel(s)",
        path.display(),
        format,
        carrier.width(),
        carrier.height(),
        carrier.channels()
    );
    Ok(carrier)
}

/// Encode a carrier into an in-memory image file.
pub fn encode(carrier: &CarrierImage, format: OutputFormat) -> Result<Vec<u8>, CarrierError> {
    let color = color_type(carrier.channels())?;
    let mut out = Vec::new();
    image::write_buffer_with_format(
        &mut Cursor::new(&mut out),
        carrier.pixels(),
        carrier.width(),
        carrier.height(),
        color,
        format.image_format(),
    )
    .map_err(|e| match e {
        ImageError::IoError(io) => CarrierError::Io(io),
        other => CarrierError::Encode(other.to_string()),
    })?;
    Ok(out)
}

/// Save a carrier to disk.
///
/// The whole file is encoded in memory first, so an encoder failure never
/// leaves a partial file behind.
pub fn save(carrier: &CarrierImage, path: &Path, format: OutputFormat) -> Result<(), CarrierError> {
    let bytes = encode(carrier, format)?;
    std::fs::write(path, &bytes)?;
    log::debug!("saved {} ({format}, {} bytes)", path.display(), bytes.len());
    Ok(())
}
