// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Encode/decode pipeline.
//!
//! A pipeline is an ordered list of stages fixed at construction:
//! 1. `frame`: length prefix + CRC, zero padded to the AES block length
//! 2. `cipher`: AES-128-ECB in place
//! 3. `base64`: text-safe transport encoding (only with [`TextSafe::Base64`])
//!
//! Encoding runs the stages in order and bit-packs the resulting digest into
//! the carrier. Decoding unpacks the digest and runs the stages in reverse.

use crate::carrier::CarrierImage;
use crate::stego::bitpack;
use crate::stego::crypto::CipherContext;
use crate::stego::diag::Diagnostics;
use crate::stego::error::StegoError;
use crate::stego::stage::{CipherStage, FrameStage, PipelineStage, Stage, TextSafeStage};

/// Whether the ciphertext is base64-wrapped before embedding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextSafe {
    #[default]
    Off,
    Base64,
}

impl TextSafe {
    pub fn from_flag(enabled: bool) -> Self {
        if enabled {
            Self::Base64
        } else {
            Self::Off
        }
    }
}

/// Key-bound encode/decode pipeline.
///
/// Errors go back to the caller, which reports them once. Stage failures
/// are only noted at debug level under the stage's scope.
#[derive(Debug)]
pub struct Pipeline {
    text_safe: TextSafe,
    stages: Vec<PipelineStage>,
    diag: Diagnostics,
}

impl Pipeline {
    /// Build a pipeline for `key`/`iv` (16 bytes each).
    ///
    /// # Errors
    /// [`StegoError::Crypto`] if the key or IV has the wrong length.
    pub fn new(key: &[u8], iv: &[u8], text_safe: TextSafe, diag: Diagnostics) -> Result<Self, StegoError> {
        let ctx = CipherContext::new(key, iv)?;
        let block_len = ctx.block_len();

        let mut stages = vec![
            PipelineStage::Frame(FrameStage::new(block_len)),
            PipelineStage::Cipher(CipherStage::new(ctx)),
        ];
        if text_safe == TextSafe::Base64 {
            stages.push(PipelineStage::TextSafe(TextSafeStage));
        }

        let pipeline = Self { text_safe, stages, diag };
        log::debug!(target: pipeline.diag.target(), "stages: {}", pipeline.stage_names().join(" -> "));
        Ok(pipeline)
    }

    pub fn text_safe(&self) -> TextSafe {
        self.text_safe
    }

    /// Stage names in encode order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Turn a message into the digest that gets embedded.
    pub fn seal(&self, message: &[u8]) -> Result<Vec<u8>, StegoError> {
        let mut data = message.to_vec();
        for stage in &self.stages {
            let diag = self.diag.scoped(stage.name());
            data = stage.forward(data, &diag).map_err(|e| {
                log::debug!(target: diag.target(), "failed: {e}");
                e
            })?;
        }
        Ok(data)
    }

    /// Recover the message from an extracted digest.
    pub fn open(&self, digest: Vec<u8>) -> Result<Vec<u8>, StegoError> {
        let mut data = digest;
        for stage in self.stages.iter().rev() {
            let diag = self.diag.scoped(stage.name());
            data = stage.inverse(data, &diag).map_err(|e| {
                log::debug!(target: diag.target(), "failed: {e}");
                e
            })?;
        }
        Ok(data)
    }

    /// Seal `message` and embed the digest into `carrier`.
    ///
    /// # Errors
    /// - [`StegoError::MessageTooLarge`] if the digest exceeds the carrier's
    ///   capacity. The carrier is not modified in that case.
    /// - Any stage error from [`Pipeline::seal`].
    pub fn encode_into(&self, message: &[u8], carrier: &mut CarrierImage) -> Result<(), StegoError> {
        let digest = self.seal(message)?;
        bitpack::embed(carrier, &digest)?;
        log::info!(
            target: self.diag.target(),
            "embedded {} message bytes as {} digest bytes ({} of {} bits used)",
            message.len(),
            digest.len(),
            digest.len() * 8,
            bitpack::capacity_bits(carrier)
        );
        Ok(())
    }

    /// Extract and open the message hidden in `carrier`.
    pub fn decode_from(&self, carrier: &CarrierImage) -> Result<Vec<u8>, StegoError> {
        let digest = bitpack::extract(carrier);
        log::debug!(target: self.diag.target(), "extracted {} digest bytes", digest.len());
        let message = self.open(digest)?;
        log::info!(target: self.diag.target(), "recovered {} message bytes", message.len());
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8; 16] = b"sixteen byte key";
    const IV: &[u8; 16] = b"sixteen byte iv!";

    fn pipeline(text_safe: TextSafe) -> Pipeline {
        Pipeline::new(KEY, IV, text_safe, Diagnostics::new("test")).unwrap()
    }

    #[test]
    fn stage_order_follows_mode() {
        let plain = pipeline(TextSafe::Off);
        assert_eq!(plain.text_safe(), TextSafe::Off);
        assert_eq!(plain.stage_names(), ["frame", "cipher"]);
        let wrapped = pipeline(TextSafe::Base64);
        assert_eq!(wrapped.text_safe(), TextSafe::Base64);
        assert_eq!(wrapped.stage_names(), ["frame", "cipher", "base64"]);
    }

    #[test]
    fn hello_digest_is_one_block() {
        let p = pipeline(TextSafe::Off);
        let digest = p.seal(b"hello").unwrap();
        assert_eq!(digest.len(), 16);

        // Decrypting by hand exposes the frame and its zero padding.
        let ctx = CipherContext::new(KEY, IV).unwrap();
        let mut plain = digest.clone();
        ctx.decrypt_in_place(&mut plain).unwrap();
        assert_eq!(&plain[..9], b"\0\0\0\x05hello");
        assert_eq!(&plain[9..13], &crc32fast::hash(&plain[..9]).to_be_bytes());
        assert_eq!(&plain[13..], &[0, 0, 0]);

        assert_eq!(p.open(digest).unwrap(), b"hello");
    }

    #[test]
    fn base64_digest_is_printable() {
        let p = pipeline(TextSafe::Base64);
        let digest = p.seal(b"hello").unwrap();
        assert_eq!(digest.len(), 24);
        assert!(digest.iter().all(|b| b.is_ascii_alphanumeric() || b"+/=".contains(b)));
        assert_eq!(p.open(digest).unwrap(), b"hello");
    }

    #[test]
    fn bad_key_length_rejected() {
        let err = Pipeline::new(&[0u8; 10], IV, TextSafe::Off, Diagnostics::default()).unwrap_err();
        assert!(matches!(err, StegoError::Crypto(_)));
    }

    #[test]
    fn wrong_key_fails_frame_check() {
        let digest = pipeline(TextSafe::Off).seal(b"attack at dawn").unwrap();
        let other = Pipeline::new(b"another key here", IV, TextSafe::Off, Diagnostics::default()).unwrap();
        assert!(matches!(other.open(digest), Err(StegoError::FrameCorrupted)));
    }

    #[test]
    fn mismatched_mode_fails() {
        let digest = pipeline(TextSafe::Off).seal(b"attack at dawn").unwrap();
        assert!(pipeline(TextSafe::Base64).open(digest).is_err());
    }
}
