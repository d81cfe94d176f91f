// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Byte-transform stages composed by the pipeline.
//!
//! Each stage takes ownership of the working buffer and hands back the
//! transformed one. `forward` runs on encode, `inverse` on decode.

use crate::stego::crypto::CipherContext;
use crate::stego::diag::Diagnostics;
use crate::stego::error::StegoError;
use crate::stego::{frame, padding, text_safe};

/// A reversible transform over an owned byte buffer.
pub trait Stage {
    /// Short stable name, used in logs and `Pipeline::stage_names`.
    fn name(&self) -> &'static str;

    /// Encode-direction transform.
    fn forward(&self, data: Vec<u8>, diag: &Diagnostics) -> Result<Vec<u8>, StegoError>;

    /// Decode-direction transform.
    fn inverse(&self, data: Vec<u8>, diag: &Diagnostics) -> Result<Vec<u8>, StegoError>;
}

/// Length prefix + CRC + zero padding to the cipher block length.
#[derive(Debug, Clone, Copy)]
pub struct FrameStage {
    block_len: usize,
}

impl FrameStage {
    pub fn new(block_len: usize) -> Self {
        Self { block_len }
    }
}

impl Stage for FrameStage {
    fn name(&self) -> &'static str {
        "frame"
    }

    fn forward(&self, data: Vec<u8>, diag: &Diagnostics) -> Result<Vec<u8>, StegoError> {
        let framed = frame::build_frame(&data, self.block_len)?;
        log::debug!(target: diag.target(), "framed {} message bytes into {}", data.len(), framed.len());
        Ok(framed)
    }

    fn inverse(&self, data: Vec<u8>, diag: &Diagnostics) -> Result<Vec<u8>, StegoError> {
        let framed_len = data.len();
        let message = frame::parse_frame(data)?;
        log::debug!(target: diag.target(), "unframed {} message bytes from {framed_len}", message.len());
        Ok(message)
    }
}

/// AES-128-ECB over the whole buffer.
///
/// On decode the buffer is first trimmed to a block multiple, whichever
/// transport produced it.
#[derive(Debug)]
pub struct CipherStage {
    ctx: CipherContext,
}

impl CipherStage {
    pub fn new(ctx: CipherContext) -> Self {
        Self { ctx }
    }
}

impl Stage for CipherStage {
    fn name(&self) -> &'static str {
        "cipher"
    }

    fn forward(&self, mut data: Vec<u8>, diag: &Diagnostics) -> Result<Vec<u8>, StegoError> {
        self.ctx.encrypt_in_place(&mut data)?;
        log::debug!(target: diag.target(), "encrypted {} bytes", data.len());
        Ok(data)
    }

    fn inverse(&self, mut data: Vec<u8>, diag: &Diagnostics) -> Result<Vec<u8>, StegoError> {
        let aligned = padding::trim(data.len(), self.ctx.block_len());
        if aligned != data.len() {
            log::warn!(
                target: diag.target(),
                "discarding {} trailing bytes outside the block grid",
                data.len() - aligned
            );
            data.truncate(aligned);
        }
        self.ctx.decrypt_in_place(&mut data)?;
        log::debug!(target: diag.target(), "decrypted {} bytes", data.len());
        Ok(data)
    }
}

/// Base64 transport encoding of the ciphertext.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSafeStage;

impl Stage for TextSafeStage {
    fn name(&self) -> &'static str {
        "base64"
    }

    fn forward(&self, data: Vec<u8>, diag: &Diagnostics) -> Result<Vec<u8>, StegoError> {
        let encoded = text_safe::encode(&data);
        log::debug!(target: diag.target(), "base64 {} -> {} bytes", data.len(), encoded.len());
        Ok(encoded)
    }

    fn inverse(&self, mut data: Vec<u8>, diag: &Diagnostics) -> Result<Vec<u8>, StegoError> {
        let encoded_len = data.len();
        let n = text_safe::decode_in_place(&mut data)?;
        log::debug!(target: diag.target(), "base64 {encoded_len} -> {n} bytes");
        Ok(data)
    }
}

/// The closed set of stages a pipeline can hold.
#[derive(Debug)]
pub enum PipelineStage {
    Frame(FrameStage),
    Cipher(CipherStage),
    TextSafe(TextSafeStage),
}

impl Stage for PipelineStage {
    fn name(&self) -> &'static str {
        match self {
            Self::Frame(s) => s.name(),
            Self::Cipher(s) => s.name(),
            Self::TextSafe(s) => s.name(),
        }
    }

    fn forward(&self, data: Vec<u8>, diag: &Diagnostics) -> Result<Vec<u8>, StegoError> {
        match self {
            Self::Frame(s) => s.forward(data, diag),
            Self::Cipher(s) => s.forward(data, diag),
            Self::TextSafe(s) => s.forward(data, diag),
        }
    }

    fn inverse(&self, data: Vec<u8>, diag: &Diagnostics) -> Result<Vec<u8>, StegoError> {
        match self {
            Self::Frame(s) => s.inverse(data, diag),
            Self::Cipher(s) => s.inverse(data, diag),
            Self::TextSafe(s) => s.inverse(data, diag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher() -> CipherStage {
        CipherStage::new(CipherContext::new(&[1u8; 16], &[2u8; 16]).unwrap())
    }

    #[test]
    fn cipher_stage_trims_partial_block_on_decode() {
        let diag = Diagnostics::new("test");
        let stage = cipher();
        let plain: Vec<u8> = (0..32).collect();
        let mut ct = stage.forward(plain.clone(), &diag).unwrap();
        ct.extend_from_slice(&[9, 9, 9]);
        assert_eq!(stage.inverse(ct, &diag).unwrap(), plain);
    }

    #[test]
    fn cipher_stage_rejects_unaligned_encode() {
        let diag = Diagnostics::new("test");
        let err = cipher().forward(vec![0; 5], &diag).unwrap_err();
        assert!(matches!(err, StegoError::Crypto(_)));
    }

    #[test]
    fn stage_names() {
        let stages = [
            PipelineStage::Frame(FrameStage::new(16)),
            PipelineStage::Cipher(cipher()),
            PipelineStage::TextSafe(TextSafeStage),
        ];
        let names: Vec<_> = stages.iter().map(|s| s.name()).collect();
        assert_eq!(names, ["frame", "cipher", "base64"]);
    }

    #[test]
    fn text_safe_stage_roundtrip() {
        let diag = Diagnostics::new("test");
        let data: Vec<u8> = (0..48).map(|i| i * 5).collect();
        let coded = TextSafeStage.forward(data.clone(), &diag).unwrap();
        assert!(coded.iter().all(|b| b.is_ascii_graphic()));
        assert_eq!(TextSafeStage.inverse(coded, &diag).unwrap(), data);
    }
}
