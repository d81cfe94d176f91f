// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Resolved job configuration.
//!
//! The CLI parses flags into a [`JobConfig`]; everything below it works on
//! this type only.

use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::carrier::codec::OutputFormat;
use crate::stego::error::StegoError;
use crate::stego::pipeline::TextSafe;

/// Which direction a job runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encode,
    Decode,
}

/// Where the plaintext message comes from on encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSource {
    Stdin,
    File(PathBuf),
}

/// Where the recovered message goes on decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    Stdout,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeJob {
    /// Cover image to embed into.
    pub carrier: PathBuf,
    /// Path of the encoded image to write.
    pub output: PathBuf,
    pub format: OutputFormat,
    pub message: MessageSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeJob {
    /// Image carrying an embedded message.
    pub carrier: PathBuf,
    pub output: OutputSink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobKind {
    Encode(EncodeJob),
    Decode(DecodeJob),
}

/// Everything a run needs, already parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    pub key_file: PathBuf,
    pub iv_file: PathBuf,
    pub text_safe: TextSafe,
    pub job: JobKind,
}

impl JobConfig {
    pub fn mode(&self) -> Mode {
        match self.job {
            JobKind::Encode(_) => Mode::Encode,
            JobKind::Decode(_) => Mode::Decode,
        }
    }

    /// Reject empty paths and an encode output that would overwrite its own carrier.
    pub fn validate(&self) -> Result<(), StegoError> {
        require_path(&self.key_file, "encryption key file")?;
        require_path(&self.iv_file, "initialization vector file")?;
        match &self.job {
            JobKind::Encode(job) => {
                require_path(&job.carrier, "carrier image")?;
                require_path(&job.output, "output image")?;
                if let MessageSource::File(path) = &job.message {
                    require_path(path, "message file")?;
                }
                if job.output == job.carrier {
                    return Err(StegoError::Config(format!(
                        "output image {} would overwrite the carrier",
                        job.output.display()
                    )));
                }
            }
            JobKind::Decode(job) => {
                require_path(&job.carrier, "carrier image")?;
                if let OutputSink::File(path) = &job.output {
                    require_path(path, "output file")?;
                }
            }
        }
        Ok(())
    }
}

fn require_path(path: &Path, what: &str) -> Result<(), StegoError> {
    if path.as_os_str().is_empty() {
        return Err(StegoError::Config(format!("no {what} specified")));
    }
    Ok(())
}

/// Key and IV bytes read from their files. Zeroized on drop.
pub struct KeyMaterial {
    pub key: Zeroizing<Vec<u8>>,
    pub iv: Zeroizing<Vec<u8>>,
}

impl KeyMaterial {
    /// Read raw key and IV bytes. Length checks happen when the cipher is built.
    pub fn load(key_file: &Path, iv_file: &Path) -> Result<Self, StegoError> {
        let key = read_secret(key_file, "encryption key")?;
        let iv = read_secret(iv_file, "initialization vector")?;
        Ok(Self { key, iv })
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("key_len", &self.key.len())
            .field("iv_len", &self.iv.len())
            .finish()
    }
}

fn read_secret(path: &Path, what: &str) -> Result<Zeroizing<Vec<u8>>, StegoError> {
    let bytes = Zeroizing::new(
        std::fs::read(path).map_err(|e| StegoError::io(format!("reading {what} file {}", path.display()), e))?,
    );
    if bytes.is_empty() {
        return Err(StegoError::Config(format!("{what} file {} is empty", path.display())));
    }
    Ok(bytes)
}
