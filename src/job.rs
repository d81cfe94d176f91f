// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! File-level encode and decode jobs.
//!
//! Nothing is written until the whole pipeline has succeeded: the encoded
//! image is saved after embedding, the decoded message is written after the
//! frame check passed.

use std::io::{self, Read, Write};
use std::path::Path;

use crate::carrier::codec;
use crate::config::{DecodeJob, EncodeJob, JobConfig, JobKind, KeyMaterial, MessageSource, OutputSink};
use crate::stego::diag::Diagnostics;
use crate::stego::error::StegoError;
use crate::stego::pipeline::Pipeline;
use crate::stego::DEFAULT_READ_LIMIT;

/// Run the job described by `config`.
pub fn run(config: &JobConfig, diag: &Diagnostics) -> Result<(), StegoError> {
    config.validate()?;
    let keys = KeyMaterial::load(&config.key_file, &config.iv_file)?;
    match &config.job {
        JobKind::Encode(job) => {
            let pipeline = Pipeline::new(&keys.key, &keys.iv, config.text_safe, diag.scoped("encode"))?;
            encode_job(&pipeline, job, diag)
        }
        JobKind::Decode(job) => {
            let pipeline = Pipeline::new(&keys.key, &keys.iv, config.text_safe, diag.scoped("decode"))?;
            decode_job(&pipeline, job, diag)
        }
    }
}

/// Read the message, embed it into the carrier and save the result.
pub fn encode_job(pipeline: &Pipeline, job: &EncodeJob, diag: &Diagnostics) -> Result<(), StegoError> {
    let message = read_message(&job.message, DEFAULT_READ_LIMIT, diag)?;
    let mut carrier = codec::load(&job.carrier)?;
    pipeline.encode_into(&message, &mut carrier)?;
    codec::save(&carrier, &job.output, job.format)?;
    log::info!(target: diag.target(), "wrote {} ({})", job.output.display(), job.format);
    Ok(())
}

/// Extract the message from the carrier and write it to the sink.
pub fn decode_job(pipeline: &Pipeline, job: &DecodeJob, diag: &Diagnostics) -> Result<(), StegoError> {
    let carrier = codec::load(&job.carrier)?;
    let message = pipeline.decode_from(&carrier)?;
    write_output(&job.output, &message)?;
    if let OutputSink::File(path) = &job.output {
        log::info!(target: diag.target(), "wrote {} message bytes to {}", message.len(), path.display());
    }
    Ok(())
}

/// Acquire the plaintext message.
///
/// Files with a known size are read whole. Sources of unknown size (stdin,
/// pipes) are read up to `limit` bytes; anything longer is rejected rather
/// than truncated. A single trailing line ending is stripped from stdin.
pub fn read_message(source: &MessageSource, limit: usize, diag: &Diagnostics) -> Result<Vec<u8>, StegoError> {
    match source {
        MessageSource::File(path) => read_message_file(path, limit),
        MessageSource::Stdin => {
            let mut message = read_unsized(io::stdin().lock(), limit, "reading message from stdin")?;
            if strip_line_ending(&mut message) {
                log::debug!(target: diag.target(), "stripped trailing newline from stdin message");
            }
            Ok(message)
        }
    }
}

fn read_message_file(path: &Path, limit: usize) -> Result<Vec<u8>, StegoError> {
    let context = || format!("reading message file {}", path.display());
    let file = std::fs::File::open(path).map_err(|e| StegoError::io(context(), e))?;
    let known_len = file.metadata().map(|m| m.len()).unwrap_or(0);
    if known_len > 0 {
        let mut message = Vec::with_capacity(known_len as usize);
        (&file).read_to_end(&mut message).map_err(|e| StegoError::io(context(), e))?;
        return Ok(message);
    }
    read_unsized(file, limit, &context())
}

/// Read a source of unknown size, rejecting anything over `limit` bytes.
pub fn read_unsized<R: Read>(reader: R, limit: usize, context: &str) -> Result<Vec<u8>, StegoError> {
    read_bounded(reader, limit)
        .map_err(|e| StegoError::io(context, e))?
        .ok_or(StegoError::ReadLimitExceeded { limit })
}

/// Read at most `limit` bytes. `Ok(None)` means the source had more.
pub fn read_bounded<R: Read>(reader: R, limit: usize) -> io::Result<Option<Vec<u8>>> {
    let mut buf = Vec::new();
    reader.take(limit as u64 + 1).read_to_end(&mut buf)?;
    if buf.len() > limit {
        return Ok(None);
    }
    Ok(Some(buf))
}

/// Drop one trailing `\n` or `\r\n`. Returns whether anything was removed.
pub fn strip_line_ending(buf: &mut Vec<u8>) -> bool {
    if buf.last() != Some(&b'\n') {
        return false;
    }
    buf.pop();
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    true
}

fn write_output(sink: &OutputSink, message: &[u8]) -> Result<(), StegoError> {
    match sink {
        OutputSink::File(path) => std::fs::write(path, message)
            .map_err(|e| StegoError::io(format!("writing {}", path.display()), e)),
        OutputSink::Stdout => {
            let mut out = io::stdout().lock();
            out.write_all(message)
                .and_then(|()| out.flush())
                .map_err(|e| StegoError::io("writing message to stdout", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stego::error::ErrorKind;

    #[test]
    fn bounded_read_limits() {
        assert_eq!(read_bounded(&b"abc"[..], 3).unwrap(), Some(b"abc".to_vec()));
        assert_eq!(read_bounded(&b"abcd"[..], 3).unwrap(), None);
        assert_eq!(read_bounded(&b""[..], 3).unwrap(), Some(Vec::new()));
    }

    #[test]
    fn strips_one_line_ending() {
        let mut a = b"hi\n".to_vec();
        assert!(strip_line_ending(&mut a));
        assert_eq!(a, b"hi");

        let mut b = b"hi\r\n".to_vec();
        assert!(strip_line_ending(&mut b));
        assert_eq!(b, b"hi");

        let mut c = b"hi\n\n".to_vec();
        assert!(strip_line_ending(&mut c));
        assert_eq!(c, b"hi\n");

        let mut d = b"hi".to_vec();
        assert!(!strip_line_ending(&mut d));
        assert_eq!(d, b"hi");
    }

    #[test]
    fn endless_reader_hits_limit() {
        let err = read_unsized(io::repeat(b'a'), DEFAULT_READ_LIMIT, "test").unwrap_err();
        assert!(matches!(err, StegoError::ReadLimitExceeded { limit: DEFAULT_READ_LIMIT }));
        assert_eq!(err.kind(), ErrorKind::Capacity);
        assert_eq!(read_unsized(&b"ok"[..], 2, "test").unwrap(), b"ok");
    }

    #[cfg(unix)]
    #[test]
    fn unsized_source_over_limit_is_capacity_error() {
        // Character devices report a zero size, so they take the bounded path.
        let source = MessageSource::File("/dev/zero".into());
        let err = read_message(&source, 64, &Diagnostics::default()).unwrap_err();
        assert!(matches!(err, StegoError::ReadLimitExceeded { limit: 64 }));
        assert_eq!(err.kind(), ErrorKind::Capacity);
    }

    #[test]
    fn empty_file_reads_as_empty_message() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let source = MessageSource::File(file.path().to_path_buf());
        assert!(read_message(&source, 8, &Diagnostics::default()).unwrap().is_empty());
    }

    #[test]
    fn missing_message_file_is_io_error() {
        let source = MessageSource::File("/nonexistent/message.txt".into());
        let err = read_message(&source, 10, &Diagnostics::default()).unwrap_err();
        assert!(matches!(err, StegoError::Io { .. }));
    }
}
