// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Text-safe transport encoding (standard base64 alphabet, `=` padded).
//!
//! Every 3 input bytes become 4 printable characters; a short final group is
//! completed with `=`. Decoding is strict: anything that is not canonical
//! padded base64 is rejected with [`StegoError::InvalidTextSafe`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::stego::error::StegoError;

/// Encoded length of an `n`-byte input.
pub fn encoded_len(n: usize) -> usize {
    if n % 3 == 0 {
        n * 4 / 3
    } else {
        (n + 3 - n % 3) * 4 / 3
    }
}

/// Encode `input` as padded base64 bytes.
pub fn encode(input: &[u8]) -> Vec<u8> {
    let out = STANDARD.encode(input).into_bytes();
    debug_assert_eq!(out.len(), encoded_len(input.len()));
    out
}

/// Decode padded base64.
pub fn decode(input: &[u8]) -> Result<Vec<u8>, StegoError> {
    STANDARD
        .decode(input)
        .map_err(|e| StegoError::InvalidTextSafe(e.to_string()))
}

/// Decode `buf` and replace its contents with the decoded bytes.
///
/// Returns the decoded byte count. On error `buf` is left as it was.
pub fn decode_in_place(buf: &mut Vec<u8>) -> Result<usize, StegoError> {
    let decoded = decode(buf)?;
    *buf = decoded;
    Ok(buf.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc4648_vectors() {
        let cases: [(&[u8], &[u8]); 7] = [
            (b"", b""),
            (b"f", b"Zg=="),
            (b"fo", b"Zm8="),
            (b"foo", b"Zm9v"),
            (b"foob", b"Zm9vYg=="),
            (b"fooba", b"Zm9vYmE="),
            (b"foobar", b"Zm9vYmFy"),
        ];
        for (plain, coded) in cases {
            assert_eq!(encode(plain), coded);
            assert_eq!(decode(coded).unwrap(), plain);
        }
    }

    #[test]
    fn encoded_len_matches_groups() {
        assert_eq!(encoded_len(0), 0);
        assert_eq!(encoded_len(1), 4);
        assert_eq!(encoded_len(3), 4);
        assert_eq!(encoded_len(4), 8);
        assert_eq!(encoded_len(16), 24);
        assert_eq!(encoded_len(32), 44);
    }

    #[test]
    fn roundtrip_all_short_lengths() {
        for n in 0..100usize {
            let data: Vec<u8> = (0..n).map(|i| (i * 37 + 11) as u8).collect();
            let coded = encode(&data);
            assert_eq!(coded.len(), encoded_len(n));
            assert_eq!(decode(&coded).unwrap(), data, "length {n}");
        }
    }

    #[test]
    fn decode_in_place_reports_count() {
        let mut buf = b"aGVsbG8=".to_vec();
        assert_eq!(decode_in_place(&mut buf).unwrap(), 5);
        assert_eq!(buf, b"hello");
    }

    #[test]
    fn malformed_input_is_format_error() {
        for bad in [&b"Zm9v!"[..], b"Zg=", b"Z===", b"Zm9vYmFy\0\0"] {
            let mut buf = bad.to_vec();
            let err = decode_in_place(&mut buf).unwrap_err();
            assert!(matches!(err, StegoError::InvalidTextSafe(_)), "{bad:?}");
            assert_eq!(buf, bad, "buffer must be untouched on error");
        }
    }
}
