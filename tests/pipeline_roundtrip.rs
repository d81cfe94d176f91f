// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Round-trip integration tests for in-memory encode/decode.

use pixsteg_core::carrier::codec;
use pixsteg_core::stego::bitpack::{self, SENTINEL};
use pixsteg_core::{
    decode_message, digest_len, encode_message, estimate_capacity, CarrierImage, ErrorKind, OutputFormat,
    StegoError, TextSafe,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const KEY: &[u8; 16] = b"0123456789abcdef";
const IV: &[u8; 16] = b"fedcba9876543210";

fn noisy_carrier(rng: &mut ChaCha20Rng, width: u32, height: u32, channels: u8) -> CarrierImage {
    let len = width as usize * height as usize * channels as usize;
    let pixels: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
    CarrierImage::new(pixels, width, height, channels).unwrap()
}

#[test]
fn hello_roundtrip_plain() {
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let mut img = noisy_carrier(&mut rng, 16, 16, 3);
    encode_message(&mut img, b"hello", KEY, IV, TextSafe::Off).unwrap();

    // One cipher block: 128 data pixels, the rest hold the sentinel.
    for i in 0..128 {
        assert_ne!(img.first_channel(i) & 0b11, SENTINEL);
    }
    for i in 128..256 {
        assert_eq!(img.first_channel(i) & 0b11, SENTINEL);
    }
    assert_eq!(decode_message(&img, KEY, IV, TextSafe::Off).unwrap(), b"hello");
}

#[test]
fn hello_roundtrip_base64() {
    let mut rng = ChaCha20Rng::seed_from_u64(2);
    let mut img = noisy_carrier(&mut rng, 16, 16, 4);
    encode_message(&mut img, b"hello", KEY, IV, TextSafe::Base64).unwrap();

    let digest = bitpack::extract(&img);
    assert_eq!(digest.len(), 24);
    assert!(digest.iter().all(|b| b.is_ascii_graphic()));
    assert_eq!(decode_message(&img, KEY, IV, TextSafe::Base64).unwrap(), b"hello");
}

#[test]
fn empty_message_roundtrip() {
    let mut img = CarrierImage::filled(16, 8, 1, 0x7F).unwrap();
    encode_message(&mut img, b"", KEY, IV, TextSafe::Off).unwrap();
    assert!(decode_message(&img, KEY, IV, TextSafe::Off).unwrap().is_empty());
}

#[test]
fn random_payloads_roundtrip() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x5EED);
    for round in 0..24 {
        let channels = rng.gen_range(1..=4u8);
        let mut img = noisy_carrier(&mut rng, 64, 48, channels);
        let text_safe = if round % 2 == 0 { TextSafe::Off } else { TextSafe::Base64 };
        let max = estimate_capacity(&img, text_safe).unwrap();
        let len = rng.gen_range(0..=max);
        let message: Vec<u8> = (0..len).map(|_| rng.gen()).collect();

        encode_message(&mut img, &message, KEY, IV, text_safe).unwrap();
        let decoded = decode_message(&img, KEY, IV, text_safe).unwrap();
        assert_eq!(decoded, message, "round {round}, {len} bytes, {channels} channels");
    }
}

#[test]
fn capacity_boundary() {
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    for text_safe in [TextSafe::Off, TextSafe::Base64] {
        let mut img = noisy_carrier(&mut rng, 20, 20, 3);
        let max = estimate_capacity(&img, text_safe).unwrap();

        let fits = vec![b'x'; max];
        encode_message(&mut img, &fits, KEY, IV, text_safe).unwrap();
        assert_eq!(decode_message(&img, KEY, IV, text_safe).unwrap(), fits);

        let before = img.clone();
        let too_big = vec![b'x'; max + 1];
        let err = encode_message(&mut img, &too_big, KEY, IV, text_safe).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Capacity);
        assert!(digest_len(max + 1, text_safe) * 8 > 400);
        assert_eq!(img, before, "failed encode must leave the carrier untouched");
    }
}

#[test]
fn tiny_carrier_rejects_any_message() {
    // 10x10 holds 100 bits, less than one cipher block.
    let mut img = CarrierImage::filled(10, 10, 3, 0).unwrap();
    assert_eq!(estimate_capacity(&img, TextSafe::Off), None);
    match encode_message(&mut img, b"", KEY, IV, TextSafe::Off) {
        Err(StegoError::MessageTooLarge { required_bits: 128, capacity_bits: 100 }) => {}
        other => panic!("expected MessageTooLarge, got {other:?}"),
    }
}

#[test]
fn wrong_key_fails() {
    let mut img = CarrierImage::filled(32, 32, 3, 0x40).unwrap();
    encode_message(&mut img, b"secret msg", KEY, IV, TextSafe::Off).unwrap();
    let err = decode_message(&img, b"not the real key", IV, TextSafe::Off).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn untouched_image_fails_cleanly() {
    let mut rng = ChaCha20Rng::seed_from_u64(4);
    let img = noisy_carrier(&mut rng, 32, 32, 3);
    assert!(decode_message(&img, KEY, IV, TextSafe::Off).is_err());
    assert!(decode_message(&img, KEY, IV, TextSafe::Base64).is_err());
}

#[test]
fn invalid_key_length_is_crypto_error() {
    let mut img = CarrierImage::filled(32, 32, 3, 0).unwrap();
    let err = encode_message(&mut img, b"hi", &KEY[..15], IV, TextSafe::Off).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Crypto);
}

#[test]
fn survives_lossless_formats() {
    let dir = tempfile::tempdir().unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let cases = [
        (OutputFormat::Png, 1u8),
        (OutputFormat::Png, 2),
        (OutputFormat::Png, 4),
        (OutputFormat::Bmp, 3),
        (OutputFormat::Tga, 3),
        (OutputFormat::Tga, 4),
    ];
    for (format, channels) in cases {
        let mut img = noisy_carrier(&mut rng, 40, 30, channels);
        encode_message(&mut img, b"lossless only", KEY, IV, TextSafe::Base64).unwrap();

        let path = dir.path().join(format!("stego_{channels}.{}", format.extension()));
        codec::save(&img, &path, format).unwrap();
        let reloaded = codec::load(&path).unwrap();
        assert_eq!(reloaded.channels(), channels, "{format}");
        assert_eq!(
            decode_message(&reloaded, KEY, IV, TextSafe::Base64).unwrap(),
            b"lossless only",
            "{format} with {channels} channels"
        );
    }
}
