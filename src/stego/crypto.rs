// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! AES-128 adapter for digest encryption.
//!
//! The cipher runs in electronic-codebook mode: every 16-byte block is
//! transformed on its own, so identical plaintext blocks produce identical
//! ciphertext blocks. The IV is validated and kept with the key, but ECB
//! never feeds it into a block.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, BlockSizeUser, KeyInit, KeySizeUser};
use aes::Aes128;
use zeroize::Zeroizing;

use crate::stego::error::CryptoError;

/// AES block length in bytes.
pub const BLOCK_LEN: usize = 16;
/// AES-128 key length in bytes.
pub const KEY_LEN: usize = 16;

/// A key/IV-bound AES-128-ECB context.
pub struct CipherContext {
    cipher: Aes128,
    iv: Zeroizing<[u8; BLOCK_LEN]>,
}

impl CipherContext {
    /// Bind a cipher to `key` and `iv`.
    ///
    /// # Errors
    /// - [`CryptoError::InvalidKeyLength`] unless `key.len() == 16`.
    /// - [`CryptoError::InvalidIvLength`] unless `iv.len() == 16`.
    /// - [`CryptoError::Provider`] if the key schedule rejects the key.
    pub fn new(key: &[u8], iv: &[u8]) -> Result<Self, CryptoError> {
        debug_assert_eq!(Aes128::key_size(), KEY_LEN);
        debug_assert_eq!(Aes128::block_size(), BLOCK_LEN);

        if key.len() != KEY_LEN {
            return Err(CryptoError::InvalidKeyLength { expected: KEY_LEN, actual: key.len() });
        }
        if iv.len() != BLOCK_LEN {
            return Err(CryptoError::InvalidIvLength { expected: BLOCK_LEN, actual: iv.len() });
        }

        let cipher = Aes128::new_from_slice(key)
            .map_err(|e| CryptoError::Provider { source: "aes", message: e.to_string() })?;

        let mut bound_iv = Zeroizing::new([0u8; BLOCK_LEN]);
        bound_iv.copy_from_slice(iv);
        Ok(Self { cipher, iv: bound_iv })
    }

    /// Cipher block length in bytes.
    pub fn block_len(&self) -> usize {
        BLOCK_LEN
    }

    /// The IV this context was created with.
    pub fn iv(&self) -> &[u8; BLOCK_LEN] {
        &self.iv
    }

    /// Encrypt `data` in place. Its length must be a multiple of [`BLOCK_LEN`].
    pub fn encrypt_in_place(&self, data: &mut [u8]) -> Result<(), CryptoError> {
        check_aligned(data)?;
        for block in data.chunks_exact_mut(BLOCK_LEN) {
            self.cipher.encrypt_block(GenericArray::from_mut_slice(block));
        }
        Ok(())
    }

    /// Decrypt `data` in place. Its length must be a multiple of [`BLOCK_LEN`].
    pub fn decrypt_in_place(&self, data: &mut [u8]) -> Result<(), CryptoError> {
        check_aligned(data)?;
        for block in data.chunks_exact_mut(BLOCK_LEN) {
            self.cipher.decrypt_block(GenericArray::from_mut_slice(block));
        }
        Ok(())
    }
}

impl std::fmt::Debug for CipherContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherContext")
            .field("algorithm", &"AES-128-ECB")
            .field("block_len", &BLOCK_LEN)
            .finish_non_exhaustive()
    }
}

fn check_aligned(data: &[u8]) -> Result<(), CryptoError> {
    if data.len() % BLOCK_LEN != 0 {
        return Err(CryptoError::UnalignedBuffer { len: data.len(), block_len: BLOCK_LEN });
    }
    Ok(())
}
