// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Block-alignment arithmetic for the cipher stage.

/// Round `n` up to the next multiple of `block_len` (unchanged if already aligned).
pub fn padded_size(n: usize, block_len: usize) -> usize {
    debug_assert!(block_len > 0);
    match n % block_len {
        0 => n,
        rem => n + (block_len - rem),
    }
}

/// Round `n` down to a multiple of `block_len`, dropping a trailing partial block.
pub fn trim(n: usize, block_len: usize) -> usize {
    debug_assert!(block_len > 0);
    n - (n % block_len)
}
