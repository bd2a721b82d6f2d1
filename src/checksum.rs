// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Seed and page accumulation for the controller checksum.
//!
//! All arithmetic wraps modulo 2^32.

use crate::config::{MIN_DECLARED_SIZE, SEED_BIAS, SEED_CORRECTION};
use crate::error::{ChecksumError, Result};
use crate::image::{BootHeader, RomImage};
use byteorder::{BigEndian, ByteOrder};

/// Wrapping sum of the big-endian 32-bit words in `bytes`.
///
/// `bytes` must hold a whole number of words; a partial trailing word is
/// ignored.
pub fn sum_words(bytes: &[u8]) -> u32 {
    debug_assert!(bytes.len() % 4 == 0, "span is not word aligned");
    bytes
        .chunks_exact(4)
        .fold(0u32, |acc, word| acc.wrapping_add(BigEndian::read_u32(word)))
}

/// Seed contribution of the boot header: every field is subtracted in
/// offset order, then the bias is added and the correction removed.
pub fn header_seed(header: &BootHeader) -> u32 {
    let mut crc = 0u32.wrapping_sub(u32::from(header.tag));
    for word in header.words {
        crc = crc.wrapping_sub(word);
    }
    crc.wrapping_add(SEED_BIAS).wrapping_sub(SEED_CORRECTION)
}

/// Starting checksum for `image`.
///
/// Fails with [`ChecksumError::IncompatibleImage`] when the declared size
/// cannot hold the boot header.
pub fn seed(image: &RomImage) -> Result<u32> {
    if image.declared_size() < MIN_DECLARED_SIZE {
        return Err(ChecksumError::IncompatibleImage {
            declared: image.declared_size(),
            required: MIN_DECLARED_SIZE,
        });
    }
    let crc = header_seed(&image.header()?);
    tracing::debug!("checksum seed {:#010x}", crc);
    Ok(crc)
}

/// Per-page word sums over the whole pages of the declared prefix.
pub fn page_sums(image: &RomImage) -> impl Iterator<Item = u32> + '_ {
    image.pages().map(sum_words)
}

/// Seed plus every whole page.
pub fn full_sum(image: &RomImage) -> Result<u32> {
    let seed = seed(image)?;
    let total = page_sums(image).fold(seed, u32::wrapping_add);
    tracing::debug!("checksum over {} pages: {:#010x}", image.page_count(), total);
    Ok(total)
}
