// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Layout constants for the controller ROM checksum.

/// Checksum page size in bytes.
pub const PAGE_SIZE: usize = 512;

/// Big-endian 32-bit words per page.
pub const WORDS_PER_PAGE: usize = PAGE_SIZE / 4;

/// Value a correctly checksummed image must sum to.
pub const TARGET_CHECKSUM: u32 = 0x5AA5_5AA5;

/// Content of an unprogrammed flash word.
pub const ERASED_WORD: u32 = 0xFFFF_FFFF;

/// Offset of the 32-bit correction slot written by the patcher.
pub const CORRECTION_OFFSET: usize = 0x3FFBC;

/// Offset of the boot header fields consumed by the seed.
pub const HEADER_OFFSET: usize = 0x3FFCE;

/// Bytes reserved for the boot header (fields plus trailing margin).
pub const HEADER_SPAN: usize = 24;

/// Smallest declared size the checksum can be applied to.
pub const MIN_DECLARED_SIZE: usize = HEADER_OFFSET + HEADER_SPAN;

/// Added to the seed after the header fields are subtracted.
pub const SEED_BIAS: u32 = 0xFFFF;

/// Subtracted from the seed last.
pub const SEED_CORRECTION: u32 = 5;
