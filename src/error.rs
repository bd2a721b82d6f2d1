// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChecksumError {
    #[error("Invalid declared size {declared}: must be nonzero and at most {available} bytes")]
    InvalidDeclaredSize { declared: usize, available: usize },

    #[error("CRC checker incompatible: declared size {declared:#x} is below the {required:#x} bytes the boot header needs")]
    IncompatibleImage { declared: usize, required: usize },

    #[error("Fixup fault: checksum after patch is {found:#010x}, expected {expected:#010x}")]
    PatchFailed { expected: u32, found: u32 },
}

pub type Result<T> = std::result::Result<T, ChecksumError>;
