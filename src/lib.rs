// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! romcrc: checksum verification and repair for controller ROM images.
//!
//! The image is summed as big-endian 32-bit words over 512-byte pages,
//! seeded from the boot header, and must reach [`config::TARGET_CHECKSUM`].

pub mod config;
pub mod error;
pub mod image;
pub mod checksum;
pub mod probe;
pub mod patch;
pub mod engine;
pub mod fixtures;

pub use engine::{run, Mode, Outcome};
pub use error::{ChecksumError, Result};
pub use image::{BootHeader, RomImage};

#[cfg(test)]
pub mod tests;
