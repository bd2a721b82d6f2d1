// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Synthetic images for tests.

use crate::config::{CORRECTION_OFFSET, ERASED_WORD, HEADER_OFFSET};
use crate::image::RomImage;
use crate::patch::patch;

/// Flash size of the controllers this checksum targets.
pub const FLASH_SIZE: usize = 0x40000;

/// Zeroed image of `len` bytes with an erased correction slot.
pub fn blank_image(len: usize) -> Vec<u8> {
    let mut buffer = vec![0u8; len];
    if len >= CORRECTION_OFFSET + 4 {
        write_word(&mut buffer, CORRECTION_OFFSET, ERASED_WORD);
    }
    buffer
}

pub fn write_word(buffer: &mut [u8], offset: usize, value: u32) {
    buffer[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
}

/// Writes the boot header fields.
pub fn write_header(buffer: &mut [u8], tag: u16, words: [u32; 5]) {
    buffer[HEADER_OFFSET..HEADER_OFFSET + 2].copy_from_slice(&tag.to_be_bytes());
    for (i, word) in words.iter().enumerate() {
        write_word(buffer, HEADER_OFFSET + 2 + i * 4, *word);
    }
}

/// Fills `buffer[..end]` with xorshift noise, leaving the correction slot and
/// the boot header untouched.
pub fn fill_noise(buffer: &mut [u8], end: usize, mut state: u32) {
    let protected = CORRECTION_OFFSET..HEADER_OFFSET + 24;
    for (i, byte) in buffer[..end].iter_mut().enumerate() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        if !protected.contains(&i) {
            *byte = state as u8;
        }
    }
}

/// A noisy image of `len` bytes with a populated header.
pub fn firmware_image(len: usize, seed: u32) -> Vec<u8> {
    let mut buffer = blank_image(len);
    fill_noise(&mut buffer, len, seed);
    write_header(
        &mut buffer,
        0x1A2B,
        [0xDEAD_BEEF, 0x0000_4000, 0x8000_0001, 0x1234_5678, 0xFFFF_0000],
    );
    buffer
}

/// Patches `buffer` so the checksum is correct at `sealed_at` bytes.
///
/// Panics if the patch does not verify; fixtures only.
pub fn seal(buffer: Vec<u8>, sealed_at: usize) -> Vec<u8> {
    let mut image = RomImage::new(buffer, sealed_at).expect("fixture size");
    patch(&mut image).expect("fixture patch");
    image.into_inner()
}
