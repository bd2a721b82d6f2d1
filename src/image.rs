// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Image buffer, declared size and fixed-offset field access.

use crate::config::{HEADER_OFFSET, PAGE_SIZE};
use crate::error::{ChecksumError, Result};
use byteorder::{BigEndian, ByteOrder, ReadBytesExt};
use serde::Serialize;
use std::io::Cursor;

/// A ROM image loaded into memory together with the number of leading
/// bytes that count as flash contents.
///
/// The buffer may be longer than the declared size; bytes past it never
/// take part in the checksum and are never touched by the patcher.
#[derive(Debug, Clone)]
pub struct RomImage {
    buffer: Vec<u8>,
    declared_size: usize,
}

impl RomImage {
    pub fn new(buffer: Vec<u8>, declared_size: usize) -> Result<Self> {
        if declared_size == 0 || declared_size > buffer.len() {
            return Err(ChecksumError::InvalidDeclaredSize {
                declared: declared_size,
                available: buffer.len(),
            });
        }
        Ok(Self {
            buffer,
            declared_size,
        })
    }

    pub fn declared_size(&self) -> usize {
        self.declared_size
    }

    /// The declared prefix of the buffer.
    pub fn flash(&self) -> &[u8] {
        &self.buffer[..self.declared_size]
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    /// Number of whole pages inside the declared size.
    pub fn page_count(&self) -> usize {
        self.declared_size / PAGE_SIZE
    }

    /// Bytes after the last whole page. These are never summed.
    pub fn trailing_bytes(&self) -> usize {
        self.declared_size % PAGE_SIZE
    }

    /// Whole pages of the declared prefix, in order.
    pub fn pages(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.flash().chunks_exact(PAGE_SIZE)
    }

    fn field(&self, offset: usize, width: usize) -> Result<&[u8]> {
        self.flash()
            .get(offset..offset + width)
            .ok_or(ChecksumError::IncompatibleImage {
                declared: self.declared_size,
                required: offset + width,
            })
    }

    pub fn read_u32(&self, offset: usize) -> Result<u32> {
        Ok(BigEndian::read_u32(self.field(offset, 4)?))
    }

    pub fn write_u32(&mut self, offset: usize, value: u32) -> Result<()> {
        // bounds come from the declared prefix, not the whole buffer
        self.field(offset, 4)?;
        BigEndian::write_u32(&mut self.buffer[offset..offset + 4], value);
        Ok(())
    }

    /// Decodes the boot header fields at [`HEADER_OFFSET`].
    pub fn header(&self) -> Result<BootHeader> {
        BootHeader::from_bytes(self.field(HEADER_OFFSET, BootHeader::SIZE)?)
    }

    /// BLAKE3 digest of the declared prefix.
    pub fn fingerprint(&self) -> [u8; 32] {
        blake3::hash(self.flash()).into()
    }
}

/// Boot header content cancelled out of the checksum seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BootHeader {
    pub tag: u16,
    pub words: [u32; 5],
}

impl BootHeader {
    pub const SIZE: usize = 2 + 5 * 4; // 22 bytes

    /// Absolute offsets of the six header fields, in subtraction order.
    pub const FIELD_OFFSETS: [usize; 6] = [
        HEADER_OFFSET,
        HEADER_OFFSET + 2,
        HEADER_OFFSET + 6,
        HEADER_OFFSET + 10,
        HEADER_OFFSET + 14,
        HEADER_OFFSET + 18,
    ];

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let truncated = || ChecksumError::IncompatibleImage {
            declared: data.len(),
            required: Self::SIZE,
        };
        let mut cursor = Cursor::new(data);

        let tag = cursor.read_u16::<BigEndian>().map_err(|_| truncated())?;
        let mut words = [0u32; 5];
        for word in words.iter_mut() {
            *word = cursor.read_u32::<BigEndian>().map_err(|_| truncated())?;
        }

        Ok(Self { tag, words })
    }
}
