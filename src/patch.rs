// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Patch mode: write the correction word and verify the result.

use crate::checksum::full_sum;
use crate::config::{CORRECTION_OFFSET, ERASED_WORD, TARGET_CHECKSUM};
use crate::error::{ChecksumError, Result};
use crate::image::RomImage;
use serde::Serialize;
use std::fmt;

/// Non-fatal conditions raised while patching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// The correction slot held a programmed value that was replaced.
    OverwriteWarning { offset: usize, previous: u32 },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::OverwriteWarning { offset, previous } => write!(
                f,
                "Overwriting CRC destination at {:#x} (was {:#010x})",
                offset, previous
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchRecord {
    /// Checksum before the correction was written.
    pub before: u32,
    /// Correction slot content before patching.
    pub previous: u32,
    pub correction: u32,
    pub advisories: Vec<Advisory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PatchOutcome {
    AlreadyCorrect { checksum: u32 },
    PatchVerified(PatchRecord),
}

/// Word to store in the correction slot so that `total` becomes the target.
///
/// The slot's current content is already part of `total`; for an erased
/// slot this reduces to `TARGET - total - 1`.
pub fn correction_for(total: u32, previous: u32) -> u32 {
    previous.wrapping_add(TARGET_CHECKSUM.wrapping_sub(total))
}

/// Patches `image` in place so its checksum reaches the target, then
/// re-runs the full checksum over the patched buffer.
///
/// On [`ChecksumError::PatchFailed`] the slot is restored and the buffer
/// must not be persisted.
pub fn patch(image: &mut RomImage) -> Result<PatchOutcome> {
    let before = full_sum(image)?;
    if before == TARGET_CHECKSUM {
        tracing::info!("no need for fixup, checksum is already correct");
        return Ok(PatchOutcome::AlreadyCorrect { checksum: before });
    }

    let previous = image.read_u32(CORRECTION_OFFSET)?;
    let mut advisories = Vec::new();
    if previous != ERASED_WORD {
        let advisory = Advisory::OverwriteWarning {
            offset: CORRECTION_OFFSET,
            previous,
        };
        tracing::warn!("{}", advisory);
        advisories.push(advisory);
    }

    let correction = correction_for(before, previous);
    image.write_u32(CORRECTION_OFFSET, correction)?;

    let after = full_sum(image)?;
    if after != TARGET_CHECKSUM {
        image.write_u32(CORRECTION_OFFSET, previous)?;
        tracing::error!("fixup fault: {:#010x} after writing {:#010x}", after, correction);
        return Err(ChecksumError::PatchFailed {
            expected: TARGET_CHECKSUM,
            found: after,
        });
    }

    tracing::info!("fixup correct: wrote {:#010x} at {:#x}", correction, CORRECTION_OFFSET);
    Ok(PatchOutcome::PatchVerified(PatchRecord {
        before,
        previous,
        correction,
        advisories,
    }))
}
