// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Check mode: verify the checksum and probe for the size it actually covers.
//!
//! Some images declare more flash than the checksum controls. The running
//! total is compared against the target after every page, so a match before
//! the declared end is reported as a candidate size instead of a failure.

use crate::checksum::{seed, sum_words};
use crate::config::{PAGE_SIZE, TARGET_CHECKSUM};
use crate::error::Result;
use crate::image::RomImage;
use serde::Serialize;

/// What the second scan found after an early match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUp {
    /// The total returns to the target exactly at the declared size.
    AlternateSizeAlsoConsistent,
    AlternateSizeNotConsistent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum CheckVerdict {
    /// Target reached on the last page of the declared size.
    CorrectAndComplete,
    /// Target reached at `candidate`, before the declared size.
    PlausibleAlternateSize { candidate: usize, follow_up: FollowUp },
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub declared_size: usize,
    /// Running total where scanning stopped.
    pub checksum: u32,
    #[serde(flatten)]
    pub verdict: CheckVerdict,
}

/// Result of one scan: the end offset of the page that brought the total to
/// the target, if any, and the total at that point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scan {
    pub matched_end: Option<usize>,
    pub checksum: u32,
}

/// Folds whole pages starting at byte offset `start` (page aligned) into
/// `crc`, stopping after the first page whose running total equals the
/// target.
pub fn scan(image: &RomImage, start: usize, mut crc: u32) -> Scan {
    debug_assert!(start % PAGE_SIZE == 0);
    for (index, page) in image.pages().enumerate().skip(start / PAGE_SIZE) {
        crc = crc.wrapping_add(sum_words(page));
        if crc == TARGET_CHECKSUM {
            return Scan {
                matched_end: Some((index + 1) * PAGE_SIZE),
                checksum: crc,
            };
        }
    }
    Scan {
        matched_end: None,
        checksum: crc,
    }
}

pub fn check(image: &RomImage) -> Result<CheckReport> {
    let declared = image.declared_size();
    let first = scan(image, 0, seed(image)?);

    let (verdict, checksum) = match first.matched_end {
        Some(end) if end == declared => (CheckVerdict::CorrectAndComplete, first.checksum),
        Some(candidate) => {
            // continue from the candidate boundary without resetting the total
            let second = scan(image, candidate, first.checksum);
            let follow_up = if second.matched_end == Some(declared) {
                FollowUp::AlternateSizeAlsoConsistent
            } else {
                FollowUp::AlternateSizeNotConsistent
            };
            (
                CheckVerdict::PlausibleAlternateSize { candidate, follow_up },
                second.checksum,
            )
        }
        None => (CheckVerdict::Incorrect, first.checksum),
    };

    tracing::info!("check of {:#x} bytes: {:?}", declared, verdict);

    Ok(CheckReport {
        declared_size: declared,
        checksum,
        verdict,
    })
}
