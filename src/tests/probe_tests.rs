// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::config::{MIN_DECLARED_SIZE, PAGE_SIZE, TARGET_CHECKSUM};
use crate::error::ChecksumError;
use crate::fixtures::{blank_image, firmware_image, seal, write_word, FLASH_SIZE};
use crate::image::RomImage;
use crate::probe::{check, scan, CheckVerdict, FollowUp};

/// Image sealed at FLASH_SIZE followed by `tail` pages of zeros.
fn sealed_with_tail(tail: usize) -> Vec<u8> {
    let mut buffer = seal(firmware_image(FLASH_SIZE, 0xC0FF_EE11), FLASH_SIZE);
    buffer.resize(FLASH_SIZE + tail * PAGE_SIZE, 0);
    buffer
}

#[test]
fn test_sealed_image_is_correct_and_complete() {
    let image = RomImage::new(sealed_with_tail(0), FLASH_SIZE).unwrap();
    let report = check(&image).unwrap();
    assert_eq!(report.verdict, CheckVerdict::CorrectAndComplete);
    assert_eq!(report.checksum, TARGET_CHECKSUM);
    assert_eq!(report.declared_size, FLASH_SIZE);
}

#[test]
fn test_unsealed_image_is_incorrect() {
    let image = RomImage::new(blank_image(FLASH_SIZE), FLASH_SIZE).unwrap();
    let report = check(&image).unwrap();
    assert_eq!(report.verdict, CheckVerdict::Incorrect);
    assert_eq!(report.checksum, 0xFFF9);
}

#[test]
fn test_alternate_size_also_consistent() {
    // one zero page keeps the total on target through the declared end
    let image = RomImage::new(sealed_with_tail(1), FLASH_SIZE + PAGE_SIZE).unwrap();
    let report = check(&image).unwrap();
    assert_eq!(
        report.verdict,
        CheckVerdict::PlausibleAlternateSize {
            candidate: FLASH_SIZE,
            follow_up: FollowUp::AlternateSizeAlsoConsistent,
        }
    );
}

#[test]
fn test_alternate_size_not_consistent() {
    // two zero pages: the second scan matches one page early
    let image = RomImage::new(sealed_with_tail(2), FLASH_SIZE + 2 * PAGE_SIZE).unwrap();
    let report = check(&image).unwrap();
    assert_eq!(
        report.verdict,
        CheckVerdict::PlausibleAlternateSize {
            candidate: FLASH_SIZE,
            follow_up: FollowUp::AlternateSizeNotConsistent,
        }
    );

    // a live word in the tail keeps the total off target
    let mut buffer = sealed_with_tail(1);
    write_word(&mut buffer, FLASH_SIZE + 8, 1);
    let image = RomImage::new(buffer, FLASH_SIZE + PAGE_SIZE).unwrap();
    let report = check(&image).unwrap();
    assert_eq!(
        report.verdict,
        CheckVerdict::PlausibleAlternateSize {
            candidate: FLASH_SIZE,
            follow_up: FollowUp::AlternateSizeNotConsistent,
        }
    );
    assert_eq!(report.checksum, TARGET_CHECKSUM.wrapping_add(1));
}

#[test]
fn test_declared_size_with_partial_page() {
    // match on the last whole page cannot equal a non page-multiple size
    let image = RomImage::new(sealed_with_tail(1), FLASH_SIZE + 100).unwrap();
    let report = check(&image).unwrap();
    assert_eq!(
        report.verdict,
        CheckVerdict::PlausibleAlternateSize {
            candidate: FLASH_SIZE,
            follow_up: FollowUp::AlternateSizeNotConsistent,
        }
    );

    // the page holding the correction word is cut off
    let image = RomImage::new(sealed_with_tail(0), MIN_DECLARED_SIZE).unwrap();
    assert_eq!(check(&image).unwrap().verdict, CheckVerdict::Incorrect);
}

#[test]
fn test_scan_stops_at_first_match() {
    let image = RomImage::new(sealed_with_tail(3), FLASH_SIZE + 3 * PAGE_SIZE).unwrap();
    let first = scan(&image, 0, crate::checksum::seed(&image).unwrap());
    assert_eq!(first.matched_end, Some(FLASH_SIZE));
    assert_eq!(first.checksum, TARGET_CHECKSUM);

    let resumed = scan(&image, FLASH_SIZE, first.checksum);
    assert_eq!(resumed.matched_end, Some(FLASH_SIZE + PAGE_SIZE));

    let exhausted = scan(&image, FLASH_SIZE, 0);
    assert_eq!(exhausted.matched_end, None);
    assert_eq!(exhausted.checksum, 0);
}

#[test]
fn test_check_rejects_small_image() {
    let image = RomImage::new(blank_image(FLASH_SIZE), 100).unwrap();
    assert!(matches!(
        check(&image),
        Err(ChecksumError::IncompatibleImage { declared: 100, .. })
    ));
}
