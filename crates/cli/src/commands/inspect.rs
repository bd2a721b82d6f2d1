use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use crate::input::load_image;
use anyhow::Context;
use romcrc::checksum::{full_sum, header_seed};
use romcrc::config::{CORRECTION_OFFSET, ERASED_WORD, TARGET_CHECKSUM};
use romcrc::BootHeader;
use std::fs;
use std::path::Path;

/// Prints the checksum-relevant fields of an image. `size` defaults to the
/// file length.
pub fn run(image_path: &Path, size: Option<usize>) -> anyhow::Result<()> {
    let size = match size {
        Some(size) => size,
        None => fs::metadata(image_path)
            .with_context(|| format!("Can't get size of {}", image_path.display()))?
            .len() as usize,
    };
    let image = load_image(image_path, size)?;

    println!("\nROM Checksum Report");
    println!("-------------------");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Field", "Offset", "Value"]);

    table.add_row(vec![
        "Declared size".to_string(),
        String::new(),
        format!("{:#x} ({} pages + {} bytes)", size, image.page_count(), image.trailing_bytes()),
    ]);

    match image.header() {
        Ok(header) => {
            table.add_row(vec![
                "Header tag".to_string(),
                format!("{:#x}", BootHeader::FIELD_OFFSETS[0]),
                format!("{:#06x}", header.tag),
            ]);
            for (i, word) in header.words.iter().enumerate() {
                table.add_row(vec![
                    format!("Header word {}", i + 1),
                    format!("{:#x}", BootHeader::FIELD_OFFSETS[i + 1]),
                    format!("{:#010x}", word),
                ]);
            }
            table.add_row(vec![
                "Seed".to_string(),
                String::new(),
                format!("{:#010x}", header_seed(&header)),
            ]);
        }
        Err(e) => {
            table.add_row(vec!["Header".to_string(), "MISSING".to_string(), e.to_string()]);
        }
    }

    match image.read_u32(CORRECTION_OFFSET) {
        Ok(word) => {
            let state = if word == ERASED_WORD { "erased" } else { "programmed" };
            table.add_row(vec![
                "Correction".to_string(),
                format!("{:#x}", CORRECTION_OFFSET),
                format!("{:#010x} ({})", word, state),
            ]);
        }
        Err(e) => {
            table.add_row(vec!["Correction".to_string(), "MISSING".to_string(), e.to_string()]);
        }
    }

    match full_sum(&image) {
        Ok(total) => {
            let status = if total == TARGET_CHECKSUM { "OK" } else { "MISMATCH" };
            table.add_row(vec![
                "Checksum".to_string(),
                String::new(),
                format!("{:#010x} {} (target {:#010x})", total, status, TARGET_CHECKSUM),
            ]);
        }
        Err(e) => {
            table.add_row(vec!["Checksum".to_string(), "N/A".to_string(), e.to_string()]);
        }
    }

    table.add_row(vec![
        "BLAKE3".to_string(),
        String::new(),
        hex::encode(image.fingerprint()),
    ]);

    println!("{table}");
    Ok(())
}
