use crate::input::load_image;
use anyhow::Context;
use romcrc::config::CORRECTION_OFFSET;
use romcrc::patch::PatchOutcome;
use romcrc::{Mode, Outcome};
use std::fs;
use std::path::Path;

/// Patches the image and writes the declared prefix to `output`.
///
/// Nothing is written when the checksum is already correct or when the
/// patch fails to verify.
pub fn run(image_path: &Path, size: usize, output: &Path, json: bool) -> anyhow::Result<PatchOutcome> {
    let mut image = load_image(image_path, size)?;
    let original = image.fingerprint();

    let outcome = match romcrc::run(&mut image, Mode::Patch)? {
        Outcome::Patch(outcome) => outcome,
        Outcome::Check(_) => anyhow::bail!("patch mode returned a check outcome"),
    };

    if let PatchOutcome::PatchVerified(_) = &outcome {
        fs::write(output, image.flash())
            .with_context(|| format!("Unable to write contents to {}", output.display()))?;
        tracing::info!("wrote {} bytes to {}", image.declared_size(), output.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(outcome);
    }

    match &outcome {
        PatchOutcome::AlreadyCorrect { .. } => {
            println!("No need for fixup, crc is already correct");
        }
        PatchOutcome::PatchVerified(record) => {
            for advisory in &record.advisories {
                println!("{}", advisory);
            }
            println!("Fixup correct");
            println!("Checksum:   {:#010x} before patch", record.before);
            println!("Correction: {:#010x} at {:#x}", record.correction, CORRECTION_OFFSET);
            println!("Original:   {}", hex::encode(original));
            println!("Patched:    {}", hex::encode(image.fingerprint()));
        }
    }
    Ok(outcome)
}
