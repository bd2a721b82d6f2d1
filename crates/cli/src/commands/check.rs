use crate::input::load_image;
use romcrc::config::TARGET_CHECKSUM;
use romcrc::probe::{CheckReport, CheckVerdict, FollowUp};
use romcrc::{Mode, Outcome};
use std::path::Path;

pub fn run(image_path: &Path, size: usize, json: bool) -> anyhow::Result<CheckReport> {
    let mut image = load_image(image_path, size)?;

    let report = match romcrc::run(&mut image, Mode::Check)? {
        Outcome::Check(report) => report,
        Outcome::Patch(_) => anyhow::bail!("check mode returned a patch outcome"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(report)
}

fn print_report(report: &CheckReport) {
    match report.verdict {
        CheckVerdict::CorrectAndComplete => println!("CRC correct"),
        CheckVerdict::PlausibleAlternateSize { candidate, follow_up } => {
            println!("True CRC controlled size might be {} ({:#x})", candidate, candidate);
            match follow_up {
                FollowUp::AlternateSizeAlsoConsistent => {
                    println!("But indicated size is also correct")
                }
                FollowUp::AlternateSizeNotConsistent => {
                    println!("And indicated size is incorrect")
                }
            }
        }
        CheckVerdict::Incorrect => println!(
            "CRC incorrect: sum is {:#010x}, expected {:#010x}",
            report.checksum, TARGET_CHECKSUM
        ),
    }
}
