// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Single entry point over an in-memory image.

use crate::error::Result;
use crate::image::RomImage;
use crate::patch::{patch, PatchOutcome};
use crate::probe::{check, CheckReport};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Report checksum correctness; never mutates the image.
    Check,
    /// Write the correction word and self-verify.
    Patch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Check(CheckReport),
    Patch(PatchOutcome),
}

pub fn run(image: &mut RomImage, mode: Mode) -> Result<Outcome> {
    match mode {
        Mode::Check => check(image).map(Outcome::Check),
        Mode::Patch => patch(image).map(Outcome::Patch),
    }
}
