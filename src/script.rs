// Scripted run: one training call followed by one generate call against the
// same LUT, printing what the server answers. Any failure stops the run.

use crate::api::ApiClient;
use crate::ui::print_reply;
use anyhow::{Context, Result};

/// LUT used by the scripted run when none is configured.
pub const DEFAULT_LUT_NAME: &str = "myTest02";

pub const SAMPLE_LABEL: &str = "TLG Capital is an asset management firm.";
pub const SAMPLE_PROMPT: &str = "TLG Capital is";
pub const SAMPLE_LENGTH: u32 = 30;

pub fn run(api: &ApiClient, lut_name: &str) -> Result<()> {
    // Rerunning against the same LUT trains the sample label again.
    let reply = api
        .train_lut(SAMPLE_LABEL, Some(lut_name), None)
        .context("Training the sample label")?;
    print_reply(&reply);

    let reply = api
        .generate(SAMPLE_PROMPT, SAMPLE_LENGTH, Some(lut_name))
        .context("Generating from the sample prompt")?;
    print_reply(&reply);
    Ok(())
}
