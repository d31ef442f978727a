//! CLI command for writing dialogue back

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context;

use crate::dialog::{DialogueData, Language};
use crate::error::Error;
use crate::operations::{ensure_exists, write_dialogue_file};

/// Merge the Dialogue Data from `input_file` (or `input`) into `path`.
pub fn execute(
    path: &Path,
    language: Language,
    input_file: Option<&Path>,
    input: &mut dyn Read,
    output: &mut dyn Write,
) -> anyhow::Result<()> {
    ensure_exists(path)?;

    let raw = match input_file {
        Some(file) => fs::read(file).with_context(|| format!("Failed to read dialogue from {}", file.display()))?,
        None => {
            let mut raw = Vec::new();
            input.read_to_end(&mut raw).context("Failed to read dialogue from stdin")?;
            raw
        }
    };

    let text = String::from_utf8(raw).map_err(|e| Error::malformed(format!("input is not valid UTF-8: {e}")))?;
    let data = DialogueData::from_json(&text)?;
    tracing::debug!("Loaded {} scene(s) from input", data.len());

    let outcome = write_dialogue_file(path, data, language)
        .with_context(|| format!("Failed to write dialogue to {}", path.display()))?;

    writeln!(output, "{}", serde_json::json!({ "result": outcome.result_label() }))?;
    output.flush()?;

    Ok(())
}
