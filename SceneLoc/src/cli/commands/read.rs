//! CLI command for extracting dialogue

use std::io::Write;
use std::path::Path;

use anyhow::Context;

use crate::dialog::Language;
use crate::operations::read_dialogue_file;
use crate::utils::persist;

/// Extract `language` scenes from `path`.
///
/// The document goes to `output_file` (indented) if given, else to `output`
/// on a single line.
pub fn execute(
    path: &Path,
    language: Language,
    output_file: Option<&Path>,
    output: &mut dyn Write,
) -> anyhow::Result<()> {
    let data = read_dialogue_file(path, language)
        .with_context(|| format!("Failed to read dialogue from {}", path.display()))?;

    match output_file {
        Some(file) => {
            let json = data.to_json_pretty()?;
            persist(json.as_bytes(), file)
                .with_context(|| format!("Failed to save dialogue to {}", file.display()))?;
        }
        None => {
            writeln!(output, "{}", data.to_json()?)?;
            output.flush()?;
        }
    }

    Ok(())
}
