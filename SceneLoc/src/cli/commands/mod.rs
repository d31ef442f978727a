//! `SceneLoc` subcommands

pub mod read;
pub mod write;

use std::io::{Read, Write};
use std::path::PathBuf;

use clap::Subcommand;

use crate::dialog::Language;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract the dialogue of one language as JSON
    Read {
        /// Assets file to read
        path: PathBuf,

        /// Language prefix to filter scenes by (EN or ZH)
        #[arg(short, long)]
        language: Language,

        /// Write indented JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Merge edited dialogue into an assets file
    Write {
        /// Assets file to update in place
        path: PathBuf,

        /// Language whose scenes receive the edits (EN or ZH)
        #[arg(short, long)]
        language: Language,

        /// Read the dialogue JSON from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

impl Commands {
    pub fn execute(&self, input: &mut dyn Read, output: &mut dyn Write) -> anyhow::Result<()> {
        match self {
            Commands::Read {
                path,
                language,
                output: output_file,
            } => read::execute(path, *language, output_file.as_deref(), output),
            Commands::Write {
                path,
                language,
                input: input_file,
            } => write::execute(path, *language, input_file.as_deref(), input, output),
        }
    }
}
