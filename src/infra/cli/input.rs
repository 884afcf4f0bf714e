//! Comparison input acquisition from files and stdin.

use crate::application::compare::decode;
use crate::domain::{CodeChange, Side};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Where an input blob comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input, written as `-` on the command line.
    Stdin,
    File(PathBuf),
}

impl InputSource {
    pub fn parse(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    pub fn is_stdin(&self) -> bool {
        matches!(self, Self::Stdin)
    }

    /// Name shown to the user for this source.
    pub fn display_name(&self) -> String {
        match self {
            Self::Stdin => "stdin".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }

    fn file_name(&self) -> Option<String> {
        match self {
            Self::Stdin => None,
            Self::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
        }
    }
}

/// Reads the raw bytes of a source.
pub fn read_source(source: &InputSource) -> Result<Vec<u8>> {
    match source {
        InputSource::Stdin => {
            let mut buffer = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
        InputSource::File(path) => read_file(path),
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Builds a `CodeChange` from two sources. Both must be valid UTF-8.
pub fn code_change_from_sources(
    original: &InputSource,
    suggested: &InputSource,
    name: Option<String>,
    language: Option<String>,
) -> Result<CodeChange> {
    if original.is_stdin() && suggested.is_stdin() {
        anyhow::bail!("Only one of the inputs can be read from stdin");
    }

    let original_bytes = read_source(original)?;
    let suggested_bytes = read_source(suggested)?;
    let original_text = decode(&original_bytes, Side::Original)
        .with_context(|| format!("Cannot compare {}", original.display_name()))?;
    let suggested_text = decode(&suggested_bytes, Side::Suggested)
        .with_context(|| format!("Cannot compare {}", suggested.display_name()))?;

    let file_name = name
        .or_else(|| suggested.file_name())
        .or_else(|| original.file_name())
        .unwrap_or_else(|| "stdin".to_string());

    Ok(CodeChange {
        file_name,
        language,
        original: original_text.to_string(),
        suggested: suggested_text.to_string(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChangeDocument {
    Many(Vec<CodeChange>),
    One(CodeChange),
}

/// Parses a JSON document holding one `CodeChange` or an array of them.
pub fn parse_code_changes(json: &str) -> Result<Vec<CodeChange>> {
    let document: ChangeDocument =
        serde_json::from_str(json).context("Failed to parse code changes")?;
    Ok(match document {
        ChangeDocument::Many(changes) => changes,
        ChangeDocument::One(change) => vec![change],
    })
}

pub fn read_code_changes(source: &InputSource) -> Result<Vec<CodeChange>> {
    let bytes = read_source(source)?;
    let json = decode(&bytes, Side::Document)
        .with_context(|| format!("Cannot read code changes from {}", source.display_name()))?;
    parse_code_changes(json)
}
