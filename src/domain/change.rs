use serde::{Deserialize, Serialize};

use super::diff::{AlignmentStrategy, DiffStats, RenderedView};

/// A before/after pair supplied by the presentation or persistence layer,
/// typically the code sample attached to a modernization recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeChange {
    /// Display name of the file the snippet belongs to.
    #[serde(alias = "filename", alias = "file")]
    pub file_name: String,
    /// Language hint for syntax highlighting. Never consulted by the diff.
    #[serde(default)]
    pub language: Option<String>,
    #[serde(alias = "before")]
    pub original: String,
    #[serde(alias = "after")]
    pub suggested: String,
}

/// Rendering-ready comparison of one `CodeChange`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub file_name: String,
    pub language: Option<String>,
    pub stats: DiffStats,
    pub strategy: AlignmentStrategy,
    /// XxHash64 of the original text, hex encoded.
    pub original_hash: String,
    /// XxHash64 of the suggested text, hex encoded.
    pub suggested_hash: String,
    pub view: RenderedView,
}

impl Comparison {
    pub fn has_changes(&self) -> bool {
        self.stats.additions > 0 || self.stats.deletions > 0
    }
}
