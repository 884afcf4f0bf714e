use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a single line in a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Present, unchanged, in both inputs.
    Context,
    /// Present only in the suggested input.
    Addition,
    /// Present only in the original input.
    Deletion,
}

impl LineKind {
    /// Gutter marker used by unified output.
    pub fn marker(self) -> char {
        match self {
            Self::Context => ' ',
            Self::Addition => '+',
            Self::Deletion => '-',
        }
    }

    pub fn is_change(self) -> bool {
        !matches!(self, Self::Context)
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Context => write!(f, "context"),
            Self::Addition => write!(f, "addition"),
            Self::Deletion => write!(f, "deletion"),
        }
    }
}

/// One classified line of a comparison.
///
/// Line numbers are 1-based. A context line carries its position in both
/// inputs; a deletion only its original position; an addition only its
/// suggested position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRecord {
    pub old_line: Option<usize>,
    pub new_line: Option<usize>,
    pub content: String,
    pub kind: LineKind,
}

impl LineRecord {
    pub fn context(old_line: usize, new_line: usize, content: impl Into<String>) -> Self {
        Self {
            old_line: Some(old_line),
            new_line: Some(new_line),
            content: content.into(),
            kind: LineKind::Context,
        }
    }

    pub fn deletion(old_line: usize, content: impl Into<String>) -> Self {
        Self {
            old_line: Some(old_line),
            new_line: None,
            content: content.into(),
            kind: LineKind::Deletion,
        }
    }

    pub fn addition(new_line: usize, content: impl Into<String>) -> Self {
        Self {
            old_line: None,
            new_line: Some(new_line),
            content: content.into(),
            kind: LineKind::Addition,
        }
    }

    /// Line number in the input this line was taken from.
    pub fn source_line_number(&self) -> Option<usize> {
        match self.kind {
            LineKind::Context | LineKind::Deletion => self.old_line,
            LineKind::Addition => self.new_line,
        }
    }

    pub fn in_original(&self) -> bool {
        matches!(self.kind, LineKind::Context | LineKind::Deletion)
    }

    pub fn in_suggested(&self) -> bool {
        matches!(self.kind, LineKind::Context | LineKind::Addition)
    }
}

/// How an alignment was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentStrategy {
    /// Full LCS table with the deletions-first tie-break.
    #[default]
    LcsTable,
    /// Myers fallback for inputs too large for the table. The edit script is
    /// still minimal, but ties may resolve differently than the table would.
    Myers,
}

impl AlignmentStrategy {
    pub fn is_exact(self) -> bool {
        matches!(self, Self::LcsTable)
    }
}

impl fmt::Display for AlignmentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LcsTable => write!(f, "lcs"),
            Self::Myers => write!(f, "myers (approximate)"),
        }
    }
}

/// Line counts of a comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub additions: usize,
    pub deletions: usize,
    pub unchanged: usize,
}

/// A contiguous group of changes with surrounding context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunk {
    pub old_start: usize,
    pub old_len: usize,
    pub new_start: usize,
    pub new_len: usize,
    pub lines: Vec<LineRecord>,
}

impl Hunk {
    /// `@@ -a,b +c,d @@` header for this hunk.
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_len, self.new_start, self.new_len
        )
    }
}

/// The ordered result of comparing an original and a suggested text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiffResult {
    lines: Vec<LineRecord>,
    strategy: AlignmentStrategy,
}

impl DiffResult {
    pub fn new(lines: Vec<LineRecord>, strategy: AlignmentStrategy) -> Self {
        Self { lines, strategy }
    }

    pub fn lines(&self) -> &[LineRecord] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<LineRecord> {
        self.lines
    }

    pub fn strategy(&self) -> AlignmentStrategy {
        self.strategy
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn has_changes(&self) -> bool {
        self.lines.iter().any(|line| line.kind.is_change())
    }

    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::default();
        for line in &self.lines {
            match line.kind {
                LineKind::Context => stats.unchanged += 1,
                LineKind::Addition => stats.additions += 1,
                LineKind::Deletion => stats.deletions += 1,
            }
        }
        stats
    }

    /// Rebuilds the original text from context and deleted lines.
    pub fn original_text(&self) -> String {
        join_content(self.lines.iter().filter(|line| line.in_original()))
    }

    /// Rebuilds the suggested text from context and added lines.
    pub fn suggested_text(&self) -> String {
        join_content(self.lines.iter().filter(|line| line.in_suggested()))
    }

    /// Groups changes into hunks carrying up to `context` unchanged lines on
    /// each side. Hunks whose context would touch or overlap are merged.
    pub fn hunks(&self, context: usize) -> Vec<Hunk> {
        let change_idx: Vec<usize> = self
            .lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.kind.is_change())
            .map(|(idx, _)| idx)
            .collect();

        let Some(&first) = change_idx.first() else {
            return Vec::new();
        };

        let window_end = |idx: usize| {
            idx.saturating_add(context)
                .saturating_add(1)
                .min(self.lines.len())
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        let mut start = first.saturating_sub(context);
        let mut end = window_end(first);
        for &idx in &change_idx[1..] {
            let next_start = idx.saturating_sub(context);
            if next_start <= end {
                end = window_end(idx);
            } else {
                ranges.push((start, end));
                start = next_start;
                end = window_end(idx);
            }
        }
        ranges.push((start, end));

        ranges
            .into_iter()
            .map(|(start, end)| self.hunk_for(start, end))
            .collect()
    }

    fn hunk_for(&self, start: usize, end: usize) -> Hunk {
        // Lines of each side that precede the hunk.
        let old_before = self.lines[..start]
            .iter()
            .filter(|line| line.in_original())
            .count();
        let new_before = self.lines[..start]
            .iter()
            .filter(|line| line.in_suggested())
            .count();

        let lines = self.lines[start..end].to_vec();
        let old_len = lines.iter().filter(|line| line.in_original()).count();
        let new_len = lines.iter().filter(|line| line.in_suggested()).count();

        Hunk {
            old_start: if old_len == 0 { old_before } else { old_before + 1 },
            old_len,
            new_start: if new_len == 0 { new_before } else { new_before + 1 },
            new_len,
            lines,
        }
    }
}

fn join_content<'a>(lines: impl Iterator<Item = &'a LineRecord>) -> String {
    lines
        .map(|line| line.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Presentation mode for a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    #[default]
    Unified,
    SideBySide,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unified => write!(f, "unified"),
            Self::SideBySide => write!(f, "side-by-side"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unified" | "inline" => Ok(Self::Unified),
            "side-by-side" | "side_by_side" | "split" | "sbs" => Ok(Self::SideBySide),
            other => Err(format!(
                "unknown view mode '{other}' (expected unified or side-by-side)"
            )),
        }
    }
}

/// A highlighted fragment inside a changed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineSegment {
    pub text: String,
    pub changed: bool,
}

/// One cell of a side-by-side row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideCell {
    pub line_number: usize,
    pub content: String,
    pub kind: LineKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<InlineSegment>>,
}

/// A row of the side-by-side view; `None` renders as a blank cell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideBySideRow {
    pub left: Option<SideCell>,
    pub right: Option<SideCell>,
}

/// Output of the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum RenderedView {
    Unified { lines: Vec<LineRecord> },
    SideBySide { rows: Vec<SideBySideRow> },
}

impl RenderedView {
    pub fn mode(&self) -> ViewMode {
        match self {
            Self::Unified { .. } => ViewMode::Unified,
            Self::SideBySide { .. } => ViewMode::SideBySide,
        }
    }

    /// Number of display rows.
    pub fn row_count(&self) -> usize {
        match self {
            Self::Unified { lines } => lines.len(),
            Self::SideBySide { rows } => rows.len(),
        }
    }
}

/// Left column of a side-by-side view, blank cells included.
pub fn left_column(rows: &[SideBySideRow]) -> Vec<Option<&SideCell>> {
    rows.iter().map(|row| row.left.as_ref()).collect()
}

/// Right column of a side-by-side view, blank cells included.
pub fn right_column(rows: &[SideBySideRow]) -> Vec<Option<&SideCell>> {
    rows.iter().map(|row| row.right.as_ref()).collect()
}
