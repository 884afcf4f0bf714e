//! Comparison of an original and a suggested code snippet.
//!
//! Text is split into lines, aligned on their longest common subsequence,
//! classified into context/addition/deletion records and finally projected
//! into a unified or side-by-side view.

mod align;
mod classify;
pub mod format;
pub mod lines;
pub mod render;


use crate::domain::{CodeChange, Comparison, DiffError, DiffResult, Side, ViewMode};
use crate::infra::{hash, language};

pub use format::{format_comparison, format_patch, format_side_by_side, format_unified, format_view};
pub use lines::{Lines, count_lines, split_lines};
pub use render::{RenderOptions, render, render_with, side_by_side_rows};

/// Combined line count above which a comparison is refused.
pub const DEFAULT_MAX_TOTAL_LINES: usize = 20_000;

/// LCS table size above which the Myers fallback is used.
pub const DEFAULT_MAX_TABLE_CELLS: usize = 25_000_000;

/// Resource limits for one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    pub max_total_lines: usize,
    pub max_table_cells: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            max_total_lines: DEFAULT_MAX_TOTAL_LINES,
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
        }
    }
}

/// Compares two texts with the default limits.
pub fn compute_diff(original: &str, suggested: &str) -> Result<DiffResult, DiffError> {
    compute_diff_with(original, suggested, &DiffOptions::default())
}

pub fn compute_diff_with(
    original: &str,
    suggested: &str,
    options: &DiffOptions,
) -> Result<DiffResult, DiffError> {
    let total_lines = lines::diff_line_count(original) + lines::diff_line_count(suggested);
    if total_lines > options.max_total_lines {
        log::warn!(
            "refusing comparison of {} lines (limit {})",
            total_lines,
            options.max_total_lines
        );
        return Err(DiffError::InputTooLarge {
            total_lines,
            max_lines: options.max_total_lines,
        });
    }

    let a = lines::diff_lines(original);
    let b = lines::diff_lines(suggested);
    let alignment = align::align(&a, &b, options.max_table_cells);
    let records = classify::classify(&alignment.ops, &a, &b);

    Ok(DiffResult::new(records, alignment.strategy))
}

/// Like `compute_diff_with`, for raw bytes that must be valid UTF-8.
pub fn compute_diff_bytes(
    original: &[u8],
    suggested: &[u8],
    options: &DiffOptions,
) -> Result<DiffResult, DiffError> {
    let original = decode(original, Side::Original)?;
    let suggested = decode(suggested, Side::Suggested)?;
    compute_diff_with(original, suggested, options)
}

/// Strict UTF-8 decoding; invalid input is reported, never replaced.
pub fn decode(bytes: &[u8], side: Side) -> Result<&str, DiffError> {
    std::str::from_utf8(bytes).map_err(|err| DiffError::Encoding {
        side,
        valid_up_to: err.valid_up_to(),
    })
}

/// Compares a `CodeChange` and renders it for the presentation layer.
pub fn compare(
    change: &CodeChange,
    options: &DiffOptions,
    render_options: &RenderOptions,
    mode: ViewMode,
) -> Result<Comparison, DiffError> {
    let result = compute_diff_with(&change.original, &change.suggested, options)?;
    let language = change
        .language
        .clone()
        .filter(|l| !l.trim().is_empty())
        .or_else(|| language::detect_language(&change.file_name).map(str::to_string));

    Ok(Comparison {
        file_name: change.file_name.clone(),
        language,
        stats: result.stats(),
        strategy: result.strategy(),
        original_hash: format!("{:016x}", hash::hash64(&change.original)),
        suggested_hash: format!("{:016x}", hash::hash64(&change.suggested)),
        view: render_with(&result, mode, render_options),
    })
}
