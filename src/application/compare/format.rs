//! Plain-text presentation of rendered comparisons.

use crate::domain::{
    Comparison, DiffResult, LineKind, LineRecord, RenderedView, SideBySideRow, SideCell,
};
use std::fmt::Write;

const GUTTER_WIDTH: usize = 4;
const COLUMN_SEPARATOR: &str = " | ";
const MIN_SIDE_BY_SIDE_WIDTH: usize = 40;

fn number(n: Option<usize>) -> String {
    n.map(|n| format!("{:>width$}", n, width = GUTTER_WIDTH))
        .unwrap_or_else(|| " ".repeat(GUTTER_WIDTH))
}

/// Single column with both line numbers and a `+`/`-` marker.
pub fn format_unified(lines: &[LineRecord]) -> String {
    let mut out = String::new();
    for line in lines {
        let _ = writeln!(
            out,
            "{} {} {} {}",
            number(line.old_line),
            number(line.new_line),
            line.kind.marker(),
            line.content
        );
    }
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn format_cell(cell: Option<&SideCell>, column_width: usize) -> String {
    let text = match cell {
        Some(cell) => {
            let prefix = format!("{} {} ", number(Some(cell.line_number)), cell.kind.marker());
            let room = column_width.saturating_sub(prefix.chars().count());
            format!("{prefix}{}", truncate(&cell.content, room))
        }
        None => String::new(),
    };
    format!("{:<column_width$}", text)
}

/// Two columns with independent gutters. `width` is the total line width.
pub fn format_side_by_side(rows: &[SideBySideRow], width: usize) -> String {
    let width = width.max(MIN_SIDE_BY_SIDE_WIDTH);
    let column_width = (width - COLUMN_SEPARATOR.len()) / 2;

    let mut out = String::new();
    for row in rows {
        let left = format_cell(row.left.as_ref(), column_width);
        let right = format_cell(row.right.as_ref(), column_width);
        let _ = writeln!(out, "{}{}{}", left, COLUMN_SEPARATOR, right.trim_end());
    }
    out
}

pub fn format_view(view: &RenderedView, width: usize) -> String {
    match view {
        RenderedView::Unified { lines } => format_unified(lines),
        RenderedView::SideBySide { rows } => format_side_by_side(rows, width),
    }
}

const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";

/// How one side of a comparison ends.
#[derive(Debug, Clone, Copy, Default)]
struct SideEnd {
    /// The empty line left after a final `\n`; a patch does not count it.
    terminator: Option<usize>,
    /// The last line when no `\n` follows it.
    unterminated: Option<usize>,
}

impl SideEnd {
    fn of<'a>(numbered: impl Iterator<Item = (usize, &'a str)>) -> Self {
        match numbered.last() {
            Some((n, "")) => Self {
                terminator: Some(n),
                unterminated: None,
            },
            Some((n, _)) => Self {
                terminator: None,
                unterminated: Some(n),
            },
            None => Self::default(),
        }
    }
}

fn is_line(number: Option<usize>, target: Option<usize>) -> bool {
    number.is_some() && number == target
}

/// Records as a patch sees them: the empty line after a final newline is
/// dropped, and a line shared by both sides is split into a deletion and an
/// addition when only one side has a newline after it.
fn patch_records(lines: &[LineRecord]) -> (Vec<LineRecord>, SideEnd, SideEnd) {
    let old = SideEnd::of(
        lines
            .iter()
            .filter_map(|line| line.old_line.map(|n| (n, line.content.as_str()))),
    );
    let new = SideEnd::of(
        lines
            .iter()
            .filter_map(|line| line.new_line.map(|n| (n, line.content.as_str()))),
    );

    let as_deletion = |line: &LineRecord| LineRecord {
        new_line: None,
        kind: LineKind::Deletion,
        ..line.clone()
    };
    let as_addition = |line: &LineRecord| LineRecord {
        old_line: None,
        kind: LineKind::Addition,
        ..line.clone()
    };

    let mut records = Vec::with_capacity(lines.len());
    for line in lines {
        let old_terminator = is_line(line.old_line, old.terminator);
        let new_terminator = is_line(line.new_line, new.terminator);
        match line.kind {
            LineKind::Context => match (old_terminator, new_terminator) {
                (true, true) => {}
                (true, false) => records.push(as_addition(line)),
                (false, true) => records.push(as_deletion(line)),
                (false, false) => {
                    let old_open = is_line(line.old_line, old.unterminated);
                    let new_open = is_line(line.new_line, new.unterminated);
                    if old_open == new_open {
                        records.push(line.clone());
                    } else {
                        records.push(as_deletion(line));
                        records.push(as_addition(line));
                    }
                }
            },
            LineKind::Deletion if old_terminator => {}
            LineKind::Addition if new_terminator => {}
            _ => records.push(line.clone()),
        }
    }

    for run in records.split_mut(|line| line.kind == LineKind::Context) {
        run.sort_by_key(|line| line.kind == LineKind::Addition);
    }

    (records, old, new)
}

/// Standard unified patch text. Empty when nothing changed.
///
/// Sides that do not end in a newline get a `\ No newline at end of file`
/// line after their last line, as `diff -u` writes it.
pub fn format_patch(result: &DiffResult, old_name: &str, new_name: &str, context: usize) -> String {
    let (records, old, new) = patch_records(result.lines());
    let hunks = DiffResult::new(records, result.strategy()).hunks(context);
    if hunks.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let _ = writeln!(out, "--- a/{}", old_name);
    let _ = writeln!(out, "+++ b/{}", new_name);
    for hunk in hunks {
        let _ = writeln!(out, "{}", hunk.header());
        for line in &hunk.lines {
            let _ = writeln!(out, "{}{}", line.kind.marker(), line.content);
            if is_line(line.old_line, old.unterminated) || is_line(line.new_line, new.unterminated)
            {
                let _ = writeln!(out, "{}", NO_NEWLINE_MARKER);
            }
        }
    }
    out
}

/// Header line followed by the rendered view.
pub fn format_comparison(comparison: &Comparison, width: usize) -> String {
    let mut out = String::new();
    let language = comparison.language.as_deref().unwrap_or("plain text");
    let _ = write!(
        out,
        "== {} ({}) +{} -{}",
        comparison.file_name, language, comparison.stats.additions, comparison.stats.deletions
    );
    if !comparison.strategy.is_exact() {
        let _ = write!(out, " [{}]", comparison.strategy);
    }
    out.push('\n');
    out.push_str(&format_view(&comparison.view, width));
    out
}
