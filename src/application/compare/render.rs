//! Projection of a `DiffResult` into its display views.

use crate::domain::{
    DiffResult, InlineSegment, LineKind, LineRecord, RenderedView, SideBySideRow, SideCell,
    ViewMode,
};
use similar::{ChangeTag, TextDiff};

const MAX_INLINE_LEN: usize = 600;
const MIN_INLINE_SIMILARITY: f32 = 0.3;

/// Renderer switches that never change which lines appear or where.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Attach intra-line segments to paired deletion/addition cells.
    pub inline_highlight: bool,
}

/// Renders `result` in `mode` without intra-line highlighting.
pub fn render(result: &DiffResult, mode: ViewMode) -> RenderedView {
    render_with(result, mode, &RenderOptions::default())
}

pub fn render_with(result: &DiffResult, mode: ViewMode, options: &RenderOptions) -> RenderedView {
    match mode {
        ViewMode::Unified => RenderedView::Unified {
            lines: result.lines().to_vec(),
        },
        ViewMode::SideBySide => RenderedView::SideBySide {
            rows: side_by_side_rows(result.lines(), options),
        },
    }
}

/// Builds side-by-side rows. Context lines fill both cells; inside a run of
/// changes the n-th deletion shares a row with the n-th addition and any
/// surplus line faces a blank cell.
pub fn side_by_side_rows(lines: &[LineRecord], options: &RenderOptions) -> Vec<SideBySideRow> {
    let mut rows = Vec::with_capacity(lines.len());
    let mut i = 0usize;

    while i < lines.len() {
        let line = &lines[i];

        if line.kind == LineKind::Context {
            rows.push(SideBySideRow {
                left: Some(cell(line, line.old_line)),
                right: Some(cell(line, line.new_line)),
            });
            i += 1;
            continue;
        }

        let run_end = lines[i..]
            .iter()
            .position(|l| l.kind == LineKind::Context)
            .map_or(lines.len(), |offset| i + offset);
        let run = &lines[i..run_end];

        let removed: Vec<&LineRecord> = run
            .iter()
            .filter(|l| l.kind == LineKind::Deletion)
            .collect();
        let added: Vec<&LineRecord> = run
            .iter()
            .filter(|l| l.kind == LineKind::Addition)
            .collect();

        for k in 0..removed.len().max(added.len()) {
            let mut left = removed.get(k).map(|l| cell(l, l.old_line));
            let mut right = added.get(k).map(|l| cell(l, l.new_line));

            if options.inline_highlight
                && let (Some(left), Some(right)) = (left.as_mut(), right.as_mut())
            {
                attach_inline_segments(left, right);
            }

            rows.push(SideBySideRow { left, right });
        }

        i = run_end;
    }

    rows
}

fn cell(line: &LineRecord, line_number: Option<usize>) -> SideCell {
    debug_assert!(
        line_number.is_some(),
        "{} line without a line number on its side",
        line.kind
    );
    SideCell {
        line_number: line_number.unwrap_or_default(),
        content: line.content.clone(),
        kind: line.kind,
        segments: None,
    }
}

fn should_do_inline(old: &str, new: &str) -> bool {
    old.len() <= MAX_INLINE_LEN && new.len() <= MAX_INLINE_LEN
}

fn attach_inline_segments(left: &mut SideCell, right: &mut SideCell) {
    if !should_do_inline(&left.content, &right.content) {
        return;
    }

    let diff = TextDiff::from_chars(left.content.as_str(), right.content.as_str());
    if diff.ratio() <= MIN_INLINE_SIMILARITY {
        return;
    }

    let mut old_segments = Vec::new();
    let mut new_segments = Vec::new();
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Equal => {
                push_segment(&mut old_segments, change.value(), false);
                push_segment(&mut new_segments, change.value(), false);
            }
            ChangeTag::Delete => push_segment(&mut old_segments, change.value(), true),
            ChangeTag::Insert => push_segment(&mut new_segments, change.value(), true),
        }
    }

    left.segments = Some(old_segments);
    right.segments = Some(new_segments);
}

/// Appends `text`, merging it into the previous segment when the flag matches.
fn push_segment(segments: &mut Vec<InlineSegment>, text: &str, changed: bool) {
    if let Some(last) = segments.last_mut()
        && last.changed == changed
    {
        last.text.push_str(text);
        return;
    }
    segments.push(InlineSegment {
        text: text.to_string(),
        changed,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AlignmentStrategy, left_column, right_column};

    fn result(lines: Vec<LineRecord>) -> DiffResult {
        DiffResult::new(lines, AlignmentStrategy::LcsTable)
    }

    #[test]
    fn test_unified_is_unmodified() {
        let diff = result(vec![
            LineRecord::deletion(1, "a"),
            LineRecord::addition(1, "b"),
        ]);
        match render(&diff, ViewMode::Unified) {
            RenderedView::Unified { lines } => assert_eq!(lines, diff.lines()),
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[test]
    fn test_uneven_run_pads_with_blank_cells() {
        let diff = result(vec![
            LineRecord::context(1, 1, "head"),
            LineRecord::deletion(2, "old"),
            LineRecord::addition(2, "new1"),
            LineRecord::addition(3, "new2"),
            LineRecord::context(3, 4, "tail"),
        ]);
        let rows = side_by_side_rows(diff.lines(), &RenderOptions::default());
        assert_eq!(rows.len(), 4);

        let left: Vec<Option<&str>> = left_column(&rows)
            .into_iter()
            .map(|c| c.map(|c| c.content.as_str()))
            .collect();
        let right: Vec<Option<&str>> = right_column(&rows)
            .into_iter()
            .map(|c| c.map(|c| c.content.as_str()))
            .collect();
        assert_eq!(left, vec![Some("head"), Some("old"), None, Some("tail")]);
        assert_eq!(
            right,
            vec![Some("head"), Some("new1"), Some("new2"), Some("tail")]
        );

        let tail = rows[3].right.as_ref().unwrap();
        assert_eq!(tail.line_number, 4);
        assert_eq!(rows[3].left.as_ref().unwrap().line_number, 3);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "without a line number")]
    fn test_record_missing_its_line_number_is_rejected() {
        let malformed = LineRecord {
            old_line: None,
            new_line: None,
            content: "x".into(),
            kind: LineKind::Deletion,
        };
        side_by_side_rows(&[malformed], &RenderOptions::default());
    }

    #[test]
    fn test_inline_segments_cover_each_side() {
        let diff = result(vec![
            LineRecord::deletion(1, "let x = 1;"),
            LineRecord::addition(1, "let x = 2;"),
        ]);
        let rows = side_by_side_rows(
            diff.lines(),
            &RenderOptions {
                inline_highlight: true,
            },
        );
        let left = rows[0].left.as_ref().unwrap();
        let right = rows[0].right.as_ref().unwrap();

        let left_segments = left.segments.as_ref().unwrap();
        let joined: String = left_segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(joined, "let x = 1;");
        assert!(left_segments.iter().any(|s| s.changed && s.text == "1"));

        let right_segments = right.segments.as_ref().unwrap();
        let joined: String = right_segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(joined, "let x = 2;");
        assert!(right_segments.iter().any(|s| s.changed && s.text == "2"));
    }

    #[test]
    fn test_dissimilar_lines_get_no_segments() {
        let diff = result(vec![
            LineRecord::deletion(1, "abc"),
            LineRecord::addition(1, "xyz"),
        ]);
        let rows = side_by_side_rows(
            diff.lines(),
            &RenderOptions {
                inline_highlight: true,
            },
        );
        assert!(rows[0].left.as_ref().unwrap().segments.is_none());
        assert!(rows[0].right.as_ref().unwrap().segments.is_none());
    }
}
