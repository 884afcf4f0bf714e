//! Line alignment based on the longest common subsequence.
//!
//! The exact path fills an LCS length table and backtracks from its far
//! corner. When both neighbours of a cell tie, the backtrack steps through the
//! suggested side first; reversed into forward order this places every
//! deletion of a divergence point before its additions.

use crate::domain::AlignmentStrategy;
use similar::{Algorithm, DiffOp};
use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use twox_hash::XxHash64;

type LineIds<'a> = HashMap<&'a str, u32, BuildHasherDefault<XxHash64>>;

/// One step of an alignment. Indices are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AlignOp {
    Equal { old: usize, new: usize },
    Delete { old: usize },
    Insert { new: usize },
}

impl AlignOp {
    fn is_change(self) -> bool {
        !matches!(self, Self::Equal { .. })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Alignment {
    pub(crate) ops: Vec<AlignOp>,
    pub(crate) strategy: AlignmentStrategy,
}

/// Aligns `a` against `b`. The LCS table is used unless it would hold more
/// than `max_table_cells` entries after the common suffix is peeled off.
pub(crate) fn align(a: &[&str], b: &[&str], max_table_cells: usize) -> Alignment {
    // Peeling the suffix is exactly what the backtrack does first.
    let suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    let a_head = &a[..a.len() - suffix];
    let b_head = &b[..b.len() - suffix];

    let cells = (a_head.len() + 1).saturating_mul(b_head.len() + 1);
    let (mut ops, strategy) = if cells > max_table_cells {
        log::warn!(
            "LCS table of {} cells exceeds limit of {}; using Myers fallback",
            cells,
            max_table_cells
        );
        (myers_ops(a_head, b_head), AlignmentStrategy::Myers)
    } else {
        (lcs_ops(a_head, b_head), AlignmentStrategy::LcsTable)
    };

    log::debug!(
        "aligned {}x{} lines ({} shared suffix) with {}",
        a.len(),
        b.len(),
        suffix,
        strategy
    );

    ops.extend((0..suffix).map(|k| AlignOp::Equal {
        old: a_head.len() + k,
        new: b_head.len() + k,
    }));

    Alignment { ops, strategy }
}

/// Maps every distinct line to a small integer so the table compares ids.
fn intern<'a>(a: &[&'a str], b: &[&'a str]) -> (Vec<u32>, Vec<u32>) {
    let mut ids = LineIds::default();
    let mut id_of = |line: &'a str| {
        let next = ids.len() as u32;
        *ids.entry(line).or_insert(next)
    };
    let a_ids: Vec<u32> = a.iter().map(|line| id_of(*line)).collect();
    let b_ids: Vec<u32> = b.iter().map(|line| id_of(*line)).collect();
    (a_ids, b_ids)
}

fn lcs_ops(a: &[&str], b: &[&str]) -> Vec<AlignOp> {
    let (a_ids, b_ids) = intern(a, b);
    let (m, n) = (a_ids.len(), b_ids.len());
    let width = n + 1;
    let mut table = vec![0u32; (m + 1) * width];

    for i in 1..=m {
        for j in 1..=n {
            table[i * width + j] = if a_ids[i - 1] == b_ids[j - 1] {
                table[(i - 1) * width + j - 1] + 1
            } else {
                table[(i - 1) * width + j].max(table[i * width + j - 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(m + n);
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && a_ids[i - 1] == b_ids[j - 1] {
            ops.push(AlignOp::Equal {
                old: i - 1,
                new: j - 1,
            });
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table[i * width + j - 1] >= table[(i - 1) * width + j]) {
            ops.push(AlignOp::Insert { new: j - 1 });
            j -= 1;
        } else {
            ops.push(AlignOp::Delete { old: i - 1 });
            i -= 1;
        }
    }

    ops.reverse();
    ops
}

fn myers_ops(a: &[&str], b: &[&str]) -> Vec<AlignOp> {
    let mut ops = Vec::with_capacity(a.len().max(b.len()));

    for op in similar::capture_diff_slices(Algorithm::Myers, a, b) {
        match op {
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            } => ops.extend((0..len).map(|k| AlignOp::Equal {
                old: old_index + k,
                new: new_index + k,
            })),
            DiffOp::Delete {
                old_index, old_len, ..
            } => ops.extend((old_index..old_index + old_len).map(|old| AlignOp::Delete { old })),
            DiffOp::Insert {
                new_index, new_len, ..
            } => ops.extend((new_index..new_index + new_len).map(|new| AlignOp::Insert { new })),
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                ops.extend((old_index..old_index + old_len).map(|old| AlignOp::Delete { old }));
                ops.extend((new_index..new_index + new_len).map(|new| AlignOp::Insert { new }));
            }
        }
    }

    deletions_first(&mut ops);
    ops
}

/// Reorders each run of changes so deletions come before additions. Each
/// side keeps its own relative order.
fn deletions_first(ops: &mut [AlignOp]) {
    let mut start = 0;
    while start < ops.len() {
        if !ops[start].is_change() {
            start += 1;
            continue;
        }
        let end = ops[start..]
            .iter()
            .position(|op| !op.is_change())
            .map_or(ops.len(), |offset| start + offset);
        ops[start..end].sort_by_key(|op| matches!(op, AlignOp::Insert { .. }));
        start = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_lcs(a: &[&str], b: &[&str]) -> usize {
        match (a.split_first(), b.split_first()) {
            (Some((x, a_rest)), Some((y, b_rest))) => {
                if x == y {
                    1 + brute_lcs(a_rest, b_rest)
                } else {
                    brute_lcs(a_rest, b).max(brute_lcs(a, b_rest))
                }
            }
            _ => 0,
        }
    }

    fn equal_count(ops: &[AlignOp]) -> usize {
        ops.iter().filter(|op| !op.is_change()).count()
    }

    /// Every string over {a, b} with at most `max_len` characters.
    fn words(max_len: usize) -> Vec<Vec<&'static str>> {
        let mut out = vec![Vec::new()];
        let mut frontier = vec![Vec::new()];
        for _ in 0..max_len {
            let mut next = Vec::new();
            for word in &frontier {
                for letter in ["a", "b"] {
                    let mut extended: Vec<&str> = word.clone();
                    extended.push(letter);
                    next.push(extended);
                }
            }
            out.extend(next.iter().cloned());
            frontier = next;
        }
        out
    }

    fn assert_valid(a: &[&str], b: &[&str], ops: &[AlignOp]) {
        let mut next_old = 0;
        let mut next_new = 0;
        for op in ops {
            match *op {
                AlignOp::Equal { old, new } => {
                    assert_eq!((old, new), (next_old, next_new));
                    assert_eq!(a[old], b[new]);
                    next_old += 1;
                    next_new += 1;
                }
                AlignOp::Delete { old } => {
                    assert_eq!(old, next_old);
                    next_old += 1;
                }
                AlignOp::Insert { new } => {
                    assert_eq!(new, next_new);
                    next_new += 1;
                }
            }
        }
        assert_eq!((next_old, next_new), (a.len(), b.len()));
    }

    fn assert_deletions_first(ops: &[AlignOp]) {
        for pair in ops.windows(2) {
            assert!(
                !matches!(pair, [AlignOp::Insert { .. }, AlignOp::Delete { .. }]),
                "addition followed by deletion in {ops:?}"
            );
        }
    }

    #[test]
    fn test_table_alignment_is_maximal_on_small_inputs() {
        let all = words(4);
        for a in &all {
            for b in &all {
                let alignment = align(a, b, usize::MAX);
                assert_eq!(alignment.strategy, AlignmentStrategy::LcsTable);
                assert_valid(a, b, &alignment.ops);
                assert_deletions_first(&alignment.ops);
                assert_eq!(equal_count(&alignment.ops), brute_lcs(a, b), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_myers_fallback_is_minimal_and_deletions_first() {
        let all = words(4);
        for a in &all {
            for b in &all {
                let alignment = align(a, b, 0);
                assert_valid(a, b, &alignment.ops);
                assert_deletions_first(&alignment.ops);
                assert_eq!(equal_count(&alignment.ops), brute_lcs(a, b), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_fallback_only_past_cell_limit() {
        let a = ["x", "y"];
        let b = ["y", "z"];
        // Nothing shared at the tail, so the table is 3x3.
        assert_eq!(align(&a, &b, 9).strategy, AlignmentStrategy::LcsTable);
        assert_eq!(align(&a, &b, 8).strategy, AlignmentStrategy::Myers);
    }

    #[test]
    fn test_shared_suffix_shrinks_table() {
        let a = ["q", "same", "tail"];
        let b = ["r", "same", "tail"];
        // Only the 2x2 table for the differing heads is needed.
        let alignment = align(&a, &b, 4);
        assert_eq!(alignment.strategy, AlignmentStrategy::LcsTable);
        assert_eq!(
            alignment.ops,
            vec![
                AlignOp::Delete { old: 0 },
                AlignOp::Insert { new: 0 },
                AlignOp::Equal { old: 1, new: 1 },
                AlignOp::Equal { old: 2, new: 2 },
            ]
        );
    }

    #[test]
    fn test_replaced_block_lists_deletions_then_additions() {
        let a = ["keep", "old1", "old2", "end"];
        let b = ["keep", "new1", "new2", "new3", "end"];
        let ops = align(&a, &b, usize::MAX).ops;
        assert_eq!(
            ops,
            vec![
                AlignOp::Equal { old: 0, new: 0 },
                AlignOp::Delete { old: 1 },
                AlignOp::Delete { old: 2 },
                AlignOp::Insert { new: 1 },
                AlignOp::Insert { new: 2 },
                AlignOp::Insert { new: 3 },
                AlignOp::Equal { old: 3, new: 4 },
            ]
        );
    }

    #[test]
    fn test_deletions_first_keeps_side_order() {
        let mut ops = vec![
            AlignOp::Insert { new: 0 },
            AlignOp::Delete { old: 0 },
            AlignOp::Insert { new: 1 },
            AlignOp::Delete { old: 1 },
            AlignOp::Equal { old: 2, new: 2 },
            AlignOp::Insert { new: 3 },
        ];
        deletions_first(&mut ops);
        assert_eq!(
            ops,
            vec![
                AlignOp::Delete { old: 0 },
                AlignOp::Delete { old: 1 },
                AlignOp::Insert { new: 0 },
                AlignOp::Insert { new: 1 },
                AlignOp::Equal { old: 2, new: 2 },
                AlignOp::Insert { new: 3 },
            ]
        );
    }
}
