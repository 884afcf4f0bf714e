use super::align::AlignOp;
use crate::domain::LineRecord;

/// Materializes alignment steps as line records with 1-based numbers.
pub(crate) fn classify(ops: &[AlignOp], a: &[&str], b: &[&str]) -> Vec<LineRecord> {
    ops.iter()
        .map(|op| match *op {
            AlignOp::Equal { old, new } => LineRecord::context(old + 1, new + 1, a[old]),
            AlignOp::Delete { old } => LineRecord::deletion(old + 1, a[old]),
            AlignOp::Insert { new } => LineRecord::addition(new + 1, b[new]),
        })
        .collect()
}
