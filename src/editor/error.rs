use thiserror::Error;

/// A buffer access outside the document's bounds.
///
/// These are precondition violations: the cursor is clamped before any
/// buffer call, so hitting one of these means a caller skipped that step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("line {index} out of range (buffer has {len} lines)")]
    LineOutOfRange { index: usize, len: usize },
    #[error("column {col} out of range on line {line} (length {len})")]
    ColumnOutOfRange { line: usize, col: usize, len: usize },
}
