//! Byte offset to line/column mapping.
//!
//! Line starts are computed once so each lookup is a binary search.

use tensa_ir::Span;

/// 1-based line and column of a position in the source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

/// Source text plus a table of line-start offsets.
///
/// The default map has no text: every offset lands on line 1 with
/// column `offset + 1`, which keeps positions deterministic when the
/// evaluator is driven from a tree that was never attached to a file.
#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    text: Option<Box<str>>,
    /// offsets[i] is the byte where line i + 1 starts.
    offsets: Vec<u32>,
}

impl SourceMap {
    pub fn new(text: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        SourceMap {
            text: Some(text.into()),
            offsets,
        }
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// Position of a byte offset. Columns count characters, not bytes.
    pub fn line_col(&self, offset: u32) -> LineCol {
        let Some(text) = &self.text else {
            return LineCol {
                line: 1,
                column: offset.saturating_add(1),
            };
        };

        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        let line_start = self.offsets.get(line_idx).copied().unwrap_or(0) as usize;
        let end = (offset as usize).min(text.len()).max(line_start);
        let column = text
            .get(line_start..end)
            .map_or(end - line_start, |s| s.chars().count());

        LineCol {
            line: u32::try_from(line_idx + 1).unwrap_or(u32::MAX),
            column: u32::try_from(column + 1).unwrap_or(u32::MAX),
        }
    }

    /// Start and end positions of a span.
    pub fn span_bounds(&self, span: Span) -> (LineCol, LineCol) {
        (self.line_col(span.start), self.line_col(span.end))
    }
}
