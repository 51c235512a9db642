//! Span callbacks for module layouts.

use crate::model::SpanDescriptor;

/// Per-item placement callbacks consumed by the module layout.
///
/// Unlike [`super::ItemProvider::span_of`], every position must be answerable:
/// a module layout has no fallback placement of its own.
pub trait ModuleDescriptor {
    /// Lane-first start cell of the item at `index`.
    fn start_index_of(&self, index: usize) -> usize;

    /// Rows covered by the item at `index` (at least 1).
    fn row_span_of(&self, index: usize) -> u32;

    /// Columns covered by the item at `index` (at least 1).
    fn column_span_of(&self, index: usize) -> u32;

    /// Gap between rows in pixels.
    fn row_spacing(&self) -> i32;

    /// Gap between columns in pixels.
    fn column_spacing(&self) -> i32;

    /// All three span values for `index`.
    fn span_of(&self, index: usize) -> SpanDescriptor {
        SpanDescriptor::new(
            self.start_index_of(index),
            self.row_span_of(index),
            self.column_span_of(index),
        )
    }
}

/// Module descriptor backed by a table of spans.
///
/// Positions past the table continue as 1x1 tiles in the cells that follow
/// the last entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableModule {
    spans: Vec<SpanDescriptor>,
    row_spacing: i32,
    column_spacing: i32,
}

impl TableModule {
    /// Build from parallel start/row/column tables.
    ///
    /// Tables of different lengths are cut to the shortest one.
    pub fn from_tables(starts: &[usize], row_spans: &[u32], column_spans: &[u32]) -> Self {
        let spans = starts
            .iter()
            .zip(row_spans)
            .zip(column_spans)
            .map(|((&start, &rows), &columns)| SpanDescriptor::new(start, rows, columns))
            .collect();
        Self {
            spans,
            row_spacing: 0,
            column_spacing: 0,
        }
    }

    /// Build from ready-made descriptors.
    pub fn from_spans(spans: Vec<SpanDescriptor>) -> Self {
        Self {
            spans,
            row_spacing: 0,
            column_spacing: 0,
        }
    }

    /// Set the gaps between rows and columns.
    pub fn with_spacing(mut self, row_spacing: i32, column_spacing: i32) -> Self {
        self.row_spacing = row_spacing;
        self.column_spacing = column_spacing;
        self
    }

    /// Number of table entries.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// True when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    fn lookup(&self, index: usize) -> SpanDescriptor {
        if let Some(span) = self.spans.get(index) {
            return *span;
        }
        match self.spans.last() {
            Some(last) => SpanDescriptor::single(last.start_cell_index + index + 1 - self.spans.len()),
            None => SpanDescriptor::single(index),
        }
    }
}

impl ModuleDescriptor for TableModule {
    fn start_index_of(&self, index: usize) -> usize {
        self.lookup(index).start_cell_index
    }

    fn row_span_of(&self, index: usize) -> u32 {
        self.lookup(index).row_span
    }

    fn column_span_of(&self, index: usize) -> u32 {
        self.lookup(index).column_span
    }

    fn row_spacing(&self) -> i32 {
        self.row_spacing
    }

    fn column_spacing(&self) -> i32 {
        self.column_spacing
    }

    fn span_of(&self, index: usize) -> SpanDescriptor {
        self.lookup(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_zip_into_spans() {
        let module = TableModule::from_tables(&[0, 1, 3], &[2, 1, 1], &[1, 2, 1]);
        assert_eq!(module.len(), 3);
        assert_eq!(module.span_of(0), SpanDescriptor::new(0, 2, 1));
        assert_eq!(module.span_of(1), SpanDescriptor::new(1, 1, 2));
        assert_eq!(module.start_index_of(2), 3);
    }

    #[test]
    fn mismatched_tables_use_shortest() {
        let module = TableModule::from_tables(&[0, 1, 3], &[2, 1], &[1, 2, 1]);
        assert_eq!(module.len(), 2);
    }

    #[test]
    fn positions_past_table_continue_after_last_cell() {
        let module = TableModule::from_tables(&[0, 1, 3], &[2, 1, 1], &[1, 2, 1]);
        assert_eq!(module.span_of(3), SpanDescriptor::single(4));
        assert_eq!(module.row_span_of(5), 1);
        assert_eq!(TableModule::default().start_index_of(7), 7);
    }
}
