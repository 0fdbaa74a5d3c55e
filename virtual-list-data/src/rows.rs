use alloc::vec::Vec;
use core::ops::Range;

use crate::Entry;

/// The logical rows of a list: each row is a contiguous span of the sequence.
///
/// With one column every element is its own row. With more, consecutive items are packed
/// greedily into rows of up to `column` elements; a load-status sentinel always gets a row to
/// itself and ends the row before it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowLayout {
    column: usize,
    rows: Vec<Range<usize>>,
}

impl RowLayout {
    pub fn pack<T, S>(data: &[Entry<T, S>], column: usize) -> Self {
        let column = column.max(1);
        let mut rows = Vec::with_capacity(data.len().div_ceil(column));

        let mut start = 0;
        while start < data.len() {
            let mut end = start + 1;
            if !data[start].is_status() {
                while end < data.len() && end - start < column && !data[end].is_status() {
                    end += 1;
                }
            }
            rows.push(start..end);
            start = end;
        }

        Self { column, rows }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The sequence span of `row`.
    pub fn get(&self, row: usize) -> Option<Range<usize>> {
        self.rows.get(row).cloned()
    }

    /// The first row that can differ once the elements from sequence index `index` on have
    /// changed. A row ending right at `index` counts, since it may have gained or lost elements.
    pub fn first_row_touching(&self, index: usize) -> usize {
        if self.column == 1 {
            return index.min(self.rows.len());
        }
        self.rows.partition_point(|row| row.end < index)
    }

    pub fn iter(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.rows.iter().cloned()
    }
}
