//! Collaborator traits.
//!
//! The core performs no I/O: rendered SQL is executed through a
//! [`Connection`], which yields a [`RowCursor`] of raw tuples. Sources
//! that carry presentation metadata additionally implement
//! [`StyleSupplier`].

use tabula_common::{TabulaResult, Value};

use crate::style::{Style, NO_STYLE};

/// A forward-only producer of raw result tuples.
///
/// Implementations are supplied by backend drivers. Closing the
/// underlying backend resource is the implementation's responsibility;
/// [`close`] must be safe to call more than once.
///
/// [`close`]: RowCursor::close
pub trait RowCursor {
    /// Produces the next tuple, or `None` when exhausted.
    fn next_row(&mut self) -> TabulaResult<Option<Vec<Value>>>;

    /// Releases the underlying resource.
    fn close(&mut self) -> TabulaResult<()> {
        Ok(())
    }
}

/// A connection to one backend.
///
/// Accepts rendered SQL text plus bound parameters and returns a
/// cursor over the result. A failing backend reports an execution
/// error wrapping the original cause; the core never interprets it.
pub trait Connection {
    /// Executes a statement and returns a cursor over its result.
    fn execute(&mut self, sql: &str, params: &[Value]) -> TabulaResult<Box<dyn RowCursor>>;
}

/// Supplies per-cell styles by (row, column) coordinate.
///
/// Only sources that support presentation metadata implement this;
/// everywhere else every cell is [`NO_STYLE`].
pub trait StyleSupplier {
    /// The style of the cell at the given coordinate.
    fn style_at(&self, row: usize, column: usize) -> Style;
}

/// The no-op style supplier: every cell is unstyled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoStyles;

impl StyleSupplier for NoStyles {
    fn style_at(&self, _row: usize, _column: usize) -> Style {
        NO_STYLE
    }
}

/// An in-memory cursor over pre-built tuples.
///
/// Useful for tests and for adapting sources that are already fully
/// materialized.
#[derive(Debug, Default)]
pub struct MemoryCursor {
    rows: std::collections::VecDeque<Vec<Value>>,
}

impl MemoryCursor {
    /// Creates a cursor over the given tuples.
    pub fn new(rows: Vec<Vec<Value>>) -> Self {
        Self { rows: rows.into() }
    }
}

impl RowCursor for MemoryCursor {
    fn next_row(&mut self) -> TabulaResult<Option<Vec<Value>>> {
        Ok(self.rows.pop_front())
    }

    fn close(&mut self) -> TabulaResult<()> {
        self.rows.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_cursor_drains_in_order() {
        let mut cursor = MemoryCursor::new(vec![
            vec![Value::int(1)],
            vec![Value::int(2)],
        ]);
        assert_eq!(cursor.next_row().unwrap(), Some(vec![Value::int(1)]));
        assert_eq!(cursor.next_row().unwrap(), Some(vec![Value::int(2)]));
        assert_eq!(cursor.next_row().unwrap(), None);
    }

    #[test]
    fn test_memory_cursor_close_discards_rows() {
        let mut cursor = MemoryCursor::new(vec![vec![Value::int(1)]]);
        cursor.close().unwrap();
        assert_eq!(cursor.next_row().unwrap(), None);
        // Closing twice is fine.
        cursor.close().unwrap();
    }

    #[test]
    fn test_no_styles_supplier() {
        assert_eq!(NoStyles.style_at(3, 7), NO_STYLE);
    }
}
