//! Datasets.

use std::fmt;

use tabula_common::{TabulaError, TabulaResult, Value};
use tabula_query::SelectItem;

use crate::cursor::{RowCursor, StyleSupplier};
use crate::row::Row;

enum Backing {
    Materialized {
        rows: Vec<Row>,
        position: usize,
    },
    Streaming {
        cursor: Box<dyn RowCursor>,
        next_index: usize,
        closed: bool,
    },
}

/// The tabular result of executing a query.
///
/// A dataset pairs each produced tuple positionally with the query's
/// select items: every row has exactly one cell per select item, in
/// select order. A cursor that violates this fails with a
/// result-shape error (except for `SELECT *` queries, whose shape is
/// driver-defined).
///
/// A dataset is either **materialized** (all rows held in memory;
/// random access and restart are available) or **streaming**
/// (forward-only, single pass; [`row`], [`row_count`] and [`reset`]
/// fail with a not-supported error). Release is explicit via
/// [`close`], which is idempotent; dropping the dataset closes it as
/// a backstop.
///
/// One dataset is consumed by one reader at a time.
///
/// [`row`]: DataSet::row
/// [`row_count`]: DataSet::row_count
/// [`reset`]: DataSet::reset
/// [`close`]: DataSet::close
pub struct DataSet {
    items: Vec<SelectItem>,
    styles: Option<Box<dyn StyleSupplier>>,
    backing: Backing,
}

impl DataSet {
    /// Wraps a cursor as a forward-only streaming dataset.
    pub fn streaming(items: Vec<SelectItem>, cursor: Box<dyn RowCursor>) -> Self {
        Self {
            items,
            styles: None,
            backing: Backing::Streaming {
                cursor,
                next_index: 0,
                closed: false,
            },
        }
    }

    /// Drains a cursor into a fully materialized dataset.
    ///
    /// The cursor is closed whether or not draining succeeds.
    pub fn materialized(
        items: Vec<SelectItem>,
        mut cursor: Box<dyn RowCursor>,
    ) -> TabulaResult<Self> {
        let drained = Self::drain(&items, cursor.as_mut());
        let closed = cursor.close();
        let rows = drained?;
        closed?;
        Ok(Self {
            items,
            styles: None,
            backing: Backing::Materialized { rows, position: 0 },
        })
    }

    fn drain(items: &[SelectItem], cursor: &mut dyn RowCursor) -> TabulaResult<Vec<Row>> {
        let mut rows = Vec::new();
        while let Some(values) = cursor.next_row()? {
            Self::check_shape(items, &values)?;
            rows.push(Row::new(values));
        }
        Ok(rows)
    }

    fn check_shape(items: &[SelectItem], values: &[Value]) -> TabulaResult<()> {
        if !items.is_empty() && values.len() != items.len() {
            return Err(TabulaError::ResultShape {
                expected: items.len(),
                actual: values.len(),
            });
        }
        Ok(())
    }

    /// Attaches a style supplier.
    ///
    /// Materialized rows are restyled immediately; streaming rows are
    /// styled as they are produced.
    pub fn with_styles(mut self, supplier: Box<dyn StyleSupplier>) -> Self {
        if let Backing::Materialized { rows, .. } = &mut self.backing {
            for (index, row) in rows.iter_mut().enumerate() {
                row.restyle(|column| supplier.style_at(index, column));
            }
        }
        self.styles = Some(supplier);
        self
    }

    /// The select items this dataset is shaped by.
    pub fn select_items(&self) -> &[SelectItem] {
        &self.items
    }

    /// The result column labels: alias when present, column name
    /// otherwise.
    pub fn column_labels(&self) -> Vec<String> {
        self.items.iter().map(SelectItem::label).collect()
    }

    /// True for a forward-only cursor-backed dataset.
    pub fn is_streaming(&self) -> bool {
        matches!(self.backing, Backing::Streaming { .. })
    }

    /// Produces the next row, or `None` when exhausted or closed.
    pub fn next_row(&mut self) -> TabulaResult<Option<Row>> {
        match &mut self.backing {
            Backing::Materialized { rows, position } => {
                let row = rows.get(*position).cloned();
                if row.is_some() {
                    *position += 1;
                }
                Ok(row)
            }
            Backing::Streaming {
                cursor,
                next_index,
                closed,
            } => {
                if *closed {
                    return Ok(None);
                }
                let Some(values) = cursor.next_row()? else {
                    return Ok(None);
                };
                Self::check_shape(&self.items, &values)?;
                let mut row = Row::new(values);
                if let Some(supplier) = &self.styles {
                    let index = *next_index;
                    row.restyle(|column| supplier.style_at(index, column));
                }
                *next_index += 1;
                Ok(Some(row))
            }
        }
    }

    /// Random access by row index. Materialized datasets only.
    pub fn row(&self, index: usize) -> TabulaResult<&Row> {
        match &self.backing {
            Backing::Materialized { rows, .. } => {
                rows.get(index).ok_or(TabulaError::RowOutOfRange {
                    index,
                    count: rows.len(),
                })
            }
            Backing::Streaming { .. } => Err(TabulaError::not_supported(
                "random access on a streaming dataset",
            )),
        }
    }

    /// Number of rows. Materialized datasets only.
    pub fn row_count(&self) -> TabulaResult<usize> {
        match &self.backing {
            Backing::Materialized { rows, .. } => Ok(rows.len()),
            Backing::Streaming { .. } => Err(TabulaError::not_supported(
                "row count of a streaming dataset",
            )),
        }
    }

    /// Restarts iteration from the first row. Materialized datasets
    /// only.
    pub fn reset(&mut self) -> TabulaResult<()> {
        match &mut self.backing {
            Backing::Materialized { position, .. } => {
                *position = 0;
                Ok(())
            }
            Backing::Streaming { .. } => Err(TabulaError::not_supported(
                "restarting a streaming dataset",
            )),
        }
    }

    /// Releases the backing cursor. Safe to call more than once; a
    /// closed streaming dataset yields no further rows.
    pub fn close(&mut self) -> TabulaResult<()> {
        match &mut self.backing {
            Backing::Materialized { .. } => Ok(()),
            Backing::Streaming { cursor, closed, .. } => {
                if *closed {
                    return Ok(());
                }
                *closed = true;
                cursor.close()
            }
        }
    }
}

impl Drop for DataSet {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

impl fmt::Debug for DataSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("DataSet");
        debug.field("columns", &self.items.len());
        match &self.backing {
            Backing::Materialized { rows, .. } => debug.field("rows", &rows.len()),
            Backing::Streaming { closed, .. } => debug.field("streaming", &!*closed),
        };
        debug.finish()
    }
}
