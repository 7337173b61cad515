//! Result rows.

use std::fmt;

use tabula_common::Value;

use crate::style::{Style, NO_STYLE};

/// A single row of a dataset.
///
/// Cells are positionally aligned with the query's select items. Each
/// cell carries a [`Style`], defaulting to [`NO_STYLE`]. Rows are
/// read-only once materialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<Value>,
    styles: Vec<Style>,
}

impl Row {
    /// Creates a row of unstyled cells.
    pub fn new(values: Vec<Value>) -> Self {
        let styles = vec![NO_STYLE; values.len()];
        Self { values, styles }
    }

    /// Number of cells in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this row has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value at the given cell index.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// The style of the given cell.
    pub fn style(&self, index: usize) -> &Style {
        self.styles.get(index).unwrap_or(&NO_STYLE)
    }

    /// The cell values as a slice.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Iterates over the cell values.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    /// Stamps every cell with the style produced by `style_at`.
    pub(crate) fn restyle(&mut self, style_at: impl Fn(usize) -> Style) {
        for (index, slot) in self.styles.iter_mut().enumerate() {
            *slot = style_at(index);
        }
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

impl IntoIterator for Row {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{SizeUnit, Style};

    #[test]
    fn test_row_defaults_to_no_style() {
        let row = Row::new(vec![Value::int(1), Value::string("x")]);
        assert_eq!(row.len(), 2);
        assert_eq!(row.style(0), &NO_STYLE);
        assert_eq!(row.style(1), &NO_STYLE);
        // Out of range also reads as unstyled.
        assert_eq!(row.style(9), &NO_STYLE);
    }

    #[test]
    fn test_row_get() {
        let row = Row::new(vec![Value::int(1), Value::int(2)]);
        assert_eq!(row.get(0), Some(&Value::int(1)));
        assert_eq!(row.get(2), None);
    }

    #[test]
    fn test_restyle() {
        let bold = Style::builder().bold().build().unwrap();
        let mut row = Row::new(vec![Value::int(1), Value::int(2)]);
        row.restyle(|index| if index == 0 { bold } else { NO_STYLE });
        assert!(row.style(0).is_bold());
        assert_eq!(row.style(1), &NO_STYLE);
    }

    #[test]
    fn test_row_display() {
        let row = Row::new(vec![Value::int(1), Value::string("hello")]);
        assert_eq!(row.to_string(), "(1, hello)");
    }

    #[test]
    fn test_styled_cells_keep_value_equality_separate() {
        let sized = Style::builder().font_size(9, SizeUnit::Pt).build().unwrap();
        let mut styled = Row::new(vec![Value::int(1)]);
        styled.restyle(|_| sized);
        let plain = Row::new(vec![Value::int(1)]);
        assert_eq!(styled.values(), plain.values());
        assert_ne!(styled, plain);
    }
}
