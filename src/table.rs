use tracing::trace;

use crate::store::Row;

/// A block of rows, optionally introduced by a section label.
#[derive(Debug, Clone, PartialEq)]
pub struct RowGroup {
    pub label: Option<String>,
    pub rows: Vec<Row>,
}

impl RowGroup {
    pub fn unlabeled(rows: Vec<Row>) -> Self {
        Self { label: None, rows }
    }

    pub fn labeled(label: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            label: Some(label.into()),
            rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableRow {
    Section(String),
    Data(Row),
}

impl TableRow {
    #[cfg(test)]
    pub fn is_selectable(&self) -> bool {
        matches!(self, TableRow::Data(_))
    }
}

/// Table over a fixed set of rows with a live substring filter on one key column.
///
/// The stored groups are never touched. Each call to `apply_filter` rebuilds the
/// rendered rows from scratch, so applying the same filter twice gives the same result.
#[derive(Debug)]
pub struct FilteredTable {
    title: String,
    headers: Vec<String>,
    groups: Vec<RowGroup>,
    key_column: usize,
    filter: String,
    rows: Vec<TableRow>,
    data_rows: Vec<usize>, // Positions of selectable rows in `rows`
    selected: usize,       // Index into `data_rows`
    offset_row: usize,
    height: usize,
}

impl FilteredTable {
    pub fn new(
        title: impl Into<String>,
        headers: Vec<String>,
        groups: Vec<RowGroup>,
        key_column: usize,
    ) -> Self {
        let mut table = FilteredTable {
            title: title.into(),
            headers,
            groups,
            key_column,
            filter: String::new(),
            rows: Vec::new(),
            data_rows: Vec::new(),
            selected: 0,
            offset_row: 0,
            height: usize::MAX,
        };
        table.apply_filter("");
        table
    }

    pub fn apply_filter(&mut self, filter: &str) {
        self.filter = filter.to_lowercase();
        self.rows.clear();
        self.data_rows.clear();

        for group in self.groups.iter() {
            let mut matching = group
                .rows
                .iter()
                .filter(|row| Self::matches(row, self.key_column, &self.filter))
                .peekable();
            if matching.peek().is_none() {
                continue;
            }
            if let Some(label) = &group.label {
                self.rows.push(TableRow::Section(label.clone()));
            }
            for row in matching {
                self.data_rows.push(self.rows.len());
                self.rows.push(TableRow::Data(row.clone()));
            }
        }

        self.selected = 0;
        self.offset_row = 0;
        trace!(
            "Filter \"{}\" on {} keeps {} rows",
            self.filter,
            self.title,
            self.data_rows.len()
        );
    }

    fn matches(row: &Row, key_column: usize, filter: &str) -> bool {
        if filter.is_empty() {
            return true;
        }
        row.get(key_column)
            .is_some_and(|key| key.to_lowercase().contains(filter))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn visible_count(&self) -> usize {
        self.data_rows.len()
    }

    pub fn label(&self) -> String {
        if self.filter.is_empty() {
            format!("{}[{}]", self.title, self.visible_count())
        } else {
            format!("{}[{}]_<{}>", self.title, self.visible_count(), self.filter)
        }
    }

    /// Position of the selected row in `rows()`.
    pub fn selected(&self) -> Option<usize> {
        self.data_rows.get(self.selected).copied()
    }

    #[cfg(test)]
    pub fn offset(&self) -> usize {
        self.offset_row
    }

    /// Rows inside the viewport and the selected position relative to it.
    pub fn viewport(&self) -> (&[TableRow], Option<usize>) {
        let rbegin = std::cmp::min(self.offset_row, self.rows.len());
        let rend = std::cmp::min(rbegin.saturating_add(self.height), self.rows.len());
        let selected = self
            .selected()
            .filter(|&pos| pos >= rbegin && pos < rend)
            .map(|pos| pos - rbegin);
        (&self.rows[rbegin..rend], selected)
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = std::cmp::max(height, 1);
        self.scroll_to_selection();
    }

    pub fn page_size(&self) -> usize {
        std::cmp::min(self.height, self.rows.len().max(1))
    }

    /// Returns the fields of the selected row. Section labels and the header are never returned.
    pub fn activate(&self) -> Option<Row> {
        match self.selected().and_then(|pos| self.rows.get(pos)) {
            Some(TableRow::Data(row)) => Some(row.clone()),
            _ => None,
        }
    }

    pub fn move_down(&mut self, size: usize) {
        if self.data_rows.is_empty() {
            return;
        }
        self.selected = std::cmp::min(self.selected + size, self.data_rows.len() - 1);
        self.scroll_to_selection();
    }

    pub fn move_up(&mut self, size: usize) {
        self.selected = self.selected.saturating_sub(size);
        self.scroll_to_selection();
    }

    pub fn move_beginning(&mut self) {
        self.selected = 0;
        self.offset_row = 0;
    }

    pub fn move_end(&mut self) {
        self.selected = self.data_rows.len().saturating_sub(1);
        self.scroll_to_selection();
    }

    fn scroll_to_selection(&mut self) {
        let Some(pos) = self.selected() else {
            self.offset_row = 0;
            return;
        };
        if pos < self.offset_row {
            // Keep the section label of the first row of a group in view
            self.offset_row = match pos.checked_sub(1).map(|p| &self.rows[p]) {
                Some(TableRow::Section(_)) if self.height > 1 => pos - 1,
                _ => pos,
            };
        } else if pos >= self.offset_row.saturating_add(self.height) {
            self.offset_row = pos + 1 - self.height;
        }
    }
}
