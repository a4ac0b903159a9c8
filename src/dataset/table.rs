use super::loader::DatasetLoadError;

/// Column-oriented view of a parsed CSV file.
#[derive(Debug, Clone)]
pub struct Table {
    /// Header names in file order.
    pub columns: Vec<String>,
    /// Cell values, row-major, each row aligned with `columns`.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Borrow every value of one column in row order.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().map(move |row| row[index].as_str())
    }
}

/// Parse CSV text with a header row into a [`Table`].
///
/// Cells are split on commas and trimmed; quoting is not supported, matching
/// the plain exports this tool consumes. Blank lines are skipped.
pub fn parse_csv(text: &str) -> Result<Table, DatasetLoadError> {
    let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return Err(DatasetLoadError::Empty);
    };
    let columns: Vec<String> = split_row(header);
    if columns.is_empty() {
        return Err(DatasetLoadError::Empty);
    }

    let mut rows = Vec::new();
    for (idx, line) in lines {
        let row = split_row(line);
        if row.len() != columns.len() {
            return Err(DatasetLoadError::RaggedRow {
                line: idx + 1,
                found: row.len(),
                expected: columns.len(),
            });
        }
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(DatasetLoadError::Empty);
    }

    Ok(Table { columns, rows })
}

fn split_row(line: &str) -> Vec<String> {
    line.split(',').map(|cell| cell.trim().to_string()).collect()
}
