use serde::{Deserialize, Serialize};

/// Header labels that mark a column of IPv4 addresses when no kind is given
pub const IPV4_COLUMN_LABELS: [&str; 2] = ["Local Address", "Remote Address"];

/// How the cells of a column compare when they are not numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Case-insensitive text
    #[default]
    Plain,

    /// Dotted-quad addresses, compared segment by segment
    Ipv4Address,
}

/// Order applied by the last sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Rows of cell text; row 0 is the header and never moves
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<String>>,

    /// Explicit kind per column; missing entries fall back to the header label
    #[serde(default)]
    pub column_kinds: Vec<ColumnKind>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            column_kinds: Vec::new(),
        }
    }

    pub fn with_column_kinds(rows: Vec<Vec<String>>, column_kinds: Vec<ColumnKind>) -> Self {
        Self { rows, column_kinds }
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Number of columns, as given by the header row
    pub fn column_count(&self) -> usize {
        self.header().map_or(0, <[String]>::len)
    }

    /// Rows below the header
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn column_kind(&self, column: usize) -> ColumnKind {
        if let Some(kind) = self.column_kinds.get(column) {
            return *kind;
        }

        match self.header().and_then(|h| h.get(column)) {
            Some(label) if IPV4_COLUMN_LABELS.contains(&label.as_str()) => ColumnKind::Ipv4Address,
            _ => ColumnKind::Plain,
        }
    }
}
