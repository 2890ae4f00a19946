use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
/// Filters and pivots key `BTreeMap` / `BTreeSet` on it, so it must be `Ord`.
#[derive(Debug, Clone)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

/// Tokens that mean "no value" in exported spreadsheets.
const NA_TOKENS: &[&str] = &["nan", "na", "n/a", "null"];

// Equality follows `Ord` so set membership and `==` never disagree.
impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        use CellValue::*;

        fn rank(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) | Float(_) => 2,
                Text(_) => 3,
            }
        }

        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            // Mixed numeric columns (e.g. "2001" next to "2001.5") sort by value.
            (Integer(a), Float(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
            (Float(a), Integer(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
            (Text(a), Text(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl CellValue {
    /// Interpret the value as an `f64` for range checks and aggregation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Text content, if this is a text cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Guess the type of a raw text cell: integer, float, bool, text.
    /// Empty input and NA markers (`NaN`, `NA`, `N/A`, `null`) are `Null`.
    /// Only finite numbers become `Float`; words like `Infinity` stay text.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() || NA_TOKENS.iter().any(|t| s.eq_ignore_ascii_case(t)) {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            if f.is_finite() {
                return CellValue::Float(f);
            }
        }
        if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") {
            return CellValue::Bool(s.eq_ignore_ascii_case("true"));
        }
        CellValue::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Row / Table
// ---------------------------------------------------------------------------

/// One record; `values[i]` belongs to `Table::columns()[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub values: Vec<CellValue>,
}

impl Row {
    pub fn new(values: Vec<CellValue>) -> Self {
        Row { values }
    }
}

/// An ordered sequence of rows sharing a schema, with a pre-computed index
/// of distinct values per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
    unique_values: BTreeMap<String, BTreeSet<CellValue>>,
}

impl Table {
    /// Build a table; rows shorter than the header are padded with `Null`,
    /// longer ones truncated.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let width = columns.len();
        let rows: Vec<Row> = rows
            .into_iter()
            .map(|mut row| {
                row.values.resize(width, CellValue::Null);
                row
            })
            .collect();

        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = columns
            .iter()
            .map(|c| (c.clone(), BTreeSet::new()))
            .collect();
        for row in &rows {
            for (col, val) in columns.iter().zip(&row.values) {
                if let Some(set) = unique_values.get_mut(col) {
                    set.insert(val.clone());
                }
            }
        }

        Table {
            columns,
            rows,
            unique_values,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Sorted distinct values of a column (`None` if the column is absent).
    pub fn unique_values(&self, column: &str) -> Option<&BTreeSet<CellValue>> {
        self.unique_values.get(column)
    }

    /// Cell at (`row`, `column`), if both exist.
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.values.get(idx))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// WideTable / LongTable – derived views for the grid and the chart
// ---------------------------------------------------------------------------

/// One row of a [`WideTable`]: `values[i]` belongs to `categories[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct WideRow {
    pub key: CellValue,
    pub values: Vec<f64>,
}

/// Pivoted view: one row per key, one column per category.
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable {
    pub key_column: String,
    pub category_column: String,
    pub value_column: String,
    pub categories: Vec<CellValue>,
    pub rows: Vec<WideRow>,
}

impl WideTable {
    /// Cell lookup by key and category.
    pub fn get(&self, key: &CellValue, category: &CellValue) -> Option<f64> {
        let col = self.categories.iter().position(|c| c == category)?;
        self.rows
            .iter()
            .find(|r| &r.key == key)
            .and_then(|r| r.values.get(col).copied())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One (key, category, value) triple.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub key: CellValue,
    pub category: CellValue,
    pub value: f64,
}

/// Melted view used by the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LongTable {
    pub key_column: String,
    pub category_column: String,
    pub value_column: String,
    pub rows: Vec<LongRow>,
}

impl LongTable {
    /// Convert back into a plain three-column [`Table`].
    pub fn to_table(&self) -> Table {
        let columns = vec![
            self.key_column.clone(),
            self.category_column.clone(),
            self.value_column.clone(),
        ];
        let rows = self
            .rows
            .iter()
            .map(|r| {
                Row::new(vec![
                    r.key.clone(),
                    r.category.clone(),
                    CellValue::Float(r.value),
                ])
            })
            .collect();
        Table::new(columns, rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
