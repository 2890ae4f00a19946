use std::collections::{BTreeMap, BTreeSet};

use super::error::{DataError, DataResult};
use super::model::{CellValue, LongRow, LongTable, Table, WideRow, WideTable};

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// How values sharing a group are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregation {
    #[default]
    Sum,
    Mean,
}

/// Running accumulator for one group.
#[derive(Debug, Clone, Copy, Default)]
struct Acc {
    sum: f64,
    count: usize,
}

impl Acc {
    fn push(&mut self, v: f64) {
        self.sum += v;
        self.count += 1;
    }

    fn finish(self, agg: Aggregation) -> f64 {
        match agg {
            Aggregation::Sum => self.sum,
            Aggregation::Mean if self.count == 0 => 0.0,
            Aggregation::Mean => self.sum / self.count as f64,
        }
    }
}

fn column(table: &Table, name: &str) -> DataResult<usize> {
    table
        .column_index(name)
        .ok_or_else(|| DataError::UnknownColumn(name.to_string()))
}

// ---------------------------------------------------------------------------
// Pivot
// ---------------------------------------------------------------------------

/// Pivot `table` into one row per distinct `key` and one column per distinct
/// `category`, aggregating `value`.
///
/// Combinations with no numeric source value are `0.0`. Categories are in
/// ascending order; rows are sorted by key, descending.
pub fn pivot(
    table: &Table,
    key: &str,
    category: &str,
    value: &str,
    agg: Aggregation,
) -> DataResult<WideTable> {
    let key_idx = column(table, key)?;
    let cat_idx = column(table, category)?;
    let val_idx = column(table, value)?;

    let mut categories: BTreeSet<CellValue> = BTreeSet::new();
    let mut cells: BTreeMap<CellValue, BTreeMap<CellValue, Acc>> = BTreeMap::new();

    for row in table.rows() {
        let k = &row.values[key_idx];
        let c = &row.values[cat_idx];
        categories.insert(c.clone());
        let acc = cells
            .entry(k.clone())
            .or_default()
            .entry(c.clone())
            .or_default();
        if let Some(v) = row.values[val_idx].as_f64() {
            acc.push(v);
        }
    }

    let categories: Vec<CellValue> = categories.into_iter().collect();
    let rows = cells
        .into_iter()
        .rev()
        .map(|(k, by_cat)| WideRow {
            key: k,
            values: categories
                .iter()
                .map(|c| by_cat.get(c).map(|a| a.finish(agg)).unwrap_or(0.0))
                .collect(),
        })
        .collect();

    Ok(WideTable {
        key_column: key.to_string(),
        category_column: category.to_string(),
        value_column: value.to_string(),
        categories,
        rows,
    })
}

// ---------------------------------------------------------------------------
// Melt
// ---------------------------------------------------------------------------

/// Un-pivot a [`WideTable`] into (key, category, value) rows, category-major:
/// all keys of the first category, then all keys of the second, and so on.
pub fn melt(wide: &WideTable) -> LongTable {
    let rows = wide
        .categories
        .iter()
        .enumerate()
        .flat_map(|(ci, cat)| {
            wide.rows.iter().map(move |r| LongRow {
                key: r.key.clone(),
                category: cat.clone(),
                value: r.values[ci],
            })
        })
        .collect();

    LongTable {
        key_column: wide.key_column.clone(),
        category_column: wide.category_column.clone(),
        value_column: wide.value_column.clone(),
        rows,
    }
}

// ---------------------------------------------------------------------------
// One-dimensional group aggregation
// ---------------------------------------------------------------------------

/// Aggregated value for one group, plus how many numeric values fed it.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupValue {
    pub group: CellValue,
    pub value: f64,
    pub count: usize,
}

/// Aggregate `value` per distinct `group`, ascending by group. Groups whose
/// rows carry no numeric value are left out.
pub fn aggregate_by(
    table: &Table,
    group: &str,
    value: &str,
    agg: Aggregation,
) -> DataResult<Vec<GroupValue>> {
    let group_idx = column(table, group)?;
    let val_idx = column(table, value)?;

    let mut groups: BTreeMap<CellValue, Acc> = BTreeMap::new();
    for row in table.rows() {
        if let Some(v) = row.values[val_idx].as_f64() {
            groups
                .entry(row.values[group_idx].clone())
                .or_default()
                .push(v);
        }
    }

    Ok(groups
        .into_iter()
        .map(|(g, acc)| GroupValue {
            group: g,
            value: acc.finish(agg),
            count: acc.count,
        })
        .collect())
}
