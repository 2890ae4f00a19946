use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use super::error::{DataError, DataResult};
use super::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Filter predicates
// ---------------------------------------------------------------------------

/// Keep rows whose `category_col` value is in `allowed` and whose
/// `key_col` value, read as a number, lies in `range` (inclusive).
///
/// * Input order is preserved.
/// * An empty `allowed` set selects nothing.
/// * Null or non-numeric keys never match.
pub fn filter_rows(
    table: &Table,
    category_col: &str,
    allowed: &BTreeSet<CellValue>,
    key_col: &str,
    range: RangeInclusive<i64>,
) -> DataResult<Table> {
    let cat_idx = column(table, category_col)?;
    let key_idx = column(table, key_col)?;
    let (low, high) = (*range.start() as f64, *range.end() as f64);

    let rows = table
        .rows()
        .iter()
        .filter(|row| {
            if !allowed.contains(&row.values[cat_idx]) {
                return false;
            }
            match row.values[key_idx].as_f64() {
                Some(key) => low <= key && key <= high,
                None => false,
            }
        })
        .cloned()
        .collect();

    Ok(Table::new(table.columns().to_vec(), rows))
}

/// Keep rows matching the artist and album selections. An empty selection
/// places no constraint on its column; a column that does not exist is
/// ignored the same way.
pub fn filter_entities(
    table: &Table,
    artist_col: Option<&str>,
    artists: &BTreeSet<CellValue>,
    album_col: Option<&str>,
    albums: &BTreeSet<CellValue>,
) -> Table {
    let constraints: Vec<(usize, &BTreeSet<CellValue>)> = [(artist_col, artists), (album_col, albums)]
        .into_iter()
        .filter(|(_, selected)| !selected.is_empty())
        .filter_map(|(col, selected)| Some((table.column_index(col?)?, selected)))
        .collect();

    if constraints.is_empty() {
        return table.clone();
    }

    let rows = table
        .rows()
        .iter()
        .filter(|row| {
            constraints
                .iter()
                .all(|(idx, selected)| selected.contains(&row.values[*idx]))
        })
        .cloned()
        .collect();

    Table::new(table.columns().to_vec(), rows)
}

fn column(table: &Table, name: &str) -> DataResult<usize> {
    table
        .column_index(name)
        .ok_or_else(|| DataError::UnknownColumn(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    fn sample() -> Table {
        let rows = [
            (2001, "Drama", 10),
            (1999, "Drama", 3),
            (2001, "Comedy", 5),
            (2002, "Horror", 8),
            (2002, "Drama", 7),
        ]
        .into_iter()
        .map(|(y, g, s)| Row::new(vec![CellValue::Integer(y), g.into(), CellValue::Integer(s)]))
        .collect();
        Table::new(vec!["Year".into(), "Genre".into(), "Score".into()], rows)
    }

    fn set(values: &[&str]) -> BTreeSet<CellValue> {
        values.iter().map(|v| CellValue::from(*v)).collect()
    }

    #[test]
    fn keeps_matching_rows_in_order() {
        let out = filter_rows(&sample(), "Genre", &set(&["Drama", "Comedy"]), "Year", 2000..=2002)
            .unwrap();
        let scores: Vec<_> = out.rows().iter().map(|r| r.values[2].clone()).collect();
        assert_eq!(
            scores,
            vec![CellValue::Integer(10), CellValue::Integer(5), CellValue::Integer(7)]
        );
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let out = filter_rows(&sample(), "Genre", &set(&["Drama"]), "Year", 1999..=2001).unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn empty_selection_yields_empty_table() {
        let out = filter_rows(&sample(), "Genre", &BTreeSet::new(), "Year", 1900..=2100).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.columns().len(), 3);
    }

    #[test]
    fn unknown_column_is_reported() {
        let err = filter_rows(&sample(), "Style", &set(&["Drama"]), "Year", 2000..=2002)
            .unwrap_err();
        assert!(matches!(err, DataError::UnknownColumn(c) if c == "Style"));
    }

    #[test]
    fn entity_filter_without_selection_keeps_everything() {
        let table = sample();
        let out = filter_entities(&table, Some("Genre"), &BTreeSet::new(), None, &BTreeSet::new());
        assert_eq!(out, table);
    }

    #[test]
    fn entity_filter_intersects_selections() {
        let out = filter_entities(
            &sample(),
            Some("Genre"),
            &set(&["Drama"]),
            Some("Year"),
            &[CellValue::Integer(2002)].into_iter().collect(),
        );
        assert_eq!(out.len(), 1);
    }
}
