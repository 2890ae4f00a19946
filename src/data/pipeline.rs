use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

use super::error::DataResult;
use super::filter::{filter_entities, filter_rows};
use super::model::{CellValue, LongTable, Table, WideTable};
use super::reshape::{aggregate_by, melt, pivot, Aggregation, GroupValue};
use super::roles::{ColumnRole, ColumnRoles};

// ---------------------------------------------------------------------------
// Genre view: filter by genre + year, pivot, melt
// ---------------------------------------------------------------------------

/// Widget values driving the genre view.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreSelection {
    pub genres: BTreeSet<CellValue>,
    pub years: RangeInclusive<i64>,
}

/// Everything the genre view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreView {
    pub filtered: Table,
    pub wide: WideTable,
    pub long: LongTable,
}

/// Run filter → pivot (sum, descending year) → melt.
///
/// Fails with `MissingColumn` if the table has no year, genre or score column.
pub fn genre_view(
    table: &Table,
    roles: &ColumnRoles,
    selection: &GenreSelection,
) -> DataResult<GenreView> {
    let key = roles.require(ColumnRole::Key)?;
    let category = roles.require(ColumnRole::Category)?;
    let measure = roles.require(ColumnRole::Measure)?;

    let filtered = filter_rows(table, category, &selection.genres, key, selection.years.clone())?;
    let wide = pivot(&filtered, key, category, measure, Aggregation::Sum)?;
    let long = melt(&wide);

    Ok(GenreView {
        filtered,
        wide,
        long,
    })
}

// ---------------------------------------------------------------------------
// Artist view: entity filters + mean rating per artist
// ---------------------------------------------------------------------------

/// Free selections; empty means "everything".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtistSelection {
    pub artists: BTreeSet<CellValue>,
    pub albums: BTreeSet<CellValue>,
}

#[derive(Debug)]
pub struct ArtistView {
    pub filtered: Table,
    /// Mean rating per artist, highest first. An error here only disables
    /// the chart; `filtered` is still shown.
    pub scores: DataResult<Vec<GroupValue>>,
}

pub fn artist_view(table: &Table, roles: &ColumnRoles, selection: &ArtistSelection) -> ArtistView {
    let filtered = filter_entities(
        table,
        roles.get(ColumnRole::Artist),
        &selection.artists,
        roles.get(ColumnRole::Album),
        &selection.albums,
    );

    let scores = roles
        .require(ColumnRole::Artist)
        .and_then(|artist| Ok((artist, roles.require(ColumnRole::Measure)?)))
        .and_then(|(artist, measure)| aggregate_by(&filtered, artist, measure, Aggregation::Mean))
        .map(|mut scores| {
            scores.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.group.cmp(&b.group)));
            scores
        });

    ArtistView { filtered, scores }
}

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

/// Line-chart input derived from a [`LongTable`]: the key axis is nominal, so
/// keys are mapped to positions `0..keys.len()` in ascending order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSeries {
    pub keys: Vec<CellValue>,
    /// One `(category, points)` entry per series, ascending by category.
    pub series: Vec<(CellValue, Vec<[f64; 2]>)>,
}

pub fn line_series(long: &LongTable) -> LineSeries {
    let keys: Vec<CellValue> = long
        .rows
        .iter()
        .map(|r| r.key.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let position: BTreeMap<&CellValue, f64> = keys
        .iter()
        .enumerate()
        .map(|(i, k)| (k, i as f64))
        .collect();

    let mut series: BTreeMap<CellValue, Vec<[f64; 2]>> = BTreeMap::new();
    for row in &long.rows {
        let x = position.get(&row.key).copied().unwrap_or_default();
        series.entry(row.category.clone()).or_default().push([x, row.value]);
    }
    for points in series.values_mut() {
        points.sort_by(|a, b| a[0].total_cmp(&b[0]));
    }

    LineSeries {
        keys,
        series: series.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;
    use crate::data::DataError;

    fn albums() -> Table {
        let rows = [
            ("Radiohead", "Kid A", 2000, "Rock", 10.0),
            ("Radiohead", "Amnesiac", 2001, "Rock", 7.0),
            ("Björk", "Vespertine", 2001, "Pop", 8.0),
        ]
        .into_iter()
        .map(|(artist, album, year, genre, score)| {
            Row::new(vec![
                artist.into(),
                album.into(),
                CellValue::Integer(year),
                genre.into(),
                CellValue::Float(score),
            ])
        })
        .collect();
        Table::new(
            ["Artist", "Album", "Year", "Genre", "Score"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows,
        )
    }

    #[test]
    fn artist_scores_sorted_by_mean_descending() {
        let table = albums();
        let roles = ColumnRoles::resolve(table.columns());
        let view = artist_view(&table, &roles, &ArtistSelection::default());
        let scores = view.scores.unwrap();
        assert_eq!(scores[0].group, CellValue::from("Radiohead"));
        assert_eq!(scores[0].value, 8.5);
        assert_eq!(scores[1].group, CellValue::from("Björk"));
    }

    #[test]
    fn genre_view_without_measure_reports_missing_column() {
        let table = albums();
        let mut roles = ColumnRoles::resolve(table.columns());
        roles.measure = None;
        let selection = GenreSelection {
            genres: [CellValue::from("Rock")].into_iter().collect(),
            years: 2000..=2001,
        };
        let err = genre_view(&table, &roles, &selection).unwrap_err();
        assert!(matches!(
            err,
            DataError::MissingColumn {
                role: ColumnRole::Measure
            }
        ));
    }

    #[test]
    fn line_series_orders_keys_ascending() {
        let table = albums();
        let roles = ColumnRoles::resolve(table.columns());
        let selection = GenreSelection {
            genres: [CellValue::from("Rock"), CellValue::from("Pop")]
                .into_iter()
                .collect(),
            years: 2000..=2001,
        };
        let view = genre_view(&table, &roles, &selection).unwrap();
        let lines = line_series(&view.long);
        assert_eq!(lines.keys, vec![CellValue::Integer(2000), CellValue::Integer(2001)]);
        let (pop, points) = &lines.series[0];
        assert_eq!(pop, &CellValue::from("Pop"));
        assert_eq!(points, &vec![[0.0, 0.0], [1.0, 8.0]]);
    }
}
