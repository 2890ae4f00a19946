use std::collections::BTreeSet;
use std::io::Write;

use rusty_albums::data::cache::LoadCache;
use rusty_albums::data::filter::filter_rows;
use rusty_albums::data::model::CellValue;
use rusty_albums::data::pipeline::{
    artist_view, genre_view, ArtistSelection, GenreSelection,
};
use rusty_albums::data::reshape::{melt, pivot, Aggregation};
use rusty_albums::data::roles::{ColumnRole, ColumnRoles};
use rusty_albums::data::DataError;
use tempfile::NamedTempFile;

fn csv_file(contents: &str) -> NamedTempFile {
    let mut tmp = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(tmp, "{}", contents).unwrap();
    tmp
}

fn genres(names: &[&str]) -> BTreeSet<CellValue> {
    names.iter().map(|n| CellValue::from(*n)).collect()
}

const SCENARIO: &str = "Year,Genre,Score\n2001,Drama,10\n2001,Comedy,5\n2002,Drama,7\n";

#[test]
fn test_pivot_scenario_sorted_descending() {
    let tmp = csv_file(SCENARIO);
    let mut cache = LoadCache::new();
    let table = cache.get_or_load(tmp.path()).unwrap();
    let roles = ColumnRoles::resolve(table.columns());

    let view = genre_view(
        &table,
        &roles,
        &GenreSelection {
            genres: genres(&["Drama", "Comedy"]),
            years: 2000..=2002,
        },
    )
    .unwrap();

    let wide = &view.wide;
    let keys: Vec<_> = wide.rows.iter().map(|r| r.key.clone()).collect();
    assert_eq!(keys, vec![CellValue::Integer(2002), CellValue::Integer(2001)]);

    let drama = CellValue::from("Drama");
    let comedy = CellValue::from("Comedy");
    assert_eq!(wide.get(&CellValue::Integer(2002), &drama), Some(7.0));
    assert_eq!(wide.get(&CellValue::Integer(2002), &comedy), Some(0.0));
    assert_eq!(wide.get(&CellValue::Integer(2001), &drama), Some(10.0));
    assert_eq!(wide.get(&CellValue::Integer(2001), &comedy), Some(5.0));

    assert_eq!(view.long.len(), 4);
}

#[test]
fn test_range_excluding_everything_is_empty_not_error() {
    let tmp = csv_file(SCENARIO);
    let mut cache = LoadCache::new();
    let table = cache.get_or_load(tmp.path()).unwrap();
    let roles = ColumnRoles::resolve(table.columns());

    let view = genre_view(
        &table,
        &roles,
        &GenreSelection {
            genres: genres(&["Drama", "Comedy"]),
            years: 1900..=1901,
        },
    )
    .unwrap();

    assert!(view.filtered.is_empty());
    assert!(view.wide.is_empty());
    assert!(view.wide.categories.is_empty());
    assert!(view.long.is_empty());
}

#[test]
fn test_missing_rating_column_skips_only_the_chart() {
    let tmp = csv_file("Artist,Album,Year\nLow,Secret Name,1999\nLow,C'mon,2011\n");
    let mut cache = LoadCache::new();
    let table = cache.get_or_load(tmp.path()).unwrap();
    let roles = ColumnRoles::resolve(table.columns());
    assert_eq!(roles.get(ColumnRole::Measure), None);

    let view = artist_view(&table, &roles, &ArtistSelection::default());
    assert_eq!(view.filtered.len(), 2);
    assert!(matches!(
        view.scores,
        Err(DataError::MissingColumn {
            role: ColumnRole::Measure
        })
    ));
}

#[test]
fn test_filter_is_sound_and_complete() {
    let mut csv = String::from("Year,Genre,Score\n");
    let all_genres = ["Drama", "Comedy", "Horror", "Action"];
    for i in 0..80 {
        let year = 1990 + (i * 7) % 25;
        let genre = all_genres[i % all_genres.len()];
        csv.push_str(&format!("{year},{genre},{}\n", i % 10));
    }
    // Rows without a usable key never match.
    csv.push_str(",Drama,3\nunknown,Drama,4\n");
    let tmp = csv_file(&csv);
    let mut cache = LoadCache::new();
    let table = cache.get_or_load(tmp.path()).unwrap();

    let selections: [&[&str]; 4] = [&[], &["Drama"], &["Drama", "Horror"], &all_genres];
    let ranges = [(1990, 2014), (1995, 2000), (2003, 2003), (2020, 2030)];

    for sel in selections {
        let allowed = genres(sel);
        for (lo, hi) in ranges {
            let out = filter_rows(&table, "Genre", &allowed, "Year", lo..=hi).unwrap();

            let expected: Vec<_> = table
                .rows()
                .iter()
                .filter(|r| {
                    let year = r.values[0].as_f64();
                    allowed.contains(&r.values[1])
                        && year.is_some_and(|y| lo as f64 <= y && y <= hi as f64)
                })
                .cloned()
                .collect();

            assert_eq!(out.rows(), expected.as_slice(), "genres {sel:?}, years {lo}..={hi}");
            for row in out.rows() {
                assert!(allowed.contains(&row.values[1]));
            }
        }
    }
}

#[test]
fn test_wide_dimensions_follow_filtered_input() {
    let tmp = csv_file(
        "Year,Genre,Score\n\
         2001,Drama,1\n2002,Comedy,2\n2003,Horror,3\n2003,Drama,4\n1990,Jazz,5\n",
    );
    let mut cache = LoadCache::new();
    let table = cache.get_or_load(tmp.path()).unwrap();

    let filtered =
        filter_rows(&table, "Genre", &genres(&["Drama", "Horror", "Jazz"]), "Year", 2000..=2010)
            .unwrap();
    let wide = pivot(&filtered, "Year", "Genre", "Score", Aggregation::Sum).unwrap();

    // Jazz is selected but filtered out by year, so it gets no column.
    assert_eq!(wide.len(), 2);
    assert_eq!(
        wide.categories,
        vec![CellValue::from("Drama"), CellValue::from("Horror")]
    );
    assert_eq!(melt(&wide).len(), wide.len() * wide.categories.len());
}

#[test]
fn test_melt_then_pivot_reproduces_wide() {
    let tmp = csv_file(
        "Year,Genre,Score\n\
         2001,Drama,10\n2001,Drama,2.5\n2001,Comedy,5\n2002,Drama,7\n2004,Horror,1\n",
    );
    let mut cache = LoadCache::new();
    let table = cache.get_or_load(tmp.path()).unwrap();

    let wide = pivot(&table, "Year", "Genre", "Score", Aggregation::Sum).unwrap();
    let long = melt(&wide);
    let again = pivot(&long.to_table(), "Year", "Genre", "Score", Aggregation::Sum).unwrap();
    assert_eq!(again, wide);

    // Direct aggregation agrees with the long form for every source pair.
    for row in &long.rows {
        let direct: f64 = table
            .rows()
            .iter()
            .filter(|r| r.values[0] == row.key && r.values[1] == row.category)
            .filter_map(|r| r.values[2].as_f64())
            .sum();
        assert_eq!(row.value, direct);
    }
}

#[test]
fn test_na_scores_do_not_poison_sums() {
    let tmp = csv_file("Year,Genre,Score\n2001,Drama,10\n2001,Drama,NaN\n2001,Drama,N/A\n");
    let mut cache = LoadCache::new();
    let table = cache.get_or_load(tmp.path()).unwrap();
    assert_eq!(table.cell(1, "Score"), Some(&CellValue::Null));

    let wide = pivot(&table, "Year", "Genre", "Score", Aggregation::Sum).unwrap();
    assert_eq!(wide.rows.len(), 1);
    assert_eq!(wide.rows[0].values, vec![10.0]);
}

#[test]
fn test_album_named_like_a_number_stays_text() {
    let tmp = csv_file("Artist,Album,Year\nJourney,Infinity,1978\nJourney,Escape,1981\n");
    let mut cache = LoadCache::new();
    let table = cache.get_or_load(tmp.path()).unwrap();

    assert_eq!(table.cell(0, "Album"), Some(&CellValue::from("Infinity")));
    let albums = table.unique_values("Album").unwrap();
    assert!(albums.iter().all(|a| a.as_str().is_some()));
}
