use std::path::PathBuf;

use anyhow::{Context, Result};

use rusty_albums::config::DEFAULT_DATA_PATH;

/// Small deterministic LCG so the sample file is reproducible.
struct SampleRng(u64);

impl SampleRng {
    fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    fn below(&mut self, n: u32) -> u32 {
        self.next_u32() % n
    }
}

const GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Biography",
    "Comedy",
    "Drama",
    "Horror",
    "Jazz",
    "Electronic",
];

const ARTISTS: &[(&str, &[&str])] = &[
    ("Radiohead", &["OK Computer", "Kid A", "Amnesiac", "In Rainbows"]),
    ("Björk", &["Debut", "Homogenic", "Vespertine", "Medúlla"]),
    ("Portishead", &["Dummy", "Portishead", "Third"]),
    ("Massive Attack", &["Blue Lines", "Mezzanine", "Heligoland"]),
    ("Low", &["Secret Name", "Things We Lost in the Fire", "The Great Destroyer"]),
    ("Boards of Canada", &["Music Has the Right to Children", "Geogaddi", "Tomorrow's Harvest"]),
];

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

    if let Some(dir) = output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut rng = SampleRng(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writer.write_record(["Artist", "Album", "Year", "Genre", "Score"])?;

    let mut rows = 0;
    for (artist, albums) in ARTISTS {
        let mut year = 1986 + rng.below(8) as i64;
        for album in *albums {
            let genre = GENRES[rng.below(GENRES.len() as u32) as usize];
            // Scores in half-point steps between 4.0 and 10.0.
            let score = 4.0 + rng.below(13) as f64 * 0.5;
            writer.write_record([
                artist.to_string(),
                album.to_string(),
                year.to_string(),
                genre.to_string(),
                score.to_string(),
            ])?;
            rows += 1;
            year = (year + 2 + rng.below(5) as i64).min(2016);
        }
    }
    writer.flush()?;

    println!("Wrote {rows} albums to {}", output_path.display());
    Ok(())
}
