use std::fmt;

use super::error::{DataError, DataResult};

// ---------------------------------------------------------------------------
// Column roles: which header plays which part in the dashboard
// ---------------------------------------------------------------------------

/// Semantic role of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnRole {
    /// Ordinal pivot key (year).
    Key,
    /// Categorical filter / pivot column (genre).
    Category,
    Artist,
    Album,
    /// Numeric score or rating.
    Measure,
    /// Cover image URL or path.
    Image,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnRole::Key => "year",
            ColumnRole::Category => "genre",
            ColumnRole::Artist => "artist",
            ColumnRole::Album => "album",
            ColumnRole::Measure => "score/rating",
            ColumnRole::Image => "cover image",
        };
        f.write_str(name)
    }
}

/// How a header is matched against a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// Whole header, case-sensitive.
    Exact,
    /// Substring anywhere in the header, ASCII case-insensitive.
    Contains,
}

/// The lookup table. Exact entries are resolved before substring entries,
/// and a column claimed by one role is not offered to another.
pub const ROLE_PATTERNS: &[(ColumnRole, Match, &[&str])] = &[
    (ColumnRole::Key, Match::Exact, &["Year"]),
    (ColumnRole::Category, Match::Exact, &["Genre"]),
    (ColumnRole::Artist, Match::Exact, &["Artist"]),
    (ColumnRole::Album, Match::Exact, &["Album"]),
    (ColumnRole::Measure, Match::Contains, &["score", "rating"]),
    (ColumnRole::Image, Match::Contains, &["art", "cover"]),
];

fn matches(header: &str, kind: Match, pattern: &str) -> bool {
    match kind {
        Match::Exact => header == pattern,
        Match::Contains => header
            .to_ascii_lowercase()
            .contains(&pattern.to_ascii_lowercase()),
    }
}

/// Column names resolved for each role (`None` when nothing matched).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    pub key: Option<String>,
    pub category: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub measure: Option<String>,
    pub image: Option<String>,
}

impl ColumnRoles {
    /// Resolve every role against a header row.
    pub fn resolve(columns: &[String]) -> Self {
        let mut roles = ColumnRoles::default();
        let mut claimed = vec![false; columns.len()];

        for pass in [Match::Exact, Match::Contains] {
            for (role, kind, patterns) in ROLE_PATTERNS {
                if *kind != pass {
                    continue;
                }
                let hit = columns.iter().enumerate().find(|(i, header)| {
                    !claimed[*i] && patterns.iter().any(|p| matches(header, *kind, p))
                });
                if let Some((i, header)) = hit {
                    claimed[i] = true;
                    *roles.slot_mut(*role) = Some(header.clone());
                }
            }
        }
        roles
    }

    fn slot_mut(&mut self, role: ColumnRole) -> &mut Option<String> {
        match role {
            ColumnRole::Key => &mut self.key,
            ColumnRole::Category => &mut self.category,
            ColumnRole::Artist => &mut self.artist,
            ColumnRole::Album => &mut self.album,
            ColumnRole::Measure => &mut self.measure,
            ColumnRole::Image => &mut self.image,
        }
    }

    pub fn get(&self, role: ColumnRole) -> Option<&str> {
        let slot = match role {
            ColumnRole::Key => &self.key,
            ColumnRole::Category => &self.category,
            ColumnRole::Artist => &self.artist,
            ColumnRole::Album => &self.album,
            ColumnRole::Measure => &self.measure,
            ColumnRole::Image => &self.image,
        };
        slot.as_deref()
    }

    /// Like [`get`](Self::get) but a missing role is a [`DataError::MissingColumn`].
    pub fn require(&self, role: ColumnRole) -> DataResult<&str> {
        self.get(role).ok_or(DataError::MissingColumn { role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_primary_columns() {
        let roles = ColumnRoles::resolve(&headers(&["Year", "Genre", "Score"]));
        assert_eq!(roles.key.as_deref(), Some("Year"));
        assert_eq!(roles.category.as_deref(), Some("Genre"));
        assert_eq!(roles.measure.as_deref(), Some("Score"));
        assert_eq!(roles.image, None);
    }

    #[test]
    fn artist_is_not_taken_as_image() {
        let roles = ColumnRoles::resolve(&headers(&[
            "Artist",
            "Album",
            "My Rating",
            "Cover Art URL",
        ]));
        assert_eq!(roles.artist.as_deref(), Some("Artist"));
        assert_eq!(roles.album.as_deref(), Some("Album"));
        assert_eq!(roles.measure.as_deref(), Some("My Rating"));
        assert_eq!(roles.image.as_deref(), Some("Cover Art URL"));
    }

    #[test]
    fn missing_measure_is_an_error() {
        let roles = ColumnRoles::resolve(&headers(&["Artist", "Album"]));
        assert!(matches!(
            roles.require(ColumnRole::Measure),
            Err(DataError::MissingColumn {
                role: ColumnRole::Measure
            })
        ));
    }

    #[test]
    fn first_matching_header_wins() {
        let roles = ColumnRoles::resolve(&headers(&["critic_score", "user_rating"]));
        assert_eq!(roles.measure.as_deref(), Some("critic_score"));
    }
}
