//! DTOs for the crossword generator API.
//!
//! # Design
//! These types mirror the remote service's JSON but are defined independently
//! of the mock-server crate. Integration tests catch any schema drift between
//! the two. Optional and nullable fields use `Option` with `#[serde(default)]`
//! so an `error: null` or a missing `code` never fails a parse.

use serde::{Deserialize, Deserializer, Serialize};

/// Query parameters for a generation request.
///
/// Every field is optional and passed through untouched. The remote service
/// is the only judge of whether a value is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Grid size: small, medium, large.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Theme: random, animals, food, sports, science, geography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Difficulty: easy, medium, hard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    /// Query-string pairs in a fixed order. Unset and empty values are
    /// omitted.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("size", self.size.as_deref()),
            ("theme", self.theme.as_deref()),
            ("difficulty", self.difficulty.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| match value {
            Some(v) if !v.is_empty() => Some((name, v)),
            _ => None,
        })
        .collect()
    }
}

/// Top-level JSON envelope returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrosswordResponse {
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<CrosswordData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

impl CrosswordResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// A generated puzzle.
///
/// Every field tolerates `null` or absence and falls back to its default,
/// so a partial payload still parses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosswordData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub difficulty: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub theme: String,
    /// Rows of cells; `None` marks a blocked square.
    #[serde(default, deserialize_with = "null_as_default")]
    pub grid: Vec<Vec<Option<String>>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub across: Vec<Clue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub down: Vec<Clue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub word_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub html: String,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub solution_image: Option<Image>,
}

/// One entry of the across or down word list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clue: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub length: u32,
}

/// Descriptor of a rendered image hosted by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    #[serde(rename = "imageName", default, deserialize_with = "null_as_default")]
    pub image_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub format: String,
    #[serde(rename = "downloadURL", default, deserialize_with = "null_as_default")]
    pub download_url: String,
    /// Expiry as a unix timestamp.
    #[serde(default, deserialize_with = "null_as_default")]
    pub expires: i64,
}

/// Read `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
