//! Domain types for the movie API.
//!
//! # Design
//! Field names follow the provider's JSON (`Title`, `imdbID`, ...) through
//! serde renames. Every provider field is optional: the API omits fields
//! freely and uses the literal `"N/A"` for "no data", so absence is decided
//! at render time by [`present`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The provider's "no data" marker.
pub const NOT_APPLICABLE: &str = "N/A";

/// Minimum query length, in characters, after trimming.
pub const MIN_QUERY_CHARS: usize = 2;

/// Returns the value unless it is absent, empty or `"N/A"`.
pub fn present(value: &Option<String>) -> Option<&str> {
    match value.as_deref() {
        None | Some("") | Some(NOT_APPLICABLE) => None,
        Some(v) => Some(v),
    }
}

/// A validated search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trim `raw` and check it is long enough to send.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty);
        }
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            return Err(ValidationError::TooShort);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a poster field should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poster<'a> {
    Url(&'a str),
    /// The provider sent `"N/A"`: show the fallback image.
    NotApplicable,
    /// No poster field at all: show the placeholder glyph.
    Missing,
}

impl<'a> Poster<'a> {
    pub fn from_field(field: Option<&'a str>) -> Self {
        match field {
            None | Some("") => Poster::Missing,
            Some(NOT_APPLICABLE) => Poster::NotApplicable,
            Some(url) => Poster::Url(url),
        }
    }
}

/// One element of a search response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultSummary {
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(rename = "Poster", default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

impl ResultSummary {
    pub fn poster(&self) -> Poster<'_> {
        Poster::from_field(self.poster.as_deref())
    }
}

/// Search results in provider order.
pub type ResultList = Vec<ResultSummary>;

/// A full record from a lookup by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetailRecord {
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub rating: Option<String>,
    #[serde(rename = "Runtime", default)]
    pub runtime: Option<String>,
    #[serde(rename = "Rated", default)]
    pub rated: Option<String>,
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    #[serde(rename = "Director", default)]
    pub director: Option<String>,
    #[serde(rename = "Writer", default)]
    pub writer: Option<String>,
    #[serde(rename = "Actors", default)]
    pub actors: Option<String>,
    #[serde(rename = "Language", default)]
    pub language: Option<String>,
    #[serde(rename = "Country", default)]
    pub country: Option<String>,
    #[serde(rename = "Awards", default)]
    pub awards: Option<String>,
    #[serde(rename = "BoxOffice", default)]
    pub box_office: Option<String>,
}

impl DetailRecord {
    pub fn poster(&self) -> Poster<'_> {
        Poster::from_field(self.poster.as_deref())
    }

    /// Labelled rows shown under the plot, in display order.
    pub fn spec_rows(&self) -> [(&'static str, &Option<String>); 8] {
        [
            ("Genre", &self.genre),
            ("Director", &self.director),
            ("Writer", &self.writer),
            ("Actors", &self.actors),
            ("Language", &self.language),
            ("Country", &self.country),
            ("Awards", &self.awards),
            ("Box Office", &self.box_office),
        ]
    }
}
