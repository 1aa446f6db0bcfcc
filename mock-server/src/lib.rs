//! In-memory stand-in for the OMDb API.
//!
//! Serves `GET /?s=<title>&apikey=<key>` and `GET /?i=<id>&apikey=<key>` from
//! a fixed catalogue, answering provider failures the way OMDb does: HTTP 200
//! with `{"Response":"False","Error":...}`. `GET /broken/` always fails with
//! a 500 so clients can exercise their transport error path.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

pub const DEFAULT_API_KEY: &str = "test-key";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Poster")]
    pub poster: String,
    #[serde(rename = "Rated", skip_serializing_if = "Option::is_none")]
    pub rated: Option<String>,
    #[serde(rename = "Runtime", skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(rename = "Genre", skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(rename = "Director", skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(rename = "Writer", skip_serializing_if = "Option::is_none")]
    pub writer: Option<String>,
    #[serde(rename = "Actors", skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,
    #[serde(rename = "Plot", skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(rename = "Language", skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(rename = "Country", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "Awards", skip_serializing_if = "Option::is_none")]
    pub awards: Option<String>,
    #[serde(rename = "imdbRating", skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "BoxOffice", skip_serializing_if = "Option::is_none")]
    pub box_office: Option<String>,
}

/// The summary shape used inside a search response.
#[derive(Serialize)]
struct SearchHit<'a> {
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "Year")]
    year: &'a str,
    #[serde(rename = "imdbID")]
    imdb_id: &'a str,
    #[serde(rename = "Type")]
    kind: &'a str,
    #[serde(rename = "Poster")]
    poster: &'a str,
}

impl<'a> From<&'a Movie> for SearchHit<'a> {
    fn from(movie: &'a Movie) -> Self {
        Self {
            title: &movie.title,
            year: &movie.year,
            imdb_id: &movie.imdb_id,
            kind: &movie.kind,
            poster: &movie.poster,
        }
    }
}

#[derive(Serialize)]
struct DetailBody<'a> {
    #[serde(rename = "Response")]
    response: &'static str,
    #[serde(flatten)]
    movie: &'a Movie,
}

#[derive(Debug, Default, Deserialize)]
pub struct OmdbParams {
    pub s: Option<String>,
    pub i: Option<String>,
    pub apikey: Option<String>,
}

#[derive(Debug)]
pub struct Catalog {
    pub api_key: String,
    pub movies: Vec<Movie>,
}

pub type Db = Arc<Catalog>;

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

/// The fixed catalogue every router serves.
pub fn catalogue() -> Vec<Movie> {
    vec![
        Movie {
            title: "Batman".into(),
            year: "1989".into(),
            imdb_id: "tt0096895".into(),
            kind: "movie".into(),
            poster: "N/A".into(),
            rated: text("PG-13"),
            runtime: text("126 min"),
            genre: text("Action, Adventure"),
            director: text("Tim Burton"),
            writer: text("Bob Kane, Sam Hamm, Warren Skaaren"),
            actors: text("Michael Keaton, Jack Nicholson, Kim Basinger"),
            plot: text("The Dark Knight of Gotham City begins his war on crime with his first major enemy being Jack Napier."),
            language: text("English, French, Spanish"),
            country: text("United States, United Kingdom"),
            awards: text("Won 1 Oscar. 9 wins & 26 nominations total"),
            imdb_rating: text("7.5"),
            box_office: None,
        },
        Movie {
            title: "Batman Begins".into(),
            year: "2005".into(),
            imdb_id: "tt0372784".into(),
            kind: "movie".into(),
            poster: "https://m.media-amazon.com/images/M/batman-begins.jpg".into(),
            rated: text("PG-13"),
            runtime: text("140 min"),
            genre: text("Action, Crime, Drama"),
            director: text("Christopher Nolan"),
            writer: text("Bob Kane, David S. Goyer, Christopher Nolan"),
            actors: text("Christian Bale, Michael Caine, Ken Watanabe"),
            plot: text("After witnessing his parents' death, Bruce learns the art of fighting to confront injustice."),
            language: text("English, Mandarin"),
            country: text("United States, United Kingdom"),
            awards: text("Nominated for 1 Oscar. 14 wins & 79 nominations total"),
            imdb_rating: text("8.2"),
            box_office: text("$206,863,479"),
        },
        Movie {
            title: "Batman: The Animated Series".into(),
            year: "1992–1995".into(),
            imdb_id: "tt0103359".into(),
            kind: "series".into(),
            poster: "https://m.media-amazon.com/images/M/btas.jpg".into(),
            rated: text("TV-PG"),
            runtime: text("23 min"),
            genre: text("Animation, Action, Adventure"),
            director: text("N/A"),
            writer: text("Bob Kane"),
            actors: text("Kevin Conroy, Loren Lester, Efrem Zimbalist Jr."),
            plot: text("The Dark Knight battles crime in Gotham City with occasional help from Robin and Batgirl."),
            language: text("English"),
            country: text("United States"),
            awards: text("Won 4 Primetime Emmys. 8 wins & 19 nominations total"),
            imdb_rating: text("9.0"),
            box_office: text("N/A"),
        },
        Movie {
            title: "The Dark Knight".into(),
            year: "2008".into(),
            imdb_id: "tt0468569".into(),
            kind: "movie".into(),
            poster: "https://m.media-amazon.com/images/M/dark-knight.jpg".into(),
            rated: text("PG-13"),
            runtime: text("152 min"),
            genre: text("Action, Crime, Drama"),
            director: text("Christopher Nolan"),
            writer: text("Jonathan Nolan, Christopher Nolan, David S. Goyer"),
            actors: text("Christian Bale, Heath Ledger, Aaron Eckhart"),
            plot: text("When the menace known as the Joker wreaks havoc on Gotham, Batman must accept one of the greatest tests."),
            language: text("English, Mandarin"),
            country: text("United States, United Kingdom"),
            awards: text("Won 2 Oscars. 164 wins & 164 nominations total"),
            imdb_rating: text("9.0"),
            box_office: text("$534,987,076"),
        },
        Movie {
            title: "Amélie".into(),
            year: "2001".into(),
            imdb_id: "tt0211915".into(),
            kind: "movie".into(),
            poster: "https://m.media-amazon.com/images/M/amelie.jpg".into(),
            rated: text("R"),
            runtime: text("122 min"),
            genre: text("Comedy, Romance"),
            director: text("Jean-Pierre Jeunet"),
            writer: text("Guillaume Laurant, Jean-Pierre Jeunet"),
            actors: text("Audrey Tautou, Mathieu Kassovitz, Rufus"),
            plot: text("Despite being caught in her imaginative world, Amélie decides to help people find happiness."),
            language: text("French, Russian"),
            country: text("France, Germany"),
            awards: text("Nominated for 5 Oscars. 59 wins & 74 nominations total"),
            imdb_rating: text("8.3"),
            box_office: text("$33,225,499"),
        },
    ]
}

pub fn app() -> Router {
    app_with_key(DEFAULT_API_KEY)
}

pub fn app_with_key(api_key: &str) -> Router {
    let db: Db = Arc::new(Catalog {
        api_key: api_key.to_string(),
        movies: catalogue(),
    });
    Router::new()
        .route("/", get(lookup))
        .route("/broken/", get(broken))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn failure(message: &str) -> Json<Value> {
    Json(json!({ "Response": "False", "Error": message }))
}

async fn lookup(State(db): State<Db>, Query(params): Query<OmdbParams>) -> Json<Value> {
    debug!(?params, "lookup");
    match params.apikey.as_deref() {
        None | Some("") => return failure("No API key provided."),
        Some(key) if key != db.api_key => return failure("Invalid API key!"),
        Some(_) => {}
    }
    if let Some(id) = params.i.as_deref() {
        return get_movie(&db, id);
    }
    if let Some(title) = params.s.as_deref() {
        return search(&db, title);
    }
    failure("Something went wrong.")
}

fn search(db: &Catalog, title: &str) -> Json<Value> {
    let needle = title.trim().to_lowercase();
    if needle.chars().count() < 2 {
        return failure("Too many results.");
    }
    let hits: Vec<SearchHit<'_>> = db
        .movies
        .iter()
        .filter(|m| m.title.to_lowercase().contains(&needle))
        .map(SearchHit::from)
        .collect();
    if hits.is_empty() {
        return failure("Movie not found!");
    }
    Json(json!({
        "Response": "True",
        "totalResults": hits.len().to_string(),
        "Search": hits,
    }))
}

fn get_movie(db: &Catalog, id: &str) -> Json<Value> {
    let Some(movie) = db.movies.iter().find(|m| m.imdb_id == id) else {
        return failure("Incorrect IMDb ID.");
    };
    match serde_json::to_value(DetailBody {
        response: "True",
        movie,
    }) {
        Ok(body) => Json(body),
        Err(_) => failure("Something went wrong."),
    }
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream unavailable")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Catalog {
        Catalog {
            api_key: DEFAULT_API_KEY.to_string(),
            movies: catalogue(),
        }
    }

    #[test]
    fn movie_serializes_with_provider_names() {
        let movie = &catalogue()[1];
        let json = serde_json::to_value(movie).unwrap();
        assert_eq!(json["Title"], "Batman Begins");
        assert_eq!(json["imdbID"], "tt0372784");
        assert_eq!(json["BoxOffice"], "$206,863,479");
    }

    #[test]
    fn absent_fields_are_omitted() {
        let json = serde_json::to_value(&catalogue()[0]).unwrap();
        assert!(json.get("BoxOffice").is_none());
        assert_eq!(json["Poster"], "N/A");
    }

    #[test]
    fn search_is_case_insensitive_and_ordered() {
        let Json(body) = search(&db(), "BATMAN");
        assert_eq!(body["Response"], "True");
        let hits = body["Search"].as_array().unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0]["imdbID"], "tt0096895");
        assert_eq!(body["totalResults"], "3");
    }

    #[test]
    fn search_without_match_is_not_found() {
        let Json(body) = search(&db(), "zzzznomatch");
        assert_eq!(body["Error"], "Movie not found!");
    }

    #[test]
    fn detail_carries_response_flag() {
        let Json(body) = get_movie(&db(), "tt0468569");
        assert_eq!(body["Response"], "True");
        assert_eq!(body["Director"], "Christopher Nolan");
    }

    #[test]
    fn params_all_optional() {
        let params: OmdbParams = serde_json::from_str("{}").unwrap();
        assert!(params.s.is_none());
        assert!(params.i.is_none());
        assert!(params.apikey.is_none());
    }
}
