//! Remote Catalog Client
//!
//! Speaks GraphQL to the public SWAPI film endpoint. The query asks for one
//! page of the `allFilms` Relay connection; everything past "give me the
//! page after this cursor" is the accumulator's business, not ours.

use crate::catalog::PageSource;
use crate::error::{CatalogError, Result};
use crate::model::{Film, FilmPage, Species};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Public SWAPI GraphQL endpoint
pub const DEFAULT_ENDPOINT: &str = "https://swapi-graphql.netlify.app/.netlify/functions/index";

/// Page size used by the original catalog query
pub const DEFAULT_PAGE_SIZE: u32 = 10;

const FILMS_QUERY: &str = "\
query Films($first: Int!, $after: String) {
  allFilms(first: $first, after: $after) {
    films {
      title
      director
      releaseDate
      speciesConnection {
        species {
          name
          classification
          homeworld {
            name
          }
        }
      }
    }
    pageInfo {
      endCursor
      hasNextPage
    }
  }
}";

// ============================================================================
// Client Configuration
// ============================================================================

/// Configuration for the catalog client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// GraphQL endpoint URL
    pub endpoint: String,
    /// Fixed number of records requested per page
    pub page_size: u32,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(30),
        }
    }
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Serialize)]
struct Variables<'a> {
    first: u32,
    after: Option<&'a str>,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    all_films: Option<FilmConnection>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilmConnection {
    #[serde(default)]
    films: Vec<WireFilm>,
    page_info: PageInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireFilm {
    title: String,
    director: String,
    release_date: String,
    #[serde(default)]
    species_connection: Option<SpeciesConnection>,
}

#[derive(Deserialize)]
struct SpeciesConnection {
    #[serde(default)]
    species: Vec<WireSpecies>,
}

#[derive(Deserialize)]
struct WireSpecies {
    name: String,
    classification: String,
    homeworld: Option<Homeworld>,
}

#[derive(Deserialize)]
struct Homeworld {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    end_cursor: Option<String>,
    has_next_page: bool,
}

impl From<WireFilm> for Film {
    fn from(wire: WireFilm) -> Self {
        Film {
            title: wire.title,
            director: wire.director,
            release_date: wire.release_date,
            species: wire
                .species_connection
                .map(|c| c.species.into_iter().map(Species::from).collect())
                .unwrap_or_default(),
        }
    }
}

impl From<WireSpecies> for Species {
    fn from(wire: WireSpecies) -> Self {
        Species {
            name: wire.name,
            classification: wire.classification,
            homeworld: wire.homeworld.map(|h| h.name),
        }
    }
}

// ============================================================================
// Catalog Client
// ============================================================================

/// HTTP client for one catalog endpoint
pub struct CatalogClient {
    http: reqwest::blocking::Client,
    config: ClientConfig,
}

impl CatalogClient {
    /// Build a client for the given configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    /// Client against the default public endpoint
    pub fn with_defaults() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request_page(&self, after: Option<&str>) -> Result<FilmPage> {
        debug!(endpoint = %self.config.endpoint, ?after, "fetching page");

        let request = GraphQlRequest {
            query: FILMS_QUERY,
            variables: Variables {
                first: self.config.page_size,
                after,
            },
        };

        let response: GraphQlResponse = self
            .http
            .post(&self.config.endpoint)
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;

        into_page(response)
    }
}

impl PageSource for CatalogClient {
    fn fetch_page(&self, after: Option<&str>) -> Result<FilmPage> {
        self.request_page(after)
    }
}

/// Turn a decoded GraphQL response into a page, surfacing remote errors
fn into_page(response: GraphQlResponse) -> Result<FilmPage> {
    if !response.errors.is_empty() {
        let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(CatalogError::Remote(messages.join("; ")));
    }

    let connection = response
        .data
        .ok_or(CatalogError::MissingData("data"))?
        .all_films
        .ok_or(CatalogError::MissingData("allFilms"))?;

    Ok(FilmPage {
        films: connection.films.into_iter().map(Film::from).collect(),
        end_cursor: connection.page_info.end_cursor,
        has_next_page: connection.page_info.has_next_page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_connection_body() {
        let body = r#"{
            "data": {
                "allFilms": {
                    "films": [
                        {
                            "title": "A New Hope",
                            "director": "George Lucas",
                            "releaseDate": "1977-05-25",
                            "speciesConnection": {
                                "species": [
                                    {
                                        "name": "Human",
                                        "classification": "mammal",
                                        "homeworld": { "name": "Coruscant" }
                                    },
                                    {
                                        "name": "Droid",
                                        "classification": "artificial",
                                        "homeworld": null
                                    }
                                ]
                            }
                        }
                    ],
                    "pageInfo": {
                        "endCursor": "YXJyYXljb25uZWN0aW9uOjA=",
                        "hasNextPage": true
                    }
                }
            }
        }"#;

        let response: GraphQlResponse = serde_json::from_str(body).unwrap();
        let page = into_page(response).unwrap();

        assert_eq!(page.films.len(), 1);
        let film = &page.films[0];
        assert_eq!(film.title, "A New Hope");
        assert_eq!(film.release_date, "1977-05-25");
        assert_eq!(film.species.len(), 2);
        assert_eq!(film.species[0].homeworld.as_deref(), Some("Coruscant"));
        assert_eq!(film.species[1].homeworld, None);
        assert_eq!(page.end_cursor.as_deref(), Some("YXJyYXljb25uZWN0aW9uOjA="));
        assert!(page.has_next_page);
    }

    #[test]
    fn decodes_last_page_without_cursor() {
        let body = r#"{
            "data": {
                "allFilms": {
                    "films": [],
                    "pageInfo": { "endCursor": null, "hasNextPage": false }
                }
            }
        }"#;

        let response: GraphQlResponse = serde_json::from_str(body).unwrap();
        let page = into_page(response).unwrap();
        assert!(page.films.is_empty());
        assert_eq!(page.end_cursor, None);
        assert!(!page.has_next_page);
    }

    #[test]
    fn remote_errors_become_failures() {
        let body = r#"{
            "data": null,
            "errors": [
                { "message": "Must provide query string." },
                { "message": "rate limited" }
            ]
        }"#;

        let response: GraphQlResponse = serde_json::from_str(body).unwrap();
        match into_page(response) {
            Err(CatalogError::Remote(msg)) => {
                assert!(msg.contains("Must provide query string."));
                assert!(msg.contains("rate limited"));
            }
            other => panic!("expected remote error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn missing_data_is_an_error() {
        let response: GraphQlResponse = serde_json::from_str(r#"{ "data": null }"#).unwrap();
        assert!(matches!(
            into_page(response),
            Err(CatalogError::MissingData("data"))
        ));

        let response: GraphQlResponse =
            serde_json::from_str(r#"{ "data": { "allFilms": null } }"#).unwrap();
        assert!(matches!(
            into_page(response),
            Err(CatalogError::MissingData("allFilms"))
        ));
    }

    #[test]
    fn query_requests_the_page_shape() {
        // The query must carry pagination variables and the record fields
        for needle in [
            "$first",
            "$after",
            "allFilms",
            "endCursor",
            "hasNextPage",
            "releaseDate",
            "speciesConnection",
        ] {
            assert!(FILMS_QUERY.contains(needle), "query missing {needle}");
        }
    }
}
