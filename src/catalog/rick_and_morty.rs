/// Rick and Morty API catalog implementation.
use super::wire::{CharacterListResponse, EpisodeResponse, WireCharacter};
use super::{CatalogError, Character, CharacterCatalog, CharacterPage, LocationRef, PageInfo};
use std::collections::{BTreeSet, HashMap};

/// Base URL of the public Rick and Morty REST API.
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Character catalog backed by the Rick and Morty REST API.
///
/// Fetches character pages from `{base}/character` and resolves episode
/// names through the batched `{base}/episode/{id1,id2,...}` endpoint.
pub struct RickAndMortyCatalog {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl RickAndMortyCatalog {
    /// Creates a catalog against the public API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a catalog against a different base URL, e.g. a proxy or a
    /// test server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Converts a wire character to the domain structure.
    fn convert_character(wire: WireCharacter) -> Character {
        Character {
            id: wire.id,
            name: wire.name,
            gender: wire.gender,
            species: wire.species,
            image: wire.image,
            location: LocationRef {
                name: wire.location.name,
            },
            episode: wire.episode,
        }
    }

    /// Converts a list response to a domain page, preserving response order.
    fn convert_page(response: CharacterListResponse) -> CharacterPage {
        CharacterPage {
            info: response.info.map(|info| PageInfo {
                count: info.count,
                pages: info.pages,
                next: info.next,
                prev: info.prev,
            }),
            characters: response
                .results
                .into_iter()
                .map(Self::convert_character)
                .collect(),
        }
    }
}

impl Default for RickAndMortyCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterCatalog for RickAndMortyCatalog {
    fn character_url(&self) -> String {
        format!("{}/character", self.base_url)
    }

    fn fetch_page(&self, url: &str) -> Result<Option<CharacterPage>, CatalogError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        // 404 means "no characters match", a valid empty result.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(CatalogError::RequestFailed(response.status().as_u16()));
        }

        let body: CharacterListResponse = response
            .json()
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        Ok(Some(Self::convert_page(body)))
    }

    fn episode_names(
        &self,
        ids: &BTreeSet<String>,
    ) -> Result<HashMap<String, String>, CatalogError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let joined = ids.iter().cloned().collect::<Vec<_>>().join(",");
        let url = format!("{}/episode/{}", self.base_url, joined);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CatalogError::RequestFailed(response.status().as_u16()));
        }

        let body: EpisodeResponse = response
            .json()
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        Ok(body
            .into_vec()
            .into_iter()
            .map(|episode| (episode.id.to_string(), episode.name))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // The catalog uses a blocking client, so the calls run on a
    // spawn_blocking thread inside the tokio test runtime.

    async fn fetch_page(base: String, url: String) -> Result<Option<CharacterPage>, CatalogError> {
        tokio::task::spawn_blocking(move || {
            RickAndMortyCatalog::with_base_url(base).fetch_page(&url)
        })
        .await
        .unwrap()
    }

    async fn episode_names(
        base: String,
        ids: BTreeSet<String>,
    ) -> Result<HashMap<String, String>, CatalogError> {
        tokio::task::spawn_blocking(move || {
            RickAndMortyCatalog::with_base_url(base).episode_names(&ids)
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_not_found_is_an_empty_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/character"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let catalog_url = format!("{}/character", server.uri());
        let page = fetch_page(server.uri(), catalog_url).await.unwrap();
        assert!(page.is_none());
    }

    #[tokio::test]
    async fn test_server_error_is_a_request_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/character"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let catalog_url = format!("{}/character", server.uri());
        let error = fetch_page(server.uri(), catalog_url).await.unwrap_err();
        assert!(error.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_page_is_decoded_with_pagination_envelope() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "info": {"count": 826, "pages": 42, "next": "next-url", "prev": null},
            "results": [{
                "id": 1,
                "name": "Rick Sanchez",
                "gender": "Male",
                "species": "Human",
                "image": "https://example.com/1.jpeg",
                "location": {"name": "Citadel of Ricks"},
                "episode": ["https://example.com/api/episode/1"]
            }]
        });
        Mock::given(method("GET"))
            .and(path("/character"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let catalog_url = format!("{}/character", server.uri());
        let page = fetch_page(server.uri(), catalog_url).await.unwrap().unwrap();

        let info = page.info.unwrap();
        assert_eq!(info.count, 826);
        assert_eq!(info.pages, 42);
        assert_eq!(info.next.as_deref(), Some("next-url"));
        assert_eq!(info.prev, None);

        assert_eq!(page.characters.len(), 1);
        let rick = &page.characters[0];
        assert_eq!(rick.name, "Rick Sanchez");
        assert_eq!(rick.location.name, "Citadel of Ricks");
        assert_eq!(rick.first_episode_id(), Some("1"));
    }

    #[tokio::test]
    async fn test_episode_names_batches_ids_into_one_request() {
        let server = MockServer::start().await;
        let body = serde_json::json!([
            {"id": 1, "name": "Pilot"},
            {"id": 28, "name": "The Ricklantis Mixup"}
        ]);
        Mock::given(method("GET"))
            .and(path("/episode/1,28"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;

        let ids: BTreeSet<String> = ["1", "28"].into_iter().map(String::from).collect();
        let names = episode_names(server.uri(), ids).await.unwrap();
        assert_eq!(names.get("1").map(String::as_str), Some("Pilot"));
        assert_eq!(
            names.get("28").map(String::as_str),
            Some("The Ricklantis Mixup")
        );
    }

    #[tokio::test]
    async fn test_episode_names_accepts_single_object_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/episode/1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": 1, "name": "Pilot"})),
            )
            .mount(&server)
            .await;

        let ids: BTreeSet<String> = [String::from("1")].into();
        let names = episode_names(server.uri(), ids).await.unwrap();
        assert_eq!(names.len(), 1);
        assert_eq!(names.get("1").map(String::as_str), Some("Pilot"));
    }

    #[tokio::test]
    async fn test_episode_names_skips_request_for_empty_id_set() {
        // No mock server at all: a request would fail with a transport
        // error, so an Ok result proves nothing was sent.
        let names = episode_names("http://127.0.0.1:9".to_string(), BTreeSet::new())
            .await
            .unwrap();
        assert!(names.is_empty());
    }
}
