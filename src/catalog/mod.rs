/// Data structures and traits for character-catalog access.
///
/// This module provides the domain structures for characters and pagination,
/// as well as the trait the rest of the crate uses to talk to a catalog
/// backend.
mod rick_and_morty;
mod wire;

pub use rick_and_morty::{DEFAULT_BASE_URL, RickAndMortyCatalog};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Errors that can occur while talking to the character catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog answered with a non-success status code
    #[error("Request failed ({0})")]
    RequestFailed(u16),

    /// The request never produced a response (DNS, connect, I/O)
    #[error("Request error: {0}")]
    Transport(String),

    /// Failed to parse the catalog's JSON response
    #[error("Failed to parse API response: {0}")]
    Parse(String),
}

/// A character record as the catalog returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Catalog-assigned character id
    pub id: u64,
    /// The character's name
    pub name: String,
    /// Free-form gender string as the catalog reports it
    pub gender: String,
    /// Free-form species string
    pub species: String,
    /// URL of the character's portrait image
    pub image: String,
    /// The character's last known location
    pub location: LocationRef,
    /// Episode-resource URLs, in appearance order
    pub episode: Vec<String>,
}

impl Character {
    /// The id of the first episode this character appeared in, extracted
    /// from the trailing path segment of the first episode reference.
    ///
    /// Returns `None` when the character has no episode references or the
    /// reference has no usable trailing segment.
    pub fn first_episode_id(&self) -> Option<&str> {
        let reference = self.episode.first()?;
        match reference.rsplit('/').next() {
            Some(id) if !id.is_empty() => Some(id),
            _ => None,
        }
    }
}

/// A named reference to a location resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationRef {
    /// The location's name
    pub name: String,
}

/// The catalog's pagination envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of matching characters
    pub count: u64,
    /// Total number of result pages
    pub pages: u64,
    /// URL of the next page, if any
    pub next: Option<String>,
    /// URL of the previous page, if any
    pub prev: Option<String>,
}

/// One page of character results together with its pagination envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterPage {
    /// Pagination envelope, absent when the catalog omitted it
    pub info: Option<PageInfo>,
    /// The characters on this page, in response order
    pub characters: Vec<Character>,
}

/// Trait for backends that can serve character pages and episode names.
///
/// Implementors of this trait fetch character data from a catalog such as
/// the Rick and Morty REST API. URLs handed to [`fetch_page`] are used
/// verbatim so that pagination links from a previous response work
/// unchanged.
///
/// [`fetch_page`]: CharacterCatalog::fetch_page
pub trait CharacterCatalog {
    /// The unfiltered base URL of the character resource.
    fn character_url(&self) -> String;

    /// Fetches one page of characters from the given URL.
    ///
    /// Returns `Ok(None)` when the catalog reports that no characters
    /// match (HTTP 404); that is an empty result, not an error.
    fn fetch_page(&self, url: &str) -> Result<Option<CharacterPage>, CatalogError>;

    /// Resolves episode ids to episode names in a single batched request.
    ///
    /// The returned map is keyed by the stringified episode id. Ids the
    /// catalog does not know are simply absent from the map.
    fn episode_names(
        &self,
        ids: &BTreeSet<String>,
    ) -> Result<HashMap<String, String>, CatalogError>;
}

#[cfg(test)]
pub(crate) mod fake {
    //! A scripted in-memory catalog for exercising the fetch pipeline
    //! without a network.

    use super::*;
    use std::cell::RefCell;

    pub(crate) enum PageScript {
        Page(CharacterPage),
        NotFound,
        Fail(u16),
    }

    pub(crate) enum EpisodeScript {
        Names(HashMap<String, String>),
        Fail(u16),
    }

    pub(crate) struct FakeCatalog {
        pub page: PageScript,
        pub episodes: EpisodeScript,
        /// URLs handed to `fetch_page`, in call order.
        pub fetched_urls: RefCell<Vec<String>>,
        /// Id sets handed to `episode_names`, in call order.
        pub episode_calls: RefCell<Vec<BTreeSet<String>>>,
    }

    impl FakeCatalog {
        pub fn new(page: PageScript, episodes: EpisodeScript) -> Self {
            Self {
                page,
                episodes,
                fetched_urls: RefCell::new(Vec::new()),
                episode_calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CharacterCatalog for FakeCatalog {
        fn character_url(&self) -> String {
            "fake://catalog/character".to_string()
        }

        fn fetch_page(&self, url: &str) -> Result<Option<CharacterPage>, CatalogError> {
            self.fetched_urls.borrow_mut().push(url.to_string());
            match &self.page {
                PageScript::Page(page) => Ok(Some(page.clone())),
                PageScript::NotFound => Ok(None),
                PageScript::Fail(status) => Err(CatalogError::RequestFailed(*status)),
            }
        }

        fn episode_names(
            &self,
            ids: &BTreeSet<String>,
        ) -> Result<HashMap<String, String>, CatalogError> {
            self.episode_calls.borrow_mut().push(ids.clone());
            match &self.episodes {
                EpisodeScript::Names(names) => Ok(names.clone()),
                EpisodeScript::Fail(status) => Err(CatalogError::RequestFailed(*status)),
            }
        }
    }

    /// A character with the given id whose first episode reference points
    /// at `episode_id`, or no references at all when `episode_id` is None.
    pub(crate) fn character(id: u64, episode_id: Option<u64>) -> Character {
        Character {
            id,
            name: format!("Character {id}"),
            gender: "unknown".to_string(),
            species: "Human".to_string(),
            image: format!("https://example.com/avatar/{id}.jpeg"),
            location: LocationRef {
                name: "Earth (C-137)".to_string(),
            },
            episode: episode_id
                .map(|ep| vec![format!("https://example.com/api/episode/{ep}")])
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_episode_id_uses_trailing_segment() {
        let character = fake::character(1, Some(28));
        assert_eq!(character.first_episode_id(), Some("28"));
    }

    #[test]
    fn test_first_episode_id_without_references() {
        let character = fake::character(1, None);
        assert_eq!(character.first_episode_id(), None);
    }

    #[test]
    fn test_first_episode_id_with_trailing_slash() {
        let mut character = fake::character(1, Some(3));
        character.episode = vec!["https://example.com/api/episode/3/".to_string()];
        assert_eq!(character.first_episode_id(), None);
    }

    #[test]
    fn test_request_failed_message_carries_status() {
        let error = CatalogError::RequestFailed(500);
        assert_eq!(error.to_string(), "Request failed (500)");
    }
}
