//! The fetch-and-enrich pipeline.
//!
//! [`ResultFetcher`] runs one fetch cycle against a [`CharacterCatalog`]:
//! load a page of characters, resolve their first-episode names in a single
//! batched lookup, and shape the result into a [`FetchOutcome`]. A failing
//! episode lookup never fails the cycle; the page still renders with every
//! episode name falling back to "Unknown".

use crate::catalog::{CatalogError, CharacterCatalog, PageInfo};
use crate::view_state::{EnrichedCharacter, UNKNOWN_EPISODE};
use std::collections::{BTreeSet, HashMap};

/// Fallback message for failures that somehow carry no text of their own.
const GENERIC_ERROR: &str = "Something went wrong";

/// The result of one completed fetch cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The catalog returned a page; characters are enriched and in
    /// response order.
    Success {
        characters: Vec<EnrichedCharacter>,
        info: Option<PageInfo>,
    },
    /// The catalog reported that nothing matches (HTTP 404).
    Empty,
    /// The primary request failed; `message` is ready for display.
    Failed { message: String },
}

/// Runs fetch cycles against a character catalog.
pub struct ResultFetcher<C> {
    catalog: C,
}

impl<C: CharacterCatalog> ResultFetcher<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// The catalog's unfiltered character resource URL.
    pub fn base_url(&self) -> String {
        self.catalog.character_url()
    }

    #[cfg(test)]
    pub(crate) fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Runs one fetch cycle against `url`.
    ///
    /// The URL may be the base resource, a filtered URL, or a pagination
    /// link taken verbatim from a previous page's envelope. Never panics
    /// and never returns a bare error; every failure becomes a
    /// [`FetchOutcome::Failed`] with a displayable message.
    pub fn fetch(&self, url: &str) -> FetchOutcome {
        match self.fetch_inner(url) {
            Ok(Some((characters, info))) => FetchOutcome::Success { characters, info },
            Ok(None) => FetchOutcome::Empty,
            Err(error) => FetchOutcome::Failed {
                message: display_message(&error),
            },
        }
    }

    fn fetch_inner(
        &self,
        url: &str,
    ) -> Result<Option<(Vec<EnrichedCharacter>, Option<PageInfo>)>, CatalogError> {
        let Some(page) = self.catalog.fetch_page(url)? else {
            return Ok(None);
        };

        // One id per distinct first episode; the lookup is batched, so
        // order does not matter and a set suffices.
        let ids: BTreeSet<String> = page
            .characters
            .iter()
            .filter_map(|c| c.first_episode_id())
            .map(str::to_string)
            .collect();

        let names = if ids.is_empty() {
            HashMap::new()
        } else {
            // Enrichment is best-effort: a failed episode lookup must not
            // take the page down with it.
            self.catalog.episode_names(&ids).unwrap_or_default()
        };

        let characters = page
            .characters
            .into_iter()
            .map(|character| {
                let first_episode_name = character
                    .first_episode_id()
                    .and_then(|id| names.get(id))
                    .filter(|name| !name.is_empty())
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_EPISODE.to_string());
                EnrichedCharacter {
                    character,
                    first_episode_name,
                }
            })
            .collect();

        Ok(Some((characters, page.info)))
    }
}

fn display_message(error: &CatalogError) -> String {
    let message = error.to_string();
    if message.is_empty() {
        GENERIC_ERROR.to_string()
    } else {
        message
    }
}
