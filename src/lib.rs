//! PortalScout - Browse the Rick and Morty character catalog
//!
//! This library provides the core functionality for querying the public
//! Rick and Morty API: filtering characters by name, gender and species,
//! paginating through result pages, and enriching every character with the
//! name of the first episode it appeared in.
//!
//! The entry point is [`BrowserSession`], which owns the active filters
//! and the [`ViewState`] the presentation layer renders:
//!
//! ```no_run
//! use portal_scout::{BrowserSession, FetchEvent, Query, RickAndMortyCatalog};
//!
//! let mut session = BrowserSession::new(RickAndMortyCatalog::new());
//!
//! // Initial unfiltered load, printing progress.
//! session.load_initial(|event| {
//!     if let FetchEvent::PageLoaded { character_count, .. } = event {
//!         println!("loaded {character_count} characters");
//!     }
//! });
//!
//! // A filtered search, silent.
//! session.search(
//!     Query {
//!         name: Some("rick".to_string()),
//!         gender: None,
//!         species: Some("Human".to_string()),
//!     },
//!     |_| {},
//! );
//!
//! for enriched in &session.state().characters {
//!     println!(
//!         "{} - first seen in {}",
//!         enriched.character.name, enriched.first_episode_name
//!     );
//! }
//! ```

mod catalog;
mod fetcher;
mod query;
mod session;
mod view_state;

pub use catalog::{
    CatalogError, Character, CharacterCatalog, CharacterPage, DEFAULT_BASE_URL, LocationRef,
    PageInfo, RickAndMortyCatalog,
};
pub use fetcher::{FetchOutcome, ResultFetcher};
pub use query::{Gender, Query};
pub use session::{BrowserSession, FetchEvent};
pub use view_state::{EnrichedCharacter, UNKNOWN_EPISODE, ViewState};
