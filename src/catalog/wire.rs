/// Rick and Morty API response types for deserialization.
///
/// These structures mirror the JSON response format of the API. Decoding is
/// deliberately lenient: a missing or mis-shaped `results` field becomes an
/// empty list, and every character field falls back to its default so one
/// odd record cannot sink a whole page.
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The top-level response of the character list endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct CharacterListResponse {
    /// Pagination envelope, absent on some responses
    #[serde(default)]
    pub info: Option<WireInfo>,
    /// The characters on this page
    #[serde(default, deserialize_with = "lenient_results")]
    pub results: Vec<WireCharacter>,
}

/// Pagination envelope as found in a list response.
#[derive(Debug, Deserialize)]
pub(super) struct WireInfo {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub pages: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

/// A single character record.
#[derive(Debug, Default, Deserialize)]
pub(super) struct WireCharacter {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub location: WireLocation,
    /// Episode-resource URLs in appearance order
    #[serde(default)]
    pub episode: Vec<String>,
}

/// The location reference embedded in a character record.
#[derive(Debug, Default, Deserialize)]
pub(super) struct WireLocation {
    #[serde(default)]
    pub name: String,
}

/// The episode endpoint returns a bare object for a single id and a list
/// for multiple ids.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum EpisodeResponse {
    Many(Vec<WireEpisode>),
    One(WireEpisode),
}

impl EpisodeResponse {
    /// Normalizes the one-or-many response shape to a list.
    pub fn into_vec(self) -> Vec<WireEpisode> {
        match self {
            EpisodeResponse::Many(episodes) => episodes,
            EpisodeResponse::One(episode) => vec![episode],
        }
    }
}

/// A single episode record. Only the fields the browser needs.
#[derive(Debug, Deserialize)]
pub(super) struct WireEpisode {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// Decodes `results` defensively: anything that is not a JSON array becomes
/// an empty list, and array entries that are not character objects are
/// dropped.
fn lenient_results<'de, D>(deserializer: D) -> Result<Vec<WireCharacter>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}
