//! Search filters for the character catalog.
//!
//! A [`Query`] holds the three optional filters the catalog supports and
//! knows how to turn itself into a request URL. Empty filters are omitted
//! from the URL entirely, never sent as empty parameters.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The gender values the character catalog recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Genderless,
    Unknown,
}

impl Gender {
    /// The wire form of the gender, as the API expects it in a query
    /// parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Genderless => "genderless",
            Gender::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "female" => Ok(Gender::Female),
            "male" => Ok(Gender::Male),
            "genderless" => Ok(Gender::Genderless),
            "unknown" => Ok(Gender::Unknown),
            other => Err(format!(
                "unknown gender '{other}' (expected female, male, genderless or unknown)"
            )),
        }
    }
}

/// Filters applied to a character search.
///
/// A `Default` query has no filters and resolves to the unfiltered base
/// resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Substring match on the character name. Trimmed before use.
    pub name: Option<String>,
    /// Exact gender filter.
    pub gender: Option<Gender>,
    /// Exact species filter.
    pub species: Option<String>,
}

impl Query {
    /// Returns true when no filter would end up in the URL.
    pub fn is_empty(&self) -> bool {
        self.params().is_empty()
    }

    /// The query parameters this filter set contributes, in a fixed order.
    ///
    /// A name consisting only of whitespace and an empty species string
    /// count as unset.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(name) = &self.name {
            let trimmed = name.trim();
            if !trimmed.is_empty() {
                params.push(("name", trimmed.to_string()));
            }
        }
        if let Some(gender) = self.gender {
            params.push(("gender", gender.as_str().to_string()));
        }
        if let Some(species) = &self.species {
            if !species.is_empty() {
                params.push(("species", species.clone()));
            }
        }
        params
    }

    /// Builds the filtered request URL on top of the given base resource.
    ///
    /// When the base URL does not parse, it is returned unchanged; the
    /// request itself will then fail with a transport error that names
    /// the bad URL.
    pub fn filter_url(&self, base_url: &str) -> String {
        let params = self.params();
        if params.is_empty() {
            return base_url.to_string();
        }
        match Url::parse(base_url) {
            Ok(mut url) => {
                url.query_pairs_mut().extend_pairs(params);
                url.into()
            }
            Err(_) => base_url.to_string(),
        }
    }
}
