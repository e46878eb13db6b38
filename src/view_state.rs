//! The single piece of state behind the browser UI.
//!
//! A [`ViewState`] is replaced wholesale by each completed fetch cycle.
//! Cycles carry a sequence number handed out by the session; a completion
//! whose sequence number is no longer the newest one begun is discarded,
//! so overlapping fetches cannot interleave their results.

use crate::catalog::{Character, PageInfo};
use crate::fetcher::FetchOutcome;
use serde::Serialize;

/// Fallback episode name when enrichment could not resolve one.
pub const UNKNOWN_EPISODE: &str = "Unknown";

/// A character together with the name of its first episode appearance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedCharacter {
    /// The character as the catalog returned it
    #[serde(flatten)]
    pub character: Character,
    /// Name of the first episode the character appeared in, or
    /// [`UNKNOWN_EPISODE`] when it could not be resolved
    #[serde(rename = "firstEpisodeName")]
    pub first_episode_name: String,
}

/// Everything the presentation layer needs to render one result page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewState {
    /// Enriched characters in response order
    pub characters: Vec<EnrichedCharacter>,
    /// Pagination envelope of the last successful fetch, `None` after an
    /// empty result
    pub info: Option<PageInfo>,
    /// True while a fetch cycle is in flight
    pub loading: bool,
    /// Message of the last failed fetch, cleared when a new cycle begins
    pub error: Option<String>,
    #[serde(skip)]
    current_seq: u64,
}

impl ViewState {
    /// Marks the start of a fetch cycle: raises `loading`, clears the
    /// previous error and remembers `seq` as the newest cycle.
    pub fn begin_cycle(&mut self, seq: u64) {
        self.current_seq = seq;
        self.loading = true;
        self.error = None;
    }

    /// Applies the outcome of the cycle tagged `seq`.
    ///
    /// Outcomes from superseded cycles are discarded and the method
    /// returns false. For the newest cycle, `loading` always drops to
    /// false; what else changes depends on the outcome:
    ///
    /// - success replaces `characters` and `info` wholesale
    /// - an empty result clears both
    /// - a failure records the message and keeps the previous results
    pub fn apply(&mut self, seq: u64, outcome: FetchOutcome) -> bool {
        if seq != self.current_seq {
            return false;
        }
        self.loading = false;
        match outcome {
            FetchOutcome::Success { characters, info } => {
                self.characters = characters;
                self.info = info;
            }
            FetchOutcome::Empty => {
                self.characters.clear();
                self.info = None;
            }
            FetchOutcome::Failed { message } => {
                self.error = Some(message);
            }
        }
        true
    }
}
