//! All elimination brackets of one event phase, keyed by gender and age category.
//!
//! Stored as a single text document whose keys are `"gender:age_category"` strings.

use crate::logic::bracket::check_shape;
use crate::models::{AthleteId, BracketError, BracketKey, DEBracket};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BracketBook {
    brackets: BTreeMap<BracketKey, DEBracket>,
}

impl BracketBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &BracketKey) -> Option<&DEBracket> {
        self.brackets.get(key)
    }

    pub fn get_mut(&mut self, key: &BracketKey) -> Option<&mut DEBracket> {
        self.brackets.get_mut(key)
    }

    /// Store a group's bracket, returning the one it replaces.
    pub fn insert(&mut self, key: BracketKey, bracket: DEBracket) -> Option<DEBracket> {
        self.brackets.insert(key, bracket)
    }

    /// Drop a group's bracket. Returns the athletes that were in it (and only those), so the
    /// caller can remove their derived DE scores. Other groups are untouched.
    pub fn reset(&mut self, key: &BracketKey) -> BTreeSet<AthleteId> {
        match self.brackets.remove(key) {
            Some(bracket) => {
                log::debug!("Reset bracket {}", key);
                bracket.athlete_ids()
            }
            None => BTreeSet::new(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &BracketKey> {
        self.brackets.keys()
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// The text-slot form: a JSON object from `"gender:age_category"` to bracket.
    pub fn to_config_text(&self) -> Result<String, BracketError> {
        let mut doc = serde_json::Map::new();
        for (key, bracket) in &self.brackets {
            let value = serde_json::to_value(bracket)
                .map_err(|e| BracketError::Malformed(e.to_string()))?;
            doc.insert(key.to_string(), value);
        }
        serde_json::to_string(&doc).map_err(|e| BracketError::Malformed(e.to_string()))
    }

    /// Read the text-slot form. Anything unreadable counts as "no bracket": a bad document gives
    /// an empty book, a bad entry is skipped. Both are logged.
    pub fn from_config_text(text: &str) -> Self {
        let mut book = Self::new();
        if text.trim().is_empty() {
            return book;
        }
        let doc: BTreeMap<String, serde_json::Value> = match serde_json::from_str(text) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("Ignoring unreadable bracket document: {}", e);
                return book;
            }
        };
        for (raw_key, value) in doc {
            let key: BracketKey = match raw_key.parse() {
                Ok(k) => k,
                Err(e) => {
                    log::warn!("Skipping bracket with bad key: {}", e);
                    continue;
                }
            };
            let bracket = serde_json::from_value::<DEBracket>(value)
                .map_err(|e| BracketError::Malformed(e.to_string()))
                .and_then(|b| check_shape(&b).map(|()| b));
            match bracket {
                Ok(b) => {
                    book.brackets.insert(key, b);
                }
                Err(e) => log::warn!("Skipping bracket {}: {}", key, e),
            }
        }
        book
    }
}
