//! Per-session cache of the word-list view.
//!
//! Registering or deleting a word drops the entry so the next list read goes
//! back to the backend.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

use crate::models::WordEntry;

#[derive(Debug)]
struct Entry {
    words: Vec<WordEntry>,
    stored_at: Instant,
}

#[derive(Debug)]
pub struct WordListCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, Entry>>,
}

impl WordListCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Cached list for a session, if still fresh.
    pub fn get(&self, token: &str) -> Option<Vec<WordEntry>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(token)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.words.clone())
    }

    pub fn put(&self, token: &str, words: Vec<WordEntry>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        entries.insert(
            token.to_string(),
            Entry {
                words,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn invalidate(&self, token: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token);
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> WordEntry {
        WordEntry {
            id: id.into(),
            spelling: format!("word-{id}"),
            meaning: None,
            example_sentence: None,
            example_sentence_translation: None,
        }
    }

    #[test]
    fn test_put_get_invalidate() {
        let cache = WordListCache::new(Duration::from_secs(60));
        assert!(cache.get("tok").is_none());

        cache.put("tok", vec![entry("w1")]);
        assert_eq!(cache.get("tok").unwrap()[0].id, "w1");
        assert!(cache.get("other").is_none());

        cache.invalidate("tok");
        assert!(cache.get("tok").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_ttl_never_serves() {
        let cache = WordListCache::new(Duration::ZERO);
        cache.put("tok", vec![entry("w1")]);
        assert!(cache.get("tok").is_none());
    }

    #[test]
    fn test_put_sweeps_expired_entries() {
        let cache = WordListCache::new(Duration::ZERO);
        cache.put("a", vec![]);
        cache.put("b", vec![]);
        assert_eq!(cache.len(), 1);
    }
}
