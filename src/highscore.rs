//! Persistent best-score record
//!
//! A single decimal string in the key-value store. Missing or corrupt data
//! reads as zero; the record only moves when strictly beaten.

use crate::storage::KeyValueStore;

/// Result of settling a finished run against the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOutcome {
    /// Best score on file after settling
    pub best: u32,
    /// Whether the finished run set it
    pub new_record: bool,
}

/// Best-score bookkeeping over a key-value store
#[derive(Debug)]
pub struct HighScoreLedger<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> HighScoreLedger<S> {
    /// Storage key
    const STORAGE_KEY: &'static str = "bindrop_high_score";

    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current record. Always read through the store, so a record written by
    /// another session (or another tab) is never shadowed by a stale copy.
    pub fn best(&self) -> u32 {
        match self.store.get(Self::STORAGE_KEY) {
            Some(raw) => match raw.parse() {
                Ok(best) => best,
                Err(_) => {
                    log::warn!("Ignoring unreadable high score {:?}", raw);
                    0
                }
            },
            None => 0,
        }
    }

    /// Settle a finished run: persist only a strict improvement
    pub fn finalize(&mut self, score: u32) -> RecordOutcome {
        let best = self.best();
        if score > best {
            self.store.set(Self::STORAGE_KEY, &score.to_string());
            log::info!("New high score: {} (was {})", score, best);
            RecordOutcome {
                best: score,
                new_record: true,
            }
        } else {
            RecordOutcome {
                best,
                new_record: false,
            }
        }
    }

    /// Borrow the backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
