//! High score persistence
//!
//! Persisted to LocalStorage on the web; a missing or unreadable value is a
//! high score of zero.

/// Key/value store holding the best score
pub trait HighScoreStore {
    fn high_score(&self) -> u32;
    fn set_high_score(&mut self, score: u32);
}

/// Compare `score` with the stored best, writing it back if beaten
///
/// Returns the best score after the update.
pub fn record_score(store: &mut impl HighScoreStore, score: u32) -> u32 {
    let best = store.high_score();
    if score > best {
        store.set_high_score(score);
        return score;
    }
    best
}

/// In-process store (native runs and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: Option<u32>,
    /// Number of writes, for checking write-only-when-beaten
    pub writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u32) -> Self {
        Self {
            best: Some(score),
            writes: 0,
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn high_score(&self) -> u32 {
        self.best.unwrap_or(0)
    }

    fn set_high_score(&mut self, score: u32) {
        self.best = Some(score);
        self.writes += 1;
    }
}

/// Browser LocalStorage store
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageStore {
    cached: Option<u32>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "highScore";

    pub fn load() -> Self {
        let cached = Self::storage()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten())
            .and_then(|raw| serde_json::from_str::<u32>(raw.trim()).ok());

        match cached {
            Some(score) => log::info!("Loaded high score {}", score),
            None => log::info!("No high score found, starting fresh"),
        }
        Self { cached }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn high_score(&self) -> u32 {
        self.cached.unwrap_or(0)
    }

    fn set_high_score(&mut self, score: u32) {
        self.cached = Some(score);
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(Self::STORAGE_KEY, &score.to_string()).is_err() {
                    log::warn!("Failed to save high score {}", score);
                }
            }
            None => log::warn!("LocalStorage unavailable, high score not saved"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_reads_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.high_score(), 0);
    }

    #[test]
    fn test_record_only_when_beaten() {
        let mut store = MemoryStore::with_score(12);

        assert_eq!(record_score(&mut store, 5), 12);
        assert_eq!(record_score(&mut store, 12), 12);
        assert_eq!(store.writes, 0);

        assert_eq!(record_score(&mut store, 13), 13);
        assert_eq!(store.high_score(), 13);
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_zero_score_never_written() {
        let mut store = MemoryStore::new();
        assert_eq!(record_score(&mut store, 0), 0);
        assert_eq!(store.writes, 0);
    }
}
