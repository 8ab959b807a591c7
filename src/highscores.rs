//! High score persistence
//!
//! A single scalar survives between runs. Stores never fail loudly: a missing
//! or unreadable value reads as zero and failed writes are only logged.

use serde::{Deserialize, Serialize};

/// Key-value access to the stored high score
pub trait HighScoreStore {
    /// Stored value, 0 when nothing usable is stored
    fn get(&self) -> u64;
    /// Persist a new value (best effort)
    fn set(&mut self, score: u64);
}

/// On-disk / LocalStorage record
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u64,
}

impl HighScoreRecord {
    fn parse(json: &str) -> u64 {
        match serde_json::from_str::<HighScoreRecord>(json) {
            Ok(record) => record.high_score,
            Err(e) => {
                log::warn!("Ignoring unreadable high score ({e})");
                0
            }
        }
    }

    fn to_json(score: u64) -> Option<String> {
        serde_json::to_string(&HighScoreRecord { high_score: score }).ok()
    }
}

/// Volatile store (tests, demos)
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStore {
    pub value: u64,
    /// Number of `set` calls
    pub writes: u32,
}

impl MemoryStore {
    pub fn new(value: u64) -> Self {
        Self { value, writes: 0 }
    }
}

impl HighScoreStore for MemoryStore {
    fn get(&self) -> u64 {
        self.value
    }

    fn set(&mut self, score: u64) {
        self.value = score;
        self.writes += 1;
    }
}

/// JSON file store (native only)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore for FileStore {
    fn get(&self) -> u64 {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => {
                let score = HighScoreRecord::parse(&json);
                log::info!("Loaded high score {score} from {}", self.path.display());
                score
            }
            Err(_) => {
                log::info!("No high score found, starting fresh");
                0
            }
        }
    }

    fn set(&mut self, score: u64) {
        let Some(json) = HighScoreRecord::to_json(score) else {
            return;
        };
        match std::fs::write(&self.path, json) {
            Ok(()) => log::info!("High score {score} saved"),
            Err(e) => log::warn!("Could not save high score to {} ({e})", self.path.display()),
        }
    }
}

/// Browser LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "corrupted_buffer_highscore";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn get(&self) -> u64 {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                return HighScoreRecord::parse(&json);
            }
        }
        log::info!("No high score found, starting fresh");
        0
    }

    fn set(&mut self, score: u64) {
        if let (Some(storage), Some(json)) = (Self::storage(), HighScoreRecord::to_json(score)) {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
            log::info!("High score {score} saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new(3);
        assert_eq!(store.get(), 3);
        store.set(640);
        assert_eq!(store.get(), 640);
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_record_parse() {
        assert_eq!(HighScoreRecord::parse(r#"{"high_score":1024}"#), 1024);
        assert_eq!(HighScoreRecord::parse("garbage"), 0);
        assert_eq!(HighScoreRecord::parse(r#"{"high_score":-5}"#), 0);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "corrupted_buffer_highscore_{}.json",
            std::process::id()
        ));
        let mut store = FileStore::new(&path);
        store.set(192);
        assert_eq!(FileStore::new(&path).get(), 192);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_reads_zero() {
        let store = FileStore::new("/nonexistent/dir/highscore.json");
        assert_eq!(store.get(), 0);
    }
}
