//! Best score persistence
//!
//! The simulation fires events carrying a freshly-beaten best; the shell
//! writes it through one of these stores. LocalStorage backs the browser
//! build, an in-memory store backs native runs and tests.

/// Storage backend for the single persisted best score.
pub trait ScoreStore {
    /// Read the saved best, if any.
    fn load(&self) -> Option<u64>;
    /// Persist a new best. Best-effort, a failed write is dropped.
    fn save(&mut self, best: u64);
}

/// Volatile store for native runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: Option<u64>,
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Option<u64> {
        self.best
    }

    fn save(&mut self, best: u64) {
        self.best = Some(best);
    }
}

/// LocalStorage-backed store (WASM only).
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    const STORAGE_KEY: &'static str = "dodgefall_best";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStore {
    fn load(&self) -> Option<u64> {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = serde_json::from_str::<u64>(&json) {
                    log::info!("Loaded best score: {}", best);
                    return Some(best);
                }
            }
        }
        log::info!("No saved best score, starting fresh");
        None
    }

    fn save(&mut self, best: u64) {
        if let Some(storage) = Self::storage() {
            if let Ok(json) = serde_json::to_string(&best) {
                match storage.set_item(Self::STORAGE_KEY, &json) {
                    Ok(()) => log::info!("Best score saved: {}", best),
                    Err(_) => log::debug!("Best score write failed"),
                }
            }
        }
    }
}
