use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Re-pull an image when the last successful pull is older than this.
const STALE_AFTER_DAYS: u64 = 10;

const MILLIS_PER_DAY: u64 = 1000 * 60 * 60 * 24;

/// Persisted map of image reference to last-successful-pull epoch
/// millis. Not correctness-critical: a missing or corrupt file reads as
/// empty, and write failures only cost a redundant pull later.
#[derive(Debug)]
pub struct PullLedger {
    path: PathBuf,
}

impl PullLedger {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load(&self) -> HashMap<String, u64> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return HashMap::new();
        };

        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("  Ledger de pulls corrompido em {:?}: {err}", self.path);
                HashMap::new()
            }
        }
    }

    /// Records a successful pull, best-effort.
    pub fn record(&self, image: &str) {
        let mut entries = self.load();
        entries.insert(image.to_string(), now_millis());

        match serde_json::to_string_pretty(&entries) {
            Ok(serialized) => {
                if let Err(err) = fs::write(&self.path, serialized) {
                    warn!("  Falha ao gravar ledger em {:?}: {err}", self.path);
                }
            }
            Err(err) => warn!("  Falha ao serializar ledger: {err}"),
        }
    }

    /// Whether the image should be re-checked for updates. Images never
    /// recorded count as stale.
    pub fn is_stale(&self, image: &str) -> bool {
        let last_pull = self.load().get(image).copied().unwrap_or(0);
        now_millis().saturating_sub(last_pull) >= STALE_AFTER_DAYS * MILLIS_PER_DAY
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
