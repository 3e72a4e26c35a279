use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use jsonwebtoken::jwk::JwkSet;
use tokio::sync::RwLock;

/// Process-wide snapshot of the provider's signing keys.
///
/// Readers clone the current `Arc` and release the lock immediately, so a
/// refresh never blocks an in-flight verification. A refresh replaces the
/// whole set at once; readers observe either the old or the new snapshot.
pub struct JwksCache {
    keys: RwLock<Arc<JwkSet>>,
    last_refresh: Mutex<Instant>,
}

impl JwksCache {
    pub fn new(keys: JwkSet) -> Self {
        Self {
            keys: RwLock::new(Arc::new(keys)),
            last_refresh: Mutex::new(Instant::now()),
        }
    }

    pub async fn snapshot(&self) -> Arc<JwkSet> {
        self.keys.read().await.clone()
    }

    pub async fn replace(&self, keys: JwkSet) {
        let fresh = Arc::new(keys);
        *self.keys.write().await = fresh;
        self.mark_refreshed();
    }

    /// Claim the right to an on-demand refresh.
    ///
    /// Returns false when the last refresh happened less than `min_interval` ago.
    pub fn try_begin_refresh(&self, min_interval: Duration) -> bool {
        let Ok(mut last) = self.last_refresh.lock() else {
            return false;
        };
        if last.elapsed() < min_interval {
            return false;
        }
        *last = Instant::now();
        true
    }

    fn mark_refreshed(&self) {
        if let Ok(mut last) = self.last_refresh.lock() {
            *last = Instant::now();
        }
    }
}
