//! The analysis cache collaborator.
//!
//! A cached value is the serialized [`RosterAnalysis`] itself, keyed by
//! the source file identity; a hit is a full substitute for re-running
//! extraction. Cache trouble in either direction is logged and absorbed —
//! the pipeline falls back to fresh extraction and never fails on it.

mod dir;
mod memory;
pub mod port;

pub use dir::DirCache;
pub use memory::MemoryCache;
pub use port::AnalysisCache;

use tracing::{debug, warn};

use crate::analysis::{FileIdentity, RosterAnalysis};

/// Derives the cache key for a source file identity.
pub fn cache_key(identity: &FileIdentity) -> String {
    format!("excel-{}-{}", identity.name, identity.last_modified)
}

/// Fetches and deserializes a cached analysis. `None` on miss, on store
/// failure, and on an unreadable blob.
pub async fn lookup<C: AnalysisCache>(cache: &C, identity: &FileIdentity) -> Option<RosterAnalysis> {
    let key = cache_key(identity);

    let bytes = match cache.get(&key).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return None,
        Err(e) => {
            warn!(%key, error = %e, "cache read failed, falling back to extraction");
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(analysis) => {
            debug!(%key, "analysis served from cache");
            Some(analysis)
        }
        Err(e) => {
            warn!(%key, error = %e, "cached analysis unreadable, falling back to extraction");
            None
        }
    }
}

/// Serializes and stores an analysis. Fire-and-forget: failures are
/// logged, never propagated.
pub async fn store<C: AnalysisCache>(cache: &C, analysis: &RosterAnalysis) {
    let key = cache_key(&analysis.file_identity);

    match serde_json::to_vec(analysis) {
        Ok(bytes) => {
            if let Err(e) = cache.put(&key, bytes).await {
                warn!(%key, error = %e, "cache write failed");
            }
        }
        Err(e) => warn!(%key, error = %e, "analysis did not serialize for caching"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_format() {
        let identity = FileIdentity::new("roster.xlsx", 1714646400000);
        assert_eq!(cache_key(&identity), "excel-roster.xlsx-1714646400000");
    }

    #[tokio::test]
    async fn test_lookup_miss_is_none() {
        let cache = MemoryCache::new();
        let identity = FileIdentity::new("roster.xlsx", 1);
        assert!(lookup(&cache, &identity).await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_blob_falls_back() {
        let cache = MemoryCache::new();
        let identity = FileIdentity::new("roster.xlsx", 1);
        cache
            .put(&cache_key(&identity), b"not json".to_vec())
            .await
            .unwrap();

        assert!(lookup(&cache, &identity).await.is_none());
    }
}
