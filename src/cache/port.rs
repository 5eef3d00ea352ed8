use anyhow::Result;
use async_trait::async_trait;

/// Opaque byte store addressed by derived cache keys.
///
/// The store is an external collaborator: a hit fully substitutes for
/// re-running extraction, and any failure on either side is absorbed by
/// the callers in this module's parent — never surfaced to the pipeline.
#[async_trait]
pub trait AnalysisCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()>;
}
