use async_trait::async_trait;

use crate::Result;

/// Port for the remote homework review API.
///
/// Implementations return the decoded JSON body of a successful (HTTP 200)
/// response. Transport failures, non-200 statuses and undecodable bodies are
/// all errors; an implementation must never substitute an empty document.
#[async_trait]
pub trait StatusApi: Send + Sync {
    async fn fetch(&self, from_date: i64) -> Result<serde_json::Value>;
}
