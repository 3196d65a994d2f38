use crate::models::ListingPayload;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for listing submission backends
/// This keeps the form controller decoupled from the HTTP transport
#[async_trait]
pub trait ListingApi: Send + Sync {
    /// Create a new listing from a validated payload
    async fn create_listing(&self, payload: &ListingPayload) -> Result<()>;

    /// Update an existing listing in the edit flow
    async fn update_listing(&self, id: &str, payload: &ListingPayload) -> Result<()>;
}
