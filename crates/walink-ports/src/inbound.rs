use async_trait::async_trait;

use walink_core::error::DomainError;

use crate::types::{Generation, HistoryEntryView};

#[async_trait]
pub trait LinkGenerator: Send + Sync {
    async fn generate(&self, raw_input: &str) -> Result<Generation, DomainError>;
    async fn clear_history(&self);
    fn history(&self) -> Vec<HistoryEntryView>;
}
