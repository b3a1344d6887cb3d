//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: UI/CLI drives the application until the user quits.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the interactive session (fetch, edit credentials, show deadlines).
    async fn run(&self) -> Result<(), DomainError>;
}
