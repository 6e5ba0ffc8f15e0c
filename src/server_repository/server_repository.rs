use async_trait::async_trait;

use crate::server_record::{CreatedServer, NewServer, ServerRecord};
use crate::server_repository::server_repository_error::ServerRepositoryError;

/// Access to the `vpn_servers` inventory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServerRepository: Send + Sync {
    /// Active servers, fastest ping first, unmeasured last.
    async fn list_active(&self) -> Result<Vec<ServerRecord>, ServerRepositoryError>;

    /// Every server including inactive ones, newest first.
    async fn list_all(&self) -> Result<Vec<ServerRecord>, ServerRepositoryError>;

    /// Active, under capacity and located.
    async fn list_selectable(&self) -> Result<Vec<ServerRecord>, ServerRepositoryError>;

    async fn insert(&self, server: NewServer) -> Result<CreatedServer, ServerRepositoryError>;

    /// Soft delete. Returns the number of rows touched, zero for an unknown id.
    async fn deactivate(&self, id: i32) -> Result<u64, ServerRepositoryError>;
}
