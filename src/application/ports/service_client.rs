use async_trait::async_trait;

use crate::domain::Document;

use super::{ConnectionError, OperationError};

/// Client connection bound to one service instance. Logical databases
/// and collections are created implicitly on first write; reads against
/// absent ones are empty, not errors.
#[async_trait]
pub trait ServiceClient: Send + Sync {
    async fn insert(
        &self,
        database: &str,
        collection: &str,
        document: &Document,
    ) -> Result<(), OperationError>;

    async fn count(&self, database: &str, collection: &str) -> Result<u64, OperationError>;

    async fn find_one(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<Option<Document>, OperationError>;

    async fn list_database_names(&self) -> Result<Vec<String>, OperationError>;

    async fn close(&self) -> Result<(), ConnectionError>;
}
