mod mock_client;
mod pg_document_store;

pub use mock_client::{MockConnector, MockServiceClient};
pub use pg_document_store::{PgConnector, PgDocumentStore};
