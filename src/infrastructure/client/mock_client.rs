use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::application::ports::{
    ClientConnector, ConnectOptions, ConnectionError, OperationError, ServiceClient,
};
use crate::domain::{Document, ServiceEndpoint};

/// Hands out in-memory clients, one per connect call, so harness tests
/// can observe which connections were opened and closed.
pub struct MockConnector {
    refuse: bool,
    attempts: AtomicUsize,
    clients: Mutex<Vec<Arc<MockServiceClient>>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self {
            refuse: false,
            attempts: AtomicUsize::new(0),
            clients: Mutex::new(Vec::new()),
        }
    }

    /// A connector whose every connect attempt fails.
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::new()
        }
    }

    pub fn connect_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn clients(&self) -> Vec<Arc<MockServiceClient>> {
        self.clients
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClientConnector for MockConnector {
    async fn connect(
        &self,
        endpoint: &ServiceEndpoint,
        _options: &ConnectOptions,
    ) -> Result<Arc<dyn ServiceClient>, ConnectionError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.refuse {
            return Err(ConnectionError::ConnectFailed(format!(
                "mock connector refused {}",
                endpoint
            )));
        }
        let client = Arc::new(MockServiceClient::new());
        self.clients
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(&client));
        Ok(client)
    }
}

/// In-memory document store backing one mock instance. Separate clients
/// share nothing, mirroring the isolation of real instances.
pub struct MockServiceClient {
    databases: Mutex<HashMap<String, HashMap<String, Vec<Document>>>>,
    closed: AtomicBool,
}

impl MockServiceClient {
    pub fn new() -> Self {
        Self {
            databases: Mutex::new(HashMap::new()),
            closed: AtomicBool::new(false),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Default for MockServiceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceClient for MockServiceClient {
    async fn insert(
        &self,
        database: &str,
        collection: &str,
        document: &Document,
    ) -> Result<(), OperationError> {
        self.databases
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(database.to_string())
            .or_default()
            .entry(collection.to_string())
            .or_default()
            .push(document.clone());
        Ok(())
    }

    async fn count(&self, database: &str, collection: &str) -> Result<u64, OperationError> {
        let databases = self
            .databases
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(databases
            .get(database)
            .and_then(|collections| collections.get(collection))
            .map(|documents| documents.len() as u64)
            .unwrap_or(0))
    }

    async fn find_one(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<Option<Document>, OperationError> {
        let databases = self
            .databases
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(databases
            .get(database)
            .and_then(|collections| collections.get(collection))
            .and_then(|documents| documents.first())
            .cloned())
    }

    async fn list_database_names(&self) -> Result<Vec<String>, OperationError> {
        let databases = self
            .databases
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = databases.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn close(&self) -> Result<(), ConnectionError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
