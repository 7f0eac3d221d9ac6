use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};

use crate::application::ports::{
    ClientConnector, ConnectOptions, ConnectionError, OperationError, ServiceClient,
};
use crate::domain::{Document, ServiceEndpoint};

/// Connects to a freshly provisioned Postgres instance, retrying with
/// backoff until the connect timeout elapses.
pub struct PgConnector {
    user: String,
    password: String,
    database: String,
}

impl PgConnector {
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            database: database.into(),
        }
    }
}

impl Default for PgConnector {
    fn default() -> Self {
        Self::new("postgres", "postgres", "postgres")
    }
}

#[async_trait]
impl ClientConnector for PgConnector {
    #[instrument(skip(self, options), fields(endpoint = %endpoint))]
    async fn connect(
        &self,
        endpoint: &ServiceEndpoint,
        options: &ConnectOptions,
    ) -> Result<Arc<dyn ServiceClient>, ConnectionError> {
        let url = format!(
            "postgres://{}:{}@{}/{}",
            self.user, self.password, endpoint, self.database
        );
        let deadline = Instant::now() + options.connect_timeout;
        let mut delay = Duration::from_millis(500);

        loop {
            match PgPoolOptions::new()
                .max_connections(4)
                .acquire_timeout(options.max_wait)
                .connect(&url)
                .await
            {
                Ok(pool) => {
                    info!("connection established");
                    return Ok(Arc::new(PgDocumentStore::new(pool)));
                }
                Err(e) if Instant::now() + delay < deadline => {
                    warn!(
                        error = %e,
                        delay_ms = delay.as_millis() as u64,
                        "connect failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(Duration::from_secs(5));
                }
                Err(e) => {
                    return Err(ConnectionError::TimedOut(e.to_string()));
                }
            }
        }
    }
}

/// Presents Postgres as a schemaless document store: logical databases
/// map to schemas, collections to jsonb tables, both created implicitly
/// on first write.
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn collection_exists(&self, qualified: &str) -> Result<bool, OperationError> {
        let regclass: Option<String> = sqlx::query_scalar("SELECT to_regclass($1)::text")
            .bind(qualified)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| OperationError::ReadFailed(e.to_string()))?;
        Ok(regclass.is_some())
    }
}

/// Names are embedded in DDL, so only plain identifiers are accepted.
fn ident(name: &str) -> Result<&str, OperationError> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(name)
    } else {
        Err(OperationError::InvalidName(name.to_string()))
    }
}

fn qualified(database: &str, collection: &str) -> Result<String, OperationError> {
    Ok(format!("{}.{}", ident(database)?, ident(collection)?))
}

#[async_trait]
impl ServiceClient for PgDocumentStore {
    #[instrument(skip(self, document), fields(database = %database, collection = %collection))]
    async fn insert(
        &self,
        database: &str,
        collection: &str,
        document: &Document,
    ) -> Result<(), OperationError> {
        let schema = ident(database)?;
        let table = qualified(database, collection)?;

        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", schema))
            .execute(&self.pool)
            .await
            .map_err(|e| OperationError::WriteFailed(e.to_string()))?;

        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {} (\
                 id uuid PRIMARY KEY DEFAULT gen_random_uuid(), \
                 doc jsonb NOT NULL, \
                 inserted_at timestamptz NOT NULL DEFAULT now()\
             )",
            table
        ))
        .execute(&self.pool)
        .await
        .map_err(|e| OperationError::WriteFailed(e.to_string()))?;

        sqlx::query(&format!("INSERT INTO {} (doc) VALUES ($1)", table))
            .bind(document.to_value())
            .execute(&self.pool)
            .await
            .map_err(|e| OperationError::WriteFailed(e.to_string()))?;

        debug!("document written");
        Ok(())
    }

    #[instrument(skip(self), fields(database = %database, collection = %collection))]
    async fn count(&self, database: &str, collection: &str) -> Result<u64, OperationError> {
        let table = qualified(database, collection)?;
        if !self.collection_exists(&table).await? {
            return Ok(0);
        }

        let count: i64 = sqlx::query_scalar(&format!("SELECT count(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| OperationError::ReadFailed(e.to_string()))?;

        Ok(count as u64)
    }

    #[instrument(skip(self), fields(database = %database, collection = %collection))]
    async fn find_one(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<Option<Document>, OperationError> {
        let table = qualified(database, collection)?;
        if !self.collection_exists(&table).await? {
            return Ok(None);
        }

        let row: Option<serde_json::Value> = sqlx::query_scalar(&format!(
            "SELECT doc FROM {} ORDER BY inserted_at LIMIT 1",
            table
        ))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| OperationError::ReadFailed(e.to_string()))?;

        match row {
            Some(value) => {
                debug!("document read");
                Document::from_value(value).map(Some).ok_or_else(|| {
                    OperationError::ReadFailed("stored document is not a JSON object".to_string())
                })
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn list_database_names(&self) -> Result<Vec<String>, OperationError> {
        sqlx::query_scalar(
            "SELECT schema_name::text FROM information_schema.schemata \
             WHERE schema_name NOT LIKE 'pg\\_%' AND schema_name <> 'information_schema' \
             ORDER BY schema_name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| OperationError::ReadFailed(e.to_string()))
    }

    async fn close(&self) -> Result<(), ConnectionError> {
        self.pool.close().await;
        Ok(())
    }
}
