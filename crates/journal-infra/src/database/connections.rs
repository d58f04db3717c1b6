use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};
#[cfg(feature = "postgres")]
use tokio::sync::OnceCell;

/// Configuration for the journal database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    /// `search_path` applied to every pooled connection.
    pub schema: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Used both for opening connections and for acquiring one from the pool.
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
}

impl DatabaseConfig {
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
    pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            schema: None,
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
            min_connections: 0,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
            idle_timeout: Self::DEFAULT_IDLE_TIMEOUT,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

/// Process-wide connection pool, opened on first use.
///
/// Concurrent first callers wait on a single connect. A failed connect leaves the handle
/// empty, so the next caller tries again.
///
/// # Example
/// ```ignore
/// let connections = Arc::new(DatabaseConnections::new(config));
/// // Nothing is opened until the first query.
/// let db = connections.main().await?;
/// ```
#[cfg(feature = "postgres")]
pub struct DatabaseConnections {
    config: Option<DatabaseConfig>,
    main: OnceCell<DbConn>,
}

#[cfg(feature = "postgres")]
impl DatabaseConnections {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config: Some(config),
            main: OnceCell::new(),
        }
    }

    /// Wrap an already open connection (a mock database in tests).
    pub fn from_connection(conn: DbConn) -> Self {
        Self {
            config: None,
            main: OnceCell::new_with(Some(conn)),
        }
    }

    /// The pool, connecting it if this is the first use.
    pub async fn main(&self) -> Result<&DbConn, DbErr> {
        self.main
            .get_or_try_init(|| async {
                match &self.config {
                    Some(config) => connect(config).await,
                    None => Err(DbErr::Custom("Database is not configured".to_string())),
                }
            })
            .await
    }

    pub fn is_connected(&self) -> bool {
        self.main.initialized()
    }
}

#[cfg(feature = "postgres")]
async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!("Connecting to database...");

    let mut opts = ConnectOptions::new(&config.url);
    opts.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(config.connect_timeout)
        .acquire_timeout(config.connect_timeout)
        .idle_timeout(config.idle_timeout)
        .sqlx_logging(true);

    if let Some(schema) = &config.schema {
        opts.set_schema_search_path(schema.clone());
    }

    let conn = Database::connect(opts).await?;
    tracing::info!(
        pool = config.max_connections,
        schema = config.schema.as_deref().unwrap_or("default"),
        "Database connected"
    );

    Ok(conn)
}
