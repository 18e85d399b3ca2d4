use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Pool, Sqlite};
use std::{fs, path::Path};
use tracing::debug;
mod models;
mod repo;
#[derive(Clone)]
pub struct Db {
    pub(crate) pool: Pool<Sqlite>,
}
impl Db {
    pub async fn new(db_url: &str) -> anyhow::Result<Self> {
        let in_memory = db_url.contains(":memory:");
        if db_url.starts_with("sqlite://") && !in_memory {
            let path_str = db_url.trim_start_matches("sqlite://");
            let path = Path::new(path_str);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
        }
        if !in_memory && !Sqlite::database_exists(db_url).await.unwrap_or(false) {
            Sqlite::create_database(db_url).await?;
        }
        // 内存库每个连接都是独立的库，只能开一个连接
        let mut options = SqlitePoolOptions::new().max_connections(4);
        if in_memory {
            options = options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = options.connect(db_url).await?;
        if !in_memory {
            sqlx::query("PRAGMA journal_mode = WAL;")
                .execute(&pool)
                .await?;
            sqlx::query("PRAGMA synchronous = NORMAL;")
                .execute(&pool)
                .await?;
        }
        sqlx::migrate!("../../migrations").run(&pool).await?;
        debug!("session store ready at {}", db_url);
        Ok(Self { pool })
    }
}
