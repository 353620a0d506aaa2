//! Data access layer on top of Sea-ORM
//!
//! One `Repository` handle per process, cloned into handlers via
//! `web::Data`. Resource-specific methods live in the submodules; this
//! module owns connection setup and migrations.

mod analytics;
mod auth;
mod blog;
mod case_studies;
mod certifications;
mod projects;
mod tags;
mod testimonials;

pub use analytics::{AnalyticsTotals, DailyViews, TopProject};
pub use auth::StoredRefreshToken;
pub use blog::{BlogPostWithTags, NewBlogPost, UpdateBlogPost};
pub use case_studies::{CaseStudyWithTags, NewCaseStudy, UpdateCaseStudy};
pub use certifications::NewCertification;
pub use projects::{NewProject, ProjectWithMeta, UpdateProject};
pub use testimonials::{NewTestimonial, UpdateTestimonial};

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::errors::{PortfolioError, Result};

use migration::{Migrator, MigratorTrait};

#[derive(Clone)]
pub struct Repository {
    db: DatabaseConnection,
    backend_name: String,
}

impl Repository {
    pub async fn connect(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(PortfolioError::database_config("DATABASE_URL is not set"));
        }

        let db = if backend_name == "sqlite" {
            Self::connect_sqlite(database_url).await?
        } else {
            Self::connect_generic(database_url, backend_name).await?
        };

        let repository = Repository {
            db,
            backend_name: backend_name.to_string(),
        };

        repository.run_migrations().await?;

        warn!(
            "{} repository initialized.",
            repository.backend_name.to_uppercase()
        );
        Ok(repository)
    }

    /// Connect to SQLite with auto-create and WAL tuning
    async fn connect_sqlite(database_url: &str) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::SqlitePool;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                PortfolioError::database_config(format!("invalid SQLite URL: {}", e))
            })?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePool::connect_with(opt).await.map_err(|e| {
            PortfolioError::database_connection(format!("cannot connect to SQLite: {}", e))
        })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// Connect to a server database (MySQL / PostgreSQL) with a pooled
    /// connection
    async fn connect_generic(database_url: &str, backend_name: &str) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(database_url.to_owned());
        opt.max_connections(100)
            .min_connections(5)
            .connect_timeout(std::time::Duration::from_secs(8))
            .acquire_timeout(std::time::Duration::from_secs(8))
            .idle_timeout(std::time::Duration::from_secs(8))
            .sqlx_logging(false);

        Database::connect(opt).await.map_err(|e| {
            PortfolioError::database_connection(format!(
                "cannot connect to {} database: {}",
                backend_name.to_uppercase(),
                e
            ))
        })
    }

    async fn run_migrations(&self) -> Result<()> {
        Migrator::up(&self.db, None)
            .await
            .map_err(|e| PortfolioError::database_operation(format!("migration failed: {}", e)))?;

        info!("Database migrations completed");
        Ok(())
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }
}
