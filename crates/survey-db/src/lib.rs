//! # survey-db
//!
//! libSQL record store for the survey backend.
//!
//! Holds organizations, clauses, questions and responses, and answers the
//! filtered scans the comparison endpoints need. Repository methods live on
//! [`service::SurveyService`]; [`SurveyDb`] is the raw connection handle.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod seed;
pub mod service;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Raw database handle: a libSQL database and one shared connection.
pub struct SurveyDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl SurveyDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let survey_db = Self { db, conn };
        survey_db.run_migrations().await?;
        tracing::debug!(path, "opened survey database");
        Ok(survey_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Run a query that yields a single integer in column 0.
    pub(crate) async fn query_i64(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<i64, DatabaseError> {
        let mut rows = self.conn.query(sql, params).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> SurveyDb {
        SurveyDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        for table in ["organizations", "clauses", "questions", "responses"] {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        // Run migrations again; should not fail
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn foreign_keys_enforced() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO questions (text, title, clause_id) VALUES ('q', 'q', 999)",
                (),
            )
            .await;
        assert!(result.is_err(), "dangling clause_id should be rejected");
    }

    #[tokio::test]
    async fn organization_names_are_unique() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO organizations (name, year_of_association) VALUES ('SECP', 2019)",
                (),
            )
            .await
            .unwrap();
        let result = db
            .conn()
            .execute(
                "INSERT INTO organizations (name, year_of_association) VALUES ('SECP', 2020)",
                (),
            )
            .await;
        assert!(result.is_err(), "duplicate organization name should be rejected");
    }

    #[tokio::test]
    async fn file_database_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.db");
        let path = path.to_str().unwrap();

        {
            let db = SurveyDb::open_local(path).await.unwrap();
            db.conn()
                .execute(
                    "INSERT INTO clauses (name, title) VALUES ('risk_assessment', 'Risk')",
                    (),
                )
                .await
                .unwrap();
        }

        let reopened = SurveyDb::open_local(path).await.unwrap();
        let n = reopened
            .query_i64("SELECT COUNT(*) FROM clauses", ())
            .await
            .unwrap();
        assert_eq!(n, 1);
    }

    #[tokio::test]
    async fn query_i64_reads_first_column() {
        let db = test_db().await;
        let n = db
            .query_i64("SELECT COUNT(*) FROM organizations", ())
            .await
            .unwrap();
        assert_eq!(n, 0);
    }
}
