//! Service layer hosting all repository methods.
//!
//! `SurveyService` wraps `SurveyDb` (raw database access). Repo methods are
//! implemented as `impl SurveyService` blocks under `repos/`.

use crate::SurveyDb;
use crate::error::DatabaseError;

pub struct SurveyService {
    db: SurveyDb,
}

impl SurveyService {
    /// Create a new service over a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = SurveyDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `SurveyDb`.
    #[must_use]
    pub const fn from_db(db: SurveyDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &SurveyDb {
        &self.db
    }
}
