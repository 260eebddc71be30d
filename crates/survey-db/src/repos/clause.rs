//! Clause repository.

use survey_core::entities::{Clause, NewClause};
use survey_core::errors::CoreError;

use crate::error::DatabaseError;
use crate::service::SurveyService;

fn row_to_clause(row: &libsql::Row) -> Result<Clause, DatabaseError> {
    Ok(Clause {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        title: row.get::<String>(2)?,
    })
}

impl SurveyService {
    /// Insert a clause. A missing title defaults to the name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Conflict` if the name is already taken.
    pub async fn create_clause(&self, new: &NewClause) -> Result<Clause, DatabaseError> {
        let title = new.display_title().to_string();
        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO clauses (name, title) VALUES (?1, ?2) RETURNING id",
                libsql::params![new.name.as_str(), title.as_str()],
            )
            .await
            .map_err(|e| DatabaseError::from_write(e, &format!("clause '{}'", new.name)))?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;

        Ok(Clause {
            id: row.get::<i64>(0)?,
            name: new.name.clone(),
            title,
        })
    }

    pub async fn list_clauses(&self) -> Result<Vec<Clause>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT id, name, title FROM clauses ORDER BY id", ())
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_clause(&row)?);
        }
        Ok(results)
    }

    /// Fetch a clause by id.
    ///
    /// # Errors
    ///
    /// Returns a not-found `CoreError` if no clause has this id.
    pub async fn get_clause(&self, id: i64) -> Result<Clause, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT id, name, title FROM clauses WHERE id = ?1", [id])
            .await?;
        match rows.next().await? {
            Some(row) => row_to_clause(&row),
            None => Err(CoreError::not_found("Clause", id).into()),
        }
    }
}
