//! Question repository.

use survey_core::entities::{NewQuestion, Question};
use survey_core::errors::CoreError;

use crate::error::DatabaseError;
use crate::service::SurveyService;

const SELECT_COLS: &str = "id, text, title, clause_id";

fn row_to_question(row: &libsql::Row) -> Result<Question, DatabaseError> {
    Ok(Question {
        id: row.get::<i64>(0)?,
        text: row.get::<String>(1)?,
        title: row.get::<String>(2)?,
        clause_id: row.get::<i64>(3)?,
    })
}

impl SurveyService {
    /// Insert a question under an existing clause.
    ///
    /// # Errors
    ///
    /// Returns a not-found `CoreError` if the clause does not exist.
    pub async fn create_question(&self, new: &NewQuestion) -> Result<Question, DatabaseError> {
        self.get_clause(new.clause_id).await?;

        let title = new.display_title().to_string();
        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO questions (text, title, clause_id) VALUES (?1, ?2, ?3) RETURNING id",
                libsql::params![new.text.as_str(), title.as_str(), new.clause_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;

        Ok(Question {
            id: row.get::<i64>(0)?,
            text: new.text.clone(),
            title,
            clause_id: new.clause_id,
        })
    }

    pub async fn list_questions(&self) -> Result<Vec<Question>, DatabaseError> {
        self.list_questions_in_clause(None).await
    }

    /// Questions belonging to `clause_id`, or every question when `None`.
    pub async fn list_questions_in_clause(
        &self,
        clause_id: Option<i64>,
    ) -> Result<Vec<Question>, DatabaseError> {
        let mut rows = match clause_id {
            Some(id) => {
                self.db()
                    .conn()
                    .query(
                        &format!("SELECT {SELECT_COLS} FROM questions WHERE clause_id = ?1 ORDER BY id"),
                        [id],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(&format!("SELECT {SELECT_COLS} FROM questions ORDER BY id"), ())
                    .await?
            }
        };
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_question(&row)?);
        }
        Ok(results)
    }

    /// Fetch a question by id.
    ///
    /// # Errors
    ///
    /// Returns a not-found `CoreError` if no question has this id.
    pub async fn get_question(&self, id: i64) -> Result<Question, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM questions WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => row_to_question(&row),
            None => Err(CoreError::not_found("Question", id).into()),
        }
    }
}
