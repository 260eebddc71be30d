//! Response repository: CRUD plus the filtered scan behind the comparisons.

use survey_core::entities::{NewResponse, Response};
use survey_core::errors::CoreError;
use survey_core::filter::ResponseFilter;

use crate::error::DatabaseError;
use crate::helpers::{format_date, get_opt_string, parse_date, parse_response_type};
use crate::service::SurveyService;

const SELECT_COLS: &str =
    "id, organization_id, clause_id, question_id, response_type, comment, date";

fn row_to_response(row: &libsql::Row) -> Result<Response, DatabaseError> {
    Ok(Response {
        id: row.get::<i64>(0)?,
        organization_id: row.get::<i64>(1)?,
        clause_id: row.get::<i64>(2)?,
        question_id: row.get::<i64>(3)?,
        response_type: parse_response_type(&row.get::<String>(4)?)?,
        comment: get_opt_string(row, 5)?,
        date: parse_date(&row.get::<String>(6)?)?,
    })
}

/// Build the `WHERE` clause and positional parameters for a filter.
///
/// Dates compare as `YYYY-MM-DD` text, which orders the same as the dates.
fn filter_clause(filter: &ResponseFilter) -> (String, Vec<libsql::Value>) {
    let mut conditions = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();

    if !filter.organization_ids.is_empty() {
        let start = params.len() + 1;
        let placeholders: Vec<String> = (start..start + filter.organization_ids.len())
            .map(|i| format!("?{i}"))
            .collect();
        conditions.push(format!("organization_id IN ({})", placeholders.join(", ")));
        params.extend(filter.organization_ids.iter().map(|&id| libsql::Value::from(id)));
    }
    if let Some(clause_id) = filter.clause_id {
        params.push(clause_id.into());
        conditions.push(format!("clause_id = ?{}", params.len()));
    }
    if let Some(start) = filter.start_date {
        params.push(format_date(start).into());
        conditions.push(format!("substr(date, 1, 10) >= ?{}", params.len()));
    }
    if let Some(end) = filter.end_date {
        params.push(format_date(end).into());
        conditions.push(format!("substr(date, 1, 10) <= ?{}", params.len()));
    }

    if conditions.is_empty() {
        (String::new(), params)
    } else {
        (format!("WHERE {}", conditions.join(" AND ")), params)
    }
}

impl SurveyService {
    /// Check that a response points at existing rows and that the question
    /// belongs to the named clause.
    async fn validate_response_refs(&self, new: &NewResponse) -> Result<(), DatabaseError> {
        self.get_organization(new.organization_id).await?;
        let question = self.get_question(new.question_id).await?;
        if question.clause_id != new.clause_id {
            return Err(CoreError::Validation(format!(
                "question {} belongs to clause {}, not {}",
                question.id, question.clause_id, new.clause_id
            ))
            .into());
        }
        Ok(())
    }

    /// Record a response.
    ///
    /// # Errors
    ///
    /// Returns a not-found `CoreError` for an unknown organization or
    /// question, and `CoreError::Validation` when the clause does not match
    /// the question's clause.
    pub async fn create_response(&self, new: &NewResponse) -> Result<Response, DatabaseError> {
        self.validate_response_refs(new).await?;

        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO responses (organization_id, clause_id, question_id, response_type, comment, date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
                libsql::params![
                    new.organization_id,
                    new.clause_id,
                    new.question_id,
                    new.response_type.as_str(),
                    new.comment.as_deref(),
                    format_date(new.date)
                ],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let id = row.get::<i64>(0)?;

        tracing::info!(
            id,
            organization_id = new.organization_id,
            question_id = new.question_id,
            "recorded response"
        );
        Ok(new.clone().into_response(id))
    }

    /// Fetch a response by id.
    ///
    /// # Errors
    ///
    /// Returns a not-found `CoreError` if no response has this id.
    pub async fn get_response(&self, id: i64) -> Result<Response, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM responses WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => row_to_response(&row),
            None => Err(CoreError::not_found("Response", id).into()),
        }
    }

    /// All responses, optionally for one organization, ordered by id.
    pub async fn list_responses(
        &self,
        organization_id: Option<i64>,
    ) -> Result<Vec<Response>, DatabaseError> {
        let filter = ResponseFilter::new().organizations(organization_id);
        self.filter_responses(&filter).await
    }

    /// Replace every field of an existing response.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_response`], plus not-found for an unknown id.
    pub async fn update_response(
        &self,
        id: i64,
        update: &NewResponse,
    ) -> Result<Response, DatabaseError> {
        self.validate_response_refs(update).await?;

        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE responses SET organization_id = ?1, clause_id = ?2, question_id = ?3,
                   response_type = ?4, comment = ?5, date = ?6
                 WHERE id = ?7",
                libsql::params![
                    update.organization_id,
                    update.clause_id,
                    update.question_id,
                    update.response_type.as_str(),
                    update.comment.as_deref(),
                    format_date(update.date),
                    id
                ],
            )
            .await?;
        if changed == 0 {
            return Err(CoreError::not_found("Response", id).into());
        }

        tracing::info!(id, "updated response");
        Ok(update.clone().into_response(id))
    }

    /// Delete a response.
    ///
    /// # Errors
    ///
    /// Returns a not-found `CoreError` if no response has this id.
    pub async fn delete_response(&self, id: i64) -> Result<(), DatabaseError> {
        let deleted = self
            .db()
            .conn()
            .execute("DELETE FROM responses WHERE id = ?1", [id])
            .await?;
        if deleted == 0 {
            return Err(CoreError::not_found("Response", id).into());
        }
        tracing::info!(id, "deleted response");
        Ok(())
    }

    /// Responses satisfying every supplied constraint, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidRange` for an inverted date range before
    /// touching the store.
    pub async fn filter_responses(
        &self,
        filter: &ResponseFilter,
    ) -> Result<Vec<Response>, DatabaseError> {
        filter.validate()?;

        let (where_clause, params) = filter_clause(filter);
        let sql = format!("SELECT {SELECT_COLS} FROM responses {where_clause} ORDER BY id");
        tracing::debug!(%sql, params = params.len(), "filtering responses");

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_response(&row)?);
        }
        Ok(results)
    }
}
