//! CRUD handlers for organizations, clauses, questions and responses.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use survey_core::entities::{
    Clause, NewClause, NewOrganization, NewQuestion, NewResponse, Organization, Question,
};
use survey_core::responses::ResponseRecord;

use crate::error::ApiError;
use crate::query::QueryParams;
use crate::state::SharedState;

type ApiResult<T> = Result<Json<T>, ApiError>;

// --- Organizations ---

pub async fn list_organizations(State(state): State<SharedState>) -> ApiResult<Vec<Organization>> {
    Ok(Json(state.service.list_organizations().await?))
}

pub async fn get_organization(
    State(state): State<SharedState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Organization> {
    let Path(id) = id?;
    Ok(Json(state.service.get_organization(id).await?))
}

pub async fn create_organization(
    State(state): State<SharedState>,
    body: Result<Json<NewOrganization>, JsonRejection>,
) -> ApiResult<Organization> {
    let Json(new) = body?;
    Ok(Json(state.service.create_organization(&new).await?))
}

// --- Clauses ---

pub async fn list_clauses(State(state): State<SharedState>) -> ApiResult<Vec<Clause>> {
    Ok(Json(state.service.list_clauses().await?))
}

pub async fn create_clause(
    State(state): State<SharedState>,
    body: Result<Json<NewClause>, JsonRejection>,
) -> ApiResult<Clause> {
    let Json(new) = body?;
    Ok(Json(state.service.create_clause(&new).await?))
}

// --- Questions ---

pub async fn list_questions(State(state): State<SharedState>) -> ApiResult<Vec<Question>> {
    Ok(Json(state.service.list_questions().await?))
}

pub async fn create_question(
    State(state): State<SharedState>,
    body: Result<Json<NewQuestion>, JsonRejection>,
) -> ApiResult<Question> {
    let Json(new) = body?;
    Ok(Json(state.service.create_question(&new).await?))
}

// --- Responses ---

/// `GET /responses?organization_id=`
pub async fn list_responses(
    State(state): State<SharedState>,
    RawQuery(raw): RawQuery,
) -> ApiResult<Vec<ResponseRecord>> {
    let organization_id = QueryParams::parse(raw.as_deref())?.opt_i64("organization_id")?;
    let responses = state.service.list_responses(organization_id).await?;
    Ok(Json(responses.into_iter().map(ResponseRecord::from).collect()))
}

pub async fn get_response(
    State(state): State<SharedState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<ResponseRecord> {
    let Path(id) = id?;
    Ok(Json(state.service.get_response(id).await?.into()))
}

pub async fn create_response(
    State(state): State<SharedState>,
    body: Result<Json<NewResponse>, JsonRejection>,
) -> ApiResult<ResponseRecord> {
    let Json(new) = body?;
    Ok(Json(state.service.create_response(&new).await?.into()))
}

pub async fn update_response(
    State(state): State<SharedState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<NewResponse>, JsonRejection>,
) -> ApiResult<ResponseRecord> {
    let Path(id) = id?;
    let Json(update) = body?;
    Ok(Json(state.service.update_response(id, &update).await?.into()))
}

pub async fn delete_response(
    State(state): State<SharedState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.service.delete_response(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
