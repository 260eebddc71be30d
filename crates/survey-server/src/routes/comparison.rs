//! Comparison and chart handlers.

use axum::Json;
use axum::extract::{RawQuery, State};
use survey_core::narrative::NarrativeComparison;
use survey_core::responses::CompareRecord;
use survey_core::tally::{ComparisonRow, OrganizationTally};

use crate::error::ApiError;
use crate::query::QueryParams;
use crate::state::SharedState;

/// `GET /compare?organization_ids=&clause_id=&start_date=&end_date=`
pub async fn compare(
    State(state): State<SharedState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<Vec<CompareRecord>>, ApiError> {
    let filter = QueryParams::parse(raw.as_deref())?.filter()?;
    Ok(Json(state.service.compare_responses(&filter).await?))
}

/// `GET /ai/compare?org1_id=&org2_id=&clause_id=&start_date=&end_date=`
pub async fn ai_compare(
    State(state): State<SharedState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<NarrativeComparison>, ApiError> {
    let params = QueryParams::parse(raw.as_deref())?;
    let first = params.require_i64("org1_id")?;
    let second = params.require_i64("org2_id")?;
    let filter = params.filter()?;

    let result = state
        .comparator
        .compare(&state.service, first, second, &filter)
        .await?;
    Ok(Json(result))
}

/// `GET /chart-data/yes-no`
pub async fn yes_no_chart(
    State(state): State<SharedState>,
) -> Result<Json<Vec<OrganizationTally>>, ApiError> {
    Ok(Json(state.service.yes_no_chart().await?))
}

/// `GET /chart-data/yes-no-comparison?org1_id=&org2_id=&clause_id=&start_date=&end_date=`
pub async fn yes_no_comparison(
    State(state): State<SharedState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<Vec<ComparisonRow>>, ApiError> {
    let params = QueryParams::parse(raw.as_deref())?;
    let first = params.require_i64("org1_id")?;
    let second = params.require_i64("org2_id")?;
    let filter = params.filter()?;

    Ok(Json(
        state
            .service
            .yes_no_comparison(first, second, &filter)
            .await?,
    ))
}
