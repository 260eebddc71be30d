//! Query-string parsing for the comparison endpoints.
//!
//! Parameters arrive as raw pairs so `organization_ids` can repeat
//! (`?organization_ids=1&organization_ids=2`) or be comma-separated
//! (`?organization_ids=1,2`). Empty values count as absent.

use chrono::NaiveDate;
use survey_core::filter::ResponseFilter;

use crate::error::ApiError;

#[derive(Debug, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Decode a raw query string.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] if the string is not valid
    /// `application/x-www-form-urlencoded`.
    pub fn parse(raw: Option<&str>) -> Result<Self, ApiError> {
        let pairs = match raw {
            Some(raw) => serde_urlencoded::from_str::<Vec<(String, String)>>(raw)
                .map_err(|e| ApiError::BadRequest(format!("invalid query string: {e}")))?,
            None => Vec::new(),
        };
        Ok(Self { pairs })
    }

    fn values<'a, 'k>(&'a self, key: &'k str) -> impl Iterator<Item = &'a str> + use<'a, 'k> {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Last non-empty value for `key`.
    fn last(&self, key: &str) -> Option<&str> {
        self.values(key).last()
    }

    pub fn opt_i64(&self, key: &str) -> Result<Option<i64>, ApiError> {
        self.last(key)
            .map(|v| parse_i64(key, v))
            .transpose()
    }

    /// Like [`Self::opt_i64`], but an absent or empty value is
    /// [`ApiError::Unprocessable`].
    pub fn require_i64(&self, key: &str) -> Result<i64, ApiError> {
        self.opt_i64(key)?.ok_or_else(|| {
            ApiError::Unprocessable(format!("missing required query parameter '{key}'"))
        })
    }

    pub fn opt_date(&self, key: &str) -> Result<Option<NaiveDate>, ApiError> {
        self.last(key)
            .map(|v| {
                NaiveDate::parse_from_str(v, "%Y-%m-%d").map_err(|_| {
                    ApiError::BadRequest(format!("'{key}' must be a date (YYYY-MM-DD), got '{v}'"))
                })
            })
            .transpose()
    }

    /// Every id supplied for `key`, across repeats and comma lists.
    pub fn id_list(&self, key: &str) -> Result<Vec<i64>, ApiError> {
        self.values(key)
            .flat_map(|v| v.split(','))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| parse_i64(key, v))
            .collect()
    }

    /// Clause and date constraints, with `organization_ids` when present.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] for malformed values. The range is not
    /// checked here.
    pub fn filter(&self) -> Result<ResponseFilter, ApiError> {
        Ok(ResponseFilter::new()
            .organizations(self.id_list("organization_ids")?)
            .clause(self.opt_i64("clause_id")?)
            .between(self.opt_date("start_date")?, self.opt_date("end_date")?))
    }
}

fn parse_i64(key: &str, value: &str) -> Result<i64, ApiError> {
    value
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("'{key}' must be an integer, got '{value}'")))
}
