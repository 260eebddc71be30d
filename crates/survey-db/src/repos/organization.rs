//! Organization repository.

use survey_core::entities::{NewOrganization, Organization};
use survey_core::errors::CoreError;
use survey_core::tally::check_organization_name;

use crate::error::DatabaseError;
use crate::helpers::{get_i32, get_opt_string};
use crate::service::SurveyService;

const SELECT_COLS: &str = "id, name, year_of_association, details";

fn row_to_organization(row: &libsql::Row) -> Result<Organization, DatabaseError> {
    Ok(Organization {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        year_of_association: get_i32(row, 2)?,
        details: get_opt_string(row, 3)?,
    })
}

impl SurveyService {
    /// Insert an organization.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Conflict` if the name is already taken, or
    /// `CoreError::Validation` if the name is reserved for chart rows.
    pub async fn create_organization(
        &self,
        new: &NewOrganization,
    ) -> Result<Organization, DatabaseError> {
        check_organization_name(&new.name)?;

        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO organizations (name, year_of_association, details)
                 VALUES (?1, ?2, ?3) RETURNING id",
                libsql::params![
                    new.name.as_str(),
                    i64::from(new.year_of_association),
                    new.details.as_deref()
                ],
            )
            .await
            .map_err(|e| DatabaseError::from_write(e, &format!("organization '{}'", new.name)))?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let id = row.get::<i64>(0)?;

        tracing::debug!(id, name = %new.name, "created organization");
        Ok(Organization {
            id,
            name: new.name.clone(),
            year_of_association: new.year_of_association,
            details: new.details.clone(),
        })
    }

    pub async fn list_organizations(&self) -> Result<Vec<Organization>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM organizations ORDER BY id"),
                (),
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_organization(&row)?);
        }
        Ok(results)
    }

    pub async fn find_organization(&self, id: i64) -> Result<Option<Organization>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM organizations WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_organization(&row)?)),
            None => Ok(None),
        }
    }

    /// Fetch an organization by id.
    ///
    /// # Errors
    ///
    /// Returns a not-found `CoreError` if no organization has this id.
    pub async fn get_organization(&self, id: i64) -> Result<Organization, DatabaseError> {
        self.find_organization(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Organization", id).into())
    }

    pub async fn count_organizations(&self) -> Result<i64, DatabaseError> {
        self.db()
            .query_i64("SELECT COUNT(*) FROM organizations", ())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{new_org, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_organization_roundtrip() {
        let svc = test_service().await;

        let created = svc
            .create_organization(&NewOrganization {
                name: "NADRA".into(),
                year_of_association: 2018,
                details: Some("National database authority".into()),
            })
            .await
            .unwrap();

        let fetched = svc.get_organization(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let svc = test_service().await;
        for name in ["Zeta", "Alpha", "Mid"] {
            svc.create_organization(&new_org(name)).await.unwrap();
        }

        let names: Vec<String> = svc
            .list_organizations()
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.name)
            .collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let svc = test_service().await;
        svc.create_organization(&new_org("SECP")).await.unwrap();

        let err = svc.create_organization(&new_org("SECP")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn reserved_chart_key_is_rejected_as_name() {
        let svc = test_service().await;

        let err = svc.create_organization(&new_org("name")).await.unwrap_err();
        assert!(
            matches!(err, DatabaseError::Core(CoreError::Validation(_))),
            "got {err:?}"
        );
        assert_eq!(svc.count_organizations().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_organization_is_not_found() {
        let svc = test_service().await;
        assert!(svc.find_organization(42).await.unwrap().is_none());

        let err = svc.get_organization(42).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn empty_details_read_back_as_none() {
        let svc = test_service().await;
        let created = svc
            .create_organization(&NewOrganization {
                name: "PTA".into(),
                year_of_association: 2021,
                details: Some(String::new()),
            })
            .await
            .unwrap();

        let fetched = svc.get_organization(created.id).await.unwrap();
        assert!(fetched.details.is_none());
        assert_eq!(svc.count_organizations().await.unwrap(), 1);
    }
}
