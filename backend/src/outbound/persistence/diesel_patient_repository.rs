//! PostgreSQL-backed `PatientRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::query_builder::{QueryFragment, QueryId};
use diesel::sql_query;
use diesel::sql_types::{Text, Timestamptz};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PatientRepository, PatientRepositoryError};
use crate::domain::{Patient, PatientId, PatientPatch, PatientStatus, VisitTally};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_helpers::{contains_pattern, count_to_u64};
use super::models::{NewPatientRow, PatientChangeset, PatientRow, VisitTallyChangeset};
use super::pool::{DbPool, PoolError};
use super::schema::patients;

/// Diesel-backed patient store.
#[derive(Clone)]
pub struct DieselPatientRepository {
    pool: DbPool,
}

impl DieselPatientRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PatientRepositoryError {
    map_basic_pool_error(error, PatientRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PatientRepositoryError {
    map_basic_diesel_error(
        error,
        PatientRepositoryError::query,
        PatientRepositoryError::connection,
    )
}

fn row_to_patient(row: PatientRow) -> Result<Patient, PatientRepositoryError> {
    row.into_domain().map_err(PatientRepositoryError::query)
}

/// Bumps the oldest patient sharing `$1` as phone in one statement, so
/// concurrent completions for the same phone never lose an increment.
const RECORD_COMPLETION_SQL: &str = r#"
UPDATE patients
SET total_visits = total_visits + 1,
    last_visit = $2,
    status = $3,
    updated_at = $2
WHERE id = (
    SELECT id FROM patients
    WHERE phone = $1
    ORDER BY created_at ASC
    LIMIT 1
)
"#;

fn completion_update<'a>(
    phone: &'a str,
    at: DateTime<Utc>,
) -> impl QueryFragment<Pg> + QueryId + Send + 'a {
    sql_query(RECORD_COMPLETION_SQL)
        .bind::<Text, _>(phone)
        .bind::<Timestamptz, _>(at)
        .bind::<Text, _>(PatientStatus::Regular.as_str())
}

#[async_trait]
impl PatientRepository for DieselPatientRepository {
    async fn insert(&self, patient: &Patient) -> Result<(), PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(patients::table)
            .values(NewPatientRow::from(patient))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &PatientId) -> Result<Option<Patient>, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        patients::table
            .find(id.as_uuid())
            .select(PatientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_patient)
            .transpose()
    }

    async fn find_first_by_phone(
        &self,
        phone: &str,
    ) -> Result<Option<Patient>, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        patients::table
            .filter(patients::phone.eq(phone))
            .order(patients::created_at.asc())
            .select(PatientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_patient)
            .transpose()
    }

    async fn list(&self, search: Option<String>) -> Result<Vec<Patient>, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = patients::table.into_boxed();
        if let Some(needle) = search.as_deref() {
            let pattern = contains_pattern(needle);
            query = query.filter(
                patients::name
                    .ilike(pattern.clone())
                    .or(patients::phone.ilike(pattern.clone()))
                    .or(patients::email.ilike(pattern)),
            );
        }
        query
            .order(patients::created_at.desc())
            .select(PatientRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(row_to_patient)
            .collect()
    }

    async fn update(
        &self,
        id: &PatientId,
        patch: &PatientPatch,
        at: DateTime<Utc>,
    ) -> Result<Option<Patient>, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(patients::table.find(id.as_uuid()))
            .set(PatientChangeset::from_patch(patch, at))
            .returning(PatientRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_patient)
            .transpose()
    }

    async fn save_tally(
        &self,
        id: &PatientId,
        tally: &VisitTally,
        at: DateTime<Utc>,
    ) -> Result<(), PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(patients::table.find(id.as_uuid()))
            .set(VisitTallyChangeset::new(tally, at))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn record_completion(
        &self,
        phone: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        completion_update(phone, at)
            .execute(&mut conn)
            .await
            .map(|updated| updated > 0)
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &PatientId) -> Result<bool, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(patients::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|removed| removed > 0)
            .map_err(map_diesel_error)
    }

    async fn count(&self) -> Result<u64, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = patients::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(count_to_u64(total))
    }
}
