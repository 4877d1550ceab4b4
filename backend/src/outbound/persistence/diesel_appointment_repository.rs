//! PostgreSQL-backed `AppointmentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AppointmentRepository, AppointmentRepositoryError};
use crate::domain::{
    Appointment, AppointmentFilter, AppointmentId, AppointmentPatch, AppointmentStatus, DayWindow,
    StatusFilter,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_helpers::{contains_pattern, count_to_u64};
use super::models::{AppointmentChangeset, AppointmentRow, NewAppointmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::appointments;

/// Diesel-backed appointment store.
#[derive(Clone)]
pub struct DieselAppointmentRepository {
    pool: DbPool,
}

impl DieselAppointmentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AppointmentRepositoryError {
    map_basic_pool_error(error, AppointmentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AppointmentRepositoryError {
    map_basic_diesel_error(
        error,
        AppointmentRepositoryError::query,
        AppointmentRepositoryError::connection,
    )
}

fn rows_to_appointments(
    rows: Vec<AppointmentRow>,
) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
    rows.into_iter()
        .map(|row| row.into_domain().map_err(AppointmentRepositoryError::query))
        .collect()
}

fn row_to_appointment(
    row: Option<AppointmentRow>,
) -> Result<Option<Appointment>, AppointmentRepositoryError> {
    row.map(|row| row.into_domain().map_err(AppointmentRepositoryError::query))
        .transpose()
}

/// Escape `LIKE` metacharacters so search text matches literally.
#[async_trait]
impl AppointmentRepository for DieselAppointmentRepository {
    async fn insert(&self, appointment: &Appointment) -> Result<(), AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(appointments::table)
            .values(NewAppointmentRow::from(appointment))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &AppointmentId,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = appointments::table
            .find(id.as_uuid())
            .select(AppointmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row_to_appointment(row)
    }

    async fn list(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        let mut query = appointments::table.into_boxed();
        match filter.status {
            StatusFilter::Any => {}
            StatusFilter::Only(status) => {
                query = query.filter(appointments::status.eq(status.as_str()));
            }
            StatusFilter::Unmatched => return Ok(Vec::new()),
        }
        if let Some(start) = filter.start {
            query = query.filter(appointments::appointment_date.ge(start));
        }
        if let Some(end) = filter.end {
            query = query.filter(appointments::appointment_date.le(end));
        }
        if let Some(needle) = &filter.search {
            let pattern = contains_pattern(needle);
            query = query.filter(
                appointments::patient_name
                    .ilike(pattern.clone())
                    .or(appointments::phone.ilike(pattern.clone()))
                    .or(appointments::email.ilike(pattern)),
            );
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = query
            .order((
                appointments::appointment_date.asc(),
                appointments::appointment_time.asc(),
            ))
            .select(AppointmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_appointments(rows)
    }

    async fn list_within(
        &self,
        window: &DayWindow,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = appointments::table
            .filter(appointments::appointment_date.ge(window.start))
            .filter(appointments::appointment_date.lt(window.end))
            .order(appointments::appointment_time.asc())
            .select(AppointmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_appointments(rows)
    }

    async fn count_within(
        &self,
        window: &DayWindow,
        status: Option<AppointmentStatus>,
    ) -> Result<u64, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = appointments::table
            .filter(appointments::appointment_date.ge(window.start))
            .filter(appointments::appointment_date.lt(window.end))
            .into_boxed();
        if let Some(status) = status {
            query = query.filter(appointments::status.eq(status.as_str()));
        }
        let count: i64 = query
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(count_to_u64(count))
    }

    async fn set_status(
        &self,
        id: &AppointmentId,
        status: AppointmentStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(appointments::table.find(id.as_uuid()))
            .set((
                appointments::status.eq(status.as_str()),
                appointments::updated_at.eq(at),
            ))
            .returning(AppointmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row_to_appointment(row)
    }

    async fn update(
        &self,
        id: &AppointmentId,
        patch: &AppointmentPatch,
        at: DateTime<Utc>,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(appointments::table.find(id.as_uuid()))
            .set(AppointmentChangeset::from_patch(patch, at))
            .returning(AppointmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row_to_appointment(row)
    }

    async fn delete(&self, id: &AppointmentId) -> Result<bool, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(appointments::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|removed| removed > 0)
            .map_err(map_diesel_error)
    }
}
