//! PostgreSQL-backed repositories for public website content: doctors,
//! reviews, blog posts and contact messages.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    BlogRepository, BlogRepositoryError, ContactRepository, ContactRepositoryError,
    DoctorRepository, DoctorRepositoryError, ReviewRepository, ReviewRepositoryError,
};
use crate::domain::{
    BlogPost, BlogPostId, ContactMessage, ContactMessageId, Doctor, DoctorId, Review, ReviewId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{BlogPostRow, ContactMessageRow, DoctorRow, ReviewRow};
use super::pool::DbPool;
use super::schema::{blog_posts, contact_messages, doctors, reviews};

macro_rules! error_mappers {
    ($error:ident) => {
        impl $error {
            fn from_pool(error: super::pool::PoolError) -> Self {
                map_basic_pool_error(error, Self::connection)
            }

            fn from_diesel(error: diesel::result::Error) -> Self {
                map_basic_diesel_error(error, Self::query, Self::connection)
            }
        }
    };
}

error_mappers!(DoctorRepositoryError);
error_mappers!(ReviewRepositoryError);
error_mappers!(BlogRepositoryError);
error_mappers!(ContactRepositoryError);

/// Diesel-backed doctor profiles.
#[derive(Clone)]
pub struct DieselDoctorRepository {
    pool: DbPool,
}

impl DieselDoctorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DoctorRepository for DieselDoctorRepository {
    async fn insert(&self, doctor: &Doctor) -> Result<(), DoctorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DoctorRepositoryError::from_pool)?;
        diesel::insert_into(doctors::table)
            .values(DoctorRow::from(doctor))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(DoctorRepositoryError::from_diesel)
    }

    async fn find_by_id(&self, id: &DoctorId) -> Result<Option<Doctor>, DoctorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DoctorRepositoryError::from_pool)?;
        doctors::table
            .find(id.as_uuid())
            .select(DoctorRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Doctor::from))
            .map_err(DoctorRepositoryError::from_diesel)
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Doctor>, DoctorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DoctorRepositoryError::from_pool)?;
        let mut query = doctors::table.into_boxed();
        if active_only {
            query = query.filter(doctors::is_active.eq(true));
        }
        query
            .order(doctors::name.asc())
            .select(DoctorRow::as_select())
            .load(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(Doctor::from).collect())
            .map_err(DoctorRepositoryError::from_diesel)
    }

    async fn save(&self, doctor: &Doctor) -> Result<bool, DoctorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DoctorRepositoryError::from_pool)?;
        diesel::update(doctors::table.find(doctor.id.as_uuid()))
            .set(DoctorRow::from(doctor))
            .execute(&mut conn)
            .await
            .map(|updated| updated > 0)
            .map_err(DoctorRepositoryError::from_diesel)
    }

    async fn delete(&self, id: &DoctorId) -> Result<bool, DoctorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DoctorRepositoryError::from_pool)?;
        diesel::delete(doctors::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|removed| removed > 0)
            .map_err(DoctorRepositoryError::from_diesel)
    }
}

/// Diesel-backed review moderation queue.
#[derive(Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_review(row: ReviewRow) -> Result<Review, ReviewRepositoryError> {
    row.into_domain().map_err(ReviewRepositoryError::query)
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn insert(&self, review: &Review) -> Result<(), ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(ReviewRepositoryError::from_pool)?;
        diesel::insert_into(reviews::table)
            .values(ReviewRow::from(review))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(ReviewRepositoryError::from_diesel)
    }

    async fn list(&self, approved_only: bool) -> Result<Vec<Review>, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(ReviewRepositoryError::from_pool)?;
        let mut query = reviews::table.into_boxed();
        if approved_only {
            query = query.filter(reviews::is_approved.eq(true));
        }
        query
            .order(reviews::created_at.desc())
            .select(ReviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(ReviewRepositoryError::from_diesel)?
            .into_iter()
            .map(row_to_review)
            .collect()
    }

    async fn approve(
        &self,
        id: &ReviewId,
        at: DateTime<Utc>,
    ) -> Result<Option<Review>, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(ReviewRepositoryError::from_pool)?;
        diesel::update(reviews::table.find(id.as_uuid()))
            .set((reviews::is_approved.eq(true), reviews::updated_at.eq(at)))
            .returning(ReviewRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(ReviewRepositoryError::from_diesel)?
            .map(row_to_review)
            .transpose()
    }

    async fn delete(&self, id: &ReviewId) -> Result<bool, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(ReviewRepositoryError::from_pool)?;
        diesel::delete(reviews::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|removed| removed > 0)
            .map_err(ReviewRepositoryError::from_diesel)
    }
}

/// Diesel-backed blog posts.
#[derive(Clone)]
pub struct DieselBlogRepository {
    pool: DbPool,
}

impl DieselBlogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogRepository for DieselBlogRepository {
    async fn insert(&self, post: &BlogPost) -> Result<(), BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(BlogRepositoryError::from_pool)?;
        diesel::insert_into(blog_posts::table)
            .values(BlogPostRow::from(post))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(BlogRepositoryError::from_diesel)
    }

    async fn find_by_id(&self, id: &BlogPostId) -> Result<Option<BlogPost>, BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(BlogRepositoryError::from_pool)?;
        blog_posts::table
            .find(id.as_uuid())
            .select(BlogPostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(BlogPost::from))
            .map_err(BlogRepositoryError::from_diesel)
    }

    async fn list(&self, published_only: bool) -> Result<Vec<BlogPost>, BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(BlogRepositoryError::from_pool)?;
        let mut query = blog_posts::table.into_boxed();
        if published_only {
            query = query.filter(blog_posts::is_published.eq(true));
        }
        query
            .order(blog_posts::created_at.desc())
            .select(BlogPostRow::as_select())
            .load(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(BlogPost::from).collect())
            .map_err(BlogRepositoryError::from_diesel)
    }

    async fn save(&self, post: &BlogPost) -> Result<bool, BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(BlogRepositoryError::from_pool)?;
        diesel::update(blog_posts::table.find(post.id.as_uuid()))
            .set(BlogPostRow::from(post))
            .execute(&mut conn)
            .await
            .map(|updated| updated > 0)
            .map_err(BlogRepositoryError::from_diesel)
    }

    async fn delete(&self, id: &BlogPostId) -> Result<bool, BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(BlogRepositoryError::from_pool)?;
        diesel::delete(blog_posts::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|removed| removed > 0)
            .map_err(BlogRepositoryError::from_diesel)
    }
}

/// Diesel-backed contact inbox.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn insert(&self, message: &ContactMessage) -> Result<(), ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(ContactRepositoryError::from_pool)?;
        diesel::insert_into(contact_messages::table)
            .values(ContactMessageRow::from(message))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(ContactRepositoryError::from_diesel)
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(ContactRepositoryError::from_pool)?;
        contact_messages::table
            .order(contact_messages::created_at.desc())
            .select(ContactMessageRow::as_select())
            .load(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(ContactMessage::from).collect())
            .map_err(ContactRepositoryError::from_diesel)
    }

    async fn mark_read(
        &self,
        id: &ContactMessageId,
        at: DateTime<Utc>,
    ) -> Result<Option<ContactMessage>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(ContactRepositoryError::from_pool)?;
        diesel::update(contact_messages::table.find(id.as_uuid()))
            .set((
                contact_messages::is_read.eq(true),
                contact_messages::updated_at.eq(at),
            ))
            .returning(ContactMessageRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map(|row| row.map(ContactMessage::from))
            .map_err(ContactRepositoryError::from_diesel)
    }

    async fn delete(&self, id: &ContactMessageId) -> Result<bool, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(ContactRepositoryError::from_pool)?;
        diesel::delete(contact_messages::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|removed| removed > 0)
            .map_err(ContactRepositoryError::from_diesel)
    }
}
