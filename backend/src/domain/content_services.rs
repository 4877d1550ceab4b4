//! Services behind the public website content: doctor profiles, reviews,
//! blog posts, and contact messages.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::ports::{
    BlogCatalogue, BlogRepository, ContactInbox, ContactRepository, DoctorDirectory,
    DoctorRepository, ReviewBoard, ReviewRepository,
};
use super::{
    BlogPost, BlogPostDraft, BlogPostId, BlogPostPatch, ContactDraft, ContactMessage,
    ContactMessageId, Doctor, DoctorDraft, DoctorId, DoctorPatch, Error, Review, ReviewDraft,
    ReviewId,
};

#[derive(Clone)]
pub struct DoctorDirectoryService {
    doctors: Arc<dyn DoctorRepository>,
    clock: Arc<dyn Clock>,
}

impl DoctorDirectoryService {
    pub fn new(doctors: Arc<dyn DoctorRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { doctors, clock }
    }
}

fn doctor_not_found() -> Error {
    Error::not_found("Doctor not found")
}

#[async_trait]
impl DoctorDirectory for DoctorDirectoryService {
    async fn list_active(&self) -> Result<Vec<Doctor>, Error> {
        Ok(self.doctors.list(true).await?)
    }

    async fn get(&self, id: &DoctorId) -> Result<Doctor, Error> {
        self.doctors
            .find_by_id(id)
            .await?
            .ok_or_else(doctor_not_found)
    }

    async fn create(&self, draft: DoctorDraft) -> Result<Doctor, Error> {
        let doctor = Doctor::create(draft, DoctorId::random(), self.clock.utc())?;
        self.doctors.insert(&doctor).await?;
        info!(doctor_id = %doctor.id, "doctor profile added");
        Ok(doctor)
    }

    async fn update(&self, id: &DoctorId, draft: DoctorDraft) -> Result<Doctor, Error> {
        let patch = DoctorPatch::try_from_draft(draft)?;
        let mut doctor = self.get(id).await?;
        patch.apply_to(&mut doctor, self.clock.utc());
        if self.doctors.save(&doctor).await? {
            Ok(doctor)
        } else {
            Err(doctor_not_found())
        }
    }

    async fn delete(&self, id: &DoctorId) -> Result<(), Error> {
        if self.doctors.delete(id).await? {
            info!(doctor_id = %id, "doctor profile removed");
            Ok(())
        } else {
            Err(doctor_not_found())
        }
    }
}

#[derive(Clone)]
pub struct ReviewBoardService {
    reviews: Arc<dyn ReviewRepository>,
    clock: Arc<dyn Clock>,
}

impl ReviewBoardService {
    pub fn new(reviews: Arc<dyn ReviewRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { reviews, clock }
    }
}

#[async_trait]
impl ReviewBoard for ReviewBoardService {
    async fn submit(&self, draft: ReviewDraft) -> Result<Review, Error> {
        let review = Review::submit(draft, ReviewId::random(), self.clock.utc())?;
        self.reviews.insert(&review).await?;
        info!(review_id = %review.id, "review awaiting approval");
        Ok(review)
    }

    async fn list(&self, approved_only: bool) -> Result<Vec<Review>, Error> {
        Ok(self.reviews.list(approved_only).await?)
    }

    async fn approve(&self, id: &ReviewId) -> Result<Review, Error> {
        self.reviews
            .approve(id, self.clock.utc())
            .await?
            .ok_or_else(|| Error::not_found("Review not found."))
    }

    async fn delete(&self, id: &ReviewId) -> Result<(), Error> {
        self.reviews.delete(id).await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct BlogCatalogueService {
    posts: Arc<dyn BlogRepository>,
    clock: Arc<dyn Clock>,
}

impl BlogCatalogueService {
    pub fn new(posts: Arc<dyn BlogRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { posts, clock }
    }
}

#[async_trait]
impl BlogCatalogue for BlogCatalogueService {
    async fn list(&self, published_only: bool) -> Result<Vec<BlogPost>, Error> {
        Ok(self.posts.list(published_only).await?)
    }

    async fn get(&self, id: &BlogPostId) -> Result<BlogPost, Error> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("Blog post not found"))
    }

    async fn create(&self, draft: BlogPostDraft) -> Result<BlogPost, Error> {
        let post = BlogPost::create(draft, BlogPostId::random(), self.clock.utc())?;
        self.posts.insert(&post).await?;
        info!(post_id = %post.id, published = post.is_published, "blog post created");
        Ok(post)
    }

    async fn update(&self, id: &BlogPostId, draft: BlogPostDraft) -> Result<BlogPost, Error> {
        let patch = BlogPostPatch::try_from_draft(draft)?;
        let not_found = || Error::not_found("Post not found");
        let mut post = self.posts.find_by_id(id).await?.ok_or_else(not_found)?;
        patch.apply_to(&mut post, self.clock.utc());
        if self.posts.save(&post).await? {
            Ok(post)
        } else {
            Err(not_found())
        }
    }

    async fn delete(&self, id: &BlogPostId) -> Result<(), Error> {
        self.posts.delete(id).await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct ContactInboxService {
    messages: Arc<dyn ContactRepository>,
    clock: Arc<dyn Clock>,
}

impl ContactInboxService {
    pub fn new(messages: Arc<dyn ContactRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { messages, clock }
    }
}

#[async_trait]
impl ContactInbox for ContactInboxService {
    async fn receive(&self, draft: ContactDraft) -> Result<ContactMessage, Error> {
        let message = ContactMessage::receive(draft, ContactMessageId::random(), self.clock.utc())?;
        self.messages.insert(&message).await?;
        info!(message_id = %message.id, "contact message received");
        Ok(message)
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, Error> {
        Ok(self.messages.list().await?)
    }

    async fn mark_read(&self, id: &ContactMessageId) -> Result<ContactMessage, Error> {
        self.messages
            .mark_read(id, self.clock.utc())
            .await?
            .ok_or_else(|| Error::not_found("Message not found."))
    }

    async fn delete(&self, id: &ContactMessageId) -> Result<(), Error> {
        self.messages.delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockBlogRepository, MockContactRepository, MockDoctorRepository, MockReviewRepository,
    };
    use crate::domain::ErrorCode;
    use crate::test_support::{fixed_clock, fixture_instant};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn public_doctor_listing_hides_inactive_profiles() {
        let mut doctors = MockDoctorRepository::new();
        doctors
            .expect_list()
            .withf(|active_only| *active_only)
            .return_once(|_| Ok(Vec::new()));
        let service = DoctorDirectoryService::new(Arc::new(doctors), fixed_clock());
        assert!(service.list_active().await.expect("listing").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn doctor_update_applies_patch_to_stored_profile() {
        let stored = Doctor::create(
            DoctorDraft {
                name: Some("Dr. John Smith".into()),
                ..DoctorDraft::default()
            },
            DoctorId::random(),
            fixture_instant(),
        )
        .expect("valid doctor");
        let id = stored.id;
        let mut doctors = MockDoctorRepository::new();
        doctors
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(stored)));
        doctors
            .expect_save()
            .withf(|doctor| doctor.specialty.as_deref() == Some("Cardiology"))
            .return_once(|_| Ok(true));
        let service = DoctorDirectoryService::new(Arc::new(doctors), fixed_clock());

        let updated = service
            .update(
                &id,
                DoctorDraft {
                    specialty: Some("Cardiology".into()),
                    ..DoctorDraft::default()
                },
            )
            .await
            .expect("updated");
        assert_eq!(updated.name, "Dr. John Smith");
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_unknown_doctor_is_not_found() {
        let mut doctors = MockDoctorRepository::new();
        doctors.expect_delete().return_once(|_| Ok(false));
        let service = DoctorDirectoryService::new(Arc::new(doctors), fixed_clock());
        let err = service
            .delete(&DoctorId::random())
            .await
            .expect_err("missing");
        assert_eq!(err.message(), "Doctor not found");
    }

    #[rstest]
    #[tokio::test]
    async fn review_submission_validates_rating() {
        let mut reviews = MockReviewRepository::new();
        reviews.expect_insert().never();
        let service = ReviewBoardService::new(Arc::new(reviews), fixed_clock());
        let err = service
            .submit(ReviewDraft {
                patient_name: Some("Sam".into()),
                message: Some("Great".into()),
                rating: Some(9),
            })
            .await
            .expect_err("rating out of range");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn approving_unknown_review_is_not_found() {
        let mut reviews = MockReviewRepository::new();
        reviews.expect_approve().return_once(|_, _| Ok(None));
        let service = ReviewBoardService::new(Arc::new(reviews), fixed_clock());
        let err = service
            .approve(&ReviewId::random())
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn blog_update_of_missing_post_is_not_found() {
        let mut posts = MockBlogRepository::new();
        posts.expect_find_by_id().return_once(|_| Ok(None));
        posts.expect_save().never();
        let service = BlogCatalogueService::new(Arc::new(posts), fixed_clock());
        let err = service
            .update(&BlogPostId::random(), BlogPostDraft::default())
            .await
            .expect_err("missing");
        assert_eq!(err.message(), "Post not found");
    }

    #[rstest]
    #[tokio::test]
    async fn contact_delete_is_idempotent() {
        let mut messages = MockContactRepository::new();
        messages.expect_delete().return_once(|_| Ok(false));
        let service = ContactInboxService::new(Arc::new(messages), fixed_clock());
        service
            .delete(&ContactMessageId::random())
            .await
            .expect("idempotent delete");
    }
}
