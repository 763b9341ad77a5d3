//! Reviews users leave for each other.

use crate::clients::ReviewClient;
use crate::model::{Review, ReviewCreate, ReviewId, UserId};
use crate::review_actor::ReviewError;
use record_store::total_pages;
use serde::Serialize;
use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewPage {
    pub items: Vec<Review>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

#[derive(Clone)]
pub struct ReviewService {
    reviews: ReviewClient,
    page_size: usize,
}

impl ReviewService {
    pub fn new(reviews: ReviewClient, page_size: usize) -> Self {
        Self { reviews, page_size }
    }

    #[instrument(skip(self, message))]
    pub async fn post(
        &self,
        reviewer: UserId,
        subject: UserId,
        rating: u8,
        message: &str,
    ) -> Result<ReviewId, ReviewError> {
        self.reviews
            .create_review(ReviewCreate {
                reviewer,
                subject,
                rating,
                message: message.trim().to_string(),
            })
            .await
    }

    pub async fn reviews_of(&self, subject: UserId, page: usize) -> Result<ReviewPage, ReviewError> {
        let page = page.max(1);
        let result = self.reviews.reviews_of(subject, page, self.page_size).await?;
        Ok(ReviewPage {
            total_pages: total_pages(result.total, self.page_size),
            total: result.total,
            items: result.items,
            page,
        })
    }

    /// Mean rating, `None` until the first review.
    pub async fn average_rating(&self, subject: UserId) -> Result<Option<f64>, ReviewError> {
        let reviews = self.reviews.all_reviews_of(subject).await?;
        if reviews.is_empty() {
            return Ok(None);
        }
        let sum: u32 = reviews.iter().map(|review| u32::from(review.rating)).sum();
        Ok(Some(f64::from(sum) / reviews.len() as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review_actor;

    fn service() -> ReviewService {
        let (table, client) = review_actor::new(8);
        tokio::spawn(table.run(()));
        ReviewService::new(ReviewClient::new(client), 10)
    }

    #[tokio::test]
    async fn average_of_posted_ratings() {
        let reviews = service();
        let seller = UserId(2);
        assert_eq!(reviews.average_rating(seller).await.unwrap(), None);

        reviews.post(UserId(1), seller, 10, "Great").await.unwrap();
        reviews.post(UserId(3), seller, 7, "Fine").await.unwrap();

        assert_eq!(reviews.average_rating(seller).await.unwrap(), Some(8.5));
        assert_eq!(reviews.reviews_of(seller, 1).await.unwrap().total, 2);
    }

    #[tokio::test]
    async fn out_of_range_and_blank_reviews_are_refused() {
        let reviews = service();
        assert_eq!(
            reviews.post(UserId(1), UserId(2), 11, "Too good").await,
            Err(ReviewError::InvalidRating(11))
        );
        assert_eq!(
            reviews.post(UserId(1), UserId(2), 5, "   ").await,
            Err(ReviewError::EmptyMessage)
        );
    }
}
