use super::{PersistentVec, Storage};
use crate::{ItemId, ReviewError, StoreError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const REVIEWS_KEY: &str = "toy-reviews";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub product_id: ItemId,
    pub author: String,
    /// 1..=5
    pub rating: u8,
    pub text: String,
    pub date: DateTime<Utc>,
    pub helpful: u32,
}

/// Average rating rounded to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub average: f32,
    pub count: usize,
}

fn seed_reviews() -> Vec<Review> {
    let now = Utc::now();
    let review = |id: &str, product_id, author: &str, rating, text: &str, days, helpful| Review {
        id: id.to_owned(),
        product_id,
        author: author.to_owned(),
        rating,
        text: text.to_owned(),
        date: now - Duration::days(days),
        helpful,
    };
    vec![
        review(
            "1",
            1,
            "Мария К.",
            5,
            "Отличный мишка! Мягкий, качественный, ребёнок в восторге!",
            5,
            12,
        ),
        review(
            "2",
            1,
            "Алексей П.",
            5,
            "Подарили на день рождения дочке, она не выпускает из рук. Очень довольны покупкой!",
            3,
            8,
        ),
        review(
            "3",
            2,
            "Елена С.",
            4,
            "Конструктор хороший, но детали мелковаты для малышей. Подходит от 4 лет.",
            7,
            15,
        ),
        review(
            "4",
            6,
            "Дмитрий В.",
            5,
            "Робот просто космос! Трансформируется легко, качество на высоте. Сын счастлив!",
            2,
            20,
        ),
    ]
}

pub struct ReviewStore {
    inner: PersistentVec<Review>,
}

impl ReviewStore {
    /// Opens the store; without a snapshot it starts from four seed reviews.
    pub fn open(storage: Arc<dyn Storage>) -> Result<Self, StoreError> {
        Ok(Self {
            inner: PersistentVec::open(storage, REVIEWS_KEY, seed_reviews)?,
        })
    }

    pub fn reviews(&self) -> &[Review] {
        self.inner.items()
    }

    /// Validates and prepends a new review with zero helpful votes.
    pub fn add_review(
        &mut self,
        product_id: ItemId,
        author: &str,
        rating: u8,
        text: &str,
    ) -> Result<Review, ReviewError> {
        if !(1..=5).contains(&rating) {
            return Err(ReviewError::InvalidRating(rating));
        }
        let author = author.trim();
        if author.is_empty() {
            return Err(ReviewError::EmptyAuthor);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(ReviewError::EmptyText);
        }

        let date = Utc::now();
        let mut stamp = date.timestamp_millis();
        while self.reviews().iter().any(|r| r.id == format!("review-{stamp}")) {
            stamp += 1;
        }
        let review = Review {
            id: format!("review-{stamp}"),
            product_id,
            author: author.to_owned(),
            rating,
            text: text.to_owned(),
            date,
            helpful: 0,
        };
        self.inner.update(|items| items.insert(0, review.clone()))?;
        Ok(review)
    }

    pub fn product_reviews(&self, product_id: ItemId) -> Vec<&Review> {
        self.reviews()
            .iter()
            .filter(|r| r.product_id == product_id)
            .collect()
    }

    pub fn product_rating(&self, product_id: ItemId) -> RatingSummary {
        let reviews = self.product_reviews(product_id);
        if reviews.is_empty() {
            return RatingSummary {
                average: 0.0,
                count: 0,
            };
        }
        let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
        let average = sum as f32 / reviews.len() as f32;
        RatingSummary {
            average: (average * 10.0).round() / 10.0,
            count: reviews.len(),
        }
    }

    /// Returns whether a review with this id exists.
    pub fn mark_helpful(&mut self, review_id: &str) -> Result<bool, StoreError> {
        self.inner
            .update(|items| match items.iter_mut().find(|r| r.id == review_id) {
                Some(review) => {
                    review.helpful += 1;
                    true
                }
                None => false,
            })
    }
}
