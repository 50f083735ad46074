//! Repository access to questions and choices.
//!
//! Reads take their filter and ordering as plain values instead of chained
//! query builders, so every backend answers exactly the same questions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::models::{Choice, ChoiceId, Question, QuestionId};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryFilter {
    /// `exp_date > t`
    After(DateTime<Utc>),
    /// `exp_date <= t`
    AtOrBefore(DateTime<Utc>),
}

impl ExpiryFilter {
    pub fn matches(&self, exp_date: DateTime<Utc>) -> bool {
        match *self {
            ExpiryFilter::After(t) => exp_date > t,
            ExpiryFilter::AtOrBefore(t) => exp_date <= t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionOrder {
    /// `pub_date` descending
    NewestPublished,
    /// `exp_date` descending
    RecentlyExpired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionQuery {
    pub published_by: DateTime<Utc>,
    pub expiry: ExpiryFilter,
    pub order: QuestionOrder,
}

impl QuestionQuery {
    /// Published and still open at `now`.
    pub fn current(now: DateTime<Utc>) -> Self {
        Self {
            published_by: now,
            expiry: ExpiryFilter::After(now),
            order: QuestionOrder::NewestPublished,
        }
    }

    /// Published and already expired at `now`.
    pub fn past(now: DateTime<Utc>) -> Self {
        Self {
            published_by: now,
            expiry: ExpiryFilter::AtOrBefore(now),
            order: QuestionOrder::RecentlyExpired,
        }
    }

    pub fn matches(&self, question: &Question) -> bool {
        question.pub_date <= self.published_by && self.expiry.matches(question.exp_date)
    }
}

#[async_trait]
pub trait PollStore: Send + Sync {
    async fn questions(&self, query: &QuestionQuery) -> Result<Vec<Question>, StoreError>;

    async fn question(&self, id: QuestionId) -> Result<Option<Question>, StoreError>;

    /// Choices of a question ordered by id.
    async fn choices(&self, question: QuestionId) -> Result<Vec<Choice>, StoreError>;

    /// Adds one vote to `choice` if it belongs to `question`, as a single
    /// read-modify-write. Returns the updated choice, or `None` when the
    /// choice does not exist under that question.
    async fn record_vote(
        &self,
        question: QuestionId,
        choice: ChoiceId,
    ) -> Result<Option<Choice>, StoreError>;
}
