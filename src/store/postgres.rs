// store/postgres.rs
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{ExpiryFilter, PollStore, QuestionOrder, QuestionQuery};
use crate::error::StoreError;
use crate::models::{Choice, ChoiceId, Question, QuestionId};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn build_question_query(query: &QuestionQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(
        "SELECT id, question_text, pub_date, exp_date FROM polls_question WHERE pub_date <= ",
    );
    builder.push_bind(query.published_by);

    match query.expiry {
        ExpiryFilter::After(t) => builder.push(" AND exp_date > ").push_bind(t),
        ExpiryFilter::AtOrBefore(t) => builder.push(" AND exp_date <= ").push_bind(t),
    };

    builder.push(match query.order {
        QuestionOrder::NewestPublished => " ORDER BY pub_date DESC, id DESC",
        QuestionOrder::RecentlyExpired => " ORDER BY exp_date DESC, id DESC",
    });

    builder
}

#[async_trait]
impl PollStore for PgStore {
    async fn questions(&self, query: &QuestionQuery) -> Result<Vec<Question>, StoreError> {
        let questions = build_question_query(query)
            .build_query_as::<Question>()
            .fetch_all(&self.pool)
            .await?;

        Ok(questions)
    }

    async fn question(&self, id: QuestionId) -> Result<Option<Question>, StoreError> {
        let question = sqlx::query_as::<_, Question>(
            "SELECT id, question_text, pub_date, exp_date FROM polls_question WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(question)
    }

    async fn choices(&self, question: QuestionId) -> Result<Vec<Choice>, StoreError> {
        let choices = sqlx::query_as::<_, Choice>(
            r#"
            SELECT id, question_id, choice_text, votes
            FROM polls_choice
            WHERE question_id = $1
            ORDER BY id
            "#,
        )
        .bind(question)
        .fetch_all(&self.pool)
        .await?;

        Ok(choices)
    }

    async fn record_vote(
        &self,
        question: QuestionId,
        choice: ChoiceId,
    ) -> Result<Option<Choice>, StoreError> {
        // The increment happens inside the row update so concurrent votes
        // are serialized by the row lock.
        let updated = sqlx::query_as::<_, Choice>(
            r#"
            UPDATE polls_choice
            SET votes = votes + 1
            WHERE id = $1 AND question_id = $2
            RETURNING id, question_id, choice_text, votes
            "#,
        )
        .bind(choice)
        .bind(question)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }
}
