// src/poll.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AppError;
use crate::models::{Choice, ChoiceId, Question, QuestionId};
use crate::store::{PollStore, QuestionQuery};

pub const NO_CHOICE_MESSAGE: &str = "You didn't select a choice.";

/// Published questions split by whether they are still open.
#[derive(Debug, Serialize)]
pub struct QuestionLists {
    pub current: Vec<Question>,
    pub past: Vec<Question>,
}

#[derive(Debug, Serialize)]
pub struct QuestionDetail {
    pub question: Question,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Serialize)]
pub struct TallyRow {
    pub choice_id: ChoiceId,
    pub choice_text: String,
    pub votes: i32,
    pub percentage: String,
}

impl TallyRow {
    /// Chart label, padded the way the results chart expects.
    pub fn label(&self) -> String {
        format!("{}%   {}     ", self.percentage, self.choice_text)
    }
}

#[derive(Debug, Serialize)]
pub struct Tally {
    pub question: Question,
    pub total: i64,
    pub rows: Vec<TallyRow>,
}

impl Tally {
    pub fn labels(&self) -> Vec<String> {
        self.rows.iter().map(TallyRow::label).collect()
    }

    pub fn data(&self) -> Vec<i32> {
        self.rows.iter().map(|row| row.votes).collect()
    }
}

#[derive(Debug)]
pub enum VoteOutcome {
    Recorded(Choice),
    /// The submission named no choice of this question; the detail page is
    /// shown again with `message`.
    Rejected {
        detail: QuestionDetail,
        message: &'static str,
    },
}

pub async fn index(store: &dyn PollStore, now: DateTime<Utc>) -> Result<QuestionLists, AppError> {
    let current = store.questions(&QuestionQuery::current(now)).await?;
    let past = store.questions(&QuestionQuery::past(now)).await?;

    Ok(QuestionLists { current, past })
}

/// Unpublished questions are reported as missing. Expired ones stay viewable.
pub async fn detail(
    store: &dyn PollStore,
    id: QuestionId,
    now: DateTime<Utc>,
) -> Result<QuestionDetail, AppError> {
    let question = store
        .question(id)
        .await?
        .filter(|q| q.is_published(now))
        .ok_or(AppError::NotFound)?;
    let choices = store.choices(question.id).await?;

    Ok(QuestionDetail { question, choices })
}

pub async fn results(store: &dyn PollStore, id: QuestionId) -> Result<Tally, AppError> {
    let question = store.question(id).await?.ok_or(AppError::NotFound)?;
    let choices = store.choices(question.id).await?;

    Ok(tally(question, choices))
}

pub fn tally(question: Question, choices: Vec<Choice>) -> Tally {
    let total: i64 = choices.iter().map(|c| i64::from(c.votes)).sum();

    let rows = choices
        .into_iter()
        .map(|choice| {
            let share = if total == 0 {
                0.0
            } else {
                f64::from(choice.votes) / total as f64 * 100.0
            };
            TallyRow {
                choice_id: choice.id,
                choice_text: choice.choice_text,
                votes: choice.votes,
                percentage: format!("{share:.2}"),
            }
        })
        .collect();

    Tally {
        question,
        total,
        rows,
    }
}

pub async fn vote(
    store: &dyn PollStore,
    id: QuestionId,
    choice: Option<ChoiceId>,
) -> Result<VoteOutcome, AppError> {
    let question = store.question(id).await?.ok_or(AppError::NotFound)?;

    let recorded = match choice {
        Some(choice) => store.record_vote(question.id, choice).await?,
        None => None,
    };

    match recorded {
        Some(choice) => {
            tracing::info!(question = %question.id, choice = %choice.id, votes = choice.votes, "vote recorded");
            Ok(VoteOutcome::Recorded(choice))
        }
        None => {
            tracing::debug!(question = %question.id, ?choice, "vote rejected");
            let choices = store.choices(question.id).await?;
            Ok(VoteOutcome::Rejected {
                detail: QuestionDetail { question, choices },
                message: NO_CHOICE_MESSAGE,
            })
        }
    }
}
