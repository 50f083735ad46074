// models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct QuestionId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct ChoiceId(pub i64);

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a question sits relative to a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    NotYetVisible,
    Current,
    Past,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: QuestionId,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
    pub exp_date: DateTime<Utc>,
}

impl Question {
    pub fn visibility(&self, now: DateTime<Utc>) -> Visibility {
        if self.pub_date > now {
            Visibility::NotYetVisible
        } else if self.exp_date <= now {
            Visibility::Past
        } else {
            Visibility::Current
        }
    }

    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        self.pub_date <= now
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Choice {
    pub id: ChoiceId,
    pub question_id: QuestionId,
    pub choice_text: String,
    pub votes: i32,
}

/// Fields needed to insert a question; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
    pub exp_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewChoice {
    pub question_id: QuestionId,
    pub choice_text: String,
}

/// Form body posted by the voting page.
#[derive(Debug, Default, Deserialize)]
pub struct VoteForm {
    pub choice: Option<String>,
}

impl VoteForm {
    /// The submitted choice id, if one was sent and it parses.
    pub fn choice_id(&self) -> Option<ChoiceId> {
        self.choice
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map(ChoiceId)
    }
}
