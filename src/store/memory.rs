// store/memory.rs
use std::sync::Mutex;

use async_trait::async_trait;

use super::{PollStore, QuestionOrder, QuestionQuery};
use crate::error::StoreError;
use crate::models::{Choice, ChoiceId, NewChoice, NewQuestion, Question, QuestionId};

#[derive(Debug, Default)]
struct Tables {
    questions: Vec<Question>,
    choices: Vec<Choice>,
    next_question_id: i64,
    next_choice_id: i64,
}

/// In-process store. Every operation takes the table lock once, which gives
/// the same per-vote atomicity the database does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn insert_question(&self, new: NewQuestion) -> Question {
        let mut tables = self.lock();
        tables.next_question_id += 1;
        let question = Question {
            id: QuestionId(tables.next_question_id),
            question_text: new.question_text,
            pub_date: new.pub_date,
            exp_date: new.exp_date,
        };
        tables.questions.push(question.clone());
        question
    }

    /// Returns `None` if the question does not exist.
    pub fn insert_choice(&self, new: NewChoice) -> Option<Choice> {
        let mut tables = self.lock();
        if !tables.questions.iter().any(|q| q.id == new.question_id) {
            return None;
        }
        tables.next_choice_id += 1;
        let choice = Choice {
            id: ChoiceId(tables.next_choice_id),
            question_id: new.question_id,
            choice_text: new.choice_text,
            votes: 0,
        };
        tables.choices.push(choice.clone());
        Some(choice)
    }
}

#[async_trait]
impl PollStore for MemoryStore {
    async fn questions(&self, query: &QuestionQuery) -> Result<Vec<Question>, StoreError> {
        let tables = self.lock();
        let mut questions: Vec<Question> = tables
            .questions
            .iter()
            .filter(|q| query.matches(q))
            .cloned()
            .collect();

        match query.order {
            QuestionOrder::NewestPublished => {
                questions.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.0.cmp(&a.id.0)))
            }
            QuestionOrder::RecentlyExpired => {
                questions.sort_by(|a, b| b.exp_date.cmp(&a.exp_date).then(b.id.0.cmp(&a.id.0)))
            }
        }

        Ok(questions)
    }

    async fn question(&self, id: QuestionId) -> Result<Option<Question>, StoreError> {
        Ok(self.lock().questions.iter().find(|q| q.id == id).cloned())
    }

    async fn choices(&self, question: QuestionId) -> Result<Vec<Choice>, StoreError> {
        let mut choices: Vec<Choice> = self
            .lock()
            .choices
            .iter()
            .filter(|c| c.question_id == question)
            .cloned()
            .collect();
        choices.sort_by_key(|c| c.id.0);
        Ok(choices)
    }

    async fn record_vote(
        &self,
        question: QuestionId,
        choice: ChoiceId,
    ) -> Result<Option<Choice>, StoreError> {
        let mut tables = self.lock();
        let Some(row) = tables
            .choices
            .iter_mut()
            .find(|c| c.id == choice && c.question_id == question)
        else {
            return Ok(None);
        };

        row.votes = row
            .votes
            .checked_add(1)
            .ok_or(StoreError::CounterOverflow(choice))?;
        Ok(Some(row.clone()))
    }
}
