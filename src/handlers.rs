// handlers.rs
use axum::{
    extract::{rejection::FormRejection, rejection::PathRejection, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Serialize;

use crate::error::AppError;
use crate::models::{Choice, Question, QuestionId, VoteForm};
use crate::poll::{self, VoteOutcome};
use crate::state::AppState;
use crate::templates;

#[derive(Serialize)]
struct DetailPage<'a> {
    question: &'a Question,
    choices: &'a [Choice],
    error_message: Option<&'a str>,
}

#[derive(Serialize)]
struct ResultsPage<'a> {
    question: &'a Question,
    total: i64,
    labels: Vec<String>,
    data: Vec<i32>,
}

/// Ids that do not parse are treated like ids that do not exist.
fn question_id(path: Result<Path<i64>, PathRejection>) -> Result<QuestionId, AppError> {
    path.map(|Path(id)| QuestionId(id)).map_err(|_| AppError::NotFound)
}

pub fn results_url(id: QuestionId) -> String {
    format!("/polls/{id}/results/")
}

/// Current and past polls
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let lists = poll::index(state.store.as_ref(), state.clock.now()).await?;
    templates::render(&state.templates, templates::INDEX, &lists)
}

/// A single published question with its voting form
pub async fn detail(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Html<String>, AppError> {
    let id = question_id(path)?;
    let detail = poll::detail(state.store.as_ref(), id, state.clock.now()).await?;

    templates::render(
        &state.templates,
        templates::DETAIL,
        &DetailPage {
            question: &detail.question,
            choices: &detail.choices,
            error_message: None,
        },
    )
}

/// Vote shares for a question, with labels and counts for the chart
pub async fn results(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Html<String>, AppError> {
    let id = question_id(path)?;
    let tally = poll::results(state.store.as_ref(), id).await?;

    templates::render(
        &state.templates,
        templates::RESULTS,
        &ResultsPage {
            question: &tally.question,
            total: tally.total,
            labels: tally.labels(),
            data: tally.data(),
        },
    )
}

/// Record a vote and send the client to the results page
pub async fn vote(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    form: Result<Form<VoteForm>, FormRejection>,
) -> Result<Response, AppError> {
    let id = question_id(path)?;
    // A body that isn't a form at all carries no choice either.
    let form = form.map(|Form(form)| form).unwrap_or_default();

    match poll::vote(state.store.as_ref(), id, form.choice_id()).await? {
        VoteOutcome::Recorded(_) => Ok(Redirect::to(&results_url(id)).into_response()),
        VoteOutcome::Rejected { detail, message } => {
            let page = templates::render(
                &state.templates,
                templates::DETAIL,
                &DetailPage {
                    question: &detail.question,
                    choices: &detail.choices,
                    error_message: Some(message),
                },
            )?;
            Ok(page.into_response())
        }
    }
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}
