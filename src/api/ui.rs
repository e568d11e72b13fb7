use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Serialize;

use super::{PAGE_HEADING, PAGE_ICON, PAGE_TITLE};
use crate::error::AppError;
use crate::index::LOADING_MESSAGE;
use crate::models::{Answer, QueryForm};
use crate::state::{AppState, IndexStatus};

#[derive(Debug, Default, Serialize)]
struct Page {
    page_title: &'static str,
    page_icon: &'static str,
    heading: &'static str,
    /// Echoed back only after a submit
    query: Option<String>,
    answer: Option<String>,
    error: Option<String>,
    /// Set while the index builds; the page then refreshes itself
    loading: Option<&'static str>,
}

impl Page {
    fn blank() -> Self {
        Self {
            page_title: PAGE_TITLE,
            page_icon: PAGE_ICON,
            heading: PAGE_HEADING,
            ..Self::default()
        }
    }
}

/// GET / - Render the empty form once the index is ready. Until then, start
/// the build and render the loading page.
pub async fn index_page(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut page = Page::blank();
    match state.poll_index().await {
        IndexStatus::Ready(_) => {}
        IndexStatus::Building => page.loading = Some(LOADING_MESSAGE),
        IndexStatus::Failed(e) => page.error = Some(report(AppError::from(e))),
    }
    render(&state, page)
}

/// POST / - Echo the query, run it, and render the answer.
pub async fn submit_query(
    State(state): State<AppState>,
    Form(form): Form<QueryForm>,
) -> Result<Response, AppError> {
    let mut page = Page::blank();

    match answer(&state, &form.query).await {
        Ok(answer) => page.answer = Some(answer.text),
        Err(e) => page.error = Some(report(e)),
    }
    page.query = Some(form.query);

    render(&state, page)
}

async fn answer(state: &AppState, query: &str) -> Result<Answer, AppError> {
    let engine = state.query_engine().await?;
    Ok(engine.query(query).await?)
}

fn report(err: AppError) -> String {
    tracing::error!("{err}");
    err.to_string()
}

fn render(state: &AppState, page: Page) -> Result<Response, AppError> {
    let status = if page.error.is_some() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };

    let tmpl = state.templates.get_template("index.html")?;
    let html = tmpl.render(minijinja::Value::from_serialize(&page))?;
    Ok((status, Html(html)).into_response())
}
