pub mod ui;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub const PAGE_TITLE: &str = "Summarization of Paul Graham's essay, powered by LlamaIndex";
pub const PAGE_ICON: &str = "🦙";
pub const PAGE_HEADING: &str = "Summarization of Paul Graham's essay, powered by LlamaIndex 💬🦙";

/// Template environment with the page compiled in. `.html` names autoescape.
pub fn templates() -> Result<minijinja::Environment<'static>, minijinja::Error> {
    let mut env = minijinja::Environment::new();
    env.add_template("index.html", include_str!("../../templates/index.html"))?;
    Ok(env)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::index_page).post(ui::submit_query))
        .with_state(state)
}
