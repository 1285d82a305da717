//! HTTP routes: record list, CRUD forms, and the chart endpoint.

use askama::Template;
use axum::{
    extract::{Form, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::error;

use studylog_core::{parse_timestamp, CoreError, RecordDraft, RecordService, ValidationError};

use crate::chart::{self, ChartError};
use crate::views::{AddTemplate, EditTemplate, ErrorTemplate, IndexTemplate, RecordRow};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: RecordService,
    pub chart_width: u32,
    pub chart_height: u32,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/add", get(add_form).post(add_submit))
        .route("/delete/{id}", get(delete))
        .route("/edit/{id}", get(edit_form).post(edit_submit))
        .route("/plot", get(plot))
        .with_state(state)
}

/// Request-level error; maps core errors onto user-visible pages.
#[derive(Debug)]
pub enum AppError {
    Core(CoreError),
    Chart(ChartError),
    Render(askama::Error),
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        AppError::Core(e)
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Core(CoreError::Validation(e))
    }
}

impl From<ChartError> for AppError {
    fn from(e: ChartError) -> Self {
        AppError::Chart(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Render(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(CoreError::Validation(e)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            AppError::Core(CoreError::NotFound(id)) => (
                StatusCode::NOT_FOUND,
                format!("record {id} does not exist"),
            ),
            AppError::Core(e) => {
                error!(error = %e, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
            AppError::Chart(e) => {
                error!(error = %e, "chart rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
            AppError::Render(e) => {
                error!(error = %e, "template rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        let page = ErrorTemplate {
            status: status.as_u16(),
            message,
        };
        let body = page.render().unwrap_or_else(|_| "error".to_string());
        (status, Html(body)).into_response()
    }
}

/// Raw form payload; fields arrive as strings so malformed numbers are
/// reported as validation errors rather than a framework rejection.
#[derive(Debug, Deserialize)]
pub struct RecordForm {
    pub date_time: String,
    pub distracted_minutes: String,
    pub studied_minutes: String,
}

impl RecordForm {
    fn into_draft(self) -> Result<RecordDraft, ValidationError> {
        let timestamp = parse_timestamp(&self.date_time)?;
        let distracted = parse_minutes("distracted_minutes", &self.distracted_minutes)?;
        let studied = parse_minutes("studied_minutes", &self.studied_minutes)?;
        RecordDraft::new(timestamp, distracted, studied)
    }
}

fn parse_minutes(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    let value = value.trim();
    value.parse::<f64>().map_err(|_| ValidationError::InvalidValue {
        field: field.to_string(),
        message: format!("'{value}' is not a number"),
    })
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let rows: Vec<RecordRow> = state
        .service
        .list()?
        .into_iter()
        .map(RecordRow::from)
        .collect();
    Ok(Html(IndexTemplate { rows }.render()?))
}

async fn add_form() -> Result<Html<String>, AppError> {
    Ok(Html(AddTemplate.render()?))
}

async fn add_submit(
    State(state): State<AppState>,
    Form(form): Form<RecordForm>,
) -> Result<Redirect, AppError> {
    let draft = form.into_draft()?;
    state.service.create(draft)?;
    Ok(Redirect::to("/"))
}

async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    state.service.delete(id)?;
    Ok(Redirect::to("/"))
}

async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let record = state.service.get(id)?;
    Ok(Html(EditTemplate::from(record).render()?))
}

async fn edit_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<RecordForm>,
) -> Result<Redirect, AppError> {
    let draft = form.into_draft()?;
    state.service.update(id, draft)?;
    Ok(Redirect::to("/"))
}

async fn plot(State(state): State<AppState>) -> Result<Response, AppError> {
    let series = state.service.series_for_chart()?;
    let png = chart::render_series_png(&series, state.chart_width, state.chart_height)?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}
