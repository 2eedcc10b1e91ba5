//! Data Routes
//!
//! JSON access to views and data.
//!
//! - GET /api/v1/views/:page - View instructions of a page
//! - GET /api/v1/sample-data - Generated sample table (JSON or CSV)
//! - POST /api/v1/summarize - Head rows and statistics of a CSV body

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{SampleFormat, SampleParams, ViewParams};
use crate::api::error::{ApiError, ApiResult};
use crate::api::session::Session;
use crate::api::state::AppState;
use crate::data::{summarize, UploadSummary};
use crate::nav::{NavError, NavigationState};
use crate::view::{route, ViewInputs};

/// GET /api/v1/views/:page
///
/// The view instructions the HTML page would render, as JSON.
pub async fn get_view(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(page): Path<String>,
    Query(params): Query<ViewParams>,
) -> ApiResult<Response> {
    let nav = NavigationState::from_params(
        Some(&page),
        params.theme.as_deref(),
        params.show_code.as_deref(),
        state.config.ui.default_theme,
    )
    .map_err(|e| match e {
        NavError::UnknownPage(page) => ApiError::NotFound(format!("page '{}'", page)),
        other => other.into(),
    })?;

    let session = Session::from_headers(&headers);
    let ctx = state.render_context(nav);

    let sample = if nav.page.needs_sample_data() {
        Some(state.sample_for(&session.id, params.seed).await?)
    } else {
        None
    };

    let inputs = ViewInputs {
        sample: sample.as_deref(),
        ..Default::default()
    };
    let output = route(&ctx, &inputs)?;

    let mut response = Json(output).into_response();
    session.attach(&mut response);
    Ok(response)
}

/// GET /api/v1/sample-data
///
/// The session's sample table. `seed` pins the generator.
pub async fn sample_data(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<SampleParams>,
) -> ApiResult<Response> {
    let session = Session::from_headers(&headers);
    let series = state.sample_for(&session.id, params.seed).await?;

    let mut response = match params.format {
        SampleFormat::Json => Json(&*series).into_response(),
        SampleFormat::Csv => {
            let body = series.to_csv()?;
            (
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                    (
                        header::CONTENT_DISPOSITION,
                        "attachment; filename=\"sample_data.csv\"",
                    ),
                ],
                body,
            )
                .into_response()
        }
    };

    session.attach(&mut response);
    Ok(response)
}

/// POST /api/v1/summarize
///
/// Raw CSV request body in, [`UploadSummary`] out.
pub async fn summarize_csv(body: Bytes) -> ApiResult<Json<UploadSummary>> {
    let summary = summarize(&body)?;

    tracing::info!(
        rows = summary.rows,
        columns = summary.columns.len(),
        "Summarized CSV"
    );

    Ok(Json(summary))
}
