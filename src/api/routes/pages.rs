//! Page Routes
//!
//! Server-rendered HTML pages.
//!
//! - GET / - Selected page (`page`, `theme`, `show_code` query params)
//! - POST /demo/form - Demo page with submitted form values
//! - POST /demo/upload - Demo page with an uploaded CSV summarized

use axum::{
    extract::{Multipart, Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::dto::PageParams;
use crate::api::error::{ApiError, PageError, PageResult};
use crate::api::session::Session;
use crate::api::state::AppState;
use crate::form::{parse_urlencoded, FormSubmission};
use crate::nav::{NavigationState, Page};
use crate::render::{render_page, PageBody};
use crate::view::{route, Upload, ViewInputs};

/// GET /
///
/// Render the page selected in the sidebar.
pub async fn index(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<PageParams>,
) -> PageResult<Response> {
    let session = Session::from_headers(&headers);
    let nav = NavigationState::from_params(
        params.page.as_deref(),
        params.theme.as_deref(),
        params.show_code.as_deref(),
        state.config.ui.default_theme,
    )
    .map_err(|e| {
        PageError::new(state.render_context(state.default_nav()), e).with_session(&session)
    })?;

    render(&state, &session, nav, None, None).await
}

/// POST /demo/form
///
/// Urlencoded demo form. Every post re-renders the live preview; the
/// confirmation only appears when the `submit` button sent the form.
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> PageResult<Response> {
    let session = Session::from_headers(&headers);
    let pairs = parse_urlencoded(&body);
    let nav = demo_nav(&state, &pairs).map_err(|e| e.with_session(&session))?;
    let form = FormSubmission::from_pairs(pairs);

    if form.submitted {
        tracing::info!(
            interests = form.interests.len(),
            newsletter = form.newsletter,
            "Form submitted"
        );
    }

    render(&state, &session, nav, Some(&form), None).await
}

/// POST /demo/upload
///
/// Multipart upload with a `file` field. A file that cannot be parsed
/// produces an error page for this request only.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> PageResult<Response> {
    let session = Session::from_headers(&headers);
    let fallback = || state.render_context(demo_default(&state));
    let invalid = |e: axum::extract::multipart::MultipartError| {
        PageError::new(
            fallback(),
            ApiError::Validation(format!("Invalid multipart body: {}", e)),
        )
        .with_session(&session)
    };

    let mut upload = None;
    let mut fields = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "file" {
            let filename = field.file_name().unwrap_or("upload.csv").to_string();
            let bytes = field.bytes().await.map_err(invalid)?;
            upload = Some(Upload {
                filename,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field.text().await.map_err(invalid)?;
            fields.push((name, value));
        }
    }

    let nav = demo_nav(&state, &fields).map_err(|e| e.with_session(&session))?;
    let upload = upload.ok_or_else(|| {
        PageError::new(
            state.render_context(nav),
            ApiError::Validation("No file uploaded: expected a `file` field".to_string()),
        )
        .with_session(&session)
    })?;

    tracing::info!(
        filename = %upload.filename,
        bytes = upload.bytes.len(),
        "File uploaded"
    );

    render(&state, &session, nav, None, Some(&upload)).await
}

/// Run one render pass and wrap the view in the page chrome
async fn render(
    state: &AppState,
    session: &Session,
    nav: NavigationState,
    form: Option<&FormSubmission>,
    upload: Option<&Upload>,
) -> PageResult<Response> {
    let ctx = state.render_context(nav);

    let sample = if nav.page.needs_sample_data() {
        let series = state
            .sample_for(&session.id, None)
            .await
            .map_err(|e| PageError::new(ctx.clone(), e).with_session(session))?;
        Some(series)
    } else {
        None
    };

    let inputs = ViewInputs {
        sample: sample.as_deref(),
        form,
        upload,
    };
    let output = route(&ctx, &inputs)
        .map_err(|e| PageError::new(ctx.clone(), e).with_session(session))?;

    let mut response = Html(render_page(&ctx, PageBody::View(&output))).into_response();
    session.attach(&mut response);
    Ok(response)
}

fn demo_default(state: &AppState) -> NavigationState {
    NavigationState::new(Page::Demo).theme(state.config.ui.default_theme)
}

/// Demo page navigation from the hidden preference fields of a POST form
fn demo_nav(state: &AppState, fields: &[(String, String)]) -> PageResult<NavigationState> {
    let value = |key: &str| {
        fields
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    NavigationState::from_params(
        Some(Page::Demo.slug()),
        value("theme"),
        value("show_code"),
        state.config.ui.default_theme,
    )
    .map_err(|e| PageError::new(state.render_context(demo_default(state)), e))
}
