use axum::{
    Json, Router,
    body::Bytes,
    extract::{Form, Multipart, Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};

use crate::{
    card::{CardRequest, PassId, RasterSurface, RenderError},
    dto::passes::{PassForm, PassPreview, PassQuery, PressPassSubmission},
    error::{AppError, AppResult, ErrorData},
    response::{ApiResponse, Meta},
    services::pass_service,
    state::AppState,
};

const PASS_FILENAME: &str = "press-pass.png";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(download_pass))
        .route("/preview", post(preview_pass))
}

#[derive(Debug, Default)]
struct PassInput {
    name: String,
    title: String,
    photo: Option<Bytes>,
}

async fn read_pass_input(mut multipart: Multipart) -> AppResult<PassInput> {
    let bad_form = |e: axum::extract::multipart::MultipartError| AppError::BadRequest(e.to_string());
    let mut input = PassInput::default();
    while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some("name") => input.name = field.text().await.map_err(bad_form)?,
            Some("title") => input.title = field.text().await.map_err(bad_form)?,
            Some("photo") => {
                let bytes = field.bytes().await.map_err(bad_form)?;
                input.photo = (!bytes.is_empty()).then_some(bytes);
            }
            _ => {}
        }
    }
    Ok(input)
}

/// Decode, render and finish the pass off the async runtime.
async fn generate<T, F>(state: &AppState, input: PassInput, finish: F) -> AppResult<(PassId, T)>
where
    T: Send + 'static,
    F: FnOnce(&RasterSurface) -> Result<T, RenderError> + Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || -> AppResult<(PassId, T)> {
        let mut request = CardRequest::new(input.name, input.title);
        if let Some(bytes) = input.photo {
            request = request.with_photo(state.decoder.decode(&bytes)?);
        }
        let pass = pass_service::render_pass(&state.renderer, &request)?;
        let output = finish(&pass.surface)?;
        Ok((pass.id, output))
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))?
}

#[utoipa::path(
    post,
    path = "/api/passes",
    params(PassQuery),
    request_body(content = PassForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Rendered press pass", body = Vec<u8>, content_type = "image/png"),
        (status = 400, description = "Unreadable form, or photo undecodable or too large", body = ErrorData),
    ),
    tag = "Passes"
)]
pub async fn download_pass(
    State(state): State<AppState>,
    Query(query): Query<PassQuery>,
    multipart: Multipart,
) -> AppResult<Response> {
    let input = read_pass_input(multipart).await?;
    let (id, png) = generate(&state, input, RasterSurface::encode_png).await?;

    let disposition = if query.is_inline() { "inline" } else { "attachment" };
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("{disposition}; filename=\"{PASS_FILENAME}\""))
            .map_err(|e| AppError::Internal(e.into()))?,
    );
    headers.insert(
        HeaderName::from_static("x-pass-id"),
        HeaderValue::from_str(id.as_str()).map_err(|e| AppError::Internal(e.into()))?,
    );

    Ok((headers, png).into_response())
}

#[utoipa::path(
    post,
    path = "/api/passes/preview",
    request_body(content = PassForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Rendered press pass as a data URL", body = ApiResponse<PassPreview>),
        (status = 400, description = "Unreadable form or photo", body = ErrorData),
    ),
    tag = "Passes"
)]
pub async fn preview_pass(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<PassPreview>>> {
    let input = read_pass_input(multipart).await?;
    let (id, data_url) = generate(&state, input, RasterSurface::to_data_url).await?;

    let meta = headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map_or_else(Meta::empty, Meta::new);
    let data = PassPreview {
        pass_id: id.into(),
        data_url,
    };
    Ok(Json(ApiResponse::success("Press pass", data, Some(meta))))
}

#[utoipa::path(
    post,
    path = "/api/forms/press-passes",
    request_body(content = PressPassSubmission, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 204, description = "Submission captured"),
    ),
    tag = "Passes"
)]
pub async fn capture_submission(
    State(state): State<AppState>,
    Form(submission): Form<PressPassSubmission>,
) -> StatusCode {
    pass_service::capture_submission(state.submissions.as_ref(), submission);
    StatusCode::NO_CONTENT
}
