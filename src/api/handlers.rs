use crate::{
    api::{
        AppService,
        models::*,
        openapi::ApiDoc,
        session::{resolve_session, session_layer, session_middleware, sign_in, sign_out, take_notices},
        views,
    },
    auth::guard::Operation,
    config::Config,
    core::{errors::MedviewError, models::session::Identity},
    infrastructure::session::SessionStore,
};
use axum::{
    Extension, Form, Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, Path, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{compression::CompressionLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};
use tower_sessions::Session;
use tracing::info;
use utoipa::OpenApi;

// Define application routes
pub fn api_routes<S: SessionStore + Clone>(service: Arc<AppService>, sessions: S, config: &Config) -> Router {
    let protected_routes = Router::new()
        .route("/", get(index))
        .route("/upload", get(upload_form).post(upload_file))
        .route("/my_images", get(my_images))
        .route("/view_images", get(view_images))
        .route("/feedback/{filename}", get(feedback_form).post(submit_feedback))
        .route("/view_feedback/{filename}", get(view_feedback))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .route_layer(middleware::from_fn(session_middleware));

    let uploads = Router::new().nest_service("/uploads", ServeDir::new(&config.upload_dir));
    let uploads = if config.protect_uploads {
        uploads.route_layer(middleware::from_fn(session_middleware))
    } else {
        uploads
    };

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(protected_routes)
        .merge(uploads)
        .layer(session_layer(sessions, config))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Main view with links for the caller's role"),
        (status = 303, description = "No session; redirect to /login")
    )
)]
async fn index(session: Session, Extension(identity): Extension<Identity>) -> Result<Html<String>, ApiError> {
    let notices = take_notices(&session).await?;
    Ok(Html(views::index_page(&identity.username, identity.role, &notices)))
}

#[utoipa::path(
    get,
    path = "/login",
    responses((status = 200, description = "Login form"))
)]
async fn login_form() -> Html<String> {
    Html(views::login_page(None))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Login successful; session cookie set, redirect to /"),
        (status = 401, description = "Invalid credentials; login form redisplayed")
    )
)]
async fn login(
    State(service): State<Arc<AppService>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, ApiError> {
    let identity = service.authenticate(&form.username, &form.password).await?;
    sign_in(&session, &identity).await?;
    Ok(Redirect::to("/"))
}

#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 303, description = "Session cleared; redirect to /login"))
)]
async fn logout(session: Session) -> Result<Redirect, ApiError> {
    match resolve_session(&session).await {
        Ok(identity) => info!(user = %identity.username, "logged out"),
        Err(MedviewError::Unauthenticated) => {}
        Err(e) => return Err(e.into()),
    }
    sign_out(&session).await?;
    Ok(Redirect::to("/login"))
}

#[utoipa::path(
    get,
    path = "/upload",
    responses(
        (status = 200, description = "Upload form"),
        (status = 303, description = "Not a student; redirect to / with a notice")
    )
)]
async fn upload_form(
    State(service): State<Arc<AppService>>,
    Extension(identity): Extension<Identity>,
) -> Result<Html<String>, ApiError> {
    service.authorize(&identity, Operation::UploadImage)?;
    Ok(Html(views::upload_page(None)))
}

fn multipart_error(err: MultipartError) -> MedviewError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        MedviewError::PayloadTooLarge
    } else {
        MedviewError::InvalidRequest(err.body_text())
    }
}

#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 303, description = "Image stored; redirect to /"),
        (status = 200, description = "No file provided; upload form redisplayed"),
        (status = 400, description = "File name sanitizes to nothing or body is malformed"),
        (status = 413, description = "Upload exceeds the size limit")
    )
)]
async fn upload_file(
    State(service): State<Arc<AppService>>,
    Extension(identity): Extension<Identity>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    service.authorize(&identity, Operation::UploadImage)?;
    let mut multipart = multipart.map_err(|e| MedviewError::InvalidRequest(e.body_text()))?;

    // Only the first `file` part counts.
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let data = field.bytes().await.map_err(multipart_error)?;
        upload = Some((file_name, data));
        break;
    }

    let (file_name, data) = upload.ok_or(MedviewError::MissingFile)?;
    service.upload_image(&identity, file_name.as_deref(), &data).await?;
    Ok(Redirect::to("/").into_response())
}

#[utoipa::path(
    get,
    path = "/my_images",
    responses(
        (status = 200, description = "Every stored image with its feedback"),
        (status = 303, description = "Not a student; redirect to / with a notice")
    )
)]
async fn my_images(
    State(service): State<Arc<AppService>>,
    Extension(identity): Extension<Identity>,
) -> Result<Html<String>, ApiError> {
    let images = service.list_own_images(&identity).await?;
    Ok(Html(views::my_images_page(&images)))
}

#[utoipa::path(
    get,
    path = "/view_images",
    responses(
        (status = 200, description = "Every stored image with its URL"),
        (status = 303, description = "Not a doctor; redirect to / with a notice")
    )
)]
async fn view_images(
    State(service): State<Arc<AppService>>,
    session: Session,
    Extension(identity): Extension<Identity>,
) -> Result<Html<String>, ApiError> {
    let images = service.view_images(&identity).await?;
    let notices = take_notices(&session).await?;
    Ok(Html(views::view_images_page(&images, &notices)))
}

#[utoipa::path(
    get,
    path = "/feedback/{filename}",
    params(("filename" = String, Path, description = "Image to give feedback on")),
    responses(
        (status = 200, description = "Feedback form"),
        (status = 303, description = "Not a doctor; redirect to / with a notice")
    )
)]
async fn feedback_form(
    State(service): State<Arc<AppService>>,
    Extension(identity): Extension<Identity>,
    Path(filename): Path<String>,
) -> Result<Html<String>, ApiError> {
    service.authorize(&identity, Operation::SubmitFeedback)?;
    Ok(Html(views::feedback_page(&filename)))
}

#[utoipa::path(
    post,
    path = "/feedback/{filename}",
    params(("filename" = String, Path, description = "Image the feedback is for; need not exist")),
    request_body(content = FeedbackForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 303, description = "Feedback stored; redirect to /view_images with a notice"))
)]
async fn submit_feedback(
    State(service): State<Arc<AppService>>,
    Extension(identity): Extension<Identity>,
    Path(filename): Path<String>,
    Form(form): Form<FeedbackForm>,
) -> Result<Response, ApiError> {
    service.submit_feedback(&identity, &filename, form.feedback).await?;
    Ok(redirect_with_notice(
        "/view_images",
        format!("Feedback submitted for {}", filename),
    ))
}

#[utoipa::path(
    get,
    path = "/view_feedback/{filename}",
    params(("filename" = String, Path, description = "Image to read feedback for")),
    responses(
        (status = 200, description = "Stored feedback or the placeholder"),
        (status = 303, description = "Not a student; redirect to / with a notice")
    )
)]
async fn view_feedback(
    State(service): State<Arc<AppService>>,
    Extension(identity): Extension<Identity>,
    Path(filename): Path<String>,
) -> Result<Html<String>, ApiError> {
    let feedback = service.view_feedback(&identity, &filename).await?;
    Ok(Html(views::view_feedback_page(&filename, &feedback)))
}
