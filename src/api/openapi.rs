use utoipa::OpenApi;

use crate::api::models::{FeedbackForm, LoginForm, UploadForm};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::index,
        super::handlers::login_form,
        super::handlers::login,
        super::handlers::logout,
        super::handlers::upload_form,
        super::handlers::upload_file,
        super::handlers::my_images,
        super::handlers::view_images,
        super::handlers::feedback_form,
        super::handlers::submit_feedback,
        super::handlers::view_feedback
    ),
    components(schemas(LoginForm, FeedbackForm, UploadForm)),
    info(
        title = "medview",
        description = "Medical image exchange between students and reviewing doctors",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
