use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        checkout::{CheckoutRequest, CheckoutResponse},
        passes::{PassForm, PassPreview, PressPassSubmission},
    },
    error::ErrorData,
    response::{ApiResponse, Meta},
    routes::{checkout, health, passes},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        checkout::create_checkout_session,
        passes::download_pass,
        passes::preview_pass,
        passes::capture_submission
    ),
    components(
        schemas(
            health::HealthData,
            CheckoutRequest,
            CheckoutResponse,
            PassForm,
            PassPreview,
            PressPassSubmission,
            ErrorData,
            Meta,
            ApiResponse<PassPreview>,
            ApiResponse<health::HealthData>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Checkout", description = "Hosted checkout for printed passes"),
        (name = "Passes", description = "Press pass rendering and form capture"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
