//! OpenAPI document assembled from the annotated handlers.

use utoipa::OpenApi;

use crate::inbound::http::auth::{AuthRequest, AuthResponse, SignupRequest};
use crate::inbound::http::cases::{CaseRequest, CaseResponse};
use crate::inbound::http::ErrorEnvelope;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::cases::list_cases,
        crate::inbound::http::cases::get_case,
        crate::inbound::http::cases::create_case,
        crate::inbound::http::cases::update_case,
        crate::inbound::http::cases::delete_case,
    ),
    components(schemas(
        SignupRequest,
        AuthRequest,
        AuthResponse,
        CaseRequest,
        CaseResponse,
        ErrorEnvelope,
    )),
    tags(
        (name = "auth", description = "Account registration and login"),
        (name = "cases", description = "Case lifecycle management"),
    )
)]
pub struct ApiDoc;
