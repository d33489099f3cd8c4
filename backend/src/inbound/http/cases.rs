//! Case management API handlers.
//!
//! ```text
//! GET    /cases            list, optional ?status= filter (USER or ADMIN)
//! GET    /cases/{id}       fetch one (ADMIN)
//! POST   /cases            create (USER or ADMIN)
//! PUT    /cases/{id}       full replace (ADMIN)
//! DELETE /cases/{id}       remove (ADMIN)
//! ```
//!
//! Request bodies are validated before any service call; the first failing
//! field rule wins and surfaces as a 400 with its message.

use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ports::CaseListFilter;
use crate::domain::{Case, CaseData, CaseStatus, CaseValidationError, DomainError};
use crate::inbound::http::bearer::{AuthenticatedUser, ROLE_ADMIN, ROLE_USER};
use crate::inbound::http::error::{fail, ApiResult, ErrorEnvelope};
use crate::inbound::http::state::HttpState;

/// Create/update request body for cases.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseRequest {
    pub case_number: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Absent status is a field-rule failure, not a parse failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
}

impl TryFrom<CaseRequest> for CaseData {
    type Error = CaseValidationError;

    fn try_from(value: CaseRequest) -> Result<Self, Self::Error> {
        Self::new(
            &value.case_number,
            &value.title,
            value.description.as_deref(),
            value.status,
        )
    }
}

/// Case representation returned by every case endpoint.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseResponse {
    pub id: i64,
    pub case_number: String,
    pub title: String,
    pub description: Option<String>,
    pub status: CaseStatus,
    pub created_date: DateTime<Utc>,
}

impl From<Case> for CaseResponse {
    fn from(case: Case) -> Self {
        Self {
            id: case.id(),
            case_number: case.number().as_str().to_owned(),
            title: case.title().as_str().to_owned(),
            description: case
                .description()
                .map(|description| description.as_str().to_owned()),
            status: case.status(),
            created_date: case.created_at(),
        }
    }
}

/// Optional filters accepted by the list endpoint.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct CaseListQuery {
    pub status: Option<CaseStatus>,
}

impl From<CaseListQuery> for CaseListFilter {
    fn from(query: CaseListQuery) -> Self {
        Self {
            status: query.status,
        }
    }
}

fn map_case_validation_error(error: CaseValidationError) -> DomainError {
    DomainError::invalid_request(error.to_string())
}

/// List cases, optionally restricted to one status.
#[utoipa::path(
    get,
    path = "/cases",
    params(CaseListQuery),
    responses(
        (status = 200, description = "Cases", body = [CaseResponse]),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 403, description = "Forbidden", body = ErrorEnvelope)
    ),
    tags = ["cases"],
    operation_id = "listCases"
)]
#[get("/cases")]
pub async fn list_cases(
    req: HttpRequest,
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    query: web::Query<CaseListQuery>,
) -> ApiResult<web::Json<Vec<CaseResponse>>> {
    user.require_any_role(&[ROLE_USER, ROLE_ADMIN])
        .map_err(fail(&req))?;
    let cases = state
        .cases
        .list(query.into_inner().into())
        .await
        .map_err(fail(&req))?;
    Ok(web::Json(cases.into_iter().map(CaseResponse::from).collect()))
}

/// Fetch a single case by identifier.
#[utoipa::path(
    get,
    path = "/cases/{id}",
    params(("id" = i64, Path, description = "Case identifier")),
    responses(
        (status = 200, description = "Case", body = CaseResponse),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 403, description = "Forbidden", body = ErrorEnvelope),
        (status = 404, description = "Case not found", body = ErrorEnvelope)
    ),
    tags = ["cases"],
    operation_id = "getCase"
)]
#[get("/cases/{id}")]
pub async fn get_case(
    req: HttpRequest,
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    id: web::Path<i64>,
) -> ApiResult<web::Json<CaseResponse>> {
    user.require_role(ROLE_ADMIN).map_err(fail(&req))?;
    let case = state.cases.get(id.into_inner()).await.map_err(fail(&req))?;
    Ok(web::Json(case.into()))
}

/// Create a case.
#[utoipa::path(
    post,
    path = "/cases",
    request_body = CaseRequest,
    responses(
        (status = 200, description = "Case created", body = CaseResponse),
        (status = 400, description = "Invalid request", body = ErrorEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 403, description = "Forbidden", body = ErrorEnvelope),
        (status = 409, description = "Case number already exists", body = ErrorEnvelope)
    ),
    tags = ["cases"],
    operation_id = "createCase"
)]
#[post("/cases")]
pub async fn create_case(
    req: HttpRequest,
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CaseRequest>,
) -> ApiResult<web::Json<CaseResponse>> {
    user.require_any_role(&[ROLE_USER, ROLE_ADMIN])
        .map_err(fail(&req))?;
    let data = CaseData::try_from(payload.into_inner())
        .map_err(map_case_validation_error)
        .map_err(fail(&req))?;
    let created = state.cases.create(data).await.map_err(fail(&req))?;
    Ok(web::Json(created.into()))
}

/// Full-replace update of an existing case.
#[utoipa::path(
    put,
    path = "/cases/{id}",
    params(("id" = i64, Path, description = "Case identifier")),
    request_body = CaseRequest,
    responses(
        (status = 200, description = "Case updated", body = CaseResponse),
        (status = 400, description = "Invalid request", body = ErrorEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 403, description = "Forbidden", body = ErrorEnvelope),
        (status = 404, description = "Case not found", body = ErrorEnvelope),
        (status = 409, description = "Case number already exists", body = ErrorEnvelope)
    ),
    tags = ["cases"],
    operation_id = "updateCase"
)]
#[put("/cases/{id}")]
pub async fn update_case(
    req: HttpRequest,
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    id: web::Path<i64>,
    payload: web::Json<CaseRequest>,
) -> ApiResult<web::Json<CaseResponse>> {
    user.require_role(ROLE_ADMIN).map_err(fail(&req))?;
    let data = CaseData::try_from(payload.into_inner())
        .map_err(map_case_validation_error)
        .map_err(fail(&req))?;
    let updated = state
        .cases
        .update(id.into_inner(), data)
        .await
        .map_err(fail(&req))?;
    Ok(web::Json(updated.into()))
}

/// Remove a case.
#[utoipa::path(
    delete,
    path = "/cases/{id}",
    params(("id" = i64, Path, description = "Case identifier")),
    responses(
        (status = 204, description = "Case deleted"),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 403, description = "Forbidden", body = ErrorEnvelope),
        (status = 404, description = "Case not found", body = ErrorEnvelope)
    ),
    tags = ["cases"],
    operation_id = "deleteCase"
)]
#[delete("/cases/{id}")]
pub async fn delete_case(
    req: HttpRequest,
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    user.require_role(ROLE_ADMIN).map_err(fail(&req))?;
    state
        .cases
        .delete(id.into_inner())
        .await
        .map_err(fail(&req))?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{test_state, token_for};
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, App};
    use serde_json::Value;

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(test_state())
            .service(list_cases)
            .service(get_case)
            .service(create_case)
            .service(update_case)
            .service(delete_case)
    }

    fn admin_token() -> String {
        token_for("root", &[ROLE_ADMIN])
    }

    fn user_token() -> String {
        token_for("sam", &[ROLE_USER])
    }

    fn case_body(number: &str, title: &str, status: Option<CaseStatus>) -> CaseRequest {
        CaseRequest {
            case_number: number.into(),
            title: title.into(),
            description: Some("Test Description".into()),
            status,
        }
    }

    async fn create(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        token: &str,
        body: &CaseRequest,
    ) -> actix_web::dev::ServiceResponse {
        let request = actix_test::TestRequest::post()
            .uri("/cases")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(body)
            .to_request();
        actix_test::call_service(app, request).await
    }

    #[actix_web::test]
    async fn create_and_fetch_round_trip_with_camel_case_fields() {
        let app = actix_test::init_service(test_app()).await;
        let response = create(
            &app,
            &admin_token(),
            &case_body("FUNC123", "Initial Case", Some(CaseStatus::New)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let created: Value = actix_test::read_body_json(response).await;
        let id = created.get("id").and_then(Value::as_i64).expect("id");
        assert_eq!(
            created.get("caseNumber").and_then(Value::as_str),
            Some("FUNC123")
        );
        assert!(created.get("case_number").is_none());
        assert!(created.get("createdDate").and_then(Value::as_str).is_some());
        assert_eq!(created.get("status").and_then(Value::as_str), Some("NEW"));

        let request = actix_test::TestRequest::get()
            .uri(&format!("/cases/{id}"))
            .insert_header(("Authorization", format!("Bearer {}", admin_token())))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let fetched: Value = actix_test::read_body_json(response).await;
        assert_eq!(fetched.get("title").and_then(Value::as_str), Some("Initial Case"));
    }

    #[actix_web::test]
    async fn requests_without_a_token_are_unauthorized() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::get().uri("/cases").to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Missing or invalid Authorization header")
        );
        assert_eq!(body.get("path").and_then(Value::as_str), Some("/cases"));
    }

    #[actix_web::test]
    async fn malformed_tokens_are_unauthorized() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::get()
            .uri("/cases")
            .insert_header(("Authorization", "Bearer garbage"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Invalid or expired token")
        );
    }

    #[actix_web::test]
    async fn plain_users_can_list_and_create_but_not_fetch_by_id() {
        let app = actix_test::init_service(test_app()).await;
        let response = create(
            &app,
            &user_token(),
            &case_body("USR123", "User Created Case", Some(CaseStatus::New)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let created: Value = actix_test::read_body_json(response).await;
        let id = created.get("id").and_then(Value::as_i64).expect("id");

        let request = actix_test::TestRequest::get()
            .uri("/cases")
            .insert_header(("Authorization", format!("Bearer {}", user_token())))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let request = actix_test::TestRequest::get()
            .uri(&format!("/cases/{id}"))
            .insert_header(("Authorization", format!("Bearer {}", user_token())))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Access denied")
        );
    }

    #[actix_web::test]
    async fn updates_and_deletes_require_the_admin_role() {
        let app = actix_test::init_service(test_app()).await;
        let response = create(
            &app,
            &user_token(),
            &case_body("LOCKED1", "Guarded Case", Some(CaseStatus::New)),
        )
        .await;
        let created: Value = actix_test::read_body_json(response).await;
        let id = created.get("id").and_then(Value::as_i64).expect("id");

        let request = actix_test::TestRequest::put()
            .uri(&format!("/cases/{id}"))
            .insert_header(("Authorization", format!("Bearer {}", user_token())))
            .set_json(case_body("LOCKED1", "Guarded Case", Some(CaseStatus::Closed)))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let request = actix_test::TestRequest::delete()
            .uri(&format!("/cases/{id}"))
            .insert_header(("Authorization", format!("Bearer {}", user_token())))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn field_rule_failures_surface_with_their_messages() {
        let app = actix_test::init_service(test_app()).await;
        let response = create(
            &app,
            &admin_token(),
            &case_body("bad-number", "Valid Title", Some(CaseStatus::New)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Case number must be 2-20 characters long and contain only uppercase letters and numbers")
        );

        let response = create(&app, &admin_token(), &case_body("AB12", "Ok title", None)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Case status is required")
        );
    }

    #[actix_web::test]
    async fn duplicate_case_numbers_conflict() {
        let app = actix_test::init_service(test_app()).await;
        create(
            &app,
            &admin_token(),
            &case_body("DUP001", "First Case", Some(CaseStatus::New)),
        )
        .await;
        let response = create(
            &app,
            &admin_token(),
            &case_body("DUP001", "Second Case", Some(CaseStatus::New)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Case number already exists: DUP001")
        );
    }

    #[actix_web::test]
    async fn updating_a_missing_case_is_not_found() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::put()
            .uri("/cases/999")
            .insert_header(("Authorization", format!("Bearer {}", admin_token())))
            .set_json(case_body("GHOST99", "Phantom Case", Some(CaseStatus::New)))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Case not found with id: 999")
        );
        assert_eq!(body.get("path").and_then(Value::as_str), Some("/cases/999"));
    }

    #[actix_web::test]
    async fn delete_returns_no_content_then_the_case_is_gone() {
        let app = actix_test::init_service(test_app()).await;
        let response = create(
            &app,
            &admin_token(),
            &case_body("DEL001", "Doomed Case", Some(CaseStatus::New)),
        )
        .await;
        let created: Value = actix_test::read_body_json(response).await;
        let id = created.get("id").and_then(Value::as_i64).expect("id");

        let request = actix_test::TestRequest::delete()
            .uri(&format!("/cases/{id}"))
            .insert_header(("Authorization", format!("Bearer {}", admin_token())))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let request = actix_test::TestRequest::get()
            .uri(&format!("/cases/{id}"))
            .insert_header(("Authorization", format!("Bearer {}", admin_token())))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn the_status_filter_narrows_the_listing() {
        let app = actix_test::init_service(test_app()).await;
        create(
            &app,
            &admin_token(),
            &case_body("OPN001", "Open Case", Some(CaseStatus::New)),
        )
        .await;
        create(
            &app,
            &admin_token(),
            &case_body("CLS001", "Closed Case", Some(CaseStatus::Closed)),
        )
        .await;

        let request = actix_test::TestRequest::get()
            .uri("/cases?status=CLOSED")
            .insert_header(("Authorization", format!("Bearer {}", admin_token())))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        let cases = body.as_array().expect("array");
        assert_eq!(cases.len(), 1);
        assert_eq!(
            cases[0].get("caseNumber").and_then(Value::as_str),
            Some("CLS001")
        );
    }
}
