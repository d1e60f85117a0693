use crate::infra::AppState;
use apm_console::api::ApiClient;
use apm_console::domain::{Agreement, Client, CreditApplication};
use apm_console::error::AppError;
use apm_console::workflows::application::{
    ApplicationForm, ApplicationWorkflow, RawApplicationForm, ResultPanel, WorkflowError,
};
use apm_console::workflows::listing::{
    ClientFilters, FetchOutcome, ListController, ListResource, NoFilters,
};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageParams {
    #[serde(default)]
    pub(crate) page: Option<i64>,
}

/// Client search parameters; empty values are dropped before the remote call.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ClientSearchParams {
    #[serde(default)]
    pub(crate) page: Option<i64>,
    #[serde(default)]
    pub(crate) first_name: String,
    #[serde(default)]
    pub(crate) last_name: String,
    #[serde(default)]
    pub(crate) middle_name: String,
    #[serde(default)]
    pub(crate) phone: String,
    #[serde(default)]
    pub(crate) passport: String,
}

impl ClientSearchParams {
    fn into_filters(self) -> (u32, ClientFilters) {
        let page = clamp_page(self.page);
        let filters = ClientFilters {
            first_name: self.first_name,
            last_name: self.last_name,
            middle_name: self.middle_name,
            phone: self.phone,
            passport: self.passport,
        };
        (page, filters)
    }
}

/// Missing or non-positive pages start from the first one.
fn clamp_page(page: Option<i64>) -> u32 {
    match page {
        Some(page) if page > 1 => u32::try_from(page).unwrap_or(u32::MAX),
        _ => 1,
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmissionResponse {
    pub(crate) application: CreditApplication,
    pub(crate) panel: ResultPanel,
}

pub(crate) fn console_routes(client: ApiClient) -> Router {
    Router::new()
        .route(
            "/console/applications",
            get(list_applications).post(submit_application),
        )
        .route(
            "/console/applications/:application_id/signing",
            post(sign_application),
        )
        .route("/console/agreements", get(list_agreements))
        .route("/console/clients", get(list_clients))
        .with_state(client)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn submit_application(
    State(client): State<ApiClient>,
    Json(raw): Json<RawApplicationForm>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let form = ApplicationForm::try_from(raw)?;
    let request = form.to_request()?;

    let mut workflow = ApplicationWorkflow::new(client);
    let application = workflow.submit(&request).await?.clone();
    let panel = ResultPanel::build(&application, false);

    Ok(Json(SubmissionResponse { application, panel }))
}

pub(crate) async fn sign_application(
    State(client): State<ApiClient>,
    Path(application_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    client
        .sign_agreement(application_id)
        .await
        .map_err(WorkflowError::SigningFailed)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_page<T>(client: ApiClient, page: u32, filters: T::Filters) -> Result<Response, AppError>
where
    T: ListResource + Serialize,
{
    let mut controller = ListController::<T>::with_filters(client, filters);
    match controller.fetch_page(page).await {
        FetchOutcome::Failed(error) => Err(AppError::Api(error)),
        FetchOutcome::Applied | FetchOutcome::Stale => {
            Ok(Json(controller.view().snapshot()).into_response())
        }
    }
}

pub(crate) async fn list_applications(
    State(client): State<ApiClient>,
    Query(params): Query<PageParams>,
) -> Result<Response, AppError> {
    list_page::<CreditApplication>(client, clamp_page(params.page), NoFilters).await
}

pub(crate) async fn list_agreements(
    State(client): State<ApiClient>,
    Query(params): Query<PageParams>,
) -> Result<Response, AppError> {
    list_page::<Agreement>(client, clamp_page(params.page), NoFilters).await
}

pub(crate) async fn list_clients(
    State(client): State<ApiClient>,
    Query(params): Query<ClientSearchParams>,
) -> Result<Response, AppError> {
    let (page, filters) = params.into_filters();
    list_page::<Client>(client, page, filters).await
}
