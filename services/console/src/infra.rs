use apm_console::api::ApiClient;
use apm_console::config::AppConfig;
use apm_console::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn api_client(config: &AppConfig) -> Result<ApiClient, AppError> {
    Ok(ApiClient::from_config(&config.api)?)
}
