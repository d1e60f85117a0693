use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::endpoints::{signing_path, ListEndpoint, PageQuery, CREATE_APPLICATION_PATH};
use super::error::ApiError;
use crate::config::ApiConfig;
use crate::domain::{CreditApplication, CreditApplicationRequest, Page};

/// HTTP client bound to one API base URL.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Url::parse(base_url)?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("apm-console/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        body: Option<&CreditApplicationRequest>,
    ) -> Result<Response, ApiError> {
        debug!(%method, %url, "calling remote API");

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ApiError::Transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response)
    }

    /// `POST /v1/credit-application`
    pub async fn create_application(
        &self,
        request: &CreditApplicationRequest,
    ) -> Result<CreditApplication, ApiError> {
        let url = self.url(CREATE_APPLICATION_PATH);
        let response = self.send(Method::POST, url, Some(request)).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    /// `PATCH /v1/credit-application/{id}/signing`; the response body is not inspected.
    pub async fn sign_agreement(&self, application_id: i64) -> Result<(), ApiError> {
        let url = self.url(&signing_path(application_id));
        self.send(Method::PATCH, url, None).await?;
        Ok(())
    }

    pub async fn fetch_page<T>(
        &self,
        endpoint: ListEndpoint,
        query: &PageQuery,
    ) -> Result<Page<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}?{}", self.url(endpoint.path()), query.to_query_string());
        let response = self.send(Method::GET, url, None).await?;
        response.json().await.map_err(ApiError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Agreement;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn rejects_relative_base_urls() {
        assert!(matches!(ApiClient::new("/api"), Err(ApiError::Url(_))));
    }

    #[test]
    fn trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:8080/api/").expect("valid url");
        assert_eq!(client.base_url(), "http://localhost:8080/api");
    }

    #[tokio::test]
    async fn fetch_page_decodes_agreements() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/credit-application/list-agreement"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"id": 5, "applicationId": 9, "signingStatus": "NOT_SIGNED"}],
                "total": 11,
                "pageSize": 10
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&format!("{}/api", server.uri())).expect("client builds");
        let page: Page<Agreement> = client
            .fetch_page(ListEndpoint::Agreements, &PageQuery::new(2))
            .await
            .expect("page loads");

        assert_eq!(page.total, 11);
        assert_eq!(page.content[0].application_id, 9);
        assert!(page.content[0].signed_at.is_none());
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/v1/credit-application/3/signing"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;

        let client = ApiClient::new(&format!("{}/api", server.uri())).expect("client builds");
        match client.sign_agreement(3).await {
            Err(ApiError::Status { status, url }) => {
                assert_eq!(status, 409);
                assert!(url.ends_with("/api/v1/credit-application/3/signing"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/client/list"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = ApiClient::new(&format!("{}/api", server.uri())).expect("client builds");
        let result = client
            .fetch_page::<crate::domain::Client>(ListEndpoint::Clients, &PageQuery::new(1))
            .await;

        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
