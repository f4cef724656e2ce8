//! HTTP implementation of the data engine API
//!
//! [`HttpClientFactory`] builds a fresh `reqwest` client for every handle it
//! hands out, so each remote operation runs on its own short-lived
//! connection pool.
//!
//! | operation | request |
//! |---|---|
//! | mount | `POST {base}/collaborators/{id}/mount` |
//! | status | `GET {base}/collaborators/{id}/status` |
//! | query | `POST {base}/collaborators/{id}/query` |
//! | append | `POST {base}/collaborators/{id}/append` (multipart `data`) |
//! | export | `POST {base}/collaborators/{id}/export` |
//! | start validation | `POST {base}/quality/collaborators/{id}` |
//! | get report | `GET {base}/quality/reports/{report_id}` |

use super::api::{
    ApiResponse, ApiResult, ClientFactory, DataEngineApi, ReportPoll, StatusSample,
    ValidationStart,
};
use super::models::{
    MountBody, QueryBody, ReportResponse, StatusResponse, ValidationStartedResponse,
};
use crate::config::{DataEngineConfig, SecretString};
use crate::domain::{CollaboratorId, DataEngineError, FraudShareError, ReportId, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;
use url::Url;

/// Factory producing one [`HttpDataEngineClient`] per remote operation
///
/// # Example
///
/// ```no_run
/// use fraudshare::adapters::data_engine::{ClientFactory, HttpClientFactory};
/// use fraudshare::config::DataEngineConfig;
///
/// # fn example() -> fraudshare::domain::Result<()> {
/// let factory = HttpClientFactory::new(&DataEngineConfig::default())?;
/// let client = factory.create_client()?;
/// # Ok(())
/// # }
/// ```
pub struct HttpClientFactory {
    base_url: Url,
    token: Option<SecretString>,
    timeout: Duration,
}

impl HttpClientFactory {
    /// Create a factory from the data engine configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL cannot be parsed or
    /// cannot carry a path.
    pub fn new(config: &DataEngineConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            FraudShareError::Configuration(format!(
                "Invalid data_engine.base_url '{}': {e}",
                config.base_url
            ))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(FraudShareError::Configuration(format!(
                "data_engine.base_url '{}' cannot be used as a base URL",
                config.base_url
            )));
        }

        Ok(Self {
            base_url,
            token: config.token.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    /// Base URL every request is built from
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }
}

impl ClientFactory for HttpClientFactory {
    fn create_client(&self) -> ApiResult<Box<dyn DataEngineApi>> {
        let client = ClientBuilder::new()
            .timeout(self.timeout)
            .connect_timeout(self.timeout.min(Duration::from_secs(30)))
            .build()
            .map_err(|e| DataEngineError::ConnectionFailed(e.to_string()))?;

        Ok(Box::new(HttpDataEngineClient {
            base_url: self.base_url.clone(),
            client,
            token: self.token.clone(),
        }))
    }
}

/// Data engine client over HTTP
pub struct HttpDataEngineClient {
    base_url: Url,
    client: Client,
    token: Option<SecretString>,
}

impl HttpDataEngineClient {
    /// Build an endpoint URL, percent-encoding every segment
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                DataEngineError::InvalidRequest(format!(
                    "base URL {} cannot carry a path",
                    self.base_url
                ))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn collaborator_endpoint(&self, id: &CollaboratorId, action: &str) -> ApiResult<Url> {
        self.endpoint(&["collaborators", id.as_str(), action])
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret().as_ref()),
            None => request,
        }
    }

    /// Status code and lossily-decoded body
    async fn read(response: Response) -> ApiResult<ApiResponse> {
        let status_code = response.status().as_u16();
        let bytes = response.bytes().await?;
        Ok(ApiResponse::new(
            status_code,
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    }

    fn is_success(status_code: u16) -> bool {
        StatusCode::from_u16(status_code)
            .map(|s| s.is_success())
            .unwrap_or(false)
    }
}

#[async_trait]
impl DataEngineApi for HttpDataEngineClient {
    async fn mount(&self, id: &CollaboratorId, body: &MountBody) -> ApiResult<ApiResponse> {
        let url = self.collaborator_endpoint(id, "mount")?;
        tracing::debug!(collaborator_id = %id, url = %url, "Sending mount request");

        let response = self
            .authorize(self.client.post(url).json(body))
            .send()
            .await?;
        Self::read(response).await
    }

    async fn status(&self, id: &CollaboratorId) -> ApiResult<StatusSample> {
        let url = self.collaborator_endpoint(id, "status")?;
        let response = self.authorize(self.client.get(url)).send().await?;
        let ApiResponse { status_code, body } = Self::read(response).await?;

        let status = if Self::is_success(status_code) {
            serde_json::from_str::<StatusResponse>(&body)
                .ok()
                .map(|r| r.status)
        } else {
            None
        };

        Ok(StatusSample {
            status_code,
            status,
            body,
        })
    }

    async fn query(&self, id: &CollaboratorId, body: &QueryBody) -> ApiResult<String> {
        let url = self.collaborator_endpoint(id, "query")?;
        tracing::debug!(collaborator_id = %id, url = %url, "Sending query request");

        let response = self
            .authorize(self.client.post(url).json(body))
            .send()
            .await?;
        let ApiResponse { status_code, body } = Self::read(response).await?;

        if !Self::is_success(status_code) {
            return Err(DataEngineError::QueryFailed {
                status: status_code,
                message: body,
            });
        }

        Ok(body)
    }

    async fn append(
        &self,
        id: &CollaboratorId,
        payload: Vec<u8>,
        file_name: &str,
    ) -> ApiResult<ApiResponse> {
        let url = self.collaborator_endpoint(id, "append")?;
        tracing::debug!(
            collaborator_id = %id,
            bytes = payload.len(),
            file_name = file_name,
            "Sending append request"
        );

        let part = Part::bytes(payload)
            .file_name(file_name.to_string())
            .mime_str("text/csv")?;
        let form = Form::new().part("data", part);

        let response = self
            .authorize(self.client.post(url).multipart(form))
            .send()
            .await?;
        Self::read(response).await
    }

    async fn export(&self, id: &CollaboratorId) -> ApiResult<ApiResponse> {
        let url = self.collaborator_endpoint(id, "export")?;
        tracing::debug!(collaborator_id = %id, url = %url, "Sending export request");

        let response = self.authorize(self.client.post(url)).send().await?;
        Self::read(response).await
    }

    async fn start_validation(&self, id: &CollaboratorId) -> ApiResult<ValidationStart> {
        let url = self.endpoint(&["quality", "collaborators", id.as_str()])?;
        let response = self.authorize(self.client.post(url)).send().await?;
        let ApiResponse { status_code, body } = Self::read(response).await?;

        if status_code == StatusCode::CREATED.as_u16() {
            let started = serde_json::from_str::<ValidationStartedResponse>(&body)
                .ok()
                .and_then(|r| ReportId::new(r.id).ok());
            if let Some(report_id) = started {
                return Ok(ValidationStart::Started(report_id));
            }
        }

        Ok(ValidationStart::Rejected { status_code, body })
    }

    async fn get_report(&self, report_id: &ReportId) -> ApiResult<ReportPoll> {
        let url = self.endpoint(&["quality", "reports", report_id.as_str()])?;
        let response = self.authorize(self.client.get(url)).send().await?;
        let ApiResponse { status_code, body } = Self::read(response).await?;

        if !Self::is_success(status_code) {
            tracing::debug!(
                report_id = %report_id,
                status_code = status_code,
                "Quality report not available yet"
            );
            return Ok(ReportPoll::Pending);
        }

        let finished = serde_json::from_str::<ReportResponse>(&body)
            .ok()
            .and_then(ReportResponse::into_finished);

        Ok(match finished {
            Some(report) => ReportPoll::Finished(report),
            None => ReportPoll::Pending,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory(base_url: &str) -> Result<HttpClientFactory> {
        HttpClientFactory::new(&DataEngineConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_factory_rejects_invalid_url() {
        let err = factory("not a url").err().unwrap();
        assert!(matches!(err, FraudShareError::Configuration(_)));
    }

    #[test]
    fn test_factory_rejects_non_base_url() {
        assert!(factory("mailto:ops@example.com").is_err());
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = HttpDataEngineClient {
            base_url: Url::parse("https://engine.example.com/api/").unwrap(),
            client: Client::new(),
            token: None,
        };
        let id = CollaboratorId::new("bank a/list").unwrap();
        let url = client.collaborator_endpoint(&id, "status").unwrap();
        assert_eq!(
            url.as_str(),
            "https://engine.example.com/api/collaborators/bank%20a%2Flist/status"
        );
    }

    #[test]
    fn test_is_success() {
        assert!(HttpDataEngineClient::is_success(200));
        assert!(HttpDataEngineClient::is_success(204));
        assert!(!HttpDataEngineClient::is_success(404));
        assert!(!HttpDataEngineClient::is_success(1000));
    }
}
