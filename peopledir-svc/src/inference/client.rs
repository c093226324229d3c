//! reqwest-backed inference client

use async_trait::async_trait;
use peopledir_common::config::ApiSettings;
use std::time::Duration;

use super::{ApiError, InferenceKind, UserApi};

const USER_AGENT: &str = concat!("peopledir/", env!("CARGO_PKG_VERSION"));

/// HTTP client for agify / genderize / nationalize
///
/// Each call is a single GET with no retry. The body is read to the end
/// before returning, so the connection goes back to the pool on every path.
pub struct HttpUserApi {
    http_client: reqwest::Client,
    age_url: String,
    gender_url: String,
    nation_url: String,
}

impl HttpUserApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        Self::with_timeout(settings, settings.timeout())
    }

    pub fn with_timeout(settings: &ApiSettings, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            age_url: settings.age_url.clone(),
            gender_url: settings.gender_url.clone(),
            nation_url: settings.nation_url.clone(),
        })
    }

    fn base_url(&self, kind: InferenceKind) -> &str {
        match kind {
            InferenceKind::Age => &self.age_url,
            InferenceKind::Gender => &self.gender_url,
            InferenceKind::Nation => &self.nation_url,
        }
    }
}

fn map_transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network(err.to_string())
    }
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn fetch(&self, kind: InferenceKind, name: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.base_url(kind);

        tracing::debug!(kind = %kind, name = %name, url = %url, "Querying inference API");

        let response = self
            .http_client
            .get(url)
            .query(&[("name", name)])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ApiError::Status(status.as_u16(), error_text));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;

        tracing::debug!(kind = %kind, name = %name, bytes = body.len(), "Inference API answered");

        Ok(body.to_vec())
    }
}
