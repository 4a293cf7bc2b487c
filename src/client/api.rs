use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use url::Url;

use crate::client::ContiguityError;
use crate::client::http::{HttpRequest, HttpTransport};
use crate::domain::{ApiToken, ConfigError, Envelope, Response};
use crate::transport::{ApiStatus, Endpoint, ResponseFormatError, decode_error_envelope, normalize};

/// Shared request pipeline behind every resource handle.
pub(crate) struct Api {
    token: ApiToken,
    base_url: Url,
    user_agent: String,
    api_version: String,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api")
            .field("token", &self.token)
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl Api {
    pub fn new(
        token: ApiToken,
        base_url: Url,
        user_agent: String,
        api_version: String,
        http: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            token,
            base_url,
            user_agent,
            api_version,
            http,
        }
    }

    /// Validate, send, and normalize; returns the response in wrapped form.
    pub async fn execute_raw<E: Endpoint>(
        &self,
        endpoint: &E,
    ) -> Result<Envelope<E::Data>, ContiguityError> {
        endpoint.validate()?;
        let request = self.prepare(endpoint)?;
        let raw = self.dispatch(request).await?;
        normalize::<E::Data>(raw).map_err(|err| {
            tracing::warn!(error = %err, "unexpected response shape");
            ContiguityError::from(err)
        })
    }

    pub async fn execute<E: Endpoint>(
        &self,
        endpoint: &E,
    ) -> Result<Response<E::Data>, ContiguityError> {
        self.execute_raw(endpoint).await.map(Envelope::into_response)
    }

    fn prepare<E: Endpoint>(&self, endpoint: &E) -> Result<HttpRequest, ConfigError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ConfigError::InvalidBaseUrl {
                url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .push(E::BASE.as_str())
            .extend(endpoint.path());

        Ok(HttpRequest {
            method: E::METHOD,
            url: url.into(),
            headers: vec![
                (
                    "Authorization".to_owned(),
                    format!("Bearer {}", self.token.as_str()),
                ),
                ("Content-Type".to_owned(), "application/json".to_owned()),
                ("User-Agent".to_owned(), self.user_agent.clone()),
                (
                    "X-Contiguity-API-Version".to_owned(),
                    self.api_version.clone(),
                ),
            ],
            body: endpoint.body(),
        })
    }

    async fn dispatch(&self, request: HttpRequest) -> Result<Value, ContiguityError> {
        let method = request.method.as_str();
        let url = request.url.clone();
        tracing::debug!(method, url = %url, "sending request");

        let response = self.http.send(request).await.map_err(|err| {
            tracing::warn!(method, url = %url, error = %err, "request failed");
            ContiguityError::Api {
                status: ApiStatus::Code(500),
                message: err.to_string(),
                source: Some(err),
            }
        })?;

        if !(200..=299).contains(&response.status) {
            let envelope = decode_error_envelope(response.status, &response.body);
            tracing::warn!(
                method,
                url = %url,
                http_status = response.status,
                status = %envelope.status,
                message = %envelope.message,
                "API returned an error"
            );
            return Err(ContiguityError::Api {
                status: envelope.status,
                message: envelope.message,
                source: None,
            });
        }

        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Object(Default::default()));
        }
        serde_json::from_slice(&response.body).map_err(|err| {
            tracing::warn!(method, url = %url, error = %err, "response body is not JSON");
            ContiguityError::from(ResponseFormatError::new(err))
        })
    }
}
