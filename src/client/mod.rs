//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod api;
mod http;
mod resources;

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::{ApiToken, ConfigError, ValidationError};
use crate::transport::{ApiStatus, ResponseFormatError};
use crate::webhook::{MalformedPayload, Webhook};

use self::api::Api;

pub use self::http::{
    BoxFuture, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError,
};
pub use self::resources::{
    Agreements, Domains, Email, Entitlements, Imessage, Lease, Otp, ReverseOtp, Text, Whatsapp,
};

pub const DEFAULT_BASE_URL: &str = "https://api.contiguity.com";
pub const DEFAULT_API_VERSION: &str = "v2025.8.20";
const DEFAULT_USER_AGENT: &str = concat!("contiguity-rs/", env!("CARGO_PKG_VERSION"));

/// Environment variables consulted by [`Contiguity::from_env`], in order.
pub const TOKEN_ENV_VARS: [&str; 2] = ["CONTIGUITY_API_KEY", "CONTIGUITY_TOKEN"];

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`Contiguity`] and its resource handles.
pub enum ContiguityError {
    /// The client itself is misconfigured (token, base URL, HTTP client).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Request parameters were rejected before anything was sent.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Non-2xx response, or the request never completed (status 500, with the
    /// transport error as source).
    #[error("{message}")]
    Api {
        status: ApiStatus,
        message: String,
        #[source]
        source: Option<TransportError>,
    },

    /// A 2xx response did not have the expected shape.
    #[error(transparent)]
    ResponseFormat(#[from] ResponseFormatError),

    /// An inbound webhook body could not be parsed.
    #[error(transparent)]
    Webhook(#[from] MalformedPayload),
}

impl ContiguityError {
    pub fn status(&self) -> ApiStatus {
        match self {
            Self::Config(err) => ApiStatus::Text(err.status().to_owned()),
            Self::Validation(_) => ApiStatus::Text("validation_error".to_owned()),
            Self::Api { status, .. } => status.clone(),
            Self::ResponseFormat(err) => ApiStatus::Text(err.status().to_owned()),
            Self::Webhook(_) => ApiStatus::Text("invalid_webhook_payload".to_owned()),
        }
    }
}

#[derive(Clone)]
/// Builder for [`Contiguity`].
///
/// Use this when you need a custom base URL, timeout, user agent, API version, or
/// [`HttpTransport`].
pub struct ContiguityBuilder {
    token: String,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    api_version: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl std::fmt::Debug for ContiguityBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContiguityBuilder")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("api_version", &self.api_version)
            .field("custom_transport", &self.transport.is_some())
            .finish_non_exhaustive()
    }
}

impl ContiguityBuilder {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
            api_version: None,
            transport: None,
        }
    }

    /// Builder with the token taken from [`TOKEN_ENV_VARS`].
    pub fn from_env() -> Result<Self, ConfigError> {
        TOKEN_ENV_VARS
            .iter()
            .find_map(|name| std::env::var(name).ok())
            .map(Self::new)
            .ok_or(ConfigError::MissingToken)
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Timeout for the whole request. Ignored when a custom transport is set.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Value of the `X-Contiguity-API-Version` header.
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    pub fn transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn build(self) -> Result<Contiguity, ConfigError> {
        let token = ApiToken::new(self.token)?;
        let base_url = Url::parse(&self.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
            })?;

        let http: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                let client = builder.build().map_err(|err| ConfigError::HttpClient {
                    message: err.to_string(),
                })?;
                Arc::new(ReqwestTransport::new(client))
            }
        };

        let api = Api::new(
            token,
            base_url,
            self.user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
            self.api_version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_owned()),
            http,
        );
        Ok(Contiguity::from_api(Arc::new(api)))
    }
}

#[derive(Debug, Clone)]
/// High-level Contiguity client.
///
/// Holds one handle per API area; all of them share the token, configuration, and
/// HTTP transport. Cloning is cheap.
pub struct Contiguity {
    text: Text,
    email: Email,
    otp: Otp,
    imessage: Imessage,
    whatsapp: Whatsapp,
    domains: Domains,
    lease: Lease,
    entitlements: Entitlements,
    agreements: Agreements,
    webhook: Webhook,
}

impl Contiguity {
    /// Create a client with default settings.
    ///
    /// For more customization, use [`Contiguity::builder`].
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        ContiguityBuilder::new(token).build()
    }

    /// Create a client with the token from `CONTIGUITY_API_KEY` or `CONTIGUITY_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        ContiguityBuilder::from_env()?.build()
    }

    pub fn builder(token: impl Into<String>) -> ContiguityBuilder {
        ContiguityBuilder::new(token)
    }

    fn from_api(api: Arc<Api>) -> Self {
        let entitlements = Entitlements::new(Arc::clone(&api));
        Self {
            text: Text::new(Arc::clone(&api)),
            email: Email::new(Arc::clone(&api)),
            otp: Otp::new(Arc::clone(&api)),
            imessage: Imessage::new(Arc::clone(&api)),
            whatsapp: Whatsapp::new(Arc::clone(&api)),
            domains: Domains::new(Arc::clone(&api)),
            lease: Lease::new(api),
            agreements: Agreements::new(entitlements.clone()),
            entitlements,
            webhook: Webhook::new(),
        }
    }

    pub fn text(&self) -> &Text {
        &self.text
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn otp(&self) -> &Otp {
        &self.otp
    }

    pub fn imessage(&self) -> &Imessage {
        &self.imessage
    }

    pub fn whatsapp(&self) -> &Whatsapp {
        &self.whatsapp
    }

    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    pub fn lease(&self) -> &Lease {
        &self.lease
    }

    pub fn entitlements(&self) -> &Entitlements {
        &self.entitlements
    }

    pub fn agreements(&self) -> &Agreements {
        &self.agreements
    }

    pub fn webhook(&self) -> &Webhook {
        &self.webhook
    }

    /// Whether every resource handle is available.
    ///
    /// Construction either yields all handles or fails, so a built client is always ready.
    pub fn ready(&self) -> bool {
        true
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::{Arc, Mutex};

    use super::http::{BoxFuture, HttpRequest, HttpResponse, HttpTransport, TransportError};

    /// Records every request and answers each with the same canned response.
    #[derive(Debug, Clone)]
    pub struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        requests: Vec<HttpRequest>,
        response: Result<HttpResponse, String>,
    }

    impl FakeTransport {
        pub fn new(status: u16, body: impl Into<String>) -> Self {
            Self::with_response(Ok(HttpResponse {
                status,
                body: body.into().into_bytes(),
            }))
        }

        pub fn failing(message: impl Into<String>) -> Self {
            Self::with_response(Err(message.into()))
        }

        fn with_response(response: Result<HttpResponse, String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    requests: Vec::new(),
                    response,
                })),
            }
        }

        pub fn calls(&self) -> usize {
            self.state.lock().unwrap().requests.len()
        }

        pub fn last_request(&self) -> HttpRequest {
            self.state
                .lock()
                .unwrap()
                .requests
                .last()
                .cloned()
                .expect("no request was sent")
        }
    }

    impl HttpTransport for FakeTransport {
        fn send<'a>(
            &'a self,
            request: HttpRequest,
        ) -> BoxFuture<'a, Result<HttpResponse, TransportError>> {
            Box::pin(async move {
                let mut state = self.state.lock().unwrap();
                state.requests.push(request);
                state.response.clone().map_err(TransportError::from)
            })
        }
    }
}
