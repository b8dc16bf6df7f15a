//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};
use url::Url;

use crate::domain::{
    ApiKey, BalanceResponse, CheckStatus, CostResponse, ErrorCode, GetCost, Login, Password,
    SendResponse, SendSms, SenderId, StatusReport, ValidationError,
};
use crate::transport::{Decoded, TransportError};

const DEFAULT_BASE_URL: &str = "https://smsc.ru/sys/";
const DEFAULT_SENDER: &str = "SMSC.ru";

const SEND_PATH: &str = "send.php";
const STATUS_PATH: &str = "status.php";
const BALANCE_PATH: &str = "balance.php";

const ENV_LOGIN: &str = "SMSC_LOGIN";
const ENV_PASSWORD: &str = "SMSC_PASSWORD";
const ENV_API_KEY: &str = "SMSC_API_KEY";
const ENV_SENDER: &str = "SMSC_SENDER";
const ENV_BASE_URL: &str = "SMSC_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "SMSC_TIMEOUT_SECS";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// How request parameters travel to SMSC.ru.
pub enum HttpMethod {
    /// Parameters in the query string.
    #[default]
    Get,
    /// Parameters in an `application/x-www-form-urlencoded` body.
    Post,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn call<'a>(
        &'a self,
        method: HttpMethod,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn call<'a>(
        &'a self,
        method: HttpMethod,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let request = match method {
                HttpMethod::Get => self.client.get(url_with_query(url, &params)?),
                HttpMethod::Post => self.client.post(url).form(&params),
            };
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

/// Percent-encode `params` into the query string of `url`.
fn url_with_query(url: &str, params: &[(String, String)]) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(url)?;
    url.query_pairs_mut().extend_pairs(params);
    Ok(url)
}

#[derive(Debug, Clone)]
/// Authentication credentials for SMSC.ru API calls.
pub enum Auth {
    /// Authenticate via account `login` + `psw`.
    LoginPassword { login: Login, password: Password },
    /// Authenticate via `apikey`.
    ApiKey(ApiKey),
}

impl Auth {
    /// Create [`Auth::LoginPassword`] and validate that both parts are non-empty.
    ///
    /// `password` may also be the lowercase MD5 hash of the password.
    pub fn login_password(
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::LoginPassword {
            login: Login::new(login)?,
            password: Password::new(password)?,
        })
    }

    /// Create [`Auth::ApiKey`] and validate that the key is non-empty after trimming.
    pub fn api_key(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self::ApiKey(ApiKey::new(value)?))
    }

    fn push_query_params(&self, params: &mut Vec<(String, String)>) {
        match self {
            Self::LoginPassword { login, password } => {
                params.push((Login::FIELD.to_owned(), login.as_str().to_owned()));
                params.push((Password::FIELD.to_owned(), password.as_str().to_owned()));
            }
            Self::ApiKey(key) => {
                params.push((ApiKey::FIELD.to_owned(), key.as_str().to_owned()));
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmscClient`].
///
/// Nothing is retried: every failure is surfaced to the caller as-is.
pub enum SmscError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body could not be decoded into the expected result.
    #[error("protocol error: {0}")]
    Protocol(#[source] Box<dyn StdError + Send + Sync>),

    /// SMSC.ru rejected the request (`error` / `error_code` in the reply).
    #[error(
        "SMSC.ru error {}: {}",
        .code.as_i32(),
        .message.as_deref().unwrap_or("no description")
    )]
    Vendor {
        code: ErrorCode,
        message: Option<String>,
    },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Environment configuration is missing or invalid.
    #[error("configuration error: {key}: {reason}")]
    Config { key: &'static str, reason: String },
}

impl SmscError {
    /// The vendor error code, if SMSC.ru rejected the request.
    pub fn vendor_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Vendor { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`SmscClient`].
///
/// Use this when you need to customize the endpoint, sender, method, timeout, or user-agent.
pub struct SmscClientBuilder {
    auth: Auth,
    base_url: String,
    sender: Option<SenderId>,
    method: HttpMethod,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl SmscClientBuilder {
    /// Create a builder with the default base URL and the `SMSC.ru` sender.
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            base_url: DEFAULT_BASE_URL.to_owned(),
            sender: SenderId::new(DEFAULT_SENDER).ok(),
            method: HttpMethod::Get,
            timeout: None,
            user_agent: None,
        }
    }

    /// Configure the builder from the process environment.
    ///
    /// Reads `SMSC_API_KEY`, or `SMSC_LOGIN` and `SMSC_PASSWORD`, plus the optional
    /// `SMSC_SENDER`, `SMSC_BASE_URL` and `SMSC_TIMEOUT_SECS`. Empty values count as unset.
    pub fn from_env() -> Result<Self, SmscError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SmscError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &'static str| {
            var(key).ok_or_else(|| SmscError::Config {
                key,
                reason: "variable is not set".to_owned(),
            })
        };

        let auth = match var(ENV_API_KEY) {
            Some(key) => Auth::api_key(key)?,
            None => Auth::login_password(required(ENV_LOGIN)?, required(ENV_PASSWORD)?)?,
        };

        let mut builder = Self::new(auth);
        if let Some(sender) = var(ENV_SENDER) {
            builder = builder.sender(SenderId::new(sender)?);
        }
        if let Some(raw) = var(ENV_BASE_URL) {
            let base_url = normalize_base_url(&raw).map_err(|err| SmscError::Config {
                key: ENV_BASE_URL,
                reason: err.to_string(),
            })?;
            builder = builder.base_url(base_url);
        }
        if let Some(raw) = var(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| SmscError::Config {
                key: ENV_TIMEOUT_SECS,
                reason: format!("expected whole seconds, got {raw:?}"),
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder)
    }

    /// Override the API base URL (`https://smsc.ru/sys/` by default).
    ///
    /// Endpoint scripts such as `send.php` are resolved relative to it.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Default sender used when a [`crate::Message`] does not name one.
    pub fn sender(mut self, sender: SenderId) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Leave `sender` out so the account's default sender applies.
    pub fn no_default_sender(mut self) -> Self {
        self.sender = None;
        self
    }

    /// Choose GET (default) or form-encoded POST for every call.
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`SmscClient`].
    pub fn build(self) -> Result<SmscClient, SmscError> {
        let base_url = normalize_base_url(&self.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| SmscError::Transport(Box::new(err)))?;

        Ok(SmscClient {
            auth: self.auth,
            sender: self.sender,
            endpoints: Endpoints::under(&base_url),
            method: self.method,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ValidationError> {
    let invalid = || ValidationError::InvalidUrl {
        input: raw.to_owned(),
    };
    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(invalid());
    }

    let mut base = url.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(base)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Endpoints {
    send: String,
    status: String,
    balance: String,
}

impl Endpoints {
    fn under(base_url: &str) -> Self {
        Self {
            send: format!("{base_url}{SEND_PATH}"),
            status: format!("{base_url}{STATUS_PATH}"),
            balance: format!("{base_url}{BALANCE_PATH}"),
        }
    }
}

#[derive(Clone)]
/// High-level SMSC.ru client.
///
/// This type orchestrates request encoding, the HTTP round trip, and response decoding.
/// It holds no state between calls; clones share the underlying HTTP connection pool.
/// By default it talks to `https://smsc.ru/sys/` with GET requests and JSON replies
/// (`fmt=3`).
pub struct SmscClient {
    auth: Auth,
    sender: Option<SenderId>,
    endpoints: Endpoints,
    method: HttpMethod,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for SmscClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmscClient")
            .field("auth", &self.auth)
            .field("sender", &self.sender)
            .field("endpoints", &self.endpoints)
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

impl SmscClient {
    /// Create a client using the default endpoint and sender.
    ///
    /// For more customization, use [`SmscClient::builder`].
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            sender: SenderId::new(DEFAULT_SENDER).ok(),
            endpoints: Endpoints::under(DEFAULT_BASE_URL),
            method: HttpMethod::Get,
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(auth: Auth) -> SmscClientBuilder {
        SmscClientBuilder::new(auth)
    }

    /// Send a message through SMSC.ru.
    ///
    /// Errors:
    /// - [`SmscError::Transport`] / [`SmscError::HttpStatus`] for network or non-2xx failures,
    /// - [`SmscError::Vendor`] when SMSC.ru rejects the message,
    /// - [`SmscError::Protocol`] when the reply cannot be decoded.
    #[instrument(skip(self, request), fields(recipients = request.recipients().len()))]
    pub async fn send(&self, request: SendSms) -> Result<SendResponse, SmscError> {
        let params = crate::transport::encode_send_query(&request, self.sender.as_ref());
        let body = self.execute(&self.endpoints.send, params).await?;
        let response = accept(crate::transport::decode_send_json_response(&body))?;
        debug!(id = %response.id, count = response.count, "message accepted");
        Ok(response)
    }

    /// Ask SMSC.ru what a message would cost, without sending it.
    #[instrument(skip(self, request), fields(recipients = request.recipients().len()))]
    pub async fn get_cost(&self, request: GetCost) -> Result<CostResponse, SmscError> {
        let params = crate::transport::encode_get_cost_query(&request, self.sender.as_ref());
        let body = self.execute(&self.endpoints.send, params).await?;
        let response = accept(crate::transport::decode_get_cost_json_response(&body))?;
        debug!(count = response.count, cost = %response.cost, "cost reported");
        Ok(response)
    }

    /// Fetch delivery status for previously sent messages.
    ///
    /// Returns one report per message the vendor knows about.
    #[instrument(skip(self, request), fields(entries = request.entries().len()))]
    pub async fn get_status(&self, request: CheckStatus) -> Result<Vec<StatusReport>, SmscError> {
        let params = crate::transport::encode_check_status_query(&request);
        let body = self.execute(&self.endpoints.status, params).await?;
        let reports = accept(crate::transport::decode_check_status_json_response(
            &request, &body,
        ))?;
        debug!(reports = reports.len(), "status reported");
        Ok(reports)
    }

    /// Fetch the current account balance.
    #[instrument(skip(self))]
    pub async fn get_balance(&self) -> Result<BalanceResponse, SmscError> {
        let params = crate::transport::encode_get_balance_query();
        let body = self.execute(&self.endpoints.balance, params).await?;
        accept(crate::transport::decode_balance_json_response(&body))
    }

    async fn execute(
        &self,
        endpoint: &str,
        params: Vec<(String, String)>,
    ) -> Result<String, SmscError> {
        let mut query = Vec::<(String, String)>::with_capacity(params.len() + 2);
        self.auth.push_query_params(&mut query);
        query.extend(params);

        debug!(endpoint, method = ?self.method, "calling SMSC.ru");
        let response = self
            .http
            .call(self.method, endpoint, query)
            .await
            .map_err(SmscError::Transport)?;

        if !(200..=299).contains(&response.status) {
            warn!(endpoint, status = response.status, "unexpected HTTP status");
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(SmscError::HttpStatus {
                status: response.status,
                body,
            });
        }

        Ok(response.body)
    }
}

fn accept<T>(decoded: Result<Decoded<T>, TransportError>) -> Result<T, SmscError> {
    match decoded.map_err(|err| SmscError::Protocol(Box::new(err)))? {
        Decoded::Accepted(value) => Ok(value),
        Decoded::Rejected(rejection) => {
            warn!(
                code = rejection.code.as_i32(),
                error = rejection.message.as_deref().unwrap_or_default(),
                "request rejected by SMSC.ru"
            );
            Err(SmscError::Vendor {
                code: rejection.code,
                message: rejection.message,
            })
        }
    }
}
