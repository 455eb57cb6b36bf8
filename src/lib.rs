//! Bindings for [etherscan.io web api](https://docs.etherscan.io/)
//!
//! Every call goes through one dispatch path: the query is serialized, the
//! call is admitted by a client-wide rate limiter, the exchange runs under
//! the configured timeout, and the response is classified into a success
//! payload, a remote API error, or a transport error. See
//! [`EtherscanError::kind`] for the failure taxonomy.

use errors::EtherscanError;
use rate_limit::RateLimiter;
use reqwest::{header, IntoUrl, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{borrow::Cow, num::NonZeroU32, time::Duration};
use tracing::{error, trace};

pub mod account;
pub mod blocks;
pub mod chain;
pub mod contract;
pub mod errors;
pub mod gas;
pub mod logs;
pub mod proxy;
pub mod stats;
pub mod transaction;
pub mod utils;
pub mod verify;

mod rate_limit;

pub use chain::Chain;
pub use errors::ErrorKind;

pub(crate) type Result<T, E = EtherscanError> = std::result::Result<T, E>;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_REQUESTS_PER_SECOND: NonZeroU32 = match NonZeroU32::new(5) {
    Some(n) => n,
    None => unreachable!(),
};

/// The Etherscan.io API client.
#[derive(Clone, Debug)]
pub struct Client {
    /// Client that executes HTTP requests
    client: reqwest::Client,
    /// Etherscan API key
    api_key: String,
    /// Etherscan API endpoint like <https://api(-chain).etherscan.io/api>
    etherscan_api_url: Url,
    /// Etherscan base endpoint like <https://etherscan.io>
    etherscan_url: Url,
    /// Admission gate shared by every call made through this client
    rate_limiter: RateLimiter,
}

impl Client {
    /// Creates a `ClientBuilder` to configure a `Client`.
    /// This is the same as `ClientBuilder::default()`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use etherscan_api::{Chain, Client};
    /// let client = Client::builder().with_api_key("<API KEY>").chain(Chain::Mainnet).unwrap().build().unwrap();
    /// ```
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a new client with the correct endpoints based on the chain and provided API key
    pub fn new(chain: Chain, api_key: impl Into<String>) -> Result<Self> {
        Client::builder().with_api_key(api_key).chain(chain)?.build()
    }

    /// Create a new client with the correct endpoints based on the chain and the API key
    /// from the chain's environment variable, e.g. `ETHERSCAN_API_KEY`
    pub fn new_from_env(chain: Chain) -> Result<Self> {
        let var = chain.api_key_env().ok_or(EtherscanError::ChainNotSupported(chain))?;
        Self::new(chain, std::env::var(var)?)
    }

    pub fn etherscan_api_url(&self) -> &Url {
        &self.etherscan_api_url
    }

    pub fn etherscan_url(&self) -> &Url {
        &self.etherscan_url
    }

    /// Reconfigure admission control for calls made after this point.
    ///
    /// Calls already admitted or in flight finish under the configuration
    /// they captured at admission.
    pub fn set_rate_limit(&self, enabled: bool, max_per_second: NonZeroU32) {
        self.rate_limiter.configure(enabled, max_per_second);
    }

    /// Return the URL for the given block number
    pub fn block_url(&self, block: u64) -> String {
        format!("{}block/{block}", self.etherscan_url)
    }

    /// Return the URL for the given address
    pub fn address_url(&self, address: &str) -> String {
        format!("{}address/{address}", self.etherscan_url)
    }

    /// Return the URL for the given transaction hash
    pub fn transaction_url(&self, tx_hash: &str) -> String {
        format!("{}tx/{tx_hash}", self.etherscan_url)
    }

    /// Return the URL for the given token contract
    pub fn token_url(&self, token_hash: &str) -> String {
        format!("{}token/{token_hash}", self.etherscan_url)
    }

    /// Execute a GET request with parameters and classify the enveloped response.
    pub(crate) async fn get_json<T: DeserializeOwned, Q: Serialize>(
        &self,
        query: &Q,
    ) -> Result<Response<T>> {
        let res = self.get(query).await?;
        self.sanitize_response(res)
    }

    /// Execute a GET request against a proxy endpoint and unwrap the
    /// JSON-RPC shaped response.
    pub(crate) async fn get_rpc<T: DeserializeOwned, Q: Serialize>(&self, query: &Q) -> Result<T> {
        let res = self.get(query).await?;
        self.sanitize_rpc_response(res)
    }

    /// Execute a POST request with a JSON body; the raw parsed body is the
    /// success value once the envelope check has run.
    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize>(&self, body: &B) -> Result<T> {
        let res = self.post(body).await?;
        let res = res.as_str();
        if let Ok(envelope) = serde_json::from_str::<Response<serde_json::Value>>(res) {
            if let Some(err) = classify_envelope(&envelope) {
                return Err(err);
            }
        }
        serde_json::from_str(res).map_err(|err| {
            error!(target: "etherscan", ?res, "Failed to deserialize response: {}", err);
            EtherscanError::Serde(err)
        })
    }

    /// Execute a POST request against a proxy endpoint and unwrap the
    /// JSON-RPC shaped response.
    pub(crate) async fn post_rpc<T: DeserializeOwned, B: Serialize>(&self, body: &B) -> Result<T> {
        let res = self.post(body).await?;
        self.sanitize_rpc_response(res)
    }

    /// Execute a GET request with parameters, without sanity checking the response.
    async fn get<Q: Serialize>(&self, query: &Q) -> Result<String> {
        self.rate_limiter.acquire().await;
        trace!(target: "etherscan", "GET {}", self.etherscan_api_url);
        let response = self
            .client
            .get(self.etherscan_api_url.clone())
            .header(header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;
        self.read_body(response).await
    }

    /// Execute a POST request with a JSON body, without sanity checking the response.
    async fn post<B: Serialize>(&self, body: &B) -> Result<String> {
        self.rate_limiter.acquire().await;
        trace!(target: "etherscan", "POST {}", self.etherscan_api_url);
        let response = self.client.post(self.etherscan_api_url.clone()).json(body).send().await?;
        self.read_body(response).await
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<String> {
        let status = response.status();
        if !status.is_success() {
            return Err(EtherscanError::BadHttpStatus {
                status: status.as_u16(),
                text: status.canonical_reason().unwrap_or_default().to_string(),
            })
        }
        Ok(response.text().await?)
    }

    /// Perform sanity checks on a response and deserialize it into a [Response].
    fn sanitize_response<T: DeserializeOwned>(&self, res: impl AsRef<str>) -> Result<Response<T>> {
        let res = res.as_ref();
        // Probe with an opaque `result` first, so API-level failures are
        // classified before the payload shape is enforced.
        let envelope: Response<serde_json::Value> = serde_json::from_str(res).map_err(|err| {
            error!(target: "etherscan", ?res, "Failed to deserialize response: {}", err);
            EtherscanError::Serde(err)
        })?;
        if let Some(err) = classify_envelope(&envelope) {
            return Err(err);
        }
        let result: T = serde_json::from_value(envelope.result).map_err(|err| {
            error!(target: "etherscan", ?res, "Failed to deserialize result: {}", err);
            EtherscanError::Serde(err)
        })?;
        Ok(Response { status: envelope.status, message: envelope.message, result })
    }

    /// Unwrap a proxy response. Proxy failures can still arrive in the
    /// classic envelope shape, so that is probed before the JSON-RPC shape.
    fn sanitize_rpc_response<T: DeserializeOwned>(&self, res: impl AsRef<str>) -> Result<T> {
        let res = res.as_ref();
        if let Ok(envelope) = serde_json::from_str::<Response<serde_json::Value>>(res) {
            if let Some(err) = classify_envelope(&envelope) {
                return Err(err);
            }
        }
        let response: RpcResponseData<T> = serde_json::from_str(res).map_err(|err| {
            error!(target: "etherscan", ?res, "Failed to deserialize response: {}", err);
            EtherscanError::Serde(err)
        })?;
        match response {
            RpcResponseData::Error { error } => {
                Err(EtherscanError::JsonRpc { code: error.code, message: error.message })
            }
            RpcResponseData::Success { result } => Ok(result),
        }
    }

    pub(crate) fn create_query<T: Serialize>(
        &self,
        module: &'static str,
        action: &'static str,
        other: T,
    ) -> Query<T> {
        Query {
            apikey: Cow::Borrowed(&self.api_key),
            module: Cow::Borrowed(module),
            action: Cow::Borrowed(action),
            other,
        }
    }
}

/// Classify an error-bearing envelope.
///
/// The API reports semantic failures with `status == "0"` and a message
/// prefixed `NOTOK`; the machine readable code rides in `result`.
fn classify_envelope(envelope: &Response<serde_json::Value>) -> Option<EtherscanError> {
    if envelope.status != "0" || !envelope.message.starts_with("NOTOK") {
        return None;
    }
    let code = match &envelope.result {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    Some(if code.starts_with("Max rate limit reached") {
        EtherscanError::RateLimitExceeded
    } else if code.to_lowercase() == "invalid api key" {
        EtherscanError::InvalidApiKey
    } else {
        EtherscanError::Api { code, message: envelope.message.clone() }
    })
}

#[derive(Clone, Debug)]
pub struct ClientBuilder {
    /// Client that executes HTTP requests
    client: Option<reqwest::Client>,
    /// Etherscan API key
    api_key: Option<String>,
    /// Etherscan API endpoint like <https://api(-chain).etherscan.io/api>
    etherscan_api_url: Option<Url>,
    /// Etherscan base endpoint like <https://etherscan.io>
    etherscan_url: Option<Url>,
    /// Request timeout, applied when the builder constructs its own client
    timeout: Duration,
    /// Whether admission control is enabled
    rate_limit_enabled: bool,
    /// Admission ceiling per one-second window
    max_requests_per_second: NonZeroU32,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            api_key: None,
            etherscan_api_url: None,
            etherscan_url: None,
            timeout: DEFAULT_TIMEOUT,
            rate_limit_enabled: true,
            max_requests_per_second: DEFAULT_MAX_REQUESTS_PER_SECOND,
        }
    }
}

// === impl ClientBuilder ===

impl ClientBuilder {
    /// Configures the etherscan url and api url for the given chain
    ///
    /// # Errors
    ///
    /// Fails if the chain is not supported by etherscan
    pub fn chain(self, chain: Chain) -> Result<Self> {
        let (api, url) =
            chain.etherscan_urls().ok_or(EtherscanError::ChainNotSupported(chain))?;
        self.with_api_url(api)?.with_url(url)
    }

    /// Configures the etherscan url
    ///
    /// # Errors
    ///
    /// Fails if the `etherscan_url` is not a valid `Url`
    pub fn with_url(mut self, etherscan_url: impl IntoUrl) -> Result<Self> {
        self.etherscan_url = Some(etherscan_url.into_url()?);
        Ok(self)
    }

    /// Configures the etherscan api url
    ///
    /// # Errors
    ///
    /// Fails if the `etherscan_api_url` is not a valid `Url`
    pub fn with_api_url(mut self, etherscan_api_url: impl IntoUrl) -> Result<Self> {
        self.etherscan_api_url = Some(etherscan_api_url.into_url()?);
        Ok(self)
    }

    /// Configures the `reqwest::Client`.
    ///
    /// A caller-provided client carries its own timeout configuration; the
    /// builder's [`with_timeout`](Self::with_timeout) only applies to the
    /// client the builder constructs itself.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Configures the etherscan api key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Configures the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configures admission control for the built client
    pub fn with_rate_limit(mut self, enabled: bool, max_per_second: NonZeroU32) -> Self {
        self.rate_limit_enabled = enabled;
        self.max_requests_per_second = max_per_second;
        self
    }

    /// Returns a Client that uses this ClientBuilder configuration.
    ///
    /// # Errors
    /// if required fields are missing or empty:
    ///   - `api_key`
    ///   - `etherscan_api_url`
    ///   - `etherscan_url`
    pub fn build(self) -> Result<Client> {
        let ClientBuilder {
            client,
            api_key,
            etherscan_api_url,
            etherscan_url,
            timeout,
            rate_limit_enabled,
            max_requests_per_second,
        } = self;

        let api_key = match api_key {
            Some(key) if !key.is_empty() => key,
            _ => return Err(EtherscanError::Builder("etherscan api key".to_string())),
        };
        let client = match client {
            Some(client) => client,
            None => reqwest::Client::builder().timeout(timeout).build()?,
        };

        let client = Client {
            client,
            api_key,
            etherscan_api_url: etherscan_api_url
                .ok_or_else(|| EtherscanError::Builder("etherscan api url".to_string()))?,
            etherscan_url: etherscan_url
                .ok_or_else(|| EtherscanError::Builder("etherscan url".to_string()))?,
            rate_limiter: RateLimiter::new(rate_limit_enabled, max_requests_per_second),
        };
        Ok(client)
    }
}

/// The API response type
#[derive(Debug, Clone, Deserialize)]
pub struct Response<T> {
    pub status: String,
    pub message: String,
    pub result: T,
}

/// The error object of a JSON-RPC shaped proxy response
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RpcResponseData<T> {
    Error { error: JsonRpcError },
    Success { result: T },
}

/// The type that gets serialized as query
#[derive(Clone, Debug, Serialize)]
pub(crate) struct Query<'a, T: Serialize> {
    apikey: Cow<'a, str>,
    module: Cow<'a, str>,
    action: Cow<'a, str>,
    #[serde(flatten)]
    other: T,
}
