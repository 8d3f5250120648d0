//! Blocking client for the Amadeus Self-Service API.
//!
//! Every call blocks the calling thread until the provider answers, so the
//! async side only reaches it through [`crate::pool::BlockingPool`].

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Deserialize;
use skyfare_core::{ProviderError, ProviderResponse};
use tracing::{debug, info};
use ureq::http::Response;
use ureq::{Agent, Body};

use crate::app_config::AmadeusConfig;

/// Flat query parameters, keyed by the provider's own parameter names.
pub type QueryParams = BTreeMap<&'static str, String>;

const TOKEN_PATH: &str = "/v1/security/oauth2/token";
const FLIGHT_OFFERS_PATH: &str = "/v2/shopping/flight-offers";
const FLIGHT_DATES_PATH: &str = "/v1/shopping/flight-dates";
const LOCATIONS_PATH: &str = "/v1/reference-data/locations";

/// Tokens are refreshed this long before the provider says they expire.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(30);

/// Synchronous vendor client: one call per provider resource.
pub trait ProviderClient: Send + Sync + 'static {
    fn flight_offers(&self, params: &QueryParams) -> Result<ProviderResponse, ProviderError>;

    fn flight_dates(&self, params: &QueryParams) -> Result<ProviderResponse, ProviderError>;

    fn locations(&self, params: &QueryParams) -> Result<ProviderResponse, ProviderError>;
}

struct AccessToken {
    value: String,
    expires_at: Instant,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// Both error shapes the provider uses: `errors` on API resources,
/// `error_description` on the token endpoint.
#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
    error_description: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEntry {
    title: Option<String>,
    detail: Option<String>,
}

impl ErrorBody {
    fn description(self) -> Option<String> {
        if let Some(description) = self.error_description {
            return Some(description);
        }

        let parts: Vec<String> = self
            .errors
            .into_iter()
            .filter_map(|e| e.detail.or(e.title))
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}

pub struct AmadeusClient {
    agent: Agent,
    base_url: String,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<AccessToken>>,
}

impl AmadeusClient {
    pub fn new(base_url: &str, client_id: &str, client_secret: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            token: Mutex::new(None),
        }
    }

    /// `None` when the configuration lacks either credential.
    pub fn from_config(config: &AmadeusConfig, timeout: Duration) -> Option<Self> {
        let (client_id, client_secret) = config.credentials()?;
        Some(Self::new(&config.base_url(), client_id, client_secret, timeout))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn access_token(&self) -> Result<String, ProviderError> {
        // Held across the token request so concurrent callers share one refresh.
        let mut cached = self
            .token
            .lock()
            .map_err(|_| ProviderError::WorkerFailed("token cache poisoned".to_string()))?;

        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }

        let token = self.request_token()?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    fn request_token(&self) -> Result<AccessToken, ProviderError> {
        info!("Requesting Amadeus access token");
        let url = format!("{}{}", self.base_url, TOKEN_PATH);

        let mut response = self
            .agent
            .post(&url)
            .send_form([
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(api_error(&mut response));
        }

        let token: TokenResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        Ok(AccessToken {
            value: token.access_token,
            expires_at: Instant::now() + lifetime,
        })
    }

    fn get(&self, path: &str, params: &QueryParams) -> Result<ProviderResponse, ProviderError> {
        let token = self.access_token()?;
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, params);

        let request = params
            .iter()
            .fold(self.agent.get(&url), |request, (key, value)| request.query(*key, value));

        let mut response = request
            .header("Authorization", format!("Bearer {}", token))
            .call()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(api_error(&mut response));
        }

        response
            .body_mut()
            .read_json::<ProviderResponse>()
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

impl ProviderClient for AmadeusClient {
    fn flight_offers(&self, params: &QueryParams) -> Result<ProviderResponse, ProviderError> {
        self.get(FLIGHT_OFFERS_PATH, params)
    }

    fn flight_dates(&self, params: &QueryParams) -> Result<ProviderResponse, ProviderError> {
        self.get(FLIGHT_DATES_PATH, params)
    }

    fn locations(&self, params: &QueryParams) -> Result<ProviderResponse, ProviderError> {
        self.get(LOCATIONS_PATH, params)
    }
}

fn api_error(response: &mut Response<Body>) -> ProviderError {
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    ProviderError::Api {
        status,
        description: describe_error(status, &body),
    }
}

fn describe_error(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::description)
        .unwrap_or_else(|| format!("HTTP {}", status))
}
