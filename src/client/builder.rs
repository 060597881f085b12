use crate::client::core::EnreachClient;
use crate::config::{ClientConfig, PollPolicy};
use crate::transport::discovery::{authenticate_with_password, discover_api_endpoint};
use crate::transport::http::{build_http_client, normalize_endpoint};
use crate::transport::{decode, ApiInvoker, ApiRequest, HttpTransport};
use crate::types::CurrentUser;
use crate::{Error, ErrorContext, Result};
use keyring::Entry;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const KEYRING_SERVICE: &str = "enreachvoice";

enum Credential {
    SecretKey(String),
    Password(String),
}

/// Builder for [`EnreachClient`].
///
/// Starts from [`ClientConfig::from_env`]; setters override it.
pub struct EnreachClientBuilder {
    username: Option<String>,
    secret_key: Option<String>,
    password: Option<String>,
    use_keyring: bool,
    config: ClientConfig,
}

impl EnreachClientBuilder {
    pub fn new() -> Self {
        Self {
            username: None,
            secret_key: None,
            password: None,
            use_keyring: true,
            config: ClientConfig::from_env(),
        }
    }

    /// User email address.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Exchanged for a secret key at build time.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Look up the secret key in the OS keyring when none is given (default on).
    pub fn use_keyring(mut self, enable: bool) -> Self {
        self.use_keyring = enable;
        self
    }

    pub fn discovery_url(mut self, url: impl Into<String>) -> Self {
        self.config.discovery_url = url.into();
        self
    }

    /// Use this endpoint directly instead of asking the discovery service.
    pub fn api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.api_endpoint = Some(endpoint.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn transcript_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.config.transcript_poll = policy;
        self
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve the endpoint, authenticate and load the current user.
    pub async fn build(self) -> Result<EnreachClient> {
        let username = self
            .username
            .clone()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| {
                Error::validation_with_context(
                    "username is required",
                    ErrorContext::new()
                        .with_field_path("username")
                        .with_source("client_builder"),
                )
            })?;
        let credential = self.credential(&username)?;
        let config = self.config;

        let http = build_http_client(&config)?;
        let api_endpoint = match config.api_endpoint.as_deref() {
            Some(endpoint) => normalize_endpoint(endpoint)?,
            None => discover_api_endpoint(&http, &config.discovery_url, &username).await?,
        };

        let secret_key = match credential {
            Credential::SecretKey(key) => key,
            Credential::Password(password) => {
                debug!("exchanging password for secret key");
                authenticate_with_password(&http, &api_endpoint, &username, &password).await?
            }
        };

        let transport = HttpTransport::new(&api_endpoint, username.clone(), secret_key, &config)?;
        let me = transport.invoke(ApiRequest::get("users/me")).await?;
        let user: CurrentUser = decode(me, "users/me")?;
        info!(username = %username, user_id = %user.id, api_endpoint = %api_endpoint, "client ready");

        Ok(EnreachClient {
            invoker: Arc::new(transport),
            username,
            user_id: user.id,
            api_endpoint,
            config,
        })
    }

    /// Explicit secret key, explicit password, OS keyring, then `ENREACH_SECRET_KEY`.
    fn credential(&self, username: &str) -> Result<Credential> {
        if let Some(key) = self.secret_key.clone().filter(|k| !k.is_empty()) {
            debug!("using provided secret key");
            return Ok(Credential::SecretKey(key));
        }
        if let Some(password) = self.password.clone().filter(|p| !p.is_empty()) {
            return Ok(Credential::Password(password));
        }
        if self.use_keyring {
            if let Some(key) = keyring_secret(username) {
                debug!("using secret key from keyring");
                return Ok(Credential::SecretKey(key));
            }
        }
        if let Some(key) = std::env::var("ENREACH_SECRET_KEY")
            .ok()
            .filter(|k| !k.is_empty())
        {
            debug!("using secret key from environment");
            return Ok(Credential::SecretKey(key));
        }
        Err(Error::validation_with_context(
            "Either secret key or password must be provided",
            ErrorContext::new()
                .with_field_path("secret_key")
                .with_source("client_builder"),
        ))
    }
}

impl Default for EnreachClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn keyring_secret(username: &str) -> Option<String> {
    let entry = Entry::new(KEYRING_SERVICE, username).ok()?;
    entry.get_password().ok().filter(|k| !k.is_empty())
}
