//! Handles the initial configuration for the KERIA client.
//!
//! Call the [KeriaClientConfigBuilder] to create a new configuration.
//!
//! Example:
//! ```rust
//! use vlei_keria_client::config::KeriaClientConfigBuilder;
//! let config = KeriaClientConfigBuilder::default()
//!     .with_admin_url("http://127.0.0.1:3901")
//!     .with_boot_url("http://127.0.0.1:3903")
//!     .with_passcode("0123456789abcdefghijk")
//!     .with_operation_timeout(60_000)
//!     .build()
//!     .expect("bad KERIA client config");
//! ```

use crate::errors::KeriaClientError;
use std::time::Duration;
use url::Url;

/// A KERIA passcode salt must carry at least this many characters.
/// Only the first 21 characters are used as the keystore passcode.
pub const MIN_PASSCODE_LENGTH: usize = 21;

/// Configuration for the KERIA client.
///
/// Use the [KeriaClientConfigBuilder] to create a new configuration.
#[derive(Clone, Debug)]
pub struct KeriaClientConfig {
    pub(crate) admin_url: String,
    pub(crate) boot_url: String,
    pub(crate) passcode: String,
    pub(crate) alias: Option<String>,
    pub(crate) request_timeout: Duration,
    pub(crate) operation_timeout: Duration,
    pub(crate) operation_poll_interval: Duration,
    pub(crate) contact_cache_capacity: u32,
    pub(crate) contact_cache_ttl: u32,
}

/// KERIA client config builder to construct options required for the client.
/// You must at least set the admin URL, boot URL and passcode.
///
/// - admin_url: REQUIRED: The address of the agent admin interface.
/// - boot_url: REQUIRED: The address of the agent boot interface.
/// - passcode: REQUIRED: The keystore passcode salt for this client (>= 21 characters).
/// - alias: A friendly name registered with the agent on boot.
/// - request_timeout: The timeout for individual HTTP requests in milliseconds (default: 5000 (5 seconds)).
/// - operation_timeout: How long to wait for a long-running operation in milliseconds (default: 30000 (30 seconds)).
/// - operation_poll_interval: Delay between operation polls in milliseconds (default: 250).
/// - contact_cache_capacity: The maximum number of contacts to store in the local cache (default: 100).
/// - contact_cache_ttl: The time-to-live in seconds for each cached contact (default: 300 (5 Minutes)).
pub struct KeriaClientConfigBuilder {
    admin_url: Option<String>,
    boot_url: Option<String>,
    passcode: Option<String>,
    alias: Option<String>,
    request_timeout: u32,
    operation_timeout: u32,
    operation_poll_interval: u32,
    contact_cache_capacity: u32,
    contact_cache_ttl: u32,
}

impl Default for KeriaClientConfigBuilder {
    fn default() -> Self {
        Self {
            admin_url: None,
            boot_url: None,
            passcode: None,
            alias: None,
            request_timeout: 5_000,
            operation_timeout: 30_000,
            operation_poll_interval: 250,
            contact_cache_capacity: 100,
            contact_cache_ttl: 300,
        }
    }
}

impl KeriaClientConfigBuilder {
    /// Set the agent admin interface address.
    /// Example: `http://127.0.0.1:3901`
    pub fn with_admin_url(mut self, admin_url: &str) -> Self {
        self.admin_url = Some(admin_url.into());
        self
    }

    /// Set the agent boot interface address.
    /// Example: `http://127.0.0.1:3903`
    pub fn with_boot_url(mut self, boot_url: &str) -> Self {
        self.boot_url = Some(boot_url.into());
        self
    }

    /// Set the keystore passcode salt for this client.
    /// Must be at least 21 characters, only the first 21 are used.
    pub fn with_passcode(mut self, passcode: &str) -> Self {
        self.passcode = Some(passcode.into());
        self
    }

    /// Set a friendly name registered with the agent on boot.
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Set the timeout for individual HTTP requests in milliseconds.
    /// Default: 5000 (5 seconds)
    pub fn with_request_timeout(mut self, request_timeout: u32) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Set how long to wait for a long-running operation in milliseconds.
    /// Default: 30000 (30 seconds)
    pub fn with_operation_timeout(mut self, operation_timeout: u32) -> Self {
        self.operation_timeout = operation_timeout;
        self
    }

    /// Set the delay between operation polls in milliseconds.
    /// Default: 250
    pub fn with_operation_poll_interval(mut self, operation_poll_interval: u32) -> Self {
        self.operation_poll_interval = operation_poll_interval;
        self
    }

    /// Set the contact cache capacity (approx)
    /// Default: 100 items
    pub fn with_contact_cache_capacity(mut self, contact_cache_capacity: u32) -> Self {
        self.contact_cache_capacity = contact_cache_capacity;
        self
    }

    /// Set the time-to-live in seconds for each cached contact.
    /// Default: 300 (5 Minutes)
    pub fn with_contact_cache_ttl(mut self, contact_cache_ttl: u32) -> Self {
        self.contact_cache_ttl = contact_cache_ttl;
        self
    }

    /// Build the [KeriaClientConfig].
    ///
    /// Will return an error if a required field is missing, a URL doesn't
    /// parse as http/https, or the passcode is too short.
    pub fn build(self) -> Result<KeriaClientConfig, KeriaClientError> {
        let Some(admin_url) = self.admin_url else {
            return Err(KeriaClientError::ConfigError(
                "admin_url is required".into(),
            ));
        };
        let Some(boot_url) = self.boot_url else {
            return Err(KeriaClientError::ConfigError("boot_url is required".into()));
        };
        let Some(passcode) = self.passcode else {
            return Err(KeriaClientError::ConfigError("passcode is required".into()));
        };

        validate_http_url("admin_url", &admin_url)?;
        validate_http_url("boot_url", &boot_url)?;

        if !passcode.is_ascii() {
            return Err(KeriaClientError::ConfigError(
                "passcode must be ASCII".into(),
            ));
        }
        if passcode.len() < MIN_PASSCODE_LENGTH {
            return Err(KeriaClientError::ConfigError(format!(
                "passcode must be at least {MIN_PASSCODE_LENGTH} characters, got {}",
                passcode.len()
            )));
        }

        Ok(KeriaClientConfig {
            admin_url: admin_url.trim_end_matches('/').to_string(),
            boot_url: boot_url.trim_end_matches('/').to_string(),
            passcode: passcode[..MIN_PASSCODE_LENGTH].to_string(),
            alias: self.alias,
            request_timeout: Duration::from_millis(self.request_timeout.into()),
            operation_timeout: Duration::from_millis(self.operation_timeout.into()),
            operation_poll_interval: Duration::from_millis(self.operation_poll_interval.into()),
            contact_cache_capacity: self.contact_cache_capacity,
            contact_cache_ttl: self.contact_cache_ttl,
        })
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<(), KeriaClientError> {
    let url = Url::parse(value).map_err(|err| {
        KeriaClientError::ConfigError(format!("{field} ({value}) is not a valid URL: {err}"))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(KeriaClientError::ConfigError(format!(
            "{field} ({value}) must be http or https, got {scheme}"
        ))),
    }
}
