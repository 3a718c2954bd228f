use std::time::Duration;

pub const DEFAULT_GATEWAY_URL: &str = "https://api.stripe.com";
pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Credentials and limits for the gateway-backed processor.
///
/// Built by the caller and handed to the gateway client and the processor
/// factory; nothing reads credentials from process-wide state.
#[derive(Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    pub base_url: String,
    /// Currency codes the gateway processor accepts, compared case-insensitively.
    pub supported_currencies: Vec<String>,
    pub timeout: Duration,
}

impl GatewayConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_GATEWAY_URL.to_string(),
            supported_currencies: vec![DEFAULT_CURRENCY.to_string()],
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_supported_currencies<I, S>(mut self, currencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_currencies = currencies.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn supports_currency(&self, currency: &str) -> bool {
        let currency = currency.trim();
        self.supported_currencies
            .iter()
            .any(|c| c.eq_ignore_ascii_case(currency))
    }
}

// Keeps the API key out of debug output and logs.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("supported_currencies", &self.supported_currencies)
            .field("timeout", &self.timeout)
            .finish()
    }
}
