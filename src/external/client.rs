use std::time::Duration;

use crate::config::TelegramSettings;
use crate::error::{NotifyError, NotifyResult};

/// Total request timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connect timeout used when none is configured
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeouts applied to the outbound HTTP client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request: Duration,
    pub connect: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            request: DEFAULT_TIMEOUT,
            connect: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl From<&TelegramSettings> for HttpTimeouts {
    fn from(settings: &TelegramSettings) -> Self {
        Self {
            request: Duration::from_secs(settings.timeout_seconds),
            connect: Duration::from_secs(settings.connect_timeout_seconds),
        }
    }
}

/// User-Agent sent with every request
pub fn user_agent() -> String {
    format!("tg-notify/{}", crate::pkg_version())
}

/// Builds the HTTP client used for Bot API calls.
///
/// - **Timeouts**: bounded request and connect time; expiry surfaces as a
///   network error
/// - **Security**: Rustls for TLS (no OpenSSL dependency)
/// - **Redirects**: never followed; a 3xx is returned as-is
pub fn build_http_client(timeouts: HttpTimeouts) -> NotifyResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeouts.request)
        .connect_timeout(timeouts.connect)
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(user_agent())
        .build()
        .map_err(|e| NotifyError::network(format!("Failed to build HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_initialization() {
        assert!(build_http_client(HttpTimeouts::default()).is_ok());
    }

    #[test]
    fn test_timeouts_from_settings() {
        let settings = TelegramSettings {
            timeout_seconds: 5,
            connect_timeout_seconds: 2,
            ..Default::default()
        };
        let timeouts = HttpTimeouts::from(&settings);
        assert_eq!(timeouts.request, Duration::from_secs(5));
        assert_eq!(timeouts.connect, Duration::from_secs(2));
    }

    #[test]
    fn test_default_timeouts_match_default_settings() {
        assert_eq!(
            HttpTimeouts::from(&TelegramSettings::default()),
            HttpTimeouts::default()
        );
    }

    #[test]
    fn test_user_agent() {
        assert!(user_agent().starts_with("tg-notify/"));
    }
}
