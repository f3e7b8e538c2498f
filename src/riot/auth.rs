//! Authentication for the Riot platform API

use reqwest::header::HeaderValue;

use crate::common::errors::{Result, StatsError};
use crate::config::types::ApiCredentials;

/// Header carrying the API key on every platform request
pub const RIOT_TOKEN_HEADER: &str = "X-Riot-Token";

/// Prepared authentication header for platform requests
#[derive(Debug, Clone)]
pub struct AuthHeaders {
    token: HeaderValue,
}

impl AuthHeaders {
    /// Add authentication headers to a reqwest RequestBuilder
    pub fn apply_to_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header(RIOT_TOKEN_HEADER, self.token.clone())
    }
}

/// Build the token header from credentials
///
/// Fails when the key is empty or cannot be sent as a header value.
pub fn generate_auth_headers(credentials: &ApiCredentials) -> Result<AuthHeaders> {
    let key = credentials.api_key.trim();
    if key.is_empty() {
        return Err(StatsError::Configuration("API key is empty".to_string()));
    }

    let mut token = HeaderValue::from_str(key)
        .map_err(|e| StatsError::Configuration(format!("Invalid API key: {}", e)))?;
    token.set_sensitive(true);

    Ok(AuthHeaders { token })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_auth_headers() {
        let headers = generate_auth_headers(&ApiCredentials::new("RGAPI-1234")).unwrap();
        assert!(headers.token.is_sensitive());
        assert_eq!(headers.token.to_str().unwrap(), "RGAPI-1234");
    }

    #[test]
    fn test_rejects_empty_key() {
        assert!(generate_auth_headers(&ApiCredentials::new("  ")).is_err());
    }

    #[test]
    fn test_rejects_non_header_key() {
        assert!(generate_auth_headers(&ApiCredentials::new("bad\nkey")).is_err());
    }
}
