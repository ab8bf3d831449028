//! Authorization header parsing
//!
//! Accepts `Authorization: Bearer <key>` and the `Token <key>` form used by
//! older clients. The scheme is matched case-insensitively.

use http::HeaderMap;
use http::header::AUTHORIZATION;
use thiserror::Error;

/// Schemes accepted in the `Authorization` header
pub const ACCEPTED_SCHEMES: &[&str] = &["bearer", "token"];

/// Value for the `WWW-Authenticate` header on 401 responses
pub const WWW_AUTHENTICATE_VALUE: &str = "Bearer";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BearerError {
    /// No `Authorization` header, or a scheme this service does not handle
    #[error("Authentication credentials were not provided.")]
    Missing,

    #[error("Invalid token header. No credentials provided.")]
    NoCredentials,

    #[error("Invalid token header. Token string should not contain spaces.")]
    ContainsSpaces,

    #[error("Invalid token header. Token string should not contain invalid characters.")]
    InvalidCharacters,
}

/// Pull the opaque key out of the `Authorization` header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, BearerError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Err(BearerError::Missing);
    };

    let value = value.to_str().map_err(|_| BearerError::InvalidCharacters)?;
    let mut parts = value.split_whitespace();

    let Some(scheme) = parts.next() else {
        return Err(BearerError::Missing);
    };
    if !ACCEPTED_SCHEMES
        .iter()
        .any(|accepted| scheme.eq_ignore_ascii_case(accepted))
    {
        return Err(BearerError::Missing);
    }

    let Some(key) = parts.next() else {
        return Err(BearerError::NoCredentials);
    };
    if parts.next().is_some() {
        return Err(BearerError::ContainsSpaces);
    }

    Ok(key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_and_token_schemes() {
        assert_eq!(extract_bearer_token(&headers_with("Bearer abc")).unwrap(), "abc");
        assert_eq!(extract_bearer_token(&headers_with("bearer abc")).unwrap(), "abc");
        assert_eq!(extract_bearer_token(&headers_with("Token abc")).unwrap(), "abc");
        assert_eq!(extract_bearer_token(&headers_with("TOKEN  abc ")).unwrap(), "abc");
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(
            extract_bearer_token(&HeaderMap::new()),
            Err(BearerError::Missing)
        );
    }

    #[test]
    fn test_other_scheme_is_treated_as_missing() {
        assert_eq!(
            extract_bearer_token(&headers_with("Basic dXNlcjpwYXNz")),
            Err(BearerError::Missing)
        );
    }

    #[test]
    fn test_scheme_without_key() {
        assert_eq!(
            extract_bearer_token(&headers_with("Bearer")),
            Err(BearerError::NoCredentials)
        );
    }

    #[test]
    fn test_key_with_spaces() {
        assert_eq!(
            extract_bearer_token(&headers_with("Bearer abc def")),
            Err(BearerError::ContainsSpaces)
        );
    }

    #[test]
    fn test_non_ascii_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap(),
        );
        assert_eq!(
            extract_bearer_token(&headers),
            Err(BearerError::InvalidCharacters)
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            BearerError::Missing.to_string(),
            "Authentication credentials were not provided."
        );
    }
}
