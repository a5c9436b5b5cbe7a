use axum::http::{header, HeaderMap, StatusCode};
use base64::engine::general_purpose;
use base64::{alphabet, engine, Engine};
use lazy_static::lazy_static;

/// Why the `Authorization` header was rejected. Each variant answers with its
/// own status code so the router's retry logic can tell them apart.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum CredentialError {
    #[error("authorization header missing")]
    Missing,
    #[error("authorization scheme is not Basic")]
    NotBasic,
    #[error("Basic credentials are not a user:token pair")]
    Malformed,
}

impl CredentialError {
    pub fn status(self) -> StatusCode {
        match self {
            CredentialError::Missing => StatusCode::UNAUTHORIZED,
            CredentialError::NotBasic => StatusCode::FORBIDDEN,
            CredentialError::Malformed => StatusCode::NOT_ACCEPTABLE,
        }
    }
}

lazy_static! {
    static ref BASE64_ENGINE: engine::GeneralPurpose =
        engine::GeneralPurpose::new(&alphabet::STANDARD, general_purpose::PAD);
}

/// The Basic-Auth pair carried on an update request. Routers following the
/// Dyn convention put the provider API token in the password field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Credentials {
    pub user: String,
    pub token: String,
}

impl Credentials {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, CredentialError> {
        let raw = headers
            .get(header::AUTHORIZATION)
            .ok_or(CredentialError::Missing)?;
        let payload = raw
            .to_str()
            .ok()
            .and_then(|raw| raw.strip_prefix("Basic "))
            .ok_or(CredentialError::NotBasic)?;
        let decoded = BASE64_ENGINE
            .decode(payload.trim())
            .map_err(|_| CredentialError::Malformed)?;
        let decoded = String::from_utf8(decoded).map_err(|_| CredentialError::Malformed)?;
        match decoded.split(':').collect::<Vec<_>>().as_slice() {
            [user, token] => Ok(Credentials {
                user: (*user).to_string(),
                token: (*token).to_string(),
            }),
            _ => Err(CredentialError::Malformed),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_valid_credentials() {
        // "user:TOKEN123"
        let headers = headers_with_auth("Basic dXNlcjpUT0tFTjEyMw==");
        let credentials = Credentials::from_headers(&headers).expect("credentials must parse");
        assert_eq!(credentials.user, "user");
        assert_eq!(credentials.token, "TOKEN123");
    }

    #[test]
    fn test_empty_token() {
        // "user:"
        let headers = headers_with_auth("Basic dXNlcjo=");
        let credentials = Credentials::from_headers(&headers).expect("credentials must parse");
        assert_eq!(credentials.user, "user");
        assert_eq!(credentials.token, "");
    }

    #[test]
    fn test_missing_header() {
        let err = Credentials::from_headers(&HeaderMap::new()).unwrap_err();
        assert_eq!(err, CredentialError::Missing);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_not_basic_scheme() {
        let err = Credentials::from_headers(&headers_with_auth("Bearer sometoken")).unwrap_err();
        assert_eq!(err, CredentialError::NotBasic);
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_payload_without_colon() {
        // "usertoken"
        let err = Credentials::from_headers(&headers_with_auth("Basic dXNlcnRva2Vu")).unwrap_err();
        assert_eq!(err, CredentialError::Malformed);
        assert_eq!(err.status(), StatusCode::NOT_ACCEPTABLE);
    }

    #[test]
    fn test_payload_with_extra_colons() {
        // "user:tok:en"
        let err =
            Credentials::from_headers(&headers_with_auth("Basic dXNlcjp0b2s6ZW4=")).unwrap_err();
        assert_eq!(err, CredentialError::Malformed);
    }

    #[test]
    fn test_payload_not_base64() {
        let err = Credentials::from_headers(&headers_with_auth("Basic !!!not-base64!!!"))
            .unwrap_err();
        assert_eq!(err, CredentialError::Malformed);
    }
}
