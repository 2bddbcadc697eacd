use axum::http::{header::AUTHORIZATION, HeaderMap};
use sha2::{Digest, Sha256};

/// Whether a trigger request carries the shared secret, as `?token=` or a bearer token.
///
/// With no secret configured nothing is authorized.
pub fn is_authorized(secret: Option<&str>, query_token: Option<&str>, headers: &HeaderMap) -> bool {
    let Some(secret) = secret else {
        return false;
    };

    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);

    [query_token, bearer]
        .into_iter()
        .flatten()
        .fold(false, |matched, token| matches_secret(token, secret) | matched)
}

/// Compares SHA-256 digests so the time taken does not depend on where the inputs differ or on
/// their lengths.
fn matches_secret(token: &str, secret: &str) -> bool {
    let token = Sha256::digest(token.as_bytes());
    let secret = Sha256::digest(secret.as_bytes());
    token
        .iter()
        .zip(secret.iter())
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}")).unwrap());
        headers
    }

    #[test]
    fn test_query_token() {
        let none = HeaderMap::new();
        assert!(is_authorized(Some("s3cret"), Some("s3cret"), &none));
        assert!(!is_authorized(Some("s3cret"), Some("guess"), &none));
        assert!(!is_authorized(Some("s3cret"), None, &none));
    }

    #[test]
    fn test_bearer_token() {
        assert!(is_authorized(Some("s3cret"), None, &bearer("s3cret")));
        assert!(!is_authorized(Some("s3cret"), None, &bearer("guess")));
        assert!(is_authorized(Some("s3cret"), Some("guess"), &bearer("s3cret")));
    }

    #[test]
    fn test_secret_comparison() {
        assert!(matches_secret("s3cret", "s3cret"));
        assert!(!matches_secret("s3cre", "s3cret"));
        assert!(!matches_secret("s3cret!", "s3cret"));
        assert!(!matches_secret("S3cret", "s3cret"));
        assert!(!matches_secret("", "s3cret"));
    }

    #[test]
    fn test_missing_secret_rejects_everything() {
        assert!(!is_authorized(None, Some(""), &bearer("")));
        assert!(!is_authorized(None, Some("anything"), &HeaderMap::new()));
    }
}
