use crate::error::{Issue1Error, Result};
use crate::request::Headers;
use reqwest::header::AUTHORIZATION;

/// Adds `token` to `headers` as a bearer `Authorization` header.
///
/// An empty token leaves the headers untouched, since most endpoints accept
/// anonymous calls. A token with whitespace anywhere in it is rejected before
/// any request is built.
pub fn attach_auth_token(token: &str, mut headers: Headers) -> Result<Headers> {
    if token.is_empty() {
        return Ok(headers);
    }
    if token.split_whitespace().nth(1).is_some() || token.trim() != token {
        return Err(Issue1Error::InvalidAuthToken);
    }
    headers.insert(AUTHORIZATION.as_str().to_string(), format!("Bearer {token}"));
    Ok(headers)
}

/// Headers carrying only the bearer token, see [`attach_auth_token`].
pub fn auth_headers(token: &str) -> Result<Headers> {
    attach_auth_token(token, Headers::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attaches_bearer_header() {
        let headers = auth_headers("abc.def.ghi").unwrap();
        assert_eq!(headers["authorization"], "Bearer abc.def.ghi");
    }

    #[test]
    fn empty_token_means_no_auth() {
        let mut existing = Headers::new();
        existing.insert("x-trace".to_string(), "1".to_string());
        let headers = attach_auth_token("", existing.clone()).unwrap();
        assert_eq!(headers, existing);
    }

    #[test]
    fn rejects_tokens_with_whitespace() {
        for token in ["abc def", "abc\tdef", "abc\ndef", " abc", "abc "] {
            assert!(
                matches!(auth_headers(token), Err(Issue1Error::InvalidAuthToken)),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn keeps_existing_headers() {
        let mut existing = Headers::new();
        existing.insert("x-trace".to_string(), "1".to_string());
        let headers = attach_auth_token("tok", existing).unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["x-trace"], "1");
    }
}
