//! HTTP Basic credential decoding.
//!
//! Front ends that receive an `Authorization: Basic <token>` value hand
//! it to `BasicCredentials::parse` and pass the resulting password to
//! `Vault::open`.  The username is carried along but the vault does not
//! use it.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::Zeroizing;

use crate::errors::{ConjureError, Result};

/// Username and password decoded from a Basic auth token.
pub struct BasicCredentials {
    pub username: String,
    pub password: Zeroizing<String>,
}

impl BasicCredentials {
    /// Decode an `Authorization` header value.
    ///
    /// Accepts either `Basic <base64>` or the bare base64 token.  The
    /// decoded text is split on the first `:`, so passwords may contain
    /// colons; usernames may not.
    pub fn parse(header: &str) -> Result<Self> {
        let token = header.trim();
        let token = token.strip_prefix("Basic ").unwrap_or(token).trim();

        let decoded = Zeroizing::new(BASE64.decode(token).map_err(|_| {
            ConjureError::InvalidCredentials("could not decode Basic Auth token".into())
        })?);

        let text = std::str::from_utf8(&decoded).map_err(|_| {
            ConjureError::InvalidCredentials("Basic Auth token is not valid UTF-8".into())
        })?;

        let (username, password) = text
            .split_once(':')
            .ok_or_else(|| ConjureError::InvalidCredentials("invalid Basic Auth token".into()))?;

        Ok(Self {
            username: username.to_string(),
            password: Zeroizing::new(password.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(raw: &str) -> String {
        format!("Basic {}", BASE64.encode(raw))
    }

    #[test]
    fn parses_username_and_password() {
        let creds = BasicCredentials::parse(&token("bobby:m1")).unwrap();
        assert_eq!(creds.username, "bobby");
        assert_eq!(creds.password.as_str(), "m1");
    }

    #[test]
    fn accepts_bare_token() {
        let bare = BASE64.encode("bobby:m1");
        let creds = BasicCredentials::parse(&bare).unwrap();
        assert_eq!(creds.password.as_str(), "m1");
    }

    #[test]
    fn password_may_contain_colons() {
        let creds = BasicCredentials::parse(&token("bobby:a:b:c")).unwrap();
        assert_eq!(creds.password.as_str(), "a:b:c");
    }

    #[test]
    fn empty_password_is_allowed() {
        let creds = BasicCredentials::parse(&token("bobby:")).unwrap();
        assert!(creds.password.is_empty());
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(matches!(
            BasicCredentials::parse("Basic %%%"),
            Err(ConjureError::InvalidCredentials(_))
        ));
    }

    #[test]
    fn rejects_token_without_colon() {
        assert!(matches!(
            BasicCredentials::parse(&token("just-a-user")),
            Err(ConjureError::InvalidCredentials(_))
        ));
    }
}
