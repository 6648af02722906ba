//! The `Secret` record and its byte encoding.
//!
//! A secret is encoded as a flat JSON object with its six string fields.
//! The encoded bytes are what gets sealed into the secret's file; they
//! never touch the disk in the clear.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::errors::{ConjureError, Result};

/// One stored credential.
///
/// All fields are opaque strings; the vault does no format validation
/// beyond requiring a non-empty `name`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    pub name: String,
    pub username: String,
    pub password: String,
    pub url: String,
    pub email: String,
    pub notes: String,
}

impl Secret {
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        url: impl Into<String>,
        email: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            password: password.into(),
            url: url.into(),
            email: email.into(),
            notes: notes.into(),
        }
    }

    /// Serialize to the byte form that gets encrypted.
    ///
    /// The buffer is wiped when dropped.
    pub fn encode(&self) -> Result<Zeroizing<Vec<u8>>> {
        serde_json::to_vec(self)
            .map(Zeroizing::new)
            .map_err(|e| ConjureError::SerializationError(format!("secret: {e}")))
    }

    /// Parse bytes produced by `encode`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| ConjureError::MalformedRecord(e.to_string()))
    }
}

// Keep the password out of logs and panic messages.
impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("url", &self.url)
            .field("email", &self.email)
            .field("notes", &self.notes)
            .finish()
    }
}
