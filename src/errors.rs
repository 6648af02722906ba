use thiserror::Error;

/// All errors that can occur in Conjure.
#[derive(Debug, Error)]
pub enum ConjureError {
    // --- Vault errors ---
    #[error("Secret '{0}' not found")]
    NotFound(String),

    #[error("Provided credentials are incorrect")]
    Unauthorized,

    #[error("Vault state is corrupt: {0}")]
    CorruptState(String),

    #[error("Malformed secret record: {0}")]
    MalformedRecord(String),

    #[error("Invalid secret name: {0}")]
    InvalidSecretName(String),

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Authenticated decryption rejected the blob: wrong key, tampered or
    /// truncated data. The engine reports this to callers as `Unauthorized`.
    #[error("Decryption failed — wrong key or tampered data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Credential errors ---
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for Conjure results.
pub type Result<T> = std::result::Result<T, ConjureError>;
