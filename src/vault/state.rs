//! On-disk vault state and the storage-root layout.
//!
//! A storage root looks like this:
//!
//! ```text
//! <root>/
//!   vault                                   state file (JSON, see below)
//!   0b5e6c7a-1f0e-4c53-9a57-3c1e0d7f1a2b    one sealed file per secret
//!   ...
//! ```
//!
//! The state file holds the name -> file-id mapping, the base64 salt,
//! the root path recorded at creation and the PBKDF2 iteration count:
//!
//! ```text
//! {"secrets":{"toad":"0b5e..."},"salt":"q83v...","store":"/home/me/.conjure","iterations":50000}
//! ```
//!
//! No password material is ever written here.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::crypto::kdf::{generate_salt, KdfParams, DEFAULT_ITERATIONS, MIN_ITERATIONS};
use crate::errors::{ConjureError, Result};

/// File name of the state file inside the storage root.
pub const STATE_FILE: &str = "vault";

/// Persisted vault metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultState {
    /// Secret name -> storage-file identifier.
    pub secrets: HashMap<String, String>,

    /// Salt for PBKDF2 (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    /// Storage root recorded when the vault was created.
    pub store: PathBuf,

    /// PBKDF2 rounds used for every key in this vault.
    /// Missing in older state files, which always used the default.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
}

fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

impl VaultState {
    /// Build a fresh, empty state with a new random salt.
    pub fn new(root: &Path, params: &KdfParams) -> Self {
        Self {
            secrets: HashMap::new(),
            salt: generate_salt().to_vec(),
            store: root.to_path_buf(),
            iterations: params.iterations,
        }
    }

    /// Load the state stored under `root`, creating the directory and a
    /// brand-new vault if either is missing.
    ///
    /// A new vault is persisted before it is returned.  Creating one with
    /// fewer than `MIN_ITERATIONS` rounds is refused.
    pub fn load_or_create(root: &Path, params: &KdfParams) -> Result<Self> {
        if !root.exists() {
            warn!(root = %root.display(), "vault store does not exist, creating it");
            create_private_dir(root)?;
        }

        let state_path = root.join(STATE_FILE);
        if !state_path.exists() {
            if params.iterations < MIN_ITERATIONS {
                return Err(ConjureError::KeyDerivationFailed(format!(
                    "refusing to create a vault with {} PBKDF2 iterations (minimum {MIN_ITERATIONS})",
                    params.iterations
                )));
            }

            let state = Self::new(root, params);
            state.save(root)?;
            info!(path = %state_path.display(), "created new vault");
            return Ok(state);
        }

        let bytes = fs::read(&state_path)?;
        let state = Self::from_bytes(&bytes)?;

        if state.store != root {
            warn!(
                recorded = %state.store.display(),
                opened = %root.display(),
                "vault was created at a different path, using the opened path"
            );
        }

        debug!(path = %state_path.display(), secrets = state.secrets.len(), "loaded vault");
        Ok(state)
    }

    /// Parse serialized state.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let state: Self = serde_json::from_slice(bytes)
            .map_err(|e| ConjureError::CorruptState(format!("state JSON: {e}")))?;

        if state.salt.is_empty() {
            return Err(ConjureError::CorruptState("salt is empty".into()));
        }
        if state.iterations < MIN_ITERATIONS {
            return Err(ConjureError::CorruptState(format!(
                "iteration count {} is below the minimum {MIN_ITERATIONS}",
                state.iterations
            )));
        }
        Ok(state)
    }

    /// Serialize the full state.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| ConjureError::SerializationError(format!("vault state: {e}")))
    }

    /// Replace the state file under `root` with the current state.
    pub fn save(&self, root: &Path) -> Result<()> {
        write_private(&root.join(STATE_FILE), &self.to_bytes()?)
    }

    /// KDF parameters recorded for this vault.
    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            iterations: self.iterations,
        }
    }
}

// ---------------------------------------------------------------------------
// Filesystem helpers
// ---------------------------------------------------------------------------

/// Create `dir` (and parents) readable only by the owner.
fn create_private_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
    }

    Ok(())
}

/// Write `data` to `path` with owner-only permissions, replacing any
/// existing file.
///
/// The bytes go to a uniquely named temp file in the same directory,
/// created 0600, which is then renamed over the target.  Readers see
/// either the old or the new contents and never a partial write.  The
/// temp file is removed if anything fails.  Nothing is fsynced.
pub(crate) fn write_private(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let prefix = format!(
        ".{}.",
        path.file_name().unwrap_or_default().to_string_lossy()
    );

    let mut builder = tempfile::Builder::new();
    builder.prefix(&prefix).suffix(".tmp");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o600));
    }

    let mut tmp = builder.tempfile_in(parent)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| ConjureError::Io(e.error))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&BASE64.encode(data))
}

fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
