//! The vault engine: list, get, update and delete secrets.
//!
//! `Vault` ties the state file, the KDF and the cipher together.  There
//! is no stored password hash: an operation on an existing secret
//! proves the password by decrypting that secret's file.  A wrong
//! password and a corrupted file are therefore indistinguishable and
//! both surface as `Unauthorized`.
//!
//! A `Vault` is meant to live for a single operation (open, act, drop).
//! Two processes mutating the same root race on the state file and the
//! last writer wins for the whole mapping, not per entry.  Hosts that
//! keep a `Vault` around must serialize mutations themselves.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::kdf::{derive_key_with_params, KdfParams, KEY_LEN};
use crate::errors::{ConjureError, Result};

use super::secret::Secret;
use super::state::{write_private, VaultState};

/// An opened vault with the session's master password attached.
pub struct Vault {
    /// Directory holding the state file and the secret files.
    root: PathBuf,

    /// Persisted mapping, salt and KDF settings.
    state: VaultState,

    /// Master password for this session only (wiped on drop).
    password: Zeroizing<Vec<u8>>,
}

impl Vault {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open the vault at `root`, creating it with default KDF settings
    /// if it does not exist yet.
    pub fn open(root: &Path, password: &[u8]) -> Result<Self> {
        Self::open_with_params(root, password, &KdfParams::default())
    }

    /// Open the vault at `root`.
    ///
    /// `params` only matter when a new vault is created; an existing
    /// vault keeps deriving with the iteration count it was created with.
    ///
    /// Opening never checks the password.  That happens lazily, when an
    /// operation first needs to decrypt something.
    pub fn open_with_params(root: &Path, password: &[u8], params: &KdfParams) -> Result<Self> {
        let state = VaultState::load_or_create(root, params)?;

        Ok(Self {
            root: root.to_path_buf(),
            state,
            password: Zeroizing::new(password.to_vec()),
        })
    }

    // ------------------------------------------------------------------
    // Secret operations
    // ------------------------------------------------------------------

    /// Names of every secret in the vault, sorted.
    ///
    /// Requires no password: secret names are not treated as sensitive.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state.secrets.keys().cloned().collect();
        names.sort();
        debug!(count = names.len(), "listed secrets");
        names
    }

    /// Decrypt and return the secret stored under `name`.
    pub fn get(&self, name: &str) -> Result<Secret> {
        let file_id = self
            .state
            .secrets
            .get(name)
            .ok_or_else(|| ConjureError::NotFound(name.to_string()))?;

        let blob = match fs::read(self.secret_path(file_id)) {
            Ok(blob) => blob,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                error!(secret = name, file_id = %file_id, "secret file is missing");
                return Err(ConjureError::NotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let key = self.derive_key()?;
        let plaintext = self.open_blob(&key, name, &blob)?;

        debug!(secret = name, "decrypted secret");
        Secret::decode(&plaintext)
    }

    /// Create `secret`, or overwrite it if a secret with the same name
    /// exists.
    ///
    /// Overwriting first decrypts the current file to check the
    /// password; on failure nothing on disk is touched.  An overwrite
    /// reuses the existing file identifier.
    pub fn update(&mut self, secret: &Secret) -> Result<()> {
        if secret.name.is_empty() {
            return Err(ConjureError::InvalidSecretName(
                "secret name cannot be empty".into(),
            ));
        }

        let key = self.derive_key()?;

        let file_id = match self.state.secrets.get(&secret.name) {
            Some(existing) => {
                warn!(secret = %secret.name, "secret already exists, updating it");
                let blob = fs::read(self.secret_path(existing))?;
                self.open_blob(&key, &secret.name, &blob)?;
                existing.clone()
            }
            None => Uuid::new_v4().to_string(),
        };

        let plaintext = secret.encode()?;
        let blob = encrypt(&key, &plaintext)?;
        write_private(&self.secret_path(&file_id), &blob)?;

        self.state
            .secrets
            .insert(secret.name.clone(), file_id.clone());

        if let Err(e) = self.state.save(&self.root) {
            error!(
                secret = %secret.name,
                file_id = %file_id,
                "secret file written but vault state could not be saved: {e}"
            );
            return Err(e);
        }

        info!(secret = %secret.name, "stored secret");
        Ok(())
    }

    /// Remove the secret stored under `name` and its file.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        let Some(file_id) = self.state.secrets.get(name).cloned() else {
            warn!(secret = name, "secret does not exist, nothing was deleted");
            return Err(ConjureError::NotFound(name.to_string()));
        };

        let path = self.secret_path(&file_id);
        let blob = fs::read(&path)?;
        let key = self.derive_key()?;
        self.open_blob(&key, name, &blob)?;

        fs::remove_file(&path)?;
        self.state.secrets.remove(name);

        if let Err(e) = self.state.save(&self.root) {
            error!(
                secret = name,
                file_id = %file_id,
                "secret file removed but vault state could not be saved: {e}"
            );
            return Err(e);
        }

        info!(secret = name, "deleted secret");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Directory the vault was opened from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Storage-file identifier of `name`, if present.
    pub fn file_id(&self, name: &str) -> Option<&str> {
        self.state.secrets.get(name).map(String::as_str)
    }

    /// Returns `true` if a secret named `name` exists.
    ///
    /// Metadata only, no decryption is performed.
    pub fn contains(&self, name: &str) -> bool {
        self.state.secrets.contains_key(name)
    }

    /// Number of secrets in the vault.
    pub fn secret_count(&self) -> usize {
        self.state.secrets.len()
    }

    /// PBKDF2 iteration count this vault derives keys with.
    pub fn iterations(&self) -> u32 {
        self.state.iterations
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn secret_path(&self, file_id: &str) -> PathBuf {
        self.root.join(file_id)
    }

    fn derive_key(&self) -> Result<Zeroizing<[u8; KEY_LEN]>> {
        derive_key_with_params(&self.password, &self.state.salt, &self.state.kdf_params())
            .map(Zeroizing::new)
    }

    /// Decrypt a secret file, treating any authentication failure as a
    /// wrong password.
    fn open_blob(
        &self,
        key: &[u8; KEY_LEN],
        name: &str,
        blob: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        match decrypt(key, blob) {
            Ok(plaintext) => Ok(Zeroizing::new(plaintext)),
            Err(ConjureError::DecryptionFailed) => {
                error!(secret = name, "could not decrypt secret file");
                Err(ConjureError::Unauthorized)
            }
            Err(e) => Err(e),
        }
    }
}
